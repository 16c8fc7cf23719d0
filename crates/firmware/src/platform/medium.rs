//! EEPROM-backed storage medium
//!
//! Adapts an [`EepromInterface`] to the parameter store's [`StorageMedium`].
//! The medium may use only the first part of the device; everything above
//! `size` is left to other users.

use crate::platform::traits::EepromInterface;
use crate::platform::{PlatformError, Result};
use deckconf_core::database::{MediumError, StorageMedium};

/// Configuration database medium on an EEPROM device
pub struct EepromMedium<E: EepromInterface> {
    eeprom: E,
    size: usize,
}

impl<E: EepromInterface> EepromMedium<E> {
    /// Use the first `size` bytes of `eeprom`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the device is smaller than
    /// `size`.
    pub fn new(eeprom: E, size: usize) -> Result<Self> {
        if size > eeprom.capacity() as usize {
            crate::log_error!(
                "EEPROM too small: {} bytes requested, {} available",
                size,
                eeprom.capacity()
            );
            return Err(PlatformError::InvalidConfig);
        }

        Ok(Self { eeprom, size })
    }

    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    pub fn into_inner(self) -> E {
        self.eeprom
    }

    fn check(&self, address: usize, len: usize) -> core::result::Result<u32, MediumError> {
        match address.checked_add(len) {
            Some(end) if end <= self.size => Ok(address as u32),
            _ => Err(MediumError::InvalidAddress),
        }
    }
}

impl<E: EepromInterface> StorageMedium for EepromMedium<E> {
    fn size(&self) -> usize {
        self.size
    }

    fn read(&mut self, address: usize, buf: &mut [u8]) -> core::result::Result<(), MediumError> {
        let address = self.check(address, buf.len())?;
        self.eeprom.read(address, buf).map_err(|e| {
            crate::log_error!("EEPROM read at {} failed: {:?}", address, e);
            MediumError::from(e)
        })
    }

    fn write(&mut self, address: usize, data: &[u8]) -> core::result::Result<(), MediumError> {
        let address = self.check(address, data.len())?;
        self.eeprom.write(address, data).map_err(|e| {
            crate::log_error!("EEPROM write at {} failed: {:?}", address, e);
            MediumError::from(e)
        })
    }

    fn clear(&mut self) -> core::result::Result<(), MediumError> {
        self.eeprom.erase_all().map_err(|e| {
            crate::log_error!("EEPROM erase failed: {:?}", e);
            MediumError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockEeprom;

    #[test]
    fn test_medium_larger_than_device_rejected() {
        assert!(matches!(
            EepromMedium::new(MockEeprom::<16>::new(), 32),
            Err(PlatformError::InvalidConfig)
        ));
    }

    #[test]
    fn test_medium_bounded_by_size() {
        let mut medium = EepromMedium::new(MockEeprom::<16>::new(), 8).unwrap();
        assert_eq!(medium.size(), 8);
        assert_eq!(medium.write(6, &[1, 2]), Ok(()));
        assert_eq!(medium.write(7, &[1, 2]), Err(MediumError::InvalidAddress));

        let mut buf = [0u8; 2];
        medium.read(6, &mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
    }

    #[test]
    fn test_medium_maps_device_errors() {
        let mut medium = EepromMedium::new(MockEeprom::<16>::new(), 16).unwrap();
        medium.eeprom_mut().fail_after_writes(0);
        assert_eq!(medium.write(0, &[1]), Err(MediumError::WriteFailed));
    }

    #[test]
    fn test_medium_clear_erases_device() {
        let mut medium = EepromMedium::new(MockEeprom::<4>::new(), 4).unwrap();
        medium.write(0, &[0, 0, 0, 0]).unwrap();
        medium.clear().unwrap();
        assert_eq!(medium.into_inner().contents(), &[0xFF; 4]);
    }
}
