//! Layout engine
//!
//! Reads and writes individual parameters of a placed layout at a region base
//! address. Bit and half-byte parameters are packed; multi-byte parameters
//! are little-endian. Writes are skipped when the stored bytes already hold
//! the value.

use super::error::StoreError;
use super::layout::{BlockLayout, ParamWidth, SectionLayout};
use super::medium::StorageMedium;
use super::store::ResetKind;

/// Bytes touched when accessing one parameter
const fn slot_len(width: ParamWidth) -> usize {
    match width {
        ParamWidth::Bit | ParamWidth::HalfByte | ParamWidth::Byte => 1,
        ParamWidth::Word => 2,
        ParamWidth::DWord => 4,
    }
}

/// A window of the medium starting at `base`
pub(crate) struct Region<'a, M: StorageMedium> {
    medium: &'a mut M,
    base: usize,
}

impl<'a, M: StorageMedium> Region<'a, M> {
    pub(crate) fn new(medium: &'a mut M, base: usize) -> Self {
        Self { medium, base }
    }

    fn address(&self, section: &SectionLayout, index: usize) -> Result<usize, StoreError> {
        if index >= section.descriptor.count {
            return Err(StoreError::IndexOutOfRange);
        }

        let relative = match section.descriptor.width {
            ParamWidth::Bit => index / 8,
            ParamWidth::HalfByte => index / 2,
            ParamWidth::Byte => index,
            ParamWidth::Word => index * 2,
            ParamWidth::DWord => index * 4,
        };

        Ok(self.base + section.offset + relative)
    }

    /// Read one parameter
    pub(crate) fn read(&mut self, section: &SectionLayout, index: usize) -> Result<i32, StoreError> {
        let address = self.address(section, index)?;
        let width = section.descriptor.width;

        let mut buf = [0u8; 4];
        self.medium.read(address, &mut buf[..slot_len(width)])?;

        let value = match width {
            ParamWidth::Bit => i32::from((buf[0] >> (index % 8)) & 0x01),
            ParamWidth::HalfByte => i32::from((buf[0] >> ((index % 2) * 4)) & 0x0F),
            ParamWidth::Byte => i32::from(buf[0]),
            ParamWidth::Word => i32::from(u16::from_le_bytes([buf[0], buf[1]])),
            ParamWidth::DWord => i32::from_le_bytes(buf),
        };

        Ok(value)
    }

    /// Write one parameter if it differs from the stored value
    pub(crate) fn update(
        &mut self,
        section: &SectionLayout,
        index: usize,
        value: i32,
    ) -> Result<(), StoreError> {
        let address = self.address(section, index)?;
        let width = section.descriptor.width;

        if !width.fits(value) {
            return Err(StoreError::ValueOutOfRange);
        }

        let len = slot_len(width);
        let mut current = [0u8; 4];
        self.medium.read(address, &mut current[..len])?;

        let mut next = current;
        match width {
            ParamWidth::Bit => {
                let mask = 1u8 << (index % 8);
                if value != 0 {
                    next[0] |= mask;
                } else {
                    next[0] &= !mask;
                }
            }
            ParamWidth::HalfByte => {
                let shift = (index % 2) * 4;
                next[0] = (next[0] & !(0x0Fu8 << shift)) | ((value as u8) << shift);
            }
            ParamWidth::Byte => next[0] = value as u8,
            ParamWidth::Word => next[..2].copy_from_slice(&(value as u16).to_le_bytes()),
            ParamWidth::DWord => next = value.to_le_bytes(),
        }

        if next[..len] != current[..len] {
            self.medium.write(address, &next[..len])?;
        }

        Ok(())
    }

    /// Write section defaults for a whole block
    pub(crate) fn write_defaults(
        &mut self,
        block: &BlockLayout,
        kind: ResetKind,
    ) -> Result<(), StoreError> {
        for section in block.sections() {
            if kind == ResetKind::Partial && section.descriptor.preserve_on_partial_reset {
                continue;
            }

            for index in 0..section.descriptor.count {
                self.update(section, index, section.descriptor.default.value_for(index))?;
            }
        }

        Ok(())
    }
}
