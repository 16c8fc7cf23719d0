//! Custom requests
//!
//! Device-level queries and commands outside the block address space.
//! Reboot-type requests only latch a [`SystemAction`]; the firmware performs
//! it after the response has left the device.

use super::handler::{SysConfig, SystemAction};
use super::peripherals::Peripherals;
use crate::database::{AnalogDb, ButtonDb, EncoderDb, LedDb, ResetKind, StorageMedium};
use crate::protocol::{ConfigError, ConfigResult, CustomResponse};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Custom request identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum CustomRequest {
    HardwareUid = 0x42,
    FirmwareVersionAndHardwareUid = 0x43,
    FactoryReset = 0x44,
    ComponentCounts = 0x4D,
    SupportedPresets = 0x50,
    Bootloader = 0x55,
    FirmwareVersion = 0x56,
    DisableProcessing = 0x64,
    EnableProcessing = 0x65,
    Reboot = 0x7F,
}

/// Split a 28-bit UID into four 7-bit values, most significant first
fn uid_groups(uid: u32) -> [u16; 4] {
    [21, 14, 7, 0].map(|shift| ((uid >> shift) & 0x7F) as u16)
}

fn push_all(response: &mut CustomResponse, values: &[u16]) -> ConfigResult<()> {
    response
        .extend_from_slice(values)
        .map_err(|_| ConfigError::Error)
}

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    pub(super) fn handle_custom_request(&mut self, request: u16) -> ConfigResult<CustomResponse> {
        let request = CustomRequest::try_from(request).map_err(|_| ConfigError::NotSupported)?;
        let mut response = CustomResponse::new();

        let firmware = self.info.firmware;
        let version = [
            u16::from(firmware.major),
            u16::from(firmware.minor),
            u16::from(firmware.revision),
        ];
        let uid = uid_groups(self.info.hardware_uid);

        match request {
            CustomRequest::FirmwareVersion => push_all(&mut response, &version)?,
            CustomRequest::HardwareUid => push_all(&mut response, &uid)?,
            CustomRequest::FirmwareVersionAndHardwareUid => {
                push_all(&mut response, &version)?;
                push_all(&mut response, &uid)?;
            }
            CustomRequest::ComponentCounts => {
                let counts = [
                    self.store.parameter_count(ButtonDb::Type)?,
                    self.store.parameter_count(EncoderDb::Enable)?,
                    self.store.parameter_count(AnalogDb::Enable)?,
                    self.store.parameter_count(LedDb::ActivationId)?,
                ];
                for count in counts {
                    let count = u16::try_from(count).map_err(|_| ConfigError::Error)?;
                    push_all(&mut response, &[count])?;
                }
            }
            CustomRequest::SupportedPresets => {
                push_all(&mut response, &[u16::from(self.store.supported_presets())])?
            }
            CustomRequest::FactoryReset => {
                self.store.factory_reset(ResetKind::Partial)?;
                self.pending_action = Some(SystemAction::Reboot);
            }
            CustomRequest::Reboot => self.pending_action = Some(SystemAction::Reboot),
            CustomRequest::Bootloader => self.pending_action = Some(SystemAction::Bootloader),
            CustomRequest::DisableProcessing => self.processing_enabled = false,
            CustomRequest::EnableProcessing => self.processing_enabled = true,
        }

        Ok(response)
    }
}
