//! Protocol gateway
//!
//! The SysEx codec is driven from the MIDI receive task while other contexts
//! (preset buttons, the display task) also touch the configuration handler.
//! [`SharedConfig`] is the [`DataHandler`] the codec is given: every callback
//! runs under the shared-state lock, so a request and the system-region access
//! it makes are atomic with respect to everything else holding the lock.

use crate::core::traits::SharedState;
use core::marker::PhantomData;
use deckconf_core::config::{CustomRequest, Peripherals, SysConfig, SystemAction};
use deckconf_core::database::StorageMedium;
use deckconf_core::protocol::{ConfigResult, CustomResponse, DataHandler};
#[cfg(any(feature = "defmt", test))]
use deckconf_core::protocol::Status;

/// Lock-routing handle to a shared configuration handler
pub struct SharedConfig<'a, S, H> {
    state: &'a S,
    _handler: PhantomData<H>,
}

impl<'a, S, H> SharedConfig<'a, S, H>
where
    S: SharedState<H>,
    H: DataHandler,
{
    pub fn new(state: &'a S) -> Self {
        Self {
            state,
            _handler: PhantomData,
        }
    }

    /// Run `f` on the handler under the lock
    pub fn with_handler<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        self.state.with_mut(f)
    }
}

impl<S, M, P> SharedConfig<'_, S, SysConfig<M, P>>
where
    S: SharedState<SysConfig<M, P>>,
    M: StorageMedium,
    P: Peripherals,
{
    /// Whether component processing is enabled
    pub fn is_processing_enabled(&self) -> bool {
        self.state.with(|config| config.is_processing_enabled())
    }

    /// Take the action latched by a reboot-type request
    ///
    /// Call once the response frame has been transmitted.
    pub fn take_pending_action(&self) -> Option<SystemAction> {
        let action = self.state.with_mut(|config| config.take_pending_action());
        match action {
            Some(SystemAction::Reboot) => crate::log_info!("Reboot requested over SysEx"),
            Some(SystemAction::Bootloader) => {
                crate::log_info!("Bootloader entry requested over SysEx")
            }
            None => {}
        }
        action
    }

    /// Active preset
    pub fn preset(&self) -> u8 {
        self.state.with(|config| config.store().preset())
    }
}

impl<S, H> DataHandler for SharedConfig<'_, S, H>
where
    S: SharedState<H>,
    H: DataHandler,
{
    fn get(&mut self, block: u8, section: u8, index: usize) -> ConfigResult<i32> {
        let result = self.state.with_mut(|handler| handler.get(block, section, index));
        if result.is_err() {
            crate::log_debug!(
                "get {}/{}/{} failed with status {}",
                block,
                section,
                index,
                Status::from(&result).code()
            );
        }
        result
    }

    fn set(&mut self, block: u8, section: u8, index: usize, value: i32) -> ConfigResult<()> {
        let result = self
            .state
            .with_mut(|handler| handler.set(block, section, index, value));
        if result.is_err() {
            crate::log_debug!(
                "set {}/{}/{} = {} failed with status {}",
                block,
                section,
                index,
                value,
                Status::from(&result).code()
            );
        }
        result
    }

    fn custom_request(&mut self, request: u16) -> ConfigResult<CustomResponse> {
        let result = self
            .state
            .with_mut(|handler| handler.custom_request(request));

        match (&result, CustomRequest::try_from(request)) {
            (Ok(_), Ok(CustomRequest::FactoryReset)) => {
                crate::log_warn!("Factory reset performed over SysEx")
            }
            (Ok(_), Ok(CustomRequest::DisableProcessing)) => {
                crate::log_info!("Component processing disabled")
            }
            (Ok(_), Ok(CustomRequest::EnableProcessing)) => {
                crate::log_info!("Component processing enabled")
            }
            (Err(_), _) => crate::log_debug!(
                "custom request {} failed with status {}",
                request,
                Status::from(&result).code()
            ),
            _ => {}
        }

        result
    }

    fn send_response(&mut self, bytes: &[u8]) {
        self.state.with_mut(|handler| handler.send_response(bytes));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::{init_config_for, BoardConfigHandler};
    use crate::core::traits::MockState;
    use crate::platform::mock::{MockEeprom, MockPeripherals};
    use deckconf_core::config::{Capabilities, DeviceInfo, FirmwareVersion};
    use deckconf_core::database::{BoardConfig, ButtonDb};
    use deckconf_core::protocol::{Block, ConfigError};

    type Handler = BoardConfigHandler<MockEeprom<512>, MockPeripherals>;

    const BOARD: BoardConfig = BoardConfig {
        buttons: 4,
        encoders: 2,
        analog: 2,
        leds: 6,
    };

    fn handler(capabilities: Capabilities) -> Handler {
        let info = DeviceInfo {
            firmware: FirmwareVersion {
                major: 2,
                minor: 3,
                revision: 4,
            },
            hardware_uid: 0x1234,
        };
        init_config_for(
            &BOARD,
            512,
            capabilities,
            MockEeprom::new(),
            MockPeripherals::new(),
            info,
        )
        .unwrap()
    }

    #[test]
    fn test_requests_reach_handler() {
        let state = MockState::new(handler(Capabilities::all()));
        let mut gateway = SharedConfig::new(&state);

        // buttons/midiID
        assert_eq!(gateway.set(Block::Buttons as u8, 2, 1, 60), Ok(()));
        assert_eq!(gateway.get(Block::Buttons as u8, 2, 1), Ok(60));

        let stored = gateway.with_handler(|config| config.store_mut().read(ButtonDb::MidiId, 1));
        assert_eq!(stored, Ok(60));
    }

    #[test]
    fn test_rejected_request_reports_status() {
        let state = MockState::new(handler(Capabilities::empty()));
        let mut gateway = SharedConfig::new(&state);

        assert_eq!(
            gateway.get(Block::Leds as u8, 0, 0),
            Err(ConfigError::NotSupported)
        );
        assert_eq!(gateway.get(42, 0, 0), Err(ConfigError::NotSupported));
    }

    #[test]
    fn test_processing_toggle_and_firmware_version() {
        let state = MockState::new(handler(Capabilities::all()));
        let mut gateway = SharedConfig::new(&state);

        assert!(gateway.is_processing_enabled());
        gateway
            .custom_request(CustomRequest::DisableProcessing.into())
            .unwrap();
        assert!(!gateway.is_processing_enabled());
        gateway
            .custom_request(CustomRequest::EnableProcessing.into())
            .unwrap();
        assert!(gateway.is_processing_enabled());

        let version = gateway
            .custom_request(CustomRequest::FirmwareVersion.into())
            .unwrap();
        assert_eq!(version.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn test_reboot_is_deferred_until_taken() {
        let state = MockState::new(handler(Capabilities::all()));
        let mut gateway = SharedConfig::new(&state);

        assert_eq!(gateway.take_pending_action(), None);
        gateway.custom_request(CustomRequest::Reboot.into()).unwrap();
        assert_eq!(gateway.take_pending_action(), Some(SystemAction::Reboot));
        assert_eq!(gateway.take_pending_action(), None);
    }

    #[test]
    fn test_unknown_custom_request_changes_nothing() {
        let state = MockState::new(handler(Capabilities::all()));
        let mut gateway = SharedConfig::new(&state);

        assert_eq!(
            gateway.custom_request(0x01).map(|response| response.len()),
            Err(ConfigError::NotSupported)
        );
        assert_eq!(gateway.take_pending_action(), None);
        assert!(gateway.is_processing_enabled());
    }

    #[test]
    fn test_response_goes_out_over_midi() {
        let state = MockState::new(handler(Capabilities::all()));
        let mut gateway = SharedConfig::new(&state);

        gateway.send_response(&[0xF0, 0x00, 0x53, 0x43, 0xF7]);

        let config = state.into_inner();
        let midi = &config.peripherals().midi;
        assert_eq!(midi.frames_sent, 1);
        assert_eq!(midi.last_frame.as_slice(), &[0xF0, 0x00, 0x53, 0x43, 0xF7]);
    }

    #[test]
    fn test_preset_read_through_lock() {
        let state = MockState::new(handler(Capabilities::all()));
        let gateway = SharedConfig::new(&state);
        assert_eq!(gateway.preset(), 0);
    }
}
