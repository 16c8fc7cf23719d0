//! Configuration handler
//!
//! [`SysConfig`] answers the SysEx codec's get/set/custom callbacks. Each
//! request is dispatched by block, then by section, to the per-block logic in
//! the sibling modules. Those validate the value, apply side effects to the
//! runtime modules and persist through the parameter store.

use super::peripherals::{
    Capabilities, DisplayControl, EventDirection, LedControl, NoteOffMode, Peripherals,
};
use super::translate::decode;
use crate::database::{DbSection, GlobalDb, LedDb, ParameterStore, StorageMedium};
use crate::limits;
use crate::protocol::{
    Block, BlinkType, ConfigError, ConfigResult, CustomResponse, DataHandler, LedSetting,
    MergeType, MidiFeature, MidiMergeSetting, ProtocolAddress, Value14,
};

/// Firmware release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

/// Identity reported by custom requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub firmware: FirmwareVersion,
    /// Board identifier; the lower 28 bits are reported
    pub hardware_uid: u32,
}

/// Action the firmware performs once the current response is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    Reboot,
    Bootloader,
}

/// Configuration handler
pub struct SysConfig<M: StorageMedium, P: Peripherals> {
    pub(super) store: ParameterStore<M>,
    pub(super) peripherals: P,
    pub(super) capabilities: Capabilities,
    pub(super) info: DeviceInfo,
    pub(super) processing_enabled: bool,
    pub(super) pending_action: Option<SystemAction>,
}

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    /// Create a handler over an initialized store
    pub fn new(
        store: ParameterStore<M>,
        peripherals: P,
        capabilities: Capabilities,
        info: DeviceInfo,
    ) -> Self {
        Self {
            store,
            peripherals,
            capabilities,
            info,
            processing_enabled: true,
            pending_action: None,
        }
    }

    /// Apply persisted MIDI and LED settings to the runtime modules
    pub fn init(&mut self) -> ConfigResult<()> {
        let mode = if self.is_midi_feature_enabled(MidiFeature::StandardNoteOff)? {
            NoteOffMode::Standard
        } else {
            NoteOffMode::NoteOnZeroVelocity
        };
        self.peripherals.midi().set_note_off_mode(mode);

        if self.capabilities.contains(Capabilities::DIN_MIDI) {
            let running_status = self.is_midi_feature_enabled(MidiFeature::RunningStatus)?;
            self.peripherals.midi().set_running_status(running_status);

            if self.is_midi_feature_enabled(MidiFeature::DinEnabled)? {
                self.peripherals.midi().setup_uart();

                if self.is_midi_feature_enabled(MidiFeature::MergeEnabled)? {
                    let merge = self.midi_merge_type()?.activation_variant();
                    let midi = self.peripherals.midi();
                    midi.use_recursive_parsing(true);
                    midi.configure_merge(merge);
                }
            }
        }

        if self.capabilities.contains(Capabilities::LEDS) {
            let blink = self
                .store
                .read(LedDb::Global, LedSetting::BlinkWithMidiClock as usize)?;
            let fade = self
                .store
                .read(LedDb::Global, LedSetting::FadeSpeed as usize)?
                .clamp(limits::FADE_SPEED_MIN, limits::FADE_SPEED_MAX) as u8;
            let fading = self.capabilities.contains(Capabilities::LED_FADING);

            if let Some(leds) = self.peripherals.leds() {
                leds.set_blink_type(if blink == 1 {
                    BlinkType::MidiClock
                } else {
                    BlinkType::Timer
                });

                if fading {
                    leds.set_fade_time(fade);
                }
            }
        }

        Ok(())
    }

    /// Whether a persisted MIDI feature is on
    pub fn is_midi_feature_enabled(&mut self, feature: MidiFeature) -> ConfigResult<bool> {
        Ok(self.store.read(GlobalDb::MidiFeatures, feature as usize)? == 1)
    }

    /// Persisted merge topology
    pub fn midi_merge_type(&mut self) -> ConfigResult<MergeType> {
        let stored = self
            .store
            .read(GlobalDb::MidiMerge, MidiMergeSetting::MergeType as usize)?;
        u8::try_from(stored)
            .ok()
            .and_then(|raw| MergeType::try_from(raw).ok())
            .ok_or(ConfigError::Error)
    }

    /// Whether component processing is enabled
    ///
    /// Cleared by the `DisableProcessing` custom request so that a host can
    /// bulk-configure without the device reacting to its own inputs.
    pub fn is_processing_enabled(&self) -> bool {
        self.processing_enabled
    }

    /// Take the action latched by the last reboot-type request
    pub fn take_pending_action(&mut self) -> Option<SystemAction> {
        self.pending_action.take()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn store(&self) -> &ParameterStore<M> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParameterStore<M> {
        &mut self.store
    }

    pub fn peripherals(&self) -> &P {
        &self.peripherals
    }

    pub fn peripherals_mut(&mut self) -> &mut P {
        &mut self.peripherals
    }

    /// Tear down the handler, returning the store
    pub fn into_store(self) -> ParameterStore<M> {
        self.store
    }

    pub(super) fn require(&self, capability: Capabilities) -> ConfigResult<()> {
        if self.capabilities.contains(capability) {
            Ok(())
        } else {
            Err(ConfigError::NotSupported)
        }
    }

    pub(super) fn led_control(&mut self) -> ConfigResult<&mut dyn LedControl> {
        self.require(Capabilities::LEDS)?;
        self.peripherals.leds().ok_or(ConfigError::NotSupported)
    }

    pub(super) fn display_control(&mut self) -> ConfigResult<&mut dyn DisplayControl> {
        self.require(Capabilities::DISPLAY)?;
        self.peripherals.display().ok_or(ConfigError::NotSupported)
    }

    /// Read one 7-bit half of a 14-bit stored value
    pub(super) fn read_half(&mut self, section: DbSection, index: usize, high: bool) -> ConfigResult<i32> {
        let stored = self.store.read(section, index)?;
        Ok(i32::from(Value14::split(stored as u16).half(high)))
    }

    /// Replace one 7-bit half of a 14-bit stored value, keeping the other
    pub(super) fn write_half(
        &mut self,
        section: DbSection,
        index: usize,
        high: bool,
        value: i32,
    ) -> ConfigResult<()> {
        let half = half_value(value)?;
        let stored = self.store.read(section, index)?;
        let merged = Value14::split(stored as u16).with_half(high, half).merge();
        self.store.update(section, index, i32::from(merged))?;
        Ok(())
    }

    fn notify_display(&mut self) {
        if !self.capabilities.contains(Capabilities::DISPLAY) {
            return;
        }

        if let Some(display) = self.peripherals.display() {
            display.notify_sysex(EventDirection::In);
        }
    }

    fn get_value(&mut self, block: u8, section: u8, index: usize) -> ConfigResult<i32> {
        let address = ProtocolAddress::decode(block, section, index)?;

        match address.block {
            Block::Global => self.get_global(decode(section)?, index),
            Block::Buttons => self.get_button(decode(section)?, index),
            Block::Encoders => self.get_encoder(decode(section)?, index),
            Block::Analog => self.get_analog(decode(section)?, index),
            Block::Leds => self.get_led(decode(section)?, index),
            Block::Display => self.get_display(decode(section)?, index),
        }
    }

    fn set_value(&mut self, block: u8, section: u8, index: usize, value: i32) -> ConfigResult<()> {
        let address = ProtocolAddress::decode(block, section, index)?;

        match address.block {
            Block::Global => self.set_global(decode(section)?, index, value),
            Block::Buttons => self.set_button(decode(section)?, index, value),
            Block::Encoders => self.set_encoder(decode(section)?, index, value),
            Block::Analog => self.set_analog(decode(section)?, index, value),
            Block::Leds => self.set_led(decode(section)?, index, value),
            Block::Display => self.set_display(decode(section)?, index, value),
        }
    }
}

impl<M: StorageMedium, P: Peripherals> DataHandler for SysConfig<M, P> {
    fn get(&mut self, block: u8, section: u8, index: usize) -> ConfigResult<i32> {
        let result = self.get_value(block, section, index);
        self.notify_display();
        result
    }

    fn set(&mut self, block: u8, section: u8, index: usize, value: i32) -> ConfigResult<()> {
        let result = self.set_value(block, section, index, value);
        self.notify_display();
        result
    }

    fn custom_request(&mut self, request: u16) -> ConfigResult<CustomResponse> {
        self.handle_custom_request(request)
    }

    fn send_response(&mut self, bytes: &[u8]) {
        self.peripherals.midi().send_sysex(bytes);
    }
}

/// Decode a boolean protocol value
pub(super) fn flag(value: i32) -> ConfigResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ConfigError::NotSupported),
    }
}

/// Decode a settings-table index
pub(super) fn setting<S: TryFrom<u8>>(index: usize) -> ConfigResult<S> {
    u8::try_from(index)
        .ok()
        .and_then(|raw| S::try_from(raw).ok())
        .ok_or(ConfigError::NotSupported)
}

/// Validate a 7-bit protocol half
pub(super) fn half_value(value: i32) -> ConfigResult<u8> {
    if (0..=limits::HALF_VALUE_MAX).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ConfigError::NotSupported)
    }
}

/// Convert a 1-based protocol channel to its 0-based stored form
pub(super) fn channel_to_stored(value: i32) -> ConfigResult<i32> {
    if (limits::MIDI_CHANNEL_MIN..=limits::MIDI_CHANNEL_MAX).contains(&value) {
        Ok(value - 1)
    } else {
        Err(ConfigError::NotSupported)
    }
}

/// Convert a 0-based stored channel to its 1-based protocol form
pub(super) fn channel_from_stored(value: i32) -> i32 {
    value + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_conversion() {
        assert_eq!(channel_to_stored(1), Ok(0));
        assert_eq!(channel_to_stored(17), Ok(16));
        assert_eq!(channel_to_stored(0), Err(ConfigError::NotSupported));
        assert_eq!(channel_to_stored(18), Err(ConfigError::NotSupported));
        assert_eq!(channel_from_stored(0), 1);
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(0), Ok(false));
        assert_eq!(flag(1), Ok(true));
        assert_eq!(flag(2), Err(ConfigError::NotSupported));
        assert_eq!(flag(-1), Err(ConfigError::NotSupported));
    }

    #[test]
    fn test_setting_index() {
        assert_eq!(setting::<MidiFeature>(3), Ok(MidiFeature::DinEnabled));
        assert_eq!(setting::<MidiFeature>(4), Err(ConfigError::NotSupported));
        assert_eq!(setting::<MidiFeature>(256), Err(ConfigError::NotSupported));
    }

    #[test]
    fn test_half_value() {
        assert_eq!(half_value(127), Ok(127));
        assert_eq!(half_value(128), Err(ConfigError::NotSupported));
    }
}
