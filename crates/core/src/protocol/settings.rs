//! Index-level enumerations
//!
//! Some sections are not per-component arrays but small settings tables where
//! the protocol index selects a named setting. Value enumerations used for
//! validation live here as well.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Indexes of `global/presets`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PresetSetting {
    ActivePreset,
    PresetPreserve,
}

impl PresetSetting {
    pub const COUNT: usize = 2;
}

/// Indexes of `global/midiFeature`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MidiFeature {
    StandardNoteOff,
    RunningStatus,
    MergeEnabled,
    DinEnabled,
}

impl MidiFeature {
    pub const COUNT: usize = 4;
}

/// Indexes of `global/midiMerge`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MidiMergeSetting {
    MergeType,
    /// Reserved, accepted but never stored
    MergeUsbChannel,
    /// Reserved, accepted but never stored
    MergeDinChannel,
}

impl MidiMergeSetting {
    pub const COUNT: usize = 3;
}

/// MIDI merge topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum MergeType {
    DinToUsb,
    DinToDin,
    /// This device is the master of a daisy chain
    OdMaster,
    /// This device is a slave in a daisy chain
    OdSlave,
    /// Slave that has not yet completed the chain handshake
    OdSlaveInitial,
}

impl MergeType {
    /// Slave mode is always (re)entered through its initial variant.
    pub fn activation_variant(self) -> Self {
        match self {
            MergeType::OdSlave => MergeType::OdSlaveInitial,
            other => other,
        }
    }
}

/// Indexes of `leds/global`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum LedSetting {
    BlinkWithMidiClock,
    UseStartupAnimation,
    FadeSpeed,
}

impl LedSetting {
    pub const COUNT: usize = 3;
}

/// Source of the LED blink clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum BlinkType {
    Timer,
    MidiClock,
}

/// Blink rate applied by the test-blink section
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum BlinkSpeed {
    NoBlink,
    S100ms,
    S200ms,
    S300ms,
    S400ms,
    S500ms,
    S600ms,
    S700ms,
    S800ms,
    S900ms,
    S1000ms,
}

/// LED color
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum LedColor {
    Off,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Physical component of an RGB LED group
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum RgbComponent {
    R,
    G,
    B,
}

impl RgbComponent {
    pub const ALL: [RgbComponent; 3] = [RgbComponent::R, RgbComponent::G, RgbComponent::B];
}

/// Indexes of `display/features`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DisplayFeature {
    Enable,
    WelcomeMsg,
    VInfoMsg,
    MidiEventRetention,
    MidiNotesAlternate,
}

impl DisplayFeature {
    pub const COUNT: usize = 5;
}

/// Indexes of `display/setting`
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DisplaySetting {
    Controller,
    Resolution,
    /// Retention time of displayed MIDI events, in seconds
    MidiEventTime,
    OctaveNormalization,
}

impl DisplaySetting {
    pub const COUNT: usize = 4;
}

/// Supported display controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DisplayController {
    Invalid,
    Ssd1306,
}

/// Supported display resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DisplayResolution {
    Invalid,
    R128x64,
    R128x32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slave_activation_variant() {
        assert_eq!(
            MergeType::OdSlave.activation_variant(),
            MergeType::OdSlaveInitial
        );
        assert_eq!(MergeType::OdMaster.activation_variant(), MergeType::OdMaster);
        assert_eq!(MergeType::DinToUsb.activation_variant(), MergeType::DinToUsb);
    }

    #[test]
    fn test_enumeration_bounds() {
        assert!(MergeType::try_from(4u8).is_ok());
        assert!(MergeType::try_from(5u8).is_err());
        assert!(LedColor::try_from(7u8).is_ok());
        assert!(LedColor::try_from(8u8).is_err());
        assert!(DisplayController::try_from(2u8).is_err());
        assert!(DisplayResolution::try_from(2u8).is_ok());
        assert!(DisplayResolution::try_from(3u8).is_err());
    }
}
