//! Section enumerations, one per protocol block
//!
//! Discriminants are wire values and must not be reordered.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Sections of the global block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GlobalSection {
    MidiFeature,
    MidiMerge,
    Presets,
}

/// Sections of the button block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ButtonSection {
    Type,
    MidiMessage,
    MidiId,
    Velocity,
    MidiChannel,
}

/// Sections of the encoder block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum EncoderSection {
    Enable,
    Invert,
    Mode,
    MidiId,
    MidiChannel,
    PulsesPerStep,
    Acceleration,
    /// Upper 7 bits of `MidiId`
    MidiIdMsb,
    RemoteSync,
}

/// Sections of the analog block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum AnalogSection {
    Enable,
    Invert,
    Type,
    MidiId,
    MidiIdMsb,
    LowerLimit,
    LowerLimitMsb,
    UpperLimit,
    UpperLimitMsb,
    MidiChannel,
}

impl AnalogSection {
    /// Whether this section addresses the upper half of a 14-bit value
    pub fn is_msb(self) -> bool {
        matches!(
            self,
            AnalogSection::MidiIdMsb | AnalogSection::LowerLimitMsb | AnalogSection::UpperLimitMsb
        )
    }

    /// Whether this section is one half of a 14-bit value
    pub fn is_14bit(self) -> bool {
        matches!(
            self,
            AnalogSection::MidiId
                | AnalogSection::MidiIdMsb
                | AnalogSection::LowerLimit
                | AnalogSection::LowerLimitMsb
                | AnalogSection::UpperLimit
                | AnalogSection::UpperLimitMsb
        )
    }
}

/// Sections of the LED block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum LedSection {
    /// Live color, not persisted
    TestColor,
    /// Live blink state, not persisted
    TestBlink,
    Global,
    ActivationId,
    RgbEnable,
    ControlType,
    ActivationValue,
    MidiChannel,
}

/// Sections of the display block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DisplaySection {
    Features,
    Setting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_wire_values() {
        assert_eq!(u8::from(EncoderSection::MidiIdMsb), 7);
        assert_eq!(u8::from(AnalogSection::MidiChannel), 9);
        assert_eq!(u8::from(LedSection::MidiChannel), 7);
        assert!(GlobalSection::try_from(3u8).is_err());
        assert!(DisplaySection::try_from(2u8).is_err());
    }

    #[test]
    fn test_analog_halves() {
        assert!(AnalogSection::UpperLimitMsb.is_msb());
        assert!(!AnalogSection::UpperLimit.is_msb());
        assert!(AnalogSection::LowerLimit.is_14bit());
        assert!(!AnalogSection::Type.is_14bit());
        assert!(!AnalogSection::MidiChannel.is_14bit());
    }
}
