//! Protocol to storage address translation
//!
//! Static per-block tables. Several protocol sections alias one storage
//! section (both halves of a 14-bit value); `None` marks protocol sections
//! that have no storage counterpart.

use crate::database::{AnalogDb, ButtonDb, DbSection, DisplayDb, EncoderDb, GlobalDb, LedDb};
use crate::protocol::{
    AnalogSection, Block, ButtonSection, ConfigError, ConfigResult, DisplaySection,
    EncoderSection, GlobalSection, LedSection,
};

pub fn global(section: GlobalSection) -> Option<GlobalDb> {
    match section {
        GlobalSection::MidiFeature => Some(GlobalDb::MidiFeatures),
        GlobalSection::MidiMerge => Some(GlobalDb::MidiMerge),
        // synthesized from the store's preset accessors
        GlobalSection::Presets => None,
    }
}

pub fn buttons(section: ButtonSection) -> ButtonDb {
    match section {
        ButtonSection::Type => ButtonDb::Type,
        ButtonSection::MidiMessage => ButtonDb::MidiMessage,
        ButtonSection::MidiId => ButtonDb::MidiId,
        ButtonSection::Velocity => ButtonDb::Velocity,
        ButtonSection::MidiChannel => ButtonDb::MidiChannel,
    }
}

pub fn encoders(section: EncoderSection) -> EncoderDb {
    match section {
        EncoderSection::Enable => EncoderDb::Enable,
        EncoderSection::Invert => EncoderDb::Invert,
        EncoderSection::Mode => EncoderDb::Mode,
        EncoderSection::MidiId | EncoderSection::MidiIdMsb => EncoderDb::MidiId,
        EncoderSection::MidiChannel => EncoderDb::MidiChannel,
        EncoderSection::PulsesPerStep => EncoderDb::PulsesPerStep,
        EncoderSection::Acceleration => EncoderDb::Acceleration,
        EncoderSection::RemoteSync => EncoderDb::RemoteSync,
    }
}

pub fn analog(section: AnalogSection) -> AnalogDb {
    match section {
        AnalogSection::Enable => AnalogDb::Enable,
        AnalogSection::Invert => AnalogDb::Invert,
        AnalogSection::Type => AnalogDb::Type,
        AnalogSection::MidiId | AnalogSection::MidiIdMsb => AnalogDb::MidiId,
        AnalogSection::LowerLimit | AnalogSection::LowerLimitMsb => AnalogDb::LowerLimit,
        AnalogSection::UpperLimit | AnalogSection::UpperLimitMsb => AnalogDb::UpperLimit,
        AnalogSection::MidiChannel => AnalogDb::MidiChannel,
    }
}

pub fn leds(section: LedSection) -> Option<LedDb> {
    match section {
        // live state of the LED driver
        LedSection::TestColor | LedSection::TestBlink => None,
        LedSection::Global => Some(LedDb::Global),
        LedSection::ActivationId => Some(LedDb::ActivationId),
        LedSection::RgbEnable => Some(LedDb::RgbEnable),
        LedSection::ControlType => Some(LedDb::ControlType),
        LedSection::ActivationValue => Some(LedDb::ActivationValue),
        LedSection::MidiChannel => Some(LedDb::MidiChannel),
    }
}

pub fn display(section: DisplaySection) -> DisplayDb {
    match section {
        DisplaySection::Features => DisplayDb::Features,
        DisplaySection::Setting => DisplayDb::Setting,
    }
}

/// Decode a raw section byte of `block`
pub(crate) fn decode<S: TryFrom<u8>>(section: u8) -> ConfigResult<S> {
    S::try_from(section).map_err(|_| ConfigError::NotSupported)
}

/// Resolve a raw protocol section to its storage section
///
/// Fails only for section bytes the block does not define.
pub fn resolve(block: Block, section: u8) -> ConfigResult<Option<DbSection>> {
    let resolved = match block {
        Block::Global => global(decode(section)?).map(DbSection::from),
        Block::Buttons => Some(buttons(decode(section)?).into()),
        Block::Encoders => Some(encoders(decode(section)?).into()),
        Block::Analog => Some(analog(decode(section)?).into()),
        Block::Leds => leds(decode(section)?).map(DbSection::from),
        Block::Display => Some(display(decode(section)?).into()),
    };

    Ok(resolved)
}
