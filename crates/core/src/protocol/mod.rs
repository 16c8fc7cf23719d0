//! Remote configuration protocol types
//!
//! Addresses on the wire are a `(block, section, index)` triple. Blocks and
//! sections arrive as raw bytes from the SysEx codec; the enums in this module
//! are the only way they enter the rest of the crate, so an out-of-range byte
//! is rejected at the conversion instead of being cast blindly.

pub mod handler;
pub mod sections;
pub mod settings;
pub mod status;
pub mod value14;

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use handler::{CustomResponse, DataHandler};
pub use sections::{
    AnalogSection, ButtonSection, DisplaySection, EncoderSection, GlobalSection, LedSection,
};
pub use settings::{
    BlinkSpeed, BlinkType, DisplayController, DisplayFeature, DisplayResolution, DisplaySetting,
    LedColor, LedSetting, MergeType, MidiFeature, MidiMergeSetting, PresetSetting, RgbComponent,
};
pub use status::{ConfigError, ConfigResult, Status};
pub use value14::Value14;

/// Top-level protocol block
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Block {
    Global,
    Buttons,
    Encoders,
    Analog,
    Leds,
    Display,
}

impl Block {
    /// Number of protocol blocks
    pub const COUNT: usize = 6;
}

/// Fully decoded protocol address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolAddress {
    pub block: Block,
    pub section: u8,
    pub index: usize,
}

impl ProtocolAddress {
    /// Decode the block byte of a raw address
    ///
    /// The section stays raw here because its meaning depends on the block.
    pub fn decode(block: u8, section: u8, index: usize) -> ConfigResult<Self> {
        let block = Block::try_from(block).map_err(|_| ConfigError::NotSupported)?;
        Ok(Self {
            block,
            section,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_decode() {
        assert_eq!(Block::try_from(0u8), Ok(Block::Global));
        assert_eq!(Block::try_from(5u8), Ok(Block::Display));
        assert!(Block::try_from(6u8).is_err());
        assert_eq!(u8::from(Block::Leds), 4);
    }

    #[test]
    fn test_address_decode_rejects_unknown_block() {
        let address = ProtocolAddress::decode(1, 3, 7).unwrap();
        assert_eq!(address.block, Block::Buttons);
        assert_eq!(address.section, 3);
        assert_eq!(address.index, 7);

        assert_eq!(
            ProtocolAddress::decode(0x7F, 0, 0),
            Err(ConfigError::NotSupported)
        );
    }
}
