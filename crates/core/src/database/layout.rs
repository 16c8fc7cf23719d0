//! Layout descriptor
//!
//! The layout is the static schema of everything the store persists: an
//! ordered list of blocks, each an ordered list of sections, each a number of
//! parameters of one width. It fixes the byte offset of every parameter, the
//! size of one preset, and the schema signature.
//!
//! # Storage map
//!
//! ```text
//! [System region]   offset 0                      uid, active preset, preserve flag
//! [Preset 0]        system_usage                  global .. display blocks
//! [Preset 1]        system_usage + preset_usage
//! ...
//! [Preset N-1]      system_usage + (N-1) * preset_usage
//! ```

use super::error::StoreError;
use crate::limits;
use crate::protocol::{
    DisplayFeature, DisplaySetting, LedSetting, MidiFeature, MidiMergeSetting, PresetSetting,
};
use heapless::Vec;

/// Maximum number of sections in one block
pub const MAX_SECTIONS: usize = 8;

/// Maximum number of custom default overrides
pub const MAX_OVERRIDES: usize = 4;

/// Component counts of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub buttons: usize,
    pub encoders: usize,
    pub analog: usize,
    pub leds: usize,
}

impl BoardConfig {
    /// Number of RGB groups (three LEDs each)
    pub const fn rgb_groups(&self) -> usize {
        self.leds / 3
    }
}

/// Storage width of a parameter
///
/// The discriminant is the width code that enters the schema signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ParamWidth {
    Bit = 0,
    HalfByte = 1,
    Byte = 2,
    Word = 3,
    DWord = 4,
}

impl ParamWidth {
    /// Width code used by the signature
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Bytes needed to store `count` parameters of this width
    pub const fn storage_bytes(self, count: usize) -> usize {
        match self {
            ParamWidth::Bit => count.div_ceil(8),
            ParamWidth::HalfByte => count.div_ceil(2),
            ParamWidth::Byte => count,
            ParamWidth::Word => count * 2,
            ParamWidth::DWord => count * 4,
        }
    }

    /// Whether `value` can be stored without loss
    pub fn fits(self, value: i32) -> bool {
        match self {
            ParamWidth::Bit => (0..=1).contains(&value),
            ParamWidth::HalfByte => (0..=0x0F).contains(&value),
            ParamWidth::Byte => (0..=0xFF).contains(&value),
            ParamWidth::Word => (0..=0xFFFF).contains(&value),
            ParamWidth::DWord => true,
        }
    }
}

/// Factory default of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Same value for every parameter
    Fixed(i32),
    /// Parameter index, wrapping at 128 (MIDI numbering)
    Index,
}

impl DefaultValue {
    /// Default of the parameter at `index`
    pub fn value_for(self, index: usize) -> i32 {
        match self {
            DefaultValue::Fixed(value) => value,
            DefaultValue::Index => (index % 128) as i32,
        }
    }
}

/// Static description of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub count: usize,
    pub width: ParamWidth,
    pub default: DefaultValue,
    /// Keep current values on a partial factory reset
    pub preserve_on_partial_reset: bool,
}

impl SectionDescriptor {
    pub const fn new(count: usize, width: ParamWidth, default: DefaultValue) -> Self {
        Self {
            count,
            width,
            default,
            preserve_on_partial_reset: false,
        }
    }

    /// Mark the section as surviving a partial reset
    pub const fn preserved(mut self) -> Self {
        self.preserve_on_partial_reset = true;
        self
    }
}

/// A section placed at a byte offset inside its region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub descriptor: SectionDescriptor,
    /// Offset from the start of the region
    pub offset: usize,
}

impl SectionLayout {
    /// Bytes occupied by this section
    pub fn size(&self) -> usize {
        self.descriptor.width.storage_bytes(self.descriptor.count)
    }
}

/// All sections of one block, placed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockLayout {
    sections: Vec<SectionLayout, MAX_SECTIONS>,
    size: usize,
}

impl BlockLayout {
    fn build(descriptors: &[SectionDescriptor], start: usize) -> Result<Self, StoreError> {
        let mut sections = Vec::new();
        let mut offset = start;

        for descriptor in descriptors {
            let section = SectionLayout {
                descriptor: *descriptor,
                offset,
            };
            offset += section.size();
            sections
                .push(section)
                .map_err(|_| StoreError::InvalidLayout)?;
        }

        Ok(Self {
            sections,
            size: offset - start,
        })
    }

    /// Placed sections in declaration order
    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    /// Section by position
    pub fn section(&self, index: usize) -> Result<&SectionLayout, StoreError> {
        self.sections.get(index).ok_or(StoreError::UnknownSection)
    }

    /// Bytes occupied by the block
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Preset-scoped storage blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DbBlock {
    Global,
    Buttons,
    Encoders,
    Analog,
    Leds,
    Display,
}

impl DbBlock {
    pub const COUNT: usize = 6;
}

/// Storage sections of [`DbBlock::Global`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GlobalDb {
    MidiFeatures,
    MidiMerge,
}

/// Storage sections of [`DbBlock::Buttons`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonDb {
    Type,
    MidiMessage,
    MidiId,
    Velocity,
    MidiChannel,
}

/// Storage sections of [`DbBlock::Encoders`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncoderDb {
    Enable,
    Invert,
    Mode,
    /// 14-bit slot shared by both protocol halves
    MidiId,
    MidiChannel,
    PulsesPerStep,
    Acceleration,
    RemoteSync,
}

/// Storage sections of [`DbBlock::Analog`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AnalogDb {
    Enable,
    Invert,
    Type,
    MidiId,
    LowerLimit,
    UpperLimit,
    MidiChannel,
}

/// Storage sections of [`DbBlock::Leds`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedDb {
    Global,
    ActivationId,
    /// Indexed by RGB group, not by LED
    RgbEnable,
    ControlType,
    ActivationValue,
    MidiChannel,
}

/// Storage sections of [`DbBlock::Display`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayDb {
    Features,
    Setting,
}

/// Storage section address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbSection {
    Global(GlobalDb),
    Buttons(ButtonDb),
    Encoders(EncoderDb),
    Analog(AnalogDb),
    Leds(LedDb),
    Display(DisplayDb),
}

impl DbSection {
    /// Block holding this section
    pub fn block(self) -> DbBlock {
        match self {
            DbSection::Global(_) => DbBlock::Global,
            DbSection::Buttons(_) => DbBlock::Buttons,
            DbSection::Encoders(_) => DbBlock::Encoders,
            DbSection::Analog(_) => DbBlock::Analog,
            DbSection::Leds(_) => DbBlock::Leds,
            DbSection::Display(_) => DbBlock::Display,
        }
    }

    /// Position of the section inside its block
    pub fn index(self) -> usize {
        match self {
            DbSection::Global(s) => s as usize,
            DbSection::Buttons(s) => s as usize,
            DbSection::Encoders(s) => s as usize,
            DbSection::Analog(s) => s as usize,
            DbSection::Leds(s) => s as usize,
            DbSection::Display(s) => s as usize,
        }
    }
}

macro_rules! impl_db_section_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DbSection {
                fn from(section: $ty) -> Self {
                    DbSection::$variant(section)
                }
            }
        )*
    };
}

impl_db_section_from! {
    GlobalDb => Global,
    ButtonDb => Buttons,
    EncoderDb => Encoders,
    AnalogDb => Analog,
    LedDb => Leds,
    DisplayDb => Display,
}

/// Value written after the section defaults on every factory reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultOverride {
    pub section: DbSection,
    pub index: usize,
    pub value: i32,
}

/// Position of the signature section in the system block
pub(crate) const SYSTEM_UID: usize = 0;

/// Position of the preset settings section in the system block
pub(crate) const SYSTEM_PRESETS: usize = 1;

const SYSTEM_SECTIONS: [SectionDescriptor; 2] = [
    SectionDescriptor::new(1, ParamWidth::Word, DefaultValue::Fixed(0)),
    SectionDescriptor::new(PresetSetting::COUNT, ParamWidth::Byte, DefaultValue::Fixed(0)),
];

/// Complete placed schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    system: BlockLayout,
    blocks: [BlockLayout; DbBlock::COUNT],
    preset_usage: usize,
    overrides: Vec<DefaultOverride, MAX_OVERRIDES>,
}

impl Layout {
    /// Schema of a board with the given component counts
    pub fn new(board: &BoardConfig) -> Result<Self, StoreError> {
        use DefaultValue::{Fixed, Index};
        use ParamWidth::{Bit, Byte, Word};

        let global = [
            SectionDescriptor::new(MidiFeature::COUNT, Bit, Fixed(0)).preserved(),
            SectionDescriptor::new(MidiMergeSetting::COUNT, Byte, Fixed(0)).preserved(),
        ];

        let buttons = [
            SectionDescriptor::new(board.buttons, Bit, Fixed(0)),
            SectionDescriptor::new(board.buttons, Byte, Fixed(0)),
            SectionDescriptor::new(board.buttons, Byte, Index),
            SectionDescriptor::new(board.buttons, Byte, Fixed(127)),
            SectionDescriptor::new(board.buttons, Byte, Fixed(0)),
        ];

        let encoders = [
            SectionDescriptor::new(board.encoders, Bit, Fixed(0)),
            SectionDescriptor::new(board.encoders, Bit, Fixed(0)),
            SectionDescriptor::new(board.encoders, Byte, Fixed(0)),
            SectionDescriptor::new(board.encoders, Word, Index),
            SectionDescriptor::new(board.encoders, Byte, Fixed(0)),
            SectionDescriptor::new(board.encoders, Byte, Fixed(4)),
            SectionDescriptor::new(board.encoders, Byte, Fixed(0)),
            SectionDescriptor::new(board.encoders, Bit, Fixed(0)),
        ];

        let analog = [
            SectionDescriptor::new(board.analog, Bit, Fixed(0)),
            SectionDescriptor::new(board.analog, Bit, Fixed(0)),
            SectionDescriptor::new(board.analog, Byte, Fixed(0)),
            SectionDescriptor::new(board.analog, Word, Index),
            SectionDescriptor::new(board.analog, Word, Fixed(0)),
            SectionDescriptor::new(board.analog, Word, Fixed(16383)),
            SectionDescriptor::new(board.analog, Byte, Fixed(0)),
        ];

        let leds = [
            SectionDescriptor::new(LedSetting::COUNT, Byte, Fixed(0)),
            SectionDescriptor::new(board.leds, Byte, Index),
            SectionDescriptor::new(board.rgb_groups(), Bit, Fixed(0)),
            SectionDescriptor::new(board.leds, Byte, Fixed(0)),
            SectionDescriptor::new(board.leds, Byte, Fixed(127)),
            SectionDescriptor::new(board.leds, Byte, Fixed(0)),
        ];

        let display = [
            SectionDescriptor::new(DisplayFeature::COUNT, Bit, Fixed(0)),
            SectionDescriptor::new(DisplaySetting::COUNT, Byte, Fixed(0)),
        ];

        Self::from_blocks([&global, &buttons, &encoders, &analog, &leds, &display])?.with_override(
            DbSection::Display(DisplayDb::Setting),
            DisplaySetting::MidiEventTime as usize,
            limits::RETENTION_SECS_MIN,
        )
    }

    /// Place arbitrary block descriptors after the fixed system block
    pub fn from_blocks(blocks: [&[SectionDescriptor]; DbBlock::COUNT]) -> Result<Self, StoreError> {
        let system = BlockLayout::build(&SYSTEM_SECTIONS, 0)?;

        let mut placed: [BlockLayout; DbBlock::COUNT] = Default::default();
        let mut offset = 0;
        for (slot, descriptors) in placed.iter_mut().zip(blocks) {
            *slot = BlockLayout::build(descriptors, offset)?;
            offset += slot.size();
        }

        Ok(Self {
            system,
            blocks: placed,
            preset_usage: offset,
            overrides: Vec::new(),
        })
    }

    /// Add a custom default written after the section defaults
    pub fn with_override(
        mut self,
        section: DbSection,
        index: usize,
        value: i32,
    ) -> Result<Self, StoreError> {
        self.overrides
            .push(DefaultOverride {
                section,
                index,
                value,
            })
            .map_err(|_| StoreError::InvalidLayout)?;
        Ok(self)
    }

    /// Non-preset block holding signature and preset selection
    pub fn system(&self) -> &BlockLayout {
        &self.system
    }

    /// Preset-scoped blocks in storage order
    pub fn blocks(&self) -> &[BlockLayout] {
        &self.blocks
    }

    /// One preset-scoped block
    pub fn block(&self, block: DbBlock) -> &BlockLayout {
        &self.blocks[block as usize]
    }

    /// Placed section for a storage address
    pub fn section(&self, section: DbSection) -> Result<&SectionLayout, StoreError> {
        self.block(section.block()).section(section.index())
    }

    /// Custom defaults
    pub fn overrides(&self) -> &[DefaultOverride] {
        &self.overrides
    }

    /// Bytes used by the system region
    pub fn system_usage(&self) -> usize {
        self.system.size()
    }

    /// Bytes used by one preset
    pub fn preset_usage(&self) -> usize {
        self.preset_usage
    }

    /// Every section of the schema, system block first
    pub fn all_sections(&self) -> impl Iterator<Item = &SectionLayout> {
        core::iter::once(&self.system)
            .chain(self.blocks.iter())
            .flat_map(|block| block.sections().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: BoardConfig = BoardConfig {
        buttons: 16,
        encoders: 4,
        analog: 8,
        leds: 12,
    };

    #[test]
    fn test_width_storage_bytes() {
        assert_eq!(ParamWidth::Bit.storage_bytes(0), 0);
        assert_eq!(ParamWidth::Bit.storage_bytes(9), 2);
        assert_eq!(ParamWidth::HalfByte.storage_bytes(3), 2);
        assert_eq!(ParamWidth::Byte.storage_bytes(5), 5);
        assert_eq!(ParamWidth::Word.storage_bytes(5), 10);
        assert_eq!(ParamWidth::DWord.storage_bytes(2), 8);
    }

    #[test]
    fn test_width_fits() {
        assert!(ParamWidth::Bit.fits(1));
        assert!(!ParamWidth::Bit.fits(2));
        assert!(!ParamWidth::Byte.fits(-1));
        assert!(ParamWidth::Word.fits(16383));
        assert!(!ParamWidth::Word.fits(0x10000));
        assert!(ParamWidth::DWord.fits(-5));
    }

    #[test]
    fn test_index_default_wraps() {
        assert_eq!(DefaultValue::Index.value_for(5), 5);
        assert_eq!(DefaultValue::Index.value_for(130), 2);
        assert_eq!(DefaultValue::Fixed(127).value_for(130), 127);
    }

    #[test]
    fn test_system_region_size() {
        let layout = Layout::new(&BOARD).unwrap();
        // uid word + two preset bytes
        assert_eq!(layout.system_usage(), 4);
    }

    #[test]
    fn test_sections_are_contiguous() {
        let layout = Layout::new(&BOARD).unwrap();
        let mut expected = 0;
        for block in layout.blocks() {
            for section in block.sections() {
                assert_eq!(section.offset, expected);
                expected += section.size();
            }
        }
        assert_eq!(layout.preset_usage(), expected);
    }

    #[test]
    fn test_button_block_size() {
        let layout = Layout::new(&BOARD).unwrap();
        // 16 bits + 4 byte sections of 16
        assert_eq!(layout.block(DbBlock::Buttons).size(), 2 + 4 * 16);
    }

    #[test]
    fn test_rgb_enable_sized_by_group() {
        let layout = Layout::new(&BOARD).unwrap();
        let rgb = layout.section(DbSection::Leds(LedDb::RgbEnable)).unwrap();
        assert_eq!(rgb.descriptor.count, 4);
        assert_eq!(rgb.descriptor.width, ParamWidth::Bit);
    }

    #[test]
    fn test_retention_override_present() {
        let layout = Layout::new(&BOARD).unwrap();
        assert_eq!(layout.overrides().len(), 1);
        assert_eq!(
            layout.overrides()[0].section,
            DbSection::Display(DisplayDb::Setting)
        );
    }

    #[test]
    fn test_too_many_sections_rejected() {
        let many = [SectionDescriptor::new(1, ParamWidth::Byte, DefaultValue::Fixed(0)); 9];
        let none: [SectionDescriptor; 0] = [];
        let result = Layout::from_blocks([&many, &none, &none, &none, &none, &none]);
        assert_eq!(result, Err(StoreError::InvalidLayout));
    }

    #[test]
    fn test_db_section_addressing() {
        let section: DbSection = EncoderDb::MidiChannel.into();
        assert_eq!(section.block(), DbBlock::Encoders);
        assert_eq!(section.index(), 4);
        assert_eq!(DbSection::from(LedDb::RgbEnable).index(), 2);
    }
}
