//! Global block: MIDI features, merge settings and presets

use super::handler::{flag, setting, SysConfig};
use super::peripherals::{Capabilities, NoteOffMode, Peripherals};
use super::translate;
use crate::database::{GlobalDb, StorageMedium};
use crate::protocol::{
    ConfigError, ConfigResult, GlobalSection, MergeType, MidiFeature, MidiMergeSetting,
    PresetSetting,
};

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    pub(super) fn get_global(&mut self, section: GlobalSection, index: usize) -> ConfigResult<i32> {
        if let Some(db) = translate::global(section) {
            return Ok(self.store.read(db, index)?);
        }

        match setting::<PresetSetting>(index)? {
            PresetSetting::ActivePreset => Ok(i32::from(self.store.preset())),
            PresetSetting::PresetPreserve => Ok(i32::from(self.store.preset_preserve_state()?)),
        }
    }

    pub(super) fn set_global(
        &mut self,
        section: GlobalSection,
        index: usize,
        value: i32,
    ) -> ConfigResult<()> {
        match section {
            GlobalSection::MidiFeature => self.set_midi_feature(setting(index)?, value),
            GlobalSection::MidiMerge => self.set_midi_merge(setting(index)?, value),
            GlobalSection::Presets => self.set_preset_setting(setting(index)?, value),
        }
    }

    fn set_midi_feature(&mut self, feature: MidiFeature, value: i32) -> ConfigResult<()> {
        let enabled = flag(value)?;

        match feature {
            MidiFeature::StandardNoteOff => {
                let mode = if enabled {
                    NoteOffMode::Standard
                } else {
                    NoteOffMode::NoteOnZeroVelocity
                };
                self.peripherals.midi().set_note_off_mode(mode);
            }
            MidiFeature::RunningStatus => {
                self.require(Capabilities::DIN_MIDI)?;
                self.peripherals.midi().set_running_status(enabled);
            }
            MidiFeature::DinEnabled => {
                self.require(Capabilities::DIN_MIDI)?;
                let midi = self.peripherals.midi();
                if enabled {
                    midi.setup_uart();
                } else {
                    midi.deinit_uart();
                }
            }
            MidiFeature::MergeEnabled => {
                self.require(Capabilities::DIN_MIDI)?;

                // merging needs the DIN port
                if enabled && !self.is_midi_feature_enabled(MidiFeature::DinEnabled)? {
                    return Err(ConfigError::NotSupported);
                }

                if enabled {
                    let merge = self.midi_merge_type()?.activation_variant();
                    let midi = self.peripherals.midi();
                    midi.use_recursive_parsing(true);
                    midi.configure_merge(merge);
                } else {
                    let midi = self.peripherals.midi();
                    midi.use_recursive_parsing(false);
                    midi.setup_uart();
                }
            }
        }

        self.store
            .update(GlobalDb::MidiFeatures, feature as usize, value)?;
        Ok(())
    }

    fn set_midi_merge(&mut self, merge: MidiMergeSetting, value: i32) -> ConfigResult<()> {
        self.require(Capabilities::DIN_MIDI)?;

        match merge {
            MidiMergeSetting::MergeType => {
                if !self.is_midi_feature_enabled(MidiFeature::DinEnabled)?
                    || !self.is_midi_feature_enabled(MidiFeature::MergeEnabled)?
                {
                    return Err(ConfigError::NotSupported);
                }

                let merge_type = u8::try_from(value)
                    .ok()
                    .and_then(|raw| MergeType::try_from(raw).ok())
                    .ok_or(ConfigError::NotSupported)?
                    .activation_variant();

                self.peripherals.midi().configure_merge(merge_type);
                self.store.update(
                    GlobalDb::MidiMerge,
                    MidiMergeSetting::MergeType as usize,
                    i32::from(u8::from(merge_type)),
                )?;
                Ok(())
            }
            // reserved, accepted without storing
            MidiMergeSetting::MergeUsbChannel | MidiMergeSetting::MergeDinChannel => Ok(()),
        }
    }

    fn set_preset_setting(&mut self, preset: PresetSetting, value: i32) -> ConfigResult<()> {
        match preset {
            PresetSetting::ActivePreset => {
                let preset = u8::try_from(value).map_err(|_| ConfigError::NotSupported)?;
                self.store.set_preset(preset)?;
            }
            PresetSetting::PresetPreserve => {
                self.store.set_preset_preserve_state(flag(value)?)?;
            }
        }

        Ok(())
    }
}
