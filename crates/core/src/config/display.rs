//! Display block

use super::handler::{flag, setting, SysConfig};
use super::peripherals::Peripherals;
use super::translate;
use crate::database::{ParamWidth, StorageMedium};
use crate::limits;
use crate::protocol::{
    ConfigError, ConfigResult, DisplayController, DisplayFeature, DisplayResolution,
    DisplaySection, DisplaySetting,
};

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    pub(super) fn get_display(&mut self, section: DisplaySection, index: usize) -> ConfigResult<i32> {
        self.display_control()?;
        Ok(self.store.read(translate::display(section), index)?)
    }

    pub(super) fn set_display(
        &mut self,
        section: DisplaySection,
        index: usize,
        value: i32,
    ) -> ConfigResult<()> {
        self.display_control()?;

        let reinit = match section {
            DisplaySection::Features => self.apply_display_feature(setting(index)?, value)?,
            DisplaySection::Setting => self.apply_display_setting(setting(index)?, value)?,
        };

        self.store
            .update(translate::display(section), index, value)?;

        if reinit {
            self.display_control()?.init(false);
        }

        Ok(())
    }

    /// Validate and apply a feature switch; returns whether to re-init
    fn apply_display_feature(&mut self, feature: DisplayFeature, value: i32) -> ConfigResult<bool> {
        let enabled = flag(value)?;

        match feature {
            DisplayFeature::Enable => return Ok(true),
            DisplayFeature::MidiEventRetention => {
                self.display_control()?.set_retention_state(enabled);
            }
            DisplayFeature::MidiNotesAlternate => {
                self.display_control()?.set_alternate_note_display(enabled);
            }
            DisplayFeature::WelcomeMsg | DisplayFeature::VInfoMsg => {}
        }

        Ok(false)
    }

    /// Validate and apply a setting; returns whether to re-init
    fn apply_display_setting(&mut self, display_setting: DisplaySetting, value: i32) -> ConfigResult<bool> {
        if !ParamWidth::Byte.fits(value) {
            return Err(ConfigError::NotSupported);
        }
        let raw = value as u8;

        match display_setting {
            DisplaySetting::Controller => {
                DisplayController::try_from(raw).map_err(|_| ConfigError::NotSupported)?;
                Ok(true)
            }
            DisplaySetting::Resolution => {
                DisplayResolution::try_from(raw).map_err(|_| ConfigError::NotSupported)?;
                Ok(true)
            }
            DisplaySetting::MidiEventTime => {
                if !(limits::RETENTION_SECS_MIN..=limits::RETENTION_SECS_MAX).contains(&value) {
                    return Err(ConfigError::NotSupported);
                }
                self.display_control()?
                    .set_retention_time(u32::from(raw) * 1000);
                Ok(false)
            }
            DisplaySetting::OctaveNormalization => {
                self.display_control()?.set_octave_normalization(raw);
                Ok(false)
            }
        }
    }
}
