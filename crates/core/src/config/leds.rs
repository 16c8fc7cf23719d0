//! LED block
//!
//! Test color and test blink talk to the LED driver only. Activation ID,
//! control type and MIDI channel fan out to all three LEDs of an RGB group
//! while the group's enable bit is set.

use super::handler::{
    channel_from_stored, channel_to_stored, flag, half_value, setting, SysConfig,
};
use super::peripherals::{rgb_address, rgb_id, Capabilities, Peripherals};
use super::translate;
use crate::database::{LedDb, StorageMedium};
use crate::limits;
use crate::protocol::{
    BlinkSpeed, BlinkType, ConfigError, ConfigResult, LedColor, LedSection, LedSetting,
    RgbComponent,
};

/// Settings copied to every LED of a group when RGB mode is enabled
const GROUP_SHARED: [LedDb; 3] = [LedDb::ActivationId, LedDb::ControlType, LedDb::MidiChannel];

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    fn check_led_index(&self, index: usize) -> ConfigResult<()> {
        if index < self.store.parameter_count(LedDb::ActivationId)? {
            Ok(())
        } else {
            Err(ConfigError::NotSupported)
        }
    }

    /// Check `index` and that its whole RGB group exists
    fn check_rgb_group(&self, index: usize) -> ConfigResult<usize> {
        self.check_led_index(index)?;
        let id = rgb_id(index);
        if rgb_address(id, RgbComponent::B) < self.store.parameter_count(LedDb::ActivationId)? {
            Ok(id)
        } else {
            Err(ConfigError::NotSupported)
        }
    }

    pub(super) fn get_led(&mut self, section: LedSection, index: usize) -> ConfigResult<i32> {
        self.led_control()?;

        let Some(db) = translate::leds(section) else {
            self.check_led_index(index)?;
            let leds = self.led_control()?;
            return Ok(match section {
                LedSection::TestBlink => i32::from(leds.blink_state(index)),
                _ => i32::from(u8::from(leds.color(index))),
            });
        };

        match section {
            LedSection::RgbEnable => Ok(self.store.read(db, rgb_id(index))?),
            LedSection::MidiChannel => Ok(channel_from_stored(self.store.read(db, index)?)),
            _ => Ok(self.store.read(db, index)?),
        }
    }

    pub(super) fn set_led(&mut self, section: LedSection, index: usize, value: i32) -> ConfigResult<()> {
        self.led_control()?;

        match section {
            LedSection::TestColor => {
                let color = u8::try_from(value)
                    .ok()
                    .and_then(|raw| LedColor::try_from(raw).ok())
                    .ok_or(ConfigError::NotSupported)?;
                self.check_led_index(index)?;
                self.led_control()?.set_color(index, color);
                Ok(())
            }
            LedSection::TestBlink => {
                let speed = if flag(value)? {
                    BlinkSpeed::S500ms
                } else {
                    BlinkSpeed::NoBlink
                };
                self.check_led_index(index)?;
                self.led_control()?.set_blink_state(index, speed);
                Ok(())
            }
            LedSection::Global => self.set_led_setting(setting(index)?, value),
            LedSection::RgbEnable => self.set_rgb_enable(index, flag(value)?),
            LedSection::ActivationId | LedSection::ControlType | LedSection::MidiChannel => {
                let db = match section {
                    LedSection::ActivationId => LedDb::ActivationId,
                    LedSection::ControlType => LedDb::ControlType,
                    _ => LedDb::MidiChannel,
                };
                let value = if db == LedDb::MidiChannel {
                    channel_to_stored(value)?
                } else {
                    i32::from(half_value(value)?)
                };
                self.set_grouped(db, index, value)
            }
            LedSection::ActivationValue => {
                let value = half_value(value)?;
                self.store
                    .update(LedDb::ActivationValue, index, i32::from(value))?;
                Ok(())
            }
        }
    }

    fn set_led_setting(&mut self, led_setting: LedSetting, value: i32) -> ConfigResult<()> {
        match led_setting {
            LedSetting::BlinkWithMidiClock => {
                let blink = if flag(value)? {
                    BlinkType::MidiClock
                } else {
                    BlinkType::Timer
                };
                self.led_control()?.set_blink_type(blink);
            }
            LedSetting::UseStartupAnimation => {
                flag(value)?;
            }
            LedSetting::FadeSpeed => {
                self.require(Capabilities::LED_FADING)?;
                if !(limits::FADE_SPEED_MIN..=limits::FADE_SPEED_MAX).contains(&value) {
                    return Err(ConfigError::NotSupported);
                }
                self.led_control()?.set_fade_time(value as u8);
            }
        }

        self.store
            .update(LedDb::Global, led_setting as usize, value)?;
        Ok(())
    }

    /// Switch RGB mode of the group holding `index`
    ///
    /// All three LEDs are turned off first. When enabling, the shared
    /// settings of `index` are copied to the whole group; the copy stops at
    /// the first failed write and earlier copies stay in place.
    fn set_rgb_enable(&mut self, index: usize, enabled: bool) -> ConfigResult<()> {
        let id = self.check_rgb_group(index)?;

        let leds = self.led_control()?;
        for component in RgbComponent::ALL {
            leds.set_color(rgb_address(id, component), LedColor::Off);
        }

        self.store.update(LedDb::RgbEnable, id, i32::from(enabled))?;

        if !enabled {
            return Ok(());
        }

        for component in RgbComponent::ALL {
            let address = rgb_address(id, component);
            for db in GROUP_SHARED {
                let value = self.store.read(db, index)?;
                self.store.update(db, address, value)?;
            }
        }

        Ok(())
    }

    /// Write a shared setting to one LED, or to its whole group in RGB mode
    fn set_grouped(&mut self, db: LedDb, index: usize, value: i32) -> ConfigResult<()> {
        self.check_led_index(index)?;
        let id = rgb_id(index);

        if self.store.read(LedDb::RgbEnable, id)? == 1 {
            self.check_rgb_group(index)?;
            for component in RgbComponent::ALL {
                self.store.update(db, rgb_address(id, component), value)?;
            }
        } else {
            self.store.update(db, index, value)?;
        }

        Ok(())
    }
}
