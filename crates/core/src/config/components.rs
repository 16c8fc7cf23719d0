//! Button, encoder and analog blocks

use super::handler::{channel_from_stored, channel_to_stored, half_value, SysConfig};
use super::peripherals::Peripherals;
use super::translate;
use crate::database::{AnalogDb, StorageMedium};
use crate::protocol::{AnalogSection, ButtonSection, ConfigError, ConfigResult, EncoderSection};

impl<M: StorageMedium, P: Peripherals> SysConfig<M, P> {
    pub(super) fn get_button(&mut self, section: ButtonSection, index: usize) -> ConfigResult<i32> {
        let value = self.store.read(translate::buttons(section), index)?;

        Ok(match section {
            ButtonSection::MidiChannel => channel_from_stored(value),
            _ => value,
        })
    }

    pub(super) fn set_button(
        &mut self,
        section: ButtonSection,
        index: usize,
        value: i32,
    ) -> ConfigResult<()> {
        let value = match section {
            ButtonSection::MidiChannel => channel_to_stored(value)?,
            _ => i32::from(half_value(value)?),
        };

        self.store.update(translate::buttons(section), index, value)?;

        if matches!(section, ButtonSection::Type | ButtonSection::MidiMessage) {
            self.peripherals.buttons().reset(index);
        }

        Ok(())
    }

    pub(super) fn get_encoder(&mut self, section: EncoderSection, index: usize) -> ConfigResult<i32> {
        let db = translate::encoders(section);

        match section {
            EncoderSection::MidiId | EncoderSection::MidiIdMsb => {
                self.read_half(db.into(), index, section == EncoderSection::MidiIdMsb)
            }
            EncoderSection::MidiChannel => Ok(channel_from_stored(self.store.read(db, index)?)),
            _ => Ok(self.store.read(db, index)?),
        }
    }

    /// Every successful write drops the encoder's accumulated value.
    pub(super) fn set_encoder(
        &mut self,
        section: EncoderSection,
        index: usize,
        value: i32,
    ) -> ConfigResult<()> {
        let db = translate::encoders(section);

        match section {
            EncoderSection::MidiId | EncoderSection::MidiIdMsb => {
                self.write_half(db.into(), index, section == EncoderSection::MidiIdMsb, value)?;
            }
            EncoderSection::MidiChannel => {
                self.store.update(db, index, channel_to_stored(value)?)?;
            }
            _ => self.store.update(db, index, i32::from(half_value(value)?))?,
        }

        self.peripherals.encoders().reset_value(index);
        Ok(())
    }

    pub(super) fn get_analog(&mut self, section: AnalogSection, index: usize) -> ConfigResult<i32> {
        let db = translate::analog(section);

        if section.is_14bit() {
            return self.read_half(db.into(), index, section.is_msb());
        }

        let value = self.store.read(db, index)?;
        Ok(match section {
            AnalogSection::MidiChannel => channel_from_stored(value),
            _ => value,
        })
    }

    pub(super) fn set_analog(
        &mut self,
        section: AnalogSection,
        index: usize,
        value: i32,
    ) -> ConfigResult<()> {
        let db = translate::analog(section);

        if section.is_14bit() {
            return self.write_half(db.into(), index, section.is_msb(), value);
        }

        match section {
            AnalogSection::Type => {
                let value = half_value(value)?;
                if index >= self.store.parameter_count(AnalogDb::Type)? {
                    return Err(ConfigError::NotSupported);
                }
                self.peripherals.analog().debounce_reset(index);
                self.store.update(db, index, i32::from(value))?;
            }
            AnalogSection::MidiChannel => {
                self.store.update(db, index, channel_to_stored(value)?)?;
            }
            _ => self.store.update(db, index, i32::from(half_value(value)?))?,
        }

        Ok(())
    }
}
