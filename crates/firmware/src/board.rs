//! Board definition
//!
//! Component counts and EEPROM size come from `boards/<BOARD>.board`, turned
//! into constants by `build.rs`. The capability set follows the enabled
//! cargo features.

use deckconf_core::config::Capabilities;
use deckconf_core::database::BoardConfig;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Features compiled into this firmware
pub const fn capabilities() -> Capabilities {
    let mut bits = 0;

    if cfg!(feature = "leds") {
        bits |= Capabilities::LEDS.bits();
    }
    if cfg!(feature = "display") {
        bits |= Capabilities::DISPLAY.bits();
    }
    if cfg!(feature = "din_midi") {
        bits |= Capabilities::DIN_MIDI.bits();
    }
    if cfg!(feature = "led_fading") {
        bits |= Capabilities::LED_FADING.bits();
    }

    Capabilities::from_bits_truncate(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_leds_form_rgb_groups() {
        assert_eq!(BOARD_CONFIG.leds % 3, 0);
        assert!(EEPROM_SIZE > 0);
        assert!(!BOARD_NAME.is_empty());
    }

    #[test]
    fn test_led_fading_implies_leds() {
        let capabilities = capabilities();
        if capabilities.contains(Capabilities::LED_FADING) {
            assert!(capabilities.contains(Capabilities::LEDS));
        }
    }
}
