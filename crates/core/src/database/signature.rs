//! Schema signature
//!
//! A 16-bit fingerprint of the layout shape. It is persisted in the system
//! region; a mismatch at boot means the stored bytes were written under a
//! different schema and cannot be interpreted.

use super::layout::Layout;

/// Constant mixed into every signature
pub const SIGNATURE_BASE: u16 = 0x1701;

/// Compute the signature of a layout
///
/// Sum of parameter count plus width code over every section of the system
/// block and every preset block, XOR [`SIGNATURE_BASE`]. Counts are truncated
/// to 16 bits and the sum wraps.
pub fn compute_signature(layout: &Layout) -> u16 {
    layout
        .all_sections()
        .fold(0u16, |sum, section| {
            sum.wrapping_add(section.descriptor.count as u16)
                .wrapping_add(section.descriptor.width.code())
        })
        ^ SIGNATURE_BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::layout::BoardConfig;

    const BOARD: BoardConfig = BoardConfig {
        buttons: 16,
        encoders: 4,
        analog: 8,
        leds: 12,
    };

    #[test]
    fn test_signature_deterministic() {
        let a = Layout::new(&BOARD).unwrap();
        let b = Layout::new(&BOARD).unwrap();
        assert_eq!(compute_signature(&a), compute_signature(&b));
    }

    #[test]
    fn test_signature_changes_with_counts() {
        let base = compute_signature(&Layout::new(&BOARD).unwrap());

        let more_buttons = BoardConfig {
            buttons: 17,
            ..BOARD
        };
        assert_ne!(base, compute_signature(&Layout::new(&more_buttons).unwrap()));

        let more_leds = BoardConfig { leds: 15, ..BOARD };
        assert_ne!(base, compute_signature(&Layout::new(&more_leds).unwrap()));
    }
}
