//! 14-bit values carried as two 7-bit halves

/// A 14-bit value split into its 7-bit halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value14 {
    pub low: u8,
    pub high: u8,
}

impl Value14 {
    /// Largest combined value
    pub const MAX: u16 = 0x3FFF;

    /// Largest value of a single half
    pub const HALF_MAX: u8 = 0x7F;

    /// Split a combined value; bits above bit 13 are dropped.
    pub fn split(value: u16) -> Self {
        Self {
            low: (value & 0x7F) as u8,
            high: ((value >> 7) & 0x7F) as u8,
        }
    }

    /// Merge both halves back into one value
    pub fn merge(self) -> u16 {
        (u16::from(self.high & 0x7F) << 7) | u16::from(self.low & 0x7F)
    }

    /// Replace one half, keeping the other
    pub fn with_half(self, high: bool, half: u8) -> Self {
        if high {
            Self { high: half, ..self }
        } else {
            Self { low: half, ..self }
        }
    }

    /// The requested half
    pub fn half(self, high: bool) -> u8 {
        if high {
            self.high
        } else {
            self.low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let value = Value14::split(50 * 128 + 100);
        assert_eq!(value.low, 100);
        assert_eq!(value.high, 50);
        assert_eq!(Value14::split(Value14::MAX), Value14 { low: 127, high: 127 });
    }

    #[test]
    fn test_replace_half_keeps_other() {
        let value = Value14::split(50 * 128 + 100).with_half(false, 3);
        assert_eq!(value.merge(), 50 * 128 + 3);

        let value = Value14::split(50 * 128 + 100).with_half(true, 0);
        assert_eq!(value.merge(), 100);
    }
}
