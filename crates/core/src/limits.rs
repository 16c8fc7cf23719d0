//! Value limits enforced by the configuration handler

/// Slowest LED fade speed
pub const FADE_SPEED_MIN: i32 = 0;

/// Fastest LED fade speed
pub const FADE_SPEED_MAX: i32 = 10;

/// Shortest display MIDI event retention, in seconds
pub const RETENTION_SECS_MIN: i32 = 1;

/// Longest display MIDI event retention, in seconds
pub const RETENTION_SECS_MAX: i32 = 5;

/// Lowest MIDI channel as seen over the protocol
pub const MIDI_CHANNEL_MIN: i32 = 1;

/// Highest MIDI channel as seen over the protocol (17 = omni)
pub const MIDI_CHANNEL_MAX: i32 = 17;

/// Largest value of a single 7-bit protocol half
pub const HALF_VALUE_MAX: i32 = 127;
