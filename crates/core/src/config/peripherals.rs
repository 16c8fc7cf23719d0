//! Runtime module interfaces
//!
//! The configuration handler never owns peripheral logic. It calls these
//! narrow notification and query primitives after validating a request.
//! Firmware implements them over its drivers; tests implement them with
//! recording mocks.

use crate::protocol::{BlinkSpeed, BlinkType, LedColor, MergeType, RgbComponent};
use bitflags::bitflags;

bitflags! {
    /// Subsystems compiled into the firmware
    ///
    /// A request addressing a subsystem outside this set is answered with
    /// `NotSupported`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        const LEDS = 1 << 0;
        const DISPLAY = 1 << 1;
        const DIN_MIDI = 1 << 2;
        const LED_FADING = 1 << 3;
    }
}

/// How note-off events are encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOffMode {
    /// Dedicated note-off message
    Standard,
    /// Note-on with velocity 0
    NoteOnZeroVelocity,
}

/// MIDI transport (USB and DIN)
pub trait MidiTransport {
    fn set_note_off_mode(&mut self, mode: NoteOffMode);

    fn set_running_status(&mut self, enabled: bool);

    /// Parse and forward every message in one pass (required for merging)
    fn use_recursive_parsing(&mut self, enabled: bool);

    /// Bring up the DIN UART at the standard MIDI baud rate, RX and TX
    fn setup_uart(&mut self);

    /// Shut the DIN UART down
    fn deinit_uart(&mut self);

    /// Route traffic for the given merge topology
    fn configure_merge(&mut self, merge: MergeType);

    /// Transmit a complete SysEx frame
    fn send_sysex(&mut self, bytes: &[u8]);
}

pub trait ButtonControl {
    /// Drop debounce and edge state of one button
    fn reset(&mut self, index: usize);
}

pub trait EncoderControl {
    /// Drop the accumulated relative value of one encoder
    fn reset_value(&mut self, index: usize);
}

pub trait AnalogControl {
    /// Drop the debounce state of one analog input
    fn debounce_reset(&mut self, index: usize);
}

/// LED driver
pub trait LedControl {
    fn set_color(&mut self, index: usize, color: LedColor);

    fn color(&self, index: usize) -> LedColor;

    fn set_blink_state(&mut self, index: usize, speed: BlinkSpeed);

    /// Whether the LED is currently blinking
    fn blink_state(&self, index: usize) -> bool;

    fn set_blink_type(&mut self, blink: BlinkType);

    fn set_fade_time(&mut self, speed: u8);
}

/// Direction of a displayed MIDI event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDirection {
    In,
    Out,
}

/// Display driver
pub trait DisplayControl {
    /// Show that a SysEx message passed in the given direction
    fn notify_sysex(&mut self, direction: EventDirection);

    /// Re-read display settings and restart the controller
    ///
    /// # Arguments
    ///
    /// * `startup` - Show the welcome and version messages
    fn init(&mut self, startup: bool);

    fn set_retention_state(&mut self, enabled: bool);

    fn set_alternate_note_display(&mut self, enabled: bool);

    /// Set MIDI event retention, in milliseconds
    fn set_retention_time(&mut self, millis: u32);

    fn set_octave_normalization(&mut self, value: u8);
}

/// Accessors for every runtime module the handler talks to
///
/// LEDs and display are optional; boards without them return `None`.
pub trait Peripherals {
    fn midi(&mut self) -> &mut dyn MidiTransport;

    fn buttons(&mut self) -> &mut dyn ButtonControl;

    fn encoders(&mut self) -> &mut dyn EncoderControl;

    fn analog(&mut self) -> &mut dyn AnalogControl;

    fn leds(&mut self) -> Option<&mut dyn LedControl> {
        None
    }

    fn display(&mut self) -> Option<&mut dyn DisplayControl> {
        None
    }
}

/// RGB group of a physical LED
pub fn rgb_id(index: usize) -> usize {
    index / 3
}

/// Physical LED of one component of an RGB group
pub fn rgb_address(id: usize, component: RgbComponent) -> usize {
    id * 3 + usize::from(u8::from(component))
}
