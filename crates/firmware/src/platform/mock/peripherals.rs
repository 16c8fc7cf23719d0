//! Recording runtime modules for host tests
//!
//! Stands in for the MIDI transport and the button/encoder/analog drivers.
//! Boards under test have neither LEDs nor a display attached.

use deckconf_core::config::{
    AnalogControl, ButtonControl, EncoderControl, MidiTransport, NoteOffMode, Peripherals,
};
use deckconf_core::protocol::MergeType;

/// Largest SysEx frame kept by [`MockPeripherals`]
pub const MAX_FRAME: usize = 64;

/// MIDI transport state as last configured
#[derive(Debug, Clone, Default)]
pub struct MockMidi {
    pub note_off_mode: Option<NoteOffMode>,
    pub running_status: bool,
    pub recursive_parsing: bool,
    pub uart_enabled: bool,
    pub merge: Option<MergeType>,
    pub frames_sent: usize,
    pub last_frame: heapless::Vec<u8, MAX_FRAME>,
}

impl MidiTransport for MockMidi {
    fn set_note_off_mode(&mut self, mode: NoteOffMode) {
        self.note_off_mode = Some(mode);
    }

    fn set_running_status(&mut self, enabled: bool) {
        self.running_status = enabled;
    }

    fn use_recursive_parsing(&mut self, enabled: bool) {
        self.recursive_parsing = enabled;
    }

    fn setup_uart(&mut self) {
        self.uart_enabled = true;
    }

    fn deinit_uart(&mut self) {
        self.uart_enabled = false;
    }

    fn configure_merge(&mut self, merge: MergeType) {
        self.merge = Some(merge);
    }

    fn send_sysex(&mut self, bytes: &[u8]) {
        self.frames_sent += 1;
        self.last_frame.clear();
        let len = bytes.len().min(MAX_FRAME);
        // Capacity checked above
        let _ = self.last_frame.extend_from_slice(&bytes[..len]);
    }
}

/// Number of state resets requested per component kind
#[derive(Debug, Clone, Copy, Default)]
pub struct MockResets {
    pub buttons: usize,
    pub encoders: usize,
    pub analog: usize,
}

impl ButtonControl for MockResets {
    fn reset(&mut self, _index: usize) {
        self.buttons += 1;
    }
}

impl EncoderControl for MockResets {
    fn reset_value(&mut self, _index: usize) {
        self.encoders += 1;
    }
}

impl AnalogControl for MockResets {
    fn debounce_reset(&mut self, _index: usize) {
        self.analog += 1;
    }
}

/// Runtime modules of a board without LEDs or display
#[derive(Debug, Clone, Default)]
pub struct MockPeripherals {
    pub midi: MockMidi,
    pub resets: MockResets,
}

impl MockPeripherals {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Peripherals for MockPeripherals {
    fn midi(&mut self) -> &mut dyn MidiTransport {
        &mut self.midi
    }

    fn buttons(&mut self) -> &mut dyn ButtonControl {
        &mut self.resets
    }

    fn encoders(&mut self) -> &mut dyn EncoderControl {
        &mut self.resets
    }

    fn analog(&mut self) -> &mut dyn AnalogControl {
        &mut self.resets
    }
}
