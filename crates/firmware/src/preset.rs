//! Preset change notification
//!
//! The parameter store calls [`on_preset_change`] once the active preset is
//! restored at boot and after every successful preset switch. The change is logged and published so firmware tasks can
//! refresh whatever they derived from the previous preset.

use core::sync::atomic::{AtomicU8, Ordering};

#[cfg(feature = "embassy")]
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

/// No preset change observed since boot
const NO_CHANGE: u8 = u8::MAX;

static LAST_PRESET: AtomicU8 = AtomicU8::new(NO_CHANGE);

#[cfg(feature = "embassy")]
static PRESET_CHANGED: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Hook registered with the parameter store
pub fn on_preset_change(preset: u8) {
    crate::log_info!("Preset changed to {}", preset);
    LAST_PRESET.store(preset, Ordering::Release);

    #[cfg(feature = "embassy")]
    PRESET_CHANGED.signal(preset);
}

/// Most recent preset switched to, if any
pub fn last_preset_change() -> Option<u8> {
    match LAST_PRESET.load(Ordering::Acquire) {
        NO_CHANGE => None,
        preset => Some(preset),
    }
}

/// Wait for the next preset switch
#[cfg(feature = "embassy")]
pub async fn wait_preset_change() -> u8 {
    PRESET_CHANGED.wait().await
}
