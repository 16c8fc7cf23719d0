//! Preset-aware parameter store
//!
//! Owns the medium and the layout. Parameter access is scoped to the active
//! preset; the system region (signature and preset selection) is reached only
//! through [`ParameterStore::with_system_region`].
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --initialize()--> Valid            (signature matched)
//!                             \-> Valid after reset (signature mismatch)
//! ```
//!
//! `set_preset` only moves the active preset selector; preset payload bytes
//! are never copied.

use super::engine::Region;
use super::error::StoreError;
use super::layout::{BlockLayout, DbSection, Layout, SYSTEM_PRESETS, SYSTEM_UID};
use super::medium::StorageMedium;
use super::signature::compute_signature;
use crate::protocol::PresetSetting;

/// Hook invoked with the new preset after every successful switch
pub type PresetChangeHandler = fn(u8);

/// Factory reset scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// Erase the medium and restore every default
    Full,
    /// Restore defaults, keeping sections marked as preserved
    Partial,
}

/// Result of [`ParameterStore::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Stored signature matched; `preset` is the active preset
    Restored { preset: u8 },
    /// Stored signature did not match and every preset was reset
    FactoryReset,
}

/// Access to the non-preset system block
pub struct SystemRegion<'a, M: StorageMedium> {
    region: Region<'a, M>,
    layout: &'a BlockLayout,
}

impl<M: StorageMedium> SystemRegion<'_, M> {
    /// Read a system parameter
    pub fn read(&mut self, section: usize, index: usize) -> Result<i32, StoreError> {
        let section = *self.layout.section(section)?;
        self.region.read(&section, index)
    }

    /// Write a system parameter
    pub fn update(&mut self, section: usize, index: usize, value: i32) -> Result<(), StoreError> {
        let section = *self.layout.section(section)?;
        self.region.update(&section, index, value)
    }
}

/// Persistent parameter store replicated across presets
pub struct ParameterStore<M: StorageMedium> {
    medium: M,
    layout: Layout,
    signature: u16,
    supported_presets: u8,
    active_preset: u8,
    initialized: bool,
    on_preset_change: Option<PresetChangeHandler>,
}

impl<M: StorageMedium> ParameterStore<M> {
    /// Create an uninitialized store
    pub fn new(medium: M, layout: Layout) -> Self {
        let signature = compute_signature(&layout);
        Self {
            medium,
            layout,
            signature,
            supported_presets: 0,
            active_preset: 0,
            initialized: false,
            on_preset_change: None,
        }
    }

    /// Size the presets, validate the signature and restore the active preset
    ///
    /// A signature mismatch performs a full factory reset. The resulting
    /// preset is written back to the selector and announced through the
    /// change hook on every boot. Fails when the layout does not fit the
    /// medium or the medium fails.
    pub fn initialize(&mut self) -> Result<InitOutcome, StoreError> {
        let system = self.layout.system_usage();
        let preset = self.layout.preset_usage();
        let size = self.medium.size();

        if system + preset > size {
            self.initialized = false;
            return Err(StoreError::LayoutTooLarge);
        }

        let presets = if preset == 0 {
            1
        } else {
            (size - system) / preset
        };
        self.supported_presets = presets.min(usize::from(u8::MAX)) as u8;
        self.active_preset = 0;
        self.initialized = true;

        let outcome = self.validate_or_reset().and_then(|outcome| {
            self.set_preset(self.active_preset)?;
            Ok(outcome)
        });
        if outcome.is_err() {
            self.initialized = false;
        }
        outcome
    }

    fn validate_or_reset(&mut self) -> Result<InitOutcome, StoreError> {
        if !self.is_signature_valid()? {
            self.factory_reset(ResetKind::Full)?;
            return Ok(InitOutcome::FactoryReset);
        }

        if self.preset_preserve_state()? {
            let stored = self.with_system_region(|system| {
                system.read(SYSTEM_PRESETS, PresetSetting::ActivePreset as usize)
            })?;

            // Corrupted selector falls back to preset 0
            if stored >= 0 && stored < i32::from(self.supported_presets) {
                self.active_preset = stored as u8;
            }
        }

        Ok(InitOutcome::Restored {
            preset: self.active_preset,
        })
    }

    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.initialized {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    fn preset_base(&self) -> usize {
        self.layout.system_usage() + usize::from(self.active_preset) * self.layout.preset_usage()
    }

    /// Run `f` against the system region
    ///
    /// The closure holds the only mutable borrow of the medium, so no other
    /// store access can interleave with it.
    pub fn with_system_region<R>(
        &mut self,
        f: impl FnOnce(&mut SystemRegion<'_, M>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut system = SystemRegion {
            region: Region::new(&mut self.medium, 0),
            layout: self.layout.system(),
        };
        f(&mut system)
    }

    /// Read a parameter from the active preset
    pub fn read(&mut self, section: impl Into<DbSection>, index: usize) -> Result<i32, StoreError> {
        self.ensure_initialized()?;
        let base = self.preset_base();
        let section = *self.layout.section(section.into())?;
        Region::new(&mut self.medium, base).read(&section, index)
    }

    /// Write a parameter in the active preset
    pub fn update(
        &mut self,
        section: impl Into<DbSection>,
        index: usize,
        value: i32,
    ) -> Result<(), StoreError> {
        self.ensure_initialized()?;
        let base = self.preset_base();
        let section = *self.layout.section(section.into())?;
        Region::new(&mut self.medium, base).update(&section, index, value)
    }

    /// Number of parameters in a section
    pub fn parameter_count(&self, section: impl Into<DbSection>) -> Result<usize, StoreError> {
        Ok(self.layout.section(section.into())?.descriptor.count)
    }

    /// Switch the active preset and persist the selection
    ///
    /// Fails without any state change if `preset` is not supported.
    pub fn set_preset(&mut self, preset: u8) -> Result<(), StoreError> {
        self.ensure_initialized()?;

        if preset >= self.supported_presets {
            return Err(StoreError::PresetOutOfRange);
        }

        self.with_system_region(|system| {
            system.update(
                SYSTEM_PRESETS,
                PresetSetting::ActivePreset as usize,
                i32::from(preset),
            )
        })?;

        self.active_preset = preset;

        if let Some(handler) = self.on_preset_change {
            handler(preset);
        }

        Ok(())
    }

    /// Active preset
    pub fn preset(&self) -> u8 {
        self.active_preset
    }

    /// Number of presets that fit the medium (0 before initialization)
    pub fn supported_presets(&self) -> u8 {
        self.supported_presets
    }

    /// Persist whether the active preset survives a power cycle
    pub fn set_preset_preserve_state(&mut self, preserve: bool) -> Result<(), StoreError> {
        self.with_system_region(|system| {
            system.update(
                SYSTEM_PRESETS,
                PresetSetting::PresetPreserve as usize,
                i32::from(preserve),
            )
        })
    }

    /// Whether the active preset survives a power cycle
    pub fn preset_preserve_state(&mut self) -> Result<bool, StoreError> {
        self.with_system_region(|system| {
            system.read(SYSTEM_PRESETS, PresetSetting::PresetPreserve as usize)
        })
        .map(|value| value == 1)
    }

    /// Restore defaults in every preset
    ///
    /// Presets are written from the highest down to 0, which is left active.
    /// Ends by writing the signature and clearing the preserve flag. Stops at
    /// the first failure; presets already written stay written.
    pub fn factory_reset(&mut self, kind: ResetKind) -> Result<(), StoreError> {
        self.ensure_initialized()?;

        if kind == ResetKind::Full {
            self.medium.clear()?;
        }

        let result = self.reset_presets(kind);
        self.active_preset = 0;
        result?;

        let signature = self.signature;
        self.with_system_region(|system| {
            system.update(SYSTEM_UID, 0, i32::from(signature))?;
            system.update(SYSTEM_PRESETS, PresetSetting::ActivePreset as usize, 0)?;
            system.update(SYSTEM_PRESETS, PresetSetting::PresetPreserve as usize, 0)
        })
    }

    fn reset_presets(&mut self, kind: ResetKind) -> Result<(), StoreError> {
        for preset in (0..self.supported_presets).rev() {
            self.active_preset = preset;
            let base = self.preset_base();
            let mut region = Region::new(&mut self.medium, base);

            for block in self.layout.blocks() {
                region.write_defaults(block, kind)?;
            }

            for custom in self.layout.overrides() {
                let section = self.layout.section(custom.section)?;
                if kind == ResetKind::Partial && section.descriptor.preserve_on_partial_reset {
                    continue;
                }
                region.update(section, custom.index, custom.value)?;
            }
        }

        Ok(())
    }

    /// Signature of the current layout
    pub fn signature(&self) -> u16 {
        self.signature
    }

    /// Whether the persisted signature matches the layout
    pub fn is_signature_valid(&mut self) -> Result<bool, StoreError> {
        let signature = self.signature;
        self.with_system_region(|system| system.read(SYSTEM_UID, 0))
            .map(|stored| stored == i32::from(signature))
    }

    /// Register the preset change hook
    pub fn set_preset_change_handler(&mut self, handler: PresetChangeHandler) {
        self.on_preset_change = Some(handler);
    }

    /// Bytes used by the system region
    pub fn system_usage(&self) -> usize {
        self.layout.system_usage()
    }

    /// Bytes used by one preset
    pub fn preset_usage(&self) -> usize {
        self.layout.preset_usage()
    }

    /// Bytes used by the system region and every supported preset
    pub fn total_usage(&self) -> usize {
        self.system_usage() + usize::from(self.supported_presets) * self.preset_usage()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    /// Give the medium back, e.g. to re-run boot against it
    pub fn into_medium(self) -> M {
        self.medium
    }
}
