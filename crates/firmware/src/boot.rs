//! Configuration boot sequence
//!
//! Brings the configuration database up on the board's EEPROM and applies
//! the persisted settings to the runtime modules:
//!
//! ```text
//! EEPROM -> EepromMedium -> ParameterStore::initialize -> SysConfig::init
//! ```

use crate::board::{self, BOARD_CONFIG, EEPROM_SIZE};
use crate::platform::{EepromInterface, EepromMedium, PlatformError, Result};
use crate::preset;
use deckconf_core::config::{Capabilities, DeviceInfo, Peripherals, SysConfig};
use deckconf_core::database::{BoardConfig, InitOutcome, Layout, ParameterStore, StoreError};

/// Handler type produced by [`init_config`]
pub type BoardConfigHandler<E, P> = SysConfig<EepromMedium<E>, P>;

/// Boot the configuration handler for this board
///
/// # Errors
///
/// Returns `PlatformError::InitializationFailed` if the database cannot be
/// brought up, `PlatformError::InvalidConfig` if the EEPROM is smaller than
/// the board definition requires.
pub fn init_config<E: EepromInterface, P: Peripherals>(
    eeprom: E,
    peripherals: P,
    info: DeviceInfo,
) -> Result<BoardConfigHandler<E, P>> {
    init_config_for(
        &BOARD_CONFIG,
        EEPROM_SIZE,
        board::capabilities(),
        eeprom,
        peripherals,
        info,
    )
}

/// Boot a configuration handler for an explicit board definition
#[cfg_attr(not(any(feature = "defmt", test)), allow(unused_variables))]
pub fn init_config_for<E: EepromInterface, P: Peripherals>(
    board: &BoardConfig,
    eeprom_size: usize,
    capabilities: Capabilities,
    eeprom: E,
    peripherals: P,
    info: DeviceInfo,
) -> Result<BoardConfigHandler<E, P>> {
    let medium = EepromMedium::new(eeprom, eeprom_size)?;

    let layout = Layout::new(board).map_err(|e| {
        crate::log_error!("Invalid database layout: {}", describe(e));
        PlatformError::InitializationFailed
    })?;

    let mut store = ParameterStore::new(medium, layout);
    store.set_preset_change_handler(preset::on_preset_change);

    match store.initialize() {
        Ok(InitOutcome::Restored { preset }) => {
            crate::log_info!("Configuration signature valid, preset {} active", preset);
        }
        Ok(InitOutcome::FactoryReset) => {
            crate::log_warn!("Configuration signature mismatch, factory defaults restored");
        }
        Err(e) => {
            crate::log_error!("Configuration database init failed: {}", describe(e));
            return Err(PlatformError::InitializationFailed);
        }
    }

    crate::log_info!(
        "Database: {} presets, {} bytes each, {} of {} bytes used",
        store.supported_presets(),
        store.preset_usage(),
        store.total_usage(),
        eeprom_size
    );

    let mut config = SysConfig::new(store, peripherals, capabilities, info);
    if config.init().is_err() {
        crate::log_error!("Applying stored MIDI and LED settings failed");
        return Err(PlatformError::InitializationFailed);
    }

    Ok(config)
}

/// Short description of a store error for the log
#[cfg_attr(not(any(feature = "defmt", test)), allow(dead_code))]
fn describe(error: StoreError) -> &'static str {
    match error {
        StoreError::Medium(_) => "storage medium failure",
        StoreError::NotInitialized => "store not initialized",
        StoreError::LayoutTooLarge => "layout larger than EEPROM",
        StoreError::InvalidLayout => "invalid layout",
        StoreError::UnknownSection
        | StoreError::IndexOutOfRange
        | StoreError::ValueOutOfRange
        | StoreError::PresetOutOfRange => "parameter access rejected",
    }
}
