use deckconf_core::database::{
    BoardConfig, ButtonDb, DbBlock, EncoderDb, GlobalDb, InitOutcome, Layout, LedDb,
    ParameterStore, RamMedium, ResetKind, StoreError,
};
use deckconf_core::protocol::PresetSetting;
use std::sync::atomic::{AtomicU8, Ordering};

const BOARD: BoardConfig = BoardConfig {
    buttons: 16,
    encoders: 8,
    analog: 8,
    leds: 48,
};

/// System region plus exactly four presets of `BOARD`
type Medium = RamMedium<1560>;

fn boot(medium: Medium, board: &BoardConfig) -> (ParameterStore<Medium>, InitOutcome) {
    let mut store = ParameterStore::new(medium, Layout::new(board).unwrap());
    let outcome = store.initialize().unwrap();
    (store, outcome)
}

fn stored_active_preset(store: &mut ParameterStore<Medium>) -> i32 {
    store
        .with_system_region(|system| system.read(1, PresetSetting::ActivePreset as usize))
        .unwrap()
}

#[test]
fn four_presets_fit() {
    let (store, outcome) = boot(Medium::new(), &BOARD);
    assert_eq!(outcome, InitOutcome::FactoryReset);
    assert_eq!(store.supported_presets(), 4);
    assert_eq!(store.total_usage(), 1560);
}

#[test]
fn preset_bounds() {
    let (mut store, _) = boot(Medium::new(), &BOARD);

    assert_eq!(store.set_preset(4), Err(StoreError::PresetOutOfRange));
    assert_eq!(store.preset(), 0);

    store.set_preset(3).unwrap();
    assert_eq!(store.preset(), 3);
    assert_eq!(stored_active_preset(&mut store), 3);
}

#[test]
fn preset_switch_does_not_touch_payload() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    let writes = store.medium().write_count();

    store.set_preset(2).unwrap();

    // only the active preset byte
    assert_eq!(store.medium().write_count(), writes + 1);
}

#[test]
fn preserved_preset_restored_on_boot() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.set_preset_preserve_state(true).unwrap();
    store.set_preset(2).unwrap();

    let (store, outcome) = boot(store.into_medium(), &BOARD);
    assert_eq!(outcome, InitOutcome::Restored { preset: 2 });
    assert_eq!(store.preset(), 2);
}

#[test]
fn unpreserved_preset_resets_to_zero_on_boot() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.set_preset_preserve_state(false).unwrap();
    store.set_preset(2).unwrap();

    let (mut store, outcome) = boot(store.into_medium(), &BOARD);
    assert_eq!(outcome, InitOutcome::Restored { preset: 0 });
    assert_eq!(store.preset(), 0);
    assert_eq!(stored_active_preset(&mut store), 0);
}

#[test]
fn layout_change_changes_signature() {
    let (store, _) = boot(Medium::new(), &BOARD);
    let grown = BoardConfig {
        buttons: BOARD.buttons + 1,
        ..BOARD
    };
    let other = ParameterStore::new(Medium::new(), Layout::new(&grown).unwrap());
    assert_ne!(store.signature(), other.signature());
}

#[test]
fn schema_upgrade_resets_every_preset() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    for preset in 0..store.supported_presets() {
        store.set_preset(preset).unwrap();
        store.update(ButtonDb::Velocity, 0, 1).unwrap();
        store.update(EncoderDb::PulsesPerStep, 1, 2).unwrap();
    }

    let grown = BoardConfig {
        buttons: BOARD.buttons - 1,
        ..BOARD
    };
    let mut store = ParameterStore::new(store.into_medium(), Layout::new(&grown).unwrap());
    assert_eq!(store.initialize(), Ok(InitOutcome::FactoryReset));
    assert!(store.is_signature_valid().unwrap());
    assert_eq!(store.preset(), 0);

    for preset in (0..store.supported_presets()).rev() {
        store.set_preset(preset).unwrap();
        assert_eq!(store.read(ButtonDb::Velocity, 0).unwrap(), 127);
        assert_eq!(store.read(EncoderDb::PulsesPerStep, 1).unwrap(), 4);
        assert_eq!(store.read(LedDb::ActivationId, 7).unwrap(), 7);
    }
}

#[test]
fn matching_signature_keeps_data() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.update(ButtonDb::MidiId, 3, 99).unwrap();

    let (mut store, outcome) = boot(store.into_medium(), &BOARD);
    assert_eq!(outcome, InitOutcome::Restored { preset: 0 });
    assert_eq!(store.read(ButtonDb::MidiId, 3).unwrap(), 99);
}

#[test]
fn medium_failure_during_update_propagates() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.medium_mut().fail_after_writes(0);

    assert!(matches!(
        store.update(ButtonDb::MidiId, 0, 42),
        Err(StoreError::Medium(_))
    ));
    store.medium_mut().clear_failure();
    assert_eq!(store.read(ButtonDb::MidiId, 0).unwrap(), 0);
}

static ANNOUNCED: AtomicU8 = AtomicU8::new(u8::MAX);

fn announce(preset: u8) {
    ANNOUNCED.store(preset, Ordering::SeqCst);
}

#[test]
fn unpreserved_boot_rewrites_selector_and_announces() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.set_preset(2).unwrap();

    let mut store = ParameterStore::new(store.into_medium(), Layout::new(&BOARD).unwrap());
    store.set_preset_change_handler(announce);
    assert_eq!(store.initialize(), Ok(InitOutcome::Restored { preset: 0 }));
    assert_eq!(ANNOUNCED.load(Ordering::SeqCst), 0);
    assert_eq!(stored_active_preset(&mut store), 0);

    // turning preservation on later must not bring back the old preset
    store.set_preset_preserve_state(true).unwrap();
    let (store, outcome) = boot(store.into_medium(), &BOARD);
    assert_eq!(outcome, InitOutcome::Restored { preset: 0 });
    assert_eq!(store.preset(), 0);
}

#[test]
fn full_reset_restores_defaults_everywhere() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.set_preset(1).unwrap();
    store.update(ButtonDb::Velocity, 2, 5).unwrap();

    store.factory_reset(ResetKind::Full).unwrap();

    assert_eq!(store.preset(), 0);
    store.set_preset(1).unwrap();
    assert_eq!(store.read(ButtonDb::Velocity, 2).unwrap(), 127);
}

#[test]
fn partial_reset_keeps_midi_settings() {
    let (mut store, _) = boot(Medium::new(), &BOARD);
    store.update(GlobalDb::MidiFeatures, 2, 1).unwrap();
    store.update(ButtonDb::Velocity, 2, 5).unwrap();

    store.factory_reset(ResetKind::Partial).unwrap();

    assert_eq!(store.read(GlobalDb::MidiFeatures, 2).unwrap(), 1);
    assert_eq!(store.read(ButtonDb::Velocity, 2).unwrap(), 127);
    assert!(store.is_signature_valid().unwrap());
}

#[test]
fn block_sizes_add_up() {
    let (store, _) = boot(Medium::new(), &BOARD);
    let layout = store.layout();
    let blocks = [
        DbBlock::Global,
        DbBlock::Buttons,
        DbBlock::Encoders,
        DbBlock::Analog,
        DbBlock::Leds,
        DbBlock::Display,
    ];
    let sum: usize = blocks.iter().map(|&block| layout.block(block).size()).sum();
    assert_eq!(sum, store.preset_usage());
    assert_eq!(store.preset_usage(), 389);
}
