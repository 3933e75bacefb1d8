//! Startup/change lifecycle of the application state with a file store.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::path::PathBuf;

use circlegrid::config::SurfaceConfig;
use circlegrid::labels::Labels;
use circlegrid::store::{CountStore, FileStore};
use circlegrid::viewer::AppState;

fn temp_state(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "circlegrid-{name}-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn count_survives_restart() {
    let path = temp_state("restart");

    let mut store = FileStore::new(&path);
    let mut state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
    assert_eq!(state.count, 25);
    state.set_count(12, &mut store).unwrap();

    // New session reads what the previous one wrote
    let store = FileStore::new(&path);
    let state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
    assert_eq!(state.count, 12);
    assert_eq!(state.geometry.count, 12);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_state_falls_back_to_default() {
    let path = temp_state("corrupt");
    std::fs::write(&path, r#"{"count": "many"}"#).unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.load().unwrap(), None);
    let state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
    assert_eq!(state.count, 25);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn query_sized_surface() {
    let path = temp_state("query");
    let store = FileStore::new(&path);

    let surface = SurfaceConfig::from_query("?w=100");
    let state = AppState::startup(surface, &store).unwrap();
    assert_eq!(state.geometry.surface_width, 100.0);
    assert_eq!(state.geometry.surface_height, 100.0);
    assert_eq!(state.geometry.cell_side, 20.0);

    assert_eq!(
        state.labels(),
        Labels {
            surface: "Canvas: (100x100)".to_string(),
            aspect: "Aspect ratio: 1.00".to_string(),
            count: "25".to_string(),
            grid: "(5x5)".to_string(),
        }
    );
}

#[test]
fn invalid_change_keeps_previous_state() {
    let path = temp_state("invalid");
    let mut store = FileStore::new(&path);
    let mut state = AppState::startup(SurfaceConfig::default(), &store).unwrap();

    // Corrupt the surface, then try to change the count
    state.geometry.surface_height = 0.0;
    assert!(state.set_count(3, &mut store).is_err());
    assert_eq!(state.count, 25);
    assert_eq!(store.load().unwrap(), None);
}
