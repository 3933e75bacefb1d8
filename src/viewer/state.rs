//! Application state shared by the browser viewer and the CLI.
//!
//! The circle count lives here explicitly: it is read from the store once at
//! startup and written back every time it changes.

use crate::config::{SurfaceConfig, DEFAULT_COUNT};
use crate::error::Result;
use crate::labels::Labels;
use crate::layout::GridGeometry;
use crate::render::RenderStyle;
use crate::store::CountStore;

/// Current surface, count and derived geometry
#[derive(Debug, Clone)]
pub struct AppState {
    pub surface: SurfaceConfig,
    pub count: u32,
    pub geometry: GridGeometry,
    pub style: RenderStyle,
}

impl AppState {
    /// Initial state. A count from the query string wins over the stored one,
    /// which wins over [`DEFAULT_COUNT`].
    ///
    /// # Errors
    /// Returns an error if the surface cannot be packed.
    pub fn startup(surface: SurfaceConfig, store: &dyn CountStore) -> Result<Self> {
        let count = match surface.count {
            Some(count) => count,
            None => store.load_or(DEFAULT_COUNT),
        };
        let (width, height) = surface.pixel_size();
        let geometry = GridGeometry::compute(f64::from(width), f64::from(height), count)?;
        log::info!("surface {width}x{height}, {count} circles");

        Ok(Self {
            surface,
            count,
            geometry,
            style: RenderStyle::default(),
        })
    }

    /// Change the count, persist it and recompute the geometry.
    ///
    /// A failed write is logged and does not block the update.
    ///
    /// # Errors
    /// Returns an error if the new geometry is invalid; state is unchanged then.
    pub fn set_count(&mut self, count: u32, store: &mut dyn CountStore) -> Result<&GridGeometry> {
        let geometry = GridGeometry::compute(
            self.geometry.surface_width,
            self.geometry.surface_height,
            count,
        )?;

        if let Err(e) = store.save(count) {
            log::warn!("could not persist count {count}: {e}");
        }

        self.count = count;
        self.geometry = geometry;
        Ok(&self.geometry)
    }

    /// Label text for the current state. Titles use the configured size,
    /// the grid label uses the packed geometry.
    pub fn labels(&self) -> Labels {
        Labels::with_packing(
            self.surface.width,
            self.surface.height,
            self.count,
            &self.geometry.packing,
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::MAX_COUNT;
    use crate::error::CircleGridError;
    use crate::store::MemoryStore;

    struct FailingStore;

    impl CountStore for FailingStore {
        fn load(&self) -> Result<Option<u32>> {
            Err(CircleGridError::Store("unavailable".to_string()))
        }

        fn save(&mut self, _count: u32) -> Result<()> {
            Err(CircleGridError::Store("unavailable".to_string()))
        }
    }

    #[test]
    fn startup_uses_default_count() {
        let state = AppState::startup(SurfaceConfig::default(), &MemoryStore::new()).unwrap();
        assert_eq!(state.count, 25);
        assert_eq!(state.geometry.cell_side, 96.0);
    }

    #[test]
    fn startup_prefers_query_then_store() {
        let mut store = MemoryStore::new();
        store.save(9).unwrap();

        let state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
        assert_eq!(state.count, 9);

        let surface = SurfaceConfig::from_query("?n=4&w=100&h=100");
        let state = AppState::startup(surface, &store).unwrap();
        assert_eq!(state.count, 4);
        assert_eq!(state.geometry.cell_side, 50.0);
    }

    #[test]
    fn set_count_writes_store() {
        let mut store = MemoryStore::new();
        let mut state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
        let side = state.set_count(1, &mut store).unwrap().cell_side;
        assert_eq!(side, 480.0);
        assert_eq!(state.count, 1);
        assert_eq!(store.load().unwrap(), Some(1));
        assert_eq!(state.labels().count, "1");
    }

    #[test]
    fn store_failures_do_not_block() {
        let mut store = FailingStore;
        let mut state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
        assert_eq!(state.count, 25);
        assert!(state.set_count(4, &mut store).is_ok());
        assert_eq!(state.count, 4);
    }

    #[test]
    fn labels_show_configured_size() {
        let surface = SurfaceConfig::from_query("?w=640.5");
        let state = AppState::startup(surface, &MemoryStore::new()).unwrap();
        assert_eq!(state.geometry.surface_width, 640.0);

        let labels = state.labels();
        assert_eq!(labels.surface, "Canvas: (640.5x640.5)");
        assert_eq!(labels.aspect, "Aspect ratio: 1.00");
        assert_eq!(labels.grid, "(5x5)");
    }

    #[test]
    fn set_count_above_max_is_rejected() {
        let mut store = MemoryStore::new();
        let mut state = AppState::startup(SurfaceConfig::default(), &store).unwrap();
        let err = state.set_count(MAX_COUNT + 1, &mut store).unwrap_err();
        assert!(matches!(err, CircleGridError::CountTooLarge { .. }));
        assert_eq!(state.count, 25);
        assert_eq!(store.load().unwrap(), None);
    }
}
