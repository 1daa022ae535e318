//! Test helpers shared by the CLI unit and behaviour tests.

use super::*;
use crate::plan::{PlannerBuilder, PlannerSettings};
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use std::sync::Mutex;
use tempfile::TempDir;
use waymark_core::test_support::{StubDistanceMatrixProvider, StubGeocoder};
use waymark_core::{ItineraryPlanner, Planner};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory with a UTF-8 path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn stub_geocoder() -> StubGeocoder {
    StubGeocoder::with_locations([
        ("Station", Coord { x: -0.12, y: 51.50 }),
        ("Museum", Coord { x: -0.17, y: 51.49 }),
        ("Park", Coord { x: -0.16, y: 51.51 }),
        ("Harbour", Coord { x: -0.07, y: 51.50 }),
    ])
}

/// Distances for input order Station, Park, Museum, Harbour; visiting the
/// museum first costs 10 km, the park first 15 km.
pub(super) fn museum_first_distances() -> StubDistanceMatrixProvider {
    StubDistanceMatrixProvider::with_matrix(vec![
        vec![0, 4_000, 2_000, 20_000],
        vec![4_000, 0, 3_000, 5_000],
        vec![2_000, 3_000, 0, 8_000],
        vec![20_000, 5_000, 8_000, 0],
    ])
}

/// Builds stub planners and records the settings it was given.
#[derive(Default)]
pub(super) struct StubPlannerBuilder {
    pub(super) seen: Mutex<Option<PlannerSettings>>,
}

impl PlannerBuilder for StubPlannerBuilder {
    fn build(&self, settings: &PlannerSettings) -> Result<Box<dyn Planner>, CliError> {
        *self.seen.lock().expect("settings lock") = Some(settings.clone());
        Ok(Box::new(
            ItineraryPlanner::new(stub_geocoder(), museum_first_distances())
                .with_config(settings.planner.clone()),
        ))
    }
}
