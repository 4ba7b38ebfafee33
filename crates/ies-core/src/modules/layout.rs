//! JSON scene description: which luminaires sit where, and the working
//! plane to evaluate.
//!
//! ```json
//! {
//!   "fixtures": [{ "iesFile": "downlight.ies", "position": [2, 2, 3] }],
//!   "grid": { "origin": [0, 0], "width": 4, "length": 4,
//!             "spacingX": 1, "spacingY": 1, "height": 0.8 }
//! }
//! ```

use crate::common::constants::MAX_GRID_POINTS;
use crate::domain::{FixturePose, IesData, IesError, IesErrorCategory, Orientation};
use crate::modules::grid::{CalculationGrid, PlacedFixture};
use crate::parser::read_ies_file;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub fixtures: Vec<FixtureConfig>,
    pub grid: CalculationGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureConfig {
    pub ies_file: PathBuf,
    pub position: [f64; 3],
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to read layout '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse layout '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to load luminaire '{}': {source}", path.display())]
    Ies { path: PathBuf, source: IesError },
    #[error("invalid calculation grid: {0}")]
    InvalidGrid(String),
}

impl LayoutError {
    pub const fn category(&self) -> IesErrorCategory {
        match self {
            Self::Read { .. } => IesErrorCategory::IoSystemError,
            Self::Ies { source, .. } => source.category(),
            Self::Parse { .. } | Self::InvalidGrid(_) => IesErrorCategory::InputValidationError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Read { .. } => "IO.LAYOUT_FILE",
            Self::Parse { .. } => "INPUT.LAYOUT_JSON",
            Self::Ies { source, .. } => source.placeholder(),
            Self::InvalidGrid(_) => "INPUT.LAYOUT_GRID",
        }
    }
}

/// A layout with every referenced luminaire parsed. Files referenced by more
/// than one fixture are parsed once.
#[derive(Debug, Clone)]
pub struct Layout {
    grid: CalculationGrid,
    luminaires: Vec<(PathBuf, IesData)>,
    fixtures: Vec<(usize, FixturePose)>,
}

impl Layout {
    pub fn grid(&self) -> &CalculationGrid {
        &self.grid
    }

    pub fn luminaires(&self) -> impl Iterator<Item = (&Path, &IesData)> {
        self.luminaires
            .iter()
            .map(|(path, data)| (path.as_path(), data))
    }

    pub fn placed_fixtures(&self) -> Vec<PlacedFixture<'_>> {
        self.fixtures
            .iter()
            .filter_map(|(index, pose)| {
                self.luminaires.get(*index).map(|(_, data)| PlacedFixture {
                    data,
                    pose: *pose,
                })
            })
            .collect()
    }
}

pub fn load_layout(path: impl AsRef<Path>) -> Result<Layout, LayoutError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: LayoutConfig =
        serde_json::from_str(&source).map_err(|source| LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    resolve_layout(config, base_dir)
}

/// Parses the luminaires of an already-deserialized layout. Relative
/// `iesFile` paths are joined onto `base_dir`.
pub fn resolve_layout(config: LayoutConfig, base_dir: &Path) -> Result<Layout, LayoutError> {
    validate_grid(&config.grid)?;

    let mut cache = BTreeMap::new();
    let mut luminaires = Vec::new();
    let mut fixtures = Vec::with_capacity(config.fixtures.len());

    for fixture in config.fixtures {
        let resolved = if fixture.ies_file.is_absolute() {
            fixture.ies_file
        } else {
            base_dir.join(fixture.ies_file)
        };

        let index = match cache.get(&resolved) {
            Some(index) => *index,
            None => {
                let data = read_ies_file(&resolved).map_err(|source| LayoutError::Ies {
                    path: resolved.clone(),
                    source,
                })?;
                luminaires.push((resolved.clone(), data));
                cache.insert(resolved, luminaires.len() - 1);
                luminaires.len() - 1
            }
        };
        fixtures.push((
            index,
            FixturePose {
                position: fixture.position,
                orientation: fixture.orientation,
            },
        ));
    }

    tracing::debug!(
        fixtures = fixtures.len(),
        luminaires = luminaires.len(),
        "resolved layout"
    );

    Ok(Layout {
        grid: config.grid,
        luminaires,
        fixtures,
    })
}

fn validate_grid(grid: &CalculationGrid) -> Result<(), LayoutError> {
    let spacings = [("spacingX", grid.spacing_x), ("spacingY", grid.spacing_y)];
    for (name, value) in spacings {
        if !value.is_finite() || value <= 0.0 {
            return Err(LayoutError::InvalidGrid(format!(
                "{name} must be a positive number, found {value}"
            )));
        }
    }
    let extents = [("width", grid.width), ("length", grid.length)];
    for (name, value) in extents {
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::InvalidGrid(format!(
                "{name} must not be negative, found {value}"
            )));
        }
    }
    match grid.point_count() {
        Some(count) if count <= MAX_GRID_POINTS => Ok(()),
        _ => Err(LayoutError::InvalidGrid(format!(
            "{} x {} points exceeds the limit of {MAX_GRID_POINTS}",
            grid.columns(),
            grid.rows()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutError, load_layout};
    use crate::domain::IesErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    const LUMINAIRE: &str = "TILT=NONE
1 -1 1 2 1 1 2 0 0 0
1 1 10
0 90
0
1000 1000
";

    fn write_layout(temp: &TempDir, json: &str) -> std::path::PathBuf {
        let path = temp.path().join("layout.json");
        fs::write(&path, json).expect("layout should be written");
        path
    }

    #[test]
    fn relative_paths_resolve_against_layout_directory_and_are_cached() {
        let temp = TempDir::new().expect("tempdir should be created");
        fs::create_dir(temp.path().join("ies")).expect("subdir should be created");
        fs::write(temp.path().join("ies").join("a.ies"), LUMINAIRE).expect("ies should be written");
        let path = write_layout(
            &temp,
            r#"{
                "fixtures": [
                    {"iesFile": "ies/a.ies", "position": [0, 0, 3]},
                    {"iesFile": "ies/a.ies", "position": [2, 0, 3], "orientation": {"yaw": 45}}
                ],
                "grid": {"origin": [0, 0], "width": 2, "length": 0, "spacingX": 1, "spacingY": 1}
            }"#,
        );

        let layout = load_layout(&path).expect("layout should load");
        assert_eq!(layout.luminaires().count(), 1);

        let placed = layout.placed_fixtures();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].pose.position, [2.0, 0.0, 3.0]);
        assert_eq!(placed[1].pose.orientation.yaw, 45.0);
        assert_eq!(placed[1].pose.orientation.pitch, 0.0);
        assert_eq!(layout.grid().height, 0.0);
        assert_eq!(layout.grid().points().len(), 3);
    }

    #[test]
    fn missing_layout_is_a_read_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = load_layout(temp.path().join("absent.json")).expect_err("should fail");
        assert!(matches!(error, LayoutError::Read { .. }));
        assert_eq!(error.category(), IesErrorCategory::IoSystemError);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = write_layout(&temp, r#"{"fixtures": []"#);
        let error = load_layout(&path).expect_err("should fail");
        assert!(matches!(error, LayoutError::Parse { .. }));
        assert_eq!(error.placeholder(), "INPUT.LAYOUT_JSON");
    }

    #[test]
    fn broken_luminaire_reports_its_path() {
        let temp = TempDir::new().expect("tempdir should be created");
        fs::write(temp.path().join("bad.ies"), "[MANUFAC] Acme\n").expect("ies should be written");
        let path = write_layout(
            &temp,
            r#"{"fixtures": [{"iesFile": "bad.ies", "position": [0, 0, 1]}],
                "grid": {"origin": [0, 0], "width": 1, "length": 1,
                         "spacingX": 1, "spacingY": 1}}"#,
        );

        let error = load_layout(&path).expect_err("should fail");
        let LayoutError::Ies { path: bad, .. } = &error else {
            panic!("expected an IES error, got {error:?}");
        };
        assert!(bad.ends_with("bad.ies"));
        assert_eq!(error.placeholder(), "INPUT.IES_HEADER");
    }

    #[test]
    fn grids_above_the_point_limit_are_rejected() {
        let temp = TempDir::new().expect("tempdir should be created");
        for grid in [
            r#"{"origin": [0, 0], "width": 1e30, "length": 1, "spacingX": 1, "spacingY": 1}"#,
            r#"{"origin": [0, 0], "width": 1e5, "length": 1e5, "spacingX": 1, "spacingY": 1}"#,
        ] {
            let path = write_layout(&temp, &format!(r#"{{"fixtures": [], "grid": {grid}}}"#));
            let error = load_layout(&path).expect_err("oversized grid should fail");
            assert!(matches!(error, LayoutError::InvalidGrid(_)), "{error:?}");
            assert_eq!(error.placeholder(), "INPUT.LAYOUT_GRID");
        }

        let path = write_layout(
            &temp,
            r#"{"fixtures": [],
                "grid": {"origin": [0, 0], "width": 999, "length": 999,
                         "spacingX": 1, "spacingY": 1}}"#,
        );
        let layout = load_layout(&path).expect("limit-sized grid should load");
        assert_eq!(layout.grid().point_count(), Some(1_000_000));
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = write_layout(
            &temp,
            r#"{"fixtures": [],
                "grid": {"origin": [0, 0], "width": 1, "length": 1,
                         "spacingX": 0, "spacingY": 1}}"#,
        );
        let error = load_layout(&path).expect_err("should fail");
        assert!(matches!(error, LayoutError::InvalidGrid(_)));
    }
}
