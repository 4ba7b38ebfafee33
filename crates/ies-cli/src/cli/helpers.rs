use ies_core::{IesData, IlluminanceGrid, PhotometricType, UnitsType};
use std::path::Path;

/// Parses `x,y,z` into a point. Whitespace around components is ignored.
pub(super) fn parse_vector(raw: &str) -> Result<[f64; 3], String> {
    let components = raw
        .split(',')
        .map(|component| {
            component
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{component}' is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match components.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!(
            "expected three comma-separated values, found {}",
            components.len()
        )),
    }
}

pub(super) fn render_summary(path: &Path, data: &IesData) -> String {
    let header = data.header();
    let photometry = data.photometry();
    let derived = data.derived();

    let mut lines = vec![format!("File: {}", path.display())];
    if let Some(version) = &header.version {
        lines.push(format!("Version: {version}"));
    }
    for (label, value) in [
        ("Manufacturer", &header.manufacturer),
        ("Catalog number", &header.catalog_number),
        ("Luminaire", &header.luminaire),
        ("Lamp", &header.lamp),
    ] {
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }
    for keyword in &header.keywords {
        lines.push(format!("Keyword {keyword}"));
    }

    lines.push(format!(
        "Photometry: type {} in {}, {} vertical x {} horizontal angles",
        photometric_type_label(photometry.photometric_type),
        units_label(photometry.units),
        photometry.vertical_angles.len(),
        photometry.horizontal_angles.len()
    ));
    lines.push(format!("Total lumens: {:.1}", derived.total_lumens));
    lines.push(format!("Efficacy: {:.1} lm/W", derived.efficacy));
    lines.push(format!(
        "Candela: max {:.1}, mean {:.1}",
        derived.max_candela, derived.mean_candela
    ));
    lines.push(format!(
        "Beam angle: {:.1} deg, field angle: {:.1} deg",
        derived.beam_angle, derived.field_angle
    ));
    lines.push(format!(
        "Downward: {:.1}%, upward: {:.1}%",
        derived.downward_ratio * 100.0,
        derived.upward_ratio * 100.0
    ));
    lines.join("\n")
}

pub(super) fn render_grid_summary(grid: &IlluminanceGrid) -> String {
    [
        format!(
            "Grid: {} x {} ({} points)",
            grid.columns,
            grid.rows,
            grid.points.len()
        ),
        format!("Min: {:.2} lx", grid.min),
        format!("Max: {:.2} lx", grid.max),
        format!("Average: {:.2} lx", grid.average),
        format!("Uniformity (min/avg): {:.3}", grid.uniformity),
    ]
    .join("\n")
}

fn photometric_type_label(kind: PhotometricType) -> &'static str {
    match kind {
        PhotometricType::A => "A",
        PhotometricType::B => "B",
        PhotometricType::C => "C",
    }
}

fn units_label(units: UnitsType) -> &'static str {
    match units {
        UnitsType::Feet => "feet",
        UnitsType::Meters => "meters",
    }
}
