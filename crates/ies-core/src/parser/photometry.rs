use super::{ParserState, TILT_MARKER};
use crate::domain::{
    Ballast, CandelaMatrix, IesError, IesResult, LuminaireGeometry, PhotometricType, Photometry,
    UnitsType,
};

const MAIN_LINE_VALUES: usize = 10;
const BALLAST_LINE_VALUES: usize = 3;
const TILT_INCLUDE: &str = "INCLUDE";

/// Reads everything from the `TILT=` line to the end of the candela block.
pub fn parse_photometry(state: &mut ParserState<'_>) -> IesResult<Photometry> {
    let tilt = parse_tilt(state)?;

    let main_line = state.line_number();
    let main = state.required_values(MAIN_LINE_VALUES, "photometric parameter")?;
    let lamp_count = main[0];
    let lumens_per_lamp = main[1];
    let candela_multiplier = main[2];
    let vertical_count = to_count(main[3], main_line, "vertical angle count")?;
    let horizontal_count = to_count(main[4], main_line, "horizontal angle count")?;
    let photometric_type = to_code(main[5], main_line, "photometric type").and_then(|code| {
        PhotometricType::from_code(code).ok_or_else(|| {
            let message = format!("unknown photometric type {code}");
            IesError::invalid_numeric_line(main_line, message)
        })
    })?;
    let units = to_code(main[6], main_line, "units type").and_then(|code| {
        UnitsType::from_code(code).ok_or_else(|| {
            IesError::invalid_numeric_line(main_line, format!("unknown units type {code}"))
        })
    })?;
    let geometry = LuminaireGeometry {
        width: main[7],
        length: main[8],
        height: main[9],
    };

    if candela_multiplier < 0.0 {
        return Err(IesError::invalid_numeric_line(
            main_line,
            format!("candela multiplier must not be negative, found {candela_multiplier}"),
        ));
    }

    let ballast_values = state.required_values(BALLAST_LINE_VALUES, "ballast")?;
    let ballast = Ballast {
        factor: ballast_values[0],
        reserved: ballast_values[1],
        input_watts: ballast_values[2],
    };

    let vertical_start = state.line_number();
    let vertical_angles = state.collect_values(vertical_count, "vertical angles")?;
    ensure_non_decreasing(&vertical_angles, vertical_start, "vertical")?;

    let horizontal_start = state.line_number();
    let horizontal_angles = state.collect_values(horizontal_count, "horizontal angles")?;
    ensure_non_decreasing(&horizontal_angles, horizontal_start, "horizontal")?;

    let mut rows = Vec::new();
    for horizontal in 0..horizontal_count {
        let row_start = state.line_number();
        let raw = state.collect_values(
            vertical_count,
            &format!("candela values for horizontal angle #{}", horizontal + 1),
        )?;
        if let Some(negative) = raw.iter().find(|value| **value < 0.0) {
            return Err(IesError::malformed_photometry(
                row_start,
                format!(
                    "negative candela value {negative} for horizontal angle {}",
                    horizontal_angles[horizontal]
                ),
            ));
        }
        let scaled = raw
            .into_iter()
            .map(|value| value * candela_multiplier)
            .collect::<Vec<_>>();
        if let Some(overflow) = scaled.iter().find(|value| !value.is_finite()) {
            return Err(IesError::malformed_photometry(
                row_start,
                format!(
                    "scaled candela {overflow} is not finite for horizontal angle {}",
                    horizontal_angles[horizontal]
                ),
            ));
        }
        rows.push(scaled);
    }

    let candela = CandelaMatrix::from_rows(rows, vertical_count).ok_or_else(|| {
        IesError::malformed_photometry(state.line_number(), "candela rows have uneven lengths")
    })?;

    tracing::debug!(
        vertical = vertical_count,
        horizontal = horizontal_count,
        multiplier = candela_multiplier,
        "parsed IES photometric block"
    );

    Ok(Photometry {
        tilt,
        lamp_count,
        lumens_per_lamp,
        candela_multiplier,
        photometric_type,
        units,
        geometry,
        ballast,
        vertical_angles,
        horizontal_angles,
        candela,
    })
}

/// Consumes the `TILT=` line. An inline tilt table is stepped over without
/// applying its factors.
fn parse_tilt(state: &mut ParserState<'_>) -> IesResult<String> {
    let line_number = state.line_number();
    let tilt = state
        .next_line()
        .and_then(|line| line.trim().strip_prefix(TILT_MARKER))
        .map(|value| value.trim().to_string())
        .ok_or_else(|| {
            IesError::malformed_header(line_number, format!("expected a '{TILT_MARKER}' line"))
        })?;

    if tilt.eq_ignore_ascii_case(TILT_INCLUDE) {
        state.collect_values(1, "tilt lamp-to-luminaire geometry")?;
        let count_line = state.line_number();
        let pair_count = state.collect_values(1, "tilt pair count")?[0];
        let pair_count = to_count(pair_count, count_line, "tilt pair count")?;
        state.collect_values(pair_count, "tilt angles")?;
        state.collect_values(pair_count, "tilt multiplying factors")?;
        let leftover = state.discard_pending();
        tracing::warn!(
            pairs = pair_count,
            leftover,
            "TILT=INCLUDE table skipped; multiplying factors are not applied"
        );
    }

    Ok(tilt)
}

fn ensure_non_decreasing(angles: &[f64], line: usize, axis: &str) -> IesResult<()> {
    if let Some(pair) = angles.windows(2).find(|pair| pair[1] < pair[0]) {
        return Err(IesError::malformed_photometry(
            line,
            format!(
                "{axis} angles must be non-decreasing, found {} after {}",
                pair[1], pair[0]
            ),
        ));
    }
    Ok(())
}

fn to_count(value: f64, line: usize, field: &str) -> IesResult<usize> {
    let rounded = value.round();
    if (rounded - value).abs() > 1.0e-6 || rounded < 1.0 || rounded > u32::MAX as f64 {
        return Err(IesError::invalid_numeric_line(
            line,
            format!("{field} must be a positive integer, found {value}"),
        ));
    }
    Ok(rounded as usize)
}

fn to_code(value: f64, line: usize, field: &str) -> IesResult<i32> {
    let rounded = value.round();
    if (rounded - value).abs() > 1.0e-6 || rounded < i32::MIN as f64 || rounded > i32::MAX as f64 {
        return Err(IesError::invalid_numeric_line(
            line,
            format!("{field} must be an integer code, found {value}"),
        ));
    }
    Ok(rounded as i32)
}
