use crate::common::constants::VALUES_PER_LINE;
use crate::domain::{IesData, IesError, IesResult};
use crate::parser::{HeaderField, TILT_MARKER};
use std::fmt::Display;
use std::fs;
use std::path::Path;

const TILT_NONE: &str = "NONE";
const TILT_INCLUDE: &str = "INCLUDE";

/// Renders `data` as an LM-63 document.
///
/// Candela values are written unscaled, so the recorded multiplier is
/// applied exactly once when the output is parsed again.
pub fn write_ies(data: &IesData) -> String {
    let header = data.header();
    let photometry = data.photometry();
    let mut lines = Vec::new();

    if let Some(version) = &header.version {
        lines.push(version.clone());
    }
    for field in HeaderField::ALL {
        let value = field.value(header);
        let repeated = header
            .keywords
            .iter()
            .any(|keyword| HeaderField::from_keyword(&keyword.name) == Some(field));
        if !value.is_empty() || repeated {
            lines.push(bracket_line(field.tag(), value));
        }
    }
    for keyword in &header.keywords {
        lines.push(bracket_line(&keyword.name, &keyword.value));
    }

    // Tilt tables are not retained, so an INCLUDE block cannot be reproduced.
    let tilt = if photometry.tilt.eq_ignore_ascii_case(TILT_INCLUDE) || photometry.tilt.is_empty() {
        TILT_NONE
    } else {
        photometry.tilt.as_str()
    };
    lines.push(format!("{TILT_MARKER}{tilt}"));

    lines.push(join_values(&[
        photometry.lamp_count,
        photometry.lumens_per_lamp,
        photometry.candela_multiplier,
    ]) + &format!(
        " {} {} {} {} {}",
        photometry.vertical_angles.len(),
        photometry.horizontal_angles.len(),
        photometry.photometric_type.code(),
        photometry.units.code(),
        join_values(&[
            photometry.geometry.width,
            photometry.geometry.length,
            photometry.geometry.height,
        ])
    ));
    lines.push(join_values(&[
        photometry.ballast.factor,
        photometry.ballast.reserved,
        photometry.ballast.input_watts,
    ]));

    push_wrapped(&mut lines, &photometry.vertical_angles);
    push_wrapped(&mut lines, &photometry.horizontal_angles);
    let multiplier = photometry.candela_multiplier;
    for row in photometry.candela.rows() {
        let raw = row
            .iter()
            .map(|value| if multiplier == 0.0 { 0.0 } else { value / multiplier })
            .collect::<Vec<_>>();
        push_wrapped(&mut lines, &raw);
    }

    let mut document = lines.join("\n");
    document.push('\n');
    document
}

pub fn write_ies_file(path: impl AsRef<Path>, data: &IesData) -> IesResult<()> {
    let path = path.as_ref();
    fs::write(path, normalize_text_artifact(&write_ies(data))).map_err(|source| IesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote IES document");
    Ok(())
}

fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

fn bracket_line(tag: &str, value: &str) -> String {
    if value.is_empty() {
        format!("[{tag}]")
    } else {
        format!("[{tag}] {value}")
    }
}

fn join_values<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_wrapped(lines: &mut Vec<String>, values: &[f64]) {
    lines.extend(values.chunks(VALUES_PER_LINE).map(join_values));
}

#[cfg(test)]
mod tests {
    use super::{normalize_text_artifact, write_ies, write_ies_file};
    use crate::domain::{BallastUpdate, Header, HeaderKeyword};
    use crate::parser::{parse_ies, read_ies_file};
    use tempfile::TempDir;

    const SOURCE: &str = "IESNA:LM-63-2002
[TEST] LAB-7
[MANUFAC] Acme
[LUMCAT] AC-1
TILT=NONE
1 -1 2 12 2 1 2 0.1 0.2 0.05
1 1 18
0 5 10 15 20 25 30 35 40 45
60 90
0 90
500 490 470 440 400 350 300 250 200 150
60 0
500 480 450 420 380 330 280 230 180 120
50 0
";

    #[test]
    fn output_wraps_blocks_and_removes_the_multiplier() {
        let data = parse_ies(SOURCE).expect("source should parse");
        let output = write_ies(&data);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "IESNA:LM-63-2002");
        assert_eq!(lines[1], "[MANUFAC] Acme");
        assert_eq!(lines[2], "[LUMCAT] AC-1");
        assert_eq!(lines[3], "[TEST] LAB-7");
        assert_eq!(lines[4], "TILT=NONE");
        assert_eq!(lines[5], "1 -1 2 12 2 1 2 0.1 0.2 0.05");
        assert_eq!(lines[6], "1 1 18");
        assert_eq!(lines[7], "0 5 10 15 20 25 30 35 40 45");
        assert_eq!(lines[8], "60 90");
        assert_eq!(lines[9], "0 90");
        assert_eq!(lines[10], "500 490 470 440 400 350 300 250 200 150");
        assert_eq!(lines[11], "60 0");
        assert!(output.ends_with("50 0\n"));
    }

    #[test]
    fn parsing_the_output_reproduces_the_record() {
        let data = parse_ies(SOURCE).expect("source should parse");
        let reparsed = parse_ies(&write_ies(&data)).expect("output should parse");

        assert_eq!(reparsed.header(), data.header());
        let (before, after) = (data.photometry(), reparsed.photometry());
        assert_eq!(after.vertical_angles, before.vertical_angles);
        assert_eq!(after.horizontal_angles, before.horizontal_angles);
        for (left, right) in before.candela.values().iter().zip(after.candela.values()) {
            assert!((left - right).abs() < 1.0e-9);
        }
        assert_eq!(after.candela_multiplier, 2.0);
    }

    #[test]
    fn header_updates_survive_export() {
        let data = parse_ies(SOURCE).expect("source should parse");
        let header = Header {
            lamp: "LED".to_string(),
            keywords: vec![
                HeaderKeyword::new("LAMP", "spare"),
                HeaderKeyword::new("OTHER", "x"),
            ],
            ..data.header().clone()
        };
        let updated = data.with_header(header).with_ballast(BallastUpdate {
            factor: 0.9,
            input_watts: 25.0,
            description: "Driver X".to_string(),
        });

        let reparsed = parse_ies(&write_ies(&updated)).expect("output should parse");
        assert_eq!(reparsed.header(), updated.header());
        assert_eq!(reparsed.photometry().ballast.input_watts, 25.0);
        assert_eq!(reparsed.photometry().ballast.factor, 0.9);
    }

    #[test]
    fn empty_first_occurrence_of_a_repeated_tag_is_kept() {
        let source = "[LAMP]\n[LAMP] second\nTILT=NONE\n1 1000 1 1 1 1 2 0 0 0\n1 1 1\n0\n0\n10\n";
        let data = parse_ies(source).expect("source should parse");
        assert_eq!(data.header().lamp, "");

        let reparsed = parse_ies(&write_ies(&data)).expect("output should parse");
        assert_eq!(reparsed.header(), data.header());
    }

    #[test]
    fn include_tilt_is_written_as_none() {
        let data = parse_ies("TILT=INCLUDE\n1\n1\n0\n1\n1 1000 1 1 1 1 2 0 0 0\n1 1 1\n0\n0\n10\n")
            .expect("source should parse");
        let output = write_ies(&data);
        assert!(output.starts_with("TILT=NONE\n"));
        assert_eq!(parse_ies(&output).expect("output should parse").photometry().tilt, "NONE");
    }

    #[test]
    fn zero_multiplier_writes_zero_candela() {
        let data = parse_ies("TILT=NONE\n1 1000 0 2 1 1 2 0 0 0\n1 1 1\n0 90\n0\n10 5\n")
            .expect("source should parse");
        assert!(write_ies(&data).ends_with("0 0\n"));
    }

    #[test]
    fn file_writes_are_repeatable() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("export.ies");
        let data = parse_ies(SOURCE).expect("source should parse");

        write_ies_file(&path, &data).expect("first write should succeed");
        let first = std::fs::read(&path).expect("export should be readable");
        write_ies_file(&path, &data).expect("second write should succeed");
        let second = std::fs::read(&path).expect("export should be readable");

        assert_eq!(first, second);
        assert_eq!(read_ies_file(&path).expect("export should parse").header(), data.header());
        assert_eq!(normalize_text_artifact("a\r\nb"), "a\nb\n");
    }

    #[test]
    fn unwritable_paths_are_io_errors() {
        let temp = TempDir::new().expect("tempdir should be created");
        let data = parse_ies(SOURCE).expect("source should parse");
        let error = write_ies_file(temp.path().join("missing").join("out.ies"), &data)
            .expect_err("missing directory should fail");
        assert_eq!(error.placeholder(), "IO.IES_FILE");
    }
}
