mod header;
mod photometry;
mod tokenizer;

pub use header::parse_header;
pub use photometry::parse_photometry;
pub use tokenizer::tokenize_numeric_line;

pub(crate) use header::{HeaderField, TILT_MARKER};

use crate::domain::{IesData, IesError, IesResult};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// Line cursor shared by the parsing stages of a single parse call.
///
/// `pending` holds numeric values read past the end of the previous angle or
/// candela block; they are consumed before the next physical line.
#[derive(Debug)]
pub struct ParserState<'a> {
    lines: Vec<&'a str>,
    index: usize,
    pending: VecDeque<f64>,
}

impl<'a> ParserState<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
            index: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number of the line the cursor points at.
    pub fn line_number(&self) -> usize {
        self.index + 1
    }

    pub fn seek(&mut self, index: usize) {
        self.index = index;
        self.pending.clear();
    }

    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.index).copied()?;
        self.index += 1;
        Some(line)
    }

    pub(crate) fn discard_pending(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }

    /// Reads the next non-blank line and requires at least `minimum` numeric
    /// values on it.
    pub(crate) fn required_values(&mut self, minimum: usize, what: &str) -> IesResult<Vec<f64>> {
        loop {
            let line_number = self.line_number();
            let Some(line) = self.next_line() else {
                return Err(IesError::malformed_photometry(
                    line_number,
                    format!("reached end of file before the {what} line"),
                ));
            };
            if line.trim().is_empty() {
                continue;
            }

            let values = tokenize_numeric_line(line);
            if values.len() < minimum {
                return Err(IesError::invalid_numeric_line(
                    line_number,
                    format!(
                        "{what} line needs {minimum} numeric values, found {}",
                        values.len()
                    ),
                ));
            }
            return Ok(values);
        }
    }

    /// Collects exactly `count` values across as many lines as needed.
    ///
    /// `count` comes from the file itself, so the buffer grows with the
    /// values actually read instead of being reserved up front.
    pub(crate) fn collect_values(&mut self, count: usize, what: &str) -> IesResult<Vec<f64>> {
        let mut values = Vec::new();
        while values.len() < count {
            if let Some(value) = self.pending.pop_front() {
                values.push(value);
                continue;
            }

            let Some(line) = self.next_line() else {
                return Err(IesError::malformed_photometry(
                    self.line_number(),
                    format!(
                        "reached end of file after {} of {count} {what}",
                        values.len()
                    ),
                ));
            };
            self.pending.extend(tokenize_numeric_line(line));
        }
        Ok(values)
    }
}

/// Parses a complete LM-63 document.
pub fn parse_ies(source: &str) -> IesResult<IesData> {
    let normalized = normalize_line_endings(source);
    let mut state = ParserState::new(&normalized);

    let (header, tilt_index) = parse_header(state.lines(), 0)?;
    tracing::debug!(
        manufacturer = %header.manufacturer,
        keywords = header.keywords.len(),
        "parsed IES header"
    );
    state.seek(tilt_index);

    let photometry = parse_photometry(&mut state)?;
    Ok(IesData::new(header, photometry))
}

/// Parses raw file bytes. Bytes that are not valid UTF-8 are decoded as
/// Latin-1, which is how most legacy LM-63 writers encode header text.
pub fn parse_ies_bytes(bytes: &[u8]) -> IesResult<IesData> {
    match std::str::from_utf8(bytes) {
        Ok(source) => parse_ies(source),
        Err(_) => {
            let source = bytes.iter().map(|byte| *byte as char).collect::<String>();
            parse_ies(&source)
        }
    }
}

pub fn read_ies_file(path: impl AsRef<Path>) -> IesResult<IesData> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| IesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ies_bytes(&bytes)
}

fn normalize_line_endings(source: &str) -> String {
    source
        .strip_prefix('\u{feff}')
        .unwrap_or(source)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
