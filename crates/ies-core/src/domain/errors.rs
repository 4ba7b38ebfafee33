use std::path::PathBuf;

pub type IesResult<T> = Result<T, IesError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IesErrorCategory {
    InputValidationError,
    IoSystemError,
}

impl IesErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
        }
    }
}

/// Failure raised while reading or writing an LM-63 document.
///
/// Parse failures always abort the whole parse; no partial record is
/// returned alongside them. `line` is 1-based and refers to the physical
/// line of the source text where the problem was detected.
#[derive(Debug, thiserror::Error)]
pub enum IesError {
    #[error("line {line}: {message}")]
    MalformedHeader { line: usize, message: String },
    #[error("line {line}: {message}")]
    MalformedPhotometry { line: usize, message: String },
    #[error("line {line}: {message}")]
    InvalidNumericLine { line: usize, message: String },
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl IesError {
    pub fn malformed_header(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    pub fn malformed_photometry(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedPhotometry {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_numeric_line(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidNumericLine {
            line,
            message: message.into(),
        }
    }

    pub const fn category(&self) -> IesErrorCategory {
        match self {
            Self::MalformedHeader { .. }
            | Self::MalformedPhotometry { .. }
            | Self::InvalidNumericLine { .. } => IesErrorCategory::InputValidationError,
            Self::Io { .. } => IesErrorCategory::IoSystemError,
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::MalformedHeader { .. } => "INPUT.IES_HEADER",
            Self::MalformedPhotometry { .. } => "INPUT.IES_PHOTOMETRY",
            Self::InvalidNumericLine { .. } => "INPUT.IES_NUMERIC_LINE",
            Self::Io { .. } => "IO.IES_FILE",
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::{IesError, IesErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        assert_eq!(IesErrorCategory::InputValidationError.exit_code(), 2);
        assert_eq!(IesErrorCategory::IoSystemError.exit_code(), 3);
        assert_eq!(
            IesErrorCategory::InputValidationError.as_str(),
            "InputValidationError"
        );
    }

    #[test]
    fn parse_errors_render_diagnostic_lines() {
        let error = IesError::malformed_photometry(14, "expected 3 candela rows, found 2");

        assert_eq!(error.category(), IesErrorCategory::InputValidationError);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.IES_PHOTOMETRY] line 14: expected 3 candela rows, found 2"
        );
    }

    #[test]
    fn io_errors_map_to_io_category() {
        let error = IesError::Io {
            path: "missing.ies".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(error.category(), IesErrorCategory::IoSystemError);
        assert_eq!(error.placeholder(), "IO.IES_FILE");
        assert_eq!(error.exit_code(), 3);
    }
}
