use core::fmt;

/// Result alias for `clade`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by clustering, geometry, and rendering primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Vector dimension mismatch.
    DimensionMismatch {
        /// Expected dimension (taken from the first row).
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// A leaf has no corresponding label.
    MissingLabel {
        /// Leaf id without a label.
        id: i64,
    },

    /// Canvas dimensions are zero or do not fit in `u32`.
    InvalidCanvas {
        /// Requested width in pixels.
        width: u64,
        /// Requested height in pixels.
        height: u64,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Malformed tabular input.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// I/O failure (message only, so the error stays `Clone`).
    Io(String),

    /// Drawing backend failure.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::MissingLabel { id } => write!(f, "no label for leaf {id}"),
            Error::InvalidCanvas { width, height } => {
                write!(f, "invalid canvas size {width}x{height}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Parse { line, message } => write!(f, "line {line}: {message}"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_the_offending_values() {
        let err = Error::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");
        assert!(Error::MissingLabel { id: 7 }.to_string().contains('7'));
        assert!(Error::Parse {
            line: 4,
            message: "bad cell".into()
        }
        .to_string()
        .starts_with("line 4"));
    }

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert_eq!(err, Error::Io("no such file".into()));
    }
}
