#![forbid(unsafe_code)]

//! Error types.

use std::fmt;

/// A drawing surface could not be used for the particle field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host could not provide a drawing context at all.
    Unavailable(&'static str),
    /// The surface has zero area.
    Degenerate { width: u32, height: u32 },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(what) => write!(f, "drawing surface unavailable: {what}"),
            Self::Degenerate { width, height } => {
                write!(f, "drawing surface has zero area ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A string that is not a supported CSS color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid CSS color: {:?}", self.input)
    }
}

impl std::error::Error for ColorParseError {}

/// Page configuration could not be parsed or failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The JSON document was malformed or had the wrong shape.
    Parse(String),
    /// A field holds a value outside its allowed range.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
