#![forbid(unsafe_code)]

use std::fmt;

use heatgrid_core::ConfigError;
use heatgrid_layout::LayoutError;
use heatgrid_text::MeasureError;

/// Top-level error type for heatmap rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Options failed validation; every violation is listed.
    Config(Vec<ConfigError>),
    /// Layout setup or sequencing bug.
    Layout(LayoutError),
    /// The measurement backend failed.
    Measure(MeasureError),
    /// Matrix values or labels do not match the declared shape.
    Matrix(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid options:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            Self::Layout(err) => write!(f, "{err}"),
            Self::Measure(err) => write!(f, "{err}"),
            Self::Matrix(msg) => write!(f, "invalid matrix: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Measure(err) => Some(err),
            Self::Config(_) | Self::Matrix(_) => None,
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<MeasureError> for Error {
    fn from(err: MeasureError) -> Self {
        Self::Measure(err)
    }
}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for heatgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;
