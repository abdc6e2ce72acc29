//! Typed failures raised while converting. Each is wrapped into an `anyhow::Error`
//! by the code raising it; callers that need to react to a specific kind recover it
//! with `downcast_ref`.

use std::fmt;

/// A data problem in the spreadsheet or graph the user can fix: a missing mandatory
/// field, an unrecognised enumerated value, malformed embedded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    pub message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConversionError {}

/// The graph parsed, but does not conform to the shapes of a validation profile.
/// `report` holds the complete textual report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaclValidationError {
    pub profile: String,
    pub report: String,
}

impl fmt::Display for ShaclValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "The graph does not conform to the {} profile:\n{}",
            self.profile, self.report
        )
    }
}

impl std::error::Error for ShaclValidationError {}

/// No known template version marker was found in the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTemplateError {
    pub found: Option<String>,
}

impl fmt::Display for UnknownTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.found {
            Some(found) => write!(
                f,
                "The template version '{}' is not one this converter knows about",
                found
            ),
            None => write!(
                f,
                "The workbook does not carry a recognisable VocExcel template version"
            ),
        }
    }
}

impl std::error::Error for UnknownTemplateError {}

/// The converter was called in a way it cannot honour: wrong file extension,
/// incompatible output options, a template version it will not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UsageError {}

/// Builds an `anyhow::Error` wrapping a [`ConversionError`] from a format string.
#[macro_export]
macro_rules! conversion_error {
    ($($arg:tt)*) => {
        ::anyhow::Error::new($crate::errors::ConversionError::new(format!($($arg)*)))
    };
}

/// Builds an `anyhow::Error` wrapping a [`UsageError`] from a format string.
#[macro_export]
macro_rules! usage_error {
    ($($arg:tt)*) => {
        ::anyhow::Error::new($crate::errors::UsageError::new(format!($($arg)*)))
    };
}

/// Names the kind of a typed error, or "Error" for anything else.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<ConversionError>().is_some() {
        "ConversionError"
    } else if err.downcast_ref::<ShaclValidationError>().is_some() {
        "ShaclValidationError"
    } else if err.downcast_ref::<UnknownTemplateError>().is_some() {
        "UnknownTemplateError"
    } else if err.downcast_ref::<UsageError>().is_some() {
        "ValueError"
    } else {
        "Error"
    }
}
