//! Crate-level error type.
//!
//! Parsing and document generation keep their own error enums
//! ([`ParseError`], [`ReportError`]). The library entry points wrap them in
//! [`MlbomDocError`] together with a description of the step that failed.

use crate::parsers::ParseError;
use crate::reports::ReportError;
use thiserror::Error;

/// Error returned by the library entry points
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MlbomDocError {
    /// The input could not be read as an MLBOM
    #[error("Failed to parse MLBOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// The document could not be assembled or published
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportError,
    },
}

/// Result alias for the library entry points
pub type Result<T> = std::result::Result<T, MlbomDocError>;

impl MlbomDocError {
    /// Description of the failed step, outermost first
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::Parse { context, .. } | Self::Report { context, .. } => context,
        }
    }

    fn within(self, outer: &str) -> Self {
        let join = |inner: String| {
            if inner.is_empty() {
                outer.to_string()
            } else {
                format!("{outer}: {inner}")
            }
        };
        match self {
            Self::Parse { context, source } => Self::Parse {
                context: join(context),
                source,
            },
            Self::Report { context, source } => Self::Report {
                context: join(context),
                source,
            },
        }
    }
}

impl From<ParseError> for MlbomDocError {
    fn from(source: ParseError) -> Self {
        Self::Parse {
            context: String::new(),
            source,
        }
    }
}

impl From<ReportError> for MlbomDocError {
    fn from(source: ReportError) -> Self {
        Self::Report {
            context: String::new(),
            source,
        }
    }
}

/// Attach a step description to a layer error on its way out.
///
/// ```ignore
/// use mlbom_doc::error::ErrorContext;
///
/// let mlbom = parse_mlbom(path).with_context(|| format!("reading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// The closure only runs on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MlbomDocError>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|err| err.into().within(&f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: MlbomDocError = ParseError::UnknownFormat("?".into()).into();
        let err = err.within("at model.json");
        let display = err.to_string();
        assert!(display.contains("MLBOM"), "{display}");
        assert!(display.contains("model.json"), "{display}");
    }

    #[test]
    fn test_context_chaining() {
        let inner: Result<()> = Err::<(), ParseError>(ParseError::MissingField("spdxVersion".into()))
            .with_context(|| "initial context");

        let err = inner.with_context(|| "outer context").unwrap_err();
        assert!(matches!(err, MlbomDocError::Parse { .. }));
        assert_eq!(err.context(), "outer context: initial context");
    }

    #[test]
    fn test_layer_errors_convert() {
        let parse: std::result::Result<(), ParseError> = Err(ParseError::JsonError("eof".into()));
        let err = parse.with_context(|| "reading input").unwrap_err();
        assert!(matches!(err, MlbomDocError::Parse { ref context, .. } if context == "reading input"));

        let report: std::result::Result<(), ReportError> =
            Err(ReportError::ConfigError("no destination".into()));
        let err = report.with_context(|| "publishing").unwrap_err();
        assert!(matches!(err, MlbomDocError::Report { .. }));
        assert_eq!(err.context(), "publishing");
    }
}
