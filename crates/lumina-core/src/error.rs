use thiserror::Error;

/// Domain errors surfaced by the stores and the session machine.
///
/// Persistence *read* failures are deliberately absent: corrupt or missing
/// stored data is absorbed at hydrate time with a fallback to defaults and
/// never reaches callers.
#[derive(Debug, Error)]
pub enum LuminaError {
    #[error("post '{id}' not found")]
    PostNotFound { id: String },

    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("incorrect password")]
    BadCredentials,

    #[error("storage write failed for key '{key}'")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl LuminaError {
    /// Stable code identifier (`E###`) for machine parsing.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Storage { .. } => "E101",
            Self::PostNotFound { .. } => "E201",
            Self::Validation { .. } => "E202",
            Self::BadCredentials => "E301",
        }
    }

    /// Optional remediation hint that can be surfaced to readers and editors.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Storage { .. } => Some("Check disk space and write permissions on the data dir."),
            Self::PostNotFound { .. } => Some("Check the post ID with `lumina list`."),
            Self::Validation { .. } => None,
            Self::BadCredentials => {
                Some("Pass --password or set LUMINA_ADMIN_PASSWORD to the shared editor secret.")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LuminaError>;
