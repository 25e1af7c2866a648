/// Everything that can stop a probe from producing a regular report.
///
/// The variant only shows up in the message text and the logs; each probe collapses it into a
/// single [crate::ServiceState] at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("cannot reach {target}: {reason}")]
    Unreachable { target: String, reason: String },
    #[error("cannot parse {field}: {reason}")]
    Parse { field: String, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
}

impl CheckError {
    pub fn unreachable(target: impl Into<String>, reason: impl ToString) -> Self {
        CheckError::Unreachable {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(field: impl Into<String>, reason: impl ToString) -> Self {
        CheckError::Parse {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for an element that is absent from the fetched document.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::parse(field, "not found")
    }
}
