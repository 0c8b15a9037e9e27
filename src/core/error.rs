use thiserror::Error;

/// Core error types for aclfw
#[derive(Debug, Error)]
pub enum Error {
    /// Address or wildcard mask text is not four octets in 0..=255
    #[error("Malformed address '{input}': {reason}")]
    MalformedAddress { input: String, reason: String },

    /// Rule lookup outside the current ruleset bounds
    #[error("Rule index {index} out of range (ruleset has {len} rules)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Firewall document is missing fields or carries values of the wrong shape
    #[error("Config format error in {field}: {message}")]
    ConfigFormat { field: String, message: String },

    /// Input validation failed
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: impl Into<String>, message: impl ToString) -> Self {
        Self::ConfigFormat {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Short hint shown by the CLI under the error message.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::MalformedAddress { .. } => {
                Some("Addresses and wildcard masks use dotted-decimal form, e.g. 10.0.0.0 0.0.0.255")
            }
            Error::IndexOutOfRange { .. } => Some("Rule indices start at 0"),
            Error::ConfigFormat { .. } | Error::Serialization(_) => Some(
                "Expected a JSON object with \"list\", \"interface_id_list\" and \"flow\" keys",
            ),
            Error::Validation { .. } => None,
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Some("Pass the firewall document path explicitly or place firewall.json in the data directory")
            }
            Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
