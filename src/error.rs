//! Error taxonomy shared by the ledger core and its callers.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by ledger operations.
///
/// Empty rosters and empty dashboard windows are valid results and never
/// produce an error.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Missing or malformed input. `field` uses the wire (camelCase) name.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The backing store failed. Not retried here.
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// The offending field for validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message_and_keeps_field() {
        let error = LedgerError::validation("amount", "amount is required");
        assert_eq!(error.to_string(), "amount is required");
        assert_eq!(error.field(), Some("amount"));
    }

    #[test]
    fn not_found_error_names_entity_and_id() {
        let id = Uuid::nil();
        let error = LedgerError::not_found("chore", id);
        assert_eq!(
            error.to_string(),
            "chore not found: 00000000-0000-0000-0000-000000000000"
        );
        assert!(error.field().is_none());
    }

    #[test]
    fn storage_error_wraps_anyhow() {
        let error: LedgerError = anyhow::anyhow!("disk full").into();
        assert_eq!(error.to_string(), "storage failure: disk full");
    }
}
