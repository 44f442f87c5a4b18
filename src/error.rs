// ─── Error ──────────────────────────────────────────────────────────────────
use crate::types::TypeTag;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyError {
    /// Reserving buffer or array storage failed. Record boxes are allocated
    /// infallibly and abort on exhaustion like any other `Box::new`.
    #[error("Allocation of {bytes} bytes of buffer storage failed")]
    AllocationFailed { bytes: usize },
    #[error("Unknown type tag: {0}")]
    UnknownTypeTag(TypeTag),
    #[error("Tag mismatch: expected {expected}, got {found}")]
    TagMismatch { expected: TypeTag, found: TypeTag },
    #[error("Chain exceeds the {limit}-record limit")]
    ChainTooLong { limit: usize },
    #[error("Records nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_message_names_buffer_storage() {
        let err = CopyError::AllocationFailed { bytes: 64 };
        assert_eq!(err.to_string(), "Allocation of 64 bytes of buffer storage failed");
    }

    #[test]
    fn test_tag_messages_use_display() {
        let err = CopyError::UnknownTypeTag(TypeTag::new(7));
        assert_eq!(err.to_string(), "Unknown type tag: tag#7");
    }
}
