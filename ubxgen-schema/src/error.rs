//! Error types for schema validation.

use thiserror::Error;

/// Error type for schema validation.
///
/// Every variant aborts generation before any artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A scalar field has no ordinal.
    #[error("field '{field}' in '{record}' has no ordinal")]
    MissingOrdinal {
        /// Qualified record name.
        record: String,
        /// Field name.
        field: String,
    },

    /// Two fields of one record share an ordinal.
    #[error("ordinal {ordinal} in '{record}' is used by both '{first}' and '{second}'")]
    DuplicateOrdinal {
        /// Qualified record name.
        record: String,
        /// Shared ordinal.
        ordinal: u32,
        /// First field using the ordinal.
        first: String,
        /// Second field using the ordinal.
        second: String,
    },

    /// Two messages of one group share a message ID.
    #[error("message ID 0x{id:02X} in group '{group}' is used by both '{first}' and '{second}'")]
    DuplicateMessageId {
        /// Group name.
        group: String,
        /// Shared message ID.
        id: u8,
        /// First message using the ID.
        first: String,
        /// Second message using the ID.
        second: String,
    },

    /// Two groups share a class ID.
    #[error("class ID 0x{id:02X} is used by both '{first}' and '{second}'")]
    DuplicateClassId {
        /// Shared class ID.
        id: u8,
        /// First group using the ID.
        first: String,
        /// Second group using the ID.
        second: String,
    },

    /// A message declares more than one repeated region.
    #[error("message '{message}' has {count} repeated regions, at most one is allowed")]
    MultipleRepeated {
        /// Qualified message name.
        message: String,
        /// Number of repeated regions found.
        count: usize,
    },

    /// A repeated region is nested inside another repeated region.
    #[error("repeated region of '{message}' contains a nested repeated region")]
    NestedRepeated {
        /// Qualified message name.
        message: String,
    },

    /// A repeated region has no element fields.
    #[error("repeated region of '{message}' has no fields")]
    EmptyRepeated {
        /// Qualified message name.
        message: String,
    },

    /// A fixed array has length zero.
    #[error("field '{field}' in '{record}' is a zero-length array")]
    ZeroLengthArray {
        /// Qualified record name.
        record: String,
        /// Field name.
        field: String,
    },

    /// A record does not fit in a frame payload.
    #[error("record '{record}' exceeds the maximum size of {max} bytes")]
    RecordTooLarge {
        /// Qualified record name.
        record: String,
        /// Maximum record size in bytes.
        max: usize,
    },

    /// Two entries of one scope share a name.
    #[error("duplicate {kind} name '{name}' in '{scope}'")]
    DuplicateName {
        /// Kind of entry (group, message, field).
        kind: &'static str,
        /// Duplicated name.
        name: String,
        /// Enclosing scope.
        scope: String,
    },

    /// A name cannot be used as an identifier in generated code.
    #[error("invalid {kind} name '{name}'")]
    InvalidIdentifier {
        /// Kind of entry (schema, group, message, field).
        kind: &'static str,
        /// Offending name.
        name: String,
    },
}

impl SchemaError {
    /// Creates a missing ordinal error.
    pub fn missing_ordinal(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingOrdinal {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Creates a duplicate name error.
    pub fn duplicate_name(
        kind: &'static str,
        name: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
            scope: scope.into(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind,
            name: name.into(),
        }
    }
}
