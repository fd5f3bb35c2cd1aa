//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ubxgen::prelude::*;
//! ```

// Runtime types
pub use ubxgen_core::error::{Error as CoreError, Result as CoreResult};
pub use ubxgen_core::{DispatchError, Message, Record, RepeatedIter, Repeating};

// Schema types
pub use ubxgen_schema::{
    FieldDef, FieldKind, GroupDef, MessageDef, PrimitiveType, Schema, SchemaError, SchemaIr,
    TypeDescriptor,
};

// Codegen types
pub use ubxgen_codegen::{
    Artifact, Artifacts, CodegenConfig, CodegenError, Generator, IncludeStyle, generate,
    generate_with,
};
