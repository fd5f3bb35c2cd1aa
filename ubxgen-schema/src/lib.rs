//! # ubxgen Schema
//!
//! Schema model for UBX-style binary message protocols.
//!
//! This crate provides:
//! - Definitions for groups, messages and fields
//! - Name resolution for generated code
//! - Schema validation
//! - Intermediate representation for code generation

pub mod error;
pub mod ir;
pub mod messages;
pub mod naming;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use ir::{ResolvedField, ResolvedGroup, ResolvedMessage, ResolvedRepeated, SchemaIr};
pub use messages::{FieldDef, FieldKind, GroupDef, MessageDef};
pub use types::{PrimitiveType, Schema, TypeDescriptor};
pub use validation::{MAX_RECORD_SIZE, validate_schema};
