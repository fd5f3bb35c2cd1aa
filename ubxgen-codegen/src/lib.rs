//! # ubxgen Codegen
//!
//! Rust code generation from UBX message schemas.
//!
//! This crate provides:
//! - One artifact per message group holding packed, wire-compatible records
//! - A dispatcher artifact routing (class ID, message ID) pairs to hooks
//! - Build script integration through [`Artifacts::write_to`]

pub mod config;
pub mod error;
pub mod generator;
pub mod rust;

pub use config::{CodegenConfig, IncludeStyle};
pub use error::CodegenError;
pub use generator::{Artifact, Artifacts, Generator};

use std::path::{Path, PathBuf};
use ubxgen_schema::{Schema, SchemaIr};

/// Generates Rust code from a schema with default settings.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate(schema: &Schema) -> Result<Artifacts, CodegenError> {
    generate_with(schema, &CodegenConfig::default())
}

/// Generates Rust code from a schema.
///
/// # Arguments
/// * `schema` - Schema to generate code for
/// * `config` - Generation settings
///
/// # Returns
/// The group artifacts and the dispatcher artifact.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails. Nothing is
/// generated for an invalid schema.
pub fn generate_with(schema: &Schema, config: &CodegenConfig) -> Result<Artifacts, CodegenError> {
    let ir = SchemaIr::from_schema(schema)?;
    Generator::new(&ir, config).generate()
}

/// Generates Rust code from a schema and writes it into `dir`.
///
/// # Errors
/// Returns `CodegenError` if validation, generation or writing fails.
pub fn generate_into(
    schema: &Schema,
    config: &CodegenConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>, CodegenError> {
    generate_with(schema, config)?.write_to(dir)
}
