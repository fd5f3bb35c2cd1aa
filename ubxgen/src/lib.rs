//! # ubxgen
//!
//! Schema-driven code generator for UBX-style binary message protocols.
//!
//! A schema describes message groups (class IDs), their messages (message
//! IDs) and ordered fields, with at most one trailing repeated region per
//! message. From it ubxgen emits packed, wire-compatible Rust records and a
//! dispatcher that routes a (class ID, message ID) pair to an overridable hook.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ubxgen::prelude::*;
//!
//! let schema = Schema::new("UBX").with_group(
//!     GroupDef::new("NAV", 0x01).with_message(
//!         MessageDef::new("POSLLH", 0x02)
//!             .scalar("lon", 0, PrimitiveType::I4)
//!             .scalar("lat", 1, PrimitiveType::I4),
//!     ),
//! );
//!
//! // In build.rs
//! let config = CodegenConfig::new().include_style(IncludeStyle::OutDir);
//! ubxgen::codegen::generate_into(&schema, &config, out_dir)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime traits and iterator used by generated code
//! - [`schema`] - Schema model, naming and validation
//! - [`codegen`] - Rust code generation from schemas

pub mod prelude;

/// Runtime support for generated code.
pub mod core {
    pub use ubxgen_core::*;
}

/// Schema model and validation.
pub mod schema {
    pub use ubxgen_schema::*;
}

/// Code generation from schemas.
pub mod codegen {
    pub use ubxgen_codegen::*;
}
