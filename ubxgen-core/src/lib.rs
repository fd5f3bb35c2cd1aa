//! # ubxgen Core
//!
//! Runtime types shared by every artifact the ubxgen code generator emits.
//!
//! This crate provides:
//! - [`Record`] for zero-copy views over `#[repr(C, packed)]` wire records
//! - [`Message`] and [`Repeating`] for the identity and trailing-array layout of generated messages
//! - [`RepeatedIter`] for walking the trailing repeated region of a frame
//! - [`DispatchError`], the only failure a generated dispatcher reports

pub mod error;
pub mod record;
pub mod repeated;

pub use error::{DispatchError, Error, Result};
pub use record::{Message, Record, Repeating};
pub use repeated::RepeatedIter;
