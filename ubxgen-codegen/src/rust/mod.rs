//! Rust code generation modules.

pub mod comments;
pub mod dispatch;
pub mod records;

pub use dispatch::DispatchGenerator;
pub use records::RecordGenerator;

use std::fmt;

/// Indentation level of emitted code, four spaces per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indent(pub usize);

impl Indent {
    /// Spaces per level.
    pub const WIDTH: usize = 4;

    /// Top level.
    pub const ROOT: Self = Self(0);

    /// Returns the next level in.
    #[must_use]
    pub const fn deeper(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.0 * Self::WIDTH)
    }
}

/// Emits the leading artifact comments: file name, banner and begin marker.
pub(crate) fn file_header(file_name: &str, guard: &str, source: Option<&str>) -> String {
    let mut output = String::new();
    output.push_str(&format!("// File {}\n", file_name));
    if let Some(source) = source {
        output.push_str(&format!(
            "// Generated by ubxgen from schema {}. Do not edit.\n",
            source
        ));
    }
    output.push_str(&format!("// begin {}\n\n", guard));
    output
}

/// Emits the closing marker comment.
pub(crate) fn file_footer(guard: &str) -> String {
    format!("// end {}\n", guard)
}
