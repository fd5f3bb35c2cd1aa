//! Code generation settings.

/// Default path of the runtime crate referenced by generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "::ubxgen_core";

/// How the dispatcher artifact includes the group artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncludeStyle {
    /// `include!("NAV.rs");` resolved next to the dispatcher file.
    #[default]
    Relative,
    /// `include!(concat!(env!("OUT_DIR"), "/NAV.rs"));` for build scripts.
    OutDir,
}

/// Settings shared by every emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    protocol: Option<String>,
    runtime_crate: String,
    include_style: IncludeStyle,
    banner: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CodegenConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol: None,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            include_style: IncludeStyle::Relative,
            banner: true,
        }
    }

    /// Overrides the protocol name used for the dispatcher and its hooks.
    /// Defaults to the schema name.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the path of the runtime crate (e.g. `::ubxgen::core`).
    #[must_use]
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets how group artifacts are included.
    #[must_use]
    pub fn include_style(mut self, style: IncludeStyle) -> Self {
        self.include_style = style;
        self
    }

    /// Enables or disables the generator banner comment.
    #[must_use]
    pub fn banner(mut self, enabled: bool) -> Self {
        self.banner = enabled;
        self
    }

    /// Returns the protocol name, falling back to `schema_name`.
    #[must_use]
    pub fn protocol_name<'a>(&'a self, schema_name: &'a str) -> &'a str {
        self.protocol.as_deref().unwrap_or(schema_name)
    }

    /// Returns the runtime crate path.
    #[must_use]
    pub fn runtime_path(&self) -> &str {
        &self.runtime_crate
    }

    /// Returns the include style.
    #[must_use]
    pub fn includes(&self) -> IncludeStyle {
        self.include_style
    }

    /// Returns true if the banner comment is emitted.
    #[must_use]
    pub fn has_banner(&self) -> bool {
        self.banner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodegenConfig::default();
        assert_eq!(config.protocol_name("UBX"), "UBX");
        assert_eq!(config.runtime_path(), "::ubxgen_core");
        assert_eq!(config.includes(), IncludeStyle::Relative);
        assert!(config.has_banner());
    }

    #[test]
    fn test_builder() {
        let config = CodegenConfig::new()
            .protocol("NMEA")
            .runtime_crate("::ubxgen::core")
            .include_style(IncludeStyle::OutDir)
            .banner(false);

        assert_eq!(config.protocol_name("UBX"), "NMEA");
        assert_eq!(config.runtime_path(), "::ubxgen::core");
        assert_eq!(config.includes(), IncludeStyle::OutDir);
        assert!(!config.has_banner());
    }
}
