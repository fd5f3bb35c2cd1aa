//! Artifact generation orchestrator.

use crate::config::CodegenConfig;
use crate::error::CodegenError;
use crate::rust::dispatch::ROUTE_FN;
use crate::rust::{DispatchGenerator, RecordGenerator};
use rayon::prelude::*;
use std::fs;
use ubxgen_schema::naming;
use std::path::{Path, PathBuf};
use ubxgen_schema::SchemaIr;

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, relative to the output directory.
    pub file_name: String,
    /// Source text.
    pub contents: String,
}

/// Complete output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// One artifact per group, in schema order.
    pub groups: Vec<Artifact>,
    /// The dispatcher artifact.
    pub dispatcher: Artifact,
}

impl Artifacts {
    /// Iterates over all artifacts, groups first.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.groups.iter().chain(std::iter::once(&self.dispatcher))
    }

    /// Looks up an artifact by file name.
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<&Artifact> {
        self.iter().find(|a| a.file_name == file_name)
    }

    /// Writes every artifact into `dir`, groups first and the dispatcher last.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if `dir` does not exist or a file cannot be
    /// written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        if !dir.is_dir() {
            return Err(CodegenError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory '{}' does not exist", dir.display()),
            )));
        }

        let mut written = Vec::new();
        for artifact in self.iter() {
            let path = dir.join(&artifact.file_name);
            fs::write(&path, &artifact.contents)?;
            tracing::info!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

/// Main code generator.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: &'a CodegenConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given IR.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a CodegenConfig) -> Self {
        Self { ir, config }
    }

    /// Generates the group artifacts and the dispatcher artifact.
    ///
    /// Group artifacts are emitted in parallel and collected in schema order.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the protocol name is not a valid
    /// type name, or a group or hook name clashes with an item of the
    /// dispatcher artifact.
    pub fn generate(&self) -> Result<Artifacts, CodegenError> {
        let protocol = self.config.protocol_name(&self.ir.protocol);
        if !naming::is_type_name(protocol) {
            return Err(CodegenError::generation(format!(
                "protocol name '{}' is not a valid type name",
                protocol
            )));
        }

        let dispatch = DispatchGenerator::new(self.ir, self.config);
        self.check_dispatcher_names(&dispatch)?;

        let records = RecordGenerator::new(self.config, &self.ir.protocol);
        let groups: Vec<Artifact> = self
            .ir
            .groups
            .par_iter()
            .map(|group| Artifact {
                file_name: RecordGenerator::file_name(group),
                contents: records.generate_group(group),
            })
            .collect();

        for artifact in &groups {
            tracing::info!(file = %artifact.file_name, "generated group artifact");
        }

        let dispatcher = Artifact {
            file_name: dispatch.file_name(),
            contents: dispatch.generate(),
        };
        tracing::info!(
            file = %dispatcher.file_name,
            groups = groups.len(),
            messages = self.ir.messages().count(),
            "generated dispatcher artifact"
        );

        Ok(Artifacts { groups, dispatcher })
    }

    /// Group modules share a namespace with the dispatcher items.
    fn check_dispatcher_names(&self, dispatch: &DispatchGenerator<'_>) -> Result<(), CodegenError> {
        let reserved = [dispatch.dispatcher_name(), dispatch.handler_name(), ROUTE_FN];
        for group in &self.ir.groups {
            if reserved.contains(&group.name.as_str()) {
                return Err(CodegenError::generation(format!(
                    "group '{}' clashes with a dispatcher item of the same name",
                    group.name
                )));
            }
        }
        if let Some(msg) = self
            .ir
            .messages()
            .find(|m| m.hook_name == dispatch.error_hook_name())
        {
            return Err(CodegenError::generation(format!(
                "hook of '{}' clashes with the error hook '{}'",
                msg.qualified_name, msg.hook_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubxgen_schema::{FieldDef, GroupDef, MessageDef, PrimitiveType, Schema};

    fn sample_schema() -> Schema {
        let mut schema = Schema::new("UBX");
        for (index, name) in ["NAV", "RXM", "CFG", "MON", "TIM", "ESF"].iter().enumerate() {
            let class_id = u8::try_from(index + 1).expect("small index");
            schema.add_group(
                GroupDef::new(*name, class_id)
                    .with_message(
                        MessageDef::new("A", 0x01)
                            .scalar("x", 0, PrimitiveType::U4)
                            .scalar("y", 1, PrimitiveType::I2),
                    )
                    .with_message(
                        MessageDef::new("B", 0x02)
                            .scalar("n", 0, PrimitiveType::U1)
                            .repeated(vec![FieldDef::scalar("v", 0, PrimitiveType::R4)]),
                    ),
            );
        }
        schema
    }

    #[test]
    fn test_groups_in_schema_order() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let config = CodegenConfig::default();
        let artifacts = Generator::new(&ir, &config).generate().expect("generated");

        let names: Vec<&str> = artifacts.groups.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["NAV.rs", "RXM.rs", "CFG.rs", "MON.rs", "TIM.rs", "ESF.rs"]);
        assert_eq!(artifacts.dispatcher.file_name, "ParseUBX.rs");
        assert_eq!(artifacts.iter().last().map(|a| a.file_name.as_str()), Some("ParseUBX.rs"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let config = CodegenConfig::default();
        let first = Generator::new(&ir, &config).generate().expect("generated");
        let second = Generator::new(&ir, &config).generate().expect("generated");
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_clashing_with_dispatcher() {
        let schema = Schema::new("UBX").with_group(GroupDef::new("ParseUBX", 0x01));
        let ir = SchemaIr::from_schema(&schema).expect("valid schema");
        let config = CodegenConfig::default();
        assert!(matches!(
            Generator::new(&ir, &config).generate(),
            Err(CodegenError::Generation { .. })
        ));
    }

    #[test]
    fn test_invalid_protocol_override() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        for protocol in ["my proto", "1UBX", "", "type"] {
            let config = CodegenConfig::new().protocol(protocol);
            assert!(matches!(
                Generator::new(&ir, &config).generate(),
                Err(CodegenError::Generation { .. })
            ));
        }

        let config = CodegenConfig::new().protocol("GNSS");
        let artifacts = Generator::new(&ir, &config).generate().expect("generated");
        assert_eq!(artifacts.dispatcher.file_name, "ParseGNSS.rs");
    }

    #[test]
    fn test_hook_clashing_with_overridden_error_hook() {
        let schema = Schema::new("UBX")
            .with_group(GroupDef::new("X", 0x01).with_message(MessageDef::new("Yerr", 0x01)));
        let ir = SchemaIr::from_schema(&schema).expect("valid schema");

        let config = CodegenConfig::new().protocol("X_Y");
        assert!(matches!(
            Generator::new(&ir, &config).generate(),
            Err(CodegenError::Generation { .. })
        ));

        let config = CodegenConfig::default();
        assert!(Generator::new(&ir, &config).generate().is_ok());
    }

    #[test]
    fn test_write_to() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let config = CodegenConfig::default();
        let artifacts = Generator::new(&ir, &config).generate().expect("generated");

        let dir = tempfile::tempdir().expect("tempdir");
        let written = artifacts.write_to(dir.path()).expect("written");
        assert_eq!(written.len(), 7);
        assert_eq!(written.last(), Some(&dir.path().join("ParseUBX.rs")));

        let nav = fs::read_to_string(dir.path().join("NAV.rs")).expect("NAV.rs");
        assert_eq!(Some(nav.as_str()), artifacts.get("NAV.rs").map(|a| a.contents.as_str()));
    }

    #[test]
    fn test_write_to_missing_dir() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let config = CodegenConfig::default();
        let artifacts = Generator::new(&ir, &config).generate().expect("generated");

        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing");
        assert!(matches!(artifacts.write_to(&missing), Err(CodegenError::Io(_))));
        assert!(!missing.exists());
    }
}
