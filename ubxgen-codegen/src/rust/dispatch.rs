//! Dispatcher code generation.
//!
//! The dispatcher artifact pulls in every group artifact and defines three
//! items: a handler trait with one default no-op hook per message plus a
//! shared error hook, a `route` function that maps a (class ID, message ID)
//! pair to its hook through two nested `match`es, and a dispatcher struct over
//! a borrowed frame buffer.

use super::{Indent, file_footer, file_header};
use crate::config::{CodegenConfig, IncludeStyle};
use ubxgen_schema::ir::{ResolvedGroup, ResolvedMessage, SchemaIr};
use ubxgen_schema::naming::{
    dispatcher_name, error_hook_name, format_id, guard_token, handler_trait_name,
};

/// Name of the generated free routing function.
pub const ROUTE_FN: &str = "route";

/// Generator for the dispatcher artifact.
pub struct DispatchGenerator<'a> {
    ir: &'a SchemaIr,
    config: &'a CodegenConfig,
    dispatcher: String,
    handler: String,
    error_hook: String,
}

impl<'a> DispatchGenerator<'a> {
    /// Creates a new dispatch generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, config: &'a CodegenConfig) -> Self {
        let protocol = config.protocol_name(&ir.protocol);
        Self {
            ir,
            config,
            dispatcher: dispatcher_name(protocol),
            handler: handler_trait_name(protocol),
            error_hook: error_hook_name(protocol),
        }
    }

    /// Returns the dispatcher type name.
    #[must_use]
    pub fn dispatcher_name(&self) -> &str {
        &self.dispatcher
    }

    /// Returns the handler trait name.
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler
    }

    /// Returns the shared error hook name.
    #[must_use]
    pub fn error_hook_name(&self) -> &str {
        &self.error_hook
    }

    /// Returns the artifact file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.dispatcher)
    }

    /// Generates the complete dispatcher artifact.
    #[must_use]
    pub fn generate(&self) -> String {
        let guard = guard_token(&self.dispatcher);
        let banner = self.config.has_banner().then_some(self.ir.protocol.as_str());
        let mut output = file_header(&self.file_name(), &guard, banner);

        output.push_str(&self.generate_includes());
        output.push_str(&self.generate_handler_trait());
        output.push('\n');
        output.push_str(&self.generate_route());
        output.push('\n');
        output.push_str(&self.generate_dispatcher());
        output.push('\n');
        output.push_str(&file_footer(&guard));
        output
    }

    fn generate_includes(&self) -> String {
        let mut output = String::new();
        for group in &self.ir.groups {
            let file = format!("{}.rs", group.name);
            match self.config.includes() {
                IncludeStyle::Relative => {
                    output.push_str(&format!("include!(\"{}\");\n", file));
                }
                IncludeStyle::OutDir => {
                    output.push_str(&format!(
                        "include!(concat!(env!(\"OUT_DIR\"), \"/{}\"));\n",
                        file
                    ));
                }
            }
        }
        if !self.ir.groups.is_empty() {
            output.push('\n');
        }
        output
    }

    /// Generates the handler trait.
    fn generate_handler_trait(&self) -> String {
        let mut output = String::new();
        let body = Indent::ROOT.deeper();
        let runtime = self.config.runtime_path();

        output.push_str(&format!(
            "/// Hooks called by [`{}`]. Every hook defaults to a no-op; implement\n",
            self.dispatcher
        ));
        output.push_str("/// the ones of interest.\n");
        output.push_str("#[allow(non_snake_case, unused_variables)]\n");
        output.push_str(&format!("pub trait {} {{\n", self.handler));

        for msg in self.ir.messages() {
            output.push_str(&format!(
                "{}/// Message {} (class 0x{}, id 0x{}).\n",
                body,
                msg.display_name(),
                format_id(msg.class_id),
                format_id(msg.message_id)
            ));
            match &msg.repeated {
                Some(repeated) => {
                    output.push_str(&format!(
                        "{}fn {}(\n{}&mut self,\n{}msg: &{}::{},\n{}items: {}::RepeatedIter<'_, {}::{}>,\n{}) {{\n{}}}\n\n",
                        body,
                        msg.hook_name,
                        body.deeper(),
                        body.deeper(),
                        msg.group_name,
                        msg.type_name,
                        body.deeper(),
                        runtime,
                        msg.group_name,
                        repeated.type_name,
                        body,
                        body
                    ));
                }
                None => {
                    output.push_str(&format!(
                        "{}fn {}(&mut self, msg: &{}::{}) {{}}\n\n",
                        body, msg.hook_name, msg.group_name, msg.type_name
                    ));
                }
            }
        }

        output.push_str(&format!(
            "{}/// Called once for every (class ID, message ID) pair without a record.\n",
            body
        ));
        output.push_str(&format!("{}fn {}(\n", body, self.error_hook));
        for param in [
            "&mut self".to_string(),
            "class_id: u8".to_string(),
            "message_id: u8".to_string(),
            "len: usize".to_string(),
            "buf: &[u8]".to_string(),
            format!("err: {}::DispatchError", runtime),
        ] {
            output.push_str(&format!("{}{},\n", body.deeper(), param));
        }
        output.push_str(&format!("{}) {{\n{}}}\n", body, body));
        output.push_str("}\n");
        output
    }

    /// Generates the routing function.
    fn generate_route(&self) -> String {
        let mut output = String::new();
        let indent = Indent::ROOT.deeper();

        output.push_str(&format!(
            "/// Routes one frame payload to its [`{}`] hook.\n",
            self.handler
        ));
        output.push_str("///\n");
        output.push_str("/// Unknown pairs go to the error hook with `NotImplemented`.\n");
        output.push_str("///\n");
        output.push_str("/// # Safety\n");
        output.push_str(
            "/// `buf` must hold at least the fixed part of the record matching\n",
        );
        output.push_str(
            "/// `(class_id, message_id)`. It is viewed in place as that record without\n",
        );
        output.push_str("/// any length check.\n");
        output.push_str(&format!(
            "pub unsafe fn {}<H: {} + ?Sized>(\n",
            ROUTE_FN, self.handler
        ));
        for param in [
            "handler: &mut H",
            "class_id: u8",
            "message_id: u8",
            "len: usize",
            "buf: &[u8]",
        ] {
            output.push_str(&format!("{}{},\n", indent, param));
        }
        output.push_str(") {\n");

        output.push_str(&format!("{}match class_id {{\n", indent));
        for group in &self.ir.groups {
            output.push_str(&self.generate_class_arm(group, indent.deeper()));
        }
        output.push_str(&self.generate_error_arm(indent.deeper()));
        output.push_str(&format!("{}}}\n", indent));
        output.push_str("}\n");
        output
    }

    /// Generates the outer arm of one group.
    fn generate_class_arm(&self, group: &ResolvedGroup, indent: Indent) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}// Message class {}\n", indent, group.name));
        output.push_str(&format!(
            "{}0x{} => match message_id {{\n",
            indent,
            format_id(group.class_id)
        ));
        for msg in &group.messages {
            output.push_str(&self.generate_message_arm(msg, indent.deeper()));
        }
        output.push_str(&self.generate_error_arm(indent.deeper()));
        output.push_str(&format!("{}}},\n", indent));
        output
    }

    /// Generates the inner arm of one message.
    fn generate_message_arm(&self, msg: &ResolvedMessage, indent: Indent) -> String {
        let mut output = String::new();
        let body = indent.deeper();
        let record = format!("{}::{}", msg.group_name, msg.type_name);

        output.push_str(&format!("{}// Message {}\n", indent, msg.display_name()));
        output.push_str(&format!(
            "{}0x{} => {{\n",
            indent,
            format_id(msg.message_id)
        ));
        output.push_str(&format!(
            "{}// SAFETY: the caller guarantees `buf` holds the fixed part.\n",
            body
        ));
        output.push_str(&format!(
            "{}let msg = unsafe {{ <{} as {}::Record>::from_bytes_unchecked(buf) }};\n",
            body,
            record,
            self.config.runtime_path()
        ));
        if msg.repeated.is_some() {
            output.push_str(&format!(
                "{}handler.{}(msg, {}::iter(buf, len));\n",
                body, msg.hook_name, record
            ));
        } else {
            output.push_str(&format!("{}handler.{}(msg);\n", body, msg.hook_name));
        }
        output.push_str(&format!("{}}}\n", indent));
        output
    }

    /// Generates a fallback arm calling the error hook.
    fn generate_error_arm(&self, indent: Indent) -> String {
        format!(
            "{}_ => handler.{}(\n{}class_id,\n{}message_id,\n{}len,\n{}buf,\n{}{}::DispatchError::NotImplemented,\n{}),\n",
            indent,
            self.error_hook,
            indent.deeper(),
            indent.deeper(),
            indent.deeper(),
            indent.deeper(),
            indent.deeper(),
            self.config.runtime_path(),
            indent
        )
    }

    /// Generates the dispatcher struct and its impl.
    fn generate_dispatcher(&self) -> String {
        let name = &self.dispatcher;
        let handler = &self.handler;
        let mut output = String::new();

        output.push_str(&format!(
            "/// Dispatcher for {} frames.\n",
            self.config.protocol_name(&self.ir.protocol)
        ));
        output.push_str("///\n");
        output.push_str(
            "/// Borrows the frame buffer it was created with; its length is the\n",
        );
        output.push_str("/// capacity. No state is kept between dispatches.\n");
        output.push_str(&format!("pub struct {}<'buf, H> {{\n", name));
        output.push_str("    buf: &'buf mut [u8],\n");
        output.push_str("    handler: H,\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl<'buf, H: {}> {}<'buf, H> {{\n", handler, name));
        output.push_str("    /// Creates a dispatcher over `buf`, calling hooks on `handler`.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new(buf: &'buf mut [u8], handler: H) -> Self {\n");
        output.push_str("        Self { buf, handler }\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the capacity of the frame buffer in bytes.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn capacity(&self) -> usize {\n");
        output.push_str("        self.buf.len()\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the frame buffer, for the framing layer to fill.\n");
        output.push_str("    pub fn buffer_mut(&mut self) -> &mut [u8] {\n");
        output.push_str("        &mut *self.buf\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the handler.\n");
        output.push_str("    pub fn handler(&self) -> &H {\n");
        output.push_str("        &self.handler\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the handler mutably.\n");
        output.push_str("    pub fn handler_mut(&mut self) -> &mut H {\n");
        output.push_str("        &mut self.handler\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Consumes the dispatcher, returning the handler.\n");
        output.push_str("    pub fn into_handler(self) -> H {\n");
        output.push_str("        self.handler\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Dispatches a frame payload of `len` bytes held in `buf`.\n");
        output.push_str("    ///\n");
        output.push_str("    /// # Safety\n");
        output.push_str(
            "    /// `buf` must hold at least the fixed part of the record matching\n",
        );
        output.push_str("    /// `(class_id, message_id)`.\n");
        output.push_str("    pub unsafe fn dispatch(&mut self, class_id: u8, message_id: u8, len: usize, buf: &[u8]) {\n");
        output.push_str(&format!(
            "        unsafe {{ {}(&mut self.handler, class_id, message_id, len, buf) }}\n",
            ROUTE_FN
        ));
        output.push_str("    }\n\n");

        output.push_str(
            "    /// Dispatches the first `len` bytes of the frame buffer. `len` is\n",
        );
        output.push_str("    /// clamped to the capacity.\n");
        output.push_str("    ///\n");
        output.push_str("    /// # Safety\n");
        output.push_str(
            "    /// The first `len` bytes of the frame buffer must hold at least the\n",
        );
        output.push_str(
            "    /// fixed part of the record matching `(class_id, message_id)`.\n",
        );
        output.push_str("    pub unsafe fn dispatch_buffered(&mut self, class_id: u8, message_id: u8, len: usize) {\n");
        output.push_str("        let len = len.min(self.buf.len());\n");
        output.push_str(&format!(
            "        unsafe {{ {}(&mut self.handler, class_id, message_id, len, &self.buf[..len]) }}\n",
            ROUTE_FN
        ));
        output.push_str("    }\n");
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubxgen_schema::{FieldDef, GroupDef, MessageDef, PrimitiveType, Schema};

    fn sample_ir() -> SchemaIr {
        let schema = Schema::new("UBX")
            .with_group(
                GroupDef::new("NAV", 0x01)
                    .with_message(
                        MessageDef::new("POSLLH", 0x02)
                            .scalar("lon", 0, PrimitiveType::I4)
                            .scalar("lat", 1, PrimitiveType::I4),
                    )
                    .with_message(
                        MessageDef::new("SVINFO", 0x30)
                            .scalar("iTOW", 0, PrimitiveType::U4)
                            .repeated(vec![FieldDef::scalar("svid", 0, PrimitiveType::U1)]),
                    ),
            )
            .with_group(GroupDef::new("PM2", 0x06).with_message(MessageDef::new("PM2", 0x01)))
            .with_group(GroupDef::new("INF", 0x04));
        SchemaIr::from_schema(&schema).expect("valid schema")
    }

    #[test]
    fn test_names() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let generator = DispatchGenerator::new(&ir, &config);
        assert_eq!(generator.dispatcher_name(), "ParseUBX");
        assert_eq!(generator.handler_name(), "ParseUBXHandler");
        assert_eq!(generator.file_name(), "ParseUBX.rs");

        let config = CodegenConfig::new().protocol("GNSS");
        let generator = DispatchGenerator::new(&ir, &config);
        assert_eq!(generator.file_name(), "ParseGNSS.rs");
    }

    #[test]
    fn test_includes() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();
        assert!(code.contains("include!(\"NAV.rs\");\ninclude!(\"PM2.rs\");\ninclude!(\"INF.rs\");\n"));

        let config = CodegenConfig::new().include_style(IncludeStyle::OutDir);
        let code = DispatchGenerator::new(&ir, &config).generate();
        assert!(code.contains("include!(concat!(env!(\"OUT_DIR\"), \"/NAV.rs\"));\n"));
    }

    #[test]
    fn test_hooks() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();

        assert!(code.contains("pub trait ParseUBXHandler {\n"));
        assert!(code.contains("    fn onNAV_POSLLH(&mut self, msg: &NAV::POSLLH) {}\n"));
        assert!(code.contains("    fn onPM2_PM2_(&mut self, msg: &PM2::PM2_) {}\n"));
        assert!(code.contains("    fn onNAV_SVINFO(\n"));
        assert!(code.contains(
            "        items: ::ubxgen_core::RepeatedIter<'_, NAV::SVINFO_Repeated>,\n"
        ));
        assert!(code.contains("    fn onUBXerr(\n"));
        assert!(code.contains("        err: ::ubxgen_core::DispatchError,\n"));
        assert_eq!(code.matches("fn onUBXerr(").count(), 1);
    }

    #[test]
    fn test_route_structure() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();

        assert!(code.contains("pub unsafe fn route<H: ParseUBXHandler + ?Sized>(\n"));
        assert!(code.contains("    match class_id {\n"));
        assert!(code.contains("        // Message class NAV\n        0x01 => match message_id {\n"));
        assert!(code.contains("            // Message NAV-POSLLH\n            0x02 => {\n"));
        assert!(code.contains("<NAV::POSLLH as ::ubxgen_core::Record>::from_bytes_unchecked(buf)"));
        assert!(code.contains("handler.onNAV_SVINFO(msg, NAV::SVINFO::iter(buf, len));"));
        assert!(code.contains("        0x04 => match message_id {\n"));

        // One fallback per group plus the outer one.
        assert_eq!(
            code.matches("::ubxgen_core::DispatchError::NotImplemented").count(),
            ir.groups.len() + 1
        );
        assert!(!code.contains("panic!"));
    }

    #[test]
    fn test_dispatcher_struct() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();

        assert!(code.contains("pub struct ParseUBX<'buf, H> {\n"));
        assert!(code.contains("impl<'buf, H: ParseUBXHandler> ParseUBX<'buf, H> {\n"));
        assert!(code.contains("    pub fn new(buf: &'buf mut [u8], handler: H) -> Self {\n"));
        assert!(code.contains("    pub unsafe fn dispatch(&mut self,"));
        assert!(!code.contains("impl Default"));
        assert!(!code.contains("Default for ParseUBX"));
    }

    #[test]
    fn test_guard_markers() {
        let ir = sample_ir();
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();
        assert!(code.starts_with("// File ParseUBX.rs\n"));
        assert!(code.contains("// begin __PARSEUBX_RS__\n"));
        assert!(code.ends_with("// end __PARSEUBX_RS__\n"));
    }

    #[test]
    fn test_empty_schema() {
        let ir = SchemaIr::from_schema(&Schema::new("UBX")).expect("valid schema");
        let config = CodegenConfig::default();
        let code = DispatchGenerator::new(&ir, &config).generate();
        assert!(!code.contains("include!"));
        assert_eq!(
            code.matches("::ubxgen_core::DispatchError::NotImplemented").count(),
            1
        );
    }
}
