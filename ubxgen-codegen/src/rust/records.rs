//! Fixed-layout record code generation.
//!
//! Every group becomes one artifact holding a module named after the group.
//! Each message becomes a `#[repr(C, packed)]` struct with its members in
//! wire order, so a frame payload can be viewed in place as the record.

use super::comments::doc_comment;
use super::{Indent, file_footer, file_header};
use crate::config::CodegenConfig;
use ubxgen_schema::ir::{ResolvedField, ResolvedGroup, ResolvedMessage, ResolvedRepeated};
use ubxgen_schema::naming::{format_id, guard_token};

/// Generator for group artifacts and their message records.
pub struct RecordGenerator<'a> {
    config: &'a CodegenConfig,
    schema_name: &'a str,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(config: &'a CodegenConfig, schema_name: &'a str) -> Self {
        Self {
            config,
            schema_name,
        }
    }

    /// Returns the artifact file name of a group.
    #[must_use]
    pub fn file_name(group: &ResolvedGroup) -> String {
        format!("{}.rs", group.name)
    }

    /// Generates the complete artifact of one group.
    #[must_use]
    pub fn generate_group(&self, group: &ResolvedGroup) -> String {
        let guard = guard_token(&group.name);
        let banner = self.config.has_banner().then_some(self.schema_name);
        let mut output = file_header(&Self::file_name(group), &guard, banner);

        let indent = Indent::ROOT;
        if let Some(description) = &group.description {
            output.push_str(&doc_comment(description, indent));
        }
        output.push_str("#[allow(non_snake_case, non_camel_case_types, dead_code)]\n");
        output.push_str(&format!("pub mod {} {{\n", group.name));

        let inner = indent.deeper();
        output.push_str(&self.generate_group_marker(group, inner));
        for msg in &group.messages {
            output.push('\n');
            output.push_str(&self.generate_message(msg, inner));
        }

        output.push_str("}\n");
        output.push_str(&file_footer(&guard));
        output
    }

    /// Generates the group marker type listing the messages of the group.
    fn generate_group_marker(&self, group: &ResolvedGroup, indent: Indent) -> String {
        let mut output = String::new();
        let body = indent.deeper();

        output.push_str(&format!("{}/// Message class {}.\n", indent, group.name));
        output.push_str(&format!("{}pub struct {};\n\n", indent, group.name));
        output.push_str(&format!("{}impl {} {{\n", indent, group.name));
        output.push_str(&format!(
            "{}/// Class ID shared by every message of the group.\n",
            body
        ));
        output.push_str(&format!(
            "{}pub const CLASS_ID: u8 = 0x{};\n",
            body,
            format_id(group.class_id)
        ));
        output.push_str(&format!(
            "{}/// Message IDs and record names, in declaration order.\n",
            body
        ));

        if group.messages.is_empty() {
            output.push_str(&format!("{}pub const MESSAGES: &[(u8, &str)] = &[];\n", body));
        } else {
            output.push_str(&format!("{}pub const MESSAGES: &[(u8, &str)] = &[\n", body));
            for msg in &group.messages {
                output.push_str(&format!(
                    "{}(0x{}, \"{}\"),\n",
                    body.deeper(),
                    format_id(msg.message_id),
                    msg.type_name
                ));
            }
            output.push_str(&format!("{}];\n", body));
        }

        output.push_str(&format!("{}}}\n", indent));
        output
    }

    /// Generates the records, inherent impl and runtime trait impls of a
    /// message.
    #[must_use]
    pub fn generate_message(&self, msg: &ResolvedMessage, indent: Indent) -> String {
        tracing::debug!(
            message = %msg.qualified_name,
            record = %msg.type_name,
            size = msg.fixed_size,
            "emitting record"
        );

        let mut output = String::new();

        if let Some(description) = &msg.description {
            output.push_str(&doc_comment(description, indent));
        }
        output.push_str(&self.generate_record(&msg.type_name, &msg.fields, indent));

        if let Some(repeated) = &msg.repeated {
            output.push('\n');
            output.push_str(&format!(
                "{}/// One element of the repeated region of [`{}`].\n",
                indent, msg.type_name
            ));
            output.push_str(&self.generate_record(&repeated.type_name, &repeated.fields, indent));
        }

        output.push('\n');
        output.push_str(&self.generate_inherent_impl(msg, indent));
        output.push('\n');
        output.push_str(&self.generate_trait_impls(msg, indent));
        output
    }

    /// Generates one packed struct.
    fn generate_record(&self, name: &str, fields: &[ResolvedField], indent: Indent) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}#[repr(C, packed)]\n", indent));
        output.push_str(&format!(
            "{}#[derive(Debug, Clone, Copy, PartialEq)]\n",
            indent
        ));

        if fields.is_empty() {
            output.push_str(&format!("{}pub struct {} {{}}\n", indent, name));
            return output;
        }

        output.push_str(&format!("{}pub struct {} {{\n", indent, name));
        let member = indent.deeper();
        for field in fields {
            output.push_str(&format!(
                "{}pub {}: {},\n",
                member, field.ident, field.rust_type
            ));
        }
        output.push_str(&format!("{}}}\n", indent));
        output
    }

    /// Generates the identity constants and, for repeating messages, the
    /// `size` and `iter` helpers.
    fn generate_inherent_impl(&self, msg: &ResolvedMessage, indent: Indent) -> String {
        let mut output = String::new();
        let body = indent.deeper();

        output.push_str(&format!("{}impl {} {{\n", indent, msg.type_name));
        output.push_str(&format!("{}/// Class ID of the owning group.\n", body));
        output.push_str(&format!(
            "{}pub const CLASS_ID: u8 = 0x{};\n",
            body,
            format_id(msg.class_id)
        ));
        output.push_str(&format!("{}/// Message ID within the group.\n", body));
        output.push_str(&format!(
            "{}pub const MESSAGE_ID: u8 = 0x{};\n",
            body,
            format_id(msg.message_id)
        ));

        if let Some(repeated) = &msg.repeated {
            output.push('\n');
            output.push_str(&self.generate_repeated_helpers(repeated, body));
        }

        output.push_str(&format!("{}}}\n", indent));
        output
    }

    /// Generates `size(n)` and `iter(data, size)`.
    fn generate_repeated_helpers(&self, repeated: &ResolvedRepeated, indent: Indent) -> String {
        let mut output = String::new();
        let body = indent.deeper();
        let runtime = self.config.runtime_path();

        output.push_str(&format!(
            "{}/// Frame size in bytes of the message carrying `n` elements.\n",
            indent
        ));
        output.push_str(&format!("{}#[inline]\n", indent));
        output.push_str(&format!("{}#[must_use]\n", indent));
        output.push_str(&format!(
            "{}pub const fn size(n: usize) -> usize {{\n",
            indent
        ));
        output.push_str(&format!(
            "{}::core::mem::size_of::<Self>() + n * ::core::mem::size_of::<{}>()\n",
            body, repeated.type_name
        ));
        output.push_str(&format!("{}}}\n\n", indent));

        output.push_str(&format!(
            "{}/// Iterates the elements following the fixed part in `data`, up to\n",
            indent
        ));
        output.push_str(&format!(
            "{}/// `size` bytes. The element count field is not consulted.\n",
            indent
        ));
        output.push_str(&format!("{}#[inline]\n", indent));
        output.push_str(&format!(
            "{}pub fn iter(data: &[u8], size: usize) -> {}::RepeatedIter<'_, {}> {{\n",
            indent, runtime, repeated.type_name
        ));
        output.push_str(&format!(
            "{}{}::RepeatedIter::new(data, ::core::mem::size_of::<Self>(), size)\n",
            body, runtime
        ));
        output.push_str(&format!("{}}}\n", indent));
        output
    }

    /// Generates the `Record`, `Message` and `Repeating` impls.
    fn generate_trait_impls(&self, msg: &ResolvedMessage, indent: Indent) -> String {
        let mut output = String::new();
        let body = indent.deeper();
        let runtime = self.config.runtime_path();

        let mut records = vec![msg.type_name.as_str()];
        if let Some(repeated) = &msg.repeated {
            records.push(repeated.type_name.as_str());
        }
        for record in records {
            output.push_str(&format!(
                "{}// SAFETY: packed, alignment 1, integer and float members only.\n",
                indent
            ));
            output.push_str(&format!(
                "{}unsafe impl {}::Record for {} {{}}\n\n",
                indent, runtime, record
            ));
        }

        output.push_str(&format!(
            "{}impl {}::Message for {} {{\n",
            indent, runtime, msg.type_name
        ));
        output.push_str(&format!(
            "{}const CLASS_ID: u8 = 0x{};\n",
            body,
            format_id(msg.class_id)
        ));
        output.push_str(&format!(
            "{}const MESSAGE_ID: u8 = 0x{};\n",
            body,
            format_id(msg.message_id)
        ));
        output.push_str(&format!(
            "{}const NAME: &'static str = \"{}\";\n",
            body,
            msg.display_name()
        ));
        output.push_str(&format!("{}}}\n", indent));

        if let Some(repeated) = &msg.repeated {
            output.push('\n');
            output.push_str(&format!(
                "{}impl {}::Repeating for {} {{\n",
                indent, runtime, msg.type_name
            ));
            output.push_str(&format!(
                "{}type Repeated = {};\n",
                body, repeated.type_name
            ));
            output.push_str(&format!("{}}}\n", indent));
        }

        output
    }
}
