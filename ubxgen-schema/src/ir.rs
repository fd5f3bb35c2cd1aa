//! Intermediate representation for code generation.
//!
//! This module provides a flattened, resolved representation of the schema
//! that is easier to use for code generation: names are resolved, fields are
//! in wire order and every record size is known.

use crate::error::SchemaError;
use crate::messages::{FieldDef, GroupDef, MessageDef};
use crate::naming;
use crate::types::{Schema, TypeDescriptor};
use crate::validation::{REPEATED_TYPE_SUFFIX, validate_schema};

/// Intermediate representation of a schema for code generation.
#[derive(Debug, Clone)]
pub struct SchemaIr {
    /// Protocol name (schema root namespace).
    pub protocol: String,
    /// Schema description.
    pub description: Option<String>,
    /// Groups in declaration order.
    pub groups: Vec<ResolvedGroup>,
}

impl SchemaIr {
    /// Validates a schema and creates its intermediate representation.
    ///
    /// # Errors
    /// Returns `SchemaError` if the schema fails validation.
    pub fn from_schema(schema: &Schema) -> Result<Self, SchemaError> {
        validate_schema(schema)?;

        let mut groups = Vec::with_capacity(schema.groups.len());
        for group in &schema.groups {
            if group.messages.is_empty() {
                tracing::warn!(group = %group.name, "group has no messages");
            }
            let resolved = ResolvedGroup::from_group_def(schema, group)?;
            tracing::debug!(
                group = %resolved.name,
                class_id = resolved.class_id,
                messages = resolved.messages.len(),
                "resolved group"
            );
            groups.push(resolved);
        }

        Ok(Self {
            protocol: schema.name.clone(),
            description: schema.description.clone(),
            groups,
        })
    }

    /// Gets a resolved group by name.
    #[must_use]
    pub fn get_group(&self, name: &str) -> Option<&ResolvedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Iterates over every message of every group, in declaration order.
    pub fn messages(&self) -> impl Iterator<Item = &ResolvedMessage> {
        self.groups.iter().flat_map(|g| g.messages.iter())
    }
}

/// Resolved message group.
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    /// Emitted group name; also the artifact stem.
    pub name: String,
    /// Class ID.
    pub class_id: u8,
    /// Description.
    pub description: Option<String>,
    /// Messages in declaration order.
    pub messages: Vec<ResolvedMessage>,
}

impl ResolvedGroup {
    fn from_group_def(schema: &Schema, group: &GroupDef) -> Result<Self, SchemaError> {
        let name = naming::group_type_name(&format!("{}.{}", schema.name, group.name));
        let messages = group
            .messages
            .iter()
            .map(|msg| ResolvedMessage::from_message_def(schema, group, &name, msg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            class_id: group.class_id,
            description: group.description.clone(),
            messages,
        })
    }

    /// Returns true if any message of the group has a repeated region.
    #[must_use]
    pub fn has_repeated(&self) -> bool {
        self.messages.iter().any(|m| m.repeated.is_some())
    }
}

/// Resolved message.
#[derive(Debug, Clone)]
pub struct ResolvedMessage {
    /// Message name as declared.
    pub name: String,
    /// Qualified name, `<schema>.<group>.<message>`.
    pub qualified_name: String,
    /// Emitted record type name.
    pub type_name: String,
    /// Emitted name of the owning group.
    pub group_name: String,
    /// Class ID of the owning group.
    pub class_id: u8,
    /// Message ID.
    pub message_id: u8,
    /// Description.
    pub description: Option<String>,
    /// Fixed fields in wire order.
    pub fields: Vec<ResolvedField>,
    /// Trailing repeated region, if any.
    pub repeated: Option<ResolvedRepeated>,
    /// Size of the fixed part in bytes.
    pub fixed_size: usize,
    /// Name of the dispatcher hook.
    pub hook_name: String,
}

impl ResolvedMessage {
    fn from_message_def(
        schema: &Schema,
        group: &GroupDef,
        group_name: &str,
        msg: &MessageDef,
    ) -> Result<Self, SchemaError> {
        let qualified_name = schema.qualified_name(&group.name, &msg.name);
        let type_name = naming::message_type_name(&qualified_name);

        let scalars: Vec<&FieldDef> = msg.scalar_fields().collect();
        let fields = resolve_fields(&qualified_name, &scalars)?;

        let repeated = match msg.repeated_regions().next() {
            Some(element_fields) => {
                let record = format!("{}.{}", qualified_name, crate::messages::REPEATED_FIELD_NAME);
                let element_fields: Vec<&FieldDef> = element_fields.iter().collect();
                let fields = resolve_fields(&record, &element_fields)?;
                Some(ResolvedRepeated {
                    type_name: format!("{}{}", type_name, REPEATED_TYPE_SUFFIX),
                    element_size: fields.iter().map(|f| f.encoded_length).sum(),
                    fields,
                })
            }
            None => None,
        };

        Ok(Self {
            name: msg.name.clone(),
            hook_name: naming::hook_name(group_name, &type_name),
            fixed_size: fields.iter().map(|f| f.encoded_length).sum(),
            qualified_name,
            type_name,
            group_name: group_name.to_string(),
            class_id: group.class_id,
            message_id: msg.id,
            description: msg.description.clone(),
            fields,
            repeated,
        })
    }

    /// Returns the encoded size of the message with `n` repeated elements,
    /// saturating at `usize::MAX`.
    #[must_use]
    pub fn size(&self, n: usize) -> usize {
        let element = self.repeated.as_ref().map_or(0, |r| r.element_size);
        self.fixed_size.saturating_add(n.saturating_mul(element))
    }

    /// Returns the human-readable message name, `<GROUP>-<MESSAGE>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}-{}", self.group_name, self.name)
    }
}

/// Resolved repeated region: the element record and its layout.
#[derive(Debug, Clone)]
pub struct ResolvedRepeated {
    /// Emitted element record type name.
    pub type_name: String,
    /// Element fields in wire order.
    pub fields: Vec<ResolvedField>,
    /// Size of one element in bytes.
    pub element_size: usize,
}

/// Resolved scalar field.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    /// Field name as declared.
    pub name: String,
    /// Identifier used in generated code.
    pub ident: String,
    /// Wire position.
    pub ordinal: u32,
    /// Field type.
    pub ty: TypeDescriptor,
    /// Rust type.
    pub rust_type: String,
    /// Encoded length in bytes.
    pub encoded_length: usize,
}

/// Resolves scalar fields and sorts them by ordinal.
fn resolve_fields(record: &str, fields: &[&FieldDef]) -> Result<Vec<ResolvedField>, SchemaError> {
    let mut resolved = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ordinal) = field.ordinal else {
            return Err(SchemaError::missing_ordinal(record, &field.name));
        };
        let Some(ty) = field.type_descriptor().copied() else {
            continue;
        };
        resolved.push(ResolvedField {
            name: field.name.clone(),
            ident: naming::field_ident(&field.name),
            ordinal,
            rust_type: ty.rust_type(),
            encoded_length: ty.encoded_length(),
            ty,
        });
    }
    resolved.sort_by_key(|f| f.ordinal);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveType;

    fn sample_schema() -> Schema {
        Schema::new("UBX")
            .with_group(
                GroupDef::new("NAV", 0x01)
                    .with_message(
                        MessageDef::new("POSLLH", 0x02)
                            .with_description("Geodetic Position Solution")
                            .scalar("lat", 1, PrimitiveType::I4)
                            .scalar("lon", 0, PrimitiveType::I4),
                    )
                    .with_message(
                        MessageDef::new("SVINFO", 0x30)
                            .scalar("iTOW", 0, PrimitiveType::U4)
                            .scalar("numCh", 1, PrimitiveType::U1)
                            .repeated(vec![
                                FieldDef::scalar("svid", 1, PrimitiveType::U1),
                                FieldDef::scalar("chn", 0, PrimitiveType::U1),
                                FieldDef::scalar("prRes", 2, PrimitiveType::I4),
                                FieldDef::scalar("cno", 3, PrimitiveType::U2),
                            ]),
                    ),
            )
            .with_group(GroupDef::new("PM2", 0x06).with_message(MessageDef::new("PM2", 0x01)))
            .with_group(GroupDef::new("INF", 0x04))
    }

    #[test]
    fn test_fields_in_ordinal_order() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let nav = ir.get_group("NAV").expect("NAV group");
        let posllh = &nav.messages[0];

        let names: Vec<&str> = posllh.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["lon", "lat"]);
        assert_eq!(posllh.fixed_size, 8);
        assert_eq!(posllh.hook_name, "onNAV_POSLLH");
        assert_eq!(posllh.display_name(), "NAV-POSLLH");
        assert!(posllh.repeated.is_none());
        assert_eq!(posllh.size(5), 8);
    }

    #[test]
    fn test_repeated_region() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let svinfo = &ir.groups[0].messages[1];
        let repeated = svinfo.repeated.as_ref().expect("repeated region");

        assert_eq!(repeated.type_name, "SVINFO_Repeated");
        assert_eq!(repeated.element_size, 8);
        assert_eq!(repeated.fields[0].name, "chn");
        assert_eq!(svinfo.fixed_size, 5);
        assert_eq!(svinfo.size(0), 5);
        assert_eq!(svinfo.size(3), 5 + 24);
        assert_eq!(svinfo.size(usize::MAX), usize::MAX);
        assert!(ir.groups[0].has_repeated());
    }

    #[test]
    fn test_group_collision_resolved() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        let pm2 = ir.get_group("PM2").expect("PM2 group");
        assert_eq!(pm2.messages[0].type_name, "PM2_");
        assert_eq!(pm2.messages[0].hook_name, "onPM2_PM2_");
        assert_eq!(pm2.messages[0].qualified_name, "UBX.PM2.PM2");
    }

    #[test]
    fn test_empty_group_kept() {
        let ir = SchemaIr::from_schema(&sample_schema()).expect("valid schema");
        assert_eq!(ir.groups.len(), 3);
        assert!(ir.get_group("INF").expect("INF").messages.is_empty());
        assert_eq!(ir.messages().count(), 3);
    }

    #[test]
    fn test_keyword_field_is_escaped() {
        let schema = Schema::new("UBX").with_group(
            GroupDef::new("CFG", 0x06)
                .with_message(MessageDef::new("RST", 0x04).scalar("type", 0, PrimitiveType::U1)),
        );
        let ir = SchemaIr::from_schema(&schema).expect("valid schema");
        let field = &ir.groups[0].messages[0].fields[0];
        assert_eq!(field.name, "type");
        assert_eq!(field.ident, "r#type");
    }

    #[test]
    fn test_oversized_record_rejected() {
        let schema = Schema::new("UBX").with_group(GroupDef::new("NAV", 0x01).with_message(
            MessageDef::new("HUGE", 0x01).with_field(FieldDef::typed(
                "x",
                Some(0),
                TypeDescriptor::array(PrimitiveType::U4, usize::MAX / 2),
            )),
        ));
        assert!(matches!(
            SchemaIr::from_schema(&schema),
            Err(SchemaError::RecordTooLarge { .. })
        ));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let schema = Schema::new("UBX")
            .with_group(GroupDef::new("NAV", 0x01))
            .with_group(GroupDef::new("RXM", 0x01));
        assert!(matches!(
            SchemaIr::from_schema(&schema),
            Err(SchemaError::DuplicateClassId { .. })
        ));
    }
}
