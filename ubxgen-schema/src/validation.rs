//! Schema validation utilities.
//!
//! This module checks a schema for everything the generator relies on but
//! the data model cannot express by construction: distinct ordinals, unique
//! IDs, a single repeated region, and names usable in generated code.

use crate::error::SchemaError;
use crate::messages::{FieldDef, FieldKind, GroupDef, MessageDef};
use crate::naming;
use crate::types::Schema;
use std::collections::{HashMap, HashSet};

/// Suffix of the element record type generated for a repeated region.
pub const REPEATED_TYPE_SUFFIX: &str = "_Repeated";

/// Largest record size in bytes; a UBX frame carries a 16-bit payload length.
pub const MAX_RECORD_SIZE: usize = u16::MAX as usize;

/// Validates a schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    if !naming::is_type_name(&schema.name) {
        return Err(SchemaError::invalid_identifier("schema", &schema.name));
    }
    validate_groups(schema)?;
    for group in &schema.groups {
        validate_group(schema, group)?;
    }
    validate_hooks(schema)
}

/// Validates that every dispatcher hook name is unique, the shared error
/// hook included.
///
/// Hook names join the group and message names with `_`, so distinct pairs
/// such as `A`/`B_C` and `A_B`/`C` can meet in the handler trait.
fn validate_hooks(schema: &Schema) -> Result<(), SchemaError> {
    let mut hooks = HashSet::new();
    hooks.insert(naming::error_hook_name(&schema.name));

    for group in &schema.groups {
        let group_name = naming::group_type_name(&format!("{}.{}", schema.name, group.name));
        for msg in &group.messages {
            let type_name = naming::message_type_name(&schema.qualified_name(&group.name, &msg.name));
            let hook = naming::hook_name(&group_name, &type_name);
            if !hooks.insert(hook.clone()) {
                return Err(SchemaError::duplicate_name("hook", hook, &schema.name));
            }
        }
    }

    Ok(())
}

/// Validates group names and class IDs across the schema.
fn validate_groups(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_ids: HashMap<u8, &str> = HashMap::new();

    for group in &schema.groups {
        if !naming::is_type_name(&group.name) {
            return Err(SchemaError::invalid_identifier("group", &group.name));
        }

        if !seen_names.insert(group.name.as_str()) {
            return Err(SchemaError::duplicate_name("group", &group.name, &schema.name));
        }

        if let Some(first) = seen_ids.insert(group.class_id, &group.name) {
            return Err(SchemaError::DuplicateClassId {
                id: group.class_id,
                first: first.to_string(),
                second: group.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validates the messages of one group.
fn validate_group(schema: &Schema, group: &GroupDef) -> Result<(), SchemaError> {
    let scope = format!("{}.{}", schema.name, group.name);
    let mut seen_ids: HashMap<u8, &str> = HashMap::new();
    let mut type_names = HashSet::new();
    type_names.insert(group.name.clone());

    for msg in &group.messages {
        if !naming::is_type_name(&msg.name) {
            return Err(SchemaError::invalid_identifier("message", &msg.name));
        }

        if let Some(first) = seen_ids.insert(msg.id, &msg.name) {
            return Err(SchemaError::DuplicateMessageId {
                group: group.name.clone(),
                id: msg.id,
                first: first.to_string(),
                second: msg.name.clone(),
            });
        }

        let qualified = schema.qualified_name(&group.name, &msg.name);
        let type_name = naming::message_type_name(&qualified);
        if !type_names.insert(type_name.clone()) {
            return Err(SchemaError::duplicate_name("type", type_name, &scope));
        }
        if msg.has_repeated() {
            let element = format!("{}{}", type_name, REPEATED_TYPE_SUFFIX);
            if !type_names.insert(element.clone()) {
                return Err(SchemaError::duplicate_name("type", element, &scope));
            }
        }

        validate_message(&qualified, msg)?;
    }

    Ok(())
}

/// Validates the fields and repeated region of one message.
fn validate_message(qualified: &str, msg: &MessageDef) -> Result<(), SchemaError> {
    let regions: Vec<&[FieldDef]> = msg.repeated_regions().collect();
    if regions.len() > 1 {
        return Err(SchemaError::MultipleRepeated {
            message: qualified.to_string(),
            count: regions.len(),
        });
    }

    let scalars: Vec<&FieldDef> = msg.scalar_fields().collect();
    validate_record_fields(qualified, &scalars)?;

    if let Some(element_fields) = regions.first() {
        if element_fields.is_empty() {
            return Err(SchemaError::EmptyRepeated {
                message: qualified.to_string(),
            });
        }
        if element_fields.iter().any(FieldDef::is_repeated) {
            return Err(SchemaError::NestedRepeated {
                message: qualified.to_string(),
            });
        }
        let record = format!("{}.{}", qualified, crate::messages::REPEATED_FIELD_NAME);
        let element_fields: Vec<&FieldDef> = element_fields.iter().collect();
        validate_record_fields(&record, &element_fields)?;
    }

    Ok(())
}

/// Validates the scalar fields laid out in one record.
fn validate_record_fields(record: &str, fields: &[&FieldDef]) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_ordinals: HashMap<u32, &str> = HashMap::new();
    let mut size: usize = 0;

    for field in fields {
        if !naming::is_field_name(&field.name) {
            return Err(SchemaError::invalid_identifier("field", &field.name));
        }

        if !seen_names.insert(field.name.as_str()) {
            return Err(SchemaError::duplicate_name("field", &field.name, record));
        }

        let Some(ordinal) = field.ordinal else {
            return Err(SchemaError::missing_ordinal(record, &field.name));
        };

        if let Some(first) = seen_ordinals.insert(ordinal, &field.name) {
            return Err(SchemaError::DuplicateOrdinal {
                record: record.to_string(),
                ordinal,
                first: first.to_string(),
                second: field.name.clone(),
            });
        }

        if let FieldKind::Scalar(ty) = &field.kind {
            if ty.length == Some(0) {
                return Err(SchemaError::ZeroLengthArray {
                    record: record.to_string(),
                    field: field.name.clone(),
                });
            }
            size = ty
                .checked_encoded_length()
                .and_then(|len| size.checked_add(len))
                .filter(|&total| total <= MAX_RECORD_SIZE)
                .ok_or_else(|| SchemaError::RecordTooLarge {
                    record: record.to_string(),
                    max: MAX_RECORD_SIZE,
                })?;
        }
    }

    Ok(())
}
