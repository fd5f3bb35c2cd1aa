//! Message definitions for protocol schemas.
//!
//! This module contains the data structures representing message groups,
//! messages, and their fields. Definitions are built with ordinary
//! constructors; nothing is inferred from names.

use crate::types::{PrimitiveType, TypeDescriptor};

/// Message group definition: related messages sharing a class ID.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDef {
    /// Group name (e.g. `NAV`).
    pub name: String,
    /// Class ID shared by every message of the group.
    pub class_id: u8,
    /// Description.
    pub description: Option<String>,
    /// Messages in declaration order.
    pub messages: Vec<MessageDef>,
}

impl GroupDef {
    /// Creates a new group definition.
    #[must_use]
    pub fn new(name: impl Into<String>, class_id: u8) -> Self {
        Self {
            name: name.into(),
            class_id,
            description: None,
            messages: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a message.
    #[must_use]
    pub fn with_message(mut self, message: MessageDef) -> Self {
        self.messages.push(message);
        self
    }

    /// Adds a message to the group.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.push(message);
    }

    /// Looks up a message by ID.
    #[must_use]
    pub fn get_message(&self, id: u8) -> Option<&MessageDef> {
        self.messages.iter().find(|m| m.id == id)
    }
}

/// Message definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDef {
    /// Message name (e.g. `POSLLH`).
    pub name: String,
    /// Message ID within the group.
    pub id: u8,
    /// Documentation text, emitted as a comment above the record.
    pub description: Option<String>,
    /// Fields in declaration order. Wire order is given by ordinals.
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    /// Creates a new message definition.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u8) -> Self {
        Self {
            name: name.into(),
            id,
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a scalar field of a primitive type.
    #[must_use]
    pub fn scalar(self, name: impl Into<String>, ordinal: u32, primitive: PrimitiveType) -> Self {
        self.with_field(FieldDef::scalar(name, ordinal, primitive))
    }

    /// Appends a fixed-length array field.
    #[must_use]
    pub fn array(
        self,
        name: impl Into<String>,
        ordinal: u32,
        primitive: PrimitiveType,
        length: usize,
    ) -> Self {
        self.with_field(FieldDef::array(name, ordinal, primitive, length))
    }

    /// Appends the trailing repeated region.
    #[must_use]
    pub fn repeated(self, fields: Vec<FieldDef>) -> Self {
        self.with_field(FieldDef::repeated(fields))
    }

    /// Adds a field to the message.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Returns true if the message has a repeated region.
    #[must_use]
    pub fn has_repeated(&self) -> bool {
        self.fields.iter().any(FieldDef::is_repeated)
    }

    /// Returns the scalar fields, in declaration order.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.is_repeated())
    }

    /// Returns the element fields of every repeated region.
    pub fn repeated_regions(&self) -> impl Iterator<Item = &[FieldDef]> {
        self.fields.iter().filter_map(|f| match &f.kind {
            FieldKind::Repeated(fields) => Some(fields.as_slice()),
            FieldKind::Scalar(_) => None,
        })
    }
}

/// What a field holds on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A primitive or fixed-length array of a primitive.
    Scalar(TypeDescriptor),
    /// The trailing variable-length region; one element per entry of the
    /// contained fields.
    Repeated(Vec<FieldDef>),
}

/// Field definition within a message or a repeated element.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Wire position. Required for scalar fields; ignored for the repeated
    /// region, which always comes last.
    pub ordinal: Option<u32>,
    /// Field kind.
    pub kind: FieldKind,
}

/// Name given to repeated regions built with [`FieldDef::repeated`].
pub const REPEATED_FIELD_NAME: &str = "Repeated";

impl FieldDef {
    /// Creates a scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>, ordinal: u32, primitive: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            ordinal: Some(ordinal),
            kind: FieldKind::Scalar(TypeDescriptor::scalar(primitive)),
        }
    }

    /// Creates a fixed-length array field.
    #[must_use]
    pub fn array(
        name: impl Into<String>,
        ordinal: u32,
        primitive: PrimitiveType,
        length: usize,
    ) -> Self {
        Self {
            name: name.into(),
            ordinal: Some(ordinal),
            kind: FieldKind::Scalar(TypeDescriptor::array(primitive, length)),
        }
    }

    /// Creates a field from a type descriptor with an optional ordinal.
    #[must_use]
    pub fn typed(name: impl Into<String>, ordinal: Option<u32>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ordinal,
            kind: FieldKind::Scalar(ty),
        }
    }

    /// Creates the repeated region holding `fields` per element.
    #[must_use]
    pub fn repeated(fields: Vec<FieldDef>) -> Self {
        Self {
            name: REPEATED_FIELD_NAME.to_string(),
            ordinal: None,
            kind: FieldKind::Repeated(fields),
        }
    }

    /// Returns true if this is the repeated region.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        matches!(self.kind, FieldKind::Repeated(_))
    }

    /// Returns the type descriptor of a scalar field.
    #[must_use]
    pub fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        match &self.kind {
            FieldKind::Scalar(ty) => Some(ty),
            FieldKind::Repeated(_) => None,
        }
    }

    /// Returns the encoded length in bytes (0 for the repeated region).
    #[must_use]
    pub fn encoded_length(&self) -> usize {
        self.type_descriptor().map_or(0, TypeDescriptor::encoded_length)
    }
}
