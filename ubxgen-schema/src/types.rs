//! Schema type definitions.
//!
//! This module contains the root [`Schema`] and the primitive wire types that
//! field descriptors are built from.

use crate::messages::GroupDef;

/// Complete protocol schema: a named set of message groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Root namespace, also the protocol name (e.g. `UBX`).
    pub name: String,
    /// Schema description.
    pub description: Option<String>,
    /// Message groups in declaration order.
    pub groups: Vec<GroupDef>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            groups: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a message group.
    #[must_use]
    pub fn with_group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a message group to the schema.
    pub fn add_group(&mut self, group: GroupDef) {
        self.groups.push(group);
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn get_group(&self, name: &str) -> Option<&GroupDef> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Returns the qualified name of a message, `<schema>.<group>.<message>`.
    #[must_use]
    pub fn qualified_name(&self, group: &str, message: &str) -> String {
        format!("{}.{}.{}", self.name, group, message)
    }

    /// Returns the total number of messages across all groups.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|g| g.messages.len()).sum()
    }
}

/// UBX primitive wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Unsigned 8-bit integer.
    U1,
    /// Signed 8-bit integer.
    I1,
    /// 8-bit bitfield.
    X1,
    /// Unsigned 16-bit integer.
    U2,
    /// Signed 16-bit integer.
    I2,
    /// 16-bit bitfield.
    X2,
    /// Unsigned 32-bit integer.
    U4,
    /// Signed 32-bit integer.
    I4,
    /// 32-bit bitfield.
    X4,
    /// IEEE 754 single precision.
    R4,
    /// IEEE 754 double precision.
    R8,
    /// ASCII character (1 byte).
    CH,
}

impl PrimitiveType {
    /// Returns the size of the primitive type in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::U1 | Self::I1 | Self::X1 | Self::CH => 1,
            Self::U2 | Self::I2 | Self::X2 => 2,
            Self::U4 | Self::I4 | Self::X4 | Self::R4 => 4,
            Self::R8 => 8,
        }
    }

    /// Returns the Rust type name for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::U1 | Self::X1 | Self::CH => "u8",
            Self::I1 => "i8",
            Self::U2 | Self::X2 => "u16",
            Self::I2 => "i16",
            Self::U4 | Self::X4 => "u32",
            Self::I4 => "i32",
            Self::R4 => "f32",
            Self::R8 => "f64",
        }
    }

    /// Returns the UBX type name.
    #[must_use]
    pub const fn ubx_name(&self) -> &'static str {
        match self {
            Self::U1 => "U1",
            Self::I1 => "I1",
            Self::X1 => "X1",
            Self::U2 => "U2",
            Self::I2 => "I2",
            Self::X2 => "X2",
            Self::U4 => "U4",
            Self::I4 => "I4",
            Self::X4 => "X4",
            Self::R4 => "R4",
            Self::R8 => "R8",
            Self::CH => "CH",
        }
    }

    /// Parses a primitive type from its UBX name.
    #[must_use]
    pub fn from_ubx_name(name: &str) -> Option<Self> {
        match name {
            "U1" => Some(Self::U1),
            "I1" => Some(Self::I1),
            "X1" => Some(Self::X1),
            "U2" => Some(Self::U2),
            "I2" => Some(Self::I2),
            "X2" => Some(Self::X2),
            "U4" => Some(Self::U4),
            "I4" => Some(Self::I4),
            "X4" => Some(Self::X4),
            "R4" => Some(Self::R4),
            "R8" => Some(Self::R8),
            "CH" => Some(Self::CH),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::I1 | Self::I2 | Self::I4)
    }

    /// Returns true if this is a bitfield type.
    #[must_use]
    pub const fn is_bitfield(&self) -> bool {
        matches!(self, Self::X1 | Self::X2 | Self::X4)
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::R4 | Self::R8)
    }
}

/// Type of a scalar field: a primitive, optionally repeated a fixed number of
/// times inline (e.g. `CH[30]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Underlying primitive type.
    pub primitive: PrimitiveType,
    /// Fixed array length (`None` for a plain scalar).
    pub length: Option<usize>,
}

impl TypeDescriptor {
    /// Creates a scalar descriptor.
    #[must_use]
    pub const fn scalar(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            length: None,
        }
    }

    /// Creates a fixed-length array descriptor.
    #[must_use]
    pub const fn array(primitive: PrimitiveType, length: usize) -> Self {
        Self {
            primitive,
            length: Some(length),
        }
    }

    /// Returns the encoded length in bytes, saturating at `usize::MAX`.
    #[must_use]
    pub const fn encoded_length(&self) -> usize {
        match self.checked_encoded_length() {
            Some(len) => len,
            None => usize::MAX,
        }
    }

    /// Returns the encoded length in bytes, or `None` on overflow.
    #[must_use]
    pub const fn checked_encoded_length(&self) -> Option<usize> {
        match self.length {
            Some(len) => self.primitive.size().checked_mul(len),
            None => Some(self.primitive.size()),
        }
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.length.is_some()
    }

    /// Returns the Rust type, `[T; N]` for arrays.
    #[must_use]
    pub fn rust_type(&self) -> String {
        match self.length {
            Some(len) => format!("[{}; {}]", self.primitive.rust_type(), len),
            None => self.primitive.rust_type().to_string(),
        }
    }
}

impl From<PrimitiveType> for TypeDescriptor {
    fn from(primitive: PrimitiveType) -> Self {
        Self::scalar(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_sizes() {
        assert_eq!(PrimitiveType::U1.size(), 1);
        assert_eq!(PrimitiveType::CH.size(), 1);
        assert_eq!(PrimitiveType::I2.size(), 2);
        assert_eq!(PrimitiveType::X4.size(), 4);
        assert_eq!(PrimitiveType::R4.size(), 4);
        assert_eq!(PrimitiveType::R8.size(), 8);
    }

    #[test]
    fn test_primitive_rust_types() {
        assert_eq!(PrimitiveType::I4.rust_type(), "i32");
        assert_eq!(PrimitiveType::X2.rust_type(), "u16");
        assert_eq!(PrimitiveType::CH.rust_type(), "u8");
        assert_eq!(PrimitiveType::R8.rust_type(), "f64");
    }

    #[test]
    fn test_ubx_name_round_trip() {
        for name in ["U1", "I1", "X1", "U2", "I2", "X2", "U4", "I4", "X4", "R4", "R8", "CH"] {
            let prim = PrimitiveType::from_ubx_name(name).expect("known type");
            assert_eq!(prim.ubx_name(), name);
        }
        assert!(PrimitiveType::from_ubx_name("U8").is_none());
    }

    #[test]
    fn test_primitive_classification() {
        assert!(PrimitiveType::I2.is_signed());
        assert!(!PrimitiveType::U2.is_signed());
        assert!(PrimitiveType::X1.is_bitfield());
        assert!(PrimitiveType::R4.is_float());
    }

    #[test]
    fn test_type_descriptor_array() {
        let ty = TypeDescriptor::array(PrimitiveType::CH, 30);
        assert!(ty.is_array());
        assert_eq!(ty.encoded_length(), 30);
        assert_eq!(ty.rust_type(), "[u8; 30]");

        let ty = TypeDescriptor::array(PrimitiveType::U2, 3);
        assert_eq!(ty.encoded_length(), 6);
        assert_eq!(ty.rust_type(), "[u16; 3]");
    }

    #[test]
    fn test_type_descriptor_length_overflow() {
        let ty = TypeDescriptor::array(PrimitiveType::U4, usize::MAX / 2);
        assert_eq!(ty.checked_encoded_length(), None);
        assert_eq!(ty.encoded_length(), usize::MAX);

        let ty = TypeDescriptor::array(PrimitiveType::R8, 4);
        assert_eq!(ty.checked_encoded_length(), Some(32));
    }

    #[test]
    fn test_type_descriptor_scalar() {
        let ty: TypeDescriptor = PrimitiveType::I4.into();
        assert!(!ty.is_array());
        assert_eq!(ty.encoded_length(), 4);
        assert_eq!(ty.rust_type(), "i32");
    }

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new("UBX")
            .with_group(GroupDef::new("NAV", 0x01))
            .with_group(GroupDef::new("ACK", 0x05));

        assert_eq!(schema.get_group("ACK").map(|g| g.class_id), Some(0x05));
        assert!(schema.get_group("CFG").is_none());
        assert_eq!(schema.qualified_name("NAV", "POSLLH"), "UBX.NAV.POSLLH");
        assert_eq!(schema.message_count(), 0);
    }
}
