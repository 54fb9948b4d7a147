//! Petra types.
//!
//! Scalars are `Bool`, signed integers of 8/16/32/64 bits and IEEE floats of
//! 32/64 bits. Aggregates are fixed-length arrays, structs with named fields
//! and pointers. Types are immutable values compared structurally. Aggregate
//! payloads sit behind `Arc`, so cloning a type never copies a field list.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ValidationError;

/// Width of a signed integer type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub const ALL: [IntWidth; 4] = [IntWidth::W8, IntWidth::W16, IntWidth::W32, IntWidth::W64];

    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self, ValidationError> {
        match bits {
            8 => Ok(IntWidth::W8),
            16 => Ok(IntWidth::W16),
            32 => Ok(IntWidth::W32),
            64 => Ok(IntWidth::W64),
            other => Err(ValidationError::UnsupportedIntWidth(other)),
        }
    }

    /// Smallest representable value, `-(2^(bits-1))`.
    pub const fn min_value(self) -> i128 {
        -(1i128 << (self.bits() - 1))
    }

    /// Largest representable value, `2^(bits-1) - 1`.
    pub const fn max_value(self) -> i128 {
        (1i128 << (self.bits() - 1)) - 1
    }

    pub const fn contains(self, value: i128) -> bool {
        self.min_value() <= value && value <= self.max_value()
    }
}

/// Width of an IEEE floating-point type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    W32,
    W64,
}

impl FloatWidth {
    pub const fn bits(self) -> u32 {
        match self {
            FloatWidth::W32 => 32,
            FloatWidth::W64 => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self, ValidationError> {
        match bits {
            32 => Ok(FloatWidth::W32),
            64 => Ok(FloatWidth::W64),
            other => Err(ValidationError::UnsupportedFloatWidth(other)),
        }
    }
}

/// A Petra type.
///
/// Equality is structural: two struct types with the same ordered fields are
/// the same type, regardless of where they were constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Bool,
    Int(IntWidth),
    Float(FloatWidth),
    Array(Arc<ArrayType>),
    Struct(Arc<StructType>),
    Pointer(Arc<Type>),
}

impl Type {
    pub const BOOL: Type = Type::Bool;
    pub const INT8: Type = Type::Int(IntWidth::W8);
    pub const INT16: Type = Type::Int(IntWidth::W16);
    pub const INT32: Type = Type::Int(IntWidth::W32);
    pub const INT64: Type = Type::Int(IntWidth::W64);
    pub const FLOAT32: Type = Type::Float(FloatWidth::W32);
    pub const FLOAT64: Type = Type::Float(FloatWidth::W64);

    /// Fixed-length array of `element`.
    pub fn array(element: Type, length: usize) -> Type {
        Type::Array(Arc::new(ArrayType { element, length }))
    }

    /// Struct with the given ordered fields. Field names must be unique.
    pub fn structure<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Type)>,
    ) -> Result<Type, ValidationError> {
        StructType::new(fields).map(|s| Type::Struct(Arc::new(s)))
    }

    pub fn pointer(pointee: Type) -> Type {
        Type::Pointer(Arc::new(pointee))
    }

    pub fn int_width(&self) -> Option<IntWidth> {
        match self {
            Type::Int(width) => Some(*width),
            _ => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Type::Array(_) | Type::Struct(_))
    }

    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(pointee) => Some(pointee),
            _ => None,
        }
    }

    /// Check that an integer literal fits this type. Non-integer types accept anything.
    pub fn range_check(&self, value: i128) -> Result<(), ValidationError> {
        match self {
            Type::Int(width) if !width.contains(value) => Err(ValidationError::IntOutOfRange {
                ty: self.to_string(),
                value,
            }),
            _ => Ok(()),
        }
    }

    /// Resolve `field` against this aggregate, returning its position and type.
    ///
    /// Arrays accept positions below their length. Structs accept a position
    /// or a field name. Every other type has no fields.
    pub fn resolve_field(&self, field: &Field) -> Result<(usize, &Type), ValidationError> {
        let resolved = match (self, field) {
            (Type::Array(array), Field::Index(index)) if *index < array.length => {
                Some((*index, &array.element))
            }
            (Type::Struct(structure), Field::Index(index)) => structure
                .fields
                .get(*index)
                .map(|(_, ty)| (*index, ty)),
            (Type::Struct(structure), Field::Name(name)) => structure
                .field_index(name)
                .map(|index| (index, &structure.fields[index].1)),
            _ => None,
        };
        resolved.ok_or_else(|| ValidationError::UnknownField {
            ty: self.to_string(),
            field: field.to_string(),
        })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::Int(width) => write!(f, "Int{}", width.bits()),
            Type::Float(width) => write!(f, "Float{}", width.bits()),
            Type::Array(array) => write!(f, "[{}; {}]", array.element, array.length),
            Type::Struct(structure) => {
                write!(f, "{{")?;
                for (i, (name, ty)) in structure.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, "}}")
            }
            Type::Pointer(pointee) => write!(f, "*{pointee}"),
        }
    }
}

/// Fixed-length homogeneous array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub element: Type,
    pub length: usize,
}

/// Struct with ordered, uniquely named fields.
#[derive(Clone, Debug)]
pub struct StructType {
    fields: Vec<(String, Type)>,
    index: FxHashMap<String, usize>,
}

impl StructType {
    pub fn new<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Type)>,
    ) -> Result<Self, ValidationError> {
        let fields: Vec<(String, Type)> = fields.into_iter().map(|(n, t)| (n.into(), t)).collect();
        let mut index = FxHashMap::default();
        for (i, (name, _)) in fields.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ValidationError::DuplicateFieldName(name.clone()));
            }
        }
        Ok(StructType { fields, index })
    }

    pub fn fields(&self) -> &[(String, Type)] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// The name index is derived from `fields`.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for StructType {}

/// Selects one element of an aggregate: a position, or a struct field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Index(usize),
    Name(String),
}

impl From<usize> for Field {
    fn from(index: usize) -> Self {
        Field::Index(index)
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Name(name.to_owned())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Name(name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Index(index) => write!(f, "{index}"),
            Field::Name(name) => write!(f, "`{name}`"),
        }
    }
}

/// Result type of a function: nothing, or one value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReturnType {
    #[default]
    Void,
    Value(Type),
}

impl ReturnType {
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            ReturnType::Void => None,
            ReturnType::Value(ty) => Some(ty),
        }
    }
}

impl From<Type> for ReturnType {
    fn from(ty: Type) -> Self {
        ReturnType::Value(ty)
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => write!(f, "()"),
            ReturnType::Value(ty) => ty.fmt(f),
        }
    }
}
