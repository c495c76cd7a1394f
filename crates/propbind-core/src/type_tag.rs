//! Runtime type descriptors carried by every property.

use std::any::{TypeId, type_name};
use std::fmt;

/// Coarse classification of a property's value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    /// `i8`
    Byte,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// `String`
    Text,
    /// Any other type; inspect the [`TypeTag`] for details.
    Other,
}

/// Explicit descriptor of a property's value type.
///
/// Built once at construction with [`TypeTag::of`] and returned by
/// [`Property::value_type`](crate::property::Property::value_type).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
    kind: ValueKind,
}

impl TypeTag {
    /// Describe `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();
        let kind = if id == TypeId::of::<bool>() {
            ValueKind::Bool
        } else if id == TypeId::of::<i8>() {
            ValueKind::Byte
        } else if id == TypeId::of::<i16>() {
            ValueKind::Short
        } else if id == TypeId::of::<i32>() {
            ValueKind::Int
        } else if id == TypeId::of::<i64>() {
            ValueKind::Long
        } else if id == TypeId::of::<f32>() {
            ValueKind::Float
        } else if id == TypeId::of::<f64>() {
            ValueKind::Double
        } else if id == TypeId::of::<String>() {
            ValueKind::Text
        } else {
            ValueKind::Other
        };
        Self {
            id,
            name: type_name::<T>(),
            kind,
        }
    }

    /// Whether this tag describes `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The compiler-provided type name (diagnostic only, not stable).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTag")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
