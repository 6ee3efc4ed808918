//! static element types
//!
//! A [Shape] tells the converter what a node is expected to hold. Composite types are described by a hand-written
//! [Descriptor], an ordered list of named [Slot]s, usually declared as a `const`:
//!
//! ```
//! use jsonplate::shape::{Descriptor, Shape, Slot};
//!
//! const POINT: Descriptor = Descriptor::new(
//!     "Point",
//!     &[Slot::new("x", Shape::Integer), Slot::new("y", Shape::Integer)],
//! );
//!
//! assert_eq!(POINT.slot("y").map(|slot| slot.shape), Some(Shape::Integer));
//! ```
use crate::value::Value;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Unshaped, anything goes
    Any,
    Boolean,
    Integer,
    Decimal,
    String,
    Nullable(&'static Shape),
    List(&'static Shape),
    Struct(&'static Descriptor),
}

impl Shape {
    /// The value a slot of this shape holds when nothing else was provided
    pub fn default_value(&self) -> Value {
        match self {
            Shape::Boolean => Value::Boolean(false),
            Shape::Integer => Value::Integer(0),
            Shape::Decimal => Value::Decimal(0.0),
            Shape::Any | Shape::String | Shape::Nullable(_) | Shape::List(_) | Shape::Struct(_) => {
                Value::Null
            }
        }
    }

    /// Descriptor of a statically shaped type, looking through [Shape::Nullable]
    ///
    /// Returns `None` when the shape has no declared slots.
    pub fn descriptor(&self) -> Option<&'static Descriptor> {
        match self {
            Shape::Struct(descriptor) if !descriptor.slots.is_empty() => Some(*descriptor),
            Shape::Nullable(inner) => inner.descriptor(),
            _ => None,
        }
    }

    /// Element shape of a list, looking through [Shape::Nullable]
    pub fn element(&self) -> Option<Shape> {
        match self {
            Shape::List(element) => Some(**element),
            Shape::Nullable(inner) => inner.element(),
            _ => None,
        }
    }

    /// Shape of a constant that wraps `value` as-is
    pub fn of_value(value: &Value) -> Shape {
        match value {
            Value::Boolean(_) => Shape::Boolean,
            Value::Integer(_) => Shape::Integer,
            Value::Decimal(_) => Shape::Decimal,
            Value::String(_) => Shape::String,
            Value::Null | Value::Array(_) | Value::Object(_) => Shape::Any,
        }
    }

    /// Check `value` against this shape
    ///
    /// The only conversion performed is integer to decimal.
    pub fn coerce(&self, value: Value) -> Result<Value> {
        match (self, value) {
            (Shape::Any, value) => Ok(value),
            (Shape::Boolean, value @ Value::Boolean(_)) => Ok(value),
            (Shape::Integer, value @ Value::Integer(_)) => Ok(value),
            (Shape::Decimal, value @ Value::Decimal(_)) => Ok(value),
            (Shape::Decimal, Value::Integer(int)) => Ok(Value::Decimal(int as f64)),
            (Shape::String, value @ (Value::String(_) | Value::Null)) => Ok(value),
            (Shape::Nullable(_), Value::Null) => Ok(Value::Null),
            (Shape::Nullable(inner), value) => inner.coerce(value),
            (Shape::List(_), Value::Null) => Ok(Value::Null),
            (Shape::List(element), Value::Array(array)) => array
                .into_iter()
                .map(|value| element.coerce(value))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            (Shape::Struct(_), Value::Null) => Ok(Value::Null),
            (Shape::Struct(descriptor), Value::Object(mut object)) => {
                for slot in descriptor.slots {
                    if let Some(field) = object.get_mut(slot.name) {
                        *field = slot.shape.coerce(std::mem::take(field))?;
                    }
                }
                Ok(Value::Object(object))
            }
            (expected, value) => Err(Error::TypeConversion {
                expected: *expected,
                found: value.kind_name(),
            }),
        }
    }

    /// Whether a node of shape `self` may be placed where `target` is expected
    pub(crate) fn fits(&self, target: &Shape) -> bool {
        match target {
            Shape::Any => true,
            Shape::Nullable(inner) if self != target => self.fits(inner),
            _ => self == target,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Any => f.write_str("any"),
            Shape::Boolean => f.write_str("boolean"),
            Shape::Integer => f.write_str("integer"),
            Shape::Decimal => f.write_str("decimal"),
            Shape::String => f.write_str("string"),
            Shape::Nullable(inner) => write!(f, "nullable {inner}"),
            Shape::List(element) => write!(f, "list of {element}"),
            Shape::Struct(descriptor) => f.write_str(descriptor.name),
        }
    }
}

/// The declared slots of a statically shaped type
#[derive(Debug, PartialEq)]
pub struct Descriptor {
    pub name: &'static str,
    pub slots: &'static [Slot],
}

impl Descriptor {
    pub const fn new(name: &'static str, slots: &'static [Slot]) -> Self {
        Self { name, slots }
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub name: &'static str,
    pub shape: Shape,
}

impl Slot {
    pub const fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }
}
