//! Dynamic field values crossing the snapshot boundary.

use std::fmt;

use crate::error::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  UInt(u64),
  Float(f64),
  Char(char),
  String(String),
  List(Vec<Value>),
}

impl Value {
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::UInt(_) => "uint",
      Value::Float(_) => "float",
      Value::Char(_) => "char",
      Value::String(_) => "string",
      Value::List(_) => "list",
    }
  }

  fn mismatch(&self, expected: &'static str) -> FieldError {
    FieldError::TypeMismatch {
      expected,
      found: self.kind(),
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => write!(f, "null"),
      Value::Bool(v) => write!(f, "{v}"),
      Value::Int(v) => write!(f, "{v}"),
      Value::UInt(v) => write!(f, "{v}"),
      Value::Float(v) => write!(f, "{v}"),
      Value::Char(v) => write!(f, "{v:?}"),
      Value::String(v) => write!(f, "{v:?}"),
      Value::List(v) => {
        write!(f, "[")?;
        for (i, item) in v.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{item}")?;
        }
        write!(f, "]")
      }
    }
  }
}

/// Conversion between a component field and a [`Value`].
///
/// Implemented for the primitive types, `String`, `Option<T>` and `Vec<T>`.
/// `#[derive(Component)]` requires it for every field.
pub trait FieldValue: Sized {
  fn to_value(&self) -> Value;
  fn from_value(value: Value) -> Result<Self, FieldError>;
}

macro_rules! impl_int_field {
  ($variant:ident, $wide:ty, $($t:ty),*) => {
    $(
      impl FieldValue for $t {
        #[inline]
        fn to_value(&self) -> Value {
          Value::$variant(*self as $wide)
        }

        fn from_value(value: Value) -> Result<Self, FieldError> {
          let out_of_range = |value: String| FieldError::OutOfRange {
            value,
            target: stringify!($t),
          };

          match value {
            Value::Int(v) => <$t>::try_from(v).map_err(|_| out_of_range(v.to_string())),
            Value::UInt(v) => <$t>::try_from(v).map_err(|_| out_of_range(v.to_string())),
            other => Err(other.mismatch(stringify!($t))),
          }
        }
      }
    )*
  };
}

impl_int_field!(Int, i64, i8, i16, i32, i64, isize);
impl_int_field!(UInt, u64, u8, u16, u32, u64, usize);

impl FieldValue for f64 {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Float(*self)
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::Float(v) => Ok(v),
      other => Err(other.mismatch("f64")),
    }
  }
}

impl FieldValue for f32 {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Float(*self as f64)
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::Float(v) => Ok(v as f32),
      other => Err(other.mismatch("f32")),
    }
  }
}

impl FieldValue for bool {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Bool(*self)
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::Bool(v) => Ok(v),
      other => Err(other.mismatch("bool")),
    }
  }
}

impl FieldValue for char {
  #[inline]
  fn to_value(&self) -> Value {
    Value::Char(*self)
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::Char(v) => Ok(v),
      other => Err(other.mismatch("char")),
    }
  }
}

impl FieldValue for String {
  #[inline]
  fn to_value(&self) -> Value {
    Value::String(self.clone())
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::String(v) => Ok(v),
      other => Err(other.mismatch("string")),
    }
  }
}

impl<T: FieldValue> FieldValue for Option<T> {
  fn to_value(&self) -> Value {
    match self {
      Some(v) => v.to_value(),
      None => Value::Null,
    }
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::Null => Ok(None),
      other => T::from_value(other).map(Some),
    }
  }
}

impl<T: FieldValue> FieldValue for Vec<T> {
  fn to_value(&self) -> Value {
    Value::List(self.iter().map(FieldValue::to_value).collect())
  }

  fn from_value(value: Value) -> Result<Self, FieldError> {
    match value {
      Value::List(items) => items.into_iter().map(T::from_value).collect(),
      other => Err(other.mismatch("list")),
    }
  }
}

impl FieldValue for Value {
  #[inline]
  fn to_value(&self) -> Value {
    self.clone()
  }

  #[inline]
  fn from_value(value: Value) -> Result<Self, FieldError> {
    Ok(value)
  }
}
