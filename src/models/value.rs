//! Column values.

use std::fmt;

/// A single column value produced by a [`Record`](super::Record).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value, rendered as `invalid`
    Null,
    Int(i64),
    UInt(u64),
    /// Rendered with exactly two fractional digits
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Literal text for this value.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// The value as it is bound to a statement parameter.
    ///
    /// Floats carry the same two fractional digits they render with, so bound
    /// and inline values store identically. Other kinds pass through.
    pub fn into_param(self) -> Self {
        match self {
            Self::Float(v) => Self::Float(format!("{:.2}", v).parse().unwrap_or(v)),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("invalid"),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:.2}", v),
            Self::Text(v) => f.write_str(v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from!(Int as i64: i8, i16, i32, i64, isize);
impl_from!(UInt as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
