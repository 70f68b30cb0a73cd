use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use indexmap::IndexMap;

/// Ordered mapping used for composite header values.
pub type ValueMap = IndexMap<String, Value>;

/// The native, typed form of a header value.
///
/// Which variants a header produces or accepts depends on its codec; the
/// generic codec renders all of them.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    /// Opaque octets; rendered only when they are valid UTF-8.
    Bytes(Bytes),
    Pair(Box<Value>, Box<Value>),
    Map(ValueMap),
    List(Vec<Value>),
}

impl Value {
    #[inline]
    pub fn pair(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self::Pair(Box::new(key.into()), Box::new(value.into()))
    }

    /// Builds a map from `(key, value)` pairs, keeping their order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt(n) => Some(n),
            Self::Int(n) => u64::try_from(n).ok(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty_str(&self) -> bool {
        matches!(self, Self::Str(s) if s.is_empty())
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::DateTime(_) => "date-time",
            Self::Date(_) => "date",
            Self::Bytes(_) => "bytes",
            Self::Pair(..) => "pair",
            Self::Map(_) => "map",
            Self::List(_) => "list",
        }
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Self::Str(String::new())
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident as $conv:ty,)*) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(v: $t) -> Self {
                    Self::$variant(<$conv>::from(v))
                }
            }
        )*
    };
}

value_from! {
    String => Str as String,
    &str => Str as String,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    bool => Bool as bool,
    DateTime<FixedOffset> => DateTime as DateTime<FixedOffset>,
    NaiveDate => Date as NaiveDate,
    Bytes => Bytes as Bytes,
    ValueMap => Map as ValueMap,
}

impl From<usize> for Value {
    #[inline]
    fn from(v: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Self::UInt(v as u64)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v.fixed_offset())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<(K, V)> for Value {
    #[inline]
    fn from((k, v): (K, V)) -> Self {
        Self::pair(k, v)
    }
}
