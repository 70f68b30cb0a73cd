//! Value codecs: conversions between a header's wire text and its typed
//! [`Value`].
//!
//! [`Codec`] is the closed set of codecs a header can be bound to. Each
//! variant delegates to a [`ValueCodec`] implementation.

use crate::{errors::CodecError, header::Value};
use std::fmt::{Display, Formatter};

mod date_time;
mod digit;
mod generic;

pub use date_time::*;
pub use digit::*;
pub use generic::*;

/// Parse/build pair for one kind of header value.
pub trait ValueCodec {
    /// Converts wire text into a typed value.
    fn parse(&self, raw: &str) -> Result<Value, CodecError>;

    /// Renders a typed value as wire text.
    fn build(&self, value: &Value) -> Result<String, CodecError>;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
#[non_exhaustive]
pub enum Codec {
    #[default]
    Generic,
    Digit,
    DateTime(DateMode),
}

impl Codec {
    /// The date-time codec in its default mode.
    pub const DATE_TIME: Codec = Codec::DateTime(DateMode::Strict);

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Digit => "digit",
            Self::DateTime(DateMode::Strict) => "date_time",
            Self::DateTime(DateMode::Lenient) => "date_time(lenient)",
        }
    }

    #[inline]
    pub fn is_generic(self) -> bool {
        self == Self::Generic
    }
}

impl ValueCodec for Codec {
    #[inline]
    fn parse(&self, raw: &str) -> Result<Value, CodecError> {
        match *self {
            Self::Generic => Generic.parse(raw),
            Self::Digit => Digit.parse(raw),
            Self::DateTime(mode) => HttpDate::new(mode).parse(raw),
        }
    }

    #[inline]
    fn build(&self, value: &Value) -> Result<String, CodecError> {
        match *self {
            Self::Generic => Generic.build(value),
            Self::Digit => Digit.build(value),
            Self::DateTime(mode) => HttpDate::new(mode).build(value),
        }
    }
}

impl Display for Codec {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
