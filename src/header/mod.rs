mod header_name;
mod header_value;

pub use header_name::*;
pub use header_value::*;

use crate::{
    codec::{Codec, ValueCodec},
    errors::CodecError,
};
use bytes::BytesMut;
use once_cell::unsync::OnceCell;

pub const EOL: &str = "\r\n";

static EMPTY_VALUE: Value = Value::Str(String::new());

/// A header field: a name bound to a [`Codec`], holding its value in typed
/// and/or wire form.
///
/// Whichever side was written last is authoritative. The other side is
/// computed through the codec on first read and cached until the next write.
/// A header that was never written reads as the empty string on both sides.
#[derive(Debug, Clone)]
pub struct Header {
    name: HeaderName,
    codec: Codec,
    typed: OnceCell<Value>,
    raw: OnceCell<String>,
}

impl Header {
    #[inline]
    pub fn new(name: impl Into<HeaderName>, codec: Codec) -> Self {
        Self {
            name: name.into(),
            codec,
            typed: OnceCell::new(),
            raw: OnceCell::new(),
        }
    }

    #[inline]
    pub fn generic(name: impl Into<HeaderName>) -> Self {
        Self::new(name, Codec::Generic)
    }

    #[inline]
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    #[inline]
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Returns `true` until the first `set`, `set_raw` or `add`.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.typed.get().is_none() && self.raw.get().is_none()
    }

    /// Replaces the value with a typed one.
    pub fn set(&mut self, value: impl Into<Value>) -> &mut Self {
        self.typed = OnceCell::with_value(value.into());
        self.raw = OnceCell::new();
        self
    }

    /// Replaces the value with raw wire text.
    pub fn set_raw(&mut self, raw: impl Into<String>) -> &mut Self {
        self.raw = OnceCell::with_value(raw.into());
        self.typed = OnceCell::new();
        self
    }

    /// Appends a value, joining its rendering to the current one with `", "`.
    ///
    /// On an unset header, or one whose current rendering is empty, this is
    /// the same as [`Header::set`]. Otherwise the raw side becomes
    /// authoritative, so a later [`Header::value`] parses the combined text.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<&mut Self, CodecError> {
        let value = value.into();
        if self.is_unset() || self.raw_value()?.is_empty() {
            return Ok(self.set(value));
        }

        let addition = self.codec.build(&value)?;
        let current = self.raw_value()?;
        let mut raw = String::with_capacity(current.len() + 2 + addition.len());
        raw.push_str(current);
        raw.push_str(", ");
        raw.push_str(&addition);
        Ok(self.set_raw(raw))
    }

    /// The typed value, parsed from the raw side if needed.
    pub fn value(&self) -> Result<&Value, CodecError> {
        if self.is_unset() {
            return Ok(&EMPTY_VALUE);
        }
        self.typed.get_or_try_init(|| match self.raw.get() {
            Some(raw) => self.codec.parse(raw),
            None => Ok(Value::default()),
        })
    }

    /// The wire text, built from the typed side if needed.
    pub fn raw_value(&self) -> Result<&str, CodecError> {
        if self.is_unset() {
            return Ok("");
        }
        self.raw
            .get_or_try_init(|| match self.typed.get() {
                Some(value) => self.codec.build(value),
                None => Ok(String::new()),
            })
            .map(String::as_str)
    }

    /// `"<Name>: <raw-value>"`, without the line terminator.
    pub fn to_line(&self) -> Result<String, CodecError> {
        let raw = self.raw_value()?;
        let mut line = String::with_capacity(self.name.as_str().len() + 2 + raw.len());
        line.push_str(self.name.as_str());
        line.push_str(": ");
        line.push_str(raw);
        Ok(line)
    }

    /// Writes `"<Name>: <raw-value>\r\n"` into `wbuf`.
    pub fn encode(&self, wbuf: &mut BytesMut) -> Result<(), CodecError> {
        let raw = self.raw_value()?;
        wbuf.extend_from_slice(self.name.as_bytes());
        wbuf.extend_from_slice(b": ");
        wbuf.extend_from_slice(raw.as_bytes());
        wbuf.extend_from_slice(EOL.as_bytes());
        Ok(())
    }
}
