use crate::{codec::ValueCodec, errors::CodecError, header::Value};
use tracing::trace;

/// Codec for headers carrying a single non-negative decimal integer, such as
/// `Content-Length`, `Age` and `Max-Forwards`.
///
/// Parsing is strict: after trimming optional whitespace the text must be a
/// run of ASCII digits that fits in a `u64`. Anything else is a
/// [`CodecError::Format`], never a silently truncated number.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub struct Digit;

impl Digit {
    pub fn parse_u64(raw: &str) -> Result<u64, CodecError> {
        let s = raw.trim_matches(|c| c == ' ' || c == '\t');
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            trace!(raw, "not a decimal integer");
            return Err(CodecError::Format(format!("not a decimal integer: {:?}", raw)));
        }
        s.parse::<u64>().map_err(|e| {
            trace!(raw, error=%e, "decimal integer out of range");
            CodecError::Format(format!("decimal integer out of range: {:?}", raw))
        })
    }
}

impl ValueCodec for Digit {
    #[inline]
    fn parse(&self, raw: &str) -> Result<Value, CodecError> {
        Self::parse_u64(raw).map(Value::UInt)
    }

    fn build(&self, value: &Value) -> Result<String, CodecError> {
        match *value {
            Value::UInt(n) => Ok(n.to_string()),
            Value::Int(n) if n >= 0 => Ok(n.to_string()),
            Value::Int(n) => Err(CodecError::Format(format!("negative integer: {}", n))),
            Value::Str(ref s) => Self::parse_u64(s).map(|n| n.to_string()),
            ref other => Err(CodecError::UnsupportedValueType(other.kind())),
        }
    }
}
