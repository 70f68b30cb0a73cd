use crate::{
    codec::{fmt_http_date, ValueCodec},
    errors::CodecError,
    header::Value,
};
use std::fmt::Write;
use tracing::trace;

const LIST_SEP: &str = ", ";

/// The fallback codec.
///
/// Parsing is the identity: inbound wire text is opaque and comes back as
/// [`Value::Str`]. Building serializes any value tree: scalars by their text
/// form, pairs as `key=value`, maps and lists joined by `", "`. The two
/// directions are intentionally not inverses of each other.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub struct Generic;

impl ValueCodec for Generic {
    #[inline]
    fn parse(&self, raw: &str) -> Result<Value, CodecError> {
        Ok(Value::Str(raw.to_owned()))
    }

    fn build(&self, value: &Value) -> Result<String, CodecError> {
        let mut out = String::new();
        render(value, &mut out)?;
        Ok(out)
    }
}

fn render(value: &Value, out: &mut String) -> Result<(), CodecError> {
    match value {
        Value::Str(s) => out.push_str(s),
        Value::Int(n) => push_display(out, n),
        Value::UInt(n) => push_display(out, n),
        Value::Float(f) => render_float(*f, out)?,
        Value::Bool(b) => push_display(out, b),
        Value::DateTime(dt) => out.push_str(&fmt_http_date(dt)?),
        Value::Date(d) => push_display(out, d.format("%Y-%m-%d")),
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => out.push_str(s),
            Err(e) => {
                trace!(error=%e, "bytes are not valid UTF-8");
                return Err(CodecError::UnsupportedValueType("non UTF-8 bytes"));
            }
        },
        Value::Pair(k, v) => {
            render(k, out)?;
            out.push('=');
            render(v, out)?;
        }
        Value::Map(map) => {
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(LIST_SEP);
                }
                out.push_str(k);
                out.push('=');
                render(v, out)?;
            }
        }
        Value::List(list) => {
            for (i, v) in list.iter().enumerate() {
                if i > 0 {
                    out.push_str(LIST_SEP);
                }
                render(v, out)?;
            }
        }
    }
    Ok(())
}

#[inline]
fn push_display(out: &mut String, v: impl std::fmt::Display) {
    // writing into a String never fails
    let _ = write!(out, "{}", v);
}

// Shortest round-trippable form, always with a '.' separator. Integral
// values keep a trailing ".0" so they stay distinguishable from integers.
fn render_float(f: f64, out: &mut String) -> Result<(), CodecError> {
    if !f.is_finite() {
        return Err(CodecError::UnsupportedValueType("non-finite float"));
    }
    let start = out.len();
    push_display(out, f);
    if !out[start..].contains('.') {
        out.push_str(".0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn build(v: impl Into<Value>) -> String {
        Generic.build(&v.into()).unwrap()
    }

    #[test]
    fn test_parse_is_identity() {
        let raws = ["", "keep-alive", "token; option=1", "a=1, b=2", "  padded  "];
        for raw in raws {
            assert_eq!(Generic.parse(raw).unwrap(), Value::Str(raw.into()));
        }
    }

    #[test]
    fn test_build_scalars() {
        assert_eq!(build("token; option=1"), "token; option=1");
        assert_eq!(build(16956), "16956");
        assert_eq!(build(-5), "-5");
        assert_eq!(build(u64::MAX), "18446744073709551615");
        assert_eq!(build(3.14), "3.14");
        assert_eq!(build(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(build(3.0), "3.0");
        assert_eq!(build(-0.5), "-0.5");
        assert_eq!(build(true), "true");
        assert_eq!(build(Bytes::from_static(b"opaque")), "opaque");
        assert_eq!(
            build(NaiveDate::from_ymd_opt(1990, 8, 24).unwrap()),
            "1990-08-24"
        );
        assert_eq!(
            build(Utc.with_ymd_and_hms(1969, 7, 21, 2, 56, 15).unwrap()),
            "Mon, 21 Jul 1969 02:56:15 GMT"
        );
    }

    #[test]
    fn test_build_composites() {
        let map = Value::map([("string", Value::from("value")), ("one", Value::from(1))]);
        assert_eq!(build(map), "string=value, one=1");

        let list = Value::List(vec![
            Value::from("number"),
            Value::map([("Pi", 3.14)]),
            Value::from(16956),
        ]);
        assert_eq!(build(list), "number, Pi=3.14, 16956");

        assert_eq!(build(("max-age", 3600)), "max-age=3600");
        assert_eq!(
            build(("q", Value::map([("a", 1), ("b", 2)]))),
            "q=a=1, b=2"
        );
        assert_eq!(build(vec![("no-cache", true), ("max-age", false)]), "no-cache=true, max-age=false");
        assert_eq!(build(Value::List(Vec::new())), "");
        assert_eq!(build(Value::map(Vec::<(String, Value)>::new())), "");
        assert_eq!(
            build(vec![Value::from(vec![1, 2]), Value::from(vec![3])]),
            "1, 2, 3"
        );
    }

    #[test]
    fn test_build_unsupported() {
        let bad = [
            (Value::Float(f64::NAN), "non-finite float"),
            (Value::Float(f64::INFINITY), "non-finite float"),
            (Value::Bytes(Bytes::from_static(b"\xff\xfe")), "non UTF-8 bytes"),
            (
                Value::List(vec![Value::from("ok"), Value::Float(f64::NEG_INFINITY)]),
                "non-finite float",
            ),
        ];
        for (v, reason) in bad {
            assert_eq!(
                Generic.build(&v),
                Err(CodecError::UnsupportedValueType(reason))
            );
        }
    }

    #[test]
    fn test_build_date_time_out_of_range() {
        let far = Utc.with_ymd_and_hms(11_476, 8, 15, 5, 20, 0).unwrap();
        assert_eq!(
            Generic.build(&Value::List(vec![Value::from("at"), Value::from(far)])),
            Err(CodecError::Format("year out of range: 11476".into()))
        );
        assert_eq!(
            build(Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap()),
            "Fri, 31 Dec 9999 23:59:59 GMT"
        );
    }
}
