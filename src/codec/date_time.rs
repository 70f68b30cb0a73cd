use crate::{codec::ValueCodec, errors::CodecError, header::Value};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use tracing::trace;

/// IMF-fixdate, the preferred HTTP-date format (RFC 7231, section 7.1.1.1).
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const HTTP_DATE_LEN: usize = 29;

// IMF-fixdate after the "<Dow>, " prefix
const HTTP_DATE_TAIL_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

// chrono rejects a day name that disagrees with the date, so day names are
// stripped before any of these are tried
static DATE_TIME_FORMATS: [&str; 9] = [
    "%d %b %Y %H:%M:%S",
    "%d-%b-%y %H:%M:%S",
    "%b %d %H:%M:%S %Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d %b %Y %H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d-%b-%Y %H:%M:%S",
];

static DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d %b %Y"];

static DAY_NAMES: [(&str, &str); 7] = [
    ("Mon", "Monday"),
    ("Tue", "Tuesday"),
    ("Wed", "Wednesday"),
    ("Thu", "Thursday"),
    ("Fri", "Friday"),
    ("Sat", "Saturday"),
    ("Sun", "Sunday"),
];

// offsets in minutes east of UTC
static ZONE_ABBREVIATIONS: [(&str, i32); 32] = [
    ("GMT", 0),
    ("UT", 0),
    ("UTC", 0),
    ("Z", 0),
    ("WET", 0),
    ("WEST", 60),
    ("BST", 60),
    ("CET", 60),
    ("MET", 60),
    ("CEST", 120),
    ("MEST", 120),
    ("EET", 120),
    ("EEST", 180),
    ("MSK", 180),
    ("IST", 330),
    ("HKT", 480),
    ("JST", 540),
    ("KST", 540),
    ("AEST", 600),
    ("AEDT", 660),
    ("NZST", 720),
    ("NZDT", 780),
    ("EST", -300),
    ("EDT", -240),
    ("CST", -360),
    ("CDT", -300),
    ("MST", -420),
    ("MDT", -360),
    ("PST", -480),
    ("PDT", -420),
    ("AKST", -540),
    ("HST", -600),
];

/// How much the date-time codec accepts when parsing.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
pub enum DateMode {
    /// Only IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
    #[default]
    Strict,
    /// IMF-fixdate, RFC 850, asctime, ISO-8601-like and date-only forms,
    /// with a zone abbreviation or a numeric offset.
    Lenient,
}

/// Codec for HTTP-date headers such as `Date`, `Expires` and
/// `Last-Modified`.
///
/// Building accepts a date-time in any offset, a date (midnight UTC), a
/// textual date parsed in the codec's [`DateMode`], or an integer number of
/// seconds since the Unix epoch. Output is always IMF-fixdate in GMT.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct HttpDate {
    mode: DateMode,
}

impl HttpDate {
    #[inline]
    pub const fn new(mode: DateMode) -> Self {
        Self { mode }
    }

    #[inline]
    pub fn mode(&self) -> DateMode {
        self.mode
    }

    pub fn parse_date_time(&self, raw: &str) -> Result<DateTime<FixedOffset>, CodecError> {
        match self.mode {
            DateMode::Strict => parse_http_date(raw),
            DateMode::Lenient => parse_date_lenient(raw),
        }
    }

    fn to_utc(&self, value: &Value) -> Result<DateTime<Utc>, CodecError> {
        match *value {
            Value::DateTime(ref dt) => Ok(dt.with_timezone(&Utc)),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .ok_or_else(|| CodecError::Format(format!("invalid date: {}", d))),
            Value::Str(ref s) => Ok(self.parse_date_time(s)?.with_timezone(&Utc)),
            Value::Int(secs) => from_epoch(secs),
            Value::UInt(secs) => i64::try_from(secs)
                .map_err(|_| out_of_range(secs))
                .and_then(from_epoch),
            ref other => Err(CodecError::UnsupportedValueType(other.kind())),
        }
    }
}

impl ValueCodec for HttpDate {
    #[inline]
    fn parse(&self, raw: &str) -> Result<Value, CodecError> {
        self.parse_date_time(raw).map(Value::DateTime)
    }

    #[inline]
    fn build(&self, value: &Value) -> Result<String, CodecError> {
        fmt_http_date(&self.to_utc(value)?)
    }
}

/// Renders a timestamp as IMF-fixdate, converting it to UTC first.
///
/// IMF-fixdate has a four-digit year, so years outside `0..=9999` are
/// rejected.
pub fn fmt_http_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> Result<String, CodecError> {
    let utc = dt.with_timezone(&Utc);
    if !(0..=9999).contains(&utc.year()) {
        trace!(year = utc.year(), "http date year out of range");
        return Err(CodecError::Format(format!(
            "year out of range: {}",
            utc.year()
        )));
    }
    Ok(utc.format(HTTP_DATE_FORMAT).to_string())
}

/// Parses IMF-fixdate and nothing else.
///
/// The day name must be a valid one but is not checked against the date.
pub fn parse_http_date(raw: &str) -> Result<DateTime<FixedOffset>, CodecError> {
    if raw.len() != HTTP_DATE_LEN {
        trace!(raw, "bad http date length");
        return Err(invalid_date(raw));
    }
    let tail = strip_day_prefix(raw).ok_or_else(|| {
        trace!(raw, "bad http date day name");
        invalid_date(raw)
    })?;
    match NaiveDateTime::parse_from_str(tail, HTTP_DATE_TAIL_FORMAT) {
        Ok(naive) => Ok(Utc.from_utc_datetime(&naive).fixed_offset()),
        Err(e) => {
            trace!(raw, error=%e, "bad http date");
            Err(invalid_date(raw))
        }
    }
}

// "Sat, " -> the rest
fn strip_day_prefix(raw: &str) -> Option<&str> {
    let tail = raw.get(3..)?.strip_prefix(", ")?;
    let day = &raw[..3];
    DAY_NAMES
        .iter()
        .any(|&(abbr, _)| abbr == day)
        .then_some(tail)
}

/// Parses the date grammars accepted by [`DateMode::Lenient`], keeping the
/// original offset.
///
/// A zone abbreviation missing from the built-in table is read as UTC.
pub fn parse_date_lenient(raw: &str) -> Result<DateTime<FixedOffset>, CodecError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let (body, offset) = split_zone(s);
    let naive = parse_naive(body).ok_or_else(|| {
        trace!(raw, "unrecognized date format");
        invalid_date(raw)
    })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| invalid_date(raw))
}

fn split_zone(s: &str) -> (&str, FixedOffset) {
    if let Some((body, zone)) = s.rsplit_once(char::is_whitespace) {
        if let Some(offset) = zone_offset(zone) {
            return (body.trim_end(), offset);
        }
    }
    split_attached_offset(s).unwrap_or((s, Utc.fix()))
}

// "05:17+03:00", "05:17:00-0500", "05:17Z"
fn split_attached_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if let Some(body) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        if body.ends_with(|c: char| c.is_ascii_digit()) {
            return Some((body, Utc.fix()));
        }
    }
    let (body, zone) = s.split_at(s.rfind(|c: char| c == '+' || c == '-')?);
    // a '-' before any time component belongs to the date
    if !body.contains(':') {
        return None;
    }
    let minutes = numeric_offset(zone)?;
    Some((body, FixedOffset::east_opt(minutes * 60)?))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    // asctime pads the day with a space; collapse runs before matching
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let s = skip_day_name(&s);
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// "Sunday, 06-Nov-94 ..." -> "06-Nov-94 ..."
fn skip_day_name(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let word = &s[..end];
    let is_day = DAY_NAMES.iter().any(|(abbr, full)| {
        word.eq_ignore_ascii_case(abbr) || word.eq_ignore_ascii_case(full)
    });
    if is_day {
        s[end..].trim_start_matches(',').trim_start()
    } else {
        s
    }
}

fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let minutes = match zone.as_bytes().first()? {
        b'+' | b'-' => numeric_offset(zone)?,
        _ => match ZONE_ABBREVIATIONS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(zone))
        {
            Some(&(_, minutes)) => minutes,
            None if zone.bytes().all(|b| b.is_ascii_alphabetic()) => {
                trace!(zone, "unknown zone abbreviation, assuming UTC");
                0
            }
            None => return None,
        },
    };
    FixedOffset::east_opt(minutes * 60)
}

// "+hh", "+hhmm" or "+hh:mm"
fn numeric_offset(zone: &str) -> Option<i32> {
    let (sign, rest) = zone.split_at(1);
    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if !(digits.len() == 2 || digits.len() == 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().ok()?
    } else {
        0
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    let total = hours * 60 + minutes;
    Some(if sign == "-" { -total } else { total })
}

fn from_epoch(secs: i64) -> Result<DateTime<Utc>, CodecError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| out_of_range(secs))
}

#[inline]
fn invalid_date(raw: &str) -> CodecError {
    CodecError::Format(format!("invalid date: {:?}", raw))
}

#[inline]
fn out_of_range(secs: impl std::fmt::Display) -> CodecError {
    CodecError::Format(format!("timestamp out of range: {}", secs))
}
