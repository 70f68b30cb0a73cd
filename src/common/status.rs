use crate::errors::NotFoundError;
use std::fmt::{Display, Formatter};

/// Response status class, derived from the first digit of the code.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum StatusClass {
    Informational = 1,
    Successful = 2,
    Redirection = 3,
    ClientError = 4,
    ServerError = 5,
}

impl StatusClass {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Successful => "successful",
            Self::Redirection => "redirection",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

impl Display for StatusClass {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A key for the status registry.
///
/// [`Status::lookup`] only matches [`StatusKey::Code`]; [`Status::fetch`]
/// also accepts the code as text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum StatusKey<'a> {
    Code(i64),
    Text(&'a str),
}

impl StatusKey<'_> {
    fn to_code(self) -> Option<i64> {
        match self {
            Self::Code(code) => Some(code),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

macro_rules! status_key_from {
    ($($t:ty,)*) => {
        $(
            impl From<$t> for StatusKey<'_> {
                #[inline]
                fn from(code: $t) -> Self {
                    Self::Code(i64::from(code))
                }
            }
        )*
    };
}

status_key_from! {
    u16,
    i32,
    u32,
    i64,
}

impl<'a> From<&'a str> for StatusKey<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl From<Status> for StatusKey<'_> {
    #[inline]
    fn from(status: Status) -> Self {
        Self::Code(i64::from(status.code))
    }
}

/// A registered HTTP response status.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Status {
    code: u16,
    name: &'static str,
    cacheable: bool,
    allows_body: bool,
}

macro_rules! statuses {
    ($($code:literal, $name:literal, $cacheable:literal, $allows_body:literal;)*) => {
        [$(
            Status {
                code: $code,
                name: $name,
                cacheable: $cacheable,
                allows_body: $allows_body,
            },
        )*]
    };
}

// sorted by code
static STATUSES: [Status; 58] = statuses! {
    100, "Continue", false, false;
    101, "Switching Protocols", false, false;
    102, "Processing", false, false;

    200, "OK", true, true;
    201, "Created", false, true;
    202, "Accepted", false, true;
    203, "Non-Authoritative Information", true, true;
    204, "No Content", true, false;
    205, "Reset Content", false, false;
    206, "Partial Content", true, true;
    207, "Multi-Status", false, true;
    208, "Already Reported", false, true;

    300, "Multiple Choices", true, true;
    301, "Moved Permanently", true, true;
    302, "Found", false, true;
    303, "See Other", false, true;
    304, "Not Modified", false, false;
    305, "Use Proxy", false, true;
    306, "Reserved", false, true;
    307, "Temporary Redirect", false, true;
    308, "Permanent Redirect", false, true;

    400, "Bad Request", false, true;
    401, "Unauthorized", false, true;
    402, "Payment Required", false, true;
    403, "Forbidden", false, true;
    404, "Not Found", true, true;
    405, "Method Not Allowed", true, true;
    406, "Not Acceptable", false, true;
    407, "Proxy Authentication Required", false, true;
    408, "Request Timeout", false, true;
    409, "Conflict", false, true;
    410, "Gone", true, true;
    411, "Length Required", false, true;
    412, "Precondition Failed", false, true;
    413, "Request Entity Too Large", false, true;
    414, "Request-URI Too Long", true, true;
    415, "Unsupported Media Type", false, true;
    416, "Requested Range Not Satisfiable", false, true;
    417, "Expectation Failed", false, true;
    422, "Unprocessable Entity", false, true;
    423, "Locked", false, true;
    424, "Failed Dependency", false, true;
    426, "Upgrade Required", false, true;
    428, "Precondition Required", false, true;
    429, "Too Many Requests", false, true;
    431, "Request Header Fields Too Large", false, true;
    451, "Unavailable For Legal Reasons", false, true;

    500, "Internal Server Error", false, true;
    501, "Not Implemented", true, true;
    502, "Bad Gateway", false, true;
    503, "Service Unavailable", false, true;
    504, "Gateway Timeout", false, true;
    505, "HTTP Version Not Supported", false, true;
    506, "Variant Also Negotiates (Experimental)", false, true;
    507, "Insufficient Storage", false, true;
    508, "Loop Detected", false, true;
    510, "Not Extended", false, true;
    511, "Network Authentication Required", false, true;
};

impl Status {
    #[inline]
    pub fn code(self) -> u16 {
        self.code
    }

    /// The reason phrase, e.g. `Not Found`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn class(self) -> StatusClass {
        // every registered code is within 100..=599
        Self::classify(self.code).unwrap_or(StatusClass::ServerError)
    }

    #[inline]
    pub fn is_cacheable(self) -> bool {
        self.cacheable
    }

    #[inline]
    pub fn allows_body(self) -> bool {
        self.allows_body
    }

    /// Exact lookup by integer code. A textual key never matches.
    pub fn lookup<'a>(key: impl Into<StatusKey<'a>>) -> Option<Self> {
        match key.into() {
            StatusKey::Code(code) => Self::find(code),
            StatusKey::Text(_) => None,
        }
    }

    /// Lookup by integer code or by the code as text (`"404"`).
    pub fn fetch<'a>(key: impl Into<StatusKey<'a>>) -> Result<Self, NotFoundError> {
        let key = key.into();
        key.to_code().and_then(Self::find).ok_or_else(|| {
            let key = match key {
                StatusKey::Code(code) => code.to_string(),
                StatusKey::Text(s) => s.to_owned(),
            };
            NotFoundError::new("status", key)
        })
    }

    #[inline]
    pub fn fetch_or<'a>(key: impl Into<StatusKey<'a>>, default: Status) -> Self {
        Self::fetch(key).unwrap_or(default)
    }

    #[inline]
    pub fn is_registered<'a>(key: impl Into<StatusKey<'a>>) -> bool {
        Self::fetch(key).is_ok()
    }

    #[inline]
    pub fn all() -> &'static [Status] {
        &STATUSES
    }

    /// The class of any code in `100..=599`, registered or not.
    pub fn classify(code: u16) -> Option<StatusClass> {
        match code / 100 {
            1 => Some(StatusClass::Informational),
            2 => Some(StatusClass::Successful),
            3 => Some(StatusClass::Redirection),
            4 => Some(StatusClass::ClientError),
            5 => Some(StatusClass::ServerError),
            _ => None,
        }
    }

    fn find(code: i64) -> Option<Self> {
        let code = u16::try_from(code).ok()?;
        STATUSES
            .binary_search_by_key(&code, |s| s.code)
            .ok()
            .map(|i| STATUSES[i])
    }
}

impl Display for Status {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.code.to_string())
    }
}

impl TryFrom<Status> for http::StatusCode {
    type Error = http::status::InvalidStatusCode;

    #[inline]
    fn try_from(s: Status) -> Result<Self, Self::Error> {
        http::StatusCode::from_u16(s.code)
    }
}

impl TryFrom<http::StatusCode> for Status {
    type Error = NotFoundError;

    #[inline]
    fn try_from(s: http::StatusCode) -> Result<Self, Self::Error> {
        Status::fetch(s.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(STATUSES.windows(2).all(|w| w[0].code < w[1].code));
        for s in Status::all() {
            assert_eq!(Status::classify(s.code()), Some(s.class()));
        }
    }

    #[test]
    fn test_classify() {
        let expectations = [
            (100, Some(StatusClass::Informational)),
            (204, Some(StatusClass::Successful)),
            (302, Some(StatusClass::Redirection)),
            (404, Some(StatusClass::ClientError)),
            (503, Some(StatusClass::ServerError)),
            (599, Some(StatusClass::ServerError)),
            (99, None),
            (600, None),
        ];
        for (code, class) in expectations {
            assert_eq!(Status::classify(code), class, "{}", code);
        }
        assert_eq!(StatusClass::ClientError.to_string(), "client_error");
    }

    #[test]
    fn test_lookup() {
        let ok = Status::lookup(200).unwrap();
        assert_eq!(ok.code(), 200);
        assert_eq!(ok.name(), "OK");
        assert!(ok.is_cacheable());
        assert!(ok.allows_body());
        assert_eq!(ok.class(), StatusClass::Successful);

        assert_eq!(Status::lookup("200"), None);
        assert_eq!(Status::lookup(299), None);
        assert_eq!(Status::lookup(-1), None);
        assert_eq!(Status::lookup(70_000), None);
    }

    #[test]
    fn test_fetch() {
        assert_eq!(Status::fetch(404).unwrap().name(), "Not Found");
        assert_eq!(Status::fetch("404").unwrap().name(), "Not Found");
        assert_eq!(Status::fetch(" 301 ").unwrap().name(), "Moved Permanently");
        assert_eq!(
            Status::fetch(299),
            Err(NotFoundError::new("status", "299"))
        );
        assert_eq!(
            Status::fetch("teapot"),
            Err(NotFoundError::new("status", "teapot"))
        );
        let fallback = Status::fetch(500).unwrap();
        assert_eq!(Status::fetch_or(418, fallback), fallback);
        assert!(Status::is_registered("511"));
        assert!(!Status::is_registered(418));
    }

    #[test]
    fn test_attributes() {
        let no_content = Status::lookup(204).unwrap();
        assert!(no_content.is_cacheable());
        assert!(!no_content.allows_body());

        let not_modified = Status::lookup(304).unwrap();
        assert!(!not_modified.is_cacheable());
        assert!(!not_modified.allows_body());

        assert!(Status::lookup(501).unwrap().is_cacheable());
        assert!(!Status::lookup(100).unwrap().allows_body());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::lookup(201).unwrap().to_string(), "201");
    }

    #[test]
    fn test_http_interop() {
        let s = Status::lookup(404).unwrap();
        assert_eq!(http::StatusCode::try_from(s).unwrap(), http::StatusCode::NOT_FOUND);
        assert_eq!(Status::try_from(http::StatusCode::OK).unwrap().name(), "OK");
        assert!(Status::try_from(http::StatusCode::IM_A_TEAPOT).is_err());
    }
}
