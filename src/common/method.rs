use crate::errors::NotFoundError;
use std::fmt::{Display, Formatter};

static METHOD_NAME: [&str; 10] = [
    "GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "TRACE", "OPTIONS", "LINK", "UNLINK",
];

static METHOD_LOWER_NAME: [&str; 10] = [
    "get", "post", "put", "patch", "delete", "head", "trace", "options", "link", "unlink",
];

static METHOD_ATTRS: [Attrs; 10] = [
    Attrs::new(true, true, true, true),     // GET
    Attrs::new(false, false, false, true),  // POST
    Attrs::new(false, true, false, true),   // PUT
    Attrs::new(false, false, false, true),  // PATCH
    Attrs::new(false, true, false, true),   // DELETE
    Attrs::new(true, true, true, false),    // HEAD
    Attrs::new(true, true, false, false),   // TRACE
    Attrs::new(true, true, false, true),    // OPTIONS
    Attrs::new(false, true, false, true),   // LINK
    Attrs::new(false, true, false, true),   // UNLINK
];

static ALL_METHODS: [Method; 10] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Delete,
    Method::Head,
    Method::Trace,
    Method::Options,
    Method::Link,
    Method::Unlink,
];

#[derive(Copy, Clone, Debug)]
struct Attrs {
    safe: bool,
    idempotent: bool,
    cacheable: bool,
    allows_body: bool,
}

impl Attrs {
    const fn new(safe: bool, idempotent: bool, cacheable: bool, allows_body: bool) -> Self {
        Self {
            safe,
            idempotent,
            cacheable,
            allows_body,
        }
    }
}

/// An HTTP request method.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[non_exhaustive]
pub enum Method {
    #[default]
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
    Head = 5,
    Trace = 6,
    Options = 7,
    Link = 8,
    Unlink = 9,
}

impl Method {
    #[inline]
    pub fn as_str(self) -> &'static str {
        METHOD_NAME[self as usize]
    }

    #[inline]
    pub fn as_lower_str(self) -> &'static str {
        METHOD_LOWER_NAME[self as usize]
    }

    /// Safe methods are essentially read-only (RFC 7231, section 4.2.1).
    #[inline]
    pub fn is_safe(self) -> bool {
        self.attrs().safe
    }

    /// Repeating an idempotent request has the same intended effect as
    /// sending it once (RFC 7231, section 4.2.2).
    #[inline]
    pub fn is_idempotent(self) -> bool {
        self.attrs().idempotent
    }

    #[inline]
    pub fn is_cacheable(self) -> bool {
        self.attrs().cacheable
    }

    /// `false` if the response to this method must not carry a body.
    #[inline]
    pub fn allows_body(self) -> bool {
        self.attrs().allows_body
    }

    #[inline]
    fn attrs(self) -> &'static Attrs {
        &METHOD_ATTRS[self as usize]
    }

    /// Exact, case-sensitive lookup: `GET` matches, `get` does not.
    pub fn lookup(verb: &str) -> Option<Self> {
        METHOD_NAME
            .iter()
            .position(|name| *name == verb)
            .map(|i| ALL_METHODS[i])
    }

    /// Case-insensitive lookup.
    pub fn fetch(verb: impl AsRef<str>) -> Result<Self, NotFoundError> {
        let verb = verb.as_ref();
        METHOD_NAME
            .iter()
            .position(|name| name.eq_ignore_ascii_case(verb))
            .map(|i| ALL_METHODS[i])
            .ok_or_else(|| NotFoundError::new("method", verb.to_ascii_uppercase()))
    }

    #[inline]
    pub fn fetch_or(verb: impl AsRef<str>, default: Method) -> Self {
        Self::fetch(verb).unwrap_or(default)
    }

    #[inline]
    pub fn is_registered(verb: impl AsRef<str>) -> bool {
        Self::fetch(verb).is_ok()
    }

    #[inline]
    pub fn all() -> &'static [Method] {
        &ALL_METHODS
    }
}

impl std::str::FromStr for Method {
    type Err = NotFoundError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| NotFoundError::new("method", s))
    }
}

impl Display for Method {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<Method> for http::Method {
    type Error = http::method::InvalidMethod;

    #[inline]
    fn try_from(m: Method) -> Result<Self, Self::Error> {
        http::Method::from_bytes(m.as_str().as_bytes())
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = NotFoundError;

    #[inline]
    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        m.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree() {
        for (i, m) in Method::all().iter().enumerate() {
            assert_eq!(*m as usize, i);
            assert_eq!(m.as_str().to_ascii_lowercase(), m.as_lower_str());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Method::lookup("GET"), Some(Method::Get));
        assert_eq!(Method::lookup("UNLINK"), Some(Method::Unlink));
        assert_eq!(Method::lookup("get"), None);
        assert_eq!(Method::lookup("SHI"), None);
        assert_eq!(Method::lookup(""), None);
    }

    #[test]
    fn test_fetch() {
        assert_eq!(Method::fetch("get").unwrap(), Method::Get);
        assert_eq!(Method::fetch("GET").unwrap(), Method::Get);
        assert_eq!(Method::fetch(String::from("Post")).unwrap(), Method::Post);
        assert_eq!(
            Method::fetch("shit"),
            Err(NotFoundError::new("method", "SHIT"))
        );
        assert_eq!(Method::fetch_or("shit", Method::Get), Method::Get);
        assert_eq!(Method::fetch_or("put", Method::Get), Method::Put);
    }

    #[test]
    fn test_is_registered() {
        assert!(Method::is_registered("GET"));
        assert!(Method::is_registered("get"));
        assert!(Method::is_registered("Options"));
        assert!(!Method::is_registered("shit"));
        assert!(!Method::is_registered("CONNECT"));
    }

    #[test]
    fn test_attributes() {
        let expectations: Vec<(Method, bool, bool, bool, bool)> = vec![
            (Method::Get, true, true, true, true),
            (Method::Post, false, false, false, true),
            (Method::Put, false, true, false, true),
            (Method::Patch, false, false, false, true),
            (Method::Delete, false, true, false, true),
            (Method::Head, true, true, true, false),
            (Method::Trace, true, true, false, false),
            (Method::Options, true, true, false, true),
            (Method::Link, false, true, false, true),
            (Method::Unlink, false, true, false, true),
        ];
        assert_eq!(expectations.len(), Method::all().len());
        for (m, safe, idempotent, cacheable, allows_body) in expectations {
            assert_eq!(m.is_safe(), safe, "{}", m);
            assert_eq!(m.is_idempotent(), idempotent, "{}", m);
            assert_eq!(m.is_cacheable(), cacheable, "{}", m);
            assert_eq!(m.allows_body(), allows_body, "{}", m);
        }
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("delete".parse::<Method>().is_err());
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(format!("{:<6}|", Method::Get), "GET   |");
    }

    #[test]
    fn test_http_interop() {
        assert_eq!(http::Method::try_from(Method::Get).unwrap(), http::Method::GET);
        assert_eq!(
            http::Method::try_from(Method::Link).unwrap().as_str(),
            "LINK"
        );
        assert_eq!(Method::try_from(&http::Method::HEAD).unwrap(), Method::Head);
        assert!(Method::try_from(&http::Method::CONNECT).is_err());
    }
}
