use indexmap::Equivalent;
use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// A header field name.
///
/// Casing is preserved as supplied, while equality and hashing ignore ASCII
/// case, so `Content-Length` and `content-length` name the same field.
#[derive(Debug, Clone, Eq)]
pub struct HeaderName(Cow<'static, str>);

impl HeaderName {
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl PartialEq for HeaderName {
    #[inline]
    fn eq(&self, other: &HeaderName) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl<'a> PartialEq<&'a str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl<'a> PartialEq<&'a [u8]> for HeaderName {
    #[inline]
    fn eq(&self, other: &&'a [u8]) -> bool {
        self.0.as_bytes().eq_ignore_ascii_case(other)
    }
}

impl Hash for HeaderName {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.0, state);
    }
}

fn hash_ignore_case<H: Hasher>(s: &str, state: &mut H) {
    for b in s.bytes() {
        state.write_u8(b.to_ascii_lowercase());
    }
    state.write_u8(0xFF);
}

/// Borrowed lookup key for maps keyed by [`HeaderName`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct HeaderNameRef<'a>(pub(crate) &'a str);

impl Hash for HeaderNameRef<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(self.0, state);
    }
}

impl Equivalent<HeaderName> for HeaderNameRef<'_> {
    #[inline]
    fn equivalent(&self, key: &HeaderName) -> bool {
        key.0.eq_ignore_ascii_case(self.0)
    }
}

impl fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&'static str> for HeaderName {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for HeaderName {
    #[inline]
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&HeaderName> for HeaderName {
    #[inline]
    fn from(name: &HeaderName) -> Self {
        name.clone()
    }
}
