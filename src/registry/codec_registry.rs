use crate::{
    codec::Codec,
    errors::UnknownCodecTypeError,
    header::{Header, HeaderName, HeaderNameRef},
    registry::RegistryCfg,
};
use indexmap::{map::MutableKeys, IndexMap};
use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};
use tracing::{debug, instrument, trace};

static DATE_TIME_HEADERS: [&str; 5] = [
    "Date",
    "Expires",
    "Last-Modified",
    "If-Modified-Since",
    "If-Unmodified-Since",
];

static DIGIT_HEADERS: [&str; 3] = ["Age", "Content-Length", "Max-Forwards"];

/// A reusable name for a codec, e.g. `date_time`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CodecTag(Cow<'static, str>);

impl CodecTag {
    pub const GENERIC: CodecTag = CodecTag::from_static("generic");
    pub const DIGIT: CodecTag = CodecTag::from_static("digit");
    pub const DATE_TIME: CodecTag = CodecTag::from_static("date_time");

    #[inline]
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    #[inline]
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CodecTag {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&'static str> for CodecTag {
    #[inline]
    fn from(tag: &'static str) -> Self {
        Self::from_static(tag)
    }
}

impl From<String> for CodecTag {
    #[inline]
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

/// What a header name is bound to.
///
/// A [`Binding::Tag`] is resolved on every lookup, so re-registering the tag
/// with [`CodecRegistry::register_type`] changes the codec of every name bound
/// to it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Binding {
    Tag(CodecTag),
    Codec(Codec),
}

impl From<CodecTag> for Binding {
    #[inline]
    fn from(tag: CodecTag) -> Self {
        Self::Tag(tag)
    }
}

impl From<&'static str> for Binding {
    #[inline]
    fn from(tag: &'static str) -> Self {
        Self::Tag(CodecTag::from_static(tag))
    }
}

impl From<Codec> for Binding {
    #[inline]
    fn from(codec: Codec) -> Self {
        Self::Codec(codec)
    }
}

/// Maps header names to codecs and hands out [`Header`]s bound accordingly.
///
/// Names are matched case-insensitively. Mutation needs `&mut self`; once
/// set up, a registry is meant to be shared read-only, e.g. behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    names: IndexMap<HeaderName, Binding>,
    types: IndexMap<CodecTag, Codec>,
}

impl CodecRegistry {
    /// A registry with the built-in tags but no name bindings.
    pub fn new() -> Self {
        Self::with_types(&RegistryCfg::default())
    }

    /// A registry with the built-in tags and name bindings.
    pub fn with_defaults() -> Self {
        Self::with_config(&RegistryCfg::default())
    }

    pub fn with_config(cfg: &RegistryCfg) -> Self {
        let mut reg = Self::with_types(cfg);
        let defaults = DATE_TIME_HEADERS
            .iter()
            .map(|name| (*name, CodecTag::DATE_TIME))
            .chain(DIGIT_HEADERS.iter().map(|name| (*name, CodecTag::DIGIT)));
        for (name, tag) in defaults {
            reg.names
                .insert(HeaderName::from_static(name), Binding::Tag(tag));
        }
        reg
    }

    fn with_types(cfg: &RegistryCfg) -> Self {
        let mut types = IndexMap::with_capacity(3);
        types.insert(CodecTag::GENERIC, Codec::Generic);
        types.insert(CodecTag::DIGIT, Codec::Digit);
        types.insert(CodecTag::DATE_TIME, Codec::DateTime(cfg.date_mode));
        Self {
            names: IndexMap::new(),
            types,
        }
    }

    /// Binds `name` to a codec or to a registered tag.
    ///
    /// An unknown tag is rejected and leaves the registry unchanged.
    /// Re-registering a name replaces its binding and adopts the new casing.
    pub fn register(
        &mut self,
        name: impl Into<HeaderName>,
        binding: impl Into<Binding>,
    ) -> Result<(), UnknownCodecTypeError> {
        self.register_binding(name.into(), binding.into())
    }

    #[instrument(err, skip(self))]
    fn register_binding(
        &mut self,
        name: HeaderName,
        binding: Binding,
    ) -> Result<(), UnknownCodecTypeError> {
        if let Binding::Tag(ref tag) = binding {
            if !self.types.contains_key(tag) {
                return Err(UnknownCodecTypeError(tag.as_str().to_owned()));
            }
        }

        debug!(%name, ?binding, "register header");
        match self.names.get_full_mut2(&name) {
            Some((_, key, value)) => {
                *key = name;
                *value = binding;
            }
            None => {
                self.names.insert(name, binding);
            }
        }
        Ok(())
    }

    /// Binds `tag` to `codec`, returning the codec it was bound to before.
    pub fn register_type(&mut self, tag: impl Into<CodecTag>, codec: Codec) -> Option<Codec> {
        let tag = tag.into();
        debug!(%tag, %codec, "register codec type");
        self.types.insert(tag, codec)
    }

    #[inline]
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.contains_key(&HeaderNameRef(name))
    }

    #[inline]
    pub fn is_type_registered(&self, tag: &str) -> bool {
        self.types.contains_key(&CodecTag::new(tag.to_owned()))
    }

    /// The codec `name` resolves to; [`Codec::Generic`] when unregistered.
    pub fn codec_for(&self, name: &str) -> Codec {
        self.names
            .get(&HeaderNameRef(name))
            .map_or(Codec::Generic, |binding| self.resolve(binding))
    }

    /// A fresh header for `name`, bound to the codec `name` resolves to.
    ///
    /// A registered name keeps the casing it was registered with.
    pub fn lookup(&self, name: &str) -> Header {
        match self.names.get_key_value(&HeaderNameRef(name)) {
            Some((registered, binding)) => {
                let codec = self.resolve(binding);
                trace!(%name, %codec, "header lookup");
                Header::new(registered.clone(), codec)
            }
            None => {
                trace!(%name, "header lookup, not registered");
                Header::generic(name.to_owned())
            }
        }
    }

    /// Registered names with their resolved codecs, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, Codec)> + '_ {
        self.names
            .iter()
            .map(move |(name, binding)| (name, self.resolve(binding)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn resolve(&self, binding: &Binding) -> Codec {
        match binding {
            Binding::Codec(codec) => *codec,
            // tags are never removed, so a registered binding always resolves
            Binding::Tag(tag) => self.types.get(tag).copied().unwrap_or_default(),
        }
    }
}

impl Default for CodecRegistry {
    #[inline]
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{codec::DateMode, header::Value};
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[test]
    fn test_defaults() {
        let reg = CodecRegistry::with_defaults();
        let expectations: Vec<(&str, Codec)> = vec![
            ("Date", Codec::DATE_TIME),
            ("Expires", Codec::DATE_TIME),
            ("Last-Modified", Codec::DATE_TIME),
            ("If-Modified-Since", Codec::DATE_TIME),
            ("If-Unmodified-Since", Codec::DATE_TIME),
            ("Age", Codec::Digit),
            ("Content-Length", Codec::Digit),
            ("Max-Forwards", Codec::Digit),
            ("content-length", Codec::Digit),
            ("EXPIRES", Codec::DATE_TIME),
            ("X-Header", Codec::Generic),
            ("Cache-Control", Codec::Generic),
        ];
        for (name, codec) in &expectations {
            assert_eq!(reg.lookup(name).codec(), *codec, "{}", name);
            assert_eq!(reg.codec_for(name), *codec, "{}", name);
        }
        assert_eq!(reg.len(), 8);
        assert!(CodecRegistry::new().is_empty());
    }

    #[test]
    fn test_lookup_name_casing() {
        let reg = CodecRegistry::with_defaults();
        assert_eq!(reg.lookup("content-length").name().as_str(), "Content-Length");
        assert_eq!(reg.lookup("x-content").name().as_str(), "x-content");
        assert!(reg.lookup("x-content").is_unset());
    }

    #[test]
    fn test_is_registered() {
        let reg = CodecRegistry::with_defaults();
        assert!(reg.is_registered("Date"));
        assert!(reg.is_registered("dAtE"));
        assert!(!reg.is_registered("X-Header"));
        assert!(reg.is_type_registered("digit"));
        assert!(!reg.is_type_registered("undefined_tag"));
    }

    #[test]
    #[traced_test]
    fn test_register_unknown_tag() {
        let mut reg = CodecRegistry::with_defaults();
        let res = reg.register("Some-Header", "undefined_tag");
        assert_eq!(res, Err(UnknownCodecTypeError("undefined_tag".into())));
        assert!(!reg.is_registered("Some-Header"));
        assert_eq!(reg.len(), 8);

        // an existing binding survives a failed re-registration
        assert!(reg.register("Age", "undefined_tag").is_err());
        assert_eq!(reg.codec_for("Age"), Codec::Digit);
        assert!(logs_contain("unknown codec type: undefined_tag"));
    }

    #[test]
    #[traced_test]
    fn test_register() {
        let mut reg = CodecRegistry::with_defaults();
        reg.register("X-Retry-Count", CodecTag::DIGIT).unwrap();
        reg.register("X-Expires-At", Codec::DateTime(DateMode::Lenient))
            .unwrap();
        assert!(reg.is_registered("x-retry-count"));
        assert_eq!(reg.codec_for("X-RETRY-COUNT"), Codec::Digit);
        assert_eq!(
            reg.codec_for("x-expires-at"),
            Codec::DateTime(DateMode::Lenient)
        );
        assert!(logs_contain("register header"));

        let mut h = reg.lookup("x-retry-count");
        h.set_raw("3");
        assert_eq!(h.value().unwrap(), &Value::UInt(3));
        assert_eq!(h.name().as_str(), "X-Retry-Count");
    }

    #[test]
    fn test_reregister_replaces_binding_and_casing() {
        let mut reg = CodecRegistry::with_defaults();
        reg.register("AGE", Codec::Generic).unwrap();
        assert_eq!(reg.codec_for("age"), Codec::Generic);
        assert_eq!(reg.lookup("age").name().as_str(), "AGE");
        assert_eq!(reg.len(), 8);
    }

    #[test]
    fn test_register_type_is_retroactive() {
        let mut reg = CodecRegistry::with_defaults();
        let before = reg.lookup("Expires");

        let prev = reg.register_type(CodecTag::DATE_TIME, Codec::DateTime(DateMode::Lenient));
        assert_eq!(prev, Some(Codec::DATE_TIME));
        for name in DATE_TIME_HEADERS {
            assert_eq!(reg.codec_for(name), Codec::DateTime(DateMode::Lenient));
        }
        // headers handed out earlier keep their codec
        assert_eq!(before.codec(), Codec::DATE_TIME);

        assert_eq!(reg.register_type("custom", Codec::Digit), None);
        reg.register("X-Custom", "custom").unwrap();
        assert_eq!(reg.codec_for("X-Custom"), Codec::Digit);
        reg.register_type("custom", Codec::Generic);
        assert_eq!(reg.codec_for("X-Custom"), Codec::Generic);
    }

    #[test]
    fn test_iter() {
        let mut reg = CodecRegistry::new();
        reg.register("B-Header", CodecTag::DIGIT).unwrap();
        reg.register("A-Header", Codec::Generic).unwrap();
        let all: Vec<(&str, Codec)> = reg.iter().map(|(n, c)| (n.as_str(), c)).collect();
        assert_eq!(
            all,
            vec![("B-Header", Codec::Digit), ("A-Header", Codec::Generic)]
        );
    }

    #[test]
    fn test_with_config() {
        let cfg = RegistryCfg::builder().date_mode(DateMode::Lenient).build();
        let reg = Arc::new(CodecRegistry::with_config(&cfg));

        let mut h = reg.lookup("Date");
        h.set("Sat, 10 May 1986 00:55:00 EEST");
        assert_eq!(h.raw_value().unwrap(), "Fri, 09 May 1986 21:55:00 GMT");
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodecRegistry>();
        assert_send_sync::<Arc<CodecRegistry>>();
    }
}
