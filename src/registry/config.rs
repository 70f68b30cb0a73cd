use crate::{codec::DateMode, registry::RegistryCfgBuilder};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct RegistryCfg {
    /// Parsing mode of the codec bound to the `date_time` tag.
    pub date_mode: DateMode,
}

impl RegistryCfg {
    #[inline]
    pub fn builder() -> RegistryCfgBuilder {
        RegistryCfgBuilder::default()
    }
}
