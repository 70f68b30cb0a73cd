use crate::{codec::DateMode, registry::RegistryCfg};
use std::sync::Arc;

#[derive(Debug, Default)]
#[non_exhaustive]
pub struct RegistryCfgBuilder {
    date_mode: DateMode,
}

impl RegistryCfgBuilder {
    #[inline]
    pub fn date_mode(mut self, mode: DateMode) -> Self {
        self.date_mode = mode;
        self
    }

    pub fn build(self) -> Arc<RegistryCfg> {
        Arc::new(RegistryCfg {
            date_mode: self.date_mode,
        })
    }
}
