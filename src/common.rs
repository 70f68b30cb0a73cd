pub(crate) mod method;
pub(crate) mod status;

pub use method::*;
pub use status::*;
