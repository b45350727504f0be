pub mod format;
pub mod logging;
pub(crate) mod serialization;
