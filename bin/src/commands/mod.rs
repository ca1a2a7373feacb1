//! Command implementations for the dayahead CLI.

pub(crate) mod areas;
pub(crate) mod decode;
pub(crate) mod prices;
