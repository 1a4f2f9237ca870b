//! Error types for listbox indices and geometry management.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An index string that is not `active`, `end` or an integer.
    #[error("bad listbox index \"{0}\": must be active, end, or a number")]
    BadIndex(String),

    /// The widget only supports the grid geometry manager.
    #[error("cannot use {manager} with this widget")]
    UnsupportedGeometry { manager: &'static str },
}
