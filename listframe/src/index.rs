//! Listbox positions and their string forms.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A position in a [`Listbox`](crate::Listbox).
///
/// `End` and `Active` are resolved against the list at the time of each
/// call. Numeric indices may be negative; each operation decides what a
/// negative position means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    At(isize),
    End,
    Active,
}

impl From<usize> for Index {
    fn from(i: usize) -> Self {
        Index::At(isize::try_from(i).unwrap_or(isize::MAX))
    }
}

impl From<isize> for Index {
    fn from(i: isize) -> Self {
        Index::At(i)
    }
}

impl From<i32> for Index {
    fn from(i: i32) -> Self {
        Index::At(i as isize)
    }
}

impl FromStr for Index {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "end" => Ok(Index::End),
            "active" => Ok(Index::Active),
            _ => s
                .trim()
                .parse::<isize>()
                .map(Index::At)
                .map_err(|_| Error::BadIndex(s.to_string())),
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::At(i) => write!(f, "{i}"),
            Index::End => f.write_str("end"),
            Index::Active => f.write_str("active"),
        }
    }
}

/// Anything that can name a listbox position, including the strings
/// `"end"`, `"active"` and decimal integers.
pub trait AsIndex {
    fn as_index(&self) -> Result<Index>;
}

impl AsIndex for Index {
    fn as_index(&self) -> Result<Index> {
        Ok(*self)
    }
}

impl AsIndex for usize {
    fn as_index(&self) -> Result<Index> {
        Ok(Index::from(*self))
    }
}

impl AsIndex for isize {
    fn as_index(&self) -> Result<Index> {
        Ok(Index::At(*self))
    }
}

impl AsIndex for i32 {
    fn as_index(&self) -> Result<Index> {
        Ok(Index::from(*self))
    }
}

impl AsIndex for &str {
    fn as_index(&self) -> Result<Index> {
        self.parse()
    }
}

impl AsIndex for String {
    fn as_index(&self) -> Result<Index> {
        self.parse()
    }
}
