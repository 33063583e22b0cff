//! Data types for page selection expressions

use std::fmt;
use thiserror::Error;

/// One comma-separated unit of a page selection expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorTerm {
    /// A single page, `"7"`
    Literal(u32),
    /// An inclusive run of pages, `"4-8"`. `lo > hi` is kept as written.
    Range { lo: u32, hi: u32 },
    /// Every page `coefficient * n + offset` for `n = 1, 2, 3, …`, `"2n-1"`
    Progression { coefficient: i64, offset: i64 },
}

impl fmt::Display for SelectorTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SelectorTerm::Literal(page) => write!(f, "{page}"),
            SelectorTerm::Range { lo, hi } => write!(f, "{lo}-{hi}"),
            SelectorTerm::Progression {
                coefficient,
                offset,
            } => {
                if coefficient != 1 {
                    write!(f, "{coefficient}")?;
                }
                f.write_str("n")?;
                match offset {
                    0 => Ok(()),
                    o if o > 0 => write!(f, "+{o}"),
                    o => write!(f, "{o}"),
                }
            }
        }
    }
}

/// The concrete pages a selection refers to: 1-based, ascending, no duplicates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ResolvedPageSet {
    pages: Vec<u32>,
}

impl ResolvedPageSet {
    /// Callers must pass strictly ascending pages
    pub(crate) fn from_sorted(pages: Vec<u32>) -> Self {
        debug_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        Self { pages }
    }

    /// Every page of a document with `total_pages` pages
    pub fn all(total_pages: u32) -> Result<Self, ResolveError> {
        if total_pages == 0 {
            return Err(ResolveError::EmptySelection);
        }
        Ok(Self::from_sorted((1..=total_pages).collect()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pages
    }

    pub fn first(&self) -> Option<u32> {
        self.pages.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.pages.last().copied()
    }
}

impl<'a> IntoIterator for &'a ResolvedPageSet {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Syntax errors. `position` is the 1-based index of the offending term.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("term {position} is empty")]
    EmptyTerm { position: usize },
    #[error("term {position} '{term}' is not a page number, range or progression")]
    MalformedTerm { position: usize, term: String },
    #[error("term {position} '{term}' refers to page 0; pages start at 1")]
    NonPositiveIndex { position: usize, term: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("page {page} is out of range (document has {total_pages} pages)")]
    OutOfRange { page: i64, total_pages: u32 },
    #[error("selection does not match any page")]
    EmptySelection,
}

/// Either stage of turning selection text into pages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
