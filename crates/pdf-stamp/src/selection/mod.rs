//! Page selection expressions
//!
//! A selection such as `"1,3,2"`, `"4-8,2,10-12"` or `"2n-1"` is parsed into
//! [`SelectorTerm`]s and then resolved against a page count into a
//! [`ResolvedPageSet`].

mod parser;
mod resolver;
mod types;

pub use parser::parse;
pub use resolver::resolve;
pub use types::*;

/// Parse and resolve `selection` in one step
pub fn select_pages(selection: &str, total_pages: u32) -> Result<ResolvedPageSet, SelectionError> {
    let terms = parse(selection)?;
    Ok(resolve(&terms, total_pages)?)
}

/// Like [`select_pages`], but a blank selection means every page
pub fn select_pages_or_all(
    selection: &str,
    total_pages: u32,
) -> Result<ResolvedPageSet, SelectionError> {
    if selection.trim().is_empty() {
        return Ok(ResolvedPageSet::all(total_pages)?);
    }
    select_pages(selection, total_pages)
}
