//! Evaluates parsed selector terms against a document's page count

use std::collections::BTreeSet;

use super::{ResolveError, ResolvedPageSet, SelectorTerm};

/// Resolve terms into the pages they select in a document of `total_pages` pages.
///
/// - Literals past the last page are an error.
/// - Ranges are clamped to the document; either endpoint order is accepted.
/// - Progressions stop at the last page and skip values below 1. A zero
///   coefficient selects its offset as if it were a literal.
///
/// Resolution never returns a partial result: the first out-of-range term
/// aborts it.
pub fn resolve(terms: &[SelectorTerm], total_pages: u32) -> Result<ResolvedPageSet, ResolveError> {
    let mut pages = BTreeSet::new();

    for term in terms {
        match *term {
            SelectorTerm::Literal(page) => {
                include_single(&mut pages, i64::from(page), total_pages)?;
            }
            SelectorTerm::Range { lo, hi } => {
                let (start, end) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                let end = end.min(total_pages);
                pages.extend(start.max(1)..=end);
            }
            SelectorTerm::Progression {
                coefficient: 0,
                offset,
            } => {
                include_single(&mut pages, offset, total_pages)?;
            }
            SelectorTerm::Progression {
                coefficient,
                offset,
            } => {
                pages.extend(progression_pages(coefficient, offset, total_pages));
            }
        }
    }

    if pages.is_empty() {
        return Err(ResolveError::EmptySelection);
    }

    log::debug!(
        "Resolved {} selector terms to {} of {} pages",
        terms.len(),
        pages.len(),
        total_pages
    );

    Ok(ResolvedPageSet::from_sorted(pages.into_iter().collect()))
}

fn include_single(pages: &mut BTreeSet<u32>, page: i64, total_pages: u32) -> Result<(), ResolveError> {
    if page < 1 || page > i64::from(total_pages) {
        return Err(ResolveError::OutOfRange { page, total_pages });
    }
    // Bounded by total_pages above
    pages.insert(page as u32);
    Ok(())
}

/// Values of `coefficient * n + offset` (n >= 1) that land in `[1, total_pages]`.
///
/// The first useful `n` is computed directly, so large negative offsets cost
/// nothing. Arithmetic is widened to avoid overflow on extreme inputs.
fn progression_pages(coefficient: i64, offset: i64, total_pages: u32) -> impl Iterator<Item = u32> {
    let coefficient = i128::from(coefficient);
    let offset = i128::from(offset);
    let total = i128::from(total_pages);

    // Smallest n >= 1 with coefficient * n + offset >= 1
    let needed = 1 - offset;
    let first_n = if needed <= coefficient {
        1
    } else {
        (needed + coefficient - 1) / coefficient
    };
    let first = coefficient * first_n + offset;

    let (start, end) = if first <= total {
        // first >= 1 and first <= total, so both fit in u32
        (first as u32, total_pages)
    } else {
        (1, 0)
    };
    let step = coefficient.min(total + 1) as usize;

    (start..=end).step_by(step.max(1))
}
