//! Stamp jobs: the snapshot handed to whoever draws the stamp

use std::sync::Arc;

use crate::document::DocumentInfo;
use crate::layout::{StampGeometry, TextMetrics, place_box, stamp_box_size};
use crate::params::StampParameters;
use crate::selection::{ResolvedPageSet, select_pages_or_all};
use crate::types::PageSize;
use crate::validate::{ValidationError, validate};

/// Stamp geometry on one target page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PagePlacement {
    /// 1-based page index
    pub page: u32,
    pub page_size: PageSize,
    pub geometry: StampGeometry,
}

/// Everything needed to apply one stamp to one document.
///
/// A job is immutable once planned; share it behind an `Arc` and replan
/// instead of editing when the parameters change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StampJob {
    parameters: Arc<StampParameters>,
    pages: ResolvedPageSet,
    placements: Vec<PagePlacement>,
}

impl StampJob {
    pub fn parameters(&self) -> &StampParameters {
        &self.parameters
    }

    pub fn pages(&self) -> &ResolvedPageSet {
        &self.pages
    }

    /// One entry per page in [`pages`](Self::pages), same order
    pub fn placements(&self) -> &[PagePlacement] {
        &self.placements
    }

    pub fn placement_for(&self, page: u32) -> Option<&PagePlacement> {
        self.placements
            .binary_search_by_key(&page, |p| p.page)
            .ok()
            .map(|index| &self.placements[index])
    }
}

/// Validate `params` against `document` and compute where the stamp goes on
/// every selected page. A blank page selection selects every page.
pub fn plan<M>(
    params: impl Into<Arc<StampParameters>>,
    document: &DocumentInfo,
    metrics: &M,
) -> Result<StampJob, ValidationError>
where
    M: TextMetrics + ?Sized,
{
    let parameters = params.into();
    let total_pages = document.page_count();

    validate(&parameters, total_pages)?;
    let pages = select_pages_or_all(parameters.page_selection(), total_pages)?;

    let size = stamp_box_size(&parameters, metrics)?;
    let placement = parameters.effective_placement();
    let placements = pages
        .iter()
        .map(|page| {
            // Resolved pages never exceed the page count
            let page_size = document.page_size(page).unwrap_or_default();
            PagePlacement {
                page,
                page_size,
                geometry: place_box(&placement, size, parameters.rotation(), page_size),
            }
        })
        .collect();

    log::debug!(
        "Planned {} stamp on {} of {} pages",
        parameters.stamp_type(),
        pages.len(),
        total_pages
    );

    Ok(StampJob {
        parameters,
        pages,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::AverageCharWidth;
    use crate::params::StampField;

    #[test]
    fn test_placement_lookup() {
        let params =
            StampParameters::text("DRAFT").update_field(StampField::PageSelection("2n".into()));
        let job = plan(params, &DocumentInfo::uniform(6, PageSize::default()), &AverageCharWidth)
            .unwrap();

        assert_eq!(job.pages().as_slice(), &[2, 4, 6]);
        assert_eq!(job.placement_for(4).map(|p| p.page), Some(4));
        assert!(job.placement_for(3).is_none());
    }
}
