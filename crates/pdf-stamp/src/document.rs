//! Page metadata of the document being stamped

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;

/// Page count and per-page dimensions of a document
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentInfo {
    page_sizes: Vec<PageSize>,
}

impl DocumentInfo {
    pub fn new(page_sizes: Vec<PageSize>) -> Self {
        Self { page_sizes }
    }

    /// `page_count` pages that all share one size
    pub fn uniform(page_count: u32, size: PageSize) -> Self {
        Self::new(vec![size; page_count as usize])
    }

    /// Read page sizes from the MediaBox of every page
    pub fn from_document(doc: &Document) -> Self {
        let page_sizes = doc
            .get_pages()
            .values()
            .map(|&page_id| {
                let (width, height) = get_page_dimensions(doc, page_id);
                PageSize::new(width, height)
            })
            .collect();
        Self { page_sizes }
    }

    pub fn page_count(&self) -> u32 {
        self.page_sizes.len() as u32
    }

    /// Size of a 1-based page
    pub fn page_size(&self, page: u32) -> Option<PageSize> {
        let index = usize::try_from(page).ok()?.checked_sub(1)?;
        self.page_sizes.get(index).copied()
    }

    pub fn page_sizes(&self) -> &[PageSize] {
        &self.page_sizes
    }
}

/// Load page metadata from a PDF file
pub async fn load_document_info(path: impl AsRef<Path>) -> Result<DocumentInfo> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let info = tokio::task::spawn_blocking(move || {
        let doc = Document::load_mem(&bytes)?;
        Ok::<_, StampError>(DocumentInfo::from_document(&doc))
    })
    .await??;
    log::debug!("Loaded {} pages from {}", info.page_count(), path.display());
    Ok(info)
}

const MAX_INHERITANCE_DEPTH: usize = 32;

/// Page dimensions (width, height) in points, as the page is displayed.
///
/// MediaBox is looked up on the page and then its ancestors; pages without
/// one are treated as US Letter. A quarter-turn `/Rotate` swaps width and
/// height. CropBox is not consulted.
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let (width, height) = find_inherited(doc, page_id, |dict| media_box_dimensions(doc, dict))
        .unwrap_or(DEFAULT_PAGE_DIMENSIONS);

    match get_page_rotation(doc, page_id) {
        90 | 270 => (height, width),
        _ => (width, height),
    }
}

/// Clockwise page rotation in degrees, normalized to 0, 90, 180 or 270
pub fn get_page_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    let rotate = find_inherited(doc, page_id, |dict| match dict.get(b"Rotate").ok()? {
        Object::Integer(degrees) => Some(*degrees),
        Object::Real(degrees) => Some(*degrees as i64),
        _ => None,
    })
    .unwrap_or(0);

    // Only multiples of 90 are valid; round anything else down to one
    rotate.rem_euclid(360) / 90 * 90
}

/// First value `lookup` finds on the page or one of its ancestors
fn find_inherited<'a, T>(
    doc: &'a Document,
    page_id: ObjectId,
    mut lookup: impl FnMut(&'a Dictionary) -> Option<T>,
) -> Option<T> {
    let mut current = doc.get_dictionary(page_id).ok();

    // Bounded walk; malformed files can have cyclic Parent links
    for _ in 0..MAX_INHERITANCE_DEPTH {
        let dict = current?;
        if let Some(value) = lookup(dict) {
            return Some(value);
        }
        current = dict
            .get(b"Parent")
            .and_then(|obj| obj.as_reference())
            .ok()
            .and_then(|parent_id| doc.get_dictionary(parent_id).ok());
    }

    None
}

fn media_box_dimensions(doc: &Document, dict: &Dictionary) -> Option<(f32, f32)> {
    let media_box = match dict.get(b"MediaBox").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        obj => obj,
    };
    let values = media_box.as_array().ok()?;
    if values.len() < 4 {
        return None;
    }

    let llx = extract_number(&values[0])?;
    let lly = extract_number(&values[1])?;
    let urx = extract_number(&values[2])?;
    let ury = extract_number(&values[3])?;
    Some(((urx - llx).abs(), (ury - lly).abs()))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
