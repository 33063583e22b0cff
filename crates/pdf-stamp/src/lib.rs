pub mod constants;
mod document;
mod job;
pub mod layout;
mod params;
pub mod selection;
mod types;
mod validate;

pub use document::{DocumentInfo, get_page_dimensions, get_page_rotation, load_document_info};
pub use job::{PagePlacement, StampJob, plan};
pub use layout::{AverageCharWidth, Placement, StampGeometry, TextMetrics, place};
pub use params::*;
pub use selection::{
    ParseError, ResolveError, ResolvedPageSet, SelectionError, SelectorTerm, parse, resolve,
    select_pages, select_pages_or_all,
};
pub use types::*;
pub use validate::{NumericField, ValidationError, validate};
