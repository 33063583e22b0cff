use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// Re-export types from the stamp library
pub use pdf_stamp::{DocumentInfo, StampJob, StampParameters};

mod store;
mod worker;

pub use store::DocStore;
pub use worker::worker_task;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    /// Read page metadata of a PDF and keep it for later plans
    StampLoad { input_path: PathBuf },
    /// Plan a stamp on a loaded document.
    ///
    /// Consecutive queued plans are coalesced per document: only the newest
    /// for each `doc_id` is computed, the rest are answered with
    /// [`PdfUpdate::StampSuperseded`].
    StampPlan {
        request_id: u64,
        doc_id: DocumentId,
        parameters: Arc<StampParameters>,
    },
    StampClose { doc_id: DocumentId },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    StampLoaded {
        doc_id: DocumentId,
        page_count: u32,
    },
    StampPlanned {
        request_id: u64,
        doc_id: DocumentId,
        job: Arc<StampJob>,
    },
    /// A newer plan request replaced this one before it ran
    StampSuperseded { request_id: u64 },
    /// The plan could not be computed; the request's parameters are invalid
    /// for the document, or the document is not loaded
    StampRejected {
        request_id: u64,
        doc_id: DocumentId,
        message: String,
    },
    StampClosed { doc_id: DocumentId },
    Error { message: String },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
