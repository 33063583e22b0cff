use std::collections::HashMap;

use pdf_stamp::DocumentInfo;

use crate::DocumentId;

/// Page metadata of the documents the worker has loaded
#[derive(Debug)]
pub struct DocStore {
    documents: HashMap<DocumentId, DocumentInfo>,
    next_id: u64,
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocStore {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            next_id: 1,
        }
    }

    /// Ids are handed out sequentially starting at 1
    pub fn store(&mut self, info: DocumentInfo) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents.insert(id, info);
        id
    }

    pub fn get(&self, id: DocumentId) -> Option<&DocumentInfo> {
        self.documents.get(&id)
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<DocumentInfo> {
        self.documents.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
