use std::path::PathBuf;
use std::sync::Arc;

use pdf_stamp::{AverageCharWidth, StampParameters, load_document_info, plan};
use tokio::sync::mpsc;

use crate::{DocStore, DocumentId, PdfCommand, PdfUpdate};

/// A plan command waiting to run
#[derive(Debug)]
struct PlanRequest {
    request_id: u64,
    doc_id: DocumentId,
    parameters: Arc<StampParameters>,
}

/// Plan requests taken off the queue in one go, newest per document
#[derive(Debug, Default)]
struct PlanBatch {
    requests: Vec<PlanRequest>,
}

impl PlanBatch {
    /// Add `request`, superseding an older one for the same document
    fn push(&mut self, request: PlanRequest, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
        match self.requests.iter_mut().find(|r| r.doc_id == request.doc_id) {
            Some(older) => {
                log::debug!(
                    "Discarding stamp plan {} for document {}, using newer request {}",
                    older.request_id,
                    older.doc_id,
                    request.request_id
                );
                let _ = update_tx.send(PdfUpdate::StampSuperseded {
                    request_id: older.request_id,
                });
                *older = request;
            }
            None => self.requests.push(request),
        }
    }
}

/// Async worker task that processes stamp commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let mut doc_store = DocStore::new();
    // Taken off the queue while coalescing plans but not run yet
    let mut pending: Option<PdfCommand> = None;

    loop {
        let cmd = match pending.take() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };
        process_command(cmd, &mut doc_store, &mut command_rx, &mut pending, &update_tx).await;
    }
    log::debug!("Command channel closed, stopping worker");
}

async fn process_command(
    cmd: PdfCommand,
    doc_store: &mut DocStore,
    command_rx: &mut mpsc::UnboundedReceiver<PdfCommand>,
    pending: &mut Option<PdfCommand>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match cmd {
        PdfCommand::StampLoad { input_path } => {
            handle_load(input_path, doc_store, update_tx).await;
        }
        PdfCommand::StampPlan {
            request_id,
            doc_id,
            parameters,
        } => {
            let mut batch = PlanBatch::default();
            batch.push(
                PlanRequest {
                    request_id,
                    doc_id,
                    parameters,
                },
                update_tx,
            );

            // Drain queued plan commands, stopping at the first other command
            // so it still runs after them
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let PdfCommand::StampPlan {
                    request_id,
                    doc_id,
                    parameters,
                } = next_cmd
                {
                    batch.push(
                        PlanRequest {
                            request_id,
                            doc_id,
                            parameters,
                        },
                        update_tx,
                    );
                } else {
                    *pending = Some(next_cmd);
                    break;
                }
            }

            for request in batch.requests {
                handle_plan(request, doc_store, update_tx);
            }
        }
        PdfCommand::StampClose { doc_id } => {
            handle_close(doc_id, doc_store, update_tx);
        }
    }
}

async fn handle_load(
    input_path: PathBuf,
    doc_store: &mut DocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match load_document_info(&input_path).await {
        Ok(info) => {
            let page_count = info.page_count();
            let doc_id = doc_store.store(info);
            log::info!("Loaded {} as document {doc_id}", input_path.display());
            let _ = update_tx.send(PdfUpdate::StampLoaded { doc_id, page_count });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to load PDF: {e}"),
            });
        }
    }
}

fn handle_plan(
    request: PlanRequest,
    doc_store: &DocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let PlanRequest {
        request_id,
        doc_id,
        parameters,
    } = request;

    let Some(document) = doc_store.get(doc_id) else {
        let _ = update_tx.send(PdfUpdate::StampRejected {
            request_id,
            doc_id,
            message: format!("Document {doc_id} is not loaded"),
        });
        return;
    };

    let update = match plan(parameters, document, &AverageCharWidth) {
        Ok(job) => PdfUpdate::StampPlanned {
            request_id,
            doc_id,
            job: Arc::new(job),
        },
        Err(e) => PdfUpdate::StampRejected {
            request_id,
            doc_id,
            message: e.to_string(),
        },
    };
    let _ = update_tx.send(update);
}

fn handle_close(
    doc_id: DocumentId,
    doc_store: &mut DocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    if doc_store.remove(doc_id).is_some() {
        let _ = update_tx.send(PdfUpdate::StampClosed { doc_id });
    } else {
        log::warn!("Close requested for unknown document {doc_id}");
    }
}
