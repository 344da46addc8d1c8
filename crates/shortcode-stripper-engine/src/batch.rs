use crate::store::{DocumentId, DocumentStore, StoreError};
use crate::stripping::Stripper;
use serde::Serialize;

/// A document that could not be read or written during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    pub id: DocumentId,
    pub message: String,
}

/// Outcome of one pass over a document store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub scanned: usize,
    /// Documents whose body was replaced, or would be in a dry run
    pub rewritten: Vec<DocumentId>,
    pub unchanged: usize,
    pub dry_run: bool,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Strips every document in a store, writing back only the ones that change.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    stripper: Stripper,
    dry_run: bool,
}

impl BatchRunner {
    pub fn new(stripper: Stripper) -> Self {
        Self {
            stripper,
            dry_run: false,
        }
    }

    /// In a dry run, changed documents are reported but never written
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn stripper(&self) -> &Stripper {
        &self.stripper
    }

    /// Process every document in `store`.
    ///
    /// Only a failure to enumerate the store is returned as an error, before
    /// anything is touched. Per-document read and write failures are logged,
    /// recorded in the report, and the run carries on.
    pub fn run<S>(&self, store: &mut S) -> Result<BatchReport, StoreError>
    where
        S: DocumentStore + ?Sized,
    {
        let ids = store.list_document_ids()?;
        log::info!(
            "Stripping {} marker(s) from {} document(s){}",
            self.stripper.markers().len(),
            ids.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        let mut report = BatchReport {
            dry_run: self.dry_run,
            ..BatchReport::default()
        };

        for id in ids {
            report.scanned += 1;

            let body = match store.get_body(&id) {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("Failed to read {id}: {e}");
                    report.failures.push(DocumentFailure {
                        id,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            let Some(stripped) = self.stripper.strip_changed(&body) else {
                log::debug!("{id}: no markers");
                report.unchanged += 1;
                continue;
            };

            if self.dry_run {
                log::info!("{id}: would remove {} byte(s)", body.len() - stripped.len());
                report.rewritten.push(id);
                continue;
            }

            match store.set_body(&id, &stripped) {
                Ok(()) => {
                    log::info!("{id}: removed {} byte(s)", body.len() - stripped.len());
                    report.rewritten.push(id);
                }
                Err(e) => {
                    log::warn!("Failed to update {id}: {e}");
                    report.failures.push(DocumentFailure {
                        id,
                        message: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Scanned {} document(s): {} rewritten, {} unchanged, {} failed",
            report.scanned,
            report.rewritten.len(),
            report.unchanged,
            report.failures.len()
        );

        Ok(report)
    }
}
