//! # Asset Lifecycle Manager
//!
//! Keeps stored binaries consistent with the references records hold.
//!
//! ## Per-field rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One asset-bearing field                             │
//! │                                                                         │
//! │  uploaded file?  ── yes ──► AssetStore.upload → new reference           │
//! │       │                     (Replace mode: old reference queued for     │
//! │       no                     deletion once the record is written)       │
//! │       ▼                                                                 │
//! │  literal given?  ── yes ──► literal verbatim, no store call             │
//! │       │                                                                 │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  keep the stored reference, no store call                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write sequence
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  resolve(field A) ─► resolve(field B) ─► Repository write ─► settle  │
//! │        │                   │                   │                     │
//! │   upload fails        upload fails        write fails                │
//! │        ▼                   ▼                   ▼                     │
//! │   AssetIo, nothing    AssetIo, A's upload  StorageUnavailable, all   │
//! │   written             logged as orphaned   uploads logged orphaned   │
//! │                                                                      │
//! │  write succeeds ─► delete replaced references (best effort)         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orphaned uploads are never deleted automatically; they are logged at
//! `warn` with their reference so they can be cleaned up by hand.

use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, info, warn};

use vitrina_core::asset::plan_asset;
use vitrina_core::error::AssetStep;
use vitrina_core::{
    AssetField, AssetInput, AssetPlan, AssetStore, ContentError, ContentResult, RepoError,
    WriteMode,
};

// =============================================================================
// Pending Changes
// =============================================================================

/// Store side effects of one write that are not final yet.
#[derive(Debug, Default)]
#[must_use = "pass to AssetLifecycleManager::settle, commit or abandon"]
pub struct AssetChanges {
    /// New references uploaded for this write.
    uploaded: Vec<(AssetField, String)>,
    /// Old references to delete once the write succeeds.
    replaced: Vec<(AssetField, String)>,
}

impl AssetChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops queued deletes for references the record still holds.
    ///
    /// `written` is every asset reference of the record as it will be
    /// written. A reference shared by two fields survives as long as one of
    /// them keeps it, and is queued at most once.
    pub fn keep_referenced(&mut self, written: &[&str]) {
        let mut queued = HashSet::new();
        self.replaced.retain(|(field, old)| {
            if written.contains(&old.as_str()) {
                debug!(%field, reference = %old, "Replaced asset still referenced; keeping it");
                return false;
            }
            queued.insert(old.clone())
        });
    }

    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty() && self.replaced.is_empty()
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Applies the per-field asset rule and performs the store calls.
#[derive(Clone)]
pub struct AssetLifecycleManager {
    store: Arc<dyn AssetStore>,
}

impl AssetLifecycleManager {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        AssetLifecycleManager { store }
    }

    /// Decides the field's next reference, uploading if a file was sent.
    ///
    /// ## Arguments
    /// * `current` - Reference stored today (`None` on create)
    /// * `changes` - Collects uploads and replaced references for this write
    ///
    /// ## Returns
    /// * `Ok(reference)` - Value to write into the record
    /// * `Err(ContentError::AssetIo)` - Upload failed; earlier uploads in
    ///   `changes` have been logged as orphaned and `changes` is now empty
    pub async fn resolve(
        &self,
        field: AssetField,
        current: Option<&str>,
        input: &AssetInput,
        mode: WriteMode,
        changes: &mut AssetChanges,
    ) -> ContentResult<String> {
        match plan_asset(current, input, mode) {
            AssetPlan::Keep(reference) | AssetPlan::Literal(reference) => Ok(reference),

            AssetPlan::Upload { replaced } => {
                let Some(upload) = input.upload.as_ref() else {
                    // plan_asset only plans an upload when one was sent
                    return Ok(current.unwrap_or_default().to_string());
                };

                match self.store.upload(upload).await {
                    Ok(reference) => {
                        debug!(%field, reference = %reference, "Uploaded asset");
                        changes.uploaded.push((field, reference.clone()));
                        if let Some(old) = replaced {
                            changes.replaced.push((field, old));
                        }
                        Ok(reference)
                    }
                    Err(err) => {
                        let err = ContentError::AssetIo {
                            field,
                            step: AssetStep::Upload,
                            reason: err.to_string(),
                        };
                        self.abandon(std::mem::take(changes), &err);
                        Err(err)
                    }
                }
            }
        }
    }

    /// Finishes a write: commits `changes` if the repository accepted it,
    /// abandons them otherwise.
    pub async fn settle<T>(
        &self,
        changes: AssetChanges,
        write: Result<T, RepoError>,
    ) -> ContentResult<T> {
        match write {
            Ok(value) => {
                self.commit(changes).await;
                Ok(value)
            }
            Err(err) => {
                self.abandon(changes, &err);
                Err(err.into())
            }
        }
    }

    /// Deletes the references the write replaced. Failures are logged.
    pub async fn commit(&self, changes: AssetChanges) {
        for (field, reference) in changes.replaced {
            self.release(field, &reference).await;
        }
    }

    /// Logs every upload of a write that will not be persisted.
    pub fn abandon(&self, changes: AssetChanges, reason: &dyn Display) {
        for (field, reference) in changes.uploaded {
            warn!(
                %field,
                reference = %reference,
                reason = %reason,
                "Orphaned asset: uploaded but never referenced"
            );
        }
    }

    /// Best-effort delete of a reference that no record points at anymore.
    ///
    /// Returns whether the store confirmed the delete. Empty references are
    /// skipped.
    pub async fn release(&self, field: AssetField, reference: &str) -> bool {
        if reference.trim().is_empty() {
            return false;
        }

        match self.store.delete(reference).await {
            Ok(()) => {
                info!(%field, reference = %reference, "Deleted replaced asset");
                true
            }
            Err(err) => {
                warn!(
                    %field,
                    reference = %reference,
                    error = %err,
                    "Asset delete failed; leaving it in the store"
                );
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
