//! One list page for any catalog entity.
//!
//! The page owns the collection snapshot fetched on mount, the view state, the selection and the
//! notices. Remote calls are two-phase: the request runs against a cloned service handle, and
//! only its settled outcome is applied to the snapshot. A page is driven through `&mut self`, so
//! there is never more than one writer.

use crate::app::notifications::Notifications;
use crate::domain::model::{CatalogEntity, EntityId};
use crate::domain::mutation::{self, DeleteFailure, DeleteReport};
use crate::domain::view::{filter_records, transform, PageView, Selection, ViewAction, ViewState};
use crate::infra::config::Settings;
use crate::infra::http::{ApiError, EntityService};
use futures_util::future::join_all;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// The fetch failed; the previous collection is kept.
    Failed,
    /// The page was unmounted or a newer load started before this one finished.
    Discarded,
}

/// A fetch that has been requested but not yet run.
pub struct PendingLoad<E: CatalogEntity> {
    generation: u64,
    service: Arc<dyn EntityService<E>>,
}

impl<E: CatalogEntity> PendingLoad<E> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn run(self) -> CompletedLoad<E> {
        let result = self.service.list().await;
        CompletedLoad {
            generation: self.generation,
            result,
        }
    }
}

/// A settled fetch, ready to be applied with [`ListPage::apply_load`].
pub struct CompletedLoad<E> {
    generation: u64,
    result: Result<Vec<E>, ApiError>,
}

impl<E> CompletedLoad<E> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct ListPage<E: CatalogEntity> {
    service: Arc<dyn EntityService<E>>,
    records: Vec<E>,
    view: ViewState<E::Field>,
    selection: Selection,
    page_size: NonZeroUsize,
    load_state: LoadState,
    notices: Notifications,
    generation: u64,
    mounted: bool,
}

impl<E: CatalogEntity> ListPage<E> {
    pub fn new(
        service: Arc<dyn EntityService<E>>,
        page_size: NonZeroUsize,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            service,
            records: Vec::new(),
            view: ViewState::new(E::DEFAULT_SORT),
            selection: Selection::new(),
            page_size,
            load_state: LoadState::Loading,
            notices: Notifications::new(notice_ttl),
            generation: 0,
            mounted: true,
        }
    }

    pub fn with_settings(service: Arc<dyn EntityService<E>>, settings: &Settings) -> Self {
        Self::new(service, settings.page_size, settings.notice_ttl)
    }

    // --- Loading ---

    /// Starts a fetch. Any fetch started earlier becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad<E> {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        PendingLoad {
            generation: self.generation,
            service: Arc::clone(&self.service),
        }
    }

    pub fn apply_load(&mut self, done: CompletedLoad<E>) -> LoadOutcome {
        if !self.mounted || done.generation != self.generation {
            tracing::warn!(
                kind = E::KIND.plural(),
                generation = done.generation,
                current = self.generation,
                "discarding stale load"
            );
            return LoadOutcome::Discarded;
        }

        self.load_state = LoadState::Loaded;
        match done.result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.selection
                    .retain_loaded(self.records.iter().map(|r| r.id()));
                self.clamp_page();
                tracing::debug!(kind = E::KIND.plural(), count, "collection loaded");
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND.plural(), "load failed: {}", e);
                self.notices
                    .error(e.notice_text(&format!("Failed to load {}", E::KIND.plural())));
                LoadOutcome::Failed
            }
        }
    }

    /// Fetches the collection and applies it.
    pub async fn load(&mut self) -> LoadOutcome {
        let pending = self.begin_load();
        let done = pending.run().await;
        self.apply_load(done)
    }

    /// Marks the page as gone; results that arrive afterwards are discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    // --- View ---

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState<E::Field> {
        &self.view
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn view(&self) -> PageView<'_, E> {
        transform(&self.records, &self.view, self.page_size)
    }

    pub fn dispatch(&mut self, action: ViewAction<E::Field>) {
        let total_pages = self.view().total_pages;
        self.view = self.view.reduce(action, total_pages);
    }

    /// Ids of every record matching the current search, across all pages.
    pub fn filtered_ids(&self) -> Vec<&EntityId> {
        filter_records(&self.records, &self.view.search)
            .into_iter()
            .map(|r| r.id())
            .collect()
    }

    fn clamp_page(&mut self) {
        let page = self.view().page;
        if page != self.view.page {
            self.view = self.view.with_page(page);
        }
    }

    // --- Selection ---

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Flips one row's checkbox. Ids that are not in the loaded collection are ignored.
    /// Returns whether the id is selected afterwards.
    pub fn toggle_selected(&mut self, id: &EntityId) -> bool {
        if !self.records.iter().any(|r| r.id() == id) {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Header checkbox, scoped to the records matching the current search.
    pub fn toggle_select_all(&mut self) -> bool {
        let visible: Vec<&EntityId> = filter_records(&self.records, &self.view.search)
            .into_iter()
            .map(|r| r.id())
            .collect();
        self.selection.toggle_all(&visible)
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.filtered_ids())
    }

    // --- Mutations ---

    /// Deletes one record by server id. On success the record leaves the snapshot; on failure
    /// the snapshot is untouched and an error notice is raised.
    pub async fn delete_one(&mut self, id: &EntityId) -> Result<(), ApiError> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.records = mutation::without_ids(&self.records, std::slice::from_ref(id));
                self.selection.remove_all([id]);
                self.clamp_page();
                tracing::info!(kind = E::KIND.singular(), %id, "deleted");
                self.notices
                    .success(format!("{} {} deleted successfully!", E::KIND.label(), id));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = E::KIND.singular(), %id, "delete failed: {}", e);
                self.notices.error(
                    e.notice_text(&format!("Failed to delete {} {}", E::KIND.singular(), id)),
                );
                Err(e)
            }
        }
    }

    /// Deletes every selected record, one concurrent request per id, and waits for all of them
    /// to settle before patching the snapshot. Ids that failed stay loaded and selected.
    pub async fn delete_selected(&mut self) -> DeleteReport {
        let ids: Vec<EntityId> = self.selection.ids().cloned().collect();
        if ids.is_empty() {
            return DeleteReport::default();
        }

        let requests = ids.into_iter().map(|id| {
            let service = Arc::clone(&self.service);
            async move {
                let result = service.delete(&id).await;
                (id, result)
            }
        });
        let settled = join_all(requests).await;

        let mut report = DeleteReport::default();
        for (id, result) in settled {
            match result {
                Ok(()) => report.deleted.push(id),
                Err(e) => {
                    let message = e.notice_text(&e.to_string());
                    report.failed.push(DeleteFailure { id, message });
                }
            }
        }

        self.records = mutation::without_ids(&self.records, &report.deleted);
        self.selection.remove_all(&report.deleted);
        self.clamp_page();

        tracing::info!(
            kind = E::KIND.plural(),
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "bulk delete settled"
        );

        if report.failed.is_empty() {
            self.notices.success(format!(
                "Deleted {} {}",
                report.deleted.len(),
                E::KIND.plural()
            ));
        } else {
            let details: Vec<String> = report
                .failed
                .iter()
                .map(|f| format!("{} {}: {}", E::KIND.singular(), f.id, f.message))
                .collect();
            self.notices.error(format!(
                "Failed to delete {} of {} {}: {}",
                report.failed.len(),
                report.failed.len() + report.deleted.len(),
                E::KIND.plural(),
                details.join("; ")
            ));
        }

        report
    }

    /// Applies a record the service has confirmed as created or updated.
    pub fn apply_saved(&mut self, record: E) {
        self.records = mutation::with_record(&self.records, record);
    }

    // --- Notices ---

    pub fn notices(&mut self) -> &mut Notifications {
        &mut self.notices
    }
}
