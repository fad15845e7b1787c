//! The tracker controller.
//!
//! [`Tracker`] owns the bill store, the query state and the display surface.
//! The collection is installed once; every query change recomputes the
//! visible subset from the full collection and replaces the bill list.

use crate::engine::filter_sort_indices;
use crate::error::LoadError;
use crate::loader::{self, BillSource};
use crate::query::{Coverage, JurisdictionFilter, QueryState, SortOrder, StatusFilter};
use crate::render::{error_html, render_list};
use crate::stats::{jurisdiction_options, Statistics};
use crate::surface::DisplaySurface;
use crate::types::{Bill, BillCollection};
use tracing::{debug, error};

/// Message shown in place of the bill list when loading fails
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load legislation data. Please try again later.";

/// The loaded collection and the current view of it
#[derive(Debug, Clone, Default)]
pub struct BillStore {
    collection: BillCollection,
    /// Positions in `collection.bills`, in display order
    visible: Vec<usize>,
    statistics: Statistics,
    loaded: bool,
}

impl BillStore {
    pub fn collection(&self) -> &BillCollection {
        &self.collection
    }

    pub fn bills(&self) -> &[Bill] {
        &self.collection.bills
    }

    pub fn visible(&self) -> Vec<&Bill> {
        self.visible.iter().map(|&i| &self.collection.bills[i]).collect()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Single controller for one page
#[derive(Debug)]
pub struct Tracker<S: DisplaySurface> {
    store: BillStore,
    query: QueryState,
    coverage: Coverage,
    surface: S,
}

impl<S: DisplaySurface> Tracker<S> {
    pub fn new(coverage: Coverage, surface: S) -> Self {
        Self {
            store: BillStore::default(),
            query: QueryState::default(),
            coverage,
            surface,
        }
    }

    /// Start from a non-default query instead of the defaults
    pub fn with_query(mut self, query: QueryState) -> Self {
        self.query = query;
        self
    }

    /// Load the collection once and render it.
    ///
    /// On failure the bill list is replaced by an error message before the
    /// error is handed back; nothing is retried.
    pub async fn load(&mut self, source: &BillSource) -> Result<(), LoadError> {
        let result = loader::load(source).await;
        self.install(result)
    }

    /// Install the outcome of a load
    pub fn install(&mut self, result: Result<BillCollection, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(collection) => {
                self.store.statistics = Statistics::compute(&collection.bills, self.coverage);
                self.surface.set_statistics(&self.store.statistics);
                if self.coverage.is_multi() {
                    self.surface
                        .set_jurisdiction_options(&jurisdiction_options(&collection.bills));
                }
                self.surface.set_last_updated(&collection.last_updated);
                self.store.collection = collection;
                self.store.loaded = true;
                self.refresh();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error loading bills data");
                self.surface.set_bill_list(error_html(LOAD_ERROR_MESSAGE));
                Err(e)
            }
        }
    }

    pub fn set_query(&mut self, query: QueryState) {
        self.query = query;
        self.refresh();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.refresh();
    }

    pub fn set_status_filter(&mut self, filter: impl Into<StatusFilter>) {
        self.query.status_filter = filter.into();
        self.refresh();
    }

    pub fn set_jurisdiction_filter(&mut self, filter: impl Into<JurisdictionFilter>) {
        self.query.jurisdiction_filter = filter.into();
        self.refresh();
    }

    pub fn set_sort_order(&mut self, order: Option<SortOrder>) {
        self.query.sort_order = order;
        self.refresh();
    }

    /// Recompute the visible subset from scratch and replace the bill list
    fn refresh(&mut self) {
        if !self.store.loaded {
            return;
        }
        self.store.visible = filter_sort_indices(self.store.bills(), &self.query, self.coverage);
        debug!(
            visible = self.store.visible.len(),
            total = self.store.bills().len(),
            "recomputed visible bills"
        );
        let html = render_list(&self.store.visible(), self.coverage);
        self.surface.set_bill_list(html);
    }

    pub fn store(&self) -> &BillStore {
        &self.store
    }

    pub fn visible(&self) -> Vec<&Bill> {
        self.store.visible()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
