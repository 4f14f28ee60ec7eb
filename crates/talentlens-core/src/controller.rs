//! Search controller: query text, loading/error status, raw and displayed
//! results.
//!
//! A search is two halves so an event loop can run the request elsewhere:
//! [`SearchController::begin_search`] flips state and hands out a ticket,
//! [`SearchController::complete_search`] applies the outcome. Tickets carry a
//! monotonically increasing id and only the newest one is applied; a slower,
//! superseded response is dropped.

use crate::client::Recommender;
use crate::filter::{filter_results, match_count_label, FilterCriteria, FilterField, FilterValue};
use crate::model::{RecommendRequest, ResultItem};
use crate::session::SessionStore;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// The only failure text ever shown to the user.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recommendations";

/// An issued request, to be resolved with [`SearchController::complete_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub request: RecommendRequest,
}

#[derive(Debug)]
pub struct SearchController {
    session: SessionStore,
    query: String,
    use_ai: bool,
    loading: bool,
    error: Option<String>,
    raw: Vec<ResultItem>,
    displayed: Vec<ResultItem>,
    criteria: FilterCriteria,
    latest_id: u64,
}

impl SearchController {
    pub fn new(session: SessionStore, use_ai: bool) -> Self {
        Self {
            session,
            query: String::new(),
            use_ai,
            loading: false,
            error: None,
            raw: Vec::new(),
            displayed: Vec::new(),
            criteria: FilterCriteria::all(),
            latest_id: 0,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn use_ai(&self) -> bool {
        self.use_ai
    }

    pub fn set_use_ai(&mut self, use_ai: bool) {
        self.use_ai = use_ai;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Results exactly as the server returned them.
    pub fn raw_results(&self) -> &[ResultItem] {
        &self.raw
    }

    /// Raw results narrowed by the active criteria.
    pub fn displayed(&self) -> &[ResultItem] {
        &self.displayed
    }

    pub fn match_count_label(&self) -> String {
        match_count_label(self.displayed.len())
    }

    /// Start a search for `text_override`, or the current query if `None`.
    ///
    /// An override (a history entry) replaces the visible query first.
    /// Whitespace-only input is `Err(Error::EmptyQuery)` and changes nothing.
    pub fn begin_search(&mut self, text_override: Option<&str>) -> Result<SearchTicket> {
        let text = text_override.unwrap_or(&self.query).to_string();
        if text.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        if text_override.is_some() {
            self.query = text.clone();
        }

        self.latest_id += 1;
        self.loading = true;
        self.error = None;
        self.raw.clear();
        self.displayed.clear();

        debug!(id = self.latest_id, "Search started");
        Ok(SearchTicket {
            id: self.latest_id,
            request: RecommendRequest::new(text, self.use_ai),
        })
    }

    /// Apply the outcome of `ticket`. Returns `false` if the ticket was
    /// superseded and the outcome discarded.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<ResultItem>>,
    ) -> bool {
        match outcome {
            Ok(results) => self.resolve(ticket, Ok(results)),
            Err(e) => self.resolve(ticket, Err(&e)),
        }
    }

    /// Run a whole search against `recommender`.
    ///
    /// Sets the query to `text`, issues one request and returns the displayed
    /// list. A failed request leaves the generic error message in place and
    /// returns the underlying error.
    pub async fn search(
        &mut self,
        recommender: &dyn Recommender,
        text: &str,
        use_ai: bool,
    ) -> Result<&[ResultItem]> {
        self.use_ai = use_ai;
        let ticket = self.begin_search(Some(text))?;
        match recommender.recommend(&ticket.request).await {
            Ok(results) => {
                self.resolve(&ticket, Ok(results));
                Ok(&self.displayed)
            }
            Err(e) => {
                self.resolve(&ticket, Err(&e));
                Err(e)
            }
        }
    }

    /// Re-run a remembered query; the query box shows it first.
    pub fn begin_history_search(&mut self, index: usize) -> Result<SearchTicket> {
        let text = self
            .session
            .history()
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Other(format!("no history entry {index}")))?;
        self.begin_search(Some(&text))
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn set_filter(&mut self, field: FilterField, value: FilterValue) {
        self.criteria.set(field, value);
        self.refilter();
    }

    pub fn set_job_level(&mut self, value: FilterValue) {
        self.set_filter(FilterField::JobLevel, value);
    }

    pub fn set_duration(&mut self, value: FilterValue) {
        self.set_filter(FilterField::Duration, value);
    }

    pub fn set_test_type(&mut self, value: FilterValue) {
        self.set_filter(FilterField::TestType, value);
    }

    /// Step `field` to its next option.
    pub fn cycle_filter(&mut self, field: FilterField, forward: bool) {
        let options = field.options(&self.raw);
        let current = self.criteria.get(field);
        let next = if forward {
            current.cycle(&options)
        } else {
            current.cycle_back(&options)
        };
        self.set_filter(field, next);
    }

    /// Reset every criterion to `All`. Results are kept.
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::all());
    }

    fn resolve(
        &mut self,
        ticket: &SearchTicket,
        outcome: std::result::Result<Vec<ResultItem>, &Error>,
    ) -> bool {
        if ticket.id != self.latest_id {
            debug!(
                id = ticket.id,
                latest = self.latest_id,
                "Discarding superseded search response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(results) => {
                info!(count = results.len(), "Search complete");
                self.raw = results;
                self.session.record_search(&ticket.request.text);
                self.refilter();
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    fn refilter(&mut self) {
        self.displayed = filter_results(&self.raw, &self.criteria);
    }
}
