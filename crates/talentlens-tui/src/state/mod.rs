//! Application state management.

use talentlens_core::filter::FilterField;
use talentlens_core::{Error, ResultItem, SearchController, SearchTicket, Theme};
use tracing::debug;

/// Canned role descriptions offered by the example picker.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "Senior Java developer with strong team collaboration and stakeholder management skills",
    "Mid-level data analyst proficient in Python, SQL, and data visualization tools",
    "Entry-level customer service representative with excellent communication and problem-solving abilities",
    "Project manager with 5+ years experience in agile methodologies and cross-functional team leadership",
    "Financial analyst requiring strong analytical thinking, Excel proficiency, and attention to detail",
    "Software architect with expertise in microservices and cloud-native applications",
    "Marketing manager with digital marketing and campaign management experience",
    "HR specialist with talent acquisition and employee relations skills",
];

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main search screen
    Search,
    /// Help overlay
    Help,
    /// Example-query picker overlay
    Examples,
}

/// Focus target in search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Query input
    Input,
    /// Recent-search chips
    History,
    /// Filter bar
    Filters,
    /// Results list
    Results,
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Query, results, filters and session
    pub controller: SearchController,
    /// Cursor position in the query, in chars
    pub cursor: usize,
    /// Current focus target
    pub focus: FocusTarget,
    /// Selected row in the displayed results
    pub selected_index: usize,
    /// Selected history chip
    pub history_index: usize,
    /// Filter control edited by Up/Down in the filter bar
    pub filter_field: FilterField,
    /// Highlighted row in the example picker
    pub example_index: usize,
    /// UI state
    pub ui: UiState,
    /// Transient status line message
    pub status: Option<String>,
    /// Whether to quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(controller: SearchController) -> Self {
        let cursor = controller.query().chars().count();
        Self {
            mode: AppMode::Search,
            controller,
            cursor,
            focus: FocusTarget::Input,
            selected_index: 0,
            history_index: 0,
            filter_field: FilterField::JobLevel,
            example_index: 0,
            ui: UiState::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn query(&self) -> &str {
        self.controller.query()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ---- query editing -------------------------------------------------

    /// Replace the query and put the cursor at its end.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.controller.set_query(query);
        self.cursor = self.query().chars().count();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    pub fn insert_char(&mut self, c: char) {
        let mut query = self.query().to_string();
        query.insert(byte_offset(&query, self.cursor), c);
        self.controller.set_query(query);
        self.cursor += 1;
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut query = self.query().to_string();
        query.remove(byte_offset(&query, self.cursor - 1));
        self.controller.set_query(query);
        self.cursor -= 1;
    }

    /// Delete the char under the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.query().chars().count() {
            return;
        }
        let mut query = self.query().to_string();
        query.remove(byte_offset(&query, self.cursor));
        self.controller.set_query(query);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.query().chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.query().chars().count();
    }

    // ---- searching -----------------------------------------------------

    /// Submit the current query. `None` when the submit is ignored: a search
    /// is already running or the query is blank.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        if self.controller.is_loading() {
            debug!("Submit ignored while a search is in flight");
            return None;
        }
        match self.controller.begin_search(None) {
            Ok(ticket) => {
                self.on_search_started();
                Some(ticket)
            }
            Err(Error::EmptyQuery) => None,
            Err(e) => {
                self.status = Some(e.to_string());
                None
            }
        }
    }

    /// Re-run the history entry under the chip cursor.
    pub fn run_selected_history(&mut self) -> Option<SearchTicket> {
        match self.controller.begin_history_search(self.history_index) {
            Ok(ticket) => {
                self.cursor = self.query().chars().count();
                self.on_search_started();
                Some(ticket)
            }
            Err(e) => {
                debug!("History search not started: {}", e);
                None
            }
        }
    }

    /// Apply a worker response. Superseded responses change nothing.
    pub fn apply_search_outcome(
        &mut self,
        ticket: &SearchTicket,
        outcome: talentlens_core::Result<Vec<ResultItem>>,
    ) {
        let succeeded = outcome.is_ok();
        if self.controller.complete_search(ticket, outcome) {
            self.selected_index = 0;
            self.ui.scroll_offset = 0;
            if succeeded {
                // The query that just ran is now the newest chip.
                self.history_index = 0;
            } else {
                self.clamp_history_index();
            }
        }
    }

    fn on_search_started(&mut self) {
        self.selected_index = 0;
        self.ui.scroll_offset = 0;
        self.status = None;
    }

    // ---- history -------------------------------------------------------

    pub fn history_next(&mut self) {
        let len = self.controller.session().history().len();
        if self.history_index + 1 < len {
            self.history_index += 1;
        }
    }

    pub fn history_previous(&mut self) {
        self.history_index = self.history_index.saturating_sub(1);
    }

    pub fn clear_history(&mut self) {
        self.controller.session_mut().clear_history();
        self.history_index = 0;
        if self.focus == FocusTarget::History {
            self.focus = FocusTarget::Input;
        }
    }

    fn clamp_history_index(&mut self) {
        let len = self.controller.session().history().len();
        self.history_index = self.history_index.min(len.saturating_sub(1));
    }

    // ---- filters -------------------------------------------------------

    pub fn next_filter_field(&mut self) {
        self.filter_field = self.filter_field.next();
    }

    pub fn previous_filter_field(&mut self) {
        self.filter_field = self.filter_field.previous();
    }

    /// Step the focused filter through its options.
    pub fn cycle_filter(&mut self, forward: bool) {
        self.controller.cycle_filter(self.filter_field, forward);
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        self.controller.clear_filters();
        self.clamp_selection();
    }

    // ---- results -------------------------------------------------------

    pub fn results(&self) -> &[ResultItem] {
        self.controller.displayed()
    }

    pub fn selected_result(&self) -> Option<&ResultItem> {
        self.results().get(self.selected_index)
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_index < self.results().len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.results().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.results().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ---- focus ---------------------------------------------------------

    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.focus == target
    }

    /// Tab order: input, history, filters, results. Empty sections are
    /// skipped.
    pub fn cycle_focus(&mut self, forward: bool) {
        let order = [
            FocusTarget::Input,
            FocusTarget::History,
            FocusTarget::Filters,
            FocusTarget::Results,
        ];
        let current = order.iter().position(|t| *t == self.focus).unwrap_or(0);
        for step in 1..order.len() {
            let idx = if forward {
                (current + step) % order.len()
            } else {
                (current + order.len() - step) % order.len()
            };
            if self.can_focus(order[idx]) {
                self.focus = order[idx];
                return;
            }
        }
    }

    fn can_focus(&self, target: FocusTarget) -> bool {
        match target {
            FocusTarget::Input => true,
            FocusTarget::History => !self.controller.session().history().is_empty(),
            FocusTarget::Filters => !self.controller.raw_results().is_empty(),
            FocusTarget::Results => !self.results().is_empty(),
        }
    }

    // ---- toggles & overlays --------------------------------------------

    pub fn toggle_theme(&mut self) -> Theme {
        self.controller.session_mut().toggle_theme()
    }

    /// Flip AI insights for subsequent searches.
    pub fn toggle_ai(&mut self) {
        let use_ai = !self.controller.use_ai();
        self.controller.set_use_ai(use_ai);
        self.status = Some(format!(
            "AI insights {}",
            if use_ai { "on" } else { "off" }
        ));
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Search,
            _ => AppMode::Help,
        };
    }

    pub fn open_examples(&mut self) {
        self.example_index = 0;
        self.mode = AppMode::Examples;
    }

    pub fn close_overlay(&mut self) {
        self.mode = AppMode::Search;
    }

    pub fn example_next(&mut self) {
        if self.example_index + 1 < EXAMPLE_QUERIES.len() {
            self.example_index += 1;
        }
    }

    pub fn example_previous(&mut self) {
        self.example_index = self.example_index.saturating_sub(1);
    }

    /// Copy the highlighted example into the query box and return to search.
    pub fn pick_example(&mut self) {
        if let Some(example) = EXAMPLE_QUERIES.get(self.example_index) {
            self.set_query(*example);
        }
        self.focus = FocusTarget::Input;
        self.mode = AppMode::Search;
    }
}

/// UI state
pub struct UiState {
    /// Scroll offset for results list
    pub scroll_offset: usize,
    /// Viewport height of the results list, in rows
    pub viewport_height: usize,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: 0,
        }
    }

    /// Update scroll offset to keep selection visible
    pub fn update_scroll(&mut self, selected_row: usize, total_rows: usize) {
        let total_rows = total_rows.max(1);
        let selected_row = selected_row.min(total_rows.saturating_sub(1));
        let viewport = self.viewport_height.max(1);

        if selected_row < self.scroll_offset {
            self.scroll_offset = selected_row;
        } else if selected_row >= self.scroll_offset + viewport {
            self.scroll_offset = selected_row + 1 - viewport;
        }

        self.scroll_offset = self.scroll_offset.min(total_rows.saturating_sub(1));
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentlens_core::{FilterValue, MemoryStorage, SessionStore};

    fn app() -> AppState {
        let session = SessionStore::load(MemoryStorage::new(), Some(true));
        AppState::new(SearchController::new(session, true))
    }

    fn item(name: &str, level: &str) -> ResultItem {
        ResultItem {
            name: name.to_string(),
            url: format!("https://catalog.test/{name}"),
            description: String::new(),
            score: 0.5,
            duration: None,
            job_level: Some(level.to_string()),
            test_type: None,
            ai_insights: None,
            languages: Vec::new(),
            remote_testing: None,
            adaptive_support: None,
        }
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut app = app();
        for c in "café".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.cursor, 4);

        app.move_cursor_left();
        app.insert_char('x');
        assert_eq!(app.query(), "cafxé");

        app.move_cursor_end();
        app.delete_char();
        assert_eq!(app.query(), "cafx");

        app.move_cursor_home();
        app.delete_char_forward();
        assert_eq!(app.query(), "afx");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let mut app = app();
        app.set_query("java");
        let first = app.submit().unwrap();
        assert!(app.submit().is_none());

        app.apply_search_outcome(&first, Ok(vec![item("a", "Entry")]));
        assert!(app.submit().is_some());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut app = app();
        app.set_query("   ");
        assert!(app.submit().is_none());
        assert!(!app.controller.is_loading());
    }

    #[test]
    fn history_chip_runs_even_while_loading() {
        let mut app = app();
        app.controller.session_mut().record_search("older");
        app.set_query("java");
        let _pending = app.submit().unwrap();

        let ticket = app.run_selected_history().unwrap();
        assert_eq!(ticket.request.text, "older");
        assert_eq!(app.query(), "older");
        assert_eq!(app.cursor, 5);
    }

    #[test]
    fn filters_clamp_selection() {
        let mut app = app();
        app.set_query("java");
        let ticket = app.submit().unwrap();
        app.apply_search_outcome(
            &ticket,
            Ok(vec![item("a", "Entry"), item("b", "Manager"), item("c", "Entry")]),
        );
        app.select_last();
        assert_eq!(app.selected_index, 2);

        app.controller.set_job_level(FilterValue::only("Manager"));
        app.clear_filters();
        assert_eq!(app.results().len(), 3);

        app.cycle_filter(true); // Level: Entry
        assert_eq!(app.results().len(), 2);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_result().map(|r| r.name.as_str()), Some("c"));
    }

    #[test]
    fn focus_cycle_skips_empty_sections() {
        let mut app = app();
        app.cycle_focus(true);
        assert_eq!(app.focus, FocusTarget::Input);

        app.controller.session_mut().record_search("java");
        app.cycle_focus(true);
        assert_eq!(app.focus, FocusTarget::History);
        app.cycle_focus(false);
        assert_eq!(app.focus, FocusTarget::Input);
        app.cycle_focus(false);
        assert_eq!(app.focus, FocusTarget::History);
    }

    #[test]
    fn clearing_history_moves_focus_back() {
        let mut app = app();
        app.controller.session_mut().record_search("java");
        app.controller.session_mut().record_search("rust");
        app.focus = FocusTarget::History;
        app.history_next();
        assert_eq!(app.history_index, 1);

        app.clear_history();
        assert!(app.controller.session().history().is_empty());
        assert_eq!(app.focus, FocusTarget::Input);
        assert_eq!(app.history_index, 0);
    }

    #[test]
    fn rerun_chip_highlight_follows_query() {
        let mut app = app();
        app.controller.session_mut().record_search("rust");
        app.controller.session_mut().record_search("java");
        app.controller.session_mut().record_search("python");
        app.focus = FocusTarget::History;
        app.history_next();
        app.history_next();
        assert_eq!(app.history_index, 2);

        let ticket = app.run_selected_history().unwrap();
        assert_eq!(ticket.request.text, "rust");
        app.apply_search_outcome(&ticket, Ok(vec![item("Rust Test", "Mid")]));

        let history = app.controller.session().history();
        assert_eq!(history[0], "rust");
        assert_eq!(app.history_index, 0);
    }

    #[test]
    fn picker_offers_every_example_role() {
        let mut app = app();
        app.open_examples();
        for _ in 0..EXAMPLE_QUERIES.len() {
            app.example_next();
        }
        app.pick_example();
        assert_eq!(EXAMPLE_QUERIES.len(), 8);
        assert_eq!(
            app.query(),
            "HR specialist with talent acquisition and employee relations skills"
        );
    }

    #[test]
    fn picking_example_fills_query() {
        let mut app = app();
        app.open_examples();
        app.example_next();
        app.pick_example();
        assert_eq!(app.mode, AppMode::Search);
        assert_eq!(app.query(), EXAMPLE_QUERIES[1]);
        assert!(!app.controller.is_loading());
    }

    #[test]
    fn toggle_ai_affects_next_request() {
        let mut app = app();
        app.toggle_ai();
        app.set_query("java");
        let ticket = app.submit().unwrap();
        assert!(!ticket.request.use_ai);
        assert_eq!(app.status, None);
    }

    #[test]
    fn update_scroll_keeps_selection_visible() {
        let mut ui = UiState::new();
        ui.viewport_height = 3;
        ui.update_scroll(5, 10);
        assert_eq!(ui.scroll_offset, 3);
        ui.update_scroll(1, 10);
        assert_eq!(ui.scroll_offset, 1);
        ui.update_scroll(0, 0);
        assert_eq!(ui.scroll_offset, 0);
    }
}
