use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scrapedesk_core::detail::CompanyDetailView;
use scrapedesk_core::export::export_to_dir;
use scrapedesk_core::list::CompanyList;
use scrapedesk_core::request::{RefreshCause, StoreRequest, StoreResponse};
use scrapedesk_core::{CoreError, StoreConfig};
use std::path::PathBuf;
use tracing::{debug, info, warn};

const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    /// Directory `companies.csv` is written to.
    pub export_dir: PathBuf,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
        }
    }
}

/// Which screen the router is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Detail(CompanyDetailView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    config: StoreConfig,
    options: UiOptions,
    pub(crate) list: CompanyList,
    pub(crate) screen: Screen,
    pub(crate) cursor: usize,
    pub(crate) scroll: usize,
    pub(crate) input: String,
    pub(crate) input_cursor: usize,
    pub(crate) mode: InputMode,
    pub(crate) alert: Option<String>,
    pub(crate) status: String,
    pub(crate) in_flight: usize,
    /// Ticket of the newest list refresh applied so far.
    list_ticket: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: StoreConfig, options: UiOptions) -> Self {
        Self {
            config,
            options,
            list: CompanyList::new(),
            screen: Screen::List,
            cursor: 0,
            scroll: 0,
            input: String::new(),
            input_cursor: 0,
            mode: InputMode::Normal,
            alert: None,
            status: "Loading companies...".to_string(),
            in_flight: 0,
            list_ticket: 0,
            should_quit: false,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn list(&self) -> &CompanyList {
        &self.list
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests to issue when the list screen is first shown.
    pub fn startup_requests(&mut self) -> Vec<StoreRequest> {
        let request = self.list_refresh();
        vec![self.issue(request)]
    }

    fn list_refresh(&mut self) -> StoreRequest {
        self.list.refresh_request()
    }

    fn issue(&mut self, request: StoreRequest) -> StoreRequest {
        self.in_flight += 1;
        request
    }

    /// Handle one key press, returning the store requests it triggers.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<StoreRequest> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        // A pending alert blocks everything until dismissed
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return Vec::new();
        }

        if self.mode == InputMode::Editing {
            return self.handle_input_key(key);
        }

        match self.screen {
            Screen::List => self.handle_list_key(key),
            Screen::Detail(_) => self.handle_detail_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Vec<StoreRequest> {
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.input_cursor);
                self.input.insert(at, c);
                self.input_cursor += 1;
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = self.byte_offset(self.input_cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.input_cursor < self.input.chars().count() {
                    let at = self.byte_offset(self.input_cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.input_cursor = (self.input_cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.input_cursor = 0;
            }
            KeyCode::End => {
                self.input_cursor = self.input.chars().count();
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => return self.submit_scrape(),
            _ => {}
        }
        Vec::new()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn submit_scrape(&mut self) -> Vec<StoreRequest> {
        match self.list.scrape_request(&self.input) {
            Ok(request) => {
                self.mode = InputMode::Normal;
                self.status = format!("Fetching and saving details for {}...", self.input);
                vec![self.issue(request)]
            }
            Err(CoreError::InvalidScrapeUrl(url)) => {
                warn!("Rejected scrape URL '{}'", url);
                self.alert = Some("Please enter a valid URL".to_string());
                Vec::new()
            }
            Err(e) => {
                self.alert = Some(e.to_string());
                Vec::new()
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Vec<StoreRequest> {
        let len = self.list.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    self.cursor = (self.cursor + 1).min(len - 1);
                }
            }
            KeyCode::PageUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_SIZE);
            }
            KeyCode::PageDown => {
                if len > 0 {
                    self.cursor = (self.cursor + PAGE_SIZE).min(len - 1);
                }
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = len.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                if let Some(company) = self.list.get(self.cursor) {
                    let id = company.id.clone();
                    self.list.toggle(&id);
                }
            }
            KeyCode::Char('a') => {
                self.list.toggle_all();
            }
            KeyCode::Char('d') => {
                let request = self.list.delete_request();
                if let StoreRequest::Delete { ref ids } = request {
                    self.status = format!("Deleting {} selected companies...", ids.len());
                }
                return vec![self.issue(request)];
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('r') => {
                self.status = "Refreshing...".to_string();
                let request = self.list_refresh();
                return vec![self.issue(request)];
            }
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.mode = InputMode::Editing;
                self.input_cursor = self.input.chars().count();
            }
            KeyCode::Enter => {
                if let Some(company) = self.list.get(self.cursor) {
                    let id = company.id.clone();
                    info!("Opening company {}", id);
                    self.screen = Screen::Detail(CompanyDetailView::loading(id.clone()));
                    return vec![self.issue(StoreRequest::Fetch { id })];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Vec<StoreRequest> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                // Back to Home: the list is refetched like a fresh visit
                self.screen = Screen::List;
                let request = self.list_refresh();
                return vec![self.issue(request)];
            }
            KeyCode::Char('r') => {
                if let Screen::Detail(ref mut view) = self.screen {
                    let id = view.id.clone();
                    *view = CompanyDetailView::loading(id.clone());
                    return vec![self.issue(StoreRequest::Fetch { id })];
                }
            }
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.mode = InputMode::Editing;
                self.input_cursor = self.input.chars().count();
            }
            _ => {}
        }
        Vec::new()
    }

    fn export(&mut self) {
        match export_to_dir(self.list.companies(), &self.options.export_dir) {
            Ok(path) => {
                self.status = format!(
                    "Saved {} companies to {}",
                    self.list.len(),
                    path.display()
                );
            }
            Err(e) => {
                warn!("CSV export failed: {}", e);
                self.status = format!("Error: export failed: {}", e);
            }
        }
    }

    /// Apply a completed store request as the newest one.
    pub fn apply(&mut self, response: StoreResponse) {
        let ticket = self.list_ticket + 1;
        self.apply_ticketed(ticket, response);
    }

    /// Apply a response stamped with the order its request was dispatched
    /// in. A list refresh older than the one on screen is dropped.
    pub fn apply_ticketed(&mut self, ticket: u64, response: StoreResponse) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match response {
            StoreResponse::Refreshed { cause, result } => {
                if ticket < self.list_ticket {
                    debug!(
                        "Dropping refresh #{} (showing #{})",
                        ticket, self.list_ticket
                    );
                    return;
                }
                self.list_ticket = ticket;
                self.status = match (&cause, &result) {
                    (_, Err(e)) => format!("Error: {}", e),
                    (RefreshCause::Requested, Ok(companies)) => {
                        format!("Loaded {} companies", companies.len())
                    }
                    (RefreshCause::Scraped { url }, Ok(_)) => format!("Saved details for {}", url),
                    (RefreshCause::Deleted(summary), Ok(_)) if summary.failed > 0 => format!(
                        "Deleted {} of {} companies ({} failed)",
                        summary.requested - summary.failed,
                        summary.requested,
                        summary.failed
                    ),
                    (RefreshCause::Deleted(summary), Ok(_)) => {
                        format!("Deleted {} companies", summary.requested)
                    }
                };
                self.list.apply_refresh(result);
                self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
            }
            StoreResponse::Fetched { id, result } => {
                if let Screen::Detail(ref mut view) = self.screen {
                    view.apply(&id, result);
                }
            }
            StoreResponse::ScrapeFailed { url, error } => {
                self.status = format!("Error: could not save details for {}: {}", url, error);
            }
        }
    }
}
