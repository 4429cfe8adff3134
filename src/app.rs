pub mod fetch;

use std::sync::mpsc;

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::app::fetch::{CancelToken, FetchMessage, FetchPayload, Job, Ticket};
use crate::catalog::poster::poster_url;
use crate::catalog::{
    CatalogClient, CatalogError, CatalogRequest, MovieDetails, MovieId, MoviePage, MovieSummary, Page,
};
use crate::config::Config;
use crate::router::{Router, View, paths};

/// Popular listing or search results, one page at a time.
pub struct ListingState {
    /// `None` shows the popular list.
    pub query: Option<String>,
    pub page: Page,
    pub movies: Vec<MovieSummary>,
    pub total_pages: u32,
    pub total_results: u64,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

impl ListingState {
    fn new() -> Self {
        Self {
            query: None,
            page: Page::FIRST,
            movies: Vec::new(),
            total_pages: 0,
            total_results: 0,
            list_state: ListState::default(),
            loading: false,
            error: None,
            last_updated: None,
        }
    }

    fn request(&self) -> CatalogRequest {
        match &self.query {
            Some(query) => CatalogRequest::search(query.clone(), self.page),
            None => CatalogRequest::popular(self.page),
        }
    }

    fn apply(&mut self, page: MoviePage) {
        self.total_pages = page.total_pages;
        self.total_results = page.total_results;
        self.movies = page.results;
        self.loading = false;
        self.error = None;
        self.last_updated = Some(Local::now());
        self.list_state
            .select(if self.movies.is_empty() { None } else { Some(0) });
    }

    pub fn has_next(&self) -> bool {
        self.page.get() < self.total_pages
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.list_state.selected().and_then(|i| self.movies.get(i))
    }
}

#[derive(Default)]
pub struct DetailState {
    pub id: Option<MovieId>,
    pub movie: Option<MovieDetails>,
    pub poster: Option<StatefulProtocol>,
    pub loading: bool,
    pub loading_poster: bool,
    pub error: Option<String>,
}

pub struct App {
    pub router: Router,
    pub client: Option<CatalogClient>,
    pub listing: ListingState,
    pub detail: DetailState,
    pub searching: bool,
    pub search_input: String,
    pub confirm_quit: bool,
    pub throbber_state: ThrobberState,
    pub picker: Option<Picker>,
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
    generation: u64,
    cancel: CancelToken,
}

impl App {
    /// Without an access token the app still runs; catalog views explain
    /// how to provide one.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let client = if config.has_token() {
            Some(CatalogClient::new(config.catalog.clone())?)
        } else {
            None
        };
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Option<CatalogClient>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            router: Router::new(),
            client,
            listing: ListingState::new(),
            detail: DetailState::default(),
            searching: false,
            search_input: String::new(),
            confirm_quit: false,
            throbber_state: ThrobberState::default(),
            picker: None,
            sender,
            receiver,
            generation: 0,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_picker(mut self, picker: Picker) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn view(&self) -> View {
        self.router.current().view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        match self.view() {
            View::Home => false,
            View::MovieListing => self.listing.loading,
            View::MovieDetail => self.detail.loading,
        }
    }

    pub fn navigate(&mut self, path: &str) {
        let depth = self.router.depth();
        let pushed = self.router.push(path).map(|_| ());
        match pushed {
            Ok(()) if self.router.depth() != depth => self.on_route_change(),
            Ok(()) => {}
            Err(err) => tracing::warn!(%err, "navigation failed"),
        }
    }

    pub fn back(&mut self) {
        if self.router.back().is_some() {
            self.on_route_change();
        }
    }

    fn on_route_change(&mut self) {
        self.searching = false;
        self.reload();
    }

    /// Drops whatever is in flight and fetches the current view again.
    pub fn reload(&mut self) {
        self.cancel_in_flight();
        match self.view() {
            View::Home => {}
            View::MovieListing => self.load_listing(),
            View::MovieDetail => self.load_details(),
        }
    }

    /// Late results from the previous view must not land in the new one.
    fn cancel_in_flight(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelToken::new();
        self.generation += 1;
        self.listing.loading = false;
        self.detail.loading = false;
        self.detail.loading_poster = false;
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
            cancel: self.cancel.clone(),
            sender: self.sender.clone(),
        }
    }

    fn start(&self, job: Job) -> bool {
        match &self.client {
            Some(client) => {
                fetch::spawn(client.clone(), self.ticket(), job);
                true
            }
            None => false,
        }
    }

    fn load_listing(&mut self) {
        self.listing.error = None;
        self.listing.loading = self.start(Job::Listing(self.listing.request()));
    }

    fn load_details(&mut self) {
        self.detail = DetailState {
            id: self.router.current().movie_id(),
            ..DetailState::default()
        };
        if let Some(id) = self.detail.id.clone() {
            self.detail.loading = self.start(Job::Details(id));
        }
    }

    pub fn poll_messages(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: FetchMessage) {
        if message.generation != self.generation {
            tracing::debug!(
                generation = message.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return;
        }

        match message.payload {
            FetchPayload::Listing(Ok(page)) => self.listing.apply(page),
            FetchPayload::Listing(Err(err)) => {
                self.listing.loading = false;
                self.listing.error = Some(err.to_string());
            }
            FetchPayload::Details(Ok(movie)) => {
                self.detail.loading = false;
                if let Some(path) = movie.poster_path.as_deref() {
                    if self.picker.is_some() {
                        self.detail.loading_poster = self.start(Job::Poster(poster_url(path)));
                    }
                }
                self.detail.movie = Some(movie);
            }
            FetchPayload::Details(Err(err)) => {
                self.detail.loading = false;
                self.detail.error = Some(err.to_string());
            }
            FetchPayload::Poster(Ok(image)) => {
                self.detail.loading_poster = false;
                if let Some(picker) = &self.picker {
                    self.detail.poster = Some(picker.new_resize_protocol(image));
                }
            }
            FetchPayload::Poster(Err(err)) => {
                self.detail.loading_poster = false;
                tracing::warn!(%err, "poster download failed");
            }
        }
    }

    pub fn next_movie(&mut self) {
        let movie_count = self.listing.movies.len();
        if movie_count == 0 {
            return;
        }
        let next = match self.listing.list_state.selected() {
            Some(i) => (i + 1) % movie_count,
            None => 0,
        };
        self.listing.list_state.select(Some(next));
    }

    pub fn previous_movie(&mut self) {
        let movie_count = self.listing.movies.len();
        if movie_count == 0 {
            return;
        }
        let previous = match self.listing.list_state.selected() {
            Some(0) | None => movie_count - 1,
            Some(i) => i - 1,
        };
        self.listing.list_state.select(Some(previous));
    }

    pub fn open_selected(&mut self) {
        if let Some(movie) = self.listing.selected() {
            let path = paths::details(&movie.movie_id());
            self.navigate(&path);
        }
    }

    pub fn next_page(&mut self) {
        if self.listing.loading || !self.listing.has_next() {
            return;
        }
        self.listing.page = self.listing.page.next();
        self.reload();
    }

    pub fn previous_page(&mut self) {
        if self.listing.loading {
            return;
        }
        if let Some(page) = self.listing.page.previous() {
            self.listing.page = page;
            self.reload();
        }
    }

    pub fn start_search(&mut self) {
        self.searching = true;
        self.search_input = self.listing.query.clone().unwrap_or_default();
    }

    pub fn cancel_search(&mut self) {
        self.searching = false;
        self.search_input.clear();
    }

    /// A blank search goes back to the popular list.
    pub fn submit_search(&mut self) {
        self.searching = false;
        let query = self.search_input.trim();
        self.listing.query = if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        };
        self.listing.page = Page::FIRST;
        self.reload();
    }
}
