use crate::error::{CatalogError, Result};
use crate::models::book::Book;
use crate::services::catalog::CatalogApi;
use crate::views::add::AddForm;
use crate::views::list::{ListPage, ListView, SortKey, PAGE_SIZE};
use crate::views::search::{SearchRequest, SearchView};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SyncPolicy {
    #[default]
    Refetch,
    Optimistic,
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::Refetch => f.write_str("refetch"),
            SyncPolicy::Optimistic => f.write_str("optimistic"),
        }
    }
}

impl FromStr for SyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refetch" => Ok(SyncPolicy::Refetch),
            "optimistic" => Ok(SyncPolicy::Optimistic),
            other => Err(format!(
                "unknown sync policy '{}', expected refetch or optimistic",
                other
            )),
        }
    }
}

/// Where a borrow was triggered from. Borrowing from search results
/// refreshes the search rather than the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    List,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Search(String),
    ClearSearch,
    SubmitAdd,
    Borrow { isbn: String, origin: Origin },
    Return(String),
    Remove(String),
    LoadMore,
    SortBy(SortKey),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Refresh => "refresh",
            Action::Search(_) => "search",
            Action::ClearSearch => "clear search",
            Action::SubmitAdd => "add",
            Action::Borrow { .. } => "borrow",
            Action::Return(_) => "return",
            Action::Remove(_) => "remove",
            Action::LoadMore => "load more",
            Action::SortBy(_) => "sort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Borrow,
    Return,
    Remove,
}

impl Mutation {
    fn changes_count(self) -> bool {
        matches!(self, Mutation::Remove)
    }

    fn patch(self, books: &mut Vec<Book>, isbn: &str) {
        match self {
            Mutation::Borrow => {
                if let Some(book) = books.iter_mut().find(|b| b.isbn == isbn && b.quantity > 0) {
                    book.quantity -= 1;
                }
            }
            Mutation::Return => {
                if let Some(book) = books.iter_mut().find(|b| b.isbn == isbn) {
                    book.quantity = book.quantity.saturating_add(1);
                }
            }
            Mutation::Remove => books.retain(|b| b.isbn != isbn),
        }
    }
}

// `books` holds whatever the last list or search response returned.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub books: Vec<Book>,
    pub total: Option<u64>,
    pub list: ListView,
    pub search: SearchView,
    pub add: AddForm,
    pub last_synced: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            list: ListView::new(page_size),
            ..Self::default()
        }
    }

    pub fn visible_page(&self) -> ListPage<'_> {
        self.list.page(&self.books)
    }
}

pub struct Store<C> {
    catalog: C,
    state: AppState,
    policy: SyncPolicy,
}

impl<C: CatalogApi> Store<C> {
    pub fn new(catalog: C, page_size: usize, policy: SyncPolicy) -> Self {
        Self {
            catalog,
            state: AppState::new(page_size),
            policy,
        }
    }

    pub fn with_defaults(catalog: C) -> Self {
        Self::new(catalog, PAGE_SIZE, SyncPolicy::default())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut AddForm {
        &mut self.state.add
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Initial load. Failures are logged and leave the empty state in place.
    pub async fn mount(&mut self) {
        if let Err(e) = self.refresh().await {
            error!("Error fetching books: {}", e);
        }
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        debug!("Dispatching {:?}", action);

        let result = match action {
            Action::Refresh => self.refresh().await,
            Action::Search(query) => {
                self.state.search.set_query(query);
                self.search().await
            }
            Action::ClearSearch => {
                self.state.search.clear();
                Ok(())
            }
            Action::SubmitAdd => self.submit_add().await,
            Action::Borrow { isbn, origin } => self.mutate(Mutation::Borrow, &isbn, origin).await,
            Action::Return(isbn) => self.mutate(Mutation::Return, &isbn, Origin::List).await,
            Action::Remove(isbn) => self.mutate(Mutation::Remove, &isbn, Origin::List).await,
            Action::LoadMore => {
                self.load_more();
                Ok(())
            }
            Action::SortBy(key) => {
                self.state.list.set_sort(key);
                Ok(())
            }
        };

        match &result {
            Err(CatalogError::Validation(errors)) => debug!("{} blocked by validation: {}", name, errors),
            Err(e) => error!("Error during {}: {}", name, e),
            Ok(()) => {}
        }
        result
    }

    fn set_books(&mut self, books: Vec<Book>) {
        self.state.books = books;
        self.state.last_synced = Some(Utc::now());
    }

    async fn fetch_books(&mut self) -> Result<()> {
        let books = self.catalog.list_books().await?;
        self.set_books(books);
        Ok(())
    }

    async fn fetch_total(&mut self) {
        match self.catalog.total_books().await {
            Ok(total) => self.state.total = Some(total),
            Err(e) => warn!("Error fetching total books: {}", e),
        }
    }

    async fn refresh(&mut self) -> Result<()> {
        let (books, total) = tokio::join!(self.catalog.list_books(), self.catalog.total_books());

        match total {
            Ok(total) => self.state.total = Some(total),
            Err(e) => warn!("Error fetching total books: {}", e),
        }
        self.set_books(books?);
        info!("Loaded {} books", self.state.books.len());
        Ok(())
    }

    async fn search(&mut self) -> Result<()> {
        match self.state.search.submit() {
            SearchRequest::Clear => {
                debug!("Blank search, clearing results");
                Ok(())
            }
            SearchRequest::Query(query) => self.run_search(&query).await,
        }
    }

    async fn run_search(&mut self, query: &str) -> Result<()> {
        let books = self.catalog.search_books(query).await?;
        self.set_books(books.clone());
        self.state.search.apply_results(books);
        Ok(())
    }

    async fn submit_add(&mut self) -> Result<()> {
        if self.state.add.is_busy() {
            debug!("Add already in flight");
            return Ok(());
        }
        let book = match self.state.add.begin_submit() {
            Some(book) => book,
            None => return Err(self.state.add.validation_error()),
        };

        let outcome = self.catalog.add_book(&book).await;
        self.state.add.finish_submit(&outcome);
        outcome?;

        // New entries always come from the server, whatever the policy.
        self.fetch_total().await;
        self.fetch_books().await
    }

    async fn send(&self, mutation: Mutation, isbn: &str) -> Result<()> {
        match mutation {
            Mutation::Borrow => self.catalog.borrow_book(isbn).await,
            Mutation::Return => self.catalog.return_book(isbn).await,
            Mutation::Remove => self.catalog.remove_book(isbn).await,
        }
    }

    async fn mutate(&mut self, mutation: Mutation, isbn: &str, origin: Origin) -> Result<()> {
        match self.policy {
            SyncPolicy::Refetch => {
                self.send(mutation, isbn).await?;
                self.reconcile(mutation, origin).await
            }
            SyncPolicy::Optimistic => {
                let books = self.state.books.clone();
                let search = self.state.search.clone();
                let total = self.state.total;

                mutation.patch(&mut self.state.books, isbn);
                if let Some(results) = self.state.search.results_mut() {
                    mutation.patch(results, isbn);
                }
                if mutation.changes_count() {
                    self.state.total = self.state.total.map(|t| t.saturating_sub(1));
                }

                match self.send(mutation, isbn).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        self.state.books = books;
                        self.state.search = search;
                        self.state.total = total;
                        if let Err(refetch) = self.reconcile(mutation, origin).await {
                            warn!("Could not reconcile after failed {:?}: {}", mutation, refetch);
                        }
                        Err(e)
                    }
                }
            }
        }
    }

    async fn reconcile(&mut self, mutation: Mutation, origin: Origin) -> Result<()> {
        if origin == Origin::Search {
            if let Some(query) = self.state.search.active_query().map(str::to_string) {
                return self.run_search(&query).await;
            }
        }
        if mutation.changes_count() {
            self.fetch_total().await;
        }
        self.fetch_books().await
    }

    fn load_more(&mut self) {
        if self.state.visible_page().has_more {
            self.state.list.load_more();
        }
    }
}
