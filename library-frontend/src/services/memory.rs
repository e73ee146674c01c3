use crate::error::{CatalogError, Result};
use crate::models::book::{Book, NewBook};
use crate::services::catalog::CatalogApi;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Total,
    Search(String),
    Add(NewBook),
    Borrow(String),
    Return(String),
    Remove(String),
}

// Borrow refuses at zero stock and unknown ISBNs are not found.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    books: Mutex<Vec<Book>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<bool>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let catalog = Self::new();
        *catalog.books.lock().unwrap() = books;
        catalog
    }

    /// Makes every subsequent call fail with a 500.
    pub fn fail_requests(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn books(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.failing.lock().unwrap() {
            return Err(CatalogError::Status {
                status: 500,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn adjust(&self, isbn: &str, f: impl FnOnce(&mut Book) -> Result<()>) -> Result<()> {
        let mut books = self.books.lock().unwrap();
        match books.iter_mut().find(|b| b.isbn == isbn) {
            Some(book) => f(book),
            None => Err(CatalogError::NotFound(isbn.to_string())),
        }
    }
}

pub fn book(title: &str, author: &str, isbn: &str, quantity: i64) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        quantity,
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list_books(&self) -> Result<Vec<Book>> {
        self.record(Call::List)?;
        Ok(self.books())
    }

    async fn total_books(&self) -> Result<u64> {
        self.record(Call::Total)?;
        Ok(self.books.lock().unwrap().len() as u64)
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        self.record(Call::Search(query.to_string()))?;
        Ok(self
            .books()
            .into_iter()
            .filter(|b| b.title.contains(query) || b.author.contains(query) || b.isbn.contains(query))
            .collect())
    }

    async fn add_book(&self, book: &NewBook) -> Result<()> {
        self.record(Call::Add(book.clone()))?;
        self.books.lock().unwrap().push(book.clone().into());
        Ok(())
    }

    async fn borrow_book(&self, isbn: &str) -> Result<()> {
        self.record(Call::Borrow(isbn.to_string()))?;
        self.adjust(isbn, |book| {
            if book.quantity > 0 {
                book.quantity -= 1;
                Ok(())
            } else {
                Err(CatalogError::NotAvailable(book.isbn.clone()))
            }
        })
    }

    async fn return_book(&self, isbn: &str) -> Result<()> {
        self.record(Call::Return(isbn.to_string()))?;
        self.adjust(isbn, |book| {
            book.quantity = book.quantity.saturating_add(1);
            Ok(())
        })
    }

    async fn remove_book(&self, isbn: &str) -> Result<()> {
        self.record(Call::Remove(isbn.to_string()))?;
        self.books.lock().unwrap().retain(|b| b.isbn != isbn);
        Ok(())
    }
}
