use crate::error::{CatalogError, Result};
use crate::models::book::{Book, NewBook};
use crate::models::responses::{MessageResponse, TotalResponse};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>>;
    async fn total_books(&self) -> Result<u64>;
    async fn search_books(&self, query: &str) -> Result<Vec<Book>>;
    async fn add_book(&self, book: &NewBook) -> Result<()>;
    async fn borrow_book(&self, isbn: &str) -> Result<()>;
    async fn return_book(&self, isbn: &str) -> Result<()>;
    async fn remove_book(&self, isbn: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let url =
            Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn acknowledge(response: Response) -> Result<()> {
        let body = response.text().await?;
        if let Ok(ack) = serde_json::from_str::<MessageResponse>(&body) {
            if let Some(text) = ack.into_text() {
                debug!("Catalog acknowledged: {}", text);
            }
        }
        Ok(())
    }
}

/// Turns a non-success response into a `CatalogError`, keeping the
/// backend's own wording when the body carries one.
async fn failure(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&body)
        .ok()
        .and_then(MessageResponse::into_text)
        .unwrap_or(body);
    (status, message)
}

fn status_error(status: StatusCode, message: String) -> CatalogError {
    CatalogError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn isbn_failure(response: Response, isbn: &str) -> CatalogError {
    let (status, message) = failure(response).await;
    if status == StatusCode::NOT_FOUND {
        CatalogError::NotFound(isbn.to_string())
    } else {
        status_error(status, message)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn list_books(&self) -> Result<Vec<Book>> {
        let url = self.endpoint(&["list_books"])?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            let books: Vec<Book> = response.json().await?;
            debug!("Fetched {} books", books.len());
            Ok(books)
        } else {
            let (status, message) = failure(response).await;
            Err(status_error(status, message))
        }
    }

    async fn total_books(&self) -> Result<u64> {
        let url = self.endpoint(&["total_books"])?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            let total: TotalResponse = response.json().await?;
            Ok(total.total_books)
        } else {
            let (status, message) = failure(response).await;
            Err(status_error(status, message))
        }
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        let url = self.endpoint(&["search_book"])?;
        let response = self
            .client
            .get(url)
            .query(&[("query", query)])
            .send()
            .await?;

        if response.status().is_success() {
            let books: Vec<Book> = response.json().await?;
            debug!("Search {:?} matched {} books", query, books.len());
            Ok(books)
        } else {
            let (status, message) = failure(response).await;
            Err(status_error(status, message))
        }
    }

    async fn add_book(&self, book: &NewBook) -> Result<()> {
        let url = self.endpoint(&["add_book"])?;
        let response = self.client.post(url).json(book).send().await?;

        if response.status().is_success() {
            info!("Added book {} ({})", book.isbn, book.title);
            Self::acknowledge(response).await
        } else {
            let (status, message) = failure(response).await;
            Err(status_error(status, message))
        }
    }

    async fn borrow_book(&self, isbn: &str) -> Result<()> {
        let url = self.endpoint(&["borrow_book", isbn])?;
        let response = self.client.put(url).send().await?;

        if response.status().is_success() {
            info!("Borrowed book {}", isbn);
            return Self::acknowledge(response).await;
        }
        // The backend answers 400 when stock is already at zero.
        if response.status() == StatusCode::BAD_REQUEST {
            let (_, message) = failure(response).await;
            debug!("Borrow of {} refused: {}", isbn, message);
            return Err(CatalogError::NotAvailable(isbn.to_string()));
        }
        Err(isbn_failure(response, isbn).await)
    }

    async fn return_book(&self, isbn: &str) -> Result<()> {
        let url = self.endpoint(&["return_book", isbn])?;
        let response = self.client.put(url).send().await?;

        if response.status().is_success() {
            info!("Returned book {}", isbn);
            Self::acknowledge(response).await
        } else {
            Err(isbn_failure(response, isbn).await)
        }
    }

    async fn remove_book(&self, isbn: &str) -> Result<()> {
        let url = self.endpoint(&["remove_book", isbn])?;
        let response = self.client.delete(url).send().await?;

        if response.status().is_success() {
            info!("Removed book {}", isbn);
            Self::acknowledge(response).await
        } else {
            Err(isbn_failure(response, isbn).await)
        }
    }
}
