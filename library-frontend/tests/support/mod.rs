use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use library_frontend::models::book::{Book, NewBook};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub type Shelf = Arc<Mutex<Vec<Book>>>;

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

async fn add_book(State(shelf): State<Shelf>, Json(book): Json<NewBook>) -> Json<Value> {
    shelf.lock().unwrap().push(book.into());
    Json(json!({ "message": "Book added successfully" }))
}

async fn search_book(Query(params): Query<SearchParams>, State(shelf): State<Shelf>) -> Json<Vec<Book>> {
    let q = params.query;
    let books = shelf
        .lock()
        .unwrap()
        .iter()
        .filter(|b| b.title.contains(&q) || b.author.contains(&q) || b.isbn.contains(&q))
        .cloned()
        .collect();
    Json(books)
}

async fn borrow_book(Path(isbn): Path<String>, State(shelf): State<Shelf>) -> (StatusCode, Json<Value>) {
    let mut books = shelf.lock().unwrap();
    match books.iter_mut().find(|b| b.isbn == isbn) {
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Book not found" }))),
        Some(book) if book.quantity > 0 => {
            book.quantity -= 1;
            (StatusCode::OK, Json(json!({ "message": "Book borrowed successfully" })))
        }
        Some(_) => (StatusCode::BAD_REQUEST, Json(json!({ "message": "Book not available" }))),
    }
}

async fn return_book(Path(isbn): Path<String>, State(shelf): State<Shelf>) -> (StatusCode, Json<Value>) {
    let mut books = shelf.lock().unwrap();
    match books.iter_mut().find(|b| b.isbn == isbn) {
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Book not found" }))),
        Some(book) => {
            book.quantity += 1;
            (StatusCode::OK, Json(json!({ "message": "Book returned successfully" })))
        }
    }
}

async fn list_books(State(shelf): State<Shelf>) -> Json<Vec<Book>> {
    Json(shelf.lock().unwrap().clone())
}

async fn remove_book(Path(isbn): Path<String>, State(shelf): State<Shelf>) -> Json<Value> {
    shelf.lock().unwrap().retain(|b| b.isbn != isbn);
    Json(json!({ "message": "Book removed successfully" }))
}

async fn total_books(State(shelf): State<Shelf>) -> Json<Value> {
    Json(json!({ "totalBooks": shelf.lock().unwrap().len() }))
}

/// Starts a throwaway catalog backend on a random local port.
pub async fn spawn_backend(books: Vec<Book>) -> (String, Shelf) {
    let shelf: Shelf = Arc::new(Mutex::new(books));

    let app = Router::new()
        .route("/add_book", post(add_book))
        .route("/search_book", get(search_book))
        .route("/borrow_book/:isbn", put(borrow_book))
        .route("/return_book/:isbn", put(return_book))
        .route("/list_books", get(list_books))
        .route("/remove_book/:isbn", delete(remove_book))
        .route("/total_books", get(total_books))
        .with_state(shelf.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), shelf)
}

pub fn book(title: &str, author: &str, isbn: &str, quantity: i64) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        quantity,
    }
}
