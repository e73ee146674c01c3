use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: i64,
}

/// Creation payload for `/add_book`. Only built from a validated add form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: u32,
}

impl From<NewBook> for Book {
    fn from(book: NewBook) -> Self {
        Book {
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            quantity: i64::from(book.quantity),
        }
    }
}
