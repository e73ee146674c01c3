use crate::error::{CatalogError, Result};
use crate::models::book::NewBook;
use crate::utils::validation::{validate_new_book, Field, FieldErrors, ADD_FAILED};

pub const SUBMIT_LABEL: &str = "Add Book";
pub const BUSY_LABEL: &str = "Adding...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    title: String,
    author: String,
    isbn: String,
    quantity: String,
    errors: FieldErrors,
    busy: bool,
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates one input. The ISBN is trimmed as it is typed.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Title => self.title = value.to_string(),
            Field::Author => self.author = value.to_string(),
            Field::Isbn => self.isbn = value.trim().to_string(),
            Field::Quantity => self.quantity = value.to_string(),
            Field::General => {}
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Isbn => &self.isbn,
            Field::Quantity => &self.quantity,
            Field::General => "",
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Validates and marks the form busy. Returns the payload to send, or
    /// `None` when validation failed or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<NewBook> {
        if self.busy {
            return None;
        }
        match validate_new_book(&self.title, &self.author, &self.isbn, &self.quantity) {
            Ok(book) => {
                self.errors.clear();
                self.busy = true;
                Some(book)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: &Result<()>) {
        self.busy = false;
        match outcome {
            Ok(()) => self.reset(),
            Err(_) => {
                self.errors.clear();
                self.errors.insert(Field::General, ADD_FAILED);
            }
        }
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.author.clear();
        self.isbn.clear();
        self.quantity.clear();
        self.errors.clear();
        self.busy = false;
    }

    pub(crate) fn validation_error(&self) -> CatalogError {
        CatalogError::Validation(self.errors.clone())
    }
}
