use crate::models::book::NewBook;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").expect("valid isbn pattern"));

pub const TITLE_REQUIRED: &str = "Title is required";
pub const AUTHOR_REQUIRED: &str = "Author is required";
pub const ISBN_REQUIRED: &str = "ISBN is required";
pub const ISBN_FORMAT: &str = "ISBN must be 9 digits";
pub const QUANTITY_REQUIRED: &str = "Quantity is required";
pub const QUANTITY_POSITIVE: &str = "Quantity must be a positive number";
pub const ADD_FAILED: &str = "Failed to add book. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Author,
    Isbn,
    Quantity,
    General,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Isbn => "isbn",
            Field::Quantity => "quantity",
            Field::General => "general",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Messages keyed by the field they belong to. `Field::General` carries the
/// single request-failure message of the add flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_RE.is_match(isbn)
}

fn parse_quantity(raw: &str) -> Result<u32, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(QUANTITY_REQUIRED);
    }
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).map_err(|_| QUANTITY_POSITIVE),
        _ => Err(QUANTITY_POSITIVE),
    }
}

/// Checks the raw add-form inputs and builds the creation payload.
///
/// Every failing field is reported, not just the first one.
pub fn validate_new_book(
    title: &str,
    author: &str,
    isbn: &str,
    quantity: &str,
) -> Result<NewBook, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = title.trim();
    if title.is_empty() {
        errors.insert(Field::Title, TITLE_REQUIRED);
    }

    let author = author.trim();
    if author.is_empty() {
        errors.insert(Field::Author, AUTHOR_REQUIRED);
    }

    let isbn = isbn.trim();
    if isbn.is_empty() {
        errors.insert(Field::Isbn, ISBN_REQUIRED);
    } else if !is_valid_isbn(isbn) {
        errors.insert(Field::Isbn, ISBN_FORMAT);
    }

    let quantity = match parse_quantity(quantity) {
        Ok(n) => Some(n),
        Err(message) => {
            errors.insert(Field::Quantity, message);
            None
        }
    };

    match quantity {
        Some(quantity) if errors.is_empty() => Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            quantity,
        }),
        _ => Err(errors),
    }
}
