use crate::models::book::Book;
use crate::utils::collate::CollationKey;
use std::fmt;
use std::str::FromStr;

pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Title,
    Author,
}

impl SortKey {
    fn field(self, book: &Book) -> &str {
        match self {
            SortKey::Title => &book.title,
            SortKey::Author => &book.author,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => f.write_str("title"),
            SortKey::Author => f.write_str("author"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            other => Err(format!("unknown sort key '{}', expected title or author", other)),
        }
    }
}

/// Sorted view over `books`. The slice itself is left in server order.
pub fn sorted_books(books: &[Book], key: SortKey) -> Vec<&Book> {
    let mut sorted: Vec<&Book> = books.iter().collect();
    sorted.sort_by_cached_key(|book| CollationKey::new(key.field(book)));
    sorted
}

#[derive(Debug)]
pub struct ListPage<'a> {
    pub items: Vec<&'a Book>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    reveal: usize,
    page_size: usize,
    sort: SortKey,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            reveal: page_size,
            page_size,
            sort: SortKey::default(),
        }
    }

    pub fn reveal_count(&self) -> usize {
        self.reveal
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    pub fn load_more(&mut self) {
        self.reveal = self.reveal.saturating_add(self.page_size);
    }

    pub fn page<'a>(&self, books: &'a [Book]) -> ListPage<'a> {
        let sorted = sorted_books(books, self.sort);
        let total = sorted.len();
        ListPage {
            has_more: total > self.reveal,
            items: sorted.into_iter().take(self.reveal).collect(),
            total,
        }
    }
}
