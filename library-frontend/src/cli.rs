use crate::state::SyncPolicy;
use crate::views::list::SortKey;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "library", version, about = "Terminal client for the library catalog API")]
pub struct Cli {
    /// Catalog API base URL (overrides LIBRARY_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Books revealed per page (overrides LIBRARY_PAGE_SIZE)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// How the list catches up after borrow, return and remove
    #[arg(long, value_enum, global = true)]
    pub sync: Option<SyncPolicy>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the catalog
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Title)]
        sort: SortKey,
        /// Number of pages to reveal
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Show the number of catalog entries
    Total,
    /// Search by title, author or ISBN
    Search { query: String },
    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },
    /// Borrow one copy
    Borrow { isbn: String },
    /// Return one copy
    Return { isbn: String },
    /// Remove a book from the catalog
    Remove { isbn: String },
    /// Interactive session (default)
    Shell,
}
