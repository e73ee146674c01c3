use crate::models::book::Book;
use crate::state::AppState;
use crate::utils::validation::Field;
use crate::views::add::AddForm;
use console::style;

pub const NO_BOOKS: &str = "No books available.";
pub const NO_MATCHES: &str = "No matching books.";

pub fn render_app(state: &AppState) -> String {
    let mut sections = vec![render_header(state)];
    if state.search.has_searched() {
        sections.push(render_search(state));
    }
    sections.push(render_list(state));
    sections.join("\n")
}

pub fn render_header(state: &AppState) -> String {
    let mut out = format!("{}\n", style("Library Management System").bold().cyan());
    out.push_str(&format!(
        "Total Books Available: {}\n",
        style(state.total.unwrap_or(0)).bold()
    ));
    if let Some(synced) = state.last_synced {
        out.push_str(&format!(
            "{}\n",
            style(format!("as of {}", synced.format("%Y-%m-%d %H:%M:%S UTC"))).dim()
        ));
    }
    out
}

pub fn render_book(book: &Book) -> String {
    format!(
        "{} {}  {} {}  {} {}  {} {}",
        style("Title:").bold(),
        book.title,
        style("Author:").bold(),
        book.author,
        style("ISBN:").bold(),
        book.isbn,
        style("Quantity:").bold(),
        book.quantity
    )
}

pub fn render_list(state: &AppState) -> String {
    let page = state.visible_page();
    let mut out = format!(
        "{} {}\n",
        style("Book List").bold().underlined(),
        style(format!("(sorted by {})", state.list.sort_key())).dim()
    );

    if page.items.is_empty() {
        out.push_str(&format!("  {}\n", NO_BOOKS));
        return out;
    }
    for (i, book) in page.items.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, render_book(book)));
    }
    if page.has_more {
        out.push_str(&format!(
            "  {}\n",
            style(format!(
                "Load More ({} of {} shown)",
                page.items.len(),
                page.total
            ))
            .yellow()
        ));
    }
    out
}

pub fn render_search(state: &AppState) -> String {
    let mut out = match state.search.active_query() {
        Some(query) => format!("{} for {:?}\n", style("Search Results").bold().underlined(), query),
        None => format!("{}\n", style("Search Results").bold().underlined()),
    };
    match state.search.results() {
        Some([]) => out.push_str(&format!("  {}\n", NO_MATCHES)),
        Some(results) => {
            for book in results {
                out.push_str(&format!("  - {}\n", render_book(book)));
            }
        }
        None => {}
    }
    out
}

pub fn render_add_form(form: &AddForm) -> String {
    let mut out = format!("{}\n", style("Add Book").bold().underlined());
    if let Some(general) = form.errors().get(Field::General) {
        out.push_str(&format!("  {}\n", style(general).red()));
    }
    for (field, label) in [
        (Field::Title, "Title"),
        (Field::Author, "Author"),
        (Field::Isbn, "ISBN"),
        (Field::Quantity, "Quantity"),
    ] {
        out.push_str(&format!("  {}: {}\n", label, form.value(field)));
        if let Some(message) = form.errors().get(field) {
            out.push_str(&format!("    {}\n", style(message).red()));
        }
    }
    out.push_str(&format!("  [{}]\n", form.submit_label()));
    out
}
