use crate::error::CatalogError;
use crate::render::{render_add_form, render_app};
use crate::services::catalog::CatalogApi;
use crate::state::{Action, Origin, Store};
use crate::utils::validation::Field;
use crate::views::list::SortKey;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

pub const HELP: &str = "\
Commands:
  list                     show the catalog
  more                     reveal the next page
  sort <title|author>      change the sort key
  search [query]           search; no query clears the results
  borrow [--search] <isbn> borrow a copy (--search refreshes the search results)
  return <isbn>            return a copy
  remove <isbn>            remove the book
  add                      add a book (prompts for each field)
  refresh                  reload list and total
  help                     this text
  quit                     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    More,
    Sort(SortKey),
    Search(String),
    ClearSearch,
    Borrow { isbn: String, origin: Origin },
    Return(String),
    Remove(String),
    Add,
    Refresh,
    Help,
    Quit,
}

fn isbn_arg(command: &str, rest: &str) -> Result<String, String> {
    let isbn = rest.trim();
    if isbn.is_empty() {
        Err(format!("usage: {} <isbn>", command))
    } else {
        Ok(isbn.to_string())
    }
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    match command.to_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "list" | "ls" => Ok(ShellCommand::List),
        "more" => Ok(ShellCommand::More),
        "sort" => rest.parse().map(ShellCommand::Sort),
        "search" if rest.trim().is_empty() => Ok(ShellCommand::ClearSearch),
        // The query goes out exactly as typed.
        "search" => Ok(ShellCommand::Search(rest.to_string())),
        "borrow" => {
            let rest = rest.trim();
            match rest.strip_prefix("--search") {
                Some(isbn) => Ok(ShellCommand::Borrow {
                    isbn: isbn_arg("borrow --search", isbn)?,
                    origin: Origin::Search,
                }),
                None => Ok(ShellCommand::Borrow {
                    isbn: isbn_arg("borrow", rest)?,
                    origin: Origin::List,
                }),
            }
        }
        "return" => isbn_arg("return", rest).map(ShellCommand::Return),
        "remove" | "rm" => isbn_arg("remove", rest).map(ShellCommand::Remove),
        "add" => Ok(ShellCommand::Add),
        "refresh" => Ok(ShellCommand::Refresh),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{}', type help", other)),
    }
}

fn notice<W: Write>(out: &mut W, error: &CatalogError) -> std::io::Result<()> {
    // Transport and server errors are already in the log.
    if error.is_user_facing() && !matches!(error, CatalogError::Validation(_)) {
        writeln!(out, "{}", console::style(error).yellow())?;
    }
    Ok(())
}

async fn prompt_add<C, R, W>(
    store: &mut Store<C>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> std::io::Result<bool>
where
    C: CatalogApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for (field, label) in [
        (Field::Title, "Title"),
        (Field::Author, "Author"),
        (Field::Isbn, "ISBN"),
        (Field::Quantity, "Quantity"),
    ] {
        write!(out, "{}: ", label)?;
        out.flush()?;
        match lines.next_line().await? {
            Some(value) => store.form_mut().set(field, &value),
            None => return Ok(false),
        }
    }

    let result = store.dispatch(Action::SubmitAdd).await;
    if result.is_ok() {
        writeln!(out, "Book added.")?;
        writeln!(out, "{}", render_app(store.state()))?;
    } else {
        writeln!(out, "{}", render_add_form(&store.state().add))?;
    }
    Ok(true)
}

/// Reads commands until `quit` or end of input. Request failures never end
/// the session.
pub async fn run_shell<C, R, W>(store: &mut Store<C>, input: R, out: &mut W) -> std::io::Result<()>
where
    C: CatalogApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{}", render_app(store.state()))?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match parse_line(&line) {
            Ok(ShellCommand::Empty) => continue,
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Ok(ShellCommand::List) => {
                writeln!(out, "{}", render_app(store.state()))?;
                continue;
            }
            Ok(ShellCommand::Add) => {
                if !prompt_add(store, &mut lines, out).await? {
                    break;
                }
                continue;
            }
            Ok(ShellCommand::More) => Action::LoadMore,
            Ok(ShellCommand::Sort(key)) => Action::SortBy(key),
            Ok(ShellCommand::Search(query)) => Action::Search(query),
            Ok(ShellCommand::ClearSearch) => Action::ClearSearch,
            Ok(ShellCommand::Borrow { isbn, origin }) => Action::Borrow { isbn, origin },
            Ok(ShellCommand::Return(isbn)) => Action::Return(isbn),
            Ok(ShellCommand::Remove(isbn)) => Action::Remove(isbn),
            Ok(ShellCommand::Refresh) => Action::Refresh,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        if let Err(e) = store.dispatch(action).await {
            notice(out, &e)?;
        }
        writeln!(out, "{}", render_app(store.state()))?;
    }

    Ok(())
}
