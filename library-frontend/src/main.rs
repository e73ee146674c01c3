use clap::Parser;
use library_frontend::cli::{Cli, Command};
use library_frontend::config::Config;
use library_frontend::render::{render_add_form, render_header, render_list, render_search};
use library_frontend::utils::validation::Field;
use library_frontend::{shell, Action, HttpCatalog, Origin, Store};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// Both the library and this binary log under their own targets.
const DEFAULT_LOG_FILTER: &str = "library_frontend=info,library=info";

async fn run_command(
    store: &mut Store<HttpCatalog>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List { sort, pages } => {
            store.dispatch(Action::Refresh).await?;
            store.dispatch(Action::SortBy(sort)).await?;
            for _ in 1..pages {
                store.dispatch(Action::LoadMore).await?;
            }
            print!("{}", render_list(store.state()));
        }
        Command::Total => {
            store.dispatch(Action::Refresh).await?;
            print!("{}", render_header(store.state()));
        }
        Command::Search { query } => {
            store.dispatch(Action::Search(query)).await?;
            if store.state().search.has_searched() {
                print!("{}", render_search(store.state()));
            }
        }
        Command::Add {
            title,
            author,
            isbn,
            quantity,
        } => {
            let form = store.form_mut();
            form.set(Field::Title, &title);
            form.set(Field::Author, &author);
            form.set(Field::Isbn, &isbn);
            form.set(Field::Quantity, &quantity);

            if let Err(e) = store.dispatch(Action::SubmitAdd).await {
                eprint!("{}", render_add_form(&store.state().add));
                return Err(e.into());
            }
            println!("Added {}", isbn.trim());
        }
        Command::Borrow { isbn } => {
            store
                .dispatch(Action::Borrow {
                    isbn: isbn.clone(),
                    origin: Origin::List,
                })
                .await?;
            println!("Borrowed {}", isbn);
        }
        Command::Return { isbn } => {
            store.dispatch(Action::Return(isbn.clone())).await?;
            println!("Returned {}", isbn);
        }
        Command::Remove { isbn } => {
            store.dispatch(Action::Remove(isbn.clone())).await?;
            println!("Removed {}", isbn);
        }
        Command::Shell => {
            store.mount().await;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell::run_shell(store, stdin, &mut stdout).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.base_url, cli.page_size, cli.sync)?;

    let catalog = HttpCatalog::new(&config.base_url)?;
    info!(
        "Using catalog at {} (page size {}, {} sync)",
        catalog.base_url(),
        config.page_size,
        config.sync
    );
    let mut store = Store::new(catalog, config.page_size, config.sync);

    let command = cli.command.unwrap_or(Command::Shell);
    if let Err(e) = run_command(&mut store, command).await {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
