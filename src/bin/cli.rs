//! Inquiry board CLI
//!
//! Lists, searches and watches the public board, and shows the student
//! roster for admins.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use inquiry_board::{
    controller::{BoardController, BoardEvent, BoardRow, BoardView, ControllerOptions, FilterState},
    error::{AppError, Result},
    models::{BoardFilter, Config, DateOrder, Tag, filter_students},
    services::{BoardQueryService, BoardSearchService, RosterService},
    session::{Session, SessionStore},
    transport::{HttpTransport, Transport},
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Inquiry board client
#[derive(Parser, Debug)]
#[command(name = "inquiry-board", version, about = "School inquiry board client")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "inquiry-board.toml")]
    config: PathBuf,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the public board
    List {
        /// recent or oldest (default from config)
        #[arg(long)]
        date: Option<DateOrder>,

        /// Only ADOPT or REJECT are accepted by the board
        #[arg(long)]
        tag: Option<Tag>,
    },

    /// Search the public board
    Search {
        /// Free-text query
        query: String,
    },

    /// Show the student roster (admin only)
    Students {
        /// Filter by name, email or student id
        #[arg(long)]
        filter: Option<String>,
    },

    /// Interactive board: type to search, `:date`, `:tag`, `:refresh`, `:quit`
    Board,

    /// Store an access token
    Login {
        #[arg(long)]
        token: String,
    },

    /// Forget the stored access token
    Logout,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    log::debug!("Using backend {}", config.api.base_url);

    let store = SessionStore::new(&config.session.path);

    match cli.command {
        Command::List { date, tag } => {
            let session = require_session(&store).await?;
            let filter = BoardFilter {
                date_order: Some(date.unwrap_or(config.board.default_date_order)),
                tag,
            };
            let service = BoardQueryService::new(transport(&config)?);
            let items = service.fetch_board(&session, &filter).await?;
            print_rows(items.iter().map(BoardRow::from_item).collect());
        }

        Command::Search { query } => {
            let query = query.trim();
            if query.is_empty() {
                return Err(AppError::validation("search query is empty"));
            }
            let session = require_session(&store).await?;
            let service = BoardSearchService::new(transport(&config)?);
            let items = service.search_board(&session, query).await?;
            print_rows(items.iter().map(BoardRow::from_item).collect());
        }

        Command::Students { filter } => {
            let session = require_session(&store).await?;
            let service = RosterService::new(transport(&config)?);
            let students = service.list_students(&session).await?;
            let query = filter.unwrap_or_default();
            let shown = filter_students(&students, &query);

            if shown.is_empty() {
                if query.trim().is_empty() {
                    println!("No students.");
                } else {
                    println!("No students match '{}'.", query.trim());
                }
            } else {
                println!("{:>4}  {:<10}  {:<20}  {}", "#", "id", "name", "email");
                for (index, student) in shown.iter().enumerate() {
                    println!(
                        "{:>4}  {:<10}  {:<20}  {}",
                        index + 1,
                        student.user_id,
                        student.name,
                        student.email
                    );
                }
            }
        }

        Command::Board => {
            let session = require_session(&store).await?;
            run_interactive(&config, session).await?;
        }

        Command::Login { token } => {
            store.save(&token).await?;
            println!("Logged in.");
        }

        Command::Logout => {
            store.clear().await?;
            println!("Logged out.");
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK (backend {})", config.api.base_url);
        }
    }

    Ok(())
}

fn transport(config: &Config) -> Result<Arc<dyn Transport>> {
    Ok(Arc::new(HttpTransport::new(&config.api)?))
}

/// Load the stored session or point the user at `login`.
async fn require_session(store: &SessionStore) -> Result<Session> {
    let session = store.load().await?;
    if !session.is_authenticated() {
        log::error!("Not logged in. Run `inquiry-board login --token <TOKEN>` first.");
        return Err(AppError::Unauthenticated);
    }
    Ok(session)
}

fn print_rows(rows: Vec<BoardRow>) {
    if rows.is_empty() {
        println!("No posts to show.");
        return;
    }
    for row in rows {
        println!("{row}");
    }
}

fn print_view(view: &BoardView) {
    match &view.error {
        Some(message) => println!("error: {message}"),
        None => print_rows(view.rows()),
    }
}

/// Drive the board controller from stdin lines.
async fn run_interactive(config: &Config, session: Session) -> Result<()> {
    let handle = BoardController::spawn(
        transport(config)?,
        session,
        FilterState::new(config.board.default_date_order),
        ControllerOptions::from_config(config),
    );

    let mut updates = handle.subscribe();
    let printer = tokio::spawn(async move {
        let mut shown = 0;
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            if view.loading {
                println!("loading...");
            } else if view.generation != shown {
                shown = view.generation;
                print_view(&view);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_command(&line) {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if !handle.send(event).await {
            break;
        }
    }

    handle.shutdown().await;
    let _ = printer.await;
    Ok(())
}

/// Map an input line to an event; `Ok(None)` quits.
fn parse_command(line: &str) -> std::result::Result<Option<BoardEvent>, String> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Ok(Some(BoardEvent::SetSearchQuery(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit"), _) => Ok(None),
        (Some("refresh"), _) => Ok(Some(BoardEvent::Refresh)),
        (Some("date"), Some(order)) => order.parse().map(|o| Some(BoardEvent::SetDateOrder(o))),
        (Some("tag"), Some("all")) => Ok(Some(BoardEvent::SetTag(None))),
        (Some("tag"), Some(tag)) => Ok(Some(BoardEvent::SetTag(Some(Tag::parse_loose(tag))))),
        _ => Err("commands: :date <recent|oldest>, :tag <adopt|reject|all>, :refresh, :quit".to_string()),
    }
}
