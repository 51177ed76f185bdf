//! `bookshelf` command-line front end.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration, and dispatch one command.
//! - Report failures as a single stderr line with a stable exit code.
//!
//! # Invariants
//! - Every store access goes through `bookshelf_core::Catalog`.
//! - Nothing is retried; a failed command leaves only what the store committed.

use std::io::{self, Write};
use std::path::PathBuf;

use bookshelf_core::{
    init_logging, BookId, Catalog, CatalogConfig, ConfigInput, ReadFilter, SearchQuery,
    SortColumn, SortOrder,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::debug;

mod commands;
mod error;
mod forms;
mod render;

use commands::Output;
use error::CliError;
use forms::{AddForm, EditForm};

#[derive(Parser)]
#[command(
    name = "bookshelf",
    version,
    about = "Personal book catalog",
    long_about = None,
    after_help = r#"EXAMPLES
  $ bookshelf add --title Dune --author Herbert --location "Shelf A" --read --rating 9
  $ bookshelf find dune --read yes --sort rating --desc
  $ bookshelf edit 3 --rating 10
  $ bookshelf export books.csv
  $ bookshelf import books.csv"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Catalog database file (default: ~/.bookshelf/books.db)",
        value_hint = ValueHint::FilePath
    )]
    db: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Write rolling logs into this absolute directory",
        value_hint = ValueHint::DirPath
    )]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: trace|debug|info|warn|error")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Add a book")]
    Add(AddArgs),
    #[command(about = "Search, filter and sort the catalog")]
    Find {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long, help = "Print rows as JSON")]
        json: bool,
    },
    #[command(about = "Show one book")]
    Show {
        id: BookId,
        #[arg(long, help = "Print the record as JSON")]
        json: bool,
    },
    #[command(about = "Edit a book; omitted fields keep their value")]
    Edit(EditArgs),
    #[command(about = "Delete a book")]
    Delete {
        id: BookId,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Import books from a CSV file")]
    Import {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    #[command(about = "Export the filtered, sorted view to a CSV file")]
    Export {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, help = "Mark as read before")]
    read: bool,
    #[arg(long, help = "Rating 1-10; anything else is stored as absent")]
    rating: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    id: BookId,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, conflicts_with = "unread", help = "Mark as read before")]
    read: bool,
    #[arg(long, help = "Mark as not read")]
    unread: bool,
    #[arg(long, help = "New rating 1-10; blank or invalid clears it")]
    rating: Option<String>,
}

#[derive(Args)]
struct ViewArgs {
    #[arg(
        default_value = "",
        hide_default_value = true,
        help = "Keyword matched against title, author and location"
    )]
    keyword: String,
    #[arg(long, default_value = "all", help = "Read filter: all|yes|no")]
    read: ReadFilter,
    #[arg(
        long,
        action = ArgAction::Append,
        help = "Sort column; repeat to toggle direction like a header click"
    )]
    sort: Vec<SortColumn>,
    #[arg(long, help = "Reverse the final sort direction")]
    desc: bool,
}

impl ViewArgs {
    fn query(&self) -> SearchQuery {
        SearchQuery::new(self.keyword.clone()).with_filter(self.read)
    }

    fn order(&self) -> Option<SortOrder> {
        let order = SortOrder::from_clicks(self.sort.iter().copied());
        match (order, self.desc) {
            (Some(order), true) => Some(SortOrder {
                descending: !order.descending,
                ..order
            }),
            (None, true) => Some(SortOrder {
                column: SortColumn::Id,
                descending: true,
            }),
            (order, false) => order,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err}");
            err.exit_code()
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CatalogConfig::resolve(
        ConfigInput {
            db_path: cli.db,
            log_dir: cli.log_dir,
            log_level: cli.log_level,
            home: None,
        }
        .with_process_env(),
    )?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }
    debug!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let catalog = Catalog::open(&config.db_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Add(args) => commands::add(
            &catalog,
            AddForm {
                title: args.title,
                author: args.author,
                location: args.location,
                read_before: args.read,
                rating: args.rating,
            },
            &mut out,
        ),
        Command::Find { view, json } => commands::find(
            &catalog,
            &view.query(),
            view.order(),
            output_mode(json),
            &mut out,
        ),
        Command::Show { id, json } => commands::show(&catalog, id, output_mode(json), &mut out),
        Command::Edit(args) => commands::edit(
            &catalog,
            args.id,
            EditForm {
                title: args.title,
                author: args.author,
                location: args.location,
                read_before: read_flag(args.read, args.unread),
                rating: args.rating,
            },
            &mut out,
        ),
        Command::Delete { id, yes } => {
            commands::delete(&catalog, id, yes, &mut io::stdin().lock(), &mut out)
        }
        Command::Import { file } => {
            commands::import(&catalog, &file, &mut out, &mut io::stderr().lock())
        }
        Command::Export { file, view } => {
            commands::export(&catalog, &file, &view.query(), view.order(), &mut out)
        }
    }
}

fn output_mode(json: bool) -> Output {
    if json {
        Output::Json
    } else {
        Output::Text
    }
}

fn read_flag(read: bool, unread: bool) -> Option<bool> {
    match (read, unread) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
