//! Pricebook CLI
//!
//! Command-line driver for the Pricebook price-list manager, running
//! against a file-backed local store (offline mode, no remote adapter).
//!
//! # Commands
//!
//! - `list` - List items, optionally filtered and sorted
//! - `add` / `update` / `remove` - Mutate the collection
//! - `export` / `import` - Move the collection through a JSON file

mod commands;

use clap::{Parser, Subcommand};
use pricebook_core::PriceBook;
use pricebook_store::{FileStore, ItemStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Pricebook command-line price-list manager.
#[derive(Parser)]
#[command(name = "pricebook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the local collection
    #[arg(global = true, short, long, default_value = "./pricebook-data")]
    data_dir: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List items, optionally filtered and sorted
    List {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        query: String,

        /// Ordering: name-asc, name-desc, price-asc, price-desc,
        /// date-asc, date-desc
        #[arg(short, long, default_value = "date-desc")]
        sort: String,
    },

    /// Add a new item
    Add {
        /// Display name (normalized before storing)
        name: String,

        /// Net price, greater than zero
        price: f64,

        /// Gross price, defaults to zero
        #[arg(short, long)]
        gross_price: Option<f64>,
    },

    /// Update an existing item
    Update {
        /// Id of the item to update
        id: Uuid,

        /// New display name
        name: String,

        /// New net price
        price: f64,

        /// New gross price
        #[arg(short, long)]
        gross_price: Option<f64>,
    },

    /// Remove an item
    Remove {
        /// Id of the item to remove
        id: Uuid,
    },

    /// Export the collection to a JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Import a collection from a JSON file, replacing current content
    Import {
        /// Source file
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open_with_create_dirs(&cli.data_dir)?;
    let book = PriceBook::offline(ItemStore::new(Arc::new(store)));
    book.load().await;

    match cli.command {
        Commands::List { query, sort } => commands::list::run(&book, &query, &sort)?,
        Commands::Add {
            name,
            price,
            gross_price,
        } => commands::item::add(&book, &name, price, gross_price).await?,
        Commands::Update {
            id,
            name,
            price,
            gross_price,
        } => commands::item::update(&book, id, &name, price, gross_price).await?,
        Commands::Remove { id } => commands::item::remove(&book, id).await?,
        Commands::Export { file } => commands::transfer::export(&book, &file)?,
        Commands::Import { file } => commands::transfer::import(&book, &file).await?,
    }

    book.close();
    Ok(())
}
