use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use bookstore::{
    config::{self, AppConfig},
    db::{self, DbPool},
    logging, CreateItemInput, Item, ItemListQuery, ItemListResult, ItemService, UpdateItemInput,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize(cli.in_memory).await?;

    match cli.command {
        Commands::Migrate => handle_migrate(&context).await?,
        Commands::Item(command) => handle_item_command(&context, command, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "bookstore", about = "Manage bookstore catalog items", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Use a throwaway in-memory store instead of the configured database"
    )]
    in_memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    #[command(flatten)]
    Item(ItemCommand),
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Add a new item
    Add(AddItemArgs),
    /// Show one item
    Get(ItemIdArgs),
    /// List items ordered by id
    List(ListItemsArgs),
    /// Overwrite fields of an existing item
    Update(UpdateItemArgs),
    /// Remove an item
    Delete(ItemIdArgs),
}

#[derive(Args)]
struct AddItemArgs {
    #[arg(long, help = "Explicit item id; a random one is generated when omitted")]
    id: Option<Uuid>,
    #[arg(long)]
    isbn: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    author: String,
    #[arg(long, help = "Price with at most 4 whole digits and 2 decimals")]
    price: Decimal,
}

#[derive(Args)]
struct ItemIdArgs {
    id: Uuid,
}

#[derive(Args)]
struct ListItemsArgs {
    #[arg(long, default_value_t = 20)]
    limit: u64,
    #[arg(long, default_value_t = 0)]
    offset: u64,
}

#[derive(Args)]
struct UpdateItemArgs {
    id: Uuid,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    price: Option<Decimal>,
}

struct CliContext {
    db: Option<Arc<DbPool>>,
    items: ItemService,
}

impl CliContext {
    async fn initialize(in_memory: bool) -> Result<Self> {
        let config = config::load_config().context("failed to load application config")?;
        logging::init_tracing(config.log_level(), config.log_json);

        if in_memory {
            debug!("using in-memory item store");
            return Ok(Self {
                db: None,
                items: ItemService::in_memory(),
            });
        }

        let db = Arc::new(connect(&config).await?);
        Ok(Self {
            items: ItemService::with_database(db.clone()),
            db: Some(db),
        })
    }
}

async fn connect(config: &AppConfig) -> Result<DbPool> {
    let pool = db::establish_connection_from_app_config(config)
        .await
        .context("failed to connect to database")?;

    if config.auto_migrate {
        db::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
    }

    Ok(pool)
}

async fn handle_migrate(context: &CliContext) -> Result<()> {
    match &context.db {
        Some(pool) => {
            db::run_migrations(pool)
                .await
                .context("failed to run migrations")?;
            println!("Migrations applied");
        }
        None => println!("In-memory store has no schema to migrate"),
    }
    Ok(())
}

async fn handle_item_command(context: &CliContext, command: ItemCommand, json: bool) -> Result<()> {
    let service = &context.items;
    match command {
        ItemCommand::Add(args) => {
            let item = service
                .create_item(CreateItemInput {
                    id: args.id,
                    isbn: args.isbn,
                    title: args.title,
                    author: args.author,
                    price: args.price,
                })
                .await
                .context("failed to add item")?;
            info!(item_id = %item.id, "item added");
            output(&item, json, render_item)
        }
        ItemCommand::Get(args) => {
            let item = service
                .get_item(args.id)
                .await
                .with_context(|| format!("failed to fetch item {}", args.id))?;
            output(&item, json, render_item)
        }
        ItemCommand::List(args) => {
            let result = service
                .list_items(ItemListQuery {
                    limit: Some(args.limit),
                    offset: Some(args.offset),
                })
                .await
                .context("failed to list items")?;
            output(&result, json, render_item_list)
        }
        ItemCommand::Update(args) => {
            let item = service
                .update_item(
                    args.id,
                    UpdateItemInput {
                        isbn: args.isbn,
                        title: args.title,
                        author: args.author,
                        price: args.price,
                    },
                )
                .await
                .with_context(|| format!("failed to update item {}", args.id))?;
            output(&item, json, render_item)
        }
        ItemCommand::Delete(args) => {
            service
                .delete_item(args.id)
                .await
                .with_context(|| format!("failed to delete item {}", args.id))?;
            println!("Item {} deleted", args.id);
            Ok(())
        }
    }
}

fn output<T: Serialize>(value: &T, json: bool, render: fn(&T)) -> Result<()> {
    if json {
        print_json(value)
    } else {
        render(value);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_item(item: &Item) {
    println!(
        "- Item {} • ISBN {} • {} by {} • price {}",
        item.id, item.isbn, item.title, item.author, item.price
    );
}

fn render_item_list(result: &ItemListResult) {
    if result.items.is_empty() {
        println!("No items ({} total)", result.total);
        return;
    }
    println!("Items ({} of {} total):", result.items.len(), result.total);
    for item in &result.items {
        render_item(item);
    }
}
