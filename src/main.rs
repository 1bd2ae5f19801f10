//! Retro workshop calculator
//!
//! Command line front end for crafting trees, workshop list resources and runes.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, prelude::*};

use retro_workshop::{CatalogStore, WorkshopStore, db, sample, tree, workshop};

#[derive(Parser)]
#[command(name = "retro-workshop")]
#[command(about = "Crafting tree and workshop list calculator")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, env = "WORKSHOP_DB", default_value = "workshop.db")]
    database: PathBuf,

    /// Language used for item and marketplace names
    #[arg(short, long, env = "WORKSHOP_LANG", default_value = "fr")]
    language: String,

    /// How many recipe levels to expand below each list item
    #[arg(long, env = "WORKSHOP_MAX_DEPTH", default_value_t = tree::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema and reference data
    Init,

    /// Replace the catalog with a small sample (without game data)
    LoadSample,

    /// Search items by name
    Search {
        /// Part of the item name (empty lists everything)
        #[arg(default_value = "")]
        query: String,

        /// Only items of these type ids
        #[arg(short = 't', long = "type")]
        types: Vec<i64>,

        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show the crafting tree of an item
    Tree {
        /// Game id of the item
        anka_id: i64,
    },

    /// Resources needed for a workshop list, grouped by marketplace
    Resources {
        list_id: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Runes obtainable by breaking the items of a workshop list
    Runes {
        list_id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Full report for a workshop list
    Summary { list_id: i64 },

    /// Show a user's workshop lists
    Lists { user_id: i64 },

    /// Create a workshop list
    CreateList {
        user_id: i64,
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Add an item (by game id) to a workshop list
    AddItem {
        list_id: i64,
        anka_id: i64,

        #[arg(short, long, default_value = "1")]
        quantity: i64,

        #[arg(short, long, default_value = "")]
        notes: String,

        /// Refuse unless the list belongs to this user
        #[arg(long)]
        user: Option<i64>,
    },

    /// Remove an entry from its workshop list
    RemoveItem { entry_id: i64 },

    /// Remove an item (by game id) from a workshop list
    RemoveFromList { list_id: i64, anka_id: i64 },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let conn = Connection::open(&cli.database)
        .with_context(|| format!("Failed to open {}", cli.database.display()))?;
    db::init_schema(&conn)?;
    db::seed_reference_data(&conn)?;

    let language = cli.language.as_str();

    match cli.command {
        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            let list_id = sample::load_sample_data(&conn)?;
            println!(
                "Sample data loaded. Try: retro-workshop summary {} (user {})",
                list_id,
                sample::SAMPLE_USER_ID
            );
        }

        Commands::Tree { anka_id } => {
            let Some(mut item) = conn.find_item_by_anka_id(anka_id, language)? else {
                bail!("Item {} not found", anka_id);
            };
            tree::load_recipe_tree(&conn, &mut item, language, cli.max_depth)
                .with_context(|| format!("Failed to load recipe tree of item {}", anka_id))?;
            print!("{}", tree::format_recipe_tree(&item, language));
            match tree::recipe_depth(&item) {
                Some(depth) => println!("({} recipe level(s) shown)", depth + 1),
                None => println!("(base material)"),
            }
        }

        Commands::Search {
            query,
            types,
            limit,
            page,
        } => {
            let limit = limit.max(1);
            let offset = (page.max(1) - 1) * limit;
            let results = db::search_items(&conn, &query, language, &types, limit, offset)?;

            if results.items.is_empty() {
                println!("No items found ({} total)", results.total);
            } else {
                println!("{:>8} {:<40} {:>6} {:>6}", "Id", "Name", "Type", "Level");
                println!("{}", "-".repeat(63));
                for item in &results.items {
                    println!(
                        "{:>8} {:<40} {:>6} {:>6}",
                        item.anka_id,
                        item.display_name(language),
                        item.type_anka_id,
                        item.level
                    );
                }
                println!(
                    "Showing {}-{} of {}",
                    offset + 1,
                    offset + results.items.len(),
                    results.total
                );
            }
        }

        Commands::Resources { list_id, json } => {
            let grouped =
                workshop::grouped_resources_for_list(&conn, list_id, language, cli.max_depth)
                    .with_context(|| format!("Failed to compute resources for list {}", list_id))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&grouped)?);
            } else if grouped.is_empty() {
                println!("Nothing to craft in list {}", list_id);
            } else {
                for group in &grouped.groups {
                    let title = if group.name.is_empty() {
                        "No marketplace"
                    } else {
                        group.name.as_str()
                    };
                    println!("{}", title);
                    for r in &group.resources {
                        println!("  {:>6}x {}", r.total_needed, r.name);
                    }
                }
            }
        }

        Commands::Runes { list_id, json } => {
            let runes = workshop::runes_for_list(&conn, list_id, language)
                .with_context(|| format!("Failed to collect runes for list {}", list_id))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&runes)?);
            } else {
                println!("{:<24} {:<8} {:>8}", "Rune", "Tier", "Weight");
                println!("{}", "-".repeat(42));
                for rune in runes {
                    println!("{:<24} {:<8} {:>8}", rune.name, rune.tier.as_str(), rune.weight);
                }
            }
        }

        Commands::Summary { list_id } => {
            let summary = workshop::summarize_list(&conn, list_id, language, cli.max_depth)?;
            println!("{}", summary);
        }

        Commands::Lists { user_id } => {
            let lists = db::workshop_lists_for_user(&conn, user_id)?;
            if lists.is_empty() {
                println!("User {} has no workshop lists", user_id);
            } else {
                println!("{:>5} {:<32} {:>6} {:>20}", "Id", "Name", "Items", "Updated");
                println!("{}", "-".repeat(66));
                for l in lists {
                    println!("{:>5} {:<32} {:>6} {:>20}", l.id, l.name, l.item_count, l.updated_at);
                }
            }
        }

        Commands::CreateList {
            user_id,
            name,
            description,
        } => {
            let id = db::create_workshop_list(&conn, user_id, &name, &description)?;
            println!("Created workshop list {}", id);
        }

        Commands::AddItem {
            list_id,
            anka_id,
            quantity,
            notes,
            user,
        } => {
            let Some(item) = conn.find_item_by_anka_id(anka_id, language)? else {
                bail!("Item {} not found", anka_id);
            };
            if conn.find_workshop_list(list_id)?.is_none() {
                bail!("Workshop list {} not found", list_id);
            }
            if let Some(user_id) = user {
                if !db::is_workshop_list_owner(&conn, list_id, user_id)? {
                    bail!("Workshop list {} does not belong to user {}", list_id, user_id);
                }
            }
            let merged = db::is_item_in_workshop_list(&conn, list_id, item.id)?;
            let entry = db::add_item_to_workshop_list(&conn, list_id, item.id, quantity, &notes)?;
            let craftable = if db::item_has_recipe(&conn, item.id)? {
                "craftable"
            } else {
                "base material"
            };
            let action = if merged { "Updated" } else { "Added" };
            println!(
                "{} {} ({}) in list {} as entry {} ({} entries)",
                action,
                item.display_name(language),
                craftable,
                list_id,
                entry,
                db::workshop_list_item_count(&conn, list_id)?
            );
        }

        Commands::RemoveItem { entry_id } => {
            if db::remove_item_from_workshop_list(&conn, entry_id)? {
                println!("Removed entry {}", entry_id);
            } else {
                println!("Entry {} not found", entry_id);
            }
        }

        Commands::RemoveFromList { list_id, anka_id } => {
            let Some(item) = conn.find_item_by_anka_id(anka_id, language)? else {
                bail!("Item {} not found", anka_id);
            };
            if db::remove_item_from_workshop_list_by_item_id(&conn, list_id, item.id)? {
                println!("Removed {} from list {}", item.display_name(language), list_id);
            } else {
                println!("Item {} is not in list {}", anka_id, list_id);
            }
        }
    }

    Ok(())
}
