use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use assetcat::config::AppPaths;
use assetcat::errors::{CatalogError, Result};
use assetcat::import::{add_file, import_dir};
use assetcat::storage::models::{
    Asset, AssetFilter, AssetUpdate, CategoryNode, SortColumn, Tag, TagMatch,
};
use assetcat::storage::sqlite::SqliteStorage;
use assetcat::storage::{AssetRepository, CategoryRepository, TagRepository};
use assetcat::thumbnail::AssetKind;

#[derive(Parser)]
#[command(name = "assetcat", version, about = "Catalogue local files into categories and tags")]
struct Cli {
    /// Output results as JSON
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Use this database file instead of the default location
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add, list, edit and remove assets
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Manage the category tree
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage tags and asset tagging
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Show catalogue statistics
    Stats,
}

#[derive(Subcommand)]
enum AssetAction {
    /// Add files to the catalogue
    Add {
        /// Files to add
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Add every visible file in a folder
    Import {
        /// Folder to import
        dir: PathBuf,

        /// Include subfolders
        #[arg(short, long)]
        recursive: bool,
    },

    /// List assets
    List {
        /// Match a substring of the name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Only assets filed directly in this category
        #[arg(short, long)]
        category: Option<i64>,

        /// Filter by type (file extension), e.g. png
        #[arg(short = 't', long)]
        r#type: Option<String>,

        /// Filter by tag id (repeatable)
        #[arg(long = "tag")]
        tags: Vec<i64>,

        /// Require every --tag instead of any
        #[arg(long)]
        all_tags: bool,

        /// Sort by: name, path, size, type, created, modified, added
        #[arg(long, default_value = "added")]
        sort: String,

        /// Sort ascending
        #[arg(long)]
        asc: bool,
    },

    /// Show one asset with its tags
    Show {
        /// Asset ID
        id: i64,
    },

    /// Edit an asset's name, description or category
    Edit {
        /// Asset ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Move into this category
        #[arg(long, conflicts_with = "no_category")]
        category: Option<i64>,

        /// Remove from its category
        #[arg(long)]
        no_category: bool,
    },

    /// Remove an asset from the catalogue (the file is untouched)
    Rm {
        /// Asset ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Print the category tree
    List,

    /// Create a category
    Add {
        name: String,

        /// Parent category ID
        #[arg(short, long)]
        parent: Option<i64>,
    },

    /// Rename a category
    Rename { id: i64, name: String },

    /// Delete a category; children move up to its parent
    Rm {
        id: i64,

        /// Refile its assets here instead of leaving them uncategorised
        #[arg(long)]
        move_assets_to: Option<i64>,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// List tags
    List,

    /// Create a tag
    Add {
        name: String,

        /// Hex colour, e.g. #e74c3c
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename or recolour a tag
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a tag and untag every asset carrying it
    Rm { id: i64 },

    /// Replace an asset's tags with exactly these tag IDs
    Set { asset_id: i64, tag_ids: Vec<i64> },

    /// Tag an asset
    Attach { asset_id: i64, tag_id: i64 },

    /// Untag an asset
    Detach { asset_id: i64, tag_id: i64 },
}

#[derive(Serialize)]
struct StatusResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

#[derive(Serialize)]
struct AssetDetail {
    #[serde(flatten)]
    asset: Asset,
    kind: AssetKind,
    category: Option<String>,
    tags: Vec<Tag>,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        if json {
            eprintln!("{}", serde_json::json!({"error": e.to_string()}));
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let paths = match cli.db {
        Some(db) => AppPaths::from_db_path(db),
        None => AppPaths::new()?,
    };
    let storage = open_storage(&paths)?;
    let json = cli.json;

    match cli.command {
        None => cmd_asset(&storage, default_list(), json),
        Some(Commands::Asset { action }) => cmd_asset(&storage, action, json),
        Some(Commands::Category { action }) => cmd_category(&storage, action, json),
        Some(Commands::Tag { action }) => cmd_tag(&storage, action, json),
        Some(Commands::Stats) => cmd_stats(&storage, &paths, json),
    }
}

fn default_list() -> AssetAction {
    AssetAction::List {
        search: None,
        category: None,
        r#type: None,
        tags: Vec::new(),
        all_tags: false,
        sort: "added".into(),
        asc: false,
    }
}

fn open_storage(paths: &AppPaths) -> Result<SqliteStorage> {
    std::fs::create_dir_all(&paths.base_dir)?;
    SqliteStorage::open(&paths.db_path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn report(json: bool, success: bool, message: String, id: Option<i64>) -> Result<()> {
    if json {
        print_json(&StatusResponse { success, message, id })
    } else {
        println!("{}", message);
        Ok(())
    }
}

fn cmd_asset(storage: &SqliteStorage, action: AssetAction, json: bool) -> Result<()> {
    match action {
        AssetAction::Add { paths } => {
            let mut added = Vec::new();
            let mut first_error = None;
            for path in &paths {
                match add_file(storage, path) {
                    Ok(Some(asset)) => {
                        if !json {
                            println!("Added #{} {}", asset.id, asset.file_path);
                        }
                        added.push(asset);
                    }
                    Ok(None) => {
                        if !json {
                            println!("Already catalogued: {}", path.display());
                        }
                    }
                    Err(e) => {
                        eprintln!("error adding {}: {}", path.display(), e);
                        first_error.get_or_insert(e);
                    }
                }
            }
            if json {
                print_json(&added)?;
            }
            match first_error {
                Some(e) if added.is_empty() => Err(e),
                _ => Ok(()),
            }
        }
        AssetAction::Import { dir, recursive } => {
            let result = import_dir(storage, &dir, recursive)?;
            if json {
                return print_json(&result);
            }
            for failure in &result.failed {
                eprintln!("error adding {}: {}", failure.path, failure.error);
            }
            println!(
                "Imported {} file(s), {} already catalogued, {} failed.",
                result.added.len(),
                result.skipped,
                result.failed.len()
            );
            Ok(())
        }
        AssetAction::List {
            search,
            category,
            r#type,
            tags,
            all_tags,
            sort,
            asc,
        } => {
            let sort_by = SortColumn::parse(&sort)
                .ok_or_else(|| CatalogError::InvalidInput(format!("unknown sort column '{}'", sort)))?;
            let filter = AssetFilter {
                search,
                category_id: category,
                asset_type: r#type,
                tag_ids: tags,
                tag_match: if all_tags { TagMatch::All } else { TagMatch::Any },
                sort_by,
                descending: !asc,
            };
            let assets = storage.list_assets(&filter)?;
            if json {
                return print_json(&assets);
            }
            if assets.is_empty() {
                println!("No assets found.");
                return Ok(());
            }
            for asset in &assets {
                let tags = storage.tags_for_asset(asset.id)?;
                print_asset_row(asset, &tags);
            }
            println!("{} assets", assets.len());
            Ok(())
        }
        AssetAction::Show { id } => {
            let asset = storage.get_asset(id)?;
            let category = match asset.category_id {
                Some(cid) => Some(storage.get_category(cid)?.name),
                None => None,
            };
            let detail = AssetDetail {
                kind: AssetKind::detect(&asset.asset_type, asset.thumbnail_path.is_some()),
                tags: storage.tags_for_asset(id)?,
                category,
                asset,
            };
            if json {
                return print_json(&detail);
            }
            print_asset_detail(&detail);
            Ok(())
        }
        AssetAction::Edit {
            id,
            name,
            description,
            category,
            no_category,
        } => {
            let asset = storage.get_asset(id)?;
            let mut update = AssetUpdate::from(&asset);
            if let Some(name) = name {
                update.name = name;
            }
            if let Some(description) = description {
                update.description = description;
            }
            if no_category {
                update.category_id = None;
            } else if let Some(category) = category {
                update.category_id = Some(storage.get_category(category)?.id);
            }
            let updated = storage.update_asset(id, update)?;
            report(json, updated, format!("Updated asset #{}.", id), Some(id))
        }
        AssetAction::Rm { id } => {
            let found = storage.delete_asset(id)?;
            let message = if found {
                format!("Removed asset #{} from the catalogue.", id)
            } else {
                format!("Asset #{} not found.", id)
            };
            report(json, found, message, Some(id))
        }
    }
}

fn cmd_category(storage: &SqliteStorage, action: CategoryAction, json: bool) -> Result<()> {
    match action {
        CategoryAction::List => {
            let tree = storage.category_tree()?;
            if json {
                return print_json(&tree);
            }
            if tree.is_empty() {
                println!("No categories.");
            }
            for node in &tree {
                print_category_node(node, 0);
            }
            Ok(())
        }
        CategoryAction::Add { name, parent } => {
            let category = storage.create_category(&name, parent)?;
            if json {
                return print_json(&category);
            }
            println!("Created category #{} \"{}\".", category.id, category.name);
            Ok(())
        }
        CategoryAction::Rename { id, name } => {
            let renamed = storage.rename_category(id, &name)?;
            let message = if renamed {
                format!("Renamed category #{} to \"{}\".", id, name.trim())
            } else {
                format!("Category #{} not found.", id)
            };
            report(json, renamed, message, Some(id))
        }
        CategoryAction::Rm { id, move_assets_to } => {
            let deleted = storage.delete_category(id, move_assets_to)?;
            let message = match (deleted, move_assets_to) {
                (false, _) => format!("Category #{} not found.", id),
                (true, Some(target)) => {
                    format!("Deleted category #{}; its assets moved to #{}.", id, target)
                }
                (true, None) => format!("Deleted category #{}.", id),
            };
            report(json, deleted, message, Some(id))
        }
    }
}

fn cmd_tag(storage: &SqliteStorage, action: TagAction, json: bool) -> Result<()> {
    match action {
        TagAction::List => {
            let tags = storage.list_tags()?;
            if json {
                return print_json(&tags);
            }
            if tags.is_empty() {
                println!("No tags.");
            }
            for tag in &tags {
                println!("{:>4} {} {}", tag.id, tag.color, tag.name);
            }
            Ok(())
        }
        TagAction::Add { name, color } => {
            let tag = storage.create_tag(&name, color.as_deref())?;
            if json {
                return print_json(&tag);
            }
            println!("Created tag #{} \"{}\" ({}).", tag.id, tag.name, tag.color);
            Ok(())
        }
        TagAction::Edit { id, name, color } => {
            let current = storage.get_tag(id)?;
            let name = name.unwrap_or(current.name);
            let updated = storage.update_tag(id, &name, color.as_deref())?;
            report(json, updated, format!("Updated tag #{}.", id), Some(id))
        }
        TagAction::Rm { id } => {
            let deleted = storage.delete_tag(id)?;
            let message = if deleted {
                format!("Deleted tag #{}.", id)
            } else {
                format!("Tag #{} not found.", id)
            };
            report(json, deleted, message, Some(id))
        }
        TagAction::Set { asset_id, tag_ids } => {
            storage.get_asset(asset_id)?;
            let count = storage.set_asset_tags(asset_id, &tag_ids)?;
            report(
                json,
                true,
                format!("Asset #{} now has {} tag(s).", asset_id, count),
                Some(asset_id),
            )
        }
        TagAction::Attach { asset_id, tag_id } => {
            let added = storage.attach_tag(asset_id, tag_id)?;
            let message = if added {
                format!("Tagged asset #{} with tag #{}.", asset_id, tag_id)
            } else {
                format!("Asset #{} already has tag #{}.", asset_id, tag_id)
            };
            report(json, true, message, Some(asset_id))
        }
        TagAction::Detach { asset_id, tag_id } => {
            let removed = storage.detach_tag(asset_id, tag_id)?;
            let message = if removed {
                format!("Removed tag #{} from asset #{}.", tag_id, asset_id)
            } else {
                format!("Asset #{} does not have tag #{}.", asset_id, tag_id)
            };
            report(json, removed, message, Some(asset_id))
        }
    }
}

fn cmd_stats(storage: &SqliteStorage, paths: &AppPaths, json: bool) -> Result<()> {
    let stats = storage.stats()?;
    if json {
        return print_json(&stats);
    }
    println!("Database:      {}", paths.db_path.display());
    println!("Assets:        {}", stats.total_assets);
    println!("Uncategorised: {}", stats.uncategorized_assets);
    println!("Total size:    {}", format_bytes(stats.total_size));
    println!("Categories:    {}", stats.categories);
    println!("Tags:          {}", stats.tags);
    if let (Some(oldest), Some(newest)) = (stats.oldest_added, stats.newest_added) {
        println!("First added:   {}", format_time(oldest));
        println!("Last added:    {}", format_time(newest));
    }
    Ok(())
}

fn print_asset_row(asset: &Asset, tags: &[Tag]) {
    let tags = if tags.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        format!(" [{}]", names.join(", "))
    };
    println!(
        "{:>4} {:<5} {:>10}  {}{}",
        asset.id,
        asset.asset_type,
        format_bytes(asset.file_size),
        asset.name,
        tags
    );
}

fn print_asset_detail(detail: &AssetDetail) {
    let asset = &detail.asset;
    println!("ID:          {}", asset.id);
    println!("Name:        {}", asset.name);
    println!("Path:        {}", asset.file_path);
    println!("Type:        {} ({})", asset.asset_type, detail.kind.as_str());
    println!("Size:        {}", format_bytes(asset.file_size));
    println!("Created:     {}", format_time(asset.date_created));
    println!("Modified:    {}", format_time(asset.date_modified));
    println!("Added:       {}", format_time(asset.date_added));
    println!(
        "Category:    {}",
        detail.category.as_deref().unwrap_or("(none)")
    );
    if let Some(ref thumb) = asset.thumbnail_path {
        println!("Thumbnail:   {}", thumb);
    }
    if !detail.tags.is_empty() {
        let names: Vec<&str> = detail.tags.iter().map(|t| t.name.as_str()).collect();
        println!("Tags:        {}", names.join(", "));
    }
    if !asset.description.is_empty() {
        println!("─────────────────────────");
        println!("{}", asset.description);
    }
}

/// Direct count first; the subtree total is added only when it differs.
fn category_label(node: &CategoryNode) -> String {
    let total = node.total_assets();
    if total == node.asset_count {
        format!("{} ({})", node.category.name, node.asset_count)
    } else {
        format!("{} ({}, {} with subcategories)", node.category.name, node.asset_count, total)
    }
}

fn print_category_node(node: &CategoryNode, depth: usize) {
    println!("{:>4} {}{}", node.category.id, "  ".repeat(depth), category_label(node));
    for child in &node.children {
        print_category_node(child, depth + 1);
    }
}

fn format_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_bytes(bytes: i64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
