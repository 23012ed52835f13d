use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_TAG_COLOR: &str = "#3498db";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: i64,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub date_added: DateTime<Utc>,
    pub asset_type: String,
    pub description: String,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewAsset {
    pub name: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub file_size: i64,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub asset_type: String,
    pub description: String,
    pub category_id: Option<i64>,
}

/// The editable part of an asset. File metadata is never rewritten.
#[derive(Debug, Clone, Default)]
pub struct AssetUpdate {
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
}

impl From<&Asset> for AssetUpdate {
    fn from(asset: &Asset) -> Self {
        Self {
            name: asset.name.clone(),
            description: asset.description.clone(),
            category_id: asset.category_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMatch {
    /// At least one of the requested tags.
    #[default]
    Any,
    /// Every requested tag.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Name,
    FilePath,
    FileSize,
    AssetType,
    DateCreated,
    DateModified,
    #[default]
    DateAdded,
}

impl SortColumn {
    /// Fixed ORDER BY expression; never built from user text.
    pub fn order_expr(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name COLLATE NOCASE",
            SortColumn::FilePath => "FilePath",
            SortColumn::FileSize => "FileSize",
            SortColumn::AssetType => "AssetType",
            SortColumn::DateCreated => "DateCreated",
            SortColumn::DateModified => "DateModified",
            SortColumn::DateAdded => "DateAdded",
        }
    }

    pub fn parse(s: &str) -> Option<SortColumn> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Some(SortColumn::Name),
            "path" | "filepath" => Some(SortColumn::FilePath),
            "size" | "filesize" => Some(SortColumn::FileSize),
            "type" | "assettype" => Some(SortColumn::AssetType),
            "created" | "datecreated" => Some(SortColumn::DateCreated),
            "modified" | "datemodified" => Some(SortColumn::DateModified),
            "added" | "dateadded" => Some(SortColumn::DateAdded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetFilter {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub asset_type: Option<String>,
    pub tag_ids: Vec<i64>,
    pub tag_match: TagMatch,
    pub sort_by: SortColumn,
    pub descending: bool,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self {
            search: None,
            category_id: None,
            asset_type: None,
            tag_ids: Vec::new(),
            tag_match: TagMatch::Any,
            sort_by: SortColumn::DateAdded,
            descending: true,
        }
    }
}

impl AssetFilter {
    /// The trimmed search term, or `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub category: Category,
    /// Assets filed directly under this category.
    pub asset_count: i64,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Assets in this node and all of its descendants.
    pub fn total_assets(&self) -> i64 {
        self.asset_count + self.children.iter().map(|c| c.total_assets()).sum::<i64>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogStats {
    pub total_assets: i64,
    pub total_size: i64,
    pub uncategorized_assets: i64,
    pub categories: i64,
    pub tags: i64,
    pub oldest_added: Option<DateTime<Utc>>,
    pub newest_added: Option<DateTime<Utc>>,
}
