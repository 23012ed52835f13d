pub mod models;
pub mod schema;
pub mod sqlite;

use std::collections::HashMap;

use crate::errors::Result;
use models::{
    Asset, AssetFilter, AssetUpdate, CatalogStats, Category, CategoryNode, NewAsset, Tag,
};

pub trait AssetRepository {
    /// Returns `None` when an asset with the same file path is already catalogued.
    fn insert_asset(&self, asset: NewAsset) -> Result<Option<Asset>>;
    fn get_asset(&self, id: i64) -> Result<Asset>;
    fn find_asset_by_path(&self, path: &str) -> Result<Option<Asset>>;
    fn asset_exists(&self, path: &str) -> Result<bool>;
    fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>>;
    fn update_asset(&self, id: i64, update: AssetUpdate) -> Result<bool>;
    fn delete_asset(&self, id: i64) -> Result<bool>;
    fn stats(&self) -> Result<CatalogStats>;
}

pub trait CategoryRepository {
    fn create_category(&self, name: &str, parent_id: Option<i64>) -> Result<Category>;
    fn get_category(&self, id: i64) -> Result<Category>;
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn root_categories(&self) -> Result<Vec<Category>>;
    fn child_categories(&self, parent_id: i64) -> Result<Vec<Category>>;
    fn rename_category(&self, id: i64, name: &str) -> Result<bool>;
    /// Moves the category's assets to `move_assets_to` (or uncategorised) and
    /// its children to its own parent, then removes it. All or nothing.
    fn delete_category(&self, id: i64, move_assets_to: Option<i64>) -> Result<bool>;
    fn asset_counts(&self) -> Result<HashMap<i64, i64>>;
    fn category_tree(&self) -> Result<Vec<CategoryNode>>;
}

pub trait TagRepository {
    fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag>;
    fn get_tag(&self, id: i64) -> Result<Tag>;
    fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;
    fn tag_exists(&self, name: &str) -> Result<bool>;
    fn list_tags(&self) -> Result<Vec<Tag>>;
    fn update_tag(&self, id: i64, name: &str, color: Option<&str>) -> Result<bool>;
    fn delete_tag(&self, id: i64) -> Result<bool>;
    fn tags_for_asset(&self, asset_id: i64) -> Result<Vec<Tag>>;
    fn tag_ids_for_asset(&self, asset_id: i64) -> Result<Vec<i64>>;
    fn attach_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool>;
    fn detach_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool>;
    fn asset_has_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool>;
    /// Replaces the asset's tags with exactly `tag_ids`. Returns the number of
    /// tags the asset now carries.
    fn set_asset_tags(&self, asset_id: i64, tag_ids: &[i64]) -> Result<usize>;
}
