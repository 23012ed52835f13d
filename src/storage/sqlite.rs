mod categories;
mod tags;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, Row, params};
use tracing::{debug, info};

use super::AssetRepository;
use super::models::{Asset, AssetFilter, AssetUpdate, CatalogStats, NewAsset, TagMatch};
use super::schema;
use crate::errors::{CatalogError, Result};

const ASSET_COLUMNS: &str = "
    Id, Name, FilePath, ThumbnailPath, FileSize, DateCreated, DateModified,
    DateAdded, AssetType, Description, CategoryId
";

pub struct SqliteStorage {
    conn: Connection,
}

fn row_to_asset(row: &Row) -> rusqlite::Result<Asset> {
    Ok(Asset {
        id: row.get(0)?,
        name: row.get(1)?,
        file_path: row.get(2)?,
        thumbnail_path: row.get(3)?,
        file_size: row.get(4)?,
        date_created: row.get(5)?,
        date_modified: row.get(6)?,
        date_added: row.get(7)?,
        asset_type: row.get(8)?,
        description: row.get(9)?,
        category_id: row.get(10)?,
    })
}

/// Escapes LIKE wildcards so the term matches as a literal substring.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute(schema::CREATE_CATEGORIES_TABLE, [])?;
        conn.execute(schema::CREATE_TAGS_TABLE, [])?;
        conn.execute(schema::CREATE_ASSETS_TABLE, [])?;
        conn.execute(schema::CREATE_ASSET_TAGS_TABLE, [])?;
        conn.execute(schema::CREATE_INDEX_ASSET_CATEGORY, [])?;
        conn.execute(schema::CREATE_INDEX_CATEGORY_PARENT, [])?;
        conn.execute(schema::CREATE_INDEX_ASSET_TAGS_TAG, [])?;
        let storage = Self { conn };
        storage.seed_default_categories()?;
        Ok(storage)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened catalogue database");
        Self::new(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::new(conn)
    }

    /// Inserts the default category tree when the table is empty.
    /// Returns the number of rows written.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut ids: HashMap<&str, i64> = HashMap::new();
        for &(name, parent) in schema::DEFAULT_CATEGORIES {
            let parent_id = parent.and_then(|p| ids.get(p).copied());
            tx.execute(
                "INSERT INTO Categories (CategoryName, ParentCategoryId) VALUES (?, ?)",
                params![name, parent_id],
            )?;
            ids.insert(name, tx.last_insert_rowid());
        }
        tx.commit()?;

        info!(count = ids.len(), "seeded default categories");
        Ok(ids.len())
    }

    #[cfg(test)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl AssetRepository for SqliteStorage {
    fn insert_asset(&self, asset: NewAsset) -> Result<Option<Asset>> {
        if self.asset_exists(&asset.file_path)? {
            debug!(path = %asset.file_path, "asset already catalogued");
            return Ok(None);
        }
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO Assets (Name, FilePath, ThumbnailPath, FileSize, DateCreated, DateModified, DateAdded, AssetType, Description, CategoryId)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                asset.name,
                asset.file_path,
                asset.thumbnail_path,
                asset.file_size,
                asset.date_created,
                asset.date_modified,
                now,
                asset.asset_type,
                asset.description,
                asset.category_id,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_asset(id).map(Some)
    }

    fn get_asset(&self, id: i64) -> Result<Asset> {
        let sql = format!("SELECT {} FROM Assets WHERE Id = ?", ASSET_COLUMNS);
        self.conn
            .query_row(&sql, params![id], row_to_asset)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    CatalogError::NotFound(format!("Asset with id {} not found", id))
                }
                other => CatalogError::Storage(other),
            })
    }

    fn find_asset_by_path(&self, path: &str) -> Result<Option<Asset>> {
        let sql = format!("SELECT {} FROM Assets WHERE FilePath = ?", ASSET_COLUMNS);
        match self.conn.query_row(&sql, params![path], row_to_asset) {
            Ok(asset) => Ok(Some(asset)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Storage(e)),
        }
    }

    fn asset_exists(&self, path: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM Assets WHERE FilePath = ?",
            params![path],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
        let mut conditions = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(term) = filter.search_term() {
            conditions.push(
                "(Name LIKE ? ESCAPE '\\' OR Description LIKE ? ESCAPE '\\')".to_string(),
            );
            let pattern = format!("%{}%", escape_like(term));
            param_values.push(Box::new(pattern.clone()));
            param_values.push(Box::new(pattern));
        }
        if let Some(category_id) = filter.category_id {
            conditions.push("CategoryId = ?".to_string());
            param_values.push(Box::new(category_id));
        }
        if let Some(asset_type) = filter.asset_type.as_deref().map(str::trim) {
            if !asset_type.is_empty() {
                conditions.push("AssetType = ?".to_string());
                param_values.push(Box::new(asset_type.to_uppercase()));
            }
        }

        let tag_ids: BTreeSet<i64> = filter.tag_ids.iter().copied().collect();
        if !tag_ids.is_empty() {
            let marks = placeholders(tag_ids.len());
            match filter.tag_match {
                TagMatch::Any => conditions.push(format!(
                    "Id IN (SELECT AssetId FROM AssetTags WHERE TagId IN ({}))",
                    marks
                )),
                TagMatch::All => conditions.push(format!(
                    "Id IN (SELECT AssetId FROM AssetTags WHERE TagId IN ({})
                            GROUP BY AssetId HAVING COUNT(DISTINCT TagId) = ?)",
                    marks
                )),
            }
            for id in &tag_ids {
                param_values.push(Box::new(*id));
            }
            if filter.tag_match == TagMatch::All {
                param_values.push(Box::new(tag_ids.len() as i64));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let direction = if filter.descending { "DESC" } else { "ASC" };

        let sql = format!(
            "SELECT {} FROM Assets {} ORDER BY {} {}, Id {}",
            ASSET_COLUMNS,
            where_clause,
            filter.sort_by.order_expr(),
            direction,
            direction
        );

        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let assets = stmt
            .query_map(param_refs.as_slice(), row_to_asset)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    fn update_asset(&self, id: i64, update: AssetUpdate) -> Result<bool> {
        let name = update.name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidInput("asset name cannot be empty".into()));
        }
        let changes = self.conn.execute(
            "UPDATE Assets SET Name = ?, Description = ?, CategoryId = ? WHERE Id = ?",
            params![name, update.description.trim(), update.category_id, id],
        )?;
        Ok(changes > 0)
    }

    fn delete_asset(&self, id: i64) -> Result<bool> {
        let changes = self.conn.execute("DELETE FROM Assets WHERE Id = ?", params![id])?;
        Ok(changes > 0)
    }

    fn stats(&self) -> Result<CatalogStats> {
        self.conn
            .query_row(
                "SELECT
                    COUNT(*),
                    COALESCE(SUM(FileSize), 0),
                    COUNT(CASE WHEN CategoryId IS NULL THEN 1 END),
                    (SELECT COUNT(*) FROM Categories),
                    (SELECT COUNT(*) FROM Tags),
                    MIN(DateAdded),
                    MAX(DateAdded)
                 FROM Assets",
                [],
                |row| {
                    Ok(CatalogStats {
                        total_assets: row.get(0)?,
                        total_size: row.get(1)?,
                        uncategorized_assets: row.get(2)?,
                        categories: row.get(3)?,
                        tags: row.get(4)?,
                        oldest_added: row.get(5)?,
                        newest_added: row.get(6)?,
                    })
                },
            )
            .map_err(CatalogError::Storage)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::new_asset;
    use super::*;
    use crate::storage::models::SortColumn;
    use crate::storage::{CategoryRepository, TagRepository};

    fn test_storage() -> SqliteStorage {
        SqliteStorage::in_memory().unwrap()
    }

    fn ids(assets: &[Asset]) -> Vec<i64> {
        assets.iter().map(|a| a.id).collect()
    }

    // --- Schema ---

    #[test]
    fn test_in_memory_creates_tables() {
        let storage = test_storage();
        let count: i64 = storage
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('Assets', 'Categories', 'Tags', 'AssetTags')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let storage = test_storage();
        let enabled: i64 = storage
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_default_categories_seeded() {
        let storage = test_storage();
        let roots: Vec<String> = storage
            .root_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(roots, vec!["Audio", "Models", "Scripts", "Textures"]);

        let textures = storage
            .list_categories()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Textures")
            .unwrap();
        let children: Vec<String> = storage
            .child_categories(textures.id)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(children, vec!["Environment", "UI"]);
    }

    #[test]
    fn test_seed_runs_once() {
        let storage = test_storage();
        assert_eq!(storage.list_categories().unwrap().len(), 10);
        assert_eq!(storage.seed_default_categories().unwrap(), 0);
        assert_eq!(storage.list_categories().unwrap().len(), 10);
    }

    #[test]
    fn test_seed_skipped_when_user_categories_exist() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_CATEGORIES_TABLE).unwrap();
        conn.execute(
            "INSERT INTO Categories (CategoryName, ParentCategoryId) VALUES ('Mine', NULL)",
            [],
        )
        .unwrap();
        let storage = SqliteStorage::new(conn).unwrap();
        let names: Vec<String> = storage
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Mine"]);
    }

    #[test]
    fn test_reopen_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("assets.db");
        {
            let storage = SqliteStorage::open(&db).unwrap();
            storage.insert_asset(new_asset("/art/rock.png")).unwrap();
        }
        let storage = SqliteStorage::open(&db).unwrap();
        assert!(storage.asset_exists("/art/rock.png").unwrap());
        assert_eq!(storage.list_categories().unwrap().len(), 10);
    }

    // --- Insert ---

    #[test]
    fn test_insert_asset() {
        let storage = test_storage();
        let asset = storage
            .insert_asset(new_asset("/art/rock.png"))
            .unwrap()
            .unwrap();
        assert_eq!(asset.name, "rock");
        assert_eq!(asset.file_path, "/art/rock.png");
        assert_eq!(asset.asset_type, "PNG");
        assert_eq!(asset.file_size, 1024);
        assert_eq!(asset.description, "");
        assert!(asset.category_id.is_none());
    }

    #[test]
    fn test_insert_duplicate_path_is_noop() {
        let storage = test_storage();
        let first = storage.insert_asset(new_asset("/art/rock.png")).unwrap();
        assert!(first.is_some());
        let second = storage.insert_asset(new_asset("/art/rock.png")).unwrap();
        assert!(second.is_none());
        let count: i64 = storage
            .conn()
            .query_row("SELECT COUNT(*) FROM Assets", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_insert_with_unknown_category_fails() {
        let storage = test_storage();
        let mut asset = new_asset("/art/rock.png");
        asset.category_id = Some(9999);
        let result = storage.insert_asset(asset);
        assert!(matches!(result, Err(CatalogError::Storage(_))));
    }

    // --- Get / exists ---

    #[test]
    fn test_get_asset_not_found() {
        let storage = test_storage();
        let result = storage.get_asset(999);
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_find_by_path() {
        let storage = test_storage();
        let inserted = storage
            .insert_asset(new_asset("/art/rock.png"))
            .unwrap()
            .unwrap();
        let found = storage.find_asset_by_path("/art/rock.png").unwrap().unwrap();
        assert_eq!(found, inserted);
        assert!(storage.find_asset_by_path("/art/none.png").unwrap().is_none());
    }

    #[test]
    fn test_asset_exists() {
        let storage = test_storage();
        assert!(!storage.asset_exists("/art/rock.png").unwrap());
        storage.insert_asset(new_asset("/art/rock.png")).unwrap();
        assert!(storage.asset_exists("/art/rock.png").unwrap());
    }

    // --- List ---

    #[test]
    fn test_list_empty() {
        let storage = test_storage();
        assert!(storage.list_assets(&AssetFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_list_default_newest_first() {
        let storage = test_storage();
        let a = storage.insert_asset(new_asset("/a.png")).unwrap().unwrap();
        let b = storage.insert_asset(new_asset("/b.png")).unwrap().unwrap();
        let assets = storage.list_assets(&AssetFilter::default()).unwrap();
        assert_eq!(ids(&assets), vec![b.id, a.id]);
    }

    #[test]
    fn test_list_search_name_and_description() {
        let storage = test_storage();
        let rock = storage.insert_asset(new_asset("/Rock_Wall.png")).unwrap().unwrap();
        let tree = storage.insert_asset(new_asset("/tree.png")).unwrap().unwrap();
        storage.insert_asset(new_asset("/sky.png")).unwrap();
        storage
            .update_asset(
                tree.id,
                AssetUpdate {
                    name: "tree".into(),
                    description: "bark near a rock".into(),
                    category_id: None,
                },
            )
            .unwrap();

        let filter = AssetFilter {
            search: Some("rock".into()),
            sort_by: SortColumn::Name,
            descending: false,
            ..Default::default()
        };
        let assets = storage.list_assets(&filter).unwrap();
        assert_eq!(ids(&assets), vec![rock.id, tree.id]);
    }

    #[test]
    fn test_list_search_treats_wildcards_literally() {
        let storage = test_storage();
        let pct = storage.insert_asset(new_asset("/100%.png")).unwrap().unwrap();
        storage.insert_asset(new_asset("/1000.png")).unwrap();
        let filter = AssetFilter {
            search: Some("0%".into()),
            ..Default::default()
        };
        let assets = storage.list_assets(&filter).unwrap();
        assert_eq!(ids(&assets), vec![pct.id]);
    }

    #[test]
    fn test_list_filter_by_category() {
        let storage = test_storage();
        let props = storage.create_category("Crates", None).unwrap();
        let mut filed = new_asset("/crate.fbx");
        filed.category_id = Some(props.id);
        let filed = storage.insert_asset(filed).unwrap().unwrap();
        storage.insert_asset(new_asset("/loose.fbx")).unwrap();

        let filter = AssetFilter {
            category_id: Some(props.id),
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&filter).unwrap()), vec![filed.id]);
    }

    #[test]
    fn test_list_filter_by_type_is_case_insensitive() {
        let storage = test_storage();
        let wav = storage.insert_asset(new_asset("/hit.wav")).unwrap().unwrap();
        storage.insert_asset(new_asset("/hit.png")).unwrap();
        let filter = AssetFilter {
            asset_type: Some("wav".into()),
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&filter).unwrap()), vec![wav.id]);
    }

    #[test]
    fn test_list_tag_filter_all_and_any() {
        let storage = test_storage();
        let a = storage.create_tag("A", None).unwrap();
        let b = storage.create_tag("B", None).unwrap();
        let both = storage.insert_asset(new_asset("/both.png")).unwrap().unwrap();
        let only_a = storage.insert_asset(new_asset("/only_a.png")).unwrap().unwrap();
        let only_b = storage.insert_asset(new_asset("/only_b.png")).unwrap().unwrap();
        storage.insert_asset(new_asset("/none.png")).unwrap();
        storage.set_asset_tags(both.id, &[a.id, b.id]).unwrap();
        storage.set_asset_tags(only_a.id, &[a.id]).unwrap();
        storage.set_asset_tags(only_b.id, &[b.id]).unwrap();

        let all = AssetFilter {
            tag_ids: vec![a.id, b.id],
            tag_match: TagMatch::All,
            sort_by: SortColumn::Name,
            descending: false,
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&all).unwrap()), vec![both.id]);

        let any = AssetFilter {
            tag_match: TagMatch::Any,
            ..all.clone()
        };
        assert_eq!(
            ids(&storage.list_assets(&any).unwrap()),
            vec![both.id, only_a.id, only_b.id]
        );
    }

    #[test]
    fn test_list_tag_filter_all_ignores_repeated_ids() {
        let storage = test_storage();
        let a = storage.create_tag("A", None).unwrap();
        let asset = storage.insert_asset(new_asset("/a.png")).unwrap().unwrap();
        storage.attach_tag(asset.id, a.id).unwrap();
        let filter = AssetFilter {
            tag_ids: vec![a.id, a.id],
            tag_match: TagMatch::All,
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&filter).unwrap()), vec![asset.id]);
    }

    #[test]
    fn test_list_filters_combine() {
        let storage = test_storage();
        let tag = storage.create_tag("Hero", None).unwrap();
        let hit = storage.insert_asset(new_asset("/knight.png")).unwrap().unwrap();
        let miss = storage.insert_asset(new_asset("/knight.wav")).unwrap().unwrap();
        storage.set_asset_tags(hit.id, &[tag.id]).unwrap();
        storage.set_asset_tags(miss.id, &[tag.id]).unwrap();
        let filter = AssetFilter {
            search: Some("knight".into()),
            asset_type: Some("PNG".into()),
            tag_ids: vec![tag.id],
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&filter).unwrap()), vec![hit.id]);
    }

    #[test]
    fn test_list_sort_by_size_ascending() {
        let storage = test_storage();
        let mut big = new_asset("/big.png");
        big.file_size = 9000;
        let mut small = new_asset("/small.png");
        small.file_size = 10;
        let big = storage.insert_asset(big).unwrap().unwrap();
        let small = storage.insert_asset(small).unwrap().unwrap();
        let filter = AssetFilter {
            sort_by: SortColumn::FileSize,
            descending: false,
            ..Default::default()
        };
        assert_eq!(ids(&storage.list_assets(&filter).unwrap()), vec![small.id, big.id]);
    }

    // --- Update ---

    #[test]
    fn test_update_asset_editable_fields_only() {
        let storage = test_storage();
        let category = storage.create_category("Rocks", None).unwrap();
        let asset = storage.insert_asset(new_asset("/rock.png")).unwrap().unwrap();
        let updated = storage
            .update_asset(
                asset.id,
                AssetUpdate {
                    name: "  Boulder ".into(),
                    description: "big grey rock".into(),
                    category_id: Some(category.id),
                },
            )
            .unwrap();
        assert!(updated);
        let fetched = storage.get_asset(asset.id).unwrap();
        assert_eq!(fetched.name, "Boulder");
        assert_eq!(fetched.description, "big grey rock");
        assert_eq!(fetched.category_id, Some(category.id));
        assert_eq!(fetched.file_path, asset.file_path);
        assert_eq!(fetched.file_size, asset.file_size);
        assert_eq!(fetched.date_added, asset.date_added);
    }

    #[test]
    fn test_update_missing_asset() {
        let storage = test_storage();
        let updated = storage
            .update_asset(
                42,
                AssetUpdate {
                    name: "ghost".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn test_update_rejects_empty_name() {
        let storage = test_storage();
        let asset = storage.insert_asset(new_asset("/rock.png")).unwrap().unwrap();
        let result = storage.update_asset(asset.id, AssetUpdate::default());
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    // --- Delete ---

    #[test]
    fn test_delete_asset() {
        let storage = test_storage();
        let asset = storage.insert_asset(new_asset("/rock.png")).unwrap().unwrap();
        assert!(storage.delete_asset(asset.id).unwrap());
        assert!(!storage.delete_asset(asset.id).unwrap());
        assert!(matches!(storage.get_asset(asset.id), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_delete_asset_cascades_tag_links() {
        let storage = test_storage();
        let tag = storage.create_tag("Stone", None).unwrap();
        let asset = storage.insert_asset(new_asset("/rock.png")).unwrap().unwrap();
        storage.attach_tag(asset.id, tag.id).unwrap();
        storage.delete_asset(asset.id).unwrap();
        let links: i64 = storage
            .conn()
            .query_row("SELECT COUNT(*) FROM AssetTags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(links, 0);
        assert!(storage.get_tag(tag.id).is_ok());
    }

    // --- Stats ---

    #[test]
    fn test_stats_empty() {
        let storage = test_storage();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_assets, 0);
        assert_eq!(stats.total_size, 0);
        assert_eq!(stats.categories, 10);
        assert_eq!(stats.tags, 0);
        assert!(stats.oldest_added.is_none());
        assert!(stats.newest_added.is_none());
    }

    #[test]
    fn test_stats_counts() {
        let storage = test_storage();
        let category = storage.create_category("Rocks", None).unwrap();
        let mut filed = new_asset("/rock.png");
        filed.category_id = Some(category.id);
        storage.insert_asset(filed).unwrap();
        storage.insert_asset(new_asset("/sky.png")).unwrap();
        storage.create_tag("Nature", None).unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_assets, 2);
        assert_eq!(stats.total_size, 2048);
        assert_eq!(stats.uncategorized_assets, 1);
        assert_eq!(stats.categories, 11);
        assert_eq!(stats.tags, 1);
        assert!(stats.oldest_added.is_some());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
