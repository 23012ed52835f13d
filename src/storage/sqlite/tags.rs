use std::collections::BTreeSet;

use rusqlite::{Row, params};
use tracing::debug;

use super::SqliteStorage;
use crate::errors::{CatalogError, Result};
use crate::storage::TagRepository;
use crate::storage::models::{DEFAULT_TAG_COLOR, Tag};

const TAG_SELECT: &str = "SELECT Id, TagName, Color FROM Tags";

fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    let color: Option<String> = row.get(2)?;
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
    })
}

fn tag_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidInput("tag name cannot be empty".into()));
    }
    Ok(name)
}

/// Accepts `#rgb` or `#rrggbb` and returns it lower-cased.
pub fn normalize_color(color: &str) -> Result<String> {
    let color = color.trim();
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(CatalogError::InvalidInput(format!(
            "'{}' is not a hex colour like #3498db",
            color
        )));
    }
    Ok(color.to_ascii_lowercase())
}

impl SqliteStorage {
    fn name_taken(&self, name: &str, except_id: Option<i64>) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM Tags WHERE TagName = ? COLLATE NOCASE AND Id IS NOT ?",
            params![name, except_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl TagRepository for SqliteStorage {
    fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag> {
        let name = tag_name(name)?;
        let color = normalize_color(color.unwrap_or(DEFAULT_TAG_COLOR))?;
        if self.name_taken(name, None)? {
            return Err(CatalogError::DuplicateTag(name.to_string()));
        }
        self.conn.execute(
            "INSERT INTO Tags (TagName, Color) VALUES (?, ?)",
            params![name, color],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_tag(id)
    }

    fn get_tag(&self, id: i64) -> Result<Tag> {
        let sql = format!("{} WHERE Id = ?", TAG_SELECT);
        self.conn
            .query_row(&sql, params![id], row_to_tag)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    CatalogError::NotFound(format!("Tag with id {} not found", id))
                }
                other => CatalogError::Storage(other),
            })
    }

    fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let sql = format!("{} WHERE TagName = ? COLLATE NOCASE", TAG_SELECT);
        match self.conn.query_row(&sql, params![name.trim()], row_to_tag) {
            Ok(tag) => Ok(Some(tag)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Storage(e)),
        }
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        self.name_taken(name.trim(), None)
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let sql = format!("{} ORDER BY TagName COLLATE NOCASE", TAG_SELECT);
        let mut stmt = self.conn.prepare(&sql)?;
        let tags = stmt
            .query_map([], row_to_tag)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    fn update_tag(&self, id: i64, name: &str, color: Option<&str>) -> Result<bool> {
        let name = tag_name(name)?;
        let color = color.map(normalize_color).transpose()?;
        if self.name_taken(name, Some(id))? {
            return Err(CatalogError::DuplicateTag(name.to_string()));
        }
        let changes = self.conn.execute(
            "UPDATE Tags SET TagName = ?, Color = COALESCE(?, Color) WHERE Id = ?",
            params![name, color, id],
        )?;
        Ok(changes > 0)
    }

    fn delete_tag(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let unlinked = tx.execute("DELETE FROM AssetTags WHERE TagId = ?", params![id])?;
        let deleted = tx.execute("DELETE FROM Tags WHERE Id = ?", params![id])?;
        tx.commit()?;
        if deleted > 0 {
            debug!(id, unlinked, "deleted tag");
        }
        Ok(deleted > 0)
    }

    fn tags_for_asset(&self, asset_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.Id, t.TagName, t.Color
             FROM Tags t
             INNER JOIN AssetTags j ON j.TagId = t.Id
             WHERE j.AssetId = ?
             ORDER BY t.TagName COLLATE NOCASE",
        )?;
        let tags = stmt
            .query_map(params![asset_id], row_to_tag)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    fn tag_ids_for_asset(&self, asset_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT TagId FROM AssetTags WHERE AssetId = ? ORDER BY TagId")?;
        let ids = stmt
            .query_map(params![asset_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn attach_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool> {
        let changes = self.conn.execute(
            "INSERT OR IGNORE INTO AssetTags (AssetId, TagId) VALUES (?, ?)",
            params![asset_id, tag_id],
        )?;
        Ok(changes > 0)
    }

    fn detach_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool> {
        let changes = self.conn.execute(
            "DELETE FROM AssetTags WHERE AssetId = ? AND TagId = ?",
            params![asset_id, tag_id],
        )?;
        Ok(changes > 0)
    }

    fn asset_has_tag(&self, asset_id: i64, tag_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM AssetTags WHERE AssetId = ? AND TagId = ?",
            params![asset_id, tag_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn set_asset_tags(&self, asset_id: i64, tag_ids: &[i64]) -> Result<usize> {
        let wanted: BTreeSet<i64> = tag_ids.iter().copied().collect();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM AssetTags WHERE AssetId = ?", params![asset_id])?;
        {
            let mut stmt = tx.prepare("INSERT INTO AssetTags (AssetId, TagId) VALUES (?, ?)")?;
            for tag_id in &wanted {
                stmt.execute(params![asset_id, tag_id])?;
            }
        }
        tx.commit()?;
        Ok(wanted.len())
    }
}
