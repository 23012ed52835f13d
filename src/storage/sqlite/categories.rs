use std::collections::{HashMap, HashSet};

use rusqlite::{Row, params};
use tracing::debug;

use super::SqliteStorage;
use crate::errors::{CatalogError, Result};
use crate::storage::CategoryRepository;
use crate::storage::models::{Category, CategoryNode};

const CATEGORY_SELECT: &str = "SELECT Id, CategoryName, ParentCategoryId FROM Categories";

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: row.get(2)?,
    })
}

fn category_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidInput("category name cannot be empty".into()));
    }
    Ok(name)
}

/// Rebuilds the tree from flat rows. Rows pointing at a missing parent are
/// treated as roots; sibling order follows the input order.
pub fn build_tree(categories: Vec<Category>, counts: &HashMap<i64, i64>) -> Vec<CategoryNode> {
    let known: HashSet<i64> = categories.iter().map(|c| c.id).collect();
    let mut by_parent: HashMap<Option<i64>, Vec<Category>> = HashMap::new();
    for category in categories {
        let parent = category
            .parent_id
            .filter(|p| *p != category.id && known.contains(p));
        by_parent.entry(parent).or_default().push(category);
    }
    attach_children(None, &mut by_parent, counts)
}

fn attach_children(
    parent: Option<i64>,
    by_parent: &mut HashMap<Option<i64>, Vec<Category>>,
    counts: &HashMap<i64, i64>,
) -> Vec<CategoryNode> {
    let siblings = by_parent.remove(&parent).unwrap_or_default();
    siblings
        .into_iter()
        .map(|category| {
            let children = attach_children(Some(category.id), by_parent, counts);
            CategoryNode {
                asset_count: counts.get(&category.id).copied().unwrap_or(0),
                category,
                children,
            }
        })
        .collect()
}

impl SqliteStorage {
    fn query_categories(&self, sql: &str, param: Option<i64>) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match param {
            Some(p) => stmt.query_map(params![p], row_to_category)?,
            None => stmt.query_map([], row_to_category)?,
        };
        let categories = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }
}

impl CategoryRepository for SqliteStorage {
    fn create_category(&self, name: &str, parent_id: Option<i64>) -> Result<Category> {
        let name = category_name(name)?;
        if let Some(parent) = parent_id {
            self.get_category(parent)?;
        }
        self.conn.execute(
            "INSERT INTO Categories (CategoryName, ParentCategoryId) VALUES (?, ?)",
            params![name, parent_id],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_category(id)
    }

    fn get_category(&self, id: i64) -> Result<Category> {
        let sql = format!("{} WHERE Id = ?", CATEGORY_SELECT);
        self.conn
            .query_row(&sql, params![id], row_to_category)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    CatalogError::NotFound(format!("Category with id {} not found", id))
                }
                other => CatalogError::Storage(other),
            })
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let sql = format!("{} ORDER BY CategoryName COLLATE NOCASE, Id", CATEGORY_SELECT);
        self.query_categories(&sql, None)
    }

    fn root_categories(&self) -> Result<Vec<Category>> {
        let sql = format!(
            "{} WHERE ParentCategoryId IS NULL ORDER BY CategoryName COLLATE NOCASE, Id",
            CATEGORY_SELECT
        );
        self.query_categories(&sql, None)
    }

    fn child_categories(&self, parent_id: i64) -> Result<Vec<Category>> {
        let sql = format!(
            "{} WHERE ParentCategoryId = ? ORDER BY CategoryName COLLATE NOCASE, Id",
            CATEGORY_SELECT
        );
        self.query_categories(&sql, Some(parent_id))
    }

    fn rename_category(&self, id: i64, name: &str) -> Result<bool> {
        let name = category_name(name)?;
        let changes = self.conn.execute(
            "UPDATE Categories SET CategoryName = ? WHERE Id = ?",
            params![name, id],
        )?;
        Ok(changes > 0)
    }

    fn delete_category(&self, id: i64, move_assets_to: Option<i64>) -> Result<bool> {
        if move_assets_to == Some(id) {
            return Err(CatalogError::InvalidInput(format!(
                "cannot move assets into category {} while deleting it",
                id
            )));
        }

        // Dropping the transaction on an early return rolls it back.
        let tx = self.conn.unchecked_transaction()?;
        let moved_assets = tx.execute(
            "UPDATE Assets SET CategoryId = ? WHERE CategoryId = ?",
            params![move_assets_to, id],
        )?;
        let reparented = tx.execute(
            "UPDATE Categories
             SET ParentCategoryId = (SELECT ParentCategoryId FROM Categories WHERE Id = ?1)
             WHERE ParentCategoryId = ?1",
            params![id],
        )?;
        let deleted = tx.execute("DELETE FROM Categories WHERE Id = ?", params![id])?;
        if deleted == 0 {
            tx.rollback()?;
            return Ok(false);
        }
        tx.commit()?;

        debug!(id, moved_assets, reparented, "deleted category");
        Ok(true)
    }

    fn asset_counts(&self) -> Result<HashMap<i64, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT CategoryId, COUNT(*) FROM Assets
             WHERE CategoryId IS NOT NULL
             GROUP BY CategoryId",
        )?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<HashMap<i64, i64>, _>>()?;
        Ok(counts)
    }

    fn category_tree(&self) -> Result<Vec<CategoryNode>> {
        let categories = self.list_categories()?;
        let counts = self.asset_counts()?;
        Ok(build_tree(categories, &counts))
    }
}
