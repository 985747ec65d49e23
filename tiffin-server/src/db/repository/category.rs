//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Find category by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            image: data.image,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                new_name
            )));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
        }

        let update_data = CategoryUpdateDb {
            name: data.name,
            description: data.description,
            image: data.image,
            sort_order: data.sort_order,
            is_active: data.is_active,
        };

        let pure_id = strip_table_prefix(TABLE, id);
        let rec = surrealdb::RecordId::from_table_key(TABLE, pure_id);

        // Update using raw query to avoid clobbering absent fields
        self.base
            .db()
            .query("UPDATE $rec MERGE $data")
            .bind(("rec", rec))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let rec = surrealdb::RecordId::from_table_key(TABLE, pure_id);

        // Check if the category still has menu items
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM menu_item WHERE category = $cat AND is_available = true GROUP ALL",
            )
            .bind(("cat", rec.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "Cannot delete category with active menu items".to_string(),
            ));
        }

        self.base
            .db()
            .query("DELETE $rec")
            .bind(("rec", rec))
            .await?;

        Ok(true)
    }
}
