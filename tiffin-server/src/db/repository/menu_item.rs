//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu items belonging to a category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<MenuItem>> {
        let pure_id = strip_table_prefix("category", category_id);
        let cat = RecordId::from_table_key("category", pure_id);
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE category = $cat ORDER BY sort_order")
            .bind(("cat", cat))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<MenuItem> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation("Price must not be negative".to_string()));
        }

        let cat_id = strip_table_prefix("category", &data.category_id);
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            image: data.image,
            category: RecordId::from_table_key("category", cat_id),
            is_veg: data.is_veg.unwrap_or(false),
            is_available: data.is_available.unwrap_or(true),
            sort_order: data.sort_order.unwrap_or(0),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation("Price must not be negative".to_string()));
        }

        #[derive(Serialize)]
        struct MenuItemUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_veg: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_available: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
        }

        let update_data = MenuItemUpdateDb {
            name: data.name,
            description: data.description,
            price: data.price,
            image: data.image,
            category: data
                .category_id
                .map(|c| RecordId::from_table_key("category", strip_table_prefix("category", &c))),
            is_veg: data.is_veg,
            is_available: data.is_available,
            sort_order: data.sort_order,
        };

        let pure_id = strip_table_prefix(TABLE, id);
        let rec = RecordId::from_table_key(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $rec MERGE $data")
            .bind(("rec", rec))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<MenuItem> = self.base.db().delete((TABLE, pure_id)).await?;
        Ok(deleted.is_some())
    }
}
