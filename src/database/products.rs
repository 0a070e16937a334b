use sqlx::SqlitePool;

use super::models::{NewProduct, Product};
use super::DatabaseError;

/// Persistence for product records. Names are unique; comparison is exact,
/// case-sensitive string equality.
#[derive(Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All rows in store-native order; no explicit sort is guaranteed.
    pub async fn list_all(&self) -> Result<Vec<Product>, DatabaseError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM produkty")
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM produkty WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    pub async fn find_by_name(&self, nazwa: &str) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM produkty WHERE nazwa = ?")
            .bind(nazwa)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    pub async fn create(&self, new: NewProduct) -> Result<Product, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO produkty (nazwa, cena, kategoria, ilosc, producent, data_dodania)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.nazwa)
        .bind(new.cena)
        .bind(&new.kategoria)
        .bind(new.ilosc)
        .bind(&new.producent)
        .bind(new.data_dodania)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            nazwa: new.nazwa,
            cena: new.cena,
            kategoria: new.kategoria,
            ilosc: new.ilosc,
            producent: new.producent,
            data_dodania: new.data_dodania,
        })
    }

    /// Persist a fully merged row.
    pub async fn update(&self, product: &Product) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE produkty
             SET nazwa = ?, cena = ?, kategoria = ?, ilosc = ?, producent = ?, data_dodania = ?
             WHERE id = ?",
        )
        .bind(&product.nazwa)
        .bind(product.cena)
        .bind(&product.kategoria)
        .bind(product.ilosc)
        .bind(&product.producent)
        .bind(product.data_dodania)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a row; returns whether anything was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM produkty WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_schema;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> ProductStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        init_schema(&pool).await.expect("schema");
        ProductStore::new(pool)
    }

    fn sample() -> NewProduct {
        NewProduct {
            nazwa: "Młotek".to_string(),
            cena: 49.99,
            kategoria: "Narzędzia".to_string(),
            ilosc: 12,
            producent: Some("Stanley".to_string()),
            data_dodania: NaiveDate::from_ymd_opt(2024, 3, 1),
        }
    }

    #[tokio::test]
    async fn create_then_list_returns_all_fields() {
        let products = store().await;
        let created = products.create(sample()).await.expect("create");

        let listed = products.list_all().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].nazwa, "Młotek");
        assert_eq!(listed[0].cena, 49.99);
        assert_eq!(listed[0].kategoria, "Narzędzia");
        assert_eq!(listed[0].ilosc, 12);
        assert_eq!(listed[0].producent.as_deref(), Some("Stanley"));
        assert_eq!(listed[0].data_dodania, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[tokio::test]
    async fn duplicate_name_hits_unique_constraint() {
        let products = store().await;
        products.create(sample()).await.expect("first create");

        let err = products
            .create(sample())
            .await
            .expect_err("duplicate insert must fail");
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));

        assert_eq!(products.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn update_persists_merged_row() {
        let products = store().await;
        let mut created = products.create(sample()).await.expect("create");

        created.cena = 39.99;
        created.producent = None;
        products.update(&created).await.expect("update");

        let reloaded = products
            .find_by_id(created.id)
            .await
            .expect("query")
            .expect("row exists");
        assert_eq!(reloaded.cena, 39.99);
        assert_eq!(reloaded.producent, None);
        assert_eq!(reloaded.nazwa, "Młotek");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let products = store().await;
        let created = products.create(sample()).await.expect("create");

        assert!(products.delete(created.id).await.expect("first delete"));
        assert!(!products.delete(created.id).await.expect("second delete"));
        assert!(products.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let products = store().await;
        products.create(sample()).await.expect("create");

        assert!(products
            .find_by_name("Młotek")
            .await
            .expect("query")
            .is_some());
        assert!(products
            .find_by_name("młotek")
            .await
            .expect("query")
            .is_none());
    }
}
