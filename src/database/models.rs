use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Registered account. The password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Product row as stored and served. Field names are the wire names, so the
/// struct serializes straight into the public JSON shape.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub nazwa: String,
    pub cena: f64,
    pub kategoria: String,
    pub ilosc: i64,
    pub producent: Option<String>,
    pub data_dodania: Option<NaiveDate>,
}

/// Fields for a freshly created product, already validated and parsed.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub nazwa: String,
    pub cena: f64,
    pub kategoria: String,
    pub ilosc: i64,
    pub producent: Option<String>,
    pub data_dodania: Option<NaiveDate>,
}

/// Validated subset of product fields from a partial update. An outer `None`
/// keeps the stored value; for the nullable columns the inner `Option`
/// distinguishes clearing from setting.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub nazwa: Option<String>,
    pub cena: Option<f64>,
    pub kategoria: Option<String>,
    pub ilosc: Option<i64>,
    pub producent: Option<Option<String>>,
    pub data_dodania: Option<Option<NaiveDate>>,
}

impl ProductPatch {
    /// Merge the patch over an existing row, field by field.
    pub fn apply(self, mut product: Product) -> Product {
        if let Some(nazwa) = self.nazwa {
            product.nazwa = nazwa;
        }
        if let Some(cena) = self.cena {
            product.cena = cena;
        }
        if let Some(kategoria) = self.kategoria {
            product.kategoria = kategoria;
        }
        if let Some(ilosc) = self.ilosc {
            product.ilosc = ilosc;
        }
        if let Some(producent) = self.producent {
            product.producent = producent;
        }
        if let Some(data_dodania) = self.data_dodania {
            product.data_dodania = data_dodania;
        }
        product
    }
}
