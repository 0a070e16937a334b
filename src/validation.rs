//! Field validation for product and registration payloads.
//!
//! Numeric fields arrive as raw JSON values so that malformed input turns
//! into field errors instead of a deserialization failure. Validation
//! accumulates every violated rule in field-declaration order; it never
//! short-circuits at the first failure.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::database::models::{NewProduct, ProductPatch};
use crate::error::FieldError;

pub const REQUIRED: &str = "REQUIRED";
pub const INVALID_LENGTH: &str = "INVALID_LENGTH";
pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
pub const INVALID_VALUE: &str = "INVALID_VALUE";

const MSG_REQUIRED: &str = "Pole jest wymagane";
const MSG_LENGTH_3_50: &str = "Długość musi wynosić od 3 do 50 znaków";

/// Product fields as submitted by the client, in the wire shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    pub nazwa: Option<String>,
    pub cena: Option<Value>,
    pub kategoria: Option<String>,
    pub ilosc: Option<Value>,
    #[serde(default, deserialize_with = "double_option")]
    pub producent: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub data_dodania: Option<Option<String>>,
}

/// Registration and login payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationPayload {
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Checked credentials with the login already trimmed.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

// Keeps "field: null" distinguishable from an absent field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Validate a full create payload and parse it into a [`NewProduct`].
pub fn validate_new_product(payload: &ProductPayload) -> Result<NewProduct, Vec<FieldError>> {
    let mut errors = Vec::new();
    let today = Local::now().date_naive();

    let nazwa = check_nazwa(payload.nazwa.as_deref(), true, &mut errors);
    let cena = check_cena(payload.cena.as_ref(), true, &mut errors);
    let ilosc = check_ilosc(payload.ilosc.as_ref(), true, &mut errors);
    let data_dodania = check_data_dodania(&payload.data_dodania, today, &mut errors);
    let kategoria = check_kategoria(payload.kategoria.as_deref(), true, &mut errors);

    match (nazwa, cena, ilosc, kategoria) {
        (Some(nazwa), Some(cena), Some(ilosc), Some(kategoria)) if errors.is_empty() => {
            Ok(NewProduct {
                nazwa,
                cena,
                kategoria,
                ilosc,
                producent: payload.producent.clone().flatten(),
                data_dodania: data_dodania.flatten(),
            })
        }
        _ => Err(errors),
    }
}

/// Validate only the fields present in a partial update payload.
pub fn validate_product_patch(payload: &ProductPayload) -> Result<ProductPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let today = Local::now().date_naive();

    let nazwa = check_nazwa(payload.nazwa.as_deref(), false, &mut errors);
    let cena = check_cena(payload.cena.as_ref(), false, &mut errors);
    let ilosc = check_ilosc(payload.ilosc.as_ref(), false, &mut errors);
    let data_dodania = check_data_dodania(&payload.data_dodania, today, &mut errors);
    let kategoria = check_kategoria(payload.kategoria.as_deref(), false, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductPatch {
        nazwa,
        cena,
        kategoria,
        ilosc,
        producent: payload.producent.clone(),
        data_dodania,
    })
}

/// Validate a registration payload: login 3-50 chars after trim, password
/// at least 6 chars.
pub fn validate_registration(payload: &RegistrationPayload) -> Result<Credentials, Vec<FieldError>> {
    let mut errors = Vec::new();

    let login = match payload.login.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("login", MSG_REQUIRED, REQUIRED));
            None
        }
        Some(login) if !(3..=50).contains(&login.chars().count()) => {
            errors.push(FieldError::new("login", MSG_LENGTH_3_50, INVALID_LENGTH));
            None
        }
        Some(login) => Some(login.to_string()),
    };

    let password = match payload.password.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("password", MSG_REQUIRED, REQUIRED));
            None
        }
        Some(password) if password.chars().count() < 6 => {
            errors.push(FieldError::new(
                "password",
                "Hasło musi mieć co najmniej 6 znaków",
                INVALID_LENGTH,
            ));
            None
        }
        Some(password) => Some(password.to_string()),
    };

    match (login, password) {
        (Some(login), Some(password)) if errors.is_empty() => Ok(Credentials { login, password }),
        _ => Err(errors),
    }
}

/// Presence-only check used by the login endpoint.
pub fn require_credentials(payload: &RegistrationPayload) -> Result<Credentials, Vec<FieldError>> {
    let mut errors = Vec::new();

    let login = match payload.login.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("login", MSG_REQUIRED, REQUIRED));
            None
        }
        Some(login) => Some(login.to_string()),
    };

    let password = match payload.password.as_deref() {
        None | Some("") => {
            errors.push(FieldError::new("password", MSG_REQUIRED, REQUIRED));
            None
        }
        Some(password) => Some(password.to_string()),
    };

    match (login, password) {
        (Some(login), Some(password)) if errors.is_empty() => Ok(Credentials { login, password }),
        _ => Err(errors),
    }
}

fn check_nazwa(
    value: Option<&str>,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let Some(raw) = value else {
        if required {
            errors.push(FieldError::new("nazwa", MSG_REQUIRED, REQUIRED));
        }
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("nazwa", MSG_REQUIRED, REQUIRED));
        return None;
    }
    if !(3..=50).contains(&trimmed.chars().count()) {
        errors.push(FieldError::new("nazwa", MSG_LENGTH_3_50, INVALID_LENGTH));
        return None;
    }

    Some(trimmed.to_string())
}

fn check_cena(value: Option<&Value>, required: bool, errors: &mut Vec<FieldError>) -> Option<f64> {
    let Some(raw) = value else {
        if required {
            errors.push(FieldError::new("cena", MSG_REQUIRED, REQUIRED));
        }
        return None;
    };

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(cena) = parsed.filter(|c| c.is_finite()) else {
        errors.push(FieldError::new(
            "cena",
            "Wartość musi być liczbą",
            INVALID_FORMAT,
        ));
        return None;
    };
    if cena <= 0.0 {
        errors.push(FieldError::new(
            "cena",
            "Cena musi być większa od zera",
            INVALID_VALUE,
        ));
        return None;
    }

    Some(cena)
}

fn check_ilosc(value: Option<&Value>, required: bool, errors: &mut Vec<FieldError>) -> Option<i64> {
    let Some(raw) = value else {
        if required {
            errors.push(FieldError::new("ilosc", MSG_REQUIRED, REQUIRED));
        }
        return None;
    };

    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(ilosc) = parsed else {
        errors.push(FieldError::new(
            "ilosc",
            "Wartość musi być liczbą całkowitą",
            INVALID_FORMAT,
        ));
        return None;
    };
    if ilosc < 0 {
        errors.push(FieldError::new(
            "ilosc",
            "Ilość nie może być ujemna",
            INVALID_VALUE,
        ));
        return None;
    }

    Some(ilosc)
}

// Null and empty-string dates count as absent; both clear the stored value
// on update.
fn check_data_dodania(
    value: &Option<Option<String>>,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) -> Option<Option<NaiveDate>> {
    let raw = match value {
        None => return None,
        Some(None) => return Some(None),
        Some(Some(raw)) if raw.trim().is_empty() => return Some(None),
        Some(Some(raw)) => raw.trim(),
    };

    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        errors.push(FieldError::new(
            "data_dodania",
            "Data musi mieć format RRRR-MM-DD",
            INVALID_FORMAT,
        ));
        return None;
    };
    if date > today {
        errors.push(FieldError::new(
            "data_dodania",
            "Data nie może być z przyszłości",
            INVALID_VALUE,
        ));
        return None;
    }

    Some(Some(date))
}

// Presence only; length and format are deliberately unchecked for kategoria.
fn check_kategoria(
    value: Option<&str>,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.map(str::trim) {
        None => {
            if required {
                errors.push(FieldError::new("kategoria", MSG_REQUIRED, REQUIRED));
            }
            None
        }
        Some("") => {
            errors.push(FieldError::new("kategoria", MSG_REQUIRED, REQUIRED));
            None
        }
        Some(_) => value.map(|v| v.trim().to_string()),
    }
}
