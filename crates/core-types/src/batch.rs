use crate::error::CoreError;
use crate::structs::{Product, PurchaseRecord, Seller};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything needed for one report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesBatch {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesBatch {
    pub fn new(
        sellers: Vec<Seller>,
        products: Vec<Product>,
        purchase_records: Vec<PurchaseRecord>,
    ) -> Self {
        Self {
            sellers,
            products,
            purchase_records,
        }
    }

    /// Parses a batch from JSON text. See [`SalesBatch::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CoreError::invalid("batch", e.to_string()))?;
        Self::from_value(value)
    }

    /// Builds a batch from an already parsed JSON document.
    ///
    /// The document must be an object exposing `sellers`, `products` and
    /// `purchase_records`, each of them an array. A missing key, a `null`
    /// or any non-array value is reported against the offending field.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(CoreError::invalid(
                    "batch",
                    format!("expected an object, found {}", kind_of(&other)),
                ));
            }
        };

        let sellers = take_array(&mut root, "sellers")?;
        let products = take_array(&mut root, "products")?;
        let purchase_records = take_array(&mut root, "purchase_records")?;

        Ok(Self::new(sellers, products, purchase_records))
    }
}

fn take_array<T: DeserializeOwned>(
    root: &mut Map<String, Value>,
    field: &str,
) -> Result<Vec<T>, CoreError> {
    match root.remove(field) {
        Some(value @ Value::Array(_)) => {
            serde_json::from_value(value).map_err(|e| CoreError::invalid(field, e.to_string()))
        }
        Some(other) => Err(CoreError::invalid(
            field,
            format!("expected an array, found {}", kind_of(&other)),
        )),
        None => Err(CoreError::invalid(field, "missing")),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
