use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A salesperson. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(deserialize_with = "deserialize_key")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// The name shown in reports: `"<first_name> <last_name>"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A catalogue entry, identified by its SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_key")]
    pub sku: String,
    /// What the shop paid per unit. Profit is measured against this.
    pub purchase_price: Decimal,
}

/// One receipt: everything a single seller sold in a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(deserialize_with = "deserialize_key")]
    pub seller_id: String,
    /// The receipt total as recorded at the till. Taken verbatim, it is not
    /// recomputed from the items.
    pub total_amount: Decimal,
    pub items: Vec<PurchaseItem>,
}

/// A single line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(deserialize_with = "deserialize_key")]
    pub sku: String,
    pub sale_price: Decimal,
    /// Units sold. Weighed goods carry fractions (`1.5` kg).
    pub quantity: Decimal,
    /// Discount in percent, nominally 0-100. Not clamped.
    pub discount: Decimal,
}

/// Seller ids and SKUs show up both as strings ("seller_1", "SKU_001") and as
/// bare numbers (1, 1001) depending on the exporting system. Both are
/// normalized to a string, so `1001` and `"1001"` name the same product.
fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Integer(i64),
    }

    Ok(match RawKey::deserialize(deserializer)? {
        RawKey::Text(s) => s,
        RawKey::Integer(n) => n.to_string(),
    })
}
