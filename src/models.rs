use serde_json::{json, Map, Value};
use sqlx::FromRow;

use crate::error::DataValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[repr(i32)]
pub enum RecommendationType {
    #[default]
    Generic = 0,
    BoughtTogether = 1,
    CrossSell = 2,
    UpSell = 3,
    Complementary = 4,
}

impl RecommendationType {
    pub fn to_str(&self) -> &str {
        match self {
            RecommendationType::Generic => "Generic",
            RecommendationType::BoughtTogether => "BoughtTogether",
            RecommendationType::CrossSell => "CrossSell",
            RecommendationType::UpSell => "UpSell",
            RecommendationType::Complementary => "Complementary",
        }
    }

    pub fn from_name(name: &str) -> Option<RecommendationType> {
        match name {
            "Generic" => Some(RecommendationType::Generic),
            "BoughtTogether" => Some(RecommendationType::BoughtTogether),
            "CrossSell" => Some(RecommendationType::CrossSell),
            "UpSell" => Some(RecommendationType::UpSell),
            "Complementary" => Some(RecommendationType::Complementary),
            _ => None,
        }
    }
}

/// A directed link from a query product to a recommended product. `id` is
/// `None` until the store assigns a key; `type` is stored as its integer
/// code and rendered on the wire as its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct Recommendation {
    pub id: Option<i64>,
    pub product_id: i64,
    pub rec_product_id: i64,
    #[sqlx(rename = "type")]
    pub rec_type: RecommendationType,
    pub interested: i64,
}

fn required_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value, DataValidationError> {
    map.get(key).ok_or_else(|| {
        DataValidationError(format!("Invalid Recommendation: missing {}", key))
    })
}

fn as_integer(key: &str, value: &Value) -> Result<i64, DataValidationError> {
    value.as_i64().ok_or_else(|| {
        DataValidationError(format!(
            "Invalid Recommendation: {} must be an integer, got {}",
            key, value
        ))
    })
}

impl Recommendation {
    /// Serializes a Recommendation into a JSON object.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "product_id": self.product_id,
            "rec_product_id": self.rec_product_id,
            "type": self.rec_type.to_str(),
            "interested": self.interested,
        })
    }

    /// Deserializes a Recommendation from parsed JSON, rejecting anything
    /// that is not an object, is missing a required key, carries a
    /// non-integer id field, or names an unknown type. The `id` key is
    /// never consumed; `interested` is left as-is when absent.
    pub fn deserialize(&mut self, data: &Value) -> Result<&mut Self, DataValidationError> {
        let map = data.as_object().ok_or_else(|| {
            DataValidationError(
                "Invalid Recommendation: body of request contained bad or no data".to_string(),
            )
        })?;

        self.product_id = as_integer("product_id", required_field(map, "product_id")?)?;
        self.rec_product_id =
            as_integer("rec_product_id", required_field(map, "rec_product_id")?)?;

        let type_value = required_field(map, "type")?;
        let type_name = match type_value.as_str() {
            Some(name) => name.to_string(),
            None => type_value.to_string(),
        };
        self.rec_type = RecommendationType::from_name(&type_name).ok_or_else(|| {
            DataValidationError(format!("Invalid Recommendation Type: {}", type_name))
        })?;

        if let Some(value) = map.get("interested") {
            self.interested = as_integer("interested", value)?;
        }

        Ok(self)
    }
}
