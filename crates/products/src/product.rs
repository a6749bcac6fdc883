use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};

use catalog_core::{DataValidationError, Entity, ProductId, ValidationResult};

use crate::price::parse_price;

/// Column limits of the `product` table.
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 250;
pub const PRICE_SCALE: u32 = 2;
/// Exclusive bound on `|price|` (ten digits, two after the point).
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Product category (closed set).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Member name, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DataValidationError;

    /// Names are matched exactly (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DataValidationError::InvalidCategory(s.to_string()))
    }
}

/// A catalog product.
///
/// `id` is `None` until the storage layer assigns one on create. The other
/// fields are plain data; persistence lives in the infra crate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

impl Product {
    /// Build a transient product (no id yet).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// The id an update or delete should target.
    ///
    /// A missing id on update is a caller bug, not a not-found condition.
    pub fn require_id(&self) -> ValidationResult<ProductId> {
        self.id.ok_or(DataValidationError::MissingId)
    }

    /// Field checks run before anything is written to storage.
    ///
    /// Mirrors the table's column limits so every backend accepts and
    /// returns the same values.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(DataValidationError::EmptyName);
        }
        if self.name.chars().count() > MAX_NAME_CHARS {
            return Err(DataValidationError::too_long("name", MAX_NAME_CHARS));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(DataValidationError::too_long("description", MAX_DESCRIPTION_CHARS));
        }
        // Trailing zeros are harmless: 12.500 is stored as 12.50 and compares equal.
        if self.price.normalize().scale() > PRICE_SCALE || self.price.abs() >= PRICE_LIMIT {
            return Err(DataValidationError::PriceOutOfRange(self.price.to_string()));
        }
        Ok(())
    }

    /// Flat mapping of field name to value.
    ///
    /// `price` is rendered as a string so it converts back to a decimal
    /// without loss; `category` is rendered as its member name.
    pub fn serialize(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id));
        map.insert("name".into(), json!(self.name));
        map.insert("description".into(), json!(self.description));
        map.insert("price".into(), json!(self.price.to_string()));
        map.insert("available".into(), json!(self.available));
        map.insert("category".into(), json!(self.category));
        map
    }

    /// Populate the business fields from a mapping.
    ///
    /// `id` is left untouched. The result must pass [`Product::validate`];
    /// on error nothing is modified.
    pub fn deserialize(&mut self, data: &JsonValue) -> Result<&mut Self, DataValidationError> {
        let map = data.as_object().ok_or(DataValidationError::BadData)?;

        let name = required_str(map, "name")?;
        let description = required_str(map, "description")?;
        let price = match required(map, "price")? {
            JsonValue::String(raw) => parse_price(raw)?,
            JsonValue::Number(n) => parse_price(&n.to_string())?,
            other => return Err(DataValidationError::invalid_price(other.to_string())),
        };
        let available = match required(map, "available")? {
            JsonValue::Bool(flag) => *flag,
            other => return Err(DataValidationError::InvalidBoolean(json_type(other).into())),
        };
        let category_name = required_str(map, "category")?;
        let category = Category::deserialize(&map["category"])
            .map_err(|_| DataValidationError::InvalidCategory(category_name.to_string()))?;

        let candidate = Product {
            id: self.id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            available,
            category,
        };
        candidate.validate()?;

        *self = candidate;
        Ok(self)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

fn required<'a>(map: &'a Map<String, JsonValue>, key: &str) -> Result<&'a JsonValue, DataValidationError> {
    map.get(key).ok_or_else(|| DataValidationError::missing(key))
}

fn required_str<'a>(map: &'a Map<String, JsonValue>, key: &str) -> Result<&'a str, DataValidationError> {
    let value = required(map, key)?;
    value
        .as_str()
        .ok_or_else(|| DataValidationError::invalid_type(key, json_type(value)))
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
