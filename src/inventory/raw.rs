//! Raw inventory payload
//!
//! The dashboard's inventory JSON is loosely typed: entries are bare
//! strings or partial objects, buckets may be missing or null, and the
//! whole payload may sit inside an `inventory` envelope. Deserialization
//! here never fails on shape; it degrades to empty buckets.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::scaling::parse_quantity;

/// Name used when an entry carries no usable name
pub const UNNAMED_ITEM: &str = "Unnamed item";

/// A quantity sent either as a number or as text ("2", "1 1/2")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(f64),
    Text(String),
}

impl RawQuantity {
    pub fn value(&self) -> Option<f64> {
        match self {
            RawQuantity::Number(n) if n.is_finite() => Some(*n),
            RawQuantity::Number(_) => None,
            RawQuantity::Text(text) => parse_quantity(text),
        }
    }
}

/// A partial inventory record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Freezer backups name their dish here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<RawQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(alias = "is_leftover", skip_serializing_if = "Option::is_none")]
    pub leftover: Option<bool>,
    /// Any other fields, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of an inventory bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// Bare name: `"milk"`
    Name(String),
    /// Object entry: `{"name": "milk", "quantity": 2}`
    Record(RawRecord),
    /// Anything else (numbers, null, objects with mistyped fields)
    Other(Value),
}

impl RawEntry {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(name) => RawEntry::Name(name),
            Value::Object(_) => match serde_json::from_value::<RawRecord>(value.clone()) {
                Ok(record) => RawEntry::Record(record),
                Err(_) => RawEntry::Other(value),
            },
            other => RawEntry::Other(other),
        }
    }

    pub fn record(&self) -> Option<&RawRecord> {
        match self {
            RawEntry::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The entry's `name` field (or the string itself for bare names)
    pub fn name(&self) -> Option<&str> {
        match self {
            RawEntry::Name(name) => Some(name),
            RawEntry::Record(record) => record.name.as_deref(),
            RawEntry::Other(value) => value.get("name").and_then(Value::as_str),
        }
    }

    /// The entry's `meal` field, used by freezer backups
    pub fn meal(&self) -> Option<&str> {
        match self {
            RawEntry::Name(name) => Some(name),
            RawEntry::Record(record) => record.meal.as_deref(),
            RawEntry::Other(value) => value.get("meal").and_then(Value::as_str),
        }
    }

    /// Name to display when nothing better is available
    pub fn fallback_name(&self) -> String {
        match self {
            RawEntry::Other(Value::Number(n)) => n.to_string(),
            RawEntry::Other(Value::Bool(b)) => b.to_string(),
            _ => UNNAMED_ITEM.to_string(),
        }
    }

    pub fn quantity(&self) -> Option<f64> {
        match self {
            RawEntry::Record(record) => record.quantity.as_ref().and_then(RawQuantity::value),
            RawEntry::Other(value) => value.get("quantity").and_then(Value::as_f64),
            RawEntry::Name(_) => None,
        }
    }

    pub fn servings(&self) -> Option<f64> {
        match self {
            RawEntry::Record(record) => record.servings.as_ref().and_then(RawQuantity::value),
            RawEntry::Other(value) => value.get("servings").and_then(Value::as_f64),
            RawEntry::Name(_) => None,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        let unit = match self {
            RawEntry::Record(record) => record.unit.as_deref(),
            RawEntry::Other(value) => value.get("unit").and_then(Value::as_str),
            RawEntry::Name(_) => None,
        };
        unit.filter(|unit| !unit.trim().is_empty())
    }

    /// The `type` (or `kind`) marker
    pub fn kind(&self) -> Option<&str> {
        match self {
            RawEntry::Record(record) => record.kind.as_deref(),
            RawEntry::Other(value) => text_field(value, &["type", "kind"]),
            RawEntry::Name(_) => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            RawEntry::Record(record) => record.category.as_deref(),
            RawEntry::Other(value) => text_field(value, &["category"]),
            RawEntry::Name(_) => None,
        }
    }

    /// The `leftover` (or `is_leftover`) flag; `1` and `"true"` count as set
    pub fn leftover(&self) -> bool {
        match self {
            RawEntry::Record(record) => record.leftover.unwrap_or(false),
            RawEntry::Other(value) => ["leftover", "is_leftover"]
                .iter()
                .filter_map(|key| value.get(*key))
                .any(is_truthy),
            RawEntry::Name(_) => false,
        }
    }

    /// All fields of an object entry as a JSON map
    pub fn fields(&self) -> Map<String, Value> {
        let value = match self {
            RawEntry::Record(record) => serde_json::to_value(record).unwrap_or(Value::Null),
            RawEntry::Other(value) => value.clone(),
            RawEntry::Name(_) => Value::Null,
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

fn text_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| value.get(*key).and_then(Value::as_str))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawEntry::from_value)
    }
}

/// Accept an array of entries; anything else is an empty bucket
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RawEntry>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(RawEntry::from_value).collect(),
        _ => Vec::new(),
    })
}

fn lenient_freezer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawFreezer, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => RawFreezer::default(),
    })
}

/// Freezer bucket: prepared backup meals and frozen ingredients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFreezer {
    #[serde(deserialize_with = "lenient_list")]
    pub backups: Vec<RawEntry>,
    #[serde(deserialize_with = "lenient_list")]
    pub ingredients: Vec<RawEntry>,
}

/// The inventory payload as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInventory {
    #[serde(deserialize_with = "lenient_list")]
    pub fridge: Vec<RawEntry>,
    #[serde(deserialize_with = "lenient_freezer")]
    pub freezer: RawFreezer,
    #[serde(deserialize_with = "lenient_list")]
    pub pantry: Vec<RawEntry>,
    #[serde(deserialize_with = "lenient_list")]
    pub spice_rack: Vec<RawEntry>,
}

impl RawInventory {
    /// Build from any JSON value, unwrapping one `inventory` envelope
    pub fn from_value(value: Value) -> Self {
        let value = match value {
            Value::Object(mut map) if map.get("inventory").is_some_and(Value::is_object) => {
                map.remove("inventory").unwrap_or_default()
            }
            other => other,
        };

        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Parse JSON text; only invalid JSON is an error
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(text).map(Self::from_value)
    }

    /// Number of entries across all buckets
    pub fn record_count(&self) -> usize {
        self.fridge.len()
            + self.freezer.backups.len()
            + self.freezer.ingredients.len()
            + self.pantry.len()
            + self.spice_rack.len()
    }
}
