use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ApiId;

/// A shop location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: ApiId,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A catalog entry. `cost` is in rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ApiId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub cost: i64,
}

impl Item {
    /// Row label as shown in the entry grid: category first, then name
    pub fn label(&self) -> String {
        format!("{} {}", self.category, self.name)
    }
}

/// One item's movement for the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub item_id: ApiId,
    #[serde(default)]
    pub in_qty: u32,
    #[serde(default)]
    pub out_qty: u32,
}

/// Payload for `POST /inventory/bulk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBulk {
    pub store_id: ApiId,
    pub date: NaiveDate,
    pub items: Vec<InventoryLine>,
}

/// A stored inventory row as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: ApiId,
    pub store_id: ApiId,
    pub item_id: ApiId,
    pub date: NaiveDate,
    #[serde(default)]
    pub in_qty: u32,
    #[serde(default)]
    pub out_qty: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_serializes_iso_date() {
        let bulk = InventoryBulk {
            store_id: ApiId::from("central-park"),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            items: vec![InventoryLine {
                item_id: ApiId::from("ori-bluder"),
                in_qty: 12,
                out_qty: 4,
            }],
        };
        let json = serde_json::to_value(&bulk).unwrap();
        assert_eq!(json["date"], "2025-03-09");
        assert_eq!(json["store_id"], "central-park");
        assert_eq!(json["items"][0]["in_qty"], 12);
        assert_eq!(json["items"][0]["out_qty"], 4);
    }

    #[test]
    fn test_store_type_field() {
        let store: Store =
            serde_json::from_str(r#"{"id": "a1", "name": "Central Park", "type": "mall"}"#).unwrap();
        assert_eq!(store.kind.as_deref(), Some("mall"));
    }

    #[test]
    fn test_item_label() {
        let item: Item =
            serde_json::from_str(r#"{"id": 3, "name": "Choco", "category": "Bluder", "cost": 7000}"#)
                .unwrap();
        assert_eq!(item.label(), "Bluder Choco");
    }
}
