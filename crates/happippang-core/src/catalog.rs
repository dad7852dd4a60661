//! Built-in shop and item catalog.
//!
//! Used for the entry grid whenever the server's `/stores/` and `/items/`
//! lists are unavailable.

use crate::models::{ApiId, Item, Store};

pub struct Shop {
    pub id: &'static str,
    pub name: &'static str,
}

pub struct CatalogItem {
    pub name: &'static str,
    pub category: &'static str,
    pub cost: i64,
}

pub const SHOPS: &[Shop] = &[
    Shop { id: "carrefour-cbd-pluit", name: "Carrefour CBD Pluit" },
    Shop { id: "central-park", name: "Central Park" },
    Shop { id: "kota-kasablanka", name: "Kota Kasablanka" },
];

macro_rules! item {
    ($name:expr, $category:expr, $cost:expr) => {
        CatalogItem { name: $name, category: $category, cost: $cost }
    };
}

pub const ITEMS: &[CatalogItem] = &[
    item!("ORI", "Bluder", 5000),
    item!("Choco", "Bluder", 7000),
    item!("Cheese", "Bluder", 7000),
    item!("ChocoCheese", "Bluder", 7000),
    item!("Smoked Beef", "Bluder", 7000),
    item!("Abon", "Bluder", 7000),
    item!("Bluberry", "Bluder", 7000),
    item!("Bunny", "SC", 3000),
    item!("Bear", "SC", 3000),
    item!("Cat", "SC", 3000),
    item!("Cok", "Wassant", 17500),
    item!("Keju", "Wassant", 17500),
    item!("Mix", "Wassant", 17500),
    item!("Kotak", "Milky", 18000),
    item!("Bunny", "Milky", 12000),
    item!("Cat.Duo", "Milky", 12000),
    item!("Bear", "Milky", 12000),
    item!("meses", "LJ", 5250),
    item!("cheese", "LJ", 6000),
    item!("rainbow", "LJ", 5500),
    item!("duo", "LJ", 6500),
    item!("Manis Kotak", "Bagelen", 10000),
    item!("Manis Cat", "Bagelen", 3000),
    item!("Manis Bunny", "Bagelen", 3000),
    item!("Manis Bear", "Bagelen", 3000),
    item!("Garlic Kotak", "Bagelen", 10000),
    item!("Garlic Cat", "Bagelen", 3000),
    item!("Garlic Bunny", "Bagelen", 3000),
    item!("Garlic Bear", "Bagelen", 3000),
    item!("Cok", "RJ", 5000),
    item!("Cokju", "RJ", 5000),
    item!("Piscok", "RJ", 6000),
    item!("Abon", "RJ", 6000),
    item!("Sosis", "RJ", 6000),
    item!("Spicy", "RJ", 8000),
    item!("Baso", "RJ", 6000),
    item!("Cheese Bomb", "RJ", 8000),
    item!("Butter Roll", "GL", 14000),
    item!("Roti Sisir Mocha", "GL", 8000),
    item!("Roti Sisir Cheese", "GL", 8000),
];

/// Slug id for a catalog item: `"Smoked Beef"`/`"Bluder"` becomes
/// `"smoked-beef-bluder"`.
pub fn item_slug(name: &str, category: &str) -> String {
    let name = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{}-{}", name, category.to_lowercase())
}

impl CatalogItem {
    pub fn id(&self) -> String {
        item_slug(self.name, self.category)
    }

    pub fn to_item(&self) -> Item {
        Item {
            id: ApiId::Text(self.id()),
            name: self.name.to_string(),
            category: self.category.to_string(),
            cost: self.cost,
        }
    }
}

impl Shop {
    pub fn to_store(&self) -> Store {
        Store {
            id: ApiId::from(self.id),
            name: self.name.to_string(),
            kind: None,
        }
    }
}

pub fn stores() -> Vec<Store> {
    SHOPS.iter().map(Shop::to_store).collect()
}

pub fn items() -> Vec<Item> {
    ITEMS.iter().map(CatalogItem::to_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_slug() {
        assert_eq!(item_slug("Smoked Beef", "Bluder"), "smoked-beef-bluder");
        assert_eq!(item_slug("ORI", "Bluder"), "ori-bluder");
        assert_eq!(item_slug("Roti  Sisir Mocha", "GL"), "roti-sisir-mocha-gl");
        assert_eq!(item_slug("Cat.Duo", "Milky"), "cat.duo-milky");
    }

    #[test]
    fn test_item_ids_unique() {
        let ids: HashSet<String> = ITEMS.iter().map(CatalogItem::id).collect();
        assert_eq!(ids.len(), ITEMS.len());
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(stores().len(), 3);
        assert_eq!(items().len(), 40);
        assert_eq!(stores()[0].id, ApiId::from("carrefour-cbd-pluit"));
    }
}
