//! Daily inventory entry form.
//!
//! Holds the selected shop, the date and the per-item in/out quantities,
//! and turns them into the bulk payload the API expects.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::catalog;
use crate::models::{ApiId, InventoryBulk, InventoryLine, Item, Store};

/// Date format used for input and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyField {
    In,
    Out,
}

impl QtyField {
    pub fn toggle(self) -> Self {
        match self {
            QtyField::In => QtyField::Out,
            QtyField::Out => QtyField::In,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowState {
    pub in_qty: u32,
    pub out_qty: u32,
}

impl RowState {
    pub fn get(&self, field: QtyField) -> u32 {
        match field {
            QtyField::In => self.in_qty,
            QtyField::Out => self.out_qty,
        }
    }
}

/// Parse a quantity typed into the grid.
/// Anything that is not an integer counts as 0; negatives clamp to 0.
pub fn parse_quantity(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) => n.clamp(0, i64::from(u32::MAX)) as u32,
        Err(_) => 0,
    }
}

#[derive(Debug, Clone)]
pub struct InventoryForm {
    stores: Vec<Store>,
    items: Vec<Item>,
    store_index: usize,
    date: NaiveDate,
    rows: HashMap<ApiId, RowState>,
}

impl InventoryForm {
    pub fn new(stores: Vec<Store>, items: Vec<Item>, date: NaiveDate) -> Self {
        Self {
            stores,
            items,
            store_index: 0,
            date,
            rows: HashMap::new(),
        }
    }

    /// Form backed by the built-in catalog
    pub fn from_catalog(date: NaiveDate) -> Self {
        Self::new(catalog::stores(), catalog::items(), date)
    }

    /// Swap in server-provided stores and items. Entered quantities are
    /// dropped since item ids may differ; the shop selection is kept when
    /// the same id still exists.
    pub fn replace_catalog(&mut self, stores: Vec<Store>, items: Vec<Item>) {
        let selected = self.store().map(|s| s.id.clone());
        self.stores = stores;
        self.items = items;
        self.rows.clear();
        self.store_index = 0;
        if let Some(id) = selected {
            self.select_store(&id);
        }
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn store(&self) -> Option<&Store> {
        self.stores.get(self.store_index)
    }

    pub fn select_store(&mut self, id: &ApiId) -> bool {
        match self.stores.iter().position(|s| &s.id == id) {
            Some(index) => {
                self.store_index = index;
                true
            }
            None => false,
        }
    }

    pub fn next_store(&mut self) {
        if !self.stores.is_empty() {
            self.store_index = (self.store_index + 1) % self.stores.len();
        }
    }

    pub fn prev_store(&mut self) {
        if !self.stores.is_empty() {
            self.store_index = (self.store_index + self.stores.len() - 1) % self.stores.len();
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, input: &str) -> Result<(), chrono::ParseError> {
        self.date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?;
        Ok(())
    }

    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(days)) {
            self.date = date;
        }
    }

    pub fn set_input(&mut self, item_id: &ApiId, field: QtyField, input: &str) {
        self.set_quantity(item_id, field, parse_quantity(input));
    }

    pub fn set_quantity(&mut self, item_id: &ApiId, field: QtyField, qty: u32) {
        let row = self.rows.entry(item_id.clone()).or_default();
        match field {
            QtyField::In => row.in_qty = qty,
            QtyField::Out => row.out_qty = qty,
        }
    }

    pub fn row(&self, item_id: &ApiId) -> RowState {
        self.rows.get(item_id).copied().unwrap_or_default()
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Sum of (in, out) over all items
    pub fn totals(&self) -> (u64, u64) {
        self.rows.values().fold((0, 0), |(i, o), row| {
            (i + u64::from(row.in_qty), o + u64::from(row.out_qty))
        })
    }

    /// Build the bulk payload: one line per item, 0/0 for untouched rows.
    /// Returns `None` when no shop is available to submit for.
    pub fn to_bulk(&self) -> Option<InventoryBulk> {
        let store = self.store()?;
        let items = self
            .items
            .iter()
            .map(|item| {
                let row = self.row(&item.id);
                InventoryLine {
                    item_id: item.id.clone(),
                    in_qty: row.in_qty,
                    out_qty: row.out_qty,
                }
            })
            .collect();
        Some(InventoryBulk {
            store_id: store.id.clone(),
            date: self.date,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12"), 12);
        assert_eq!(parse_quantity(" 7 "), 7);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("-4"), 0);
        assert_eq!(parse_quantity("3.5"), 0);
    }

    #[test]
    fn test_default_selection_is_first_shop() {
        let form = InventoryForm::from_catalog(day());
        assert_eq!(form.store().unwrap().id, ApiId::from("carrefour-cbd-pluit"));
    }

    #[test]
    fn test_store_cycling_wraps() {
        let mut form = InventoryForm::from_catalog(day());
        form.prev_store();
        assert_eq!(form.store().unwrap().id, ApiId::from("kota-kasablanka"));
        form.next_store();
        assert_eq!(form.store().unwrap().id, ApiId::from("carrefour-cbd-pluit"));
    }

    #[test]
    fn test_to_bulk_includes_every_item() {
        let mut form = InventoryForm::from_catalog(day());
        let ori = ApiId::from("ori-bluder");
        form.set_input(&ori, QtyField::In, "10");
        form.set_input(&ori, QtyField::Out, "oops");

        let bulk = form.to_bulk().unwrap();
        assert_eq!(bulk.items.len(), 40);
        assert_eq!(bulk.date, day());
        let line = bulk.items.iter().find(|l| l.item_id == ori).unwrap();
        assert_eq!((line.in_qty, line.out_qty), (10, 0));
        let untouched = bulk.items.iter().find(|l| l.item_id == ApiId::from("choco-bluder")).unwrap();
        assert_eq!((untouched.in_qty, untouched.out_qty), (0, 0));
    }

    #[test]
    fn test_to_bulk_without_stores() {
        let form = InventoryForm::new(Vec::new(), catalog::items(), day());
        assert!(form.to_bulk().is_none());
    }

    #[test]
    fn test_set_date() {
        let mut form = InventoryForm::from_catalog(day());
        form.set_date("2025-12-31").unwrap();
        assert_eq!(form.date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert!(form.set_date("31/12/2025").is_err());
        assert_eq!(form.date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        form.shift_date(1);
        assert_eq!(form.date(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_replace_catalog_keeps_shop_and_clears_rows() {
        let mut form = InventoryForm::from_catalog(day());
        form.next_store();
        form.set_quantity(&ApiId::from("ori-bluder"), QtyField::In, 5);

        let stores = vec![
            Store { id: ApiId::from("kota-kasablanka"), name: "Kokas".into(), kind: None },
            Store { id: ApiId::from("central-park"), name: "Central Park".into(), kind: None },
        ];
        let items = vec![Item { id: ApiId::Number(1), name: "ORI".into(), category: "Bluder".into(), cost: 5000 }];
        form.replace_catalog(stores, items);

        assert_eq!(form.store().unwrap().id, ApiId::from("central-park"));
        assert_eq!(form.totals(), (0, 0));
        assert_eq!(form.items().len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut form = InventoryForm::from_catalog(day());
        form.set_quantity(&ApiId::from("ori-bluder"), QtyField::In, 5);
        form.set_quantity(&ApiId::from("choco-bluder"), QtyField::In, 3);
        form.set_quantity(&ApiId::from("choco-bluder"), QtyField::Out, 2);
        assert_eq!(form.totals(), (8, 2));
    }
}
