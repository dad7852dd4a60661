//! Data models for the inventory API.
//!
//! This module contains the wire types exchanged with the remote API:
//!
//! - `ApiId`: identifiers that the server may send as numbers or strings
//! - `User`, `Role`: the signed-in account returned by `/users/me`
//! - `Store`, `Item`: shop locations and catalog entries
//! - `InventoryLine`, `InventoryBulk`, `Inventory`: daily stock movements

pub mod id;
pub mod inventory;
pub mod user;

pub use id::ApiId;
pub use inventory::{Inventory, InventoryBulk, InventoryLine, Item, Store};
pub use user::{Role, User};
