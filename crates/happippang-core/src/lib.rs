//! Core library for happippang.
//!
//! Talks to the inventory API on behalf of the terminal client:
//!
//! - `api`: HTTP client with bearer tokens and transparent session refresh
//! - `auth`: token storage, the auth context, route guard, login/logout
//! - `router` / `navigation`: the page table and navigation requests
//! - `catalog` / `inventory`: shops, items and the daily entry form
//! - `services`: explicit wiring of all of the above from `Config`

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod inventory;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod router;
pub mod services;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use services::{Services, WiringError};
