//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, the login form and the inventory grid
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
