//! Terminal presentation layer.

pub mod app;
pub mod browser;
pub mod events;
pub mod layout;
pub mod services;
pub mod sidebar;
pub mod theme;
pub mod views;
pub mod widgets;
