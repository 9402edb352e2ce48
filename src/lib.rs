/// Folio - a personal portfolio in the terminal
///
/// Core library providing the portfolio catalog, category/search filtering,
/// detail overlays, the contact form and theme preferences.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
