pub mod assets;
pub mod catalog;
pub mod contact;
pub mod logging;
pub mod modal;
pub mod preference;
pub mod share;
