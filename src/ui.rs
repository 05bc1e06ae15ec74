//! Ratatui front-end for the survival backpack: the main menu, the item
//! listing, and the popups that feed validated input into the record store.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::{App, MenuOption, Screen};
pub use terminal::run_app;
