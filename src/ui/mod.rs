//! Ratatui front-end split across logical submodules: the application state
//! machine, form and confirmation state, the record list screen, shared
//! drawing helpers, and the terminal lifecycle.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
