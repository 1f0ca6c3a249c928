//! Command-line front end
//!
//! The interactive menu is the main way to use the tracker; `main.rs`
//! handles the clap arguments and hands the session over to [`run_menu`].

pub mod menu;

pub use menu::{run_menu, Menu, MenuChoice};
