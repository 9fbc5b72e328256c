//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod completions;
mod types;
mod utils;
mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use types::handle_types;
pub use validate::handle_validate;
