pub mod command;
/// Plain-text rendering of the thread and the image panel.
pub mod render;
mod repl;

pub use command::{Command, HELP_TEXT, parse_line};
pub use repl::run_interactive;
