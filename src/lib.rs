pub mod cli;
pub mod error;
pub mod feed;
pub mod flatten;
pub mod load;
pub mod query;
pub mod schema;
pub mod ui;

pub use cli::{Cli, Commands};
pub use error::LoadError;
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
