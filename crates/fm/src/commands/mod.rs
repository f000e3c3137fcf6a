//! Command handlers, one module per subcommand.

pub mod completion;
pub mod indent;
pub mod list;
pub mod prices;
pub mod show;
pub mod validate;
pub mod version;
