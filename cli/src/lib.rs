pub mod commands;
pub mod config;
pub mod error;
pub mod validation;

pub use commands::{run, Written};
pub use config::{CliArgs, Command, TextInput};
pub use error::CliError;
