mod cli;
mod config;
mod log;

pub use cli::*;
pub use config::*;
pub use log::*;
