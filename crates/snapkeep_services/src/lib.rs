mod console;
mod infra;

pub use console::*;
pub use infra::*;
