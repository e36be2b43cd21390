mod console;
mod ec2;
mod prompt;

pub use console::*;
pub use ec2::*;
pub use prompt::*;
