mod error;
mod key_value;
mod retention;
mod snapshot;

pub use error::*;
pub use key_value::*;
pub use retention::*;
pub use snapshot::*;
