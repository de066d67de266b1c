mod error;
mod fact;
mod result;
mod variant;

pub use error::*;
pub use fact::*;
pub use result::*;
pub use variant::*;
