pub mod record;
pub mod stream;

pub use record::*;
pub use stream::*;
