pub mod clock;
pub mod repositories;

pub use clock::*;
pub use repositories::*;
