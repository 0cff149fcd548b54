pub mod types;
pub mod loader;
pub mod entities;

pub use types::*;
pub use loader::*;
pub use entities::*;
