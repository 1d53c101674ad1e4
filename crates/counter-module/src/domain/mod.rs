pub mod collections;
pub mod config;
pub mod entities;
pub mod errors;
pub mod genesis;
pub mod keeper;
pub mod pagination;

pub use collections::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use genesis::*;
pub use keeper::*;
pub use pagination::*;
