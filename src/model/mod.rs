pub mod alarm;
pub mod area;
pub mod config;
pub mod list;
pub mod project;
pub mod sample;
pub mod store;
pub mod task;

pub use alarm::*;
pub use area::*;
pub use config::*;
pub use list::*;
pub use project::*;
pub use store::*;
pub use task::*;
