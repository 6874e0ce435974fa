pub mod item;
pub mod state;
pub mod config;

pub use item::*;
pub use state::*;
pub use config::*;
