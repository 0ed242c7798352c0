pub mod controller;
pub mod stage_pool;
pub mod storage;
pub mod strategy;
pub mod vault;
pub mod vault_depositor;

pub use controller::*;
pub use stage_pool::*;
pub use storage::*;
pub use strategy::*;
pub use vault::*;
pub use vault_depositor::*;
