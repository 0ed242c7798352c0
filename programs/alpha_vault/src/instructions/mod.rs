pub mod add_vault_and_strategy;
pub mod controller_stake;
pub mod deposit;
pub mod fund_stage_rewards;
pub mod harvest;
pub mod initialize_controller;
pub mod initialize_stage_pool;
pub mod initialize_storage;
pub mod initialize_strategy;
pub mod initialize_vault;
pub mod initialize_vault_depositor;
pub mod repoint_strategy;
pub mod set_controller;
pub mod set_strategy;
pub mod stage_pools;
pub mod stake_stage;
pub mod update_stage_pool;
pub mod update_strategy_config;
pub mod withdraw;
pub mod withdraw_pending_fund;

pub use add_vault_and_strategy::*;
pub use controller_stake::*;
pub use deposit::*;
pub use fund_stage_rewards::*;
pub use harvest::*;
pub use initialize_controller::*;
pub use initialize_stage_pool::*;
pub use initialize_storage::*;
pub use initialize_strategy::*;
pub use initialize_vault::*;
pub use initialize_vault_depositor::*;
pub use repoint_strategy::*;
pub use set_controller::*;
pub use set_strategy::*;
pub use stage_pools::*;
pub use stake_stage::*;
pub use update_stage_pool::*;
pub use update_strategy_config::*;
pub use withdraw::*;
pub use withdraw_pending_fund::*;
