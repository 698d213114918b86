pub mod user_vesting;
pub mod vesting_config;

pub use user_vesting::*;
pub use vesting_config::*;
