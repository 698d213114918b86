pub mod create_token;
pub mod initialize_vesting;
pub mod initialize_user_vesting;
pub mod claim;
pub mod preview_claim;

pub use create_token::*;
pub use initialize_vesting::*;
pub use initialize_user_vesting::*;
pub use claim::*;
pub use preview_claim::*;
