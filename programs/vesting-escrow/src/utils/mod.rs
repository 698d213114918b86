pub mod accounts;
pub mod curve;
pub mod time;
pub mod vault;
