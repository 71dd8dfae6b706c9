pub mod board;
pub mod config;
pub mod countdown;
pub mod log;
pub mod store;
pub mod validate;
