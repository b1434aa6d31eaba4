pub mod check;
pub mod config;
pub mod month;
pub mod repeat;
pub mod search;
pub mod upcoming;
