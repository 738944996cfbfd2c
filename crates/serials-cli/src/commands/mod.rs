pub mod add;
pub mod clear;
pub mod common;
pub mod completions;
pub mod delete;
pub mod export;
pub mod list;
