pub mod adapter;
pub mod config;
pub mod console;
pub mod domain;
pub mod utils;
