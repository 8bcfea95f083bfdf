mod core;
mod service;

pub use self::core::{ApplicationCore, SetupApplicationCoreError};
