pub mod entity;
pub mod event;
pub mod inbound;
pub mod outbound;
pub mod repository;
pub mod snapshot;
pub mod timer;

mod app;
mod worker;

pub use app::{ApplicationCore, SetupApplicationCoreError};
pub use worker::{SpawnWorkerError, WorkerTiming};
