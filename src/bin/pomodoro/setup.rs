use std::path::PathBuf;
use std::sync::Arc;

use pomodoro::adapter::{
    FileStore, MemoryStore, NotificationConfiguration, NotifyService, TerminalDisplay,
};
use pomodoro::config::{self, Configuration};
use pomodoro::domain::repository::BlobStore;
use pomodoro::domain::{ApplicationCore, WorkerTiming};
use pomodoro::utils::xdg::{Xdg, XdgBaseKind};
use snafu::{prelude::*, Whatever};
use tokio::time::Duration;

use crate::cli::Arguments;

const APP_NAME: &str = "pomodoro";

pub async fn bootstrap(arg: &Arguments) -> Result<ApplicationCore, Whatever> {
    let configuration = configuration(arg)?;
    let store = store(arg, &configuration)?;
    core(configuration, store).await
}

fn configuration(arg: &Arguments) -> Result<Arc<Configuration>, Whatever> {
    let res = match &arg.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

fn store(arg: &Arguments, config: &Configuration) -> Result<Arc<dyn BlobStore>, Whatever> {
    if arg.ephemeral {
        tracing::info!("Timer state will not be saved");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let directory = match (&arg.store, &config.storage.directory) {
        (Some(directory), _) | (None, Some(directory)) => directory.clone(),
        (None, None) => data_directory()?,
    };
    tracing::info!(directory = %directory.display(), "Saving timer state");
    Ok(Arc::new(FileStore::new(directory)))
}

fn data_directory() -> Result<PathBuf, Whatever> {
    Xdg::new(APP_NAME)
        .and_then(|xdg| xdg.create_directory(XdgBaseKind::Data))
        .whatever_context("Could not use XDG base directories")
}

async fn core(
    config: Arc<Configuration>,
    store: Arc<dyn BlobStore>,
) -> Result<ApplicationCore, Whatever> {
    let timing = WorkerTiming {
        settle_delay: Duration::from_millis(config.timer.settle_delay),
        ..WorkerTiming::default()
    };
    let display = Arc::new(TerminalDisplay::stdout());
    let notifier = Arc::new(NotifyService::new(APP_NAME.to_owned()));
    let notification_repository = Arc::new(NotificationConfiguration::new(config));

    let core = ApplicationCore::setup(store, notification_repository, display, notifier, timing)
        .await
        .whatever_context("Could not setup application core")?;

    Ok(core)
}
