mod content;
mod reader;

use std::path::{Path, PathBuf};

pub use content::{Configuration, MessageSection, NotificationSection, StorageSection, TimerSection};
pub use reader::{ReadContentError, DEFAULT_CONTENT};

use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::utils::xdg::{Xdg, XdgBaseKind, XdgError};

use reader::ContentReader;

/// An error type for loading configuraton from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read content from {}", path.display()))]
    Read {
        path: PathBuf,
        source: ReadContentError,
    },
    #[snafu(display("Could not parse invalid configurations in {}", path.display()))]
    Parse { path: PathBuf, source: DeError },
}

/// Read configuration from given path. Optionally create one from default
/// template if it doesn't exists.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load<P: AsRef<Path>>(
    path: P,
    create_new: bool,
) -> Result<Configuration, LoadConfigurationError> {
    let path = path.as_ref();
    let content = ContentReader::new(path, create_new)
        .read()
        .context(ReadSnafu { path })?;
    toml::from_str(&content).context(ParseSnafu { path })
}

/// Read configuration from a custom path. This won't create any new file.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    load(path, false)
}

/// Read configuration from XDG configuration directory. Create one from default
/// template if it doesn't exists.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_xdg(app_name: &str) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(app_name)
        .and_then(|xdg| xdg.resolve_create(XdgBaseKind::Config, "config.toml"))
        .context(XdgConfigSnafu)?;
    load(path, true)
}
