use std::fs::File;
use std::io::{Error as IoError, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification. Durations themselves are set from the timer and saved with
# its state.

# The `timer` section tunes the countdown. `settle_delay` is the pause in
# milliseconds between a completed countdown and the automatic start of the
# next mode.
[timer]
settle_delay = 1500

# The `notification.<mode>` section specifies the message shown in desktop
# notifications when that mode completes. `body` is optional.
[notification.work]
summary = "Work Session Complete"
body = "Time for a break."

[notification.short-break]
summary = "Short Break Over"
body = "Back to work."

[notification.long-break]
summary = "Long Break Over"
body = "A new round of sessions starts now."

# The `storage` section specifies where the timer state is saved. Leave it
# empty to use the XDG data directory.
# [storage]
# directory = "/path/to/state/directory"
"#;

/// A reader which reads the configuration content and creates a default
/// configuration file if it is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if file doesn't exist or it fails to
    /// create a configuration file.
    pub fn read(self) -> Result<String, ReadContentError> {
        let Self { path, create_new } = self;
        let mut file = Self::open_configuration(path, create_new)?;
        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            when: "Reading configuration",
        })?;
        Ok(content)
    }

    fn open_configuration(path: PathBuf, create_new: bool) -> Result<File, ReadContentError> {
        match File::open(&path) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound && create_new => {
                tracing::info!(path = %path.display(), "Creating default configuration");
                Self::create_configuration(&path)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => NotFoundSnafu { path }.fail(),
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Opening configuration file",
            }),
        }
    }

    fn create_configuration(path: &Path) -> Result<File, ReadContentError> {
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })?;

        file.seek(SeekFrom::Start(0)).context(FileSystemSnafu {
            when: "Reseting file cursor position to start",
        })?;

        Ok(file)
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
