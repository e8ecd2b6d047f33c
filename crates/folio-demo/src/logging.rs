#![forbid(unsafe_code)]

//! Log setup for the demo.
//!
//! The alternate screen owns the terminal, so logs always go to a file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use folio_core::logging::LOG_ENV;
use tracing_subscriber::EnvFilter;

use crate::cli::Opts;

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> io::Result<Mutex<File>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
}

/// Install the global subscriber described by `opts`.
///
/// Plain text logging is off unless `FOLIO_LOG` is set; JSON logging
/// defaults to `info`. Returns whether a subscriber was installed.
pub fn init(opts: &Opts) -> io::Result<bool> {
    if opts.log_json {
        let writer = open_log_file(&opts.log_file)?;
        return Ok(folio_core::logging::init_json_subscriber(writer));
    }
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(false);
    };
    let writer = open_log_file(&opts.log_file)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("folio-demo-{}-{name}", std::process::id()))
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        let path = scratch("append.log");
        let _ = std::fs::remove_file(&path);
        for line in ["first\n", "second\n"] {
            let file = open_log_file(&path).unwrap();
            file.lock().unwrap().write_all(line.as_bytes()).unwrap();
        }
        let mut text = String::new();
        File::open(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "first\nsecond\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_logging_writes_to_file() {
        let path = scratch("json.log");
        let _ = std::fs::remove_file(&path);
        let opts = Opts {
            log_file: path.clone(),
            log_json: true,
            ..Opts::default()
        };
        assert!(init(&opts).unwrap());
        tracing::info!(route = "/projects", "navigated");

        let mut text = String::new();
        File::open(&path).unwrap().read_to_string(&mut text).unwrap();
        let line = text.lines().last().unwrap();
        assert!(line.starts_with('{'), "{line}");
        assert!(line.contains("\"route\":\"/projects\""), "{line}");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let opts = Opts {
            log_file: scratch("missing-dir").join("nested").join("demo.log"),
            log_json: true,
            ..Opts::default()
        };
        assert!(init(&opts).is_err());
    }
}
