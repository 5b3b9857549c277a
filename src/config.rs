//! File-based configuration.
//!
//! A config file is a JSON object; every field is optional:
//!
//! ```json
//! {
//!   "max": 3,
//!   "disabled": false,
//!   "moveDisabledIndexes": [0],
//!   "editDisabledIndexes": [],
//!   "removeDisabledIndexes": [0],
//!   "items": ["First card", "Second card"]
//! }
//! ```

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::constraint::Constraints;
use crate::engine::Options;
use crate::error::Error;

/// Engine settings read from disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// The length at which the add affordance is withdrawn.
  pub max: Option<usize>,
  /// Global and per-position locks.
  #[serde(flatten)]
  pub constraints: Constraints,
  /// Labels for the entries a host should start out with.
  pub items: Vec<String>,
}

impl Config {
  /// Returns the platform-specific default config path,
  /// `<config dir>/repeater/config.json`.
  pub fn default_path() -> Result<PathBuf, Error> {
    let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
    Ok(dir.join("repeater").join("config.json"))
  }

  /// Reads a config from `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
  }

  /// Reads a config from `path`, falling back to the default if there is no
  /// file there.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Error> {
    match Self::load(path) {
      Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
        Ok(Self::default())
      }
      result => result,
    }
  }

  /// Builds engine [`Options`] from this config.
  ///
  /// The result has the default announcer and no change callback.
  pub fn options<T>(&self) -> Options<T> {
    let options = Options::default().constraints(self.constraints.clone());
    match self.max {
      Some(max) => options.max(max),
      None => options,
    }
  }
}
