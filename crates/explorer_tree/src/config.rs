use std::ffi::OsStr;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up inside a workspace root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = ".explorer.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read explorer config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse explorer config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Options controlling how a workspace directory is scanned into a tree.
/// 控制工作區掃描行為的設定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub root_name: Option<String>,
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_ignore() -> Vec<String> {
    vec![".git".into(), "target".into(), "node_modules".into()]
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            root_name: None,
            include_hidden: false,
            follow_links: false,
            max_depth: None,
            ignore: default_ignore(),
        }
    }
}

impl ExplorerConfig {
    /// Loads the config at `path`, falling back to defaults when the file is absent.
    /// 讀取設定檔；檔案不存在時回傳預設值。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let mut config: ExplorerConfig =
                    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                config.sanitize();
                Ok(config)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn sanitize(&mut self) {
        if self.max_depth == Some(0) {
            self.max_depth = None;
        }
        if self
            .root_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            self.root_name = None;
        }
        let mut seen = Vec::with_capacity(self.ignore.len());
        for name in self.ignore.drain(..) {
            let name = name.trim().to_string();
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        self.ignore = seen;
    }

    /// Returns `true` when an entry with this file name should be left out of the tree.
    pub fn is_excluded(&self, file_name: &OsStr) -> bool {
        let name = file_name.to_string_lossy();
        if !self.include_hidden && name.starts_with('.') {
            return true;
        }
        self.ignore.iter().any(|ignored| *ignored == name)
    }
}
