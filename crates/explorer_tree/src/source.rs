use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ExplorerConfig;
use crate::node::{find_path_mut, TreeNode};
use crate::normalize::insert_path;

/// Anything able to produce a fresh workspace root.
/// 能夠產生工作區根節點的來源。
pub trait WorkspaceSource {
    fn fetch(&self) -> Result<TreeNode, SourceError>;
}

/// Errors emitted while fetching a workspace tree.
/// 取得工作區樹時可能發生的錯誤。
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read workspace {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to walk workspace {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("invalid workspace payload {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("workspace root {0} is not a directory")]
    NotADirectory(PathBuf),
}

/// Scans a directory on disk into a tree, one node per entry.
/// 掃描磁碟上的資料夾並建立對應的樹。
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    config: ExplorerConfig,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>, config: ExplorerConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn root_name(&self) -> String {
        if let Some(name) = &self.config.root_name {
            return name.clone();
        }
        let resolved = match self.root.file_name() {
            Some(name) => Some(name.to_os_string()),
            // `.` and `..` have no file name of their own.
            None => fs::canonicalize(&self.root)
                .ok()
                .and_then(|path| path.file_name().map(|name| name.to_os_string())),
        };
        resolved
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }
}

impl WorkspaceSource for DirectorySource {
    fn fetch(&self) -> Result<TreeNode, SourceError> {
        let metadata = fs::metadata(&self.root).map_err(|source| SourceError::Read {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(SourceError::NotADirectory(self.root.clone()));
        }

        let root_name = self.root_name();
        let mut forest = vec![TreeNode::directory(root_name.clone(), Vec::new())];

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .min_depth(1);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let config = &self.config;
        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !config.is_excluded(entry.file_name()));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(SourceError::Walk {
                        path: self.root.clone(),
                        source,
                    });
                }
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {err}", self.root.display());
                    continue;
                }
            };
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            let segments: Vec<String> = std::iter::once(root_name.clone())
                .chain(
                    relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy().into_owned()),
                )
                .collect();
            insert_path(&mut forest, &segments);

            if entry.file_type().is_dir() {
                if let Some(node) = find_path_mut(&mut forest, &segments) {
                    node.children.get_or_insert_with(Vec::new);
                }
            }
        }

        let root = forest
            .pop()
            .unwrap_or_else(|| TreeNode::directory(root_name, Vec::new()));
        debug!(
            "scanned {} into {} nodes",
            self.root.display(),
            root.node_count()
        );
        Ok(root)
    }
}

/// Reads a JSON workspace payload (`{"name": .., "children": [..]}`) from disk.
/// 從磁碟讀取 JSON 格式的工作區資料。
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkspaceSource for JsonSource {
    fn fetch(&self) -> Result<TreeNode, SourceError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SourceError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}
