use std::mem;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::node::TreeNode;
use crate::normalize::{insert_path, prune_node, split_path};
use crate::source::{SourceError, WorkspaceSource};

/// Load progress of the workspace tree.
/// 工作區樹的載入狀態。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Owns the current workspace root plus its load status.
/// 持有目前的工作區根節點與載入狀態。
///
/// The tree is replaced wholesale (and pruned) on every refresh; `add_node`
/// applies incremental updates in between.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceState {
    workspace: TreeNode,
    status: LoadStatus,
    error: Option<String>,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    /// Starts with an unnamed, empty root.
    /// 以未命名的空根節點開始。
    pub fn new() -> Self {
        Self {
            workspace: TreeNode::directory("", Vec::new()),
            status: LoadStatus::Idle,
            error: None,
        }
    }

    pub fn workspace(&self) -> &TreeNode {
        &self.workspace
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Message of the most recent failed refresh, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_refresh(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Records the outcome of a fetch.
    /// 紀錄一次取得工作區的結果。
    ///
    /// Success prunes and stores the new root and clears any stale error. Failure
    /// keeps the previous tree and stores the error message.
    pub fn finish_refresh(&mut self, result: Result<TreeNode, SourceError>) {
        match result {
            Ok(root) => {
                self.workspace = prune_node(&root);
                self.status = LoadStatus::Succeeded;
                self.error = None;
                info!(
                    "workspace '{}' loaded with {} nodes",
                    self.workspace.name,
                    self.workspace.node_count()
                );
            }
            Err(err) => {
                warn!("workspace refresh failed: {err}");
                self.status = LoadStatus::Failed;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Fetches a fresh tree from `source` and returns the resulting status.
    /// 從來源重新取得工作區並回傳最終狀態。
    pub fn refresh<S: WorkspaceSource + ?Sized>(&mut self, source: &S) -> LoadStatus {
        self.begin_refresh();
        let result = source.fetch();
        self.finish_refresh(result);
        self.status
    }

    /// Inserts a slash-delimited path, starting with the root's own name.
    /// 插入以 `/` 分隔的路徑（第一段為根節點名稱）。
    ///
    /// The root is wrapped in a one-element forest for the insertion and the last
    /// forest element becomes the new root. A path that does not start at the
    /// current root therefore replaces it.
    pub fn add_node(&mut self, path: &str) {
        let segments = split_path(path);
        let mut forest = vec![mem::take(&mut self.workspace)];
        insert_path(&mut forest, &segments);
        if forest.len() > 1 {
            warn!(
                "path '{path}' does not start at workspace root '{}'; root replaced",
                forest[0].name
            );
        }
        if let Some(root) = forest.pop() {
            self.workspace = root;
        }
    }
}
