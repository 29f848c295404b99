//! Workspace explorer tree: path insertion, empty-list pruning and the workspace
//! state that owns the tree.
//! 工作區檔案樹：路徑插入、空子節點修剪，以及持有樹狀結構的工作區狀態。

pub mod config;
pub mod node;
pub mod normalize;
pub mod source;
pub mod workspace;

pub use config::{ConfigError, ExplorerConfig, CONFIG_FILE_NAME};
pub use node::{find_path, find_path_mut, Forest, NodeShape, TreeNode};
pub use normalize::{insert_path, prune_empty, prune_node, split_path};
pub use source::{DirectorySource, JsonSource, SourceError, WorkspaceSource};
pub use workspace::{LoadStatus, WorkspaceState};
