use serde::{Deserialize, Serialize};

/// Ordered sibling nodes without an implicit common parent.
/// 沒有共同父節點的有序兄弟節點序列。
pub type Forest = Vec<TreeNode>;

/// One entry of the workspace tree.
/// 工作區樹中的單一項目。
///
/// `children` doubles as the file/directory tag: `Some` (even when empty) marks a
/// directory, `None` marks a file or a directory that was never materialised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

/// Explicit view over the optional `children` tag.
/// 以明確列舉呈現節點是檔案或資料夾。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape<'a> {
    File,
    Directory(&'a [TreeNode]),
}

impl TreeNode {
    /// Creates a leaf-shaped node.
    /// 建立葉節點（無 `children`）。
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
        }
    }

    /// Creates a directory-shaped node holding `children`.
    /// 建立帶有子節點的資料夾節點。
    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
        }
    }

    /// Copies every field of `self` except `children`, which is replaced.
    pub(crate) fn rebuilt_with(&self, children: Option<Vec<TreeNode>>) -> Self {
        Self {
            name: self.name.clone(),
            children,
        }
    }

    pub fn shape(&self) -> NodeShape<'_> {
        match &self.children {
            Some(children) => NodeShape::Directory(children),
            None => NodeShape::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the first direct child named `name`.
    /// 取得第一個名稱相符的直屬子節點。
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children
            .as_deref()
            .and_then(|children| children.iter().find(|child| child.name == name))
    }

    /// Counts this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }

    /// Lists the slash-joined path of every file-shaped node, starting with this node's name.
    /// 列出所有檔案節點的完整路徑（以 `/` 連接，從本節點名稱開始）。
    pub fn file_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_file_paths(self, None, &mut paths);
        paths
    }

    /// Renders the subtree as indented text; directory-shaped nodes end with `/`.
    /// 以縮排文字輸出子樹，資料夾名稱後附 `/`。
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_into(self, 0, &mut out);
        out
    }
}

/// Walks `forest` by successive name matches along `segments`.
/// 依序比對名稱，沿路徑尋找節點。
pub fn find_path<'a, S: AsRef<str>>(forest: &'a [TreeNode], segments: &[S]) -> Option<&'a TreeNode> {
    let (head, tail) = segments.split_first()?;
    let node = forest.iter().find(|node| node.name == head.as_ref())?;
    if tail.is_empty() {
        return Some(node);
    }
    find_path(node.children.as_deref()?, tail)
}

pub fn find_path_mut<'a, S: AsRef<str>>(
    forest: &'a mut [TreeNode],
    segments: &[S],
) -> Option<&'a mut TreeNode> {
    let (head, tail) = segments.split_first()?;
    let node = forest.iter_mut().find(|node| node.name == head.as_ref())?;
    if tail.is_empty() {
        return Some(node);
    }
    find_path_mut(node.children.as_deref_mut()?, tail)
}

fn collect_file_paths(node: &TreeNode, parent: Option<&str>, out: &mut Vec<String>) {
    let path = match parent {
        Some(parent) => format!("{parent}/{}", node.name),
        None => node.name.clone(),
    };
    match &node.children {
        Some(children) => {
            for child in children {
                collect_file_paths(child, Some(&path), out);
            }
        }
        None => out.push(path),
    }
}

fn render_into(node: &TreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&node.name);
    if node.is_directory() {
        out.push('/');
    }
    out.push('\n');
    for child in node.children.iter().flatten() {
        render_into(child, depth + 1, out);
    }
}
