use log::debug;

use crate::node::{Forest, TreeNode};

/// Inserts the node addressed by `segments`, creating missing intermediate nodes.
/// 依路徑片段插入節點，缺少的中間節點會自動建立。
///
/// Siblings are matched by name (first match wins) and new nodes are appended,
/// so existing order is never disturbed. A file-shaped node found in the middle of
/// the path gains an empty `children` list before descent. The target node itself
/// is located or created but never given `children`. An empty `segments` slice
/// leaves the forest untouched.
pub fn insert_path<'a, S: AsRef<str>>(forest: &'a mut Forest, segments: &[S]) -> &'a mut Forest {
    let Some((head, tail)) = segments.split_first() else {
        return forest;
    };
    let head = head.as_ref();

    let index = match forest.iter().position(|node| node.name == head) {
        Some(index) => index,
        None => {
            debug!("creating tree node '{head}'");
            forest.push(TreeNode::leaf(head));
            forest.len() - 1
        }
    };

    if !tail.is_empty() {
        let children = forest[index].children.get_or_insert_with(Vec::new);
        insert_path(children, tail);
    }

    forest
}

/// Rewrites every empty `children` list into an absent one, bottom-up.
/// 由下而上將空的 `children` 移除，回傳新的樹。
pub fn prune_empty(forest: &[TreeNode]) -> Forest {
    let mut collapsed = 0;
    let pruned = prune_forest_counting(forest, &mut collapsed);
    debug!(
        "pruned forest of {} roots, collapsed {collapsed} empty child lists",
        forest.len()
    );
    pruned
}

/// Pruned copy of a single node.
/// 單一節點的修剪版本。
///
/// After pruning an empty directory and a file look the same; callers that need
/// the difference must inspect the tree before pruning.
pub fn prune_node(node: &TreeNode) -> TreeNode {
    let mut collapsed = 0;
    let pruned = prune_node_counting(node, &mut collapsed);
    debug!(
        "pruned '{}', collapsed {collapsed} empty child lists",
        node.name
    );
    pruned
}

fn prune_forest_counting(forest: &[TreeNode], collapsed: &mut usize) -> Forest {
    forest
        .iter()
        .map(|node| prune_node_counting(node, collapsed))
        .collect()
}

fn prune_node_counting(node: &TreeNode, collapsed: &mut usize) -> TreeNode {
    match &node.children {
        Some(children) => {
            let pruned = prune_forest_counting(children, collapsed);
            if pruned.is_empty() {
                *collapsed += 1;
                node.rebuilt_with(None)
            } else {
                node.rebuilt_with(Some(pruned))
            }
        }
        None => node.clone(),
    }
}

/// Splits an incremental-update path on `/`; empty components are kept as names.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> TreeNode {
        TreeNode::leaf(name)
    }

    fn dir(name: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::directory(name, children)
    }

    #[test]
    fn insert_appends_sibling() {
        let mut forest = vec![dir("a", vec![leaf("b")])];
        insert_path(&mut forest, &["a", "c"]);
        assert_eq!(forest, vec![dir("a", vec![leaf("b"), leaf("c")])]);
    }

    #[test]
    fn insert_descends_into_deep_match() {
        let mut forest = vec![dir(
            "a",
            vec![dir("b", vec![dir("c", vec![leaf("d")]), leaf("e")])],
        )];
        insert_path(&mut forest, &["a", "b", "c", "f"]);
        assert_eq!(
            forest,
            vec![dir(
                "a",
                vec![dir("b", vec![dir("c", vec![leaf("d"), leaf("f")]), leaf("e")])],
            )]
        );
    }

    #[test]
    fn insert_into_explicit_empty_children() {
        let mut forest = vec![dir("a", Vec::new())];
        insert_path(&mut forest, &["a", "b"]);
        assert_eq!(forest, vec![dir("a", vec![leaf("b")])]);
    }

    #[test]
    fn insert_creates_missing_root_and_intermediates() {
        let mut forest = Forest::new();
        insert_path(&mut forest, &["root", "folder1", "file2.ts"]);
        assert_eq!(
            forest,
            vec![dir("root", vec![dir("folder1", vec![leaf("file2.ts")])])]
        );
    }

    #[test]
    fn insert_through_file_converts_it_to_directory() {
        let mut forest = vec![leaf("a")];
        insert_path(&mut forest, &["a", "b"]);
        assert_eq!(forest, vec![dir("a", vec![leaf("b")])]);
    }

    #[test]
    fn insert_existing_target_does_not_add_children() {
        let mut forest = vec![dir("a", vec![leaf("b")])];
        insert_path(&mut forest, &["a", "b"]);
        assert_eq!(forest, vec![dir("a", vec![leaf("b")])]);
    }

    #[test]
    fn insert_with_empty_segments_is_noop() {
        let mut forest = vec![dir("a", vec![leaf("b")])];
        let before = forest.clone();
        insert_path::<&str>(&mut forest, &[]);
        assert_eq!(forest, before);
    }

    #[test]
    fn insert_returns_same_forest_for_chaining() {
        let mut forest = Forest::new();
        insert_path(insert_path(&mut forest, &["a", "x"]), &["a", "y"]);
        assert_eq!(forest, vec![dir("a", vec![leaf("x"), leaf("y")])]);
    }

    #[test]
    fn prune_collapses_empty_lists_bottom_up() {
        let tree = dir(
            "a",
            vec![dir("b", Vec::new()), dir("c", vec![dir("d", Vec::new())])],
        );
        assert_eq!(
            prune_node(&tree),
            dir("a", vec![leaf("b"), dir("c", vec![leaf("d")])])
        );
    }

    #[test]
    fn prune_cascades_when_all_children_were_empty() {
        let tree = dir("a", vec![dir("b", vec![dir("c", Vec::new())])]);
        // `b` keeps its now leaf-shaped child, so only `c` collapses.
        assert_eq!(prune_node(&tree), dir("a", vec![dir("b", vec![leaf("c")])]));
        assert_eq!(prune_node(&dir("solo", Vec::new())), leaf("solo"));
    }

    #[test]
    fn prune_leaves_input_untouched() {
        let forest = vec![dir("a", Vec::new()), leaf("b")];
        let pruned = prune_empty(&forest);
        assert_eq!(pruned, vec![leaf("a"), leaf("b")]);
        assert_eq!(forest, vec![dir("a", Vec::new()), leaf("b")]);
    }

    #[test]
    fn prune_counts_each_collapsed_list_once() {
        let forest = vec![
            dir("a", vec![dir("b", Vec::new()), dir("c", vec![dir("d", Vec::new())])]),
            dir("e", Vec::new()),
            leaf("f"),
        ];
        let mut collapsed = 0;
        let pruned = prune_forest_counting(&forest, &mut collapsed);
        assert_eq!(collapsed, 3);
        assert_eq!(pruned, prune_empty(&forest));

        let mut again = 0;
        prune_forest_counting(&pruned, &mut again);
        assert_eq!(again, 0);
    }

    #[test]
    fn split_path_keeps_empty_components() {
        assert_eq!(split_path("root/folder1/file2.ts"), vec!["root", "folder1", "file2.ts"]);
        assert_eq!(split_path("a//b"), vec!["a", "", "b"]);
        assert_eq!(split_path(""), vec![""]);
    }
}
