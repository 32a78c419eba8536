use std::fmt::{self, Display, Formatter};

use crate::{NodeId, OrderedIndex};

/// Draws the tree sideways, right subtrees above their parent:
///
/// ```text
/// RedBlackTree
/// │   ┌── 3
/// └── 2
///     └── 1
/// ```
impl<V> Display for OrderedIndex<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "RedBlackTree")?;
        match self.root {
            Some(root) => self.render(f, root, "", true),
            None => Ok(()),
        }
    }
}

impl<V> OrderedIndex<V> {
    fn render(&self, f: &mut Formatter<'_>, id: NodeId, prefix: &str, tail: bool) -> fmt::Result {
        let node = self.node(id);
        if let Some(right) = node.right {
            let prefix = format!("{prefix}{}", if tail { "│   " } else { "    " });
            self.render(f, right, &prefix, false)?;
        }
        let connector = if tail { "└── " } else { "┌── " };
        writeln!(f, "{prefix}{connector}{}", node.key)?;
        if let Some(left) = node.left {
            let prefix = format!("{prefix}{}", if tail { "    " } else { "│   " });
            self.render(f, left, &prefix, true)?;
        }
        Ok(())
    }
}
