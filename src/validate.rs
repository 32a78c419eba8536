use crate::{Color, Error, NodeId, OrderedIndex, Result};

impl<V> OrderedIndex<V> {
    /// Walks the whole tree and checks the search-tree order, the red-black
    /// coloring rules, the parent links and the length bookkeeping.
    ///
    /// Returns the black height of the tree, counting the nil leaves, so an
    /// empty index has a black height of 1.
    ///
    /// ```
    /// use rbindex::OrderedIndex;
    ///
    /// let index: OrderedIndex<()> = (0..100).map(|k| (k, ())).collect();
    /// assert!(index.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize> {
        if let Some(root) = self.root {
            let node = self.node(root);
            if node.parent.is_some() {
                return Err(Error::BrokenParentLink { key: node.key });
            }
            if node.color == Color::Red {
                return Err(Error::RedRoot { key: node.key });
            }
        }

        let mut reachable = 0;
        let height = self.check_subtree(self.root, None, None, &mut reachable)?;
        if reachable != self.len || self.nodes.len() != self.len {
            return Err(Error::LengthMismatch {
                len: self.len,
                reachable,
                allocated: self.nodes.len(),
            });
        }
        Ok(height)
    }

    fn check_subtree(
        &self,
        link: Option<NodeId>,
        lower: Option<NodeId>,
        upper: Option<NodeId>,
        reachable: &mut usize,
    ) -> Result<usize> {
        let Some(id) = link else {
            return Ok(1);
        };
        *reachable += 1;
        let node = self.node(id);

        if let Some(lower) = lower.map(|id| self.node(id).key) {
            if node.key <= lower {
                return Err(Error::OutOfOrder {
                    key: node.key,
                    ancestor: lower,
                });
            }
        }
        if let Some(upper) = upper.map(|id| self.node(id).key) {
            if node.key >= upper {
                return Err(Error::OutOfOrder {
                    key: node.key,
                    ancestor: upper,
                });
            }
        }

        for child in [node.left, node.right].into_iter().flatten() {
            let child = self.node(child);
            if child.parent != Some(id) {
                return Err(Error::BrokenParentLink { key: child.key });
            }
            if node.color == Color::Red && child.color == Color::Red {
                return Err(Error::RedChildOfRed {
                    parent: node.key,
                    child: child.key,
                });
            }
        }

        let left = self.check_subtree(node.left, lower, Some(id), reachable)?;
        let right = self.check_subtree(node.right, Some(id), upper, reachable)?;
        if left != right {
            return Err(Error::BlackHeightMismatch {
                key: node.key,
                left,
                right,
            });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}
