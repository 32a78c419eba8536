use std::mem;

use log::trace;

use crate::{Color, Direction, NodeId, OrderedIndex};

// Structural primitives.
impl<V> OrderedIndex<V> {
    /// Hangs `new` where `old` used to be: in `old`'s parent, or at the root.
    /// `old` keeps its own parent link.
    pub(crate) fn replace_subtree(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent(old);
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side(old, parent);
                self.set_child(parent, side, new);
            }
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    /// Rotates `pivot` down towards `direction`, promoting its child on the
    /// other side.
    ///
    /// ```text
    ///   rotate(P, Left)            rotate(P, Right)
    ///
    ///     P            C              P          C
    ///    / \          / \            / \        / \
    ///   a   C   -->  P   c          C   c  --> a   P
    ///      / \      / \            / \            / \
    ///     b   c    a   b          a   b          b   c
    /// ```
    pub(crate) fn rotate(&mut self, pivot: NodeId, direction: Direction) {
        let outer = direction.opposite();
        let Some(promoted) = self.child(pivot, outer) else {
            // Nothing to promote.
            return;
        };
        trace!(
            "rotate {direction:?} at key {} promoting key {}",
            self.node(pivot).key,
            self.node(promoted).key
        );

        self.replace_subtree(pivot, Some(promoted));
        let inner = self.child(promoted, direction);
        self.set_child(pivot, outer, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(pivot);
        }
        self.set_child(promoted, direction, Some(pivot));
        self.node_mut(pivot).parent = Some(promoted);
    }
}

// Rebalancing.
impl<V> OrderedIndex<V> {
    /// Restores the red-black properties after `node` was linked in as a red
    /// leaf.
    pub(crate) fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            /*
             * Loop invariant: node is red.
             */
            let Some(parent) = self.parent(node) else {
                /*
                 * The node is the root. Either this is the first node, or
                 * the color flips propagated all the way up.
                 */
                trace!("insert fixup: key {} is the root", self.node(node).key);
                self.set_color(node, Color::Black);
                return;
            };

            /*
             * A black parent can take a red child.
             */
            if self.is_black(Some(parent)) {
                return;
            }

            /*
             * The parent is red, so it is not the root and the grandparent
             * exists.
             */
            let Some(grandparent) = self.parent(parent) else {
                self.set_color(parent, Color::Black);
                return;
            };
            let parent_side = self.side(parent, grandparent);
            let uncle = self.sibling(parent);

            if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
                /*
                 * Red uncle (color flips).
                 *
                 *       G            g
                 *      / \          / \
                 *     p   u  -->   P   U
                 *    /            /
                 *   n            n
                 *
                 * g's parent might be red, so carry on from g.
                 */
                trace!("insert fixup: red uncle under key {}", self.node(grandparent).key);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.side(node, parent) != parent_side {
                /*
                 * Triangle: straighten it by rotating at the parent.
                 *
                 *      G             G
                 *     / \           / \
                 *    p   U  -->    n   U
                 *     \           /
                 *      n         p
                 *
                 * The old parent is now the lower red node of a line.
                 */
                trace!("insert fixup: triangle at key {}", self.node(parent).key);
                self.rotate(parent, parent_side);
                mem::swap(&mut node, &mut parent);
            }

            /*
             * Line: rotate the grandparent away from the red pair.
             *
             *        G           P
             *       / \         / \
             *      p   U  -->  n   g
             *     /                 \
             *    n                   U
             */
            trace!("insert fixup: line at key {}", self.node(grandparent).key);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            return;
        }
    }

    /// Unlinks the node with `id` from the tree and returns its arena slot
    /// id, which may differ from `id`: a node with two children swaps its
    /// entry with its in-order predecessor and the predecessor's slot is the
    /// one spliced out.
    pub(crate) fn unlink(&mut self, id: NodeId) -> NodeId {
        let mut target = id;
        let node = self.node(id);
        if let (Some(left), Some(_)) = (node.left, node.right) {
            let predecessor = self.outermost(left, Direction::Right);
            if let Some((a, b)) = self.nodes.get2_mut(id.0, predecessor.0) {
                mem::swap(&mut a.key, &mut b.key);
                mem::swap(&mut a.value, &mut b.value);
            }
            trace!(
                "promoted predecessor key {} into slot {}",
                self.node(id).key,
                id.0
            );
            target = predecessor;
        }

        // The target has at most one child now.
        let node = self.node(target);
        let child = node.left.or(node.right);
        if self.is_black(Some(target)) {
            self.erase_fixup(target);
        }
        self.replace_subtree(target, child);
        if let Some(child) = child {
            if self.parent(target).is_none() {
                self.set_color(child, Color::Black);
            }
        }

        let node = self.node_mut(target);
        node.parent = None;
        node.left = None;
        node.right = None;
        target
    }

    /// Restores black-height uniformity before the black `node` (with at
    /// most one child) is spliced out of the tree.
    fn erase_fixup(&mut self, mut node: NodeId) {
        loop {
            /*
             * Loop invariant: every path through node will end up one black
             * node short of the paths through its sibling.
             */
            let Some(parent) = self.parent(node) else {
                return;
            };
            let side = self.side(node, parent);
            let outer = side.opposite();
            let Some(mut sibling) = self.child(parent, outer) else {
                return;
            };

            if self.is_red(Some(sibling)) {
                /*
                 * Red sibling: rotate at the parent towards node.
                 *
                 *     P               S
                 *    / \             / \
                 *   N   s    -->    p   Sr
                 *      / \         / \
                 *     Sl  Sr      N   Sl
                 */
                trace!("erase fixup: red sibling of key {}", self.node(node).key);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                let Some(next) = self.child(parent, outer) else {
                    return;
                };
                sibling = next;
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, outer);
            let nephews_black = self.is_black(near) && self.is_black(far);

            if nephews_black && self.is_black(Some(parent)) {
                /*
                 * All black: flip the sibling and carry on from the parent.
                 *
                 *     P             P
                 *    / \           / \
                 *   N   S    -->  N   s
                 *      / \           / \
                 *     Sl  Sr        Sl  Sr
                 */
                trace!("erase fixup: black family at key {}", self.node(parent).key);
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if nephews_black {
                /*
                 * Red parent: swap colors with the sibling.
                 *
                 *    p             P
                 *   / \           / \
                 *  N   S    -->  N   s
                 */
                trace!("erase fixup: red parent at key {}", self.node(parent).key);
                self.set_color(sibling, Color::Red);
                self.set_color(parent, Color::Black);
                return;
            }

            if self.is_black(far) {
                if let Some(near) = near {
                    /*
                     * Near nephew red: rotate it up into the sibling's place.
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   Sl
                     *     / \              \
                     *    sl  Sr             s
                     *                        \
                     *                         Sr
                     */
                    trace!("erase fixup: near nephew key {}", self.node(near).key);
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate(sibling, outer);
                    sibling = near;
                }
            }

            /*
             * Far nephew red: rotate at the parent and recolor.
             *
             *      (p)             (s)
             *      / \             / \
             *     N   S     -->   P   Sr
             *        / \         / \
             *      (sl) sr      N  (sl)
             */
            trace!("erase fixup: far nephew under key {}", self.node(sibling).key);
            let parent_color = self.color(Some(parent));
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            if let Some(far) = self.child(sibling, outer) {
                self.set_color(far, Color::Black);
            }
            self.rotate(parent, side);
            return;
        }
    }
}
