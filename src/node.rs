use log::trace;

use crate::{Color, Direction, Node, NodeId, OrderedIndex};

impl<V> Node<V> {
    /// New nodes are always red; the insertion fixup decides otherwise.
    pub(crate) fn new(key: i64, value: V, parent: Option<NodeId>) -> Self {
        Node {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

// Arena access and navigation.
impl<V> OrderedIndex<V> {
    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.0]
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, key: i64, value: V, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.insert(Node::new(key, value, parent)));
        trace!("allocated node for key {key} in slot {}", id.0);
        id
    }

    /// Takes the node out of the arena. The caller must already have
    /// unlinked it from its parent and children.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<V> {
        let node = self.nodes.remove(id.0);
        trace!("released node for key {} from slot {}", node.key, id.0);
        node
    }

    /// Nil leaves count as black.
    #[inline(always)]
    pub(crate) fn is_black(&self, id: Option<NodeId>) -> bool {
        id.is_none_or(|id| self.node(id).color == Color::Black)
    }

    #[inline(always)]
    pub(crate) fn is_red(&self, id: Option<NodeId>) -> bool {
        !self.is_black(id)
    }

    #[inline(always)]
    pub(crate) fn color(&self, id: Option<NodeId>) -> Color {
        if self.is_black(id) {
            Color::Black
        } else {
            Color::Red
        }
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    #[inline(always)]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline(always)]
    pub(crate) fn child(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.node(id).child(direction)
    }

    #[inline(always)]
    pub(crate) fn set_child(&mut self, id: NodeId, direction: Direction, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match direction {
            Direction::Left => node.left = child,
            Direction::Right => node.right = child,
        }
    }

    /// The slot of `parent` that `id` occupies.
    #[inline(always)]
    pub(crate) fn side(&self, id: NodeId, parent: NodeId) -> Direction {
        if self.node(parent).left == Some(id) {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub(crate) fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        self.child(parent, self.side(id, parent).opposite())
    }

    /// Follows `direction` from `id` for as long as there is a child.
    pub(crate) fn outermost(&self, mut id: NodeId, direction: Direction) -> NodeId {
        while let Some(next) = self.child(id, direction) {
            id = next;
        }
        id
    }

    pub(crate) fn first_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.outermost(root, Direction::Left))
    }

    pub(crate) fn last_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.outermost(root, Direction::Right))
    }

    /// In-order successor of `id`.
    pub(crate) fn next_node(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Right)
    }

    /// In-order predecessor of `id`.
    pub(crate) fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Left)
    }

    fn step(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        // If we have a child on that side, go down once and then as far as we
        // can the other way.
        if let Some(child) = self.child(id, direction) {
            return Some(self.outermost(child, direction.opposite()));
        }
        // Otherwise go up the tree. Any time the ancestor hangs from the
        // `direction` side of its parent, keep going up. The first time it
        // does not, said parent is the answer.
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if self.side(current, parent) != direction {
                return Some(parent);
            }
            current = parent;
        }
        None
    }
}
