use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A broken structural property, as reported by
/// [`OrderedIndex::validate`](crate::OrderedIndex::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("root key {key} is red")]
    RedRoot { key: i64 },

    #[error("red key {parent} has red child {child}")]
    RedChildOfRed { parent: i64, child: i64 },

    #[error("black height under key {key} differs: left {left}, right {right}")]
    BlackHeightMismatch { key: i64, left: usize, right: usize },

    #[error("key {key} is out of order below key {ancestor}")]
    OutOfOrder { key: i64, ancestor: i64 },

    #[error("key {key} does not link back to its parent")]
    BrokenParentLink { key: i64 },

    #[error("length is {len} but {reachable} nodes are reachable and {allocated} allocated")]
    LengthMismatch {
        len: usize,
        reachable: usize,
        allocated: usize,
    },
}
