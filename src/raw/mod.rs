mod arena;
mod handle;
mod node;

pub(crate) use arena::Arena;
pub(crate) use handle::NodeId;
pub(crate) use node::TreeNode;
