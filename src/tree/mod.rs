//! Merkle tree storage, construction and the public handle

pub mod builder;
pub mod handle;
pub mod leaf_store;
pub mod shared;

pub use builder::{CacheKey, Tree, TreeBuilder, TreeState};
pub use handle::MerkleTree;
pub use leaf_store::LeafStore;
pub use shared::SharedMerkleTree;
