//! # Graph Model
//!
//! Plain data that crosses every boundary: storage ↔ resolver ↔ overlay ↔
//! renderer. No I/O, no locks, no async in here.

pub mod node;
pub mod edge;
pub mod chain;

pub use node::{Node, NodeId};
pub use edge::Edge;
pub use chain::{Chain, Termination, ARROW};
