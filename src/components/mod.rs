//! Graph components
//!
//! Nodes, edges and fetched neighborhoods as held by the explorer.
//! Components carry the data; the store and controller own the behavior.

pub mod edge;
pub mod neighborhood;
pub mod node;

pub use edge::CompanyEdge;
pub use neighborhood::Neighborhood;
pub use node::CompanyNode;
