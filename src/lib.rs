//! Company-network graph explorer
//!
//! Incrementally explores a company's business network: a root company is
//! fetched with its immediate neighbors, any node can be expanded to pull in
//! its own neighborhood, and any expanded node can be collapsed again. Nodes
//! are laid out radially, relation edges can be filtered by type and the
//! ownership path from the root to the selected node is highlighted.

pub mod adapter;
pub mod commands;
pub mod components;
pub mod config;
pub mod domain_events;
pub mod error;
pub mod events;
pub mod handlers;
pub mod layout;
pub mod ownership;
pub mod projections;
pub mod session;
pub mod store;
pub mod value_objects;

pub use domain_events::*;
pub use events::*;

pub use adapter::{HttpNetworkClient, NetworkSource, StaticNetworkSource};
pub use commands::GraphCommand;
pub use components::{CompanyEdge, CompanyNode, Neighborhood};
pub use config::ExplorerConfig;
pub use error::{ExplorerError, ExplorerResult, FetchError};
pub use handlers::{ExplorerState, GraphExplorer};
pub use layout::{LayoutConfig, RadialLayout};
pub use ownership::OwnershipIndex;
pub use projections::{
    ExplorerActivity, FilteredView, GraphProjection, GraphSummary, RenderView, RootPath,
};
pub use session::{Role, Session, ViewStatus};
pub use store::GraphStore;
pub use value_objects::{
    CompanyId, DisplayType, EdgeFilter, EdgeKey, NodeKind, Position2D, RelationType,
};
