//! Explorer command handling
//!
//! `ExplorerState` owns the graph store, the ownership index and the view
//! settings. `GraphExplorer` processes commands against it, fetching through
//! a `NetworkSource`, and returns the events each command produced.

mod explorer;
mod state;

pub use explorer::GraphExplorer;
pub use state::ExplorerState;
