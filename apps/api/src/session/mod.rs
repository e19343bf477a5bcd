// Run session: the in-memory lifecycle of one analysis run and its export.
// A single transition function drives the state; readers only ever see snapshots.

pub mod state;
pub mod store;

pub use state::{RunEvent, RunState};
pub use store::SessionStore;
