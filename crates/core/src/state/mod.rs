//! Observable view-state shared by every screen.
//!
//! - [`RemoteState`]: the closed set of states a loaded value can be in
//! - [`StateHolder`]: publishes a `RemoteState` through a `watch` channel, plus toast-style
//!   [`Notice`]s through a `broadcast` channel
//! - [`RemoteList`]: a list fetched from a [`ListSource`], with optimistic single-record
//!   mutation and rollback
//! - [`RemoteMutation`]: the outcome of a create / update / delete / login submission
//!
//! Nothing here retries. A failed load stays failed until the user asks for a reload.

mod holder;
mod list;
mod mutation;
mod remote;

pub use holder::{Identified, StateHolder};
pub use list::{ListSource, RemoteList};
pub use mutation::{MutationState, RemoteMutation};
pub use remote::{Failure, Notice, RemoteState};
