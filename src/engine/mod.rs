//! The offset-chain compiler and per-instance resolution state.
//! Declaration-time work (`chain`) is kept separate from instance-time
//! work (`state`): a structure's chains compile once and are shared by
//! every record built from it, while each record gets its own mutable
//! resolution cache.
pub mod chain;
pub mod state;

pub use chain::{compile_chains, Chain, ChainStep};
pub use state::State;

/// Index of a field within its declaring [`crate::structure::Configuration`].
/// Lookup by index rather than by name keeps per-instance memoization
/// cache-friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub u32);
