//! Conversation linearization
//!
//! Turns one conversation's message tree into a flat, strictly alternating list of turns:
//!
//! 1. **Spine walk** ([`walk_spine`]): start at the first child of the fixed root node and
//!    keep following the *first* child only. Regenerated or edited branches hang off later
//!    child slots and are discarded; this is a deliberate first-child-only policy, not an
//!    oversight.
//! 2. **Filtering**: only `user` and `assistant` messages with non-blank text become raw
//!    turns. Blank turns never take an alternation slot.
//! 3. **Alternation** ([`enforce_alternation`]): keep turns that match the expected role,
//!    starting with `user`; out-of-turn messages are dropped for good.

pub mod alternation;
pub mod linearize;

pub use alternation::enforce_alternation;
pub use linearize::{linearize, walk_spine};
