use crate::models::{Role, Turn};

/// Keep only turns that continue a strict `user, assistant, user, ...` sequence
///
/// A turn whose role differs from the expected one is dropped and the expectation stays
/// put, so `[assistant, user, user, assistant]` becomes `[user, assistant]`.
pub fn enforce_alternation(raw: Vec<Turn>) -> Vec<Turn> {
    let mut expecting = Role::User;
    let mut filtered = Vec::with_capacity(raw.len());

    for turn in raw {
        if turn.role == expecting {
            filtered.push(turn);
            expecting = expecting.next();
        }
    }

    filtered
}
