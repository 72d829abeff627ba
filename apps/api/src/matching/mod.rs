// Competency matching engine: profile building, scoring, ranking.
// The engine itself is pure; only `handlers` touches the store.

pub mod handlers;
pub mod profile;
pub mod ranking;
pub mod scorer;
