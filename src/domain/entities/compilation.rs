//! Curated event compilation.

use super::EventDetails;

/// A curated group of events, optionally pinned to the main page.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Compilation {
    pub id: i64,
    pub title: String,
    pub pinned: bool,
}

/// A compilation together with its member events.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationDetails {
    pub compilation: Compilation,
    pub events: Vec<EventDetails>,
}

/// Input data for creating a compilation.
#[derive(Debug, Clone)]
pub struct NewCompilation {
    pub title: String,
    pub pinned: bool,
    pub event_ids: Vec<i64>,
}
