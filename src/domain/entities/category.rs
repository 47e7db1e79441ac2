//! Event category.

/// A category events are filed under. Names are unique; a category cannot be
/// deleted while any event references it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
