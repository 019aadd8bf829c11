use sea_orm::{DbErr, SqlErr};

/// Storage-level constraint that rejected a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

/// Classify a `DbErr` raised by an insert/update. `None` for anything that is not a
/// constraint violation.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(msg) => Some(ConstraintViolation::Unique(msg)),
        SqlErr::ForeignKeyConstraintViolation(msg) => Some(ConstraintViolation::ForeignKey(msg)),
        _ => None,
    }
}
