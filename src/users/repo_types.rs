use serde::Serialize;
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,            // generated by the store, never reassigned
    pub name: String,
    pub department: String,
    pub email: String,
}
