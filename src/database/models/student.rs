use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Opaque store-assigned identifier.
    pub id: String,
    pub name: String,
    pub genre: String,
    /// Soft reference to a school owned by the school service. Not a
    /// foreign key: deletes over there do not cascade here, and
    /// composite reads must tolerate a missing referent.
    pub school_id: i64,
}

/// Creation payload; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub genre: String,
    pub school_id: i64,
}
