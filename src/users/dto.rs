use serde::{Deserialize, Deserializer, Serialize};

/// Request body for create and update. Absent or `null` fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const UPDATED: Self = Self {
        message: "User updated",
    };
    pub const DELETED: Self = Self {
        message: "User deleted",
    };
}
