use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub website: String,
}

/// Raw create/replace body; every field is checked by `validation::validate_platform`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlatformPayload {
    pub name: Option<String>,
    #[serde(alias = "about")]
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlatform {
    pub name: String,
    pub description: String,
    pub website: String,
}
