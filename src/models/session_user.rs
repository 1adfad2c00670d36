use serde::{Deserialize, Serialize};

/// Display-only record of the signed-in identity. Created at login, removed at
/// logout; not linked to any inventory data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub warehouse: String,
}
