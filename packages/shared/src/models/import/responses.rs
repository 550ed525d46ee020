use serde::{Deserialize, Serialize};

use crate::models::game::GameSource;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImportResponse {
    pub source: GameSource,
    pub username: String,
    pub inserted: u32,
}
