use serde::{Deserialize, Serialize};

use crate::models::game::StoredGame;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamesResponse {
    pub count: usize,
    pub items: Vec<StoredGame>,
}
