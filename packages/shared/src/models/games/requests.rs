use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY_LIMIT: u32 = 50;
pub const MAX_QUERY_LIMIT: u32 = 200;

/// Query string of `GET /games`. Empty strings are treated like absent filters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GamesQuery {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl GamesQuery {
    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_QUERY_LIMIT)
    }
}
