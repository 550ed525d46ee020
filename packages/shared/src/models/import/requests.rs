use serde::{Deserialize, Serialize};

pub const DEFAULT_MONTHS: u32 = 1;
pub const MAX_MONTHS: u32 = 12;
pub const DEFAULT_IMPORT_LIMIT: u32 = 50;
pub const MAX_IMPORT_LIMIT: u32 = 1000;

/// Body of an import call. `months` only applies to chess.com.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportRequest {
    pub username: String,
    #[serde(default)]
    pub months: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ImportRequest {
    pub fn new(username: &str) -> Self {
        ImportRequest {
            username: username.to_string(),
            months: None,
            limit: None,
        }
    }

    pub fn with_months(mut self, months: u32) -> Self {
        self.months = Some(months);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn months_or_default(&self) -> u32 {
        self.months.unwrap_or(DEFAULT_MONTHS)
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_IMPORT_LIMIT)
    }
}
