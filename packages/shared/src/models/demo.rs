use serde::{Deserialize, Serialize};

/// A practice session handed back by `POST /start-demo`. Nothing about it is stored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSession {
    pub session_id: String,
    pub speed: String,
    pub minutes: i64,
    pub increment: i64,
}
