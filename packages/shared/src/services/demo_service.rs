use uuid::Uuid;

use crate::models::demo::DemoSession;
use crate::services::errors::demo_service_errors::DemoServiceError;

pub const DEMO_SPEEDS: [&str; 3] = ["bullet", "blitz", "rapid"];

/// Hands out a practice session id for a time control. Nothing is stored and
/// no engine is attached.
pub fn start_demo(speed: &str, minutes: i64, increment: i64) -> Result<DemoSession, DemoServiceError> {
    if !DEMO_SPEEDS.contains(&speed) {
        return Err(DemoServiceError::InvalidSpeed);
    }
    if minutes < 0 || increment < 0 {
        return Err(DemoServiceError::InvalidTimeValues);
    }

    Ok(DemoSession {
        session_id: Uuid::new_v4().to_string(),
        speed: speed.to_string(),
        minutes,
        increment,
    })
}
