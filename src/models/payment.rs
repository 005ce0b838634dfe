use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Receipt for one successful `pay` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            paid_at: Utc::now(),
        }
    }
}
