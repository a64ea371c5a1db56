//! Vote models shared by the food and restaurant vote tables.

use serde::{Deserialize, Serialize};

/// Request body for casting a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub liked: bool,
}

/// Aggregated tally for one food or restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteCount {
    pub likes: i64,
    pub dislikes: i64,
}
