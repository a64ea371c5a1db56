//! Vlogger feature models (media coverage of a restaurant).

use serde::{Deserialize, Serialize};

/// Kind of embedded media a vlogger feature points at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Image,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Image => "image",
            ContentType::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "image" => Some(ContentType::Image),
            "video" => Some(ContentType::Video),
            _ => None,
        }
    }
}

/// A piece of vlogger coverage attached to a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VloggerFeature {
    pub id: String,
    pub restaurant_id: String,
    pub vlogger_name: String,
    pub content_type: ContentType,
    pub content_url: String,
    pub feature_date: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    /// Joined in for the admin listing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

/// Request body for creating a vlogger feature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVloggerFeatureRequest {
    pub restaurant_id: String,
    pub vlogger_name: String,
    pub content_type: ContentType,
    pub content_url: String,
    pub feature_date: String,
    pub platform: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating a vlogger feature. Absent fields keep their value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVloggerFeatureRequest {
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub vlogger_name: Option<String>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub feature_date: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
