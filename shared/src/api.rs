use serde::{Deserialize, Serialize};

use crate::models::{InterviewSlot, SlotError};

// ============================================================================
// Service API Types
// ============================================================================

/// Interview date as stored by the back end: loosely typed strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterviewDate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

impl RawInterviewDate {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Both fields filled in (not necessarily well-formed)
    pub fn is_complete(&self) -> bool {
        !self.date.trim().is_empty() && !self.time.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub original_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_name: String,
    /// Rich-text HTML produced by the admin editor
    #[serde(default)]
    pub description: String,
    /// URL of the cover image
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub documents: Vec<ServiceDocument>,
    #[serde(default)]
    pub interview_dates: Vec<RawInterviewDate>,
}

impl ServiceResponse {
    /// Convert the wire interview dates into validated slots, in supplied order.
    pub fn interview_slots(&self) -> Result<Vec<InterviewSlot>, SlotError> {
        self.interview_dates
            .iter()
            .map(InterviewSlot::try_from)
            .collect()
    }

    /// Case-insensitive substring search over name and description.
    /// An empty term matches every service.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.service_name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }

    /// Path of the download endpoint for one of this service's documents
    pub fn document_path(&self, document: &ServiceDocument) -> String {
        format!("/api/service/{}/download/{}", self.id, document.id)
    }
}

// ============================================================================
// Booking API Types
// ============================================================================

/// Payload handed to the booking submission once the form validates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_id: String,
    pub name: String,
    pub email: String,
    pub cv_file_name: String,
    pub interview_at: chrono::NaiveDateTime,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}
