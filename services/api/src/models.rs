//! API models for request and response payloads

use serde::Serialize;
use uuid::Uuid;

pub mod appointment;

pub use appointment::{
    Appointment, AppointmentRequest, AppointmentType, NewAppointment, SearchField,
};

/// Acknowledgment describing what a write did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteResult {
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
}

impl WriteResult {
    fn acknowledged() -> Self {
        Self {
            acknowledged: true,
            inserted_id: None,
            matched_count: None,
            modified_count: None,
            deleted_count: None,
        }
    }

    pub fn inserted(id: Uuid) -> Self {
        Self {
            inserted_id: Some(id),
            ..Self::acknowledged()
        }
    }

    pub fn updated(count: u64) -> Self {
        Self {
            matched_count: Some(count),
            modified_count: Some(count),
            ..Self::acknowledged()
        }
    }

    pub fn deleted(count: u64) -> Self {
        Self {
            deleted_count: Some(count),
            ..Self::acknowledged()
        }
    }
}

/// Response for a create, update or delete
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub message: &'static str,
    pub result: WriteResult,
}

/// Response for listing and searching appointments
#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

/// Response for listing the appointment type catalog
#[derive(Debug, Serialize)]
pub struct AppointmentTypeListResponse {
    pub appointment_types: Vec<AppointmentType>,
}

/// Response for user registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub result: WriteResult,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_result_omits_unused_counts() {
        let id = Uuid::new_v4();

        assert_eq!(
            serde_json::to_value(WriteResult::inserted(id)).unwrap(),
            json!({ "acknowledged": true, "inserted_id": id })
        );
        assert_eq!(
            serde_json::to_value(WriteResult::updated(1)).unwrap(),
            json!({ "acknowledged": true, "matched_count": 1, "modified_count": 1 })
        );
        assert_eq!(
            serde_json::to_value(WriteResult::deleted(1)).unwrap(),
            json!({ "acknowledged": true, "deleted_count": 1 })
        );
    }
}
