//! Appointment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored appointment
///
/// `datetime` is the validated date and time joined as `YYYY-MM-DDTHH:MM`.
/// It stays text because the validators accept values no calendar type can
/// hold, such as `2024-02-31` or an hour of `24`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub clinic: String,
    pub doctor: String,
    pub appttype: Uuid,
    pub datetime: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated appointment fields, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub clinic: String,
    pub doctor: String,
    pub appttype: Uuid,
    pub datetime: String,
}

/// Appointment type catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AppointmentType {
    pub id: Uuid,
    pub name: String,
}

/// Body of a create or update request
///
/// Every field is optional so that a missing one is reported as incomplete
/// details rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentRequest {
    pub clinic: Option<String>,
    pub doctor: Option<String>,
    pub appttype: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Text field an appointment search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Doctor,
    Clinic,
}

impl SearchField {
    /// Column holding the field
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Doctor => "doctor",
            SearchField::Clinic => "clinic",
        }
    }

    /// Value of the field on an appointment
    pub fn value(self, appointment: &Appointment) -> &str {
        match self {
            SearchField::Doctor => &appointment.doctor,
            SearchField::Clinic => &appointment.clinic,
        }
    }
}
