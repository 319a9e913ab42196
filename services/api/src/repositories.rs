//! Appointment and appointment type storage
//!
//! Handlers only see the two traits below. Each backing store implements
//! both: [`memory`] keeps everything in the process, [`appointment`] talks to
//! PostgreSQL.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentType, NewAppointment, SearchField};

pub mod appointment;
pub mod memory;

pub use appointment::{PgAppointmentRepository, PgAppointmentTypeRepository};
pub use memory::{InMemoryAppointmentRepository, InMemoryAppointmentTypeRepository};

/// Store for appointment records
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Every appointment, oldest first
    async fn list(&self) -> DatabaseResult<Vec<Appointment>>;

    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<Appointment>;

    /// Overwrite an appointment's fields; `None` when the id is unknown
    async fn update(
        &self,
        id: Uuid,
        appointment: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>>;

    /// Remove an appointment; `false` when the id is unknown
    async fn delete(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Appointments whose field contains `needle`, ignoring case
    async fn find_by_field(
        &self,
        field: SearchField,
        needle: &str,
    ) -> DatabaseResult<Vec<Appointment>>;

    /// Appointments referencing an appointment type
    async fn find_by_type(&self, type_id: Uuid) -> DatabaseResult<Vec<Appointment>>;
}

/// Read-only view of the appointment type catalog
#[async_trait]
pub trait AppointmentTypeRepository: Send + Sync {
    async fn list_types(&self) -> DatabaseResult<Vec<AppointmentType>>;

    /// Resolve a type by its exact name
    async fn find_type_by_name(&self, name: &str) -> DatabaseResult<Option<AppointmentType>>;
}
