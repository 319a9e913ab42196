//! Application state shared across handlers

use auth::{
    CredentialService, TokenService,
    repositories::{InMemoryUserRepository, PgUserRepository},
};
use common::error::DatabaseResult;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{
    AppointmentRepository, AppointmentTypeRepository, InMemoryAppointmentRepository,
    InMemoryAppointmentTypeRepository, PgAppointmentRepository, PgAppointmentTypeRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub appointments: Arc<dyn AppointmentRepository>,
    pub appointment_types: Arc<dyn AppointmentTypeRepository>,
    pub credentials: CredentialService,
}

impl AppState {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        appointment_types: Arc<dyn AppointmentTypeRepository>,
        credentials: CredentialService,
    ) -> Self {
        Self {
            appointments,
            appointment_types,
            credentials,
        }
    }

    /// State whose stores all live in process memory
    pub fn in_memory(appointment_types: &[String], tokens: TokenService) -> Self {
        Self::new(
            Arc::new(InMemoryAppointmentRepository::new()),
            Arc::new(InMemoryAppointmentTypeRepository::with_names(
                appointment_types.iter().cloned(),
            )),
            CredentialService::new(Arc::new(InMemoryUserRepository::new()), tokens),
        )
    }

    /// State backed by PostgreSQL; seeds the type catalog before returning
    pub async fn postgres(
        pool: PgPool,
        appointment_types: &[String],
        tokens: TokenService,
    ) -> DatabaseResult<Self> {
        let types = PgAppointmentTypeRepository::new(pool.clone());
        types.seed(appointment_types).await?;

        Ok(Self::new(
            Arc::new(PgAppointmentRepository::new(pool.clone())),
            Arc::new(types),
            CredentialService::new(Arc::new(PgUserRepository::new(pool)), tokens),
        ))
    }
}
