//! Process-local appointment storage
//!
//! Appointments live in a vector behind a `tokio` lock, so they keep their
//! insertion order and concurrent writers are serialized. Update and delete
//! look the record up and change it under one write lock.

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AppointmentRepository, AppointmentTypeRepository};
use crate::models::{Appointment, AppointmentType, NewAppointment, SearchField};

/// Appointments held in memory for the lifetime of the process
#[derive(Clone, Default)]
pub struct InMemoryAppointmentRepository {
    appointments: Arc<RwLock<Vec<Appointment>>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        self.appointments
            .read()
            .await
            .iter()
            .filter(|appointment| predicate(appointment))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn list(&self) -> DatabaseResult<Vec<Appointment>> {
        Ok(self.appointments.read().await.clone())
    }

    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<Appointment> {
        let now = Utc::now();
        let created = Appointment {
            id: Uuid::new_v4(),
            clinic: appointment.clinic.clone(),
            doctor: appointment.doctor.clone(),
            appttype: appointment.appttype,
            datetime: appointment.datetime.clone(),
            created_at: now,
            updated_at: now,
        };

        self.appointments.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        appointment: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;
        let Some(existing) = appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        existing.clinic = appointment.clinic.clone();
        existing.doctor = appointment.doctor.clone();
        existing.appttype = appointment.appttype;
        existing.datetime = appointment.datetime.clone();
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut appointments = self.appointments.write().await;
        let before = appointments.len();
        appointments.retain(|appointment| appointment.id != id);

        Ok(appointments.len() < before)
    }

    async fn find_by_field(
        &self,
        field: SearchField,
        needle: &str,
    ) -> DatabaseResult<Vec<Appointment>> {
        let needle = needle.to_lowercase();
        Ok(self
            .filtered(|appointment| field.value(appointment).to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_type(&self, type_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        Ok(self
            .filtered(|appointment| appointment.appttype == type_id)
            .await)
    }
}

/// Fixed appointment type catalog
#[derive(Clone, Default)]
pub struct InMemoryAppointmentTypeRepository {
    types: Arc<Vec<AppointmentType>>,
}

impl InMemoryAppointmentTypeRepository {
    /// Build a catalog with a fresh identity per name; repeated names are kept once
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types: Vec<AppointmentType> = Vec::new();
        for name in names {
            let name = name.into();
            if types.iter().any(|t| t.name == name) {
                continue;
            }
            types.push(AppointmentType {
                id: Uuid::new_v4(),
                name,
            });
        }

        Self {
            types: Arc::new(types),
        }
    }
}

#[async_trait]
impl AppointmentTypeRepository for InMemoryAppointmentTypeRepository {
    async fn list_types(&self) -> DatabaseResult<Vec<AppointmentType>> {
        Ok(self.types.as_ref().clone())
    }

    async fn find_type_by_name(&self, name: &str) -> DatabaseResult<Option<AppointmentType>> {
        Ok(self.types.iter().find(|t| t.name == name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_appointment(doctor: &str, appttype: Uuid) -> NewAppointment {
        NewAppointment {
            clinic: "Raffles Medical".to_string(),
            doctor: doctor.to_string(),
            appttype,
            datetime: "2024-05-10T09:30".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_keeps_insertion_order() {
        let repo = InMemoryAppointmentRepository::new();
        let type_id = Uuid::new_v4();

        let first = repo
            .create(&new_appointment("Dr. Smith", type_id))
            .await
            .unwrap();
        let second = repo
            .create(&new_appointment("Dr. Tan", type_id))
            .await
            .unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = InMemoryAppointmentRepository::new();
        let created = repo
            .create(&new_appointment("Dr. Smith", Uuid::new_v4()))
            .await
            .unwrap();

        let changes = NewAppointment {
            datetime: "2024-06-01T14:00".to_string(),
            ..new_appointment("Dr. Lim", Uuid::new_v4())
        };
        let updated = repo.update(created.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.doctor, "Dr. Lim");
        assert_eq!(updated.datetime, "2024-06-01T14:00");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_of_unknown_id() {
        let repo = InMemoryAppointmentRepository::new();
        repo.create(&new_appointment("Dr. Smith", Uuid::new_v4()))
            .await
            .unwrap();

        let unknown = Uuid::new_v4();
        assert!(
            repo.update(unknown, &new_appointment("Dr. Lim", Uuid::new_v4()))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!repo.delete(unknown).await.unwrap());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryAppointmentRepository::new();
        let created = repo
            .create(&new_appointment("Dr. Smith", Uuid::new_v4()))
            .await
            .unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_search_is_case_insensitive_substring() {
        let repo = InMemoryAppointmentRepository::new();
        let type_id = Uuid::new_v4();
        repo.create(&new_appointment("Dr. Smith", type_id))
            .await
            .unwrap();
        repo.create(&new_appointment("Dr. Tan", type_id))
            .await
            .unwrap();

        for needle in ["smith", "SMITH", "Smi"] {
            let found = repo
                .find_by_field(SearchField::Doctor, needle)
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "needle {}", needle);
            assert_eq!(found[0].doctor, "Dr. Smith");
        }

        let by_clinic = repo
            .find_by_field(SearchField::Clinic, "raffles")
            .await
            .unwrap();
        assert_eq!(by_clinic.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_type() {
        let repo = InMemoryAppointmentRepository::new();
        let vaccination = Uuid::new_v4();
        repo.create(&new_appointment("Dr. Smith", vaccination))
            .await
            .unwrap();
        repo.create(&new_appointment("Dr. Tan", Uuid::new_v4()))
            .await
            .unwrap();

        let found = repo.find_by_type(vaccination).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].appttype, vaccination);
    }

    #[tokio::test]
    async fn test_type_catalog_lookup_is_exact() {
        let types = InMemoryAppointmentTypeRepository::with_names([
            "Vaccination",
            "Follow-up",
            "Vaccination",
        ]);

        assert_eq!(types.list_types().await.unwrap().len(), 2);
        assert!(
            types
                .find_type_by_name("Vaccination")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            types
                .find_type_by_name("vaccination")
                .await
                .unwrap()
                .is_none()
        );
    }
}
