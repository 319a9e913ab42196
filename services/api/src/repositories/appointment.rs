//! PostgreSQL-backed appointment repositories

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::{AppointmentRepository, AppointmentTypeRepository};
use crate::models::{Appointment, AppointmentType, NewAppointment, SearchField};

const APPOINTMENT_COLUMNS: &str = "id, clinic, doctor, appttype, datetime, created_at, updated_at";

fn appointment_from_row(row: &PgRow) -> Appointment {
    Appointment {
        id: row.get("id"),
        clinic: row.get("clinic"),
        doctor: row.get("doctor"),
        appttype: row.get("appttype"),
        datetime: row.get("datetime"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Appointment repository over the `appointments` table
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    /// Create a new appointment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn list(&self) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM appointments ORDER BY created_at, id",
            APPOINTMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(appointment_from_row).collect())
    }

    async fn create(&self, appointment: &NewAppointment) -> DatabaseResult<Appointment> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO appointments (id, clinic, doctor, appttype, datetime, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {}
            "#,
            APPOINTMENT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&appointment.clinic)
        .bind(&appointment.doctor)
        .bind(appointment.appttype)
        .bind(&appointment.datetime)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(appointment_from_row(&row))
    }

    async fn update(
        &self,
        id: Uuid,
        appointment: &NewAppointment,
    ) -> DatabaseResult<Option<Appointment>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE appointments
            SET clinic = $2, doctor = $3, appttype = $4, datetime = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            APPOINTMENT_COLUMNS
        ))
        .bind(id)
        .bind(&appointment.clinic)
        .bind(&appointment.doctor)
        .bind(appointment.appttype)
        .bind(&appointment.datetime)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(row.as_ref().map(appointment_from_row))
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_field(
        &self,
        field: SearchField,
        needle: &str,
    ) -> DatabaseResult<Vec<Appointment>> {
        // POSITION matches the needle literally, unlike LIKE patterns
        let rows = sqlx::query(&format!(
            r#"
            SELECT {columns}
            FROM appointments
            WHERE POSITION(LOWER($1) IN LOWER({column})) > 0
            ORDER BY created_at, id
            "#,
            columns = APPOINTMENT_COLUMNS,
            column = field.column(),
        ))
        .bind(needle)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(appointment_from_row).collect())
    }

    async fn find_by_type(&self, type_id: Uuid) -> DatabaseResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM appointments WHERE appttype = $1 ORDER BY created_at, id",
            APPOINTMENT_COLUMNS
        ))
        .bind(type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(appointment_from_row).collect())
    }
}

/// Appointment type catalog over the `appointment_types` table
#[derive(Clone)]
pub struct PgAppointmentTypeRepository {
    pool: PgPool,
}

impl PgAppointmentTypeRepository {
    /// Create a new appointment type repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert catalog entries that do not exist yet; existing names keep their identity
    pub async fn seed(&self, names: &[String]) -> DatabaseResult<()> {
        for name in names {
            sqlx::query(
                r#"
                INSERT INTO appointment_types (id, name)
                VALUES ($1, $2)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;
        }

        info!("Appointment type catalog seeded with {} names", names.len());
        Ok(())
    }
}

#[async_trait]
impl AppointmentTypeRepository for PgAppointmentTypeRepository {
    async fn list_types(&self) -> DatabaseResult<Vec<AppointmentType>> {
        sqlx::query_as::<_, AppointmentType>("SELECT id, name FROM appointment_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn find_type_by_name(&self, name: &str) -> DatabaseResult<Option<AppointmentType>> {
        sqlx::query_as::<_, AppointmentType>(
            "SELECT id, name FROM appointment_types WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
