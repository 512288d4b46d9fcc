use crate::DbError;
use crate::row::decode_row;
use core_types::{Reservation, ReservationInput, Value};
use sqlx::postgres::PgPool;

const SELECT_AUDIT_RECORDS: &str = "SELECT * FROM public.auditoria";

const SELECT_RESERVATIONS: &str = "SELECT id, fecha, hora, estado, detalle, usuario_responsable, numero_mesa FROM public.reservas";

const INSERT_RESERVATION: &str = r#"
    INSERT INTO public.reservas (fecha, hora, estado, detalle, usuario_responsable, numero_mesa)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, fecha, hora, estado, detalle, usuario_responsable, numero_mesa
"#;

const UPDATE_RESERVATION: &str = r#"
    UPDATE public.reservas
    SET fecha = $1, hora = $2, estado = $3, detalle = $4, usuario_responsable = $5, numero_mesa = $6
    WHERE id = $7
    RETURNING id, fecha, hora, estado, detalle, usuario_responsable, numero_mesa
"#;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Every method checks a connection out of the pool for the duration of the
/// call; it goes back to the pool (open) when the call returns.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        crate::connection::ping(&self.pool).await
    }

    /// Fetches every row of the audit table, whatever its columns are.
    pub async fn list_audit_records(&self) -> Result<Vec<Value>, DbError> {
        let rows = sqlx::query(SELECT_AUDIT_RECORDS)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(decode_row).collect()
    }

    /// Fetches all reservations in storage order.
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, DbError> {
        let reservations = sqlx::query_as::<_, Reservation>(SELECT_RESERVATIONS)
            .fetch_all(&self.pool)
            .await?;
        Ok(reservations)
    }

    /// Inserts a reservation and returns the stored row.
    ///
    /// Fails with `DbError::SlotTaken` when the table is already booked for
    /// that date and time; nothing is written in that case.
    pub async fn create_reservation(
        &self,
        input: &ReservationInput,
    ) -> Result<Reservation, DbError> {
        let reservation = sqlx::query_as::<_, Reservation>(INSERT_RESERVATION)
            .bind(input.fecha)
            .bind(input.hora)
            .bind(&input.estado)
            .bind(&input.detalle)
            .bind(&input.usuario_responsable)
            .bind(input.numero_mesa)
            .fetch_one(&self.pool)
            .await?;
        Ok(reservation)
    }

    /// Overwrites the six mutable fields of reservation `id`.
    ///
    /// The slot constraint ignores the row being updated, so saving a
    /// reservation onto its own slot succeeds.
    pub async fn update_reservation(
        &self,
        id: i32,
        input: &ReservationInput,
    ) -> Result<Reservation, DbError> {
        sqlx::query_as::<_, Reservation>(UPDATE_RESERVATION)
            .bind(input.fecha)
            .bind(input.hora)
            .bind(&input.estado)
            .bind(&input.detalle)
            .bind(&input.usuario_responsable)
            .bind(input.numero_mesa)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Deletes reservation `id` and marks its table available again.
    ///
    /// Both statements run in one transaction. Returns the freed table
    /// number. `DbError::NotFound` when the reservation does not exist.
    pub async fn delete_reservation(&self, id: i32) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let numero_mesa: i32 =
            sqlx::query_scalar("SELECT numero_mesa FROM public.reservas WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(DbError::NotFound)?;

        let deleted: Option<i32> =
            sqlx::query_scalar("DELETE FROM public.reservas WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if deleted.is_some() {
            sqlx::query("UPDATE public.mesas SET disponible = TRUE WHERE numero_mesa = $1")
                .bind(numero_mesa)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(numero_mesa)
    }

    /// Reads the availability flag of a table. `None` if the table is unknown.
    pub async fn table_availability(&self, numero_mesa: i32) -> Result<Option<bool>, DbError> {
        let disponible =
            sqlx::query_scalar("SELECT disponible FROM public.mesas WHERE numero_mesa = $1")
                .bind(numero_mesa)
                .fetch_optional(&self.pool)
                .await?;
        Ok(disponible)
    }
}
