use thiserror::Error;

/// Unique constraint over `(fecha, hora, numero_mesa)` on `reservas`.
pub const SLOT_CONSTRAINT: &str = "reservas_slot_key";
/// Foreign key from `reservas.numero_mesa` to `mesas`.
pub const TABLE_FK_CONSTRAINT: &str = "reservas_numero_mesa_fkey";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("The table already has a reservation for that date and time.")]
    SlotTaken,

    #[error("The referenced table does not exist.")]
    UnknownTable,
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.constraint() {
                Some(SLOT_CONSTRAINT) if db_err.is_unique_violation() => return Self::SlotTaken,
                Some(TABLE_FK_CONSTRAINT) if db_err.is_foreign_key_violation() => {
                    return Self::UnknownTable;
                }
                _ => {}
            }
        }
        Self::QueryError(e)
    }
}
