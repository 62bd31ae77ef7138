//! Database connection utilities.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use taleweaver_error::{PersistenceError, PersistenceErrorKind, TaleweaverResult};

/// Shared r2d2 connection pool over Postgres.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Build a connection pool for the given database URL.
///
/// # Errors
///
/// Returns an error if the pool cannot be initialized (bad URL, unreachable
/// database).
pub fn establish_pool(database_url: &str) -> TaleweaverResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().build(manager).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::Connection(e.to_string()))
    })?;
    Ok(pool)
}

/// Build a connection pool from the `DATABASE_URL` environment variable.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is not set or the pool cannot be
/// initialized.
pub fn pool_from_env() -> TaleweaverResult<PgPool> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        PersistenceError::new(PersistenceErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;
    establish_pool(&database_url)
}
