use diesel::connection::SimpleConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rocket::fairing::AdHoc;
use rocket_sync_db_pools::{database, diesel};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[database("sqlite_db")]
pub struct DbConn(diesel::SqliteConnection);

/// Enables foreign key support on a SQLite connection.
///
/// Foreign keys are off by default in SQLite. Pooled `DbConn` connections
/// already have them switched on by the pool; this is for connections
/// opened directly, such as the in-memory databases used by tests.
pub fn set_foreign_keys(conn: &mut diesel::SqliteConnection) -> diesel::QueryResult<()> {
    conn.batch_execute("PRAGMA foreign_keys = ON")
}

/// Creates a Rocket fairing that checks out one pooled connection on
/// ignition and sets the foreign key PRAGMA on it.
///
/// Ignition is aborted if no connection can be checked out or the PRAGMA
/// fails.
pub fn set_foreign_keys_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Set Foreign Keys", |rocket| async {
        let Some(conn) = DbConn::get_one(&rocket).await else {
            error!("No database connection available to enable foreign keys");
            return Err(rocket);
        };
        match conn.run(set_foreign_keys).await {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("Failed to enable foreign keys: {}", e);
                Err(rocket)
            }
        }
    })
}

/// Runs all pending database migrations on the provided connection.
pub fn run_pending_migrations(conn: &mut diesel::SqliteConnection) -> diesel::migration::Result<()> {
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        info!("Applied migration {}", version);
    }
    Ok(())
}

/// Creates a Rocket fairing that runs database migrations on ignition.
pub fn run_migrations_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Diesel Migrations", |rocket| async {
        let Some(conn) = DbConn::get_one(&rocket).await else {
            error!("No database connection available for migrations");
            return Err(rocket);
        };
        let outcome = conn
            .run(|c| run_pending_migrations(c).map_err(|e| e.to_string()))
            .await;
        match outcome {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("Failed to run migrations: {}", e);
                Err(rocket)
            }
        }
    })
}
