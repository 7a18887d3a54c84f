use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::{Build, Rocket, fairing::AdHoc};
use rocket_sync_db_pools::diesel;

use super::db::{
    DbConn, run_migrations_fairing, run_pending_migrations, set_foreign_keys,
    set_foreign_keys_fairing,
};
use crate::models::{CompanyInput, InvoiceInput};
use crate::orm::company::{get_company_by_code, insert_company};
use crate::orm::invoice::insert_invoice;

/// Code of the company every test database starts with.
pub const TEST_COMPANY_CODE: &str = "test-company";

/// Configures SQLite with performance-optimized settings for testing.
///
/// Sets the following PRAGMAs:
/// - `synchronous = OFF`: Disables synchronous writes for faster performance
/// - `journal_mode = OFF`: Disables rollback journal
///
/// These settings make SQLite faster but less durable - only use for testing.
fn set_sqlite_test_pragmas(conn: &mut diesel::SqliteConnection) -> diesel::QueryResult<()> {
    conn.batch_execute(
        r#"
        PRAGMA synchronous = OFF;
        PRAGMA journal_mode = OFF;
        "#,
    )
}

fn set_sqlite_test_pragmas_fairing() -> AdHoc {
    AdHoc::on_ignite("Set SQLite Test Pragmas", |rocket| async {
        if let Some(conn) = DbConn::get_one(&rocket).await {
            if let Err(e) = conn.run(set_sqlite_test_pragmas).await {
                warn!("Failed to set SQLite test pragmas: {}", e);
            }
        }
        rocket
    })
}

/// Creates a Rocket fairing that seeds the standard test data.
fn test_data_init_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Test Data Initialization", |rocket| async {
        let Some(conn) = DbConn::get_one(&rocket).await else {
            return Err(rocket);
        };
        match conn.run(|c| create_test_data(c)).await {
            Ok(()) => {
                info!("[test-data-init] Test data initialization completed");
                Ok(rocket)
            }
            Err(e) => {
                error!("[test-data-init] Failed to create test data: {:?}", e);
                Err(rocket)
            }
        }
    })
}

/// Creates the standard test data: company `test-company` ("Test Company",
/// "A test company.") with a single unpaid invoice of 100. On a fresh
/// database that invoice has id 1.
pub fn create_test_data(conn: &mut SqliteConnection) -> Result<(), diesel::result::Error> {
    if get_company_by_code(conn, TEST_COMPANY_CODE)?.is_some() {
        return Ok(());
    }

    insert_company(
        conn,
        &CompanyInput {
            name: "Test Company".to_string(),
            description: Some("A test company.".to_string()),
        },
    )?;
    insert_invoice(
        conn,
        &InvoiceInput {
            comp_code: TEST_COMPANY_CODE.to_string(),
            amt: 100.0,
        },
    )?;
    Ok(())
}

/// Creates and configures a Rocket instance for testing with an in-memory SQLite database.
///
/// The returned Rocket instance will have:
/// - A unique shared-cache in-memory SQLite database
/// - Database connection pool attached
/// - Foreign keys enabled
/// - Testing pragmas set
/// - All migrations run
/// - Standard test data seeded
/// - Routes and catchers mounted
pub fn test_rocket() -> Rocket<Build> {
    use uuid::Uuid;

    // Generate a unique database name for this test instance
    let unique_db_name = format!("file:test_db_{}?mode=memory&cache=shared", Uuid::new_v4());

    let db_config: Map<_, Value> = map! {
        "url" => unique_db_name.into(),
        "pool_size" => 5.into(),
        "timeout" => 5.into(),
    };

    let figment = rocket::Config::figment().merge(("databases", map!["sqlite_db" => db_config]));

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(set_foreign_keys_fairing())
        .attach(set_sqlite_test_pragmas_fairing())
        .attach(run_migrations_fairing())
        .attach(test_data_init_fairing());
    crate::register_catchers(crate::mount_api_routes(rocket))
}

/// Creates a synchronous in-memory SQLite database connection for unit tests.
///
/// Each call returns a new, independent database with foreign keys enabled
/// and all migrations applied. No test data is seeded.
pub fn setup_test_db() -> SqliteConnection {
    use diesel::Connection;

    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Failed to create in-memory SQLite database");
    set_foreign_keys(&mut conn).expect("Failed to enable foreign keys");
    run_pending_migrations(&mut conn).expect("Failed to run pending migrations");
    conn
}
