#[macro_use]
extern crate rocket;

use rocket::figment::value::Map;
use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use rocket::http::Status;
use rocket::request::Request;
use rocket::serde::json::{Json, Value};
use rocket::{Build, Rocket};

pub mod api;
pub mod error;
pub mod logged_json;
pub mod models;
pub mod orm;
pub use orm::DbConn;
pub mod payment;
pub mod schema;
pub mod slug;

#[cfg(test)]
pub mod generate_types;

pub use error::{ApiError, ErrorResponse};

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "invoices.db";

fn error_body(status: Status, req: &Request, message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        format!("{}: {}", message, req.uri().path()),
        status,
    ))
}

#[catch(400)]
fn bad_request(req: &Request) -> Json<ErrorResponse> {
    error_body(Status::BadRequest, req, "Bad Request")
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ErrorResponse> {
    error_body(Status::NotFound, req, "Not Found")
}

#[catch(422)]
fn unprocessable_entity(req: &Request) -> Json<ErrorResponse> {
    error_body(Status::UnprocessableEntity, req, "Unprocessable Entity")
}

#[catch(500)]
fn internal_server_error(req: &Request) -> Json<ErrorResponse> {
    error_body(Status::InternalServerError, req, "Internal Server Error")
}

#[catch(default)]
fn default_catcher(status: Status, req: &Request) -> Json<ErrorResponse> {
    error_body(status, req, status.reason().unwrap_or("Unknown Error"))
}

pub fn mount_api_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/", api::routes())
}

pub fn register_catchers(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.register(
        "/",
        catchers![
            bad_request,
            not_found,
            unprocessable_entity,
            internal_server_error,
            default_catcher
        ],
    )
}

fn log_rocket_info(rocket: &Rocket<Build>) {
    let figment = rocket.figment();

    if let Ok(address) = figment.extract_inner::<String>("address") {
        info!("Rocket is running at: {}", address);
    }

    if let Ok(port) = figment.extract_inner::<u16>("port") {
        info!("Rocket is listening on port: {}", port);
    }

    match figment.extract_inner::<Map<String, Value>>("databases.sqlite_db") {
        Ok(db_config) => {
            if let Some(Value::String(url)) = db_config.get("url") {
                info!("Database URL: {}", url);
            } else {
                warn!("Database URL not found in configuration");
            }
        }
        Err(e) => {
            warn!("Failed to extract database configuration: {}", e);
        }
    }
}

/// Builds the configuration: Rocket defaults, then `Rocket.toml`, then
/// `ROCKET_*` environment variables, with `DATABASE_URL` selecting the
/// SQLite database.
pub fn figment() -> Figment {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
        DEFAULT_DATABASE_URL.to_string()
    });

    Figment::from(rocket::Config::default())
        .merge(Toml::file("Rocket.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(("databases.sqlite_db.url", database_url))
}

/// Note that this function doesn't get tested by our tests.  Tests
/// set up the test_rocket in-memory db.  That is defined in orm/testing.rs.
pub fn rocket() -> Rocket<Build> {
    let rocket = rocket::custom(figment())
        .attach(DbConn::fairing())
        .attach(orm::set_foreign_keys_fairing())
        .attach(orm::run_migrations_fairing());

    log_rocket_info(&rocket);

    register_catchers(mount_api_routes(rocket))
}
