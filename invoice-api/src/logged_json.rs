//! JSON data guard that logs every parsed request body.
//!
//! `LoggedJson<T>` parses exactly like Rocket's `Json<T>` and then writes
//! one `info!` line with the method, path and re-serialized body. Handlers
//! use it in place of `Json<T>` for every request that carries a body.

use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{
    Data, Request,
    data::{self, FromData},
};

pub struct LoggedJson<T>(pub T);

impl<T> LoggedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for LoggedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LoggedJson<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Renders a body for the request log.
fn describe_body<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| "<failed to serialize>".to_string())
}

#[rocket::async_trait]
impl<'r, T: Deserialize<'r> + Serialize> FromData<'r> for LoggedJson<T> {
    type Error = rocket::serde::json::Error<'r>;

    async fn from_data(req: &'r Request<'_>, data: Data<'r>) -> data::Outcome<'r, Self> {
        match Json::<T>::from_data(req, data).await {
            data::Outcome::Success(json_data) => {
                info!(
                    "API Request Body: {} {} | Data: {}",
                    req.method().as_str(),
                    req.uri().path(),
                    describe_body(&json_data.0)
                );
                data::Outcome::Success(LoggedJson(json_data.into_inner()))
            }
            data::Outcome::Error((status, e)) => {
                warn!(
                    "Rejected request body: {} {} | {}: {}",
                    req.method().as_str(),
                    req.uri().path(),
                    status,
                    e
                );
                data::Outcome::Error((status, e))
            }
            data::Outcome::Forward(f) => data::Outcome::Forward(f),
        }
    }
}
