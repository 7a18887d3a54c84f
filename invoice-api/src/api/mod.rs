pub mod company;
pub mod invoice;
pub mod status;

use rocket::Route;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body returned by every successful delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct DeleteResponse {
    pub status: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        DeleteResponse {
            status: "deleted".to_string(),
        }
    }
}

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(company::routes());
    routes.extend(invoice::routes());
    routes.extend(status::routes());
    routes
}
