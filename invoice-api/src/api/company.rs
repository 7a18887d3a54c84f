//! API endpoints for managing companies.
//!
//! Companies are keyed by a code derived from their name when they are
//! created. Every invoice is billed to exactly one company.

use rocket::Route;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::DeleteResponse;
use crate::error::ApiError;
use crate::logged_json::LoggedJson;
use crate::models::{Company, CompanyDetail, CompanyInput, CompanySummary};
use crate::orm::DbConn;
use crate::orm::company::{
    delete_company, get_all_companies, get_company_detail, insert_company, update_company,
};

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompaniesResponse {
    pub companies: Vec<CompanySummary>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyResponse {
    pub company: Company,
}

/// List Companies endpoint.
///
/// - **URL:** `/companies`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves every company as a code/name pair
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// {
///   "companies": [
///     { "code": "apple", "name": "Apple Computer" },
///     { "code": "ibm", "name": "IBM" }
///   ]
/// }
/// ```
#[get("/companies")]
pub async fn list_companies(db: DbConn) -> Result<Json<CompaniesResponse>, ApiError> {
    let companies = db.run(get_all_companies).await?;
    Ok(Json(CompaniesResponse { companies }))
}

/// Get Company endpoint.
///
/// - **URL:** `/companies/<code>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves one company with the ids of its invoices
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// {
///   "company": {
///     "code": "apple",
///     "name": "Apple Computer",
///     "description": "Maker of OSX.",
///     "invoices": [1, 2]
///   }
/// }
/// ```
///
/// **Failure (HTTP 404 Not Found):**
/// No company has the given code
#[get("/companies/<code>")]
pub async fn get_company(db: DbConn, code: &str) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let lookup = code.to_string();
    db.run(move |conn| get_company_detail(conn, &lookup))
        .await?
        .map(|company| Json(CompanyDetailResponse { company }))
        .ok_or_else(|| ApiError::company_not_found(code))
}

/// Create Company endpoint.
///
/// - **URL:** `/companies`
/// - **Method:** `POST`
/// - **Purpose:** Creates a company; its code is derived from the name
///
/// # Request Format
///
/// ```json
/// {
///   "name": "New Company",
///   "description": "A new company."
/// }
/// ```
///
/// # Response
///
/// **Success (HTTP 201 Created):**
/// ```json
/// {
///   "company": {
///     "code": "new-company",
///     "name": "New Company",
///     "description": "A new company."
///   }
/// }
/// ```
///
/// **Failure (HTTP 500 Internal Server Error):**
/// The derived code or the name is already taken, or the store failed
#[post("/companies", data = "<new_company>")]
pub async fn create_company(
    db: DbConn,
    new_company: LoggedJson<CompanyInput>,
) -> Result<status::Created<Json<CompanyResponse>>, ApiError> {
    let input = new_company.into_inner();
    let company = db.run(move |conn| insert_company(conn, &input)).await?;
    let location = uri!(get_company(code = company.code.as_str())).to_string();
    Ok(status::Created::new(location).body(Json(CompanyResponse { company })))
}

/// Update Company endpoint.
///
/// - **URL:** `/companies/<code>`
/// - **Method:** `PUT`
/// - **Purpose:** Replaces a company's name and description
///
/// The code in the path identifies the company and is never changed.
///
/// # Request Format
///
/// ```json
/// {
///   "name": "Updated Test Company",
///   "description": "An updated test company."
/// }
/// ```
///
/// **Failure (HTTP 404 Not Found):**
/// No company has the given code
#[put("/companies/<code>", data = "<changes>")]
pub async fn update_company_endpoint(
    db: DbConn,
    code: &str,
    changes: LoggedJson<CompanyInput>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let input = changes.into_inner();
    let lookup = code.to_string();
    db.run(move |conn| update_company(conn, &lookup, &input))
        .await?
        .map(|company| Json(CompanyResponse { company }))
        .ok_or_else(|| ApiError::company_not_found(code))
}

/// Delete Company endpoint.
///
/// - **URL:** `/companies/<code>`
/// - **Method:** `DELETE`
/// - **Purpose:** Deletes a company and, with it, all of its invoices
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// { "status": "deleted" }
/// ```
///
/// **Failure (HTTP 404 Not Found):**
/// No row was deleted
#[delete("/companies/<code>")]
pub async fn delete_company_endpoint(
    db: DbConn,
    code: &str,
) -> Result<Json<DeleteResponse>, ApiError> {
    let lookup = code.to_string();
    if db.run(move |conn| delete_company(conn, &lookup)).await? {
        Ok(Json(DeleteResponse::deleted()))
    } else {
        Err(ApiError::company_not_found(code))
    }
}

pub fn routes() -> Vec<Route> {
    routes![
        list_companies,
        get_company,
        create_company,
        update_company_endpoint,
        delete_company_endpoint
    ]
}
