//! API endpoints for managing invoices.
//!
//! Invoices are billed to a company by its code. Updating an invoice may
//! change its paid flag, which derives the payment date as described in
//! [`crate::payment`].

use rocket::Route;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::DeleteResponse;
use crate::error::ApiError;
use crate::logged_json::LoggedJson;
use crate::models::{Invoice, InvoiceDetail, InvoiceInput, InvoiceSummary, InvoiceUpdate};
use crate::orm::DbConn;
use crate::orm::invoice::{
    delete_invoice, get_all_invoices, get_invoice_with_company, insert_invoice, update_invoice,
};

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

/// List Invoices endpoint.
///
/// - **URL:** `/invoices`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves every invoice as an id/company-code pair
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// { "invoices": [ { "id": 1, "comp_code": "apple" } ] }
/// ```
#[get("/invoices")]
pub async fn list_invoices(db: DbConn) -> Result<Json<InvoicesResponse>, ApiError> {
    let invoices = db.run(get_all_invoices).await?;
    Ok(Json(InvoicesResponse { invoices }))
}

/// Get Invoice endpoint.
///
/// - **URL:** `/invoices/<id>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves one invoice with its company nested
///
/// # Response
///
/// **Success (HTTP 200 OK):**
/// ```json
/// {
///   "invoice": {
///     "id": 1,
///     "amt": 100.0,
///     "paid": false,
///     "add_date": "2025-03-14T12:00:00.123456",
///     "paid_date": null,
///     "Company": {
///       "code": "apple",
///       "name": "Apple Computer",
///       "description": "Maker of OSX."
///     }
///   }
/// }
/// ```
///
/// **Failure (HTTP 404 Not Found):**
/// No invoice has the given id
#[get("/invoices/<id>")]
pub async fn get_invoice(db: DbConn, id: i32) -> Result<Json<InvoiceDetailResponse>, ApiError> {
    db.run(move |conn| get_invoice_with_company(conn, id))
        .await?
        .map(|invoice| Json(InvoiceDetailResponse { invoice }))
        .ok_or_else(|| ApiError::invoice_not_found(id))
}

/// Create Invoice endpoint.
///
/// - **URL:** `/invoices`
/// - **Method:** `POST`
/// - **Purpose:** Bills a new, unpaid invoice to a company
///
/// # Request Format
///
/// ```json
/// { "comp_code": "apple", "amt": 200 }
/// ```
///
/// # Response
///
/// **Success (HTTP 201 Created):**
/// ```json
/// {
///   "invoice": {
///     "id": 2,
///     "comp_code": "apple",
///     "amt": 200.0,
///     "paid": false,
///     "add_date": "2025-03-14T12:00:00.123456",
///     "paid_date": null
///   }
/// }
/// ```
///
/// **Failure (HTTP 500 Internal Server Error):**
/// Unknown company code (foreign key violation), non-positive amount, or a
/// store failure
#[post("/invoices", data = "<new_invoice>")]
pub async fn create_invoice(
    db: DbConn,
    new_invoice: LoggedJson<InvoiceInput>,
) -> Result<status::Created<Json<InvoiceResponse>>, ApiError> {
    let input = new_invoice.into_inner();
    let invoice = db.run(move |conn| insert_invoice(conn, &input)).await?;
    let location = uri!(get_invoice(id = invoice.id)).to_string();
    Ok(status::Created::new(location).body(Json(InvoiceResponse { invoice })))
}

/// Update Invoice endpoint.
///
/// - **URL:** `/invoices/<id>`
/// - **Method:** `PUT`
/// - **Purpose:** Sets the amount and paid flag of an invoice
///
/// The payment date follows the paid flag: it is stamped when an unpaid
/// invoice becomes paid, kept when a paid invoice stays paid, and cleared
/// whenever `paid` is false.
///
/// # Request Format
///
/// ```json
/// { "amt": 300, "paid": true }
/// ```
///
/// **Failure (HTTP 404 Not Found):**
/// No invoice has the given id
#[put("/invoices/<id>", data = "<changes>")]
pub async fn update_invoice_endpoint(
    db: DbConn,
    id: i32,
    changes: LoggedJson<InvoiceUpdate>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let update = changes.into_inner();
    db.run(move |conn| update_invoice(conn, id, &update))
        .await?
        .map(|invoice| Json(InvoiceResponse { invoice }))
        .ok_or_else(|| ApiError::invoice_not_found(id))
}

/// Delete Invoice endpoint.
///
/// - **URL:** `/invoices/<id>`
/// - **Method:** `DELETE`
///
/// **Success (HTTP 200 OK):** `{ "status": "deleted" }`
///
/// **Failure (HTTP 404 Not Found):** No row was deleted
#[delete("/invoices/<id>")]
pub async fn delete_invoice_endpoint(db: DbConn, id: i32) -> Result<Json<DeleteResponse>, ApiError> {
    if db.run(move |conn| delete_invoice(conn, id)).await? {
        Ok(Json(DeleteResponse::deleted()))
    } else {
        Err(ApiError::invoice_not_found(id))
    }
}

pub fn routes() -> Vec<Route> {
    routes![
        list_invoices,
        get_invoice,
        create_invoice,
        update_invoice_endpoint,
        delete_invoice_endpoint
    ]
}
