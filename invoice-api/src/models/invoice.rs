use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::Company;
use crate::schema::invoices;

#[derive(
    Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, TS,
)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String, // Foreign key to Company
    pub amt: f64,
    pub paid: bool,
    #[ts(type = "string")]
    pub add_date: NaiveDateTime,
    #[ts(type = "string | null")]
    pub paid_date: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = invoices)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDateTime,
    pub paid_date: Option<NaiveDateTime>,
}

impl NewInvoice {
    /// Every invoice starts out unpaid.
    pub fn unpaid(comp_code: String, amt: f64, add_date: NaiveDateTime) -> Self {
        NewInvoice {
            comp_code,
            amt,
            paid: false,
            add_date,
            paid_date: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct InvoiceInput {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub paid: bool,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// An invoice with its billed company nested in place of `comp_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    #[ts(type = "string")]
    pub add_date: NaiveDateTime,
    #[ts(type = "string | null")]
    pub paid_date: Option<NaiveDateTime>,
    #[serde(rename = "Company")]
    pub company: Company,
}

impl InvoiceDetail {
    pub fn new(invoice: Invoice, company: Company) -> Self {
        InvoiceDetail {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}
