use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::schema::companies;

#[derive(
    Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize, TS,
)]
#[diesel(table_name = companies)]
#[diesel(primary_key(code))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = companies)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

// For API inputs; the code is never client-supplied
#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct CompanyInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Listing shape: description is left out.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[ts(export)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// A company together with the ids of the invoices billed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        CompanyDetail {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
        }
    }
}
