use diesel::prelude::*;

use crate::models::{Company, CompanyDetail, CompanyInput, CompanySummary, NewCompany};
use crate::orm::invoice::get_invoice_ids_by_company;
use crate::slug::slugify;

/// Returns every company as a `{code, name}` pair, in primary key order.
pub fn get_all_companies(
    conn: &mut SqliteConnection,
) -> Result<Vec<CompanySummary>, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    companies
        .order(code.asc())
        .select(CompanySummary::as_select())
        .load(conn)
}

/// Try to find a company by code.
/// Returns Ok(Some(Company)) if found, Ok(None) if not, Err on DB error.
pub fn get_company_by_code(
    conn: &mut SqliteConnection,
    company_code: &str,
) -> Result<Option<Company>, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    companies
        .find(company_code)
        .select(Company::as_select())
        .first(conn)
        .optional()
}

/// Gets a company along with the ids of its invoices (ascending).
pub fn get_company_detail(
    conn: &mut SqliteConnection,
    company_code: &str,
) -> Result<Option<CompanyDetail>, diesel::result::Error> {
    let Some(company) = get_company_by_code(conn, company_code)? else {
        return Ok(None);
    };
    let invoice_ids = get_invoice_ids_by_company(conn, company_code)?;
    Ok(Some(CompanyDetail::new(company, invoice_ids)))
}

/// Inserts a new company whose code is derived from its name.
///
/// A code or name that already exists fails with a unique constraint
/// violation from the store.
pub fn insert_company(
    conn: &mut SqliteConnection,
    input: &CompanyInput,
) -> Result<Company, diesel::result::Error> {
    use crate::schema::companies::dsl::*;

    let new_comp = NewCompany {
        code: slugify(&input.name),
        name: input.name.clone(),
        description: input.description.clone(),
    };

    diesel::insert_into(companies)
        .values(&new_comp)
        .execute(conn)?;

    companies
        .find(&new_comp.code)
        .select(Company::as_select())
        .first(conn)
}

/// Updates a company's name and description. The code never changes.
/// Returns Ok(None) if no company has the given code.
pub fn update_company(
    conn: &mut SqliteConnection,
    company_code: &str,
    input: &CompanyInput,
) -> Result<Option<Company>, diesel::result::Error> {
    use crate::schema::companies::dsl::*;

    let rows_affected = diesel::update(companies.find(company_code))
        .set((name.eq(&input.name), description.eq(&input.description)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Ok(None);
    }
    get_company_by_code(conn, company_code)
}

/// Delete a company by code. Its invoices go with it (ON DELETE CASCADE).
/// Returns Ok(true) if a row was deleted, Ok(false) if not found.
pub fn delete_company(
    conn: &mut SqliteConnection,
    company_code: &str,
) -> Result<bool, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    let rows_affected = diesel::delete(companies.find(company_code)).execute(conn)?;
    Ok(rows_affected > 0)
}
