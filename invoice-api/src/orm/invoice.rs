use chrono::{NaiveDateTime, Utc};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::models::{
    Company, Invoice, InvoiceDetail, InvoiceInput, InvoiceSummary, InvoiceUpdate, NewInvoice,
};
use crate::payment::PaymentTransition;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Returns every invoice as an `{id, comp_code}` pair, in id order.
pub fn get_all_invoices(
    conn: &mut SqliteConnection,
) -> Result<Vec<InvoiceSummary>, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;
    invoices
        .order(id.asc())
        .select(InvoiceSummary::as_select())
        .load(conn)
}

/// Gets the ids of all invoices billed to a company, ascending.
pub fn get_invoice_ids_by_company(
    conn: &mut SqliteConnection,
    company_code: &str,
) -> Result<Vec<i32>, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;
    invoices
        .filter(comp_code.eq(company_code))
        .order(id.asc())
        .select(id)
        .load(conn)
}

/// Gets an invoice by its id.
pub fn get_invoice_by_id(
    conn: &mut SqliteConnection,
    invoice_id: i32,
) -> Result<Option<Invoice>, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;
    invoices
        .find(invoice_id)
        .select(Invoice::as_select())
        .first(conn)
        .optional()
}

/// Gets an invoice joined with the company it is billed to.
pub fn get_invoice_with_company(
    conn: &mut SqliteConnection,
    invoice_id: i32,
) -> Result<Option<InvoiceDetail>, diesel::result::Error> {
    use crate::schema::{companies, invoices};

    let row = invoices::table
        .inner_join(companies::table)
        .filter(invoices::id.eq(invoice_id))
        .select((Invoice::as_select(), Company::as_select()))
        .first::<(Invoice, Company)>(conn)
        .optional()?;

    Ok(row.map(|(invoice, company)| InvoiceDetail::new(invoice, company)))
}

/// Inserts a new, unpaid invoice stamped with the current time.
///
/// An unknown `comp_code` fails with a foreign key violation and a
/// non-positive amount with a check constraint violation.
pub fn insert_invoice(
    conn: &mut SqliteConnection,
    input: &InvoiceInput,
) -> Result<Invoice, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;

    let new_invoice = NewInvoice::unpaid(input.comp_code.clone(), input.amt, current_time());

    diesel::insert_into(invoices)
        .values(&new_invoice)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    invoices
        .find(last_id as i32)
        .select(Invoice::as_select())
        .first(conn)
}

/// Updates an invoice's amount and paid flag, deriving its payment date.
///
/// The current `paid_date` is read and the new state written inside one
/// immediate transaction, so concurrent updates to the same invoice
/// serialize on the write lock. Returns Ok(None) if no invoice has the id.
pub fn update_invoice(
    conn: &mut SqliteConnection,
    invoice_id: i32,
    update: &InvoiceUpdate,
) -> Result<Option<Invoice>, diesel::result::Error> {
    update_invoice_at(conn, invoice_id, update, current_time())
}

/// Same as [`update_invoice`] with an explicit clock reading.
pub fn update_invoice_at(
    conn: &mut SqliteConnection,
    invoice_id: i32,
    update: &InvoiceUpdate,
    at: NaiveDateTime,
) -> Result<Option<Invoice>, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;

    conn.immediate_transaction(|conn| {
        let current = invoices
            .find(invoice_id)
            .select(paid_date)
            .first::<Option<NaiveDateTime>>(conn)
            .optional()?;

        let Some(current_paid_date) = current else {
            return Ok(None);
        };

        let transition = PaymentTransition::between(current_paid_date, update.paid, at);
        info!("Invoice {} payment transition: {:?}", invoice_id, transition);

        diesel::update(invoices.find(invoice_id))
            .set((
                amt.eq(update.amt),
                paid.eq(update.paid),
                paid_date.eq(transition.paid_date()),
            ))
            .execute(conn)?;

        invoices
            .find(invoice_id)
            .select(Invoice::as_select())
            .first(conn)
            .map(Some)
    })
}

/// Deletes an invoice.
/// Returns Ok(true) if a row was deleted, Ok(false) if not found.
pub fn delete_invoice(
    conn: &mut SqliteConnection,
    invoice_id: i32,
) -> Result<bool, diesel::result::Error> {
    use crate::schema::invoices::dsl::*;
    let rows_affected = diesel::delete(invoices.find(invoice_id)).execute(conn)?;
    Ok(rows_affected > 0)
}

fn current_time() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyInput;
    use crate::orm::company::insert_company;
    use crate::orm::testing::setup_test_db;
    use chrono::Duration;

    fn setup_with_company() -> SqliteConnection {
        let mut conn = setup_test_db();
        insert_company(
            &mut conn,
            &CompanyInput {
                name: "Test Company".to_string(),
                description: Some("A test company.".to_string()),
            },
        )
        .expect("Failed to insert company");
        conn
    }

    fn new_invoice(conn: &mut SqliteConnection, amount: f64) -> Invoice {
        insert_invoice(
            conn,
            &InvoiceInput {
                comp_code: "test-company".to_string(),
                amt: amount,
            },
        )
        .expect("Failed to insert invoice")
    }

    #[test]
    fn test_insert_invoice_defaults() {
        let mut conn = setup_with_company();
        let before = Utc::now().naive_utc();
        let invoice = new_invoice(&mut conn, 100.0);

        assert!(invoice.id > 0);
        assert_eq!(invoice.comp_code, "test-company");
        assert_eq!(invoice.amt, 100.0);
        assert!(!invoice.paid);
        assert!(invoice.paid_date.is_none());
        assert!(invoice.add_date >= before);
    }

    #[test]
    fn test_insert_invoice_unknown_company_fails() {
        let mut conn = setup_test_db();
        let result = insert_invoice(
            &mut conn,
            &InvoiceInput {
                comp_code: "nobody".to_string(),
                amt: 10.0,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_invoice_rejects_non_positive_amount() {
        let mut conn = setup_with_company();
        let result = insert_invoice(
            &mut conn,
            &InvoiceInput {
                comp_code: "test-company".to_string(),
                amt: 0.0,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_get_invoice_with_company() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 42.5);

        let detail = get_invoice_with_company(&mut conn, invoice.id)
            .unwrap()
            .expect("invoice should exist");
        assert_eq!(detail.id, invoice.id);
        assert_eq!(detail.amt, 42.5);
        assert_eq!(detail.company.code, "test-company");
        assert_eq!(detail.company.name, "Test Company");
        assert_eq!(detail.company.description.as_deref(), Some("A test company."));

        assert!(get_invoice_with_company(&mut conn, 99999).unwrap().is_none());
    }

    #[test]
    fn test_list_invoices() {
        let mut conn = setup_with_company();
        let a = new_invoice(&mut conn, 1.0);
        let b = new_invoice(&mut conn, 2.0);

        let all = get_all_invoices(&mut conn).unwrap();
        assert_eq!(
            all,
            vec![
                InvoiceSummary { id: a.id, comp_code: "test-company".into() },
                InvoiceSummary { id: b.id, comp_code: "test-company".into() },
            ]
        );
    }

    #[test]
    fn test_update_marks_payment() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 100.0);
        let paid_at = Utc::now().naive_utc();

        let updated = update_invoice_at(&mut conn, invoice.id, &InvoiceUpdate { amt: 300.0, paid: true }, paid_at)
            .unwrap()
            .expect("invoice should exist");
        assert_eq!(updated.amt, 300.0);
        assert!(updated.paid);
        assert_eq!(updated.paid_date, Some(paid_at));
        assert_eq!(updated.add_date, invoice.add_date);
        assert_eq!(updated.comp_code, invoice.comp_code);
    }

    #[test]
    fn test_update_staying_paid_keeps_date() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 100.0);
        let first = Utc::now().naive_utc();
        let later = first + Duration::hours(1);

        update_invoice_at(&mut conn, invoice.id, &InvoiceUpdate { amt: 100.0, paid: true }, first).unwrap();
        let again = update_invoice_at(&mut conn, invoice.id, &InvoiceUpdate { amt: 150.0, paid: true }, later)
            .unwrap()
            .expect("invoice should exist");

        assert_eq!(again.amt, 150.0);
        assert_eq!(again.paid_date, Some(first));
    }

    #[test]
    fn test_update_unpaying_clears_date() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 100.0);

        update_invoice(&mut conn, invoice.id, &InvoiceUpdate { amt: 100.0, paid: true }).unwrap();
        let cleared = update_invoice(&mut conn, invoice.id, &InvoiceUpdate { amt: 100.0, paid: false })
            .unwrap()
            .expect("invoice should exist");

        assert!(!cleared.paid);
        assert!(cleared.paid_date.is_none());
    }

    #[test]
    fn test_update_unpaid_staying_unpaid() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 100.0);

        let updated = update_invoice(&mut conn, invoice.id, &InvoiceUpdate { amt: 120.0, paid: false })
            .unwrap()
            .expect("invoice should exist");
        assert_eq!(updated.amt, 120.0);
        assert!(updated.paid_date.is_none());
    }

    #[test]
    fn test_update_missing_invoice_returns_none() {
        let mut conn = setup_test_db();
        let result = update_invoice(&mut conn, 99999, &InvoiceUpdate { amt: 1.0, paid: true }).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_invoice_checks_row_count() {
        let mut conn = setup_with_company();
        let invoice = new_invoice(&mut conn, 100.0);

        assert!(delete_invoice(&mut conn, invoice.id).unwrap());
        assert!(!delete_invoice(&mut conn, invoice.id).unwrap());
    }
}
