//! TypeScript type generation module.
//!
//! This module exports TypeScript type definitions for all the structs
//! annotated with `#[ts(export)]`. When this file is compiled (typically
//! during testing), it generates .ts files in the specified output directory.

#[cfg(test)]
mod tests {
    use std::{env, path::Path};

    use ts_rs::TS;

    #[test]
    fn generate_typescript_types() {
        // Output directory: INVOICE_API_TS_OUTPUT_DIR, else ../ts-bindings
        let output_dir_str = env::var("INVOICE_API_TS_OUTPUT_DIR")
            .unwrap_or_else(|_| "../ts-bindings".to_string());
        let output_dir = Path::new(&output_dir_str);

        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir).expect("Failed to create output directory");
        }

        // Remove stale bindings so renamed or deleted types don't linger
        for entry in std::fs::read_dir(output_dir).expect("Failed to read output directory") {
            let path = entry.expect("Failed to read directory entry").path();
            if path.extension().and_then(|s| s.to_str()) == Some("ts") {
                std::fs::remove_file(&path)
                    .unwrap_or_else(|e| panic!("Failed to remove {:?}: {}", path, e));
            }
        }

        unsafe {
            env::set_var("TS_RS_EXPORT_DIR", output_dir);
        }

        use crate::{
            api::{
                DeleteResponse,
                company::{CompaniesResponse, CompanyDetailResponse, CompanyResponse},
                invoice::{InvoiceDetailResponse, InvoiceResponse, InvoicesResponse},
                status::HealthStatus,
            },
            error::{ErrorBody, ErrorResponse},
            models::*,
        };

        Company::export().expect("Failed to export Company type");
        CompanyInput::export().expect("Failed to export CompanyInput type");
        CompanySummary::export().expect("Failed to export CompanySummary type");
        CompanyDetail::export().expect("Failed to export CompanyDetail type");

        Invoice::export().expect("Failed to export Invoice type");
        InvoiceInput::export().expect("Failed to export InvoiceInput type");
        InvoiceUpdate::export().expect("Failed to export InvoiceUpdate type");
        InvoiceSummary::export().expect("Failed to export InvoiceSummary type");
        InvoiceDetail::export().expect("Failed to export InvoiceDetail type");

        // Response envelopes
        CompaniesResponse::export().expect("Failed to export CompaniesResponse type");
        CompanyDetailResponse::export().expect("Failed to export CompanyDetailResponse type");
        CompanyResponse::export().expect("Failed to export CompanyResponse type");
        InvoicesResponse::export().expect("Failed to export InvoicesResponse type");
        InvoiceDetailResponse::export().expect("Failed to export InvoiceDetailResponse type");
        InvoiceResponse::export().expect("Failed to export InvoiceResponse type");
        DeleteResponse::export().expect("Failed to export DeleteResponse type");
        HealthStatus::export().expect("Failed to export HealthStatus type");

        ErrorBody::export().expect("Failed to export ErrorBody type");
        ErrorResponse::export().expect("Failed to export ErrorResponse type");

        println!("TypeScript types generated successfully in {:?}", output_dir);
    }
}
