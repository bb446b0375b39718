//! Invoice handlers

use std::time::Instant;

use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use acme_db::{CreateInvoice, InvoiceListRow};
use acme_types::{parse_minor_units, InvoiceStatus, MoneyError};

use crate::error::{ApiError, ApiResult, ValidationError};
use crate::handlers::shared::{record_op_duration, required};
use crate::revalidate::INVOICES_PATH;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Raw create-invoice form. Every field is optional so that missing fields
/// surface as validation errors instead of extractor rejections.
#[derive(Debug, Default, Deserialize)]
pub struct CreateInvoiceForm {
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// A validated invoice, amount already in minor units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i32,
    pub status: InvoiceStatus,
}

impl CreateInvoiceForm {
    /// Check every field, collecting one message per failing field.
    pub fn validate(&self) -> Result<NewInvoice, ValidationError> {
        let mut errors = ValidationError::default();

        let customer_id = required(&self.customer_id, "customerId", &mut errors);

        let amount = required(&self.amount, "amount", &mut errors).and_then(|raw| {
            parse_minor_units(raw)
                .map_err(|e| errors.add("amount", amount_message(&e)))
                .ok()
        });

        let status = required(&self.status, "status", &mut errors).and_then(|raw| {
            raw.parse::<InvoiceStatus>()
                .map_err(|_| errors.add("status", "status must be 'paid' or 'pending'"))
                .ok()
        });

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(NewInvoice {
                    customer_id: customer_id.to_string(),
                    amount,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

fn amount_message(err: &MoneyError) -> String {
    match err {
        MoneyError::Empty => "amount is required".to_string(),
        MoneyError::NotANumber(_) | MoneyError::NotFinite => "amount must be a number".to_string(),
        MoneyError::OutOfRange(_) => "amount is too large".to_string(),
    }
}

impl NewInvoice {
    /// Storage record dated `date`
    pub fn dated(self, date: NaiveDate) -> CreateInvoice {
        CreateInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: i32,
    pub status: String,
    pub date: String,
}

impl From<&InvoiceListRow> for InvoiceResponse {
    fn from(row: &InvoiceListRow) -> Self {
        Self {
            id: row.invoice_id().to_string(),
            customer_id: row.customer_id().to_string(),
            name: row.name.clone(),
            email: row.email.clone(),
            image_url: row.image_url.clone(),
            amount: row.amount,
            status: row.status.clone(),
            date: row.date.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
    pub invoices: Vec<InvoiceResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /dashboard/invoices/create
#[instrument(skip(state, form))]
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<CreateInvoiceForm>,
) -> ApiResult<Redirect> {
    let start = Instant::now();

    let invoice = match form.validate() {
        Ok(invoice) => invoice,
        Err(errors) => {
            tracing::debug!(%errors, "Rejected invoice form");
            record_op_duration("create_invoice", start, false);
            return Err(ApiError::Validation(errors));
        }
    };

    let record = invoice.dated(Utc::now().date_naive());
    let id = match state.invoices.create(record).await {
        Ok(id) => id,
        Err(e) => {
            record_op_duration("create_invoice", start, false);
            return Err(e.into());
        }
    };

    state.pages.revalidate_path(INVOICES_PATH).await;

    metrics::counter!("dashboard_invoices_created_total").increment(1);
    record_op_duration("create_invoice", start, true);
    tracing::info!(invoice_id = %id, "Invoice created");

    Ok(Redirect::to(INVOICES_PATH))
}

/// GET /dashboard/invoices
#[instrument(skip(state))]
pub async fn list_invoices(State(state): State<AppState>) -> ApiResult<Json<ListInvoicesResponse>> {
    let start = Instant::now();
    let limit = state.config.invoice_list_limit;

    let result = state
        .pages
        .get_or_load(INVOICES_PATH, || state.invoices.find_latest(limit))
        .await;
    record_op_duration("list_invoices", start, result.is_ok());

    let rows = result?;
    Ok(Json(ListInvoicesResponse {
        invoices: rows.iter().map(InvoiceResponse::from).collect(),
    }))
}
