use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use evaltrack_core::domain::{PiRecord, Supplier};
use evaltrack_core::foundation::now_millis;
use evaltrack_core::TrackerError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierDraft {
    pub email: String,
    pub category: String,
    pub classification: String,
    pub company_name: String,
    pub address: String,
    pub location: String,
    pub account: String,
    pub contact_number: String,
    pub contact_email: String,
    pub website: String,
    pub contact_person: String,
}

pub async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(state.storage.list_suppliers()?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    Json(draft): Json<SupplierDraft>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    if draft.company_name.trim().is_empty() {
        return Err(ApiError(TrackerError::validation("companyName is required")));
    }
    let supplier = Supplier {
        id: Uuid::new_v4().to_string(),
        email: draft.email,
        category: draft.category,
        classification: draft.classification,
        company_name: draft.company_name,
        address: draft.address,
        location: draft.location,
        account: draft.account,
        contact_number: draft.contact_number,
        contact_email: draft.contact_email,
        website: draft.website,
        contact_person: draft.contact_person,
        timestamp: now_millis(),
    };
    state.storage.insert_supplier(supplier.clone())?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PiRecordDraft {
    pub supplier: String,
    pub pi_number: String,
    pub amount: f64,
    pub status: String,
}

pub async fn list_pi_records(State(state): State<AppState>) -> ApiResult<Json<Vec<PiRecord>>> {
    Ok(Json(state.storage.list_pi_records()?))
}

pub async fn create_pi_record(
    State(state): State<AppState>,
    Json(draft): Json<PiRecordDraft>,
) -> ApiResult<(StatusCode, Json<PiRecord>)> {
    if draft.pi_number.trim().is_empty() {
        return Err(ApiError(TrackerError::validation("piNumber is required")));
    }
    let record = PiRecord {
        id: Uuid::new_v4().to_string(),
        supplier: draft.supplier,
        pi_number: draft.pi_number,
        amount: draft.amount,
        status: draft.status,
        timestamp: now_millis(),
    };
    state.storage.insert_pi_record(record.clone())?;
    Ok((StatusCode::CREATED, Json(record)))
}
