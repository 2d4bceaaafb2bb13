//! Purchase request handlers: submission, listing, and decisions.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use procura_core::{
    DateRange, Decision, ListFilter, PurchaseRequest, RequestId, RequestStatus, SubmitInput,
};

use crate::error::ApiError;
use crate::notifier;
use crate::state::AppState;

/// JSON `{message}` success body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// A purchase request as the admin frontend consumes it.
#[derive(Debug, Serialize)]
pub struct RequestResponse {
    /// Request id.
    pub id: i64,
    /// Requester name.
    pub responsable: String,
    /// Requester email.
    pub correo: String,
    /// Vendor name.
    pub proveedor: String,
    /// Vendor tax id.
    pub nit: String,
    /// Amount in currency units.
    pub valor: f64,
    /// Payment method.
    #[serde(rename = "medioPago")]
    pub medio_pago: String,
    /// Cost center, if set.
    #[serde(rename = "centroCostos")]
    pub centro_costos: Option<String>,
    /// Quotation reference, if a file was uploaded.
    pub cotizacion: Option<String>,
    /// Status, as its Spanish wire label.
    pub estado: RequestStatus,
    /// Creation timestamp, RFC 3339.
    #[serde(rename = "fechaCreacion")]
    pub fecha_creacion: String,
}

impl From<&PurchaseRequest> for RequestResponse {
    fn from(request: &PurchaseRequest) -> Self {
        Self {
            id: request.id.as_i64(),
            responsable: request.requester_name.clone(),
            correo: request.requester_email.clone(),
            proveedor: request.vendor_name.clone(),
            nit: request.vendor_tax_id.clone(),
            valor: request.amount_units(),
            medio_pago: request.payment_method.clone(),
            centro_costos: request.cost_center.clone(),
            cotizacion: request.attachment_reference.clone(),
            estado: request.status,
            fecha_creacion: request.created_at.to_rfc3339(),
        }
    }
}

/// Submit a new purchase request (multipart form with optional `cotizacion`
/// file).
pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut input = SubmitInput::default();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "cotizacion" {
            let filename = field.file_name().unwrap_or("cotizacion").to_string();
            let data = field.bytes().await.map_err(bad_multipart)?;
            if !data.is_empty() {
                upload = Some((filename, data.to_vec()));
            }
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            match name.as_str() {
                "responsable" => input.requester_name = Some(value),
                "correo" => input.requester_email = Some(value),
                "proveedor" => input.vendor_name = Some(value),
                "nit" => input.vendor_tax_id = Some(value),
                "valor" => input.amount = Some(value),
                "medioPago" => input.payment_method = Some(value),
                "centroCostos" => input.cost_center = Some(value),
                // Unknown form fields are ignored.
                _ => {}
            }
        }
    }

    // Reject before touching attachment storage or the database.
    let mut new = input.validate()?;

    // The upload must complete before the row is written so the stored
    // reference is never dangling.
    if let Some((filename, data)) = upload {
        new.attachment_reference = Some(state.attachments.save(&filename, &data).await?);
    }

    let request = state.store.create_request(new).await?;
    tracing::info!(
        id = %request.id,
        requester = %request.requester_name,
        vendor = %request.vendor_name,
        "Purchase request created"
    );

    notifier::dispatch(
        state.mailer.clone(),
        notifier::new_request_email(&request, &state.config),
    );

    Ok(Json(MessageResponse {
        message: "Solicitud enviada exitosamente.".to_string(),
    }))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Formulario inválido: {err}"))
}

/// Query parameters for the admin listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Range start date (YYYY-MM-DD); only applied together with `fin`.
    pub inicio: Option<String>,
    /// Range end date (YYYY-MM-DD); only applied together with `inicio`.
    pub fin: Option<String>,
    /// Payment method, exact match.
    pub medio: Option<String>,
    /// Substring matched against vendor or requester name.
    pub proveedor: Option<String>,
    /// Status wire label, exact match.
    pub estado: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> Result<ListFilter, ApiError> {
        let mut filter = ListFilter::default();

        if let (Some(start), Some(end)) = (non_empty(self.inicio), non_empty(self.fin)) {
            filter.date_range = Some(DateRange {
                start: parse_date(&start)?,
                end: parse_date(&end)?,
            });
        }
        filter.payment_method = non_empty(self.medio);
        filter.search_text = non_empty(self.proveedor);
        if let Some(raw) = non_empty(self.estado) {
            filter.status = Some(
                raw.parse()
                    .map_err(|_| ApiError::BadRequest(format!("Estado inválido: {raw}")))?,
            );
        }

        Ok(filter)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Fecha inválida: {raw}")))
}

/// List purchase requests with optional filters, in work-queue order.
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    let filter = params.into_filter()?;
    let requests = state.store.list_requests(&filter).await?;
    Ok(Json(requests.iter().map(RequestResponse::from).collect()))
}

/// Decision body for the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status: "Aprobado" or "Rechazado".
    pub estado: String,
}

/// Approve or reject a pending request.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let decision: Decision = body.estado.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Estado inválido: {} (use Aprobado o Rechazado)",
            body.estado
        ))
    })?;

    let request = state.store.transition(RequestId::new(id), decision).await?;
    tracing::info!(id = %request.id, status = %request.status, "Purchase request resolved");

    notifier::dispatch(
        state.mailer.clone(),
        notifier::decision_email(&request, &state.config),
    );

    Ok(Json(MessageResponse {
        message: format!("Solicitud {} correctamente.", request.status.label()),
    }))
}
