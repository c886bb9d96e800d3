use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::domain::entities::CreditType;
use crate::domain::pagination::{Page, PaginationRequest};
use crate::domain::repository::CreditTypeUpdate;
use crate::domain::types::CreditTypeId;

// DTO de entrada para registrar un tipo de crédito
#[derive(Deserialize, ToSchema)]
pub struct CreateCreditTypeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// DTO de entrada para actualizar un tipo de crédito (parcial)
#[derive(Deserialize, ToSchema)]
pub struct UpdateCreditTypeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ListCreditTypesQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// Handler: Registrar un tipo de crédito
// POST /credit-types
#[utoipa::path(
    post,
    path = "/credit-types",
    request_body = CreateCreditTypeRequest,
    responses(
        (status = 201, description = "Credit type created"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_credit_type(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCreditTypeRequest>,
) -> Result<(StatusCode, Json<CreditType>), ApiError> {
    let credit_type = state
        .create_credit_type_use_case
        .execute(body.name, body.description.unwrap_or_default())
        .await?;
    Ok((StatusCode::CREATED, Json(credit_type)))
}

// Handler: Detalle de un tipo de crédito
// GET /credit-types/{credit_type_id}
#[utoipa::path(
    get,
    path = "/credit-types/{credit_type_id}",
    params(("credit_type_id" = String, Path, description = "Credit type ID")),
    responses(
        (status = 200, description = "Credit type detail"),
        (status = 404, description = "Credit type not found")
    )
)]
pub async fn get_credit_type(
    State(state): State<Arc<AppState>>,
    Path(credit_type_id): Path<String>,
) -> Result<Json<CreditType>, ApiError> {
    let credit_type = state
        .get_credit_type_use_case
        .execute(&CreditTypeId(credit_type_id))
        .await?;
    Ok(Json(credit_type))
}

// Handler: Listado de tipos de crédito
// GET /credit-types
#[utoipa::path(
    get,
    path = "/credit-types",
    responses((status = 200, description = "Paginated credit type list"))
)]
pub async fn list_credit_types(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCreditTypesQuery>,
) -> Result<Json<Page<CreditType>>, ApiError> {
    let pagination = PaginationRequest::new(query.page, query.page_size);
    let page = state.list_credit_types_use_case.execute(pagination).await?;
    Ok(Json(page))
}

// Handler: Actualizar un tipo de crédito
// PUT /credit-types/{credit_type_id}
#[utoipa::path(
    put,
    path = "/credit-types/{credit_type_id}",
    params(("credit_type_id" = String, Path, description = "Credit type ID")),
    request_body = UpdateCreditTypeRequest,
    responses(
        (status = 200, description = "Updated credit type"),
        (status = 404, description = "Credit type not found")
    )
)]
pub async fn update_credit_type(
    State(state): State<Arc<AppState>>,
    Path(credit_type_id): Path<String>,
    Json(body): Json<UpdateCreditTypeRequest>,
) -> Result<Json<CreditType>, ApiError> {
    let credit_type = state
        .update_credit_type_use_case
        .execute(
            &CreditTypeId(credit_type_id),
            CreditTypeUpdate {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(credit_type))
}

// Handler: Eliminar un tipo de crédito
// DELETE /credit-types/{credit_type_id}
#[utoipa::path(
    delete,
    path = "/credit-types/{credit_type_id}",
    params(("credit_type_id" = String, Path, description = "Credit type ID")),
    responses(
        (status = 204, description = "Credit type deleted"),
        (status = 404, description = "Credit type not found")
    )
)]
pub async fn delete_credit_type(
    State(state): State<Arc<AppState>>,
    Path(credit_type_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_credit_type_use_case
        .execute(&CreditTypeId(credit_type_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
