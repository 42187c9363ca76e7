use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a003_contract_template::aggregate::{ContractTemplate, TemplateSearch};
use contracts::domain::a003_contract_template::offer_catalog::{OfferCatalogItem, OfferSearch};
use contracts::domain::a004_subscription::pricing::{Amounts, QuoteRequest};
use contracts::enums::contract_domain::ContractDomain;

use super::error::{parse_id, ApiResult};
use crate::domain::a003_contract_template::service;

/// GET /api/catalog/templates?search=&domain=
pub async fn list(Query(search): Query<TemplateSearch>) -> Json<Vec<ContractTemplate>> {
    Json(service::list(&search))
}

/// GET /api/catalog/templates/:template_id
pub async fn get_by_id(Path(template_id): Path<String>) -> ApiResult<Json<ContractTemplate>> {
    Ok(Json(service::get_by_id(parse_id(&template_id)?)?))
}

/// POST /api/catalog/templates/:template_id/quote
pub async fn quote(
    Path(template_id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<Json<Amounts>> {
    Ok(Json(service::quote_template(parse_id(&template_id)?, &request)?))
}

/// GET /api/catalog/domains
pub async fn domains() -> Json<Vec<ContractDomain>> {
    Json(service::domains())
}

/// GET /api/catalog/offers?offer_type=&search=
pub async fn offers(Query(search): Query<OfferSearch>) -> Json<Vec<OfferCatalogItem>> {
    Json(service::offers(&search))
}
