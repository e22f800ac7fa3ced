use axum::{
    extract::Query,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::pricing_controller::PricingController;
use crate::dto::pricing_dto::{
    CategorySummary, ModelsQuery, ModelsResponse, PriceQuoteRequest, PriceQuoteResponse, PricingOptionsResponse,
};
use crate::state::AppState;

pub fn create_pricing_router() -> Router<AppState> {
    Router::new()
        .route("/options", get(get_options))
        .route("/vehicles/makes", get(get_makes))
        .route("/vehicles/models", get(get_models))
        .route("/vehicles/categories", get(get_categories))
        .route("/quote", post(calculate_quote))
}

async fn get_options() -> Json<PricingOptionsResponse> {
    Json(PricingController::options())
}

async fn get_makes() -> Json<Vec<&'static str>> {
    Json(PricingController::makes())
}

async fn get_models(Query(query): Query<ModelsQuery>) -> Json<ModelsResponse> {
    Json(PricingController::models(query.make))
}

async fn get_categories() -> Json<Vec<CategorySummary>> {
    Json(PricingController::categories())
}

async fn calculate_quote(Json(request): Json<PriceQuoteRequest>) -> Json<PriceQuoteResponse> {
    Json(PricingController::quote(request))
}
