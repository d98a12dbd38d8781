//! The HTTP surface of the prediction service.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{
        DefaultBodyLimit, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use comms::{PredictRequest, PredictResponse};
use log::{debug, warn};

use crate::{
    currency::format_usd,
    error::ApiErr,
    form::{self, FormFields},
    predictor::Predictor,
    render::{self, Notice},
};

/// Upper bound for a request body.
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Builds the router answering every route from `predictor`.
///
/// * `GET /` - the prediction form.
/// * `POST /predict` - a form submission, answered with the page showing the estimate.
/// * `POST /api/predict` - a JSON `PredictRequest`, answered with a `PredictResponse`.
/// * `GET /health` - `ok`.
pub fn app(predictor: Arc<Predictor>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(predictor)
}

async fn index() -> Html<String> {
    Html(render::page(&form::display(&form::defaults()), None))
}

async fn health() -> &'static str {
    "ok"
}

/// Re-renders the page with the submitted values and either the estimate or the error.
async fn predict_form(
    State(predictor): State<Arc<Predictor>>,
    fields: Result<Form<FormFields>, FormRejection>,
) -> Response {
    let fields = match fields {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!("rejecting form: {}", rejection.body_text());
            let html = render::page(
                &form::display(&form::defaults()),
                Some(Notice::Error(&rejection.body_text())),
            );
            return (rejection.status(), Html(html)).into_response();
        }
    };

    let echo = fields.echo();
    let outcome = fields
        .parse()
        .map_err(ApiErr::from)
        .and_then(|values| estimate(&predictor, &values));

    match outcome {
        Ok(price) => {
            let formatted = format_usd(price);
            debug!("form estimate {formatted}");
            let html = render::page(&echo, Some(Notice::Estimate(&formatted)));
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(e) => {
            debug!("form rejected: {e}");
            let html = render::page(&echo, Some(Notice::Error(&e.to_string())));
            (e.status(), Html(html)).into_response()
        }
    }
}

async fn predict_json(
    State(predictor): State<Arc<Predictor>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiErr> {
    let Json(values) = payload?;
    let values = form::validate(values)?;

    let prediction = estimate(&predictor, &values)?;
    debug!("api estimate {prediction} for {values:?}");

    Ok(Json(PredictResponse {
        prediction,
        formatted: format_usd(prediction),
    }))
}

fn estimate(predictor: &Predictor, values: &PredictRequest) -> Result<f64, ApiErr> {
    let price = predictor.predict(values).map_err(|e| {
        warn!("prediction failed for {values:?}: {e}");
        ApiErr::Internal(e.to_string())
    })?;

    if !price.is_finite() {
        warn!("prediction for {values:?} isn't finite: {price}");
        return Err(ApiErr::Internal(format!("prediction isn't finite: {price}")));
    }

    Ok(price)
}
