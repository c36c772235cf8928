use actix_web::{web, HttpResponse, Responder};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DisplaySettings, ProgressSettings};
use crate::core::{
    validator::{
        HDD_OPTIONS_GB, RAM_OPTIONS_GB, SCREEN_SIZE_DEFAULT_INCHES, SCREEN_SIZE_MAX_INCHES,
        SCREEN_SIZE_MIN_INCHES, SSD_OPTIONS_GB, WEIGHT_DEFAULT_KG, WEIGHT_MAX_KG, WEIGHT_MIN_KG, YES_NO,
    },
    Valuator, SUPPORTED_RESOLUTIONS,
};
use crate::error::ValuationError;
use crate::models::{
    CategoricalField, HealthResponse, NumericRange, OptionsResponse, ValuationRequest, ValuationResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub valuator: Arc<Valuator>,
    pub progress: ProgressSettings,
    pub display: DisplaySettings,
}

/// Configure all valuation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/options", web::get().to(get_options))
        .route("/valuations", web::post().to(create_valuation));
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.valuator.model().name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Selection options endpoint
///
/// GET /api/v1/options
///
/// Category domains come from the loaded model; everything else is the
/// fixed form vocabulary.
async fn get_options(state: web::Data<AppState>) -> impl Responder {
    let model = state.valuator.model();
    let category_domains: BTreeMap<String, Vec<String>> = CategoricalField::ALL
        .iter()
        .map(|field| {
            let domain = model.category_domain(*field).map(<[String]>::to_vec).unwrap_or_default();
            (field.as_str().to_string(), domain)
        })
        .collect();

    HttpResponse::Ok().json(OptionsResponse {
        category_domains,
        resolutions: SUPPORTED_RESOLUTIONS.iter().map(|r| r.to_string()).collect(),
        ram_gb: RAM_OPTIONS_GB.to_vec(),
        hdd_gb: HDD_OPTIONS_GB.to_vec(),
        ssd_gb: SSD_OPTIONS_GB.to_vec(),
        yes_no: YES_NO.iter().map(|v| v.to_string()).collect(),
        screen_size_inches: NumericRange {
            min: SCREEN_SIZE_MIN_INCHES,
            max: SCREEN_SIZE_MAX_INCHES,
            default: SCREEN_SIZE_DEFAULT_INCHES,
            step: 0.1,
        },
        weight_kg: NumericRange {
            min: WEIGHT_MIN_KG,
            max: WEIGHT_MAX_KG,
            default: WEIGHT_DEFAULT_KG,
            step: 0.1,
        },
    })
}

/// Appraise a laptop configuration
///
/// POST /api/v1/valuations
///
/// Request body:
/// ```json
/// {
///   "manufacturer": "Dell",
///   "formFactor": "Notebook",
///   "platform": "Windows",
///   "screenSizeInches": 15.6,
///   "resolution": "1920x1080",
///   "gpuBrand": "Intel",
///   "touchscreen": "No",
///   "ipsPanel": "Yes",
///   "cpuBrand": "Intel Core i5",
///   "ramGb": 8,
///   "hddGb": 0,
///   "ssdGb": 256,
///   "weightKg": 1.8,
///   "includeFeatures": false
/// }
/// ```
async fn create_valuation(
    state: web::Data<AppState>,
    req: web::Json<ValuationRequest>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4().to_string();
    let ValuationRequest { selection, include_features } = req.into_inner();

    simulate_progress(&state.progress).await;

    match state.valuator.appraise(&selection) {
        Ok(valuation) => {
            let price = valuation.prediction.price;
            tracing::info!("Valuation {} priced at {}", request_id, price);

            HttpResponse::Ok().json(ValuationResponse {
                request_id,
                price,
                formatted_price: format_price(price, &state.display.currency_symbol),
                log_price: valuation.prediction.log_price,
                derived: valuation.derived,
                features: include_features.then_some(valuation.features),
            })
        }
        Err(e) => {
            match &e {
                ValuationError::Validation(_) => {
                    tracing::info!("Valuation {} rejected: {}", request_id, e)
                }
                ValuationError::Computation(inner) if inner.is_input_caused() => {
                    tracing::warn!("Valuation {} failed: {}", request_id, e)
                }
                ValuationError::Computation(_) => {
                    tracing::error!("Valuation {} failed: {}", request_id, e)
                }
            }

            let report = e.report();
            HttpResponse::build(
                actix_web::http::StatusCode::from_u16(report.status_code)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            )
            .json(report)
        }
    }
}

/// Cosmetic progress delay; carries no functional contract
async fn simulate_progress(progress: &ProgressSettings) {
    for step in 0..progress.steps {
        tokio::time::sleep(Duration::from_millis(progress.step_millis)).await;
        tracing::trace!("Progress {}/{}", step + 1, progress.steps);
    }
}

/// Render a price with a currency symbol and thousands separators
pub fn format_price(price: u64, currency_symbol: &str) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{} {}", currency_symbol, grouped)
}
