use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::json;
use tracing::{error, info};

use crate::error::Result;
use crate::narrator::generator::TextGenerator;
use crate::narrator::summary::{build_prompt, extract_response, render_summary, LakeSummaryParams};

const PARAM_ERROR: &str = "All parameters are required and must be in the correct format";

pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/lake_summary", web::get().to(lake_summary))
        .route("/health", web::get().to(health));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

async fn lake_summary(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let params = match LakeSummaryParams::from_query(&query) {
        Ok(params) => params,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": PARAM_ERROR }));
        }
    };

    let category = params.wqi_category();
    let summary = render_summary(&params, category);
    let prompt = build_prompt(&params.lake, &summary);

    let output = match state.generator.generate(&prompt).await {
        Ok(output) => output,
        Err(e) => {
            error!(lake = %params.lake, error = %e, "text generation failed");
            return HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }));
        }
    };

    match extract_response(&output) {
        Ok(text) => HttpResponse::Ok().json(json!({ "generated_text": text })),
        Err(e) => {
            error!(lake = %params.lake, error = %e, "unexpected model output shape");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Run the lake summary service until interrupted
pub async fn run_server(
    host: &str,
    port: u16,
    workers: usize,
    generator: Arc<dyn TextGenerator>,
) -> Result<()> {
    let state = web::Data::new(AppState { generator });

    info!(host, port, workers, "starting lake summary service");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(app_config))
        .workers(workers)
        .bind((host, port))?
        .run()
        .await?;

    Ok(())
}
