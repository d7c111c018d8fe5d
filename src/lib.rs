use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
pub mod parser;
pub mod quiz;
pub mod state;
pub mod validation;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Request bodies carry whole documents.
const JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::document::handlers::upload_document,
        crate::document::handlers::summarize_text,
        crate::chat::handlers::send_message,
        crate::chat::handlers::send_message_stream,
        crate::quiz::handlers::generate_quiz,
        crate::quiz::handlers::check_answer,
        crate::quiz::handlers::get_quiz,
    ),
    components(
        schemas(
            document::models::DocumentSummary,
            document::models::SummarizeRequest,
            document::models::UploadResponse,
            document::models::UploadDocumentRequest,
            chat::models::ChatMessage,
            chat::models::ChatResponse,
            chat::models::ChatEvent,
            quiz::models::Question,
            quiz::models::Quiz,
            quiz::models::QuizRequest,
            quiz::models::CheckAnswerRequest,
            quiz::models::AnswerResult,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Documents", description = "Document upload and summarization endpoints."),
        (name = "Chat", description = "Study assistant chat endpoints."),
        (name = "Quiz", description = "Quiz generation and answer checking endpoints.")
    )
)]
pub struct ApiDoc;

/// Liveness probe. Also reports the model output format the parsers expect.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "output_format_version": llm::prompts::OUTPUT_FORMAT_VERSION,
    }))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new("InvalidInput", &err.to_string()));
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

/// Registers every `/api` route. Shared by `run` and the integration tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .configure(document::config)
            .configure(chat::config)
            .configure(quiz::config),
    )
    .service(web::resource("/health").route(web::get().to(health)));
}

fn cors_for(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config
        .cors_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}. Check your environment or .env file.", e);
            std::process::exit(1);
        }
    };

    let app_state = match AppState::from_config(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to create the text generation client: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("study_assistant_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "Starting server at http://{}:{} (model {}, output format v{}, {} allowed origins)",
        config.host,
        config.port,
        config.model_name,
        llm::prompts::OUTPUT_FORMAT_VERSION,
        config.cors_origins.len()
    );

    let bind_address = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .wrap(cors_for(&config))
            .app_data(app_state.clone())
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await
}
