use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use log::{debug, info};

use super::extract::extract_text;
use super::models::{DocumentSummary, SummarizeRequest, UploadDocumentRequest, UploadResponse};
use super::multipart_parser::MultipartParser;
use super::service;
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Documents",
    post,
    path = "/documents/upload",
    request_body(content = inline(UploadDocumentRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted document text", body = UploadResponse),
        (status = 400, description = "Unsupported, empty, badly encoded or unreadable document", body = ErrorResponse),
        (status = 413, description = "Document too large", body = ErrorResponse)
    )
)]
pub async fn upload_document(payload: Multipart) -> impl Responder {
    info!("Executing upload_document handler");
    let upload = match MultipartParser::parse_document_upload(payload).await {
        Ok(upload) => upload,
        Err(e) => return HttpResponse::from(e),
    };
    debug!("Received '{}' ({} bytes)", upload.filename, upload.data.len());

    match extract_text(&upload.filename, upload.data).await {
        Ok(text) => HttpResponse::Ok().json(UploadResponse {
            text,
            filename: upload.filename,
        }),
        Err(e) => crate::error::ApiError::from(e).into(),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Documents",
    post,
    path = "/documents/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Two-section summary", body = DocumentSummary),
        (status = 400, description = "Text too short or empty", body = ErrorResponse),
        (status = 429, description = "Model rate limit reached", body = ErrorResponse),
        (status = 500, description = "Generation or parsing failed", body = ErrorResponse)
    )
)]
pub async fn summarize_text(
    state: web::Data<AppState>,
    body: web::Json<SummarizeRequest>,
) -> impl Responder {
    info!("Executing summarize_text handler");
    match service::generate_summary(state.generator.as_ref(), &body.text).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.into(),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/documents/upload").route(web::post().to(upload_document)))
        .service(web::resource("/documents/summarize").route(web::post().to(summarize_text)));
}
