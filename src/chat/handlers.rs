use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use log::info;

use super::models::{ChatEvent, ChatMessage, ChatResponse};
use super::service;
use crate::validation::require_non_blank;
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Chat",
    post,
    path = "/chat/message",
    request_body = ChatMessage,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Empty message", body = ErrorResponse),
        (status = 429, description = "Model rate limit reached", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn send_message(
    state: web::Data<AppState>,
    body: web::Json<ChatMessage>,
) -> impl Responder {
    info!("Executing send_message handler");
    match service::generate_response(state.generator.as_ref(), &body.content, &body.context).await {
        Ok(content) => HttpResponse::Ok().json(ChatResponse { content }),
        Err(e) => e.into(),
    }
}

/// Server-sent events: `{"type":"chunk"}` frames followed by one `done` or `error` frame.
#[utoipa::path(
    context_path = "/api",
    tag = "Chat",
    post,
    path = "/chat/message/stream",
    request_body = ChatMessage,
    responses(
        (status = 200, description = "text/event-stream of ChatEvent frames", body = ChatEvent, content_type = "text/event-stream"),
        (status = 400, description = "Empty message", body = ErrorResponse)
    )
)]
pub async fn send_message_stream(
    state: web::Data<AppState>,
    body: web::Json<ChatMessage>,
) -> impl Responder {
    info!("Executing send_message_stream handler");
    if let Err(e) = require_non_blank(&body.content, "content") {
        return HttpResponse::from(e);
    }

    let ChatMessage { content, context } = body.into_inner();
    let frames = service::generate_response_stream(state.generator.clone(), content, context)
        .map(|event| Ok::<_, actix_web::Error>(web::Bytes::from(event.to_sse_frame())));

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(frames)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat/message").route(web::post().to(send_message)))
        .service(web::resource("/chat/message/stream").route(web::post().to(send_message_stream)));
}
