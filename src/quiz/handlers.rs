use actix_web::{web, HttpResponse, Responder};
use log::info;

use super::models::{AnswerResult, CheckAnswerRequest, Quiz, QuizRequest};
use super::service;
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    context_path = "/api",
    tag = "Quiz",
    post,
    path = "/quiz/generate",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Generated quiz", body = Quiz),
        (status = 400, description = "Text too short or invalid question count", body = ErrorResponse),
        (status = 429, description = "Model rate limit reached", body = ErrorResponse),
        (status = 500, description = "Model output could not be turned into a quiz", body = ErrorResponse)
    )
)]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    body: web::Json<QuizRequest>,
) -> impl Responder {
    info!("Executing generate_quiz handler ({} questions)", body.num_questions);
    match service::generate_quiz(
        state.generator.as_ref(),
        &state.quizzes,
        &body.text,
        body.num_questions,
    )
    .await
    {
        Ok(quiz) => HttpResponse::Ok().json(quiz),
        Err(e) => e.into(),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Quiz",
    post,
    path = "/quiz/check-answer",
    request_body = CheckAnswerRequest,
    responses(
        (status = 200, description = "Answer graded", body = AnswerResult),
        (status = 404, description = "Quiz or question not found", body = ErrorResponse)
    )
)]
pub async fn check_answer(
    state: web::Data<AppState>,
    body: web::Json<CheckAnswerRequest>,
) -> impl Responder {
    info!("Executing check_answer handler for quiz {}", body.quiz_id);
    match service::check_answer(&state.quizzes, &body.quiz_id, &body.question_id, body.answer) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => e.into(),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Quiz",
    get,
    path = "/quiz/{id}",
    params(
        ("id" = String, Path, description = "Quiz id returned by /quiz/generate")
    ),
    responses(
        (status = 200, description = "Stored quiz", body = Quiz),
        (status = 404, description = "Quiz not found", body = ErrorResponse)
    )
)]
pub async fn get_quiz(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    match service::get_quiz(&state.quizzes, &id) {
        Ok(quiz) => HttpResponse::Ok().json(quiz),
        Err(e) => e.into(),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/quiz/generate").route(web::post().to(generate_quiz)))
        .service(web::resource("/quiz/check-answer").route(web::post().to(check_answer)))
        .service(web::resource("/quiz/{id}").route(web::get().to(get_quiz)));
}
