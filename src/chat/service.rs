use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, error, info};

use super::models::ChatEvent;
use crate::error::ApiError;
use crate::llm::{prompts, GenerationError, TextGenerator, TextStream};
use crate::validation::require_non_blank;

pub async fn generate_response(
    generator: &dyn TextGenerator,
    message: &str,
    context: &str,
) -> Result<String, ApiError> {
    require_non_blank(message, "content")?;
    let reply = generator.generate(&prompts::chat_prompt(message, context)).await?;
    info!("Chat reply generated ({} characters)", reply.len());
    Ok(reply)
}

/// Streams a chat reply as events: chunks in model order, then exactly one
/// `Done` or `Error`. Partial chunks already sent are kept on error.
pub fn generate_response_stream(
    generator: Arc<dyn TextGenerator>,
    message: String,
    context: String,
) -> BoxStream<'static, ChatEvent> {
    let prompt = prompts::chat_prompt(&message, &context);
    let opened = async move { generator.generate_stream(&prompt).await };

    stream::once(opened)
        .flat_map(|opened| match opened {
            Ok(chunks) => chat_events(chunks),
            Err(e) => stream::once(async move { failure_event(&e) }).boxed(),
        })
        .boxed()
}

/// Wraps model fragments into chat events and terminates the sequence once.
pub fn chat_events(chunks: TextStream) -> BoxStream<'static, ChatEvent> {
    stream::unfold(Some(chunks), |state| async move {
        let mut chunks = match state {
            Some(chunks) => chunks,
            None => return None,
        };
        match chunks.next().await {
            Some(Ok(content)) => Some((ChatEvent::Chunk { content }, Some(chunks))),
            Some(Err(e)) => Some((failure_event(&e), None)),
            None => {
                debug!("Chat stream completed");
                Some((ChatEvent::Done, None))
            }
        }
    })
    .boxed()
}

fn failure_event(err: &GenerationError) -> ChatEvent {
    error!("Chat stream failed: {:?}", err);
    ChatEvent::Error {
        message: err.public_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream::{self, StreamExt};

    fn scripted(items: Vec<Result<String, GenerationError>>) -> TextStream {
        Box::pin(stream::iter(items))
    }

    #[actix_web::test]
    async fn test_chunks_in_order_then_single_done() {
        let events: Vec<ChatEvent> = chat_events(scripted(vec![
            Ok("Hel".to_string()),
            Ok("lo".to_string()),
        ]))
        .collect()
        .await;

        assert_eq!(
            events,
            vec![
                ChatEvent::Chunk { content: "Hel".to_string() },
                ChatEvent::Chunk { content: "lo".to_string() },
                ChatEvent::Done,
            ]
        );
    }

    #[actix_web::test]
    async fn test_error_is_terminal() {
        let events: Vec<ChatEvent> = chat_events(scripted(vec![
            Ok("partial".to_string()),
            Err(GenerationError::RateLimited),
            Ok("never delivered".to_string()),
        ]))
        .collect()
        .await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ChatEvent::Chunk { content: "partial".to_string() });
        assert!(matches!(events[1], ChatEvent::Error { .. }));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    }

    #[actix_web::test]
    async fn test_empty_stream_only_signals_done() {
        let events: Vec<ChatEvent> = chat_events(scripted(Vec::new())).collect().await;
        assert_eq!(events, vec![ChatEvent::Done]);
    }

    #[test]
    fn test_sse_frames() {
        assert_eq!(
            ChatEvent::Chunk { content: "Hi".to_string() }.to_sse_frame(),
            "data: {\"type\":\"chunk\",\"content\":\"Hi\"}\n\n"
        );
        assert_eq!(ChatEvent::Done.to_sse_frame(), "data: {\"type\":\"done\"}\n\n");
        assert_eq!(
            ChatEvent::Error { message: "oops".to_string() }.to_sse_frame(),
            "data: {\"type\":\"error\",\"message\":\"oops\"}\n\n"
        );
    }
}
