//! Discord webhook delivery.
//!
//! [`WebhookDispatcher`] performs the HTTP POST with rate-limit compliance
//! and bounded retries; [`forward`] runs the per-webhook forwarding pass
//! that keeps deliveries in chronological order.

pub mod forward;

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::webhook::WebhookError;
use crate::model::message::DiscordMessage;

/// JSON body Discord returns alongside a 429.
#[derive(Deserialize)]
struct RateLimitBody {
    retry_after: f64,
}

#[derive(Clone)]
pub struct WebhookDispatcher {
    http: reqwest::Client,
}

impl WebhookDispatcher {
    pub fn new(timeout: Duration) -> Result<Self, WebhookError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WebhookError::from)?;
        Ok(Self { http })
    }

    /// Deliver one message, honoring 429 delays and retrying other failures
    /// up to `max_retries` with a fixed wait.
    ///
    /// A 429 sleeps for the provider-supplied delay and does not consume the
    /// retry budget.
    pub async fn send(
        &self,
        url: &str,
        message: &DiscordMessage,
        max_retries: u32,
        retry_wait: Duration,
    ) -> Result<(), WebhookError> {
        if message.is_empty() {
            return Err(WebhookError::EmptyMessage);
        }

        let mut failures = 0u32;
        loop {
            match self.post_once(url, message).await {
                Ok(()) => return Ok(()),
                Err(WebhookError::RateLimited { retry_after }) => {
                    tracing::info!("Webhook rate limited, waiting {retry_after}s");
                    tokio::time::sleep(Duration::from_secs(retry_after)).await;
                }
                Err(err) => {
                    failures += 1;
                    if failures > max_retries {
                        return Err(WebhookError::RetriesExhausted {
                            attempts: failures,
                            last_error: err.to_string(),
                        });
                    }
                    tracing::warn!(
                        "Webhook delivery attempt {failures} failed, retrying: {err}"
                    );
                    tokio::time::sleep(retry_wait).await;
                }
            }
        }
    }

    async fn post_once(&self, url: &str, message: &DiscordMessage) -> Result<(), WebhookError> {
        let response = self
            .http
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(WebhookError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            // Prefer the Retry-After header; fall back to the JSON body.
            let header_delay = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());

            let retry_after = match header_delay {
                Some(delay) => delay,
                None => response
                    .json::<RateLimitBody>()
                    .await
                    .map(|body| body.retry_after.ceil() as u64)
                    .unwrap_or(60),
            };
            return Err(WebhookError::RateLimited { retry_after });
        }

        let body = response.text().await.unwrap_or_default();
        Err(WebhookError::Delivery(format!(
            "webhook returned {status}: {body}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    use axum::{
        extract::State,
        http::{header, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::post,
        Router,
    };

    use super::*;

    fn message() -> DiscordMessage {
        DiscordMessage {
            content: Some("test".to_string()),
            username: None,
            avatar_url: None,
            embeds: Vec::new(),
        }
    }

    /// Serve a webhook endpoint that returns 429 with `Retry-After: 1` on
    /// the first hit and 204 afterwards, counting hits.
    async fn rate_limited_endpoint() -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/hook",
                post(|State(hits): State<Arc<AtomicUsize>>| async move {
                    if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        (
                            AxumStatus::TOO_MANY_REQUESTS,
                            [(header::RETRY_AFTER, "1")],
                            "",
                        )
                            .into_response()
                    } else {
                        AxumStatus::NO_CONTENT.into_response()
                    }
                }),
            )
            .with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/hook"), hits)
    }

    #[tokio::test]
    async fn test_429_waits_without_consuming_the_retry_budget() {
        let (url, hits) = rate_limited_endpoint().await;
        let dispatcher = WebhookDispatcher::new(Duration::from_secs(5)).unwrap();

        // Zero retries: any counted failure would abort immediately, so
        // success proves the 429 was waited out rather than retried.
        let started = Instant::now();
        dispatcher
            .send(&url, &message(), 0, Duration::from_millis(10))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_429_retry_after_header_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(429)
            .with_header("Retry-After", "7")
            .create_async()
            .await;

        let dispatcher = WebhookDispatcher::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/hook", server.url());
        let result = dispatcher.post_once(&url, &message()).await;

        mock.assert();
        assert!(matches!(
            result,
            Err(WebhookError::RateLimited { retry_after: 7 })
        ));
    }

    #[tokio::test]
    async fn test_429_json_body_is_the_fallback_delay_source() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"retry_after": 2.2}"#)
            .create_async()
            .await;

        let dispatcher = WebhookDispatcher::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/hook", server.url());
        let result = dispatcher.post_once(&url, &message()).await;

        mock.assert();
        // Fractional seconds round up so the wait is never too short.
        assert!(matches!(
            result,
            Err(WebhookError::RateLimited { retry_after: 3 })
        ));
    }
}
