//! Gateway route over HTTP
//!
//! `POST /api/generate` forwards one prompt to an [`ImageGateway`] and
//! answers with `{ "imageUrl": "data:image/..." }` or `{ "error": "..." }`.
//! `GET /health` answers `ok`.

use crate::gateway::{GenerateBody, GenerateReply};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use jasmine_application::{GenerationRequest, ImageGateway, SEED_RANGE};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

const PROMPT_REQUIRED: &str = "Prompt is required";
const GENERATION_FAILED: &str = "Failed to generate image";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn ImageGateway>,
}

/// HTTP front for an [`ImageGateway`]
pub struct GatewayServer {
    bind: String,
    gateway: Arc<dyn ImageGateway>,
}

impl GatewayServer {
    pub fn new(bind: impl Into<String>, gateway: Arc<dyn ImageGateway>) -> Self {
        Self {
            bind: bind.into(),
            gateway,
        }
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/generate", post(generate_handler))
            .route("/health", get(health_handler))
            .with_state(AppState {
                gateway: Arc::clone(&self.gateway),
            })
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<(), ServerError> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&self.bind)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.bind.clone(),
                source,
            })?;

        info!(
            "Gateway route listening on http://{}/api/generate (backend: {})",
            listener.local_addr()?,
            self.gateway.name()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
                info!("Shutting down gateway route");
            })
            .await?;

        Ok(())
    }
}

async fn generate_handler(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> (StatusCode, Json<GenerateReply>) {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            error!("Error generating image: {}", rejection.body_text());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateReply::error(GENERATION_FAILED)),
            );
        }
    };

    let Some(prompt) = body.prompt.filter(|p| !p.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(GenerateReply::error(PROMPT_REQUIRED)),
        );
    };

    let seed = body
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..SEED_RANGE));
    let request = GenerationRequest::new(prompt, seed);

    match state.gateway.generate(&request).await {
        Ok(image_url) => (StatusCode::OK, Json(GenerateReply::image(image_url))),
        Err(e) => {
            error!("Error generating image: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateReply::error(GENERATION_FAILED)),
            )
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jasmine_application::GatewayError;
    use std::sync::Mutex;

    struct FixedGateway {
        reply: Result<String, GatewayError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl FixedGateway {
        fn new(reply: Result<String, GatewayError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ImageGateway for FixedGateway {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply.clone()
        }
    }

    fn state(gateway: &Arc<FixedGateway>) -> State<AppState> {
        State(AppState {
            gateway: gateway.clone(),
        })
    }

    fn body(prompt: Option<&str>, seed: Option<u64>) -> Result<Json<GenerateBody>, JsonRejection> {
        Ok(Json(GenerateBody {
            prompt: prompt.map(str::to_string),
            seed,
        }))
    }

    #[tokio::test]
    async fn test_generate_returns_image_url() {
        let gateway = FixedGateway::new(Ok("data:image/png;base64,AA==".to_string()));

        let (status, Json(reply)) =
            generate_handler(state(&gateway), body(Some("a cat"), Some(7))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply, GenerateReply::image("data:image/png;base64,AA=="));
        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[GenerationRequest::new("a cat", 7)]);
    }

    #[tokio::test]
    async fn test_missing_prompt_is_bad_request() {
        let gateway = FixedGateway::new(Ok("unused".to_string()));

        for prompt in [None, Some(""), Some("   ")] {
            let (status, Json(reply)) = generate_handler(state(&gateway), body(prompt, None)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(reply, GenerateReply::error("Prompt is required"));
        }
        assert!(gateway.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_server_error() {
        let gateway = FixedGateway::new(Err(GatewayError::Upstream {
            status: 503,
            message: "Model is loading".to_string(),
        }));

        let (status, Json(reply)) = generate_handler(state(&gateway), body(Some("a cat"), None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply, GenerateReply::error("Failed to generate image"));
    }

    #[tokio::test]
    async fn test_missing_seed_is_drawn() {
        let gateway = FixedGateway::new(Ok("data:image/png;base64,AA==".to_string()));

        generate_handler(state(&gateway), body(Some("a cat"), None)).await;

        let seen = gateway.seen.lock().unwrap();
        assert!(seen[0].seed < SEED_RANGE);
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health_handler().await, "ok");
    }
}
