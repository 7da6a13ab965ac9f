//! API Key authentication middleware

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request},
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::{
    collections::HashSet,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::warn;

use crate::error::AppError;

/// Paths reachable without a key: health, option listings and stored temp
/// assets (the generation service fetches those).
fn is_public_path(path: &str) -> bool {
    path == "/health" || path.starts_with("/options/") || path.starts_with("/temp/")
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    api_keys: Arc<HashSet<String>>,
}

impl AuthLayer {
    pub fn new(api_keys: Vec<String>) -> Self {
        Self {
            api_keys: Arc::new(api_keys.into_iter().collect()),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            api_keys: self.api_keys.clone(),
        }
    }
}

/// Authentication middleware service
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    api_keys: Arc<HashSet<String>>,
}

impl<S> AuthMiddleware<S> {
    fn check(&self, request: &Request<Body>) -> Result<(), &'static str> {
        if self.api_keys.is_empty() || is_public_path(request.uri().path()) {
            return Ok(());
        }

        let key = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim());

        match key {
            Some(key) if self.api_keys.contains(key) => Ok(()),
            Some(_) => Err("Invalid API key"),
            None => Err("API key required. Provide via Authorization header: 'Bearer YOUR_API_KEY'"),
        }
    }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        match self.check(&request) {
            Ok(()) => Box::pin(self.inner.call(request)),
            Err(message) => {
                warn!(path = %request.uri().path(), "{}", message);
                let response = AppError::AuthenticationFailed(message.to_string()).into_response();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
