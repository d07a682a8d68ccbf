//! Mounting response filters into tower and axum.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};
use tower::{Layer, Service};

use crate::security::filter::{ResponseFilter, SecurityHeadersFilter};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Tower layer running a [`ResponseFilter`] around the inner service.
#[derive(Debug, Clone)]
pub struct SecurityHeadersLayer<F = SecurityHeadersFilter> {
    filter: F,
}

impl<F: ResponseFilter> SecurityHeadersLayer<F> {
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl SecurityHeadersLayer {
    pub fn security_defaults() -> Self {
        Self::new(SecurityHeadersFilter::security_defaults())
    }
}

impl<S, F: Clone> Layer<S> for SecurityHeadersLayer<F> {
    type Service = SecurityHeadersService<S, F>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            filter: self.filter.clone(),
        }
    }
}

/// Service produced by [`SecurityHeadersLayer`].
#[derive(Debug, Clone)]
pub struct SecurityHeadersService<S, F = SecurityHeadersFilter> {
    inner: S,
    filter: F,
}

impl<S, F, ReqBody, ResBody> Service<http::Request<ReqBody>> for SecurityHeadersService<S, F>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    F: ResponseFilter,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = http::Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<ReqBody>) -> Self::Future {
        // poll_ready was driven on `self.inner`, so that instance serves this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let filter = self.filter.clone();

        Box::pin(async move {
            filter
                .apply(request, move |request| inner.call(request))
                .await
        })
    }
}

/// Axum middleware adapter, for use with `axum::middleware::from_fn_with_state`.
pub async fn security_headers_middleware(
    State(filter): State<SecurityHeadersFilter>,
    request: Request,
    next: Next,
) -> Response {
    let result = filter
        .apply(request, |request| async move {
            Ok::<_, Infallible>(next.run(request).await)
        })
        .await;

    match result {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
