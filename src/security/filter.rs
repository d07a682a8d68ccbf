//! Response filters and the security-header filter.
//!
//! A [`ResponseFilter`] sits in the request pipeline, hands the request to the
//! rest of the chain and may decorate whatever comes back. The framework
//! adapters in [`crate::security::layer`] mount any filter without touching
//! its logic.
//!
//! Headers are appended once the chain has answered, so when a downstream
//! stage already set one of the same name its value comes first and ours
//! follows it.

use std::future::Future;
use std::sync::Arc;

use axum::http::{Request, Response};

use crate::security::headers::HeaderSet;

/// A single pipeline stage wrapping the remainder of the chain.
///
/// `next` is the continuation. Implementations call it exactly once and
/// return its result; `FnOnce` rules out calling it twice.
pub trait ResponseFilter: Clone + Send + Sync + 'static {
    fn apply<B, RB, E, N, Fut>(
        &self,
        request: Request<B>,
        next: N,
    ) -> impl Future<Output = Result<Response<RB>, E>> + Send
    where
        B: Send,
        RB: Send,
        E: Send,
        N: FnOnce(Request<B>) -> Fut + Send,
        Fut: Future<Output = Result<Response<RB>, E>> + Send;
}

/// Appends a fixed [`HeaderSet`] to every response.
///
/// Never short-circuits, never looks at the request, status or body.
#[derive(Debug, Clone)]
pub struct SecurityHeadersFilter {
    headers: Arc<HeaderSet>,
}

impl SecurityHeadersFilter {
    pub fn new(headers: Arc<HeaderSet>) -> Self {
        Self { headers }
    }

    pub fn security_defaults() -> Self {
        Self::new(Arc::new(HeaderSet::security_defaults()))
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }
}

impl Default for SecurityHeadersFilter {
    fn default() -> Self {
        Self::security_defaults()
    }
}

impl ResponseFilter for SecurityHeadersFilter {
    fn apply<B, RB, E, N, Fut>(
        &self,
        request: Request<B>,
        next: N,
    ) -> impl Future<Output = Result<Response<RB>, E>> + Send
    where
        B: Send,
        RB: Send,
        E: Send,
        N: FnOnce(Request<B>) -> Fut + Send,
        Fut: Future<Output = Result<Response<RB>, E>> + Send,
    {
        let headers = Arc::clone(&self.headers);
        async move {
            // The response only exists once the chain has produced it.
            let mut response = next(request).await?;
            headers.append_to(response.headers_mut());
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue, StatusCode};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request() -> Request<()> {
        Request::builder().uri("/anything").body(()).unwrap()
    }

    #[tokio::test]
    async fn adds_every_header_and_keeps_status_and_body() {
        let filter = SecurityHeadersFilter::security_defaults();

        let response = filter
            .apply(request(), |_req| async {
                Ok::<_, Infallible>(
                    Response::builder()
                        .status(StatusCode::IM_A_TEAPOT)
                        .body("short and stout")
                        .unwrap(),
                )
            })
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(*response.body(), "short and stout");
        for (name, value) in filter.headers().iter() {
            assert_eq!(response.headers().get(name), Some(value));
        }
    }

    #[tokio::test]
    async fn invokes_continuation_once_with_the_same_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let _ = SecurityHeadersFilter::default()
            .apply(request(), move |req| async move {
                seen.fetch_add(1, Ordering::SeqCst);
                assert_eq!(req.uri().path(), "/anything");
                Ok::<_, Infallible>(Response::new(()))
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn downstream_header_survives_alongside_ours() {
        let response = SecurityHeadersFilter::default()
            .apply(request(), |_req| async {
                let mut response = Response::new(());
                response
                    .headers_mut()
                    .insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
                Ok::<_, Infallible>(response)
            })
            .await
            .unwrap();

        let values: Vec<_> = response
            .headers()
            .get_all(header::REFERRER_POLICY)
            .iter()
            .collect();
        assert_eq!(values, ["no-referrer", "strict-origin-when-cross-origin"]);
    }

    #[tokio::test]
    async fn continuation_errors_pass_through() {
        let result = SecurityHeadersFilter::default()
            .apply(request(), |_req| async { Err::<Response<()>, _>("closed") })
            .await;

        assert_eq!(result.unwrap_err(), "closed");
    }

    #[tokio::test]
    async fn custom_set_is_applied_verbatim() {
        let set = HeaderSet::new([("X-Custom", "1")]).unwrap();
        let filter = SecurityHeadersFilter::new(Arc::new(set));

        let response = filter
            .apply(request(), |_req| async { Ok::<_, Infallible>(Response::new(())) })
            .await
            .unwrap();

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()["x-custom"], "1");
    }
}
