//! Feature gate middleware for API resources.
//!
//! Wraps a group of routes so that they only run while a given toggle is
//! enabled. A blocked request gets the fixed plain-text
//! [`FEATURE_DISABLED_MESSAGE`] with status 200, and the handler is skipped.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::debug;

use featuregate_common::prelude::*;

use crate::{FeatureRegistry, FeatureToggle, ToggleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Blocked,
}

/// Pre-check bound to one toggle. Holds no per-request state.
#[derive(Clone)]
pub struct FeatureGate {
    toggle: Arc<dyn FeatureToggle>,
}

impl FeatureGate {
    pub fn new(toggle: Arc<dyn FeatureToggle>) -> Self {
        Self { toggle }
    }

    /// Gate on the registered instance of `T`.
    pub fn for_toggle<T: FeatureToggle>(registry: &FeatureRegistry) -> Result<Self, ToggleError> {
        let toggle: Arc<dyn FeatureToggle> = registry
            .get::<T>()
            .ok_or_else(|| ToggleError::UnknownToggle(std::any::type_name::<T>().to_string()))?;
        Ok(Self::new(toggle))
    }

    pub fn toggle(&self) -> &str {
        self.toggle.name()
    }

    pub fn decide(&self) -> Result<GateDecision, ToggleError> {
        Ok(if self.toggle.is_enabled()? {
            GateDecision::Allowed
        } else {
            GateDecision::Blocked
        })
    }
}

/// Middleware that short-circuits requests while the gate's toggle is off.
///
/// # Usage
/// ```ignore
/// use axum::{Router, middleware};
///
/// let app = Router::new()
///     .route_layer(middleware::from_fn_with_state(gate, feature_gate));
/// ```
pub async fn feature_gate(
    State(gate): State<FeatureGate>,
    request: Request,
    next: Next,
) -> Result<Response, ToggleError> {
    match gate.decide()? {
        GateDecision::Allowed => Ok(next.run(request).await),
        GateDecision::Blocked => {
            debug!("{} disabled, blocking {}", gate.toggle(), request.uri());
            Ok(FEATURE_DISABLED_MESSAGE.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    struct Flag {
        value: AtomicBool,
        broken: bool,
    }

    impl FeatureToggle for Flag {
        fn name(&self) -> &'static str {
            "Flag"
        }

        fn is_enabled(&self) -> Result<bool, ToggleError> {
            if self.broken {
                return Err(ToggleError::ConfigurationMissing {
                    key: "FeatureToggle:Flag".into(),
                });
            }
            Ok(self.value.load(Ordering::SeqCst))
        }
    }

    fn app(flag: Arc<Flag>, calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/guarded",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "handler ran"
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(
                FeatureGate::new(flag),
                feature_gate,
            ))
    }

    async fn call(app: Router) -> (StatusCode, String) {
        let resp = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/guarded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn enabled_runs_handler_unmodified() {
        let calls = Arc::new(AtomicUsize::new(0));
        let flag = Arc::new(Flag {
            value: AtomicBool::new(true),
            broken: false,
        });

        let (status, body) = call(app(flag, calls.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "handler ran");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disabled_skips_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let flag = Arc::new(Flag {
            value: AtomicBool::new(false),
            broken: false,
        });

        let resp = app(flag, calls.clone())
            .oneshot(
                axum::http::Request::builder()
                    .uri("/guarded")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, FEATURE_DISABLED_MESSAGE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn decision_is_made_per_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let flag = Arc::new(Flag {
            value: AtomicBool::new(false),
            broken: false,
        });
        let app = app(flag.clone(), calls.clone());

        let (_, body) = call(app.clone()).await;
        assert_eq!(body, FEATURE_DISABLED_MESSAGE);

        flag.value.store(true, Ordering::SeqCst);
        let (_, body) = call(app).await;
        assert_eq!(body, "handler ran");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn evaluation_failure_is_not_disabled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let flag = Arc::new(Flag {
            value: AtomicBool::new(true),
            broken: true,
        });

        let (status, body) = call(app(flag, calls.clone())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(body, FEATURE_DISABLED_MESSAGE);
        assert!(body.contains("FeatureToggle:Flag"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn for_toggle_requires_registration() {
        let registry = FeatureRegistry::new();

        assert!(matches!(
            FeatureGate::for_toggle::<crate::ValuesFeature>(&registry),
            Err(ToggleError::UnknownToggle(_))
        ));
    }
}
