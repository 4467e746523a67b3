//! Security middleware for HTTPS enforcement and response headers.
//!
//! In production, plain-HTTP requests are rejected unless they arrive through
//! a trusted proxy that reports `x-forwarded-proto: https`, and every
//! response carries the standard hardening headers.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use fit_shared::config::Environment;

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    /// Peers whose `x-forwarded-proto` header is trusted
    trusted_proxies: Vec<String>,
}

impl SecurityMiddleware {
    pub fn for_environment(environment: Environment) -> Self {
        let production = environment.is_production();
        let middleware = Self {
            enforce_https: production,
            add_security_headers: production,
            trusted_proxies: Vec::new(),
        };

        log::info!(
            "Security middleware configured: enforce_https={}, add_headers={}",
            middleware.enforce_https,
            middleware.add_security_headers
        );
        middleware
    }

    /// Comma-separated `TRUSTED_PROXIES` list
    pub fn with_trusted_proxies_from_env(mut self) -> Self {
        self.trusted_proxies = std::env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn with_trusted_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.trusted_proxies.push(proxy.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::new(self.trusted_proxies.clone()),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(ErrorForbidden("HTTPS required"));
            }

            let mut response = service.call(req).await?;

            if add_security_headers {
                add_security_response_headers(&mut response);
            }

            Ok(response)
        })
    }
}

/// HTTPS connection, a trusted proxy forwarding HTTPS, or a loopback peer
///
/// Only the socket is consulted for scheme and origin. `Host`, `Forwarded`
/// and `x-forwarded-*` are client-controlled unless the peer is a trusted proxy.
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    if req.app_config().secure() || req.uri().scheme_str() == Some("https") {
        return true;
    }

    let Some(peer_ip) = req.peer_addr().map(|addr| addr.ip()) else {
        return false;
    };

    if peer_ip.is_loopback() {
        return true;
    }

    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false);

    forwarded_https && is_trusted_proxy(&peer_ip.to_string(), trusted_proxies)
}

fn is_trusted_proxy(peer_ip: &str, trusted_proxies: &[String]) -> bool {
    !peer_ip.is_empty() && trusted_proxies.iter().any(|trusted| trusted == peer_ip)
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test as actix_test, web, App, HttpResponse};
    use std::net::SocketAddr;

    const REMOTE_PEER: &str = "203.0.113.9:41000";
    const PROXY_PEER: &str = "10.0.0.1:41000";

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn peer(addr: &str) -> SocketAddr {
        addr.parse().unwrap()
    }

    #[actix_web::test]
    async fn test_production_adds_security_headers() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Production))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr(peer("127.0.0.1:41000"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(resp.headers().contains_key(header::STRICT_TRANSPORT_SECURITY));
    }

    #[actix_web::test]
    async fn test_production_blocks_plain_http() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Production))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr(peer(REMOTE_PEER))
            .insert_header((header::HOST, "api.fitai.pro"))
            .to_request();
        let result = actix_test::try_call_service(&app, req).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_production_ignores_client_supplied_scheme_and_host() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Production))
                .route("/", web::get().to(ok)),
        )
        .await;

        let forged = [
            ("x-forwarded-proto", "https"),
            ("forwarded", "proto=https"),
            ("host", "localhost"),
            ("x-forwarded-host", "127.0.0.1"),
        ];
        for (name, value) in forged {
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr(peer(REMOTE_PEER))
                .insert_header((name, value))
                .to_request();
            let result = actix_test::try_call_service(&app, req).await;
            assert!(result.is_err(), "{}: {} was accepted", name, value);
        }
    }

    #[actix_web::test]
    async fn test_trusted_proxy_may_forward_https() {
        let app = actix_test::init_service(
            App::new()
                .wrap(
                    SecurityMiddleware::for_environment(Environment::Production)
                        .with_trusted_proxy("10.0.0.1"),
                )
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr(peer(PROXY_PEER))
            .insert_header(("x-forwarded-proto", "https"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr(peer(PROXY_PEER))
            .insert_header(("x-forwarded-proto", "http"))
            .to_request();
        let result = actix_test::try_call_service(&app, req).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_development_passes_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SecurityMiddleware::for_environment(Environment::Development))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr(peer(REMOTE_PEER))
            .insert_header((header::HOST, "api.fitai.pro"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key(header::X_FRAME_OPTIONS));
    }

    #[test]
    fn test_trusted_proxy_matching() {
        let proxies = vec!["10.0.0.1".to_string()];
        assert!(is_trusted_proxy("10.0.0.1", &proxies));
        assert!(!is_trusted_proxy("10.0.0.2", &proxies));
        assert!(!is_trusted_proxy("", &proxies));
    }
}
