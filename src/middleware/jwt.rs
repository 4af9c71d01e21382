//! Bearer token middleware for the GraphQL endpoint
//!
//! Deliberately permissive: requests with a missing, malformed, or invalid
//! Authorization header proceed unauthenticated. The middleware only attaches
//! an identity when a valid token is presented; per-operation authorization
//! happens in the resolvers.

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::security::jwt::{self, AuthenticatedMember, TokenService};

/// JWT authentication middleware factory
pub struct JwtMiddleware {
    tokens: TokenService,
}

impl JwtMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: S,
    tokens: TokenService,
}

impl<S> JwtMiddlewareService<S> {
    /// Resolve the caller identity from the Authorization header, if any.
    ///
    /// Every failure branch returns `None`: absent header, non-Bearer scheme,
    /// invalid or expired token, non-UUID subject.
    fn resolve_identity(&self, req: &ServiceRequest) -> Option<AuthenticatedMember> {
        // Copy the header to an owned String so no borrow is held when the
        // caller mutates request extensions
        let header = req
            .headers()
            .get("Authorization")?
            .to_str()
            .ok()?
            .to_string();

        let token = header.strip_prefix("Bearer ")?;

        if !self.tokens.validate(token) {
            tracing::debug!("bearer token failed validation, continuing unauthenticated");
            return None;
        }

        let subject = self.tokens.parse_subject(token).ok()?;
        jwt::build_identity(&subject)
    }
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(identity) = self.resolve_identity(&req) {
            req.extensions_mut().insert(identity);
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedMember>().copied() {
            Some(identity) => ready(Ok(identity)),
            None => ready(Err(ErrorUnauthorized("Authentication required"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use uuid::Uuid;

    use crate::security::jwt::Claims;

    fn create_test_jwt(subject: &str, expires_in_seconds: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + expires_in_seconds) as usize,
            iat: now as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    async fn whoami_handler(identity: Option<AuthenticatedMember>) -> HttpResponse {
        match identity {
            Some(identity) => HttpResponse::Ok().body(format!("member:{}", identity.member_id)),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(JwtMiddleware::new(TokenService::new(
                "test-secret".to_string(),
                3600,
            )))
            .route("/whoami", web::get().to(whoami_handler))
    }

    #[actix_web::test]
    async fn test_valid_jwt_attaches_identity() {
        let app = test::init_service(test_app()).await;
        let member_id = Uuid::new_v4();
        let token = create_test_jwt(&member_id.to_string(), 3600, "test-secret");

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, format!("member:{}", member_id).as_bytes());
    }

    #[actix_web::test]
    async fn test_missing_header_passes_through_unauthenticated() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get().uri("/whoami").to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn test_non_bearer_scheme_passes_through_unauthenticated() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn test_expired_jwt_passes_through_unauthenticated() {
        let app = test::init_service(test_app()).await;
        let token = create_test_jwt(&Uuid::new_v4().to_string(), -3600, "test-secret");

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn test_garbage_token_passes_through_unauthenticated() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }

    #[actix_web::test]
    async fn test_non_uuid_subject_passes_through_unauthenticated() {
        let app = test::init_service(test_app()).await;
        let token = create_test_jwt("not-a-uuid", 3600, "test-secret");

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous".as_bytes());
    }
}
