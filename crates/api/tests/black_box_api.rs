use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use shelfwise_api::authz::Access;
use shelfwise_api::config::ApiConfig;
use shelfwise_api::context::CurrentSubject;
use shelfwise_auth::{AccessGuard, Claims, Hs256TokenVerifier, PolicyRegistry, Role, RouteId};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn_router(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let config = ApiConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            jwt_secret: JWT_SECRET.to_string(),
        };
        let app = shelfwise_api::app::build_app(&config).expect("route policies are valid");
        Self::spawn_router(app).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn claims_for(role: Role) -> Claims {
    let now = Utc::now();
    Claims {
        sub: Some(uuid::Uuid::now_v7().to_string()),
        id: None,
        email: format!("{role}@school.test"),
        role,
        issued_at: Some(now.timestamp()),
        expires_at: Some((now + ChronoDuration::minutes(10)).timestamp()),
    }
}

fn mint_jwt(claims: &Claims) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/auth/profile")).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let srv = TestServer::spawn().await;
    let mut claims = claims_for(Role::Administrator);
    let past = Utc::now() - ChronoDuration::hours(2);
    claims.issued_at = Some(past.timestamp());
    claims.expires_at = Some((past + ChronoDuration::minutes(10)).timestamp());

    let res = reqwest::Client::new()
        .get(srv.url("/auth/profile"))
        .bearer_auth(mint_jwt(&claims))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_the_verified_claims() {
    let srv = TestServer::spawn().await;
    let claims = claims_for(Role::Librarian);

    let client = reqwest::Client::new();
    let res = client
        .get(srv.url("/auth/profile"))
        .bearer_auth(mint_jwt(&claims))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Claims = res.json().await.unwrap();
    assert_eq!(body, claims);

    let res = client
        .get(srv.url("/auth/role"))
        .bearer_auth(mint_jwt(&claims))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "librarian");
}

#[tokio::test]
async fn loans_accept_librarians_and_administrators() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for role in Role::ALL {
        let claims = claims_for(role);
        let res = client
            .get(srv.url("/loans/mine"))
            .bearer_auth(mint_jwt(&claims))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "role {role}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["subject_id"].as_str(), claims.sub.as_deref());
    }
}

#[tokio::test]
async fn subject_falls_back_to_mirrored_id() {
    let srv = TestServer::spawn().await;
    let mut claims = claims_for(Role::Librarian);
    claims.sub = None;
    claims.id = Some("legacy-42".to_string());

    let res = reqwest::Client::new()
        .get(srv.url("/loans/mine"))
        .bearer_auth(mint_jwt(&claims))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["subject_id"], "legacy-42");
}

#[tokio::test]
async fn handler_override_restricts_librarians() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/loans/L-1/override"))
        .bearer_auth(mint_jwt(&claims_for(Role::Librarian)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
    assert_eq!(body["reason"], "insufficient_role");

    let admin = claims_for(Role::Administrator);
    let res = client
        .post(srv.url("/loans/L-1/override"))
        .bearer_auth(mint_jwt(&admin))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["loan_id"], "L-1");
    assert_eq!(body["overridden_by"].as_str(), admin.sub.as_deref());
}

#[tokio::test]
async fn admin_group_is_administrator_only() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/admin/roles"))
        .bearer_auth(mint_jwt(&claims_for(Role::Librarian)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(srv.url("/admin/roles"))
        .bearer_auth(mint_jwt(&claims_for(Role::Administrator)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let names: Vec<&str> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["administrator", "librarian"]);
}

#[tokio::test]
async fn public_route_with_roles_denies_anonymous_callers_as_forbidden() {
    let mut registry = PolicyRegistry::new();
    let route = RouteId::handler("reports", "summary");
    registry.mark_public(route.clone());
    registry.require_roles(route.clone(), [Role::Librarian]).unwrap();

    let access = Access::new(
        AccessGuard::new(registry),
        Arc::new(Hs256TokenVerifier::new(JWT_SECRET)),
    );
    let app = Router::new().route(
        "/reports/summary",
        access.protect(route, get(|CurrentSubject(s): CurrentSubject| async move { format!("{s:?}") })),
    );
    let srv = TestServer::spawn_router(app).await;

    let res = reqwest::get(srv.url("/reports/summary")).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reason"], "unauthenticated");
}

#[tokio::test]
async fn public_route_handlers_see_no_identity() {
    let mut registry = PolicyRegistry::new();
    let route = RouteId::handler("catalogue", "browse");
    registry.mark_public(route.clone());

    let access = Access::new(
        AccessGuard::new(registry),
        Arc::new(Hs256TokenVerifier::new(JWT_SECRET)),
    );
    let app = Router::new().route(
        "/catalogue",
        access.protect(route, get(|CurrentSubject(s): CurrentSubject| async move { format!("{s:?}") })),
    );
    let srv = TestServer::spawn_router(app).await;

    let res = reqwest::Client::new()
        .get(srv.url("/catalogue"))
        .bearer_auth(mint_jwt(&claims_for(Role::Librarian)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "None");
}
