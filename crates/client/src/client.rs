//! HTTP client for the Shelfwise API.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    ApiError, AuthFailureInterceptor, BearerTokenInterceptor, ClientConfig, Navigator, Notifier,
    RequestInterceptor, ResponseInterceptor, TokenCarrier,
};

/// Client with a fixed, ordered set of request/response hooks.
///
/// Build one per process and share it by reference (it is cheap to clone).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    carrier: TokenCarrier,
    request_hooks: Arc<[Arc<dyn RequestInterceptor>]>,
    response_hooks: Arc<[Arc<dyn ResponseInterceptor>]>,
}

pub struct ApiClientBuilder {
    config: ClientConfig,
    carrier: TokenCarrier,
    request_hooks: Vec<Arc<dyn RequestInterceptor>>,
    response_hooks: Vec<Arc<dyn ResponseInterceptor>>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

impl ApiClientBuilder {
    pub fn request_interceptor(mut self, hook: impl RequestInterceptor + 'static) -> Self {
        self.request_hooks.push(Arc::new(hook));
        self
    }

    pub fn response_interceptor(mut self, hook: impl ResponseInterceptor + 'static) -> Self {
        self.response_hooks.push(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(ApiClient {
            http,
            config: self.config,
            carrier: self.carrier,
            request_hooks: self.request_hooks.into(),
            response_hooks: self.response_hooks.into(),
        })
    }
}

impl ApiClient {
    /// Start a client with no hooks installed.
    pub fn builder(config: ClientConfig, carrier: TokenCarrier) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            carrier,
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
        }
    }

    /// The standard dashboard client: bearer token on the way out, session
    /// expiry/notification handling on the way back.
    pub fn with_session(
        config: ClientConfig,
        carrier: TokenCarrier,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let login_route = config.login_route.clone();
        Self::builder(config, carrier.clone())
            .request_interceptor(BearerTokenInterceptor::new(carrier.clone()))
            .response_interceptor(AuthFailureInterceptor::new(carrier, navigator, notifier, login_route))
            .build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn carrier(&self) -> &TokenCarrier {
        &self.carrier
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.config.api_url, path))
    }

    /// Execute a request through the hooks.
    ///
    /// Non-2xx responses and transport failures run every response hook and
    /// are then returned as errors; nothing is retried.
    pub async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let mut request = builder.build().map_err(|e| ApiError::Request(e.to_string()))?;
        for hook in self.request_hooks.iter() {
            hook.on_request(&mut request);
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let error = match self.http.execute(request).await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => ApiError::from_response(response).await,
            Err(e) => ApiError::Network(e.to_string()),
        };

        tracing::debug!(%method, %url, error = %error, "api call failed");
        for hook in self.response_hooks.iter() {
            hook.on_failure(&error);
        }
        Err(error)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Exchange credentials for a token and store it, replacing any previous one.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response: LoginResponse = self
            .post_json(&self.config.login_endpoint, &LoginRequest { email, password })
            .await?;
        self.carrier.store(&response.access_token)?;
        tracing::info!(key = self.carrier.key(), "signed in");
        Ok(())
    }

    /// Forget the current session locally.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.carrier.clear()?;
        Ok(())
    }
}
