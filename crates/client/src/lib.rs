//! `shelfwise-client`
//!
//! **Responsibility:** talk to the Shelfwise API on behalf of the dashboard.
//!
//! This crate provides:
//! - A token carrier holding the current bearer token
//! - Request interception (attach the bearer token)
//! - Response interception (classify failures, clear expired sessions,
//!   redirect to login, notify the user)
//!
//! Hooks are composed once into an [`ApiClient`]; there is no global client.

pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod navigation;
pub mod notify;
pub mod token;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use interceptor::{AuthFailureInterceptor, BearerTokenInterceptor, RequestInterceptor, ResponseInterceptor};
pub use navigation::{NavigationState, Navigator};
pub use notify::{Notification, NotificationClass, Notifier, TracingNotifier};
pub use token::{FileTokenStore, MemoryTokenStore, StoreError, TokenCarrier, TokenStore};
