//! Network access for remote data sources.
//!
//! The manager talks to the network through the `HttpTransport` trait so
//! tests and alternate runtimes can swap the transport. `HttpClient` is the
//! reqwest-backed implementation used by the application.
//!
//! Only status 200 counts as success; that check belongs to the caller,
//! transports just report what came back.

pub mod client;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub use client::HttpClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// Request parameters for a network source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default)]
    pub method: Method,
    /// Query parameters for GET, JSON body otherwise
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("content-type".to_string(), "application/json".to_string())])
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            data: None,
            headers: default_headers(),
        }
    }
}

impl RequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a request. Transport failures are `DataError::Network`; any
    /// status code, successful or not, comes back as a response.
    async fn request(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_options() {
        let opts = RequestOptions::default();
        assert_eq!(opts.method, Method::Get);
        assert_eq!(opts.data, None);
        assert_eq!(
            opts.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_with_header_keeps_defaults() {
        let opts = RequestOptions::default().with_header("accept", "application/json");
        assert_eq!(opts.headers.len(), 2);
        assert_eq!(opts.headers.get("accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn test_request_options_deserialize_defaults() {
        let opts: RequestOptions = serde_json::from_str(r#"{"method":"POST"}"#).unwrap();
        assert_eq!(opts.method, Method::Post);
        assert!(opts.headers.contains_key("content-type"));
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_ok());
        assert!(!HttpResponse { status: 204, body: String::new() }.is_ok());
        assert!(!HttpResponse { status: 500, body: String::new() }.is_ok());
    }
}
