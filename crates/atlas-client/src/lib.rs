//! # atlas-client
//!
//! Client for the Apache Atlas v2 write API.
//!
//! Two operations are used by the publisher:
//! - `POST /api/atlas/v2/entity/bulk` creates or updates a bundle of entities
//! - `POST /api/atlas/v2/relationship` creates one relationship
//!
//! Both are reached through the [`CatalogWriter`] trait so the publisher can
//! run against an in-memory catalog in tests.

mod error;
mod http;
mod types;
mod writer;

pub use error::CatalogError;
pub use types::{
    AtlasEntity, AtlasRelationship, EntityHeader, EntityMutations, EntityReference,
    RelatedAttribute, UniqueAttributes,
};
pub use writer::CatalogWriter;

use std::time::Duration;

use atlas_config::CatalogConfig;

const API_PREFIX: &str = "api/atlas/v2";

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for one Atlas server.
pub struct AtlasClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl AtlasClient {
    /// Build a client from catalog configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if no endpoint is configured,
    /// or [`CatalogError::Http`] if the underlying `reqwest::Client` fails to
    /// build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if !config.is_configured() {
            return Err(CatalogError::InvalidEndpoint(
                "catalog.endpoint is empty".to_string(),
            ));
        }
        let endpoint = config.endpoint.trim_end_matches('/');
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(CatalogError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent("atlas-publisher/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let credentials = config
            .has_credentials()
            .then(|| (config.username.clone(), config.password.clone()));

        Ok(Self {
            http,
            base_url: endpoint.to_string(),
            credentials,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_PREFIX}/{path}", self.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let client = AtlasClient::new(&CatalogConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:21000");
        assert_eq!(
            client.url("entity/bulk"),
            "http://localhost:21000/api/atlas/v2/entity/bulk"
        );
        assert!(client.credentials.is_none());
    }

    #[test]
    fn trailing_slash_is_trimmed_and_credentials_kept() {
        let config = CatalogConfig {
            endpoint: "https://atlas.example.com/".into(),
            username: "admin".into(),
            password: "admin".into(),
            ..Default::default()
        };
        let client = AtlasClient::new(&config).unwrap();
        assert_eq!(
            client.url("relationship"),
            "https://atlas.example.com/api/atlas/v2/relationship"
        );
        assert!(client.credentials.is_some());
    }

    #[test]
    fn rejects_missing_or_non_http_endpoint() {
        let empty = CatalogConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            AtlasClient::new(&empty),
            Err(CatalogError::InvalidEndpoint(_))
        ));

        let ftp = CatalogConfig {
            endpoint: "ftp://atlas".into(),
            ..Default::default()
        };
        assert!(matches!(
            AtlasClient::new(&ftp),
            Err(CatalogError::InvalidEndpoint(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let config = CatalogConfig {
            endpoint: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = AtlasClient::new(&config).unwrap();
        let err = client
            .create_entities(&[AtlasEntity::new("hive_table")])
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }
}
