//! MusicBrainz web service registry
//!
//! Uses the JSON artist search and artist lookup endpoints. Rate limiting
//! and retries are applied by the resolver, not here.

use crate::config::ResolverConfig;
use crate::error::RegistryError;
use crate::registry::{ArtistMatch, IdentityRegistry};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Artist search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    artists: Vec<SearchArtist>,
}

#[derive(Debug, Deserialize)]
struct SearchArtist {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: u32,
}

/// Artist lookup response
#[derive(Debug, Deserialize)]
struct LookupResponse {
    name: Option<String>,
}

/// MusicBrainz HTTP registry
pub struct MusicBrainzRegistry {
    base_url: String,
    client: reqwest::Client,
}

impl MusicBrainzRegistry {
    /// Build a client from resolver configuration
    pub fn new(config: &ResolverConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, RegistryError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RegistryError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Status(status.as_u16(), body));
        }

        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

fn search_query(name: &str) -> String {
    // Lucene phrase query; quotes inside the name would end the phrase
    format!("artist:\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

fn into_matches(response: SearchResponse) -> Vec<ArtistMatch> {
    response
        .artists
        .into_iter()
        .map(|a| ArtistMatch::new(a.id, a.name, a.score))
        .collect()
}

#[async_trait]
impl IdentityRegistry for MusicBrainzRegistry {
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistMatch>, RegistryError> {
        let url = format!("{}/artist/", self.base_url);
        let query = search_query(name);
        debug!(name = %name, url = %url, "Searching MusicBrainz");

        let request = self
            .client
            .get(&url)
            .query(&[("query", query.as_str()), ("fmt", "json")]);

        let response: Option<SearchResponse> = self.get_json(request).await?;
        Ok(response.map(into_matches).unwrap_or_default())
    }

    async fn lookup_artist(&self, id: &str) -> Result<Option<String>, RegistryError> {
        let url = format!("{}/artist/{}", self.base_url, id);
        debug!(id = %id, url = %url, "Looking up MusicBrainz artist");

        let request = self.client.get(&url).query(&[("fmt", "json")]);
        let response: Option<LookupResponse> = self.get_json(request).await?;
        Ok(response.and_then(|r| r.name))
    }
}
