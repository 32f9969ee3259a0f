use crate::error::{StoreError, StoreResult};
use crate::models::{Property, PropertyDraft, PropertyId, PropertyPatch};
use crate::store::traits::PropertyStore;
use crate::store::validation::{apply_patch, validate_draft};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request body for create and update
#[derive(Debug, Serialize)]
struct PropertyBody<'a> {
    title: &'a str,
    location: &'a str,
    price: f64,
    description: &'a str,
}

/// Listing store backed by a JSON collection endpoint (`{base_url}/properties`)
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Create a store for `base_url` with the default 30 second timeout
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> StoreResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("property-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| StoreError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    fn collection_url(&self) -> String {
        format!("{}/properties", self.base_url)
    }

    fn item_url(&self, id: &PropertyId) -> String {
        format!("{}/properties/{}", self.base_url, id)
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> StoreResult<T> {
        response.json::<T>().await.map_err(|source| StoreError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn transport(url: &str) -> impl FnOnce(reqwest::Error) -> StoreError + '_ {
        move |source| StoreError::Transport {
            url: url.to_string(),
            source,
        }
    }

    fn unexpected(url: &str, status: StatusCode) -> StoreError {
        warn!("{} returned status: {}", url, status);
        StoreError::UnexpectedStatus {
            url: url.to_string(),
            status,
        }
    }
}

#[async_trait]
impl PropertyStore for HttpStore {
    async fn list(&self) -> StoreResult<Vec<Property>> {
        let url = self.collection_url();
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::transport(&url))?;

        if !response.status().is_success() {
            return Err(Self::unexpected(&url, response.status()));
        }

        let properties: Vec<Property> = Self::decode(&url, response).await?;
        debug!("Fetched {} properties", properties.len());
        Ok(properties)
    }

    async fn get_by_id(&self, id: &PropertyId) -> StoreResult<Option<Property>> {
        let url = self.item_url(id);
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::transport(&url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Self::decode(&url, response).await.map(Some),
            status => Err(Self::unexpected(&url, status)),
        }
    }

    async fn create(&mut self, draft: PropertyDraft) -> StoreResult<Property> {
        let valid = validate_draft(&draft).map_err(|e| {
            warn!("Rejected new property: {}", e);
            e
        })?;

        let url = self.collection_url();
        let body = PropertyBody {
            title: &valid.title,
            location: &valid.location,
            price: valid.price,
            description: &valid.description,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport(&url))?;

        if !response.status().is_success() {
            return Err(Self::unexpected(&url, response.status()));
        }

        let created: Property = Self::decode(&url, response).await?;
        info!("Created property {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn update(&mut self, id: &PropertyId, patch: PropertyPatch) -> StoreResult<Property> {
        let current = self.get_by_id(id).await?.ok_or_else(|| {
            warn!("Update of unknown property {}", id);
            StoreError::NotFound(id.clone())
        })?;

        if patch.is_empty() {
            debug!("Empty patch for property {}, nothing to send", id);
            return Ok(current);
        }

        let merged = apply_patch(&current, &patch).map_err(|e| {
            warn!("Rejected update of property {}: {}", id, e);
            e
        })?;

        let url = self.item_url(id);
        let body = PropertyBody {
            title: &merged.title,
            location: &merged.location,
            price: merged.price,
            description: &merged.description,
        };

        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::transport(&url))?;

        match response.status() {
            // Removed between the read and the write.
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.clone())),
            status if status.is_success() => {
                let updated: Property = Self::decode(&url, response).await?;
                info!("Updated property {}", id);
                Ok(updated)
            }
            status => Err(Self::unexpected(&url, status)),
        }
    }

    async fn delete(&mut self, id: &PropertyId) -> StoreResult<bool> {
        let url = self.item_url(id);
        debug!("Deleting URL: {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(Self::transport(&url))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("Delete of property {} was a no-op", id);
                Ok(false)
            }
            status if status.is_success() => {
                info!("Deleted property {}", id);
                Ok(true)
            }
            status => Err(Self::unexpected(&url, status)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn urls_ignore_trailing_slash() {
        let store = HttpStore::new("http://localhost:8000/").unwrap();
        assert_eq!(store.collection_url(), "http://localhost:8000/properties");
        assert_eq!(
            store.item_url(&PropertyId::from(5)),
            "http://localhost:8000/properties/5"
        );
        assert_eq!(
            store.item_url(&PropertyId::from("3f2a")),
            "http://localhost:8000/properties/3f2a"
        );
    }

    #[test]
    fn body_carries_numeric_price() {
        let body = PropertyBody {
            title: "Loft",
            location: "Lille",
            price: 350000.0,
            description: "Bright",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "title": "Loft",
                "location": "Lille",
                "price": 350000.0,
                "description": "Bright"
            })
        );
    }
}
