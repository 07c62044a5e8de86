//! REST client for the hosted platform's storage and function endpoints

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Hard ceiling on the newsletter function call
const FUNCTION_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Platform API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Hosted platform API client
pub struct PlatformClient {
    client: reqwest::Client,
    base_url: String,
    service_key: Option<String>,
}

/// Object metadata as returned by the storage API
#[derive(Debug, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize)]
struct CreateBucketBody<'a> {
    name: &'a str,
    public: bool,
}

#[derive(Serialize)]
struct ListObjectsBody<'a> {
    prefix: &'a str,
    limit: i32,
}

#[derive(Serialize)]
struct NewsletterBody<'a> {
    email: &'a str,
}

impl PlatformClient {
    pub fn new(base_url: String, service_key: Option<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            base_url,
            service_key,
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.service_key {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {key}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        warn!("Platform API returned {}: {}", status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Create a storage bucket; already-exists responses are tolerated
    pub async fn create_bucket(&self, name: &str, public: bool) -> Result<(), ClientError> {
        let url = format!("{}/storage/v1/bucket", self.base_url);
        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&CreateBucketBody { name, public })
            .send()
            .await?;

        if response.status().as_u16() == 409 {
            debug!("Bucket {} already exists", name);
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }

    /// List objects under a prefix
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<StorageObject>, ClientError> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, bucket);
        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&ListObjectsBody { prefix, limit: 100 })
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Upload an object, replacing any existing content at the path
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ClientError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Remove an object
    pub async fn remove(&self, bucket: &str, path: &str) -> Result<(), ClientError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Public URL for an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }

    /// Invoke the newsletter signup function.
    ///
    /// The call is aborted after eight seconds rather than holding the
    /// request open against a slow function.
    pub async fn subscribe_newsletter(
        &self,
        function: &str,
        email: &str,
    ) -> Result<(), ClientError> {
        let url = format!("{}/functions/v1/{}", self.base_url, function);
        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .timeout(FUNCTION_TIMEOUT)
            .json(&NewsletterBody { email })
            .send()
            .await?;

        Self::check(response).await?;
        debug!("Newsletter signup forwarded for {}", email);
        Ok(())
    }
}
