//! Transport abstraction for reaching the dialogue backend

use async_trait::async_trait;
use medassist_api::{DialogueClient, DialogueRequest, ResponseEnvelope, Result};

/// Where dialogue turns and image searches are sent
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one dialogue turn and return the validated envelope
    async fn converse(&self, request: &DialogueRequest) -> Result<ResponseEnvelope>;

    /// Look up gallery image URLs for a search term
    async fn search_images(&self, term: &str) -> Result<Vec<String>>;
}

/// Transport over HTTP to the backend service
pub struct HttpTransport {
    client: DialogueClient,
}

impl HttpTransport {
    pub fn new(client: DialogueClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DialogueClient {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn converse(&self, request: &DialogueRequest) -> Result<ResponseEnvelope> {
        self.client.converse(request).await
    }

    async fn search_images(&self, term: &str) -> Result<Vec<String>> {
        self.client.search_images(term).await
    }
}
