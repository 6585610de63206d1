//! HTTP client for the dialogue and image endpoints

use crate::{
    error::{Error, Result},
    types::{DialogueRequest, DialogueResponse, ResponseEnvelope},
};

/// Default dialogue endpoint path
pub const DEFAULT_DIALOGUE_PATH: &str = "/gemini-interactive";

/// Default image endpoint path prefix; the encoded term is appended
pub const DEFAULT_IMAGE_PATH: &str = "/gemini/image";

/// Endpoint configuration
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Scheme, host and port, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    pub dialogue_path: String,
    pub image_path: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dialogue_path: DEFAULT_DIALOGUE_PATH.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
        }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Full URL of the dialogue endpoint
    pub fn dialogue_url(&self) -> String {
        format!("{}/{}", self.base(), self.dialogue_path.trim_start_matches('/'))
    }

    /// Full URL of the image endpoint for `term`, path-encoded
    pub fn image_url(&self, term: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base(),
            self.image_path.trim_matches('/'),
            urlencoding::encode(term)
        )
    }
}

/// Client for the medical dialogue backend
#[derive(Clone)]
pub struct DialogueClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl DialogueClient {
    /// Create a client for the given endpoints
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        if !endpoints.base_url.starts_with("http://") && !endpoints.base_url.starts_with("https://")
        {
            return Err(Error::InvalidConfig(format!(
                "base_url must start with http:// or https://, got '{}'",
                endpoints.base_url
            )));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send one dialogue turn and return the validated envelope.
    ///
    /// Error statuses still carry a `{data: ...}` body from this backend, so the
    /// body is parsed first and the status only matters when it is unusable.
    pub async fn converse(&self, request: &DialogueRequest) -> Result<ResponseEnvelope> {
        let url = self.endpoints.dialogue_url();
        tracing::debug!(
            url = %url,
            restart = request.is_restart(),
            history = request.conversation_history.as_ref().map_or(0, Vec::len),
            "Sending dialogue request"
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<DialogueResponse>(&text) {
            Ok(body) => {
                let envelope = body.into_envelope();
                if envelope.is_err() && !status.is_success() {
                    return Err(Error::Status {
                        status: status.as_u16(),
                        body: text,
                    });
                }
                envelope
            }
            Err(_) if !status.is_success() => Err(Error::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(Error::Json(e)),
        }
    }

    /// Fetch gallery image URLs for a search term
    pub async fn search_images(&self, term: &str) -> Result<Vec<String>> {
        let url = self.endpoints.image_url(term);
        tracing::debug!(url = %url, "Fetching images");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let urls: Vec<String> = serde_json::from_str(&text)?;
        Ok(urls)
    }
}
