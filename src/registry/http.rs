//! HTTP registry client using reqwest

use crate::error::{Error, Result};
use crate::payload::SubmissionPayload;
use crate::registry::RegistryService;
use crate::types::{PriorProposalSnapshot, SubmissionReceipt};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error body some registry endpoints return
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Registry service reached over HTTP
pub struct HttpRegistry {
    client: Client,
    base_url: Url,
}

impl HttpRegistry {
    /// Create a client for the registry at `base_url`
    ///
    /// Endpoint paths are resolved relative to `base_url`, which gains a
    /// trailing slash if it has none.
    pub fn new(mut base_url: Url) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("proposal-intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL endpoints are resolved against
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Parse(format!("invalid registry endpoint {path}: {e}")))
    }

    /// GET a yes/no lookup: 2xx is yes, 4xx is no, anything else is an error
    async fn lookup(&self, path: &str, param: &str, value: &str) -> Result<bool> {
        let url = self.endpoint(path)?;
        let status = self
            .client
            .get(url)
            .query(&[(param, value)])
            .send()
            .await?
            .status();

        debug!(path, status = status.as_u16(), "registry lookup answered");
        if status.is_success() {
            Ok(true)
        } else if status.is_client_error() {
            Ok(false)
        } else {
            Err(Error::RegistryStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.detail).or(b.error))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Receipt from an accepted submission; a body that is not a JSON receipt
/// becomes the message
fn parse_receipt(status: StatusCode, body: &str) -> SubmissionReceipt {
    serde_json::from_str(body).unwrap_or_else(|e| {
        if !body.trim().is_empty() {
            debug!(error = %e, "submission response is not a JSON receipt");
        }
        SubmissionReceipt {
            status: status.to_string(),
            message: body.trim().to_string(),
            assigned_id: None,
        }
    })
}

#[async_trait]
impl RegistryService for HttpRegistry {
    async fn lookup_title_unique(&self, title: &str) -> Result<bool> {
        debug!(title, "checking title uniqueness");
        self.lookup("check_title", "title", title).await
    }

    async fn lookup_author_exists(&self, handle: &str) -> Result<bool> {
        debug!(handle, "checking author account");
        self.lookup("check_username", "username", handle).await
    }

    async fn lookup_prior_proposal(
        &self,
        proposal_id: &str,
    ) -> Result<Option<PriorProposalSnapshot>> {
        debug!(proposal_id, "fetching prior proposal");
        let path = format!("proposals/{}/", urlencoding::encode(proposal_id));
        let url = self.endpoint(&path)?;
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(proposal_id, "registry has no prior proposal");
                Ok(None)
            }
            status if status.is_success() => {
                let snapshot = response.json::<PriorProposalSnapshot>().await?;
                debug!(proposal_id, retry = %snapshot.moderation.retry, "found prior proposal");
                Ok(Some(snapshot))
            }
            status => Err(Error::RegistryStatus {
                endpoint: path,
                status: status.as_u16(),
            }),
        }
    }

    async fn check_moderation(&self, text: &str) -> Result<bool> {
        let url = self.endpoint("check_moderation/")?;
        let status = self
            .client
            .post(url)
            .form(&[("text", text)])
            .send()
            .await?
            .status();
        debug!(status = status.as_u16(), "moderation answered");
        Ok(status.is_success())
    }

    async fn submit_proposal(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        debug!(title = ?payload.title, status = ?payload.status, "submitting proposal");
        let url = self.endpoint("submit_proposal/")?;
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Submission {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let receipt = parse_receipt(status, &body);
        debug!(assigned_id = ?receipt.assigned_id, "proposal submitted");
        Ok(receipt)
    }
}
