//! GitHub issue-listing client.
//!
//! # Responsibilities
//! - Substitute org/repo into the issue-listing URL template
//! - Attach the GitHub media type and bearer authorization headers
//! - Read the whole response body and hand it back untouched

use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use crate::config::{GitHubConfig, TimeoutConfig};
use crate::forwarder::types::{ForwardError, ForwardResult, UpstreamResponse};

/// Media type declared on every outbound request.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("issue-puller/", env!("CARGO_PKG_VERSION"));

/// Build the issue-listing URL for `org`/`repo` under `base`.
///
/// Substitution is verbatim: nothing is escaped or trimmed, so empty or
/// unusual values end up in the URL exactly as given.
///
/// The string is parsed as a URL before it is sent, and parsing normalizes
/// dot segments: org `".."` with repo `"x"` is requested as `/x/issues`,
/// and org `"."` drops out of the path. Callers that take org/repo from
/// untrusted input must reject such values themselves.
pub fn issues_url(base: &str, org: &str, repo: &str) -> String {
    format!("{}/repos/{}/{}/issues", base.trim_end_matches('/'), org, repo)
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Forwards issue-listing requests to GitHub.
///
/// Cheap to share: the inner `reqwest::Client` pools connections and is
/// safe to use from many tasks at once.
#[derive(Clone)]
pub struct IssueForwarder {
    client: Client,
    base_url: String,
}

impl IssueForwarder {
    /// Create a forwarder for the API root in `github`.
    ///
    /// No timeout is applied unless `timeouts.upstream_secs` is set.
    pub fn new(github: &GitHubConfig, timeouts: &TimeoutConfig) -> ForwardResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if !github.use_system_proxy {
            builder = builder.no_proxy();
        }
        if let Some(secs) = timeouts.upstream_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(ForwardError::Client)?;

        tracing::debug!(
            api_base_url = %github.api_base_url,
            upstream_timeout_secs = ?timeouts.upstream_secs,
            "Issue forwarder initialized"
        );

        Ok(Self {
            client,
            base_url: github.api_base_url.clone(),
        })
    }

    /// List the issues of `org`/`repo`, returning the raw response body.
    ///
    /// The remote status is ignored: a 404 or 401 body from GitHub is
    /// returned exactly like a 200 body.
    pub async fn fetch_issues(&self, org: &str, repo: &str, token: &str) -> ForwardResult<Bytes> {
        self.fetch(org, repo, token).await.map(|response| response.body)
    }

    /// Like [`fetch_issues`](Self::fetch_issues) but also reports the
    /// remote status.
    pub async fn fetch(&self, org: &str, repo: &str, token: &str) -> ForwardResult<UpstreamResponse> {
        let target = issues_url(&self.base_url, org, repo);
        let url = url::Url::parse(&target).map_err(|source| ForwardError::InvalidUrl {
            url: target.clone(),
            source,
        })?;

        tracing::debug!(url = %url, "Fetching issues");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, GITHUB_MEDIA_TYPE)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await
            .map_err(ForwardError::from_send)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ForwardError::Body)?;

        tracing::debug!(status = %status, bytes = body.len(), "Upstream responded");

        Ok(UpstreamResponse { status, body })
    }
}
