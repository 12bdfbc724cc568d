//! Issue labeler: applies the inspector's label requests through the GitHub
//! REST API.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::forwarder::bearer;
use crate::watcher::types::{AddLabelRequest, WatchResult};

/// Media type GitHub recommends for the labels endpoint.
pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Serialize)]
struct LabelsBody<'a> {
    labels: [&'a str; 1],
}

/// `POST {url}/issues/{number}/labels` target for `request`.
pub fn labels_url(request: &AddLabelRequest) -> String {
    format!(
        "{}/issues/{}/labels",
        request.url.trim_end_matches('/'),
        request.number
    )
}

/// Adds labels to issues with a bearer token.
#[derive(Clone)]
pub struct IssueLabeler {
    client: Client,
    token: String,
}

impl IssueLabeler {
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    /// Add `request.label` to the issue.
    ///
    /// Returns whether GitHub answered `200 OK`. Any other status is a
    /// failed labeling, not an error; transport failures are errors.
    pub async fn add_label(&self, request: &AddLabelRequest) -> WatchResult<bool> {
        let url = labels_url(request);
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, GITHUB_JSON_MEDIA_TYPE)
            .header(AUTHORIZATION, bearer(&self.token))
            .json(&LabelsBody {
                labels: [request.label.as_str()],
            })
            .send()
            .await?;

        let status = response.status();
        let added = status == StatusCode::OK;
        if added {
            tracing::info!(
                number = request.number,
                label = %request.label,
                url = %request.url,
                "Label added"
            );
        } else {
            tracing::warn!(
                number = request.number,
                label = %request.label,
                url = %request.url,
                status = %status,
                "Label was not added"
            );
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_url() {
        let req = AddLabelRequest {
            url: "https://api.github.com/repos/o/r".into(),
            number: 12,
            label: "bug".into(),
        };
        assert_eq!(labels_url(&req), "https://api.github.com/repos/o/r/issues/12/labels");
    }

    #[test]
    fn test_labels_body_shape() {
        let body = serde_json::to_string(&LabelsBody { labels: ["bug"] }).unwrap();
        assert_eq!(body, r#"{"labels":["bug"]}"#);
    }
}
