use std::time::Duration;

use lcscrape_core::error::ScrapeError;
use lcscrape_core::traits::ProfileApi;
use reqwest::Client;
use serde::Serialize;

const GRAPHQL_ENDPOINT: &str = "https://leetcode.com/graphql/";
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// The public-profile query. Field names here double as the keys the
/// API-response extractor reads, so the two must move together.
const PROFILE_QUERY: &str = "\
query userPublicProfile($username: String!) {
    matchedUser(username: $username) {
        username
        profile {
            realName
            userAvatar
            ranking
            location
            githubUrl
            linkedinUrl
            skillTags
        }
    }
}";

/// Client for the target site's internal GraphQL endpoint.
///
/// Last-resort strategy: the orchestrator swallows every failure from
/// this backend instead of escalating it.
#[derive(Clone)]
pub struct GraphqlProfileApi {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
}

impl GraphqlProfileApi {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_endpoint(GRAPHQL_ENDPOINT)
    }

    /// Point at a different endpoint (used by tests against a local server).
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl ProfileApi for GraphqlProfileApi {
    async fn query(&self, username: &str) -> Result<serde_json::Value, ScrapeError> {
        let body = GraphqlRequest {
            query: PROFILE_QUERY,
            variables: Variables { username },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Fetch(format!(
                "HTTP {} from profile api",
                status.as_u16()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))
    }
}
