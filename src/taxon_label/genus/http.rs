use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::{taxon_label::genus::GenusLookup, utility::str::contains_ignore_case};

pub const DEFAULT_ENDPOINT: &str = "https://api.gbif.org/v1/species/search";
pub const DEFAULT_QUERY_PARAM: &str = "q";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// GET {endpoint}?{query_param}={genus}
// 2xx で本文に属名が含まれていれば実在するとみなす
pub struct HttpGenusLookup {
    agent: ureq::Agent,
    endpoint: String,
    query_param: String,
}

impl HttpGenusLookup {
    pub fn new(endpoint: &str, query_param: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        HttpGenusLookup {
            agent,
            endpoint: endpoint.to_owned(),
            query_param: query_param.to_owned(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpGenusLookup {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_QUERY_PARAM, DEFAULT_TIMEOUT)
    }
}

impl GenusLookup for HttpGenusLookup {
    fn lookup(&self, genus: &str) -> Result<bool> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query(&self.query_param, genus)
            .call()
            .with_context(|| format!("Failed to query {} for {:?}", self.endpoint, genus))?;

        let status = response.status();
        ensure!(
            (200..300).contains(&status),
            "Unexpected status {} from {}",
            status,
            self.endpoint
        );

        let body = response
            .into_string()
            .with_context(|| format!("Failed to read response from {}", self.endpoint))?;

        Ok(response_mentions_genus(&body, genus))
    }
}

pub fn response_mentions_genus(body: &str, genus: &str) -> bool {
    contains_ignore_case(body, genus)
}
