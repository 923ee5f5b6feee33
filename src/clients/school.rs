use std::time::Duration;

use crate::database::models::School;

/// Synchronous RPC-style client for the school service, used by the
/// student service's composite read. Every request carries an explicit
/// timeout, and every failure mode collapses to `None` so a school
/// outage degrades the composite read instead of failing it.
#[derive(Clone)]
pub struct SchoolClient {
    http: reqwest::Client,
    base_url: String,
}

impl SchoolClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Look up a school by id. Returns `None` when the school does not
    /// exist or the lookup fails for any reason (timeout, connection
    /// refused, non-2xx, undecodable body); failures are logged at warn
    /// level, never propagated.
    ///
    /// The call re-enters through the gateway, so the caller's bearer
    /// token is forwarded on the outbound request.
    pub async fn get_school(&self, id: i64, bearer: Option<&str>) -> Option<School> {
        let url = format!("{}/api/schools/{}", self.base_url, id);
        let mut request = self.http.get(&url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(school_id = id, error = %err, "school service unreachable");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                school_id = id,
                status = %response.status(),
                "school lookup failed"
            );
            return None;
        }

        match response.json::<School>().await {
            Ok(school) => Some(school),
            Err(err) => {
                tracing::warn!(school_id = id, error = %err, "undecodable school response");
                None
            }
        }
    }
}
