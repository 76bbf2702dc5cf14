use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::json;
use crate::tasks::{Task, TaskPage};

pub const DEFAULT_API_URL: &str = "https://bitbucket.org/api/internal";
const USER_AGENT: &str = concat!("bb2todotxt/", env!("CARGO_PKG_VERSION"));

/// First page of the task collection for a pull request.
pub fn tasks_url(api_url: &str, owner: &str, slug: &str, id: i64) -> String {
    format!(
        "{}/repositories/{owner}/{slug}/pullrequests/{id}/tasks",
        api_url.trim_end_matches('/')
    )
}

fn basic_auth(creds: &Credentials) -> String {
    let pair = format!("{}:{}", creds.username, creds.password);
    format!("Basic {}", STANDARD.encode(pair))
}

// ---------------------------------------------------------------------------
// Client abstraction (for testability)
// ---------------------------------------------------------------------------

pub trait BitbucketClient {
    /// GET `url` and return the response body. Statuses >= 400 are errors.
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP client that sends Basic auth on every request.
pub struct DefaultBitbucketClient {
    agent: ureq::Agent,
    authorization: String,
}

impl DefaultBitbucketClient {
    pub fn new(creds: &Credentials) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            authorization: basic_auth(creds),
        }
    }
}

impl BitbucketClient for DefaultBitbucketClient {
    fn get(&self, url: &str) -> Result<String> {
        match self
            .agent
            .get(url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response
                .into_string()
                .map_err(|e| Error::Transport(format!("failed to read response from {url}: {e}"))),
            Err(ureq::Error::Status(status, _)) => Err(Error::Http {
                status,
                url: url.to_string(),
            }),
            Err(ureq::Error::Transport(e)) => Err(Error::Transport(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskFetcher
// ---------------------------------------------------------------------------

/// Walks the paginated task collection of a pull request.
pub struct TaskFetcher {
    client: Box<dyn BitbucketClient>,
}

impl TaskFetcher {
    pub fn new(creds: &Credentials) -> Self {
        Self::with_client(Box::new(DefaultBitbucketClient::new(creds)))
    }

    pub fn with_client(client: Box<dyn BitbucketClient>) -> Self {
        Self { client }
    }

    pub fn fetch_page(&self, url: &str) -> Result<TaskPage> {
        let body = self.client.get(url)?;
        json::from_object_str(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch every page starting at `start_url`, following `next` links.
    /// Tasks are returned in server order; the first failure aborts the walk.
    pub fn fetch_all(&self, start_url: &str) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        let mut url = start_url.to_string();
        let mut pages = 0u32;

        loop {
            let page = self.fetch_page(&url)?;
            pages += 1;
            debug!(
                page = page.page,
                count = page.values.len(),
                has_next = page.next_url().is_some(),
                "fetched task page"
            );

            let next = page.next_url().map(str::to_string);
            tasks.extend(page.values);

            match next {
                Some(n) => url = n,
                None => break,
            }
        }

        info!(pages, tasks = tasks.len(), "fetched pull request tasks");
        Ok(tasks)
    }
}
