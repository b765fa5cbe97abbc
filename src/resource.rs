use std::error::Error;

use url::Url;

use crate::task::TaskId;

/// Just a wrapper around the server URL and the session credentials
#[derive(Clone, Debug)]
pub struct Resource {
    url: Url,
    session_cookie: Option<String>,
}

impl Resource {
    /// Fails for URLs that cannot have a path (e.g. `mailto:someone`), since every endpoint is a path on the server
    pub fn new(url: Url, session_cookie: Option<String>) -> Result<Self, Box<dyn Error>> {
        if url.cannot_be_a_base() {
            return Err(format!("{} is not a valid server URL", url).into());
        }
        Ok(Self { url, session_cookie })
    }

    /// Build a resource from the `TASKGRID_URL` and (optional) `TASKGRID_SESSION` environment variables
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let raw_url = std::env::var(crate::config::URL_ENV_VAR)
            .map_err(|err| format!("Unable to read {}: {}", crate::config::URL_ENV_VAR, err))?;
        let url = Url::parse(&raw_url)?;
        let session_cookie = std::env::var(crate::config::SESSION_ENV_VAR).ok();
        Self::new(url, session_cookie)
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn session_cookie(&self) -> Option<&str> { self.session_cookie.as_deref() }

    /// Build a new Resource by keeping the same credentials, scheme and server from `base` but changing the path part
    pub fn combine(&self, new_path: &str) -> Resource {
        let mut built = (*self).clone();
        built.url.set_path(new_path);
        built.url.set_query(None);
        built.url.set_fragment(None);
        built
    }

    /// `GET` here to list every task
    pub fn tasks_endpoint(&self) -> Resource {
        self.combine("/api/tasks")
    }

    /// `POST` here to create a task
    pub fn task_endpoint(&self) -> Resource {
        self.combine("/api/task")
    }

    /// `DELETE` here to delete a task
    pub fn task_id_endpoint(&self, id: &TaskId) -> Resource {
        let mut built = self.task_endpoint();
        // push percent-encodes the id, which is opaque and could contain anything
        let pushed = match built.url.path_segments_mut() {
            Ok(mut segments) => { segments.push(id.as_str()); true },
            Err(()) => false,
        };
        if pushed == false {
            log::warn!("Unable to address task {} under {}", id, built.url);
        }
        built
    }
}
