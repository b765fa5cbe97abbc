//! This module provides a client to connect to the remote task server

use std::error::Error;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use reqwest::header::{CONTENT_TYPE, COOKIE, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::error::StoreError;
use crate::resource::Resource;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskStore;


/// The body a server replies with when it refuses a request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Which request a failed response was answering
#[derive(Clone, Copy, Debug, PartialEq)]
enum Request {
    List,
    Create,
    Delete,
}


/// A [`TaskStore`] that talks to a task server over HTTP.
///
/// There is no caching and no retry: every call issues exactly one HTTP request.
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S, session_cookie: Option<String>) -> Result<Self, Box<dyn Error>> {
        let url = Url::parse(url.as_ref())?;
        Ok(Self::from_resource(Resource::new(url, session_cookie)?))
    }

    pub fn from_resource(resource: Resource) -> Self {
        Self {
            resource,
            http: reqwest::Client::new(),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    fn request(&self, method: Method, target: &Resource) -> RequestBuilder {
        log::debug!("{} {}", method, target.url());
        let builder = self.http
            .request(method, target.url().clone())
            .header(USER_AGENT, crate::config::product_name());

        match target.session_cookie() {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }
}

#[async_trait]
impl TaskStore for Client {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let response = self.request(Method::GET, &self.resource.tasks_endpoint())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(failure_from_response(Request::List, response).await);
        }

        let text = response.text().await?;
        let tasks: Vec<Task> = serde_json::from_str(&text)?;
        log::debug!("Server returned {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), StoreError> {
        let body = serde_json::to_string(new_task)?;

        let response = self.request(Method::POST, &self.resource.task_endpoint())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(failure_from_response(Request::Create, response).await);
        }
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        let response = self.request(Method::DELETE, &self.resource.task_id_endpoint(id))
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(failure_from_response(Request::Delete, response).await);
        }
        Ok(())
    }
}


async fn failure_from_response(request: Request, response: Response) -> StoreError {
    let status = response.status().as_u16();
    // A body we are unable to read is treated just like an empty one
    let body = response.text().await.unwrap_or_default();
    let err = failure_from_parts(request, status, &body);
    log::warn!("{:?} request failed with HTTP status {}: {}", request, status, err);
    err
}

/// Turn a non-successful reply into the matching error.
///
/// Only create and delete requests surface the server message; a failed listing is always reported generically.
fn failure_from_parts(request: Request, status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|msg| msg.trim().is_empty() == false);

    match (request, message) {
        (Request::List, _) => StoreError::Fetch { status },
        (_, Some(message)) => StoreError::Validation { status, message },
        (Request::Create, None) => StoreError::Creation { status },
        (Request::Delete, None) => StoreError::Deletion { status },
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_refuses_urls_without_path() {
        assert!(Client::new("mailto:someone@example.com", None).is_err());
        assert!(Client::new("not a url", None).is_err());
        let client = Client::new("http://localhost:3000", Some("session=abc".into())).unwrap();
        assert_eq!(client.resource().session_cookie(), Some("session=abc"));
    }

    #[test]
    fn test_failure_with_server_message() {
        let err = failure_from_parts(Request::Create, 400, r#"{"error": "Missing required fields"}"#);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Missing required fields");

        let err = failure_from_parts(Request::Delete, 404, r#"{"error": "Task not found"}"#);
        assert_eq!(err.to_string(), "Task not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_failure_without_server_message() {
        let err = failure_from_parts(Request::Create, 500, "");
        assert!(matches!(err, StoreError::Creation { status: 500 }));

        let err = failure_from_parts(Request::Create, 502, "<html>Bad gateway</html>");
        assert_eq!(err.to_string(), "Failed to create task");

        let err = failure_from_parts(Request::Delete, 500, r#"{"error": ""}"#);
        assert_eq!(err.to_string(), "Failed to delete task");
        assert_eq!(err.kind(), ErrorKind::Network);

        let err = failure_from_parts(Request::Delete, 500, r#"{"message": "something else"}"#);
        assert!(matches!(err, StoreError::Deletion { status: 500 }));
    }

    #[test]
    fn test_failed_listing_is_generic() {
        let err = failure_from_parts(Request::List, 401, r#"{"error": "Unauthorized"}"#);
        assert!(matches!(err, StoreError::Fetch { status: 401 }));
        assert_eq!(err.to_string(), "Failed to fetch tasks");
    }

    #[test]
    fn test_new_client() {
        assert!(Client::new("not a url", None).is_err());
        let client = Client::new("http://localhost:3000", Some("authjs.session-token=xyz".into())).unwrap();
        assert_eq!(client.resource().session_cookie(), Some("authjs.session-token=xyz"));
    }
}
