// In-process page source for tests.
// Serves canned HTML by URL and records every request made.

use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::StatusCode;

use crate::error::{HornError, Result};

use super::client::{Page, PageSource};

enum Canned {
    Page(Page),
    Unreachable,
}

#[derive(Default)]
pub struct FakePages {
    pages: HashMap<String, Canned>,
    requests: Mutex<Vec<String>>,
}

impl FakePages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Canned::Page(Page {
                status: StatusCode::OK,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn with_status(mut self, url: &str, status: StatusCode) -> Self {
        self.pages.insert(
            url.to_string(),
            Canned::Page(Page {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Canned::Unreachable);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

/// A real reqwest transport error, produced without touching the network.
async fn transport_error() -> HornError {
    reqwest::Client::new()
        .get("not a url")
        .send()
        .await
        .unwrap_err()
        .into()
}

impl PageSource for FakePages {
    async fn get_page(&self, url: &str) -> Result<Page> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Canned::Page(page)) => Ok(page.clone()),
            Some(Canned::Unreachable) => Err(transport_error().await),
            None => Ok(Page {
                status: StatusCode::NOT_FOUND,
                body: String::new(),
            }),
        }
    }
}

/// A GitHub release page whose notes block holds `notes`.
pub fn release_page(notes: &str) -> String {
    format!(
        r#"<html><body><nav>Sign in</nav><div class="markdown-body" data-test-selector="body-content">{}</div><footer>© GitHub</footer></body></html>"#,
        notes
    )
}

/// A release index page linking to each of `entries`.
pub fn index_page(entries: &[&str]) -> String {
    let mut links = String::from(r#"<li><a href="../">../</a></li>"#);
    for entry in entries {
        links.push_str(&format!(r#"<li><a href="/{0}/">{0}</a></li>"#, entry));
    }
    format!("<html><body><ul>{}</ul></body></html>", links)
}
