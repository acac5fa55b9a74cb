//! Session client for the Instagram private API.
//!
//! Wraps the shared HTTP client with the device identity, the pre-login
//! handshake, login, and the two friendships feed factories. The cookie jar
//! inside [`followcheck_http::HttpClient`] carries the session established by
//! `login`, so feeds created afterwards are authenticated automatically.
use crate::feed::PageFeed;
use crate::instagram::types::{FollowUser, FriendshipsPage, LoggedInUser, LoginResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use followcheck_http::header::{HeaderMap, HeaderValue, USER_AGENT};
use followcheck_http::{HttpClient, RequestOpts};
use std::borrow::Cow;

pub const DEFAULT_BASE_URL: &str = "https://i.instagram.com";

const APP_USER_AGENT: &str =
    "Instagram 275.0.0.27.98 Android (33/13; 420dpi; 1080x2219; Google; Pixel 7; panther; en_US)";
const APP_ID: &str = "567067343352427";
const PAGE_SIZE: &str = "100";

/// Derive a stable android device id from the username, so repeated runs for
/// the same account present the same device.
pub fn generate_device_id(username: &str) -> String {
    let digest = blake3::hash(username.trim().to_lowercase().as_bytes());
    format!("android-{}", hex::encode(&digest.as_bytes()[..8]))
}

#[derive(Clone)]
pub struct InstagramSession {
    http: HttpClient,
    device_id: String,
}

impl InstagramSession {
    /// Build a session anchored at `base` with a device identity derived
    /// from `username`. No network traffic happens here.
    pub fn new(base: &str, username: &str) -> Result<Self> {
        let device_id = generate_device_id(username);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(APP_USER_AGENT));
        headers.insert("X-IG-App-ID", HeaderValue::from_static(APP_ID));
        headers.insert(
            "X-IG-Device-ID",
            HeaderValue::from_str(&device_id).context("device id is not a valid header value")?,
        );

        let http = HttpClient::with_headers(base, headers)
            .with_context(|| format!("invalid API base url: {base}"))?;

        Ok(Self { http, device_id })
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Pre-login handshake: primes cookies and headers the way the app does
    /// before it ever submits credentials.
    pub async fn pre_login_flow(&self) -> Result<()> {
        let query: Vec<(&str, Cow<'_, str>)> = vec![
            ("challenge_type", "signup".into()),
            ("guid", Cow::Borrowed(self.device_id.as_str())),
        ];
        let resp: serde_json::Value = self
            .http
            .get_json(
                "api/v1/si/fetch_headers/",
                RequestOpts {
                    query: Some(query),
                    ..Default::default()
                },
            )
            .await
            .context("pre-login handshake failed")?;
        tracing::debug!(status = ?resp.get("status"), "instagram.pre_login");
        Ok(())
    }

    /// Log in and return the authenticated account handle. The session
    /// cookie lands in the client's jar as a side effect.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoggedInUser> {
        let form = [
            ("username", username),
            ("password", password),
            ("device_id", self.device_id.as_str()),
            ("login_attempt_count", "0"),
        ];
        let resp: LoginResponse = self
            .http
            .post_form("api/v1/accounts/login/", &form, RequestOpts::default())
            .await
            .with_context(|| format!("login rejected for {username}"))?;

        tracing::info!(
            pk = resp.logged_in_user.pk,
            username = %resp.logged_in_user.username,
            "instagram.logged_in"
        );
        Ok(resp.logged_in_user)
    }

    /// Feed of accounts following `pk`.
    pub fn followers_feed(&self, pk: u64) -> FriendshipsFeed {
        FriendshipsFeed::new(
            self.http.clone(),
            format!("api/v1/friendships/{pk}/followers/"),
        )
    }

    /// Feed of accounts `pk` is following.
    pub fn following_feed(&self, pk: u64) -> FriendshipsFeed {
        FriendshipsFeed::new(
            self.http.clone(),
            format!("api/v1/friendships/{pk}/following/"),
        )
    }
}

/// Paged view over one friendships endpoint, created by the feed factories.
///
/// Pagination uses the `max_id` cursor; the server reports more pages by
/// including `next_max_id` in the response.
pub struct FriendshipsFeed {
    http: HttpClient,
    path: String,
    next_max_id: Option<String>,
    more_available: bool,
}

impl FriendshipsFeed {
    fn new(http: HttpClient, path: String) -> Self {
        Self {
            http,
            path,
            next_max_id: None,
            more_available: true,
        }
    }
}

#[async_trait]
impl PageFeed for FriendshipsFeed {
    type Item = FollowUser;

    async fn items(&mut self) -> Result<Vec<FollowUser>> {
        let mut query: Vec<(&str, Cow<'_, str>)> = vec![("count", PAGE_SIZE.into())];
        if let Some(max_id) = self.next_max_id.take() {
            query.push(("max_id", Cow::Owned(max_id)));
        }

        let page: FriendshipsPage = self
            .http
            .get_json(
                &self.path,
                RequestOpts {
                    query: Some(query),
                    ..Default::default()
                },
            )
            .await
            .with_context(|| format!("failed to fetch page of {}", self.path))?;

        self.more_available = page.next_max_id.is_some();
        self.next_max_id = page.next_max_id;
        tracing::debug!(
            path = %self.path,
            users = page.users.len(),
            more = self.more_available,
            "instagram.friendships_page"
        );
        Ok(page.users)
    }

    fn is_more_available(&self) -> bool {
        self.more_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_is_stable_per_username() {
        let a = generate_device_id("alice");
        let b = generate_device_id("alice");
        assert_eq!(a, b);
        assert!(a.starts_with("android-"));
        assert_eq!(a.len(), "android-".len() + 16);
    }

    #[test]
    fn device_id_ignores_case_and_padding() {
        assert_eq!(generate_device_id(" Alice "), generate_device_id("alice"));
        assert_ne!(generate_device_id("alice"), generate_device_id("bob"));
    }

    #[test]
    fn feed_factories_target_distinct_endpoints() {
        let session = InstagramSession::new(DEFAULT_BASE_URL, "alice").unwrap();
        let followers = session.followers_feed(42);
        let following = session.following_feed(42);
        assert_eq!(followers.path, "api/v1/friendships/42/followers/");
        assert_eq!(following.path, "api/v1/friendships/42/following/");
        assert!(followers.is_more_available());
    }
}
