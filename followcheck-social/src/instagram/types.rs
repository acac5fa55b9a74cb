use serde::{Deserialize, Serialize};

/// A user as it appears in follower/following feeds.
///
/// Immutable once fetched; reconciliation compares on `username` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowUser {
    pub pk: u64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

/// One page of a friendships feed (`followers` or `following`).
///
/// More pages are available exactly while `next_max_id` is present.
#[derive(Debug, Clone, Deserialize)]
pub struct FriendshipsPage {
    #[serde(default)]
    pub users: Vec<FollowUser>,
    #[serde(default)]
    pub next_max_id: Option<String>,
    #[serde(default)]
    pub big_list: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub logged_in_user: LoggedInUser,
    #[serde(default)]
    pub status: Option<String>,
}

/// The authenticated account handle; `pk` keys the feed factories.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggedInUser {
    pub pk: u64,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_login_response() {
        let v = json!({
            "logged_in_user": { "pk": 123456789_u64, "username": "alice", "full_name": "Alice" },
            "status": "ok"
        });
        let resp: LoginResponse = serde_json::from_value(v).unwrap();
        assert_eq!(resp.logged_in_user.pk, 123456789);
        assert_eq!(resp.logged_in_user.username, "alice");
        assert_eq!(resp.status.as_deref(), Some("ok"));
    }

    #[test]
    fn decodes_friendships_page_with_cursor() {
        let v = json!({
            "users": [
                { "pk": 1, "username": "bob", "full_name": "Bob", "is_private": false },
                { "pk": 2, "username": "carol", "is_verified": true }
            ],
            "next_max_id": "QVFEaGs5",
            "big_list": true,
            "status": "ok"
        });
        let page: FriendshipsPage = serde_json::from_value(v).unwrap();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0].username, "bob");
        assert_eq!(page.users[1].is_verified, Some(true));
        assert_eq!(page.next_max_id.as_deref(), Some("QVFEaGs5"));
    }

    #[test]
    fn decodes_last_page_without_cursor() {
        let v = json!({
            "users": [{ "pk": 3, "username": "dan" }],
            "big_list": false,
            "status": "ok"
        });
        let page: FriendshipsPage = serde_json::from_value(v).unwrap();
        assert_eq!(page.users.len(), 1);
        assert!(page.next_max_id.is_none());
    }
}
