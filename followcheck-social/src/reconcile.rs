//! Set reconciliation over a fetched followers/following pair.

use crate::instagram::types::FollowUser;
use std::collections::HashSet;

/// The three derived lists of a followers/following comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendshipReport {
    /// Accounts you follow that follow you back.
    pub mutual: Vec<FollowUser>,
    /// Accounts you follow that do not follow you back.
    pub not_followback_you: Vec<FollowUser>,
    /// Accounts that follow you but you do not follow back.
    pub not_get_your_followback: Vec<FollowUser>,
}

/// Compare the two lists by exact username equality.
///
/// Order within each derived list follows the source list it was filtered
/// from, and duplicate usernames in a source survive filtering. `mutual` and
/// `not_followback_you` partition `following` by follower membership;
/// `not_get_your_followback` is `followers` minus the following set.
pub fn reconcile(followers: &[FollowUser], following: &[FollowUser]) -> FriendshipReport {
    let follower_names: HashSet<&str> = followers.iter().map(|u| u.username.as_str()).collect();
    let following_names: HashSet<&str> = following.iter().map(|u| u.username.as_str()).collect();

    let mutual = following
        .iter()
        .filter(|u| follower_names.contains(u.username.as_str()))
        .cloned()
        .collect();
    let not_followback_you = following
        .iter()
        .filter(|u| !follower_names.contains(u.username.as_str()))
        .cloned()
        .collect();
    let not_get_your_followback = followers
        .iter()
        .filter(|u| !following_names.contains(u.username.as_str()))
        .cloned()
        .collect();

    FriendshipReport {
        mutual,
        not_followback_you,
        not_get_your_followback,
    }
}
