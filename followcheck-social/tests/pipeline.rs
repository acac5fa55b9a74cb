//! Drain-then-reconcile pipeline over mock feeds, mirroring what the
//! orchestrator does with the two real friendship feeds.

use anyhow::Result;
use async_trait::async_trait;
use followcheck_social::feed::{PageFeed, drain};
use followcheck_social::instagram::types::FollowUser;
use followcheck_social::reconcile::reconcile;
use std::collections::VecDeque;

struct PagedUsers {
    pages: VecDeque<Vec<FollowUser>>,
}

impl PagedUsers {
    fn new(pages: Vec<Vec<FollowUser>>) -> Self {
        Self { pages: pages.into() }
    }
}

#[async_trait]
impl PageFeed for PagedUsers {
    type Item = FollowUser;

    async fn items(&mut self) -> Result<Vec<FollowUser>> {
        Ok(self.pages.pop_front().unwrap_or_default())
    }

    fn is_more_available(&self) -> bool {
        !self.pages.is_empty()
    }
}

fn user(pk: u64, username: &str) -> FollowUser {
    FollowUser {
        pk,
        username: username.to_string(),
        full_name: None,
        is_private: None,
        is_verified: None,
    }
}

fn names(list: &[FollowUser]) -> Vec<&str> {
    list.iter().map(|u| u.username.as_str()).collect()
}

#[tokio::test]
async fn drained_feeds_reconcile_end_to_end() {
    // Followers arrive over two pages, following over one, as the paginated
    // API would deliver them.
    let mut followers_feed = PagedUsers::new(vec![vec![user(1, "a")], vec![user(2, "b")]]);
    let mut following_feed = PagedUsers::new(vec![vec![user(2, "b"), user(3, "c")]]);

    let (followers, following) = tokio::try_join!(
        drain(&mut followers_feed),
        drain(&mut following_feed),
    )
    .unwrap();

    assert_eq!(followers.len(), 2);
    assert_eq!(following.len(), 2);

    let report = reconcile(&followers, &following);
    assert_eq!(names(&report.mutual), vec!["b"]);
    assert_eq!(names(&report.not_followback_you), vec!["c"]);
    assert_eq!(names(&report.not_get_your_followback), vec!["a"]);
}

#[tokio::test]
async fn pagination_order_feeds_straight_into_derived_lists() {
    let mut followers_feed = PagedUsers::new(vec![
        vec![user(10, "x"), user(11, "y")],
        vec![user(12, "z")],
    ]);
    let mut following_feed = PagedUsers::new(vec![vec![user(12, "z"), user(10, "x")]]);

    let (followers, following) = tokio::try_join!(
        drain(&mut followers_feed),
        drain(&mut following_feed),
    )
    .unwrap();

    let report = reconcile(&followers, &following);
    // mutual follows the following order, not the followers order
    assert_eq!(names(&report.mutual), vec!["z", "x"]);
    assert_eq!(names(&report.not_get_your_followback), vec!["y"]);
}
