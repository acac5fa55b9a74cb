//! One linear followcheck run: prompt, login, fetch, reconcile, persist,
//! report. Errors are tagged with their stage and bubble to the sink in
//! `main`; there is no retry, timeout, or partial-result handling anywhere
//! on this path.

use std::path::Path;

use anyhow::anyhow;
use followcheck_common::{Result, RunError};
use followcheck_config::FollowcheckConfig;
use followcheck_social::InstagramSession;
use followcheck_social::feed::drain;
use followcheck_social::reconcile::reconcile;

use crate::prompt;
use crate::store::store;

pub async fn run(cfg: &FollowcheckConfig) -> Result<()> {
    let creds = prompt::read_credentials()?;

    tracing::info!(username = %creds.username, "setting up session");
    let session =
        InstagramSession::new(&cfg.api.base_url, &creds.username).map_err(RunError::Auth)?;
    tracing::debug!(device_id = session.device_id(), "device generated");
    session.pre_login_flow().await.map_err(RunError::Auth)?;

    tracing::info!(username = %creds.username, "authenticating");
    let me = session
        .login(&creds.username, &creds.password)
        .await
        .map_err(RunError::Auth)?;

    tracing::info!(pk = me.pk, "fetching followers and following");
    let mut followers_feed = session.followers_feed(me.pk);
    let mut following_feed = session.following_feed(me.pk);
    let (followers, following) = tokio::try_join!(
        drain(&mut followers_feed),
        drain(&mut following_feed),
    )
    .map_err(RunError::Fetch)?;

    tracing::info!(
        followers = followers.len(),
        following = following.len(),
        "reconciling friendships"
    );
    let report = reconcile(&followers, &following);

    let dir = Path::new(&cfg.data_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| RunError::Persist(anyhow!(e)))?;
    tokio::try_join!(
        store(dir, "followers.json", &followers),
        store(dir, "following.json", &following),
        store(dir, "mutual.json", &report.mutual),
        store(dir, "not-followback-you.json", &report.not_followback_you),
        store(dir, "not-get-your-followback.json", &report.not_get_your_followback),
    )
    .map_err(RunError::Persist)?;

    println!("+ Followers: {}", followers.len());
    println!("+ Following: {}", following.len());
    println!("+ Mutual: {}", report.mutual.len());
    println!("+ Not followback you: {}", report.not_followback_you.len());
    println!(
        "+ Not get your followback: {}",
        report.not_get_your_followback.len()
    );
    println!("Done!");
    Ok(())
}
