//! Persistence writer for username lists.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use followcheck_social::instagram::types::FollowUser;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk shape of every stored list.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredList {
    /// RFC 3339 UTC timestamp taken when the list was written.
    pub fetched_at: String,
    /// Usernames in source-list order.
    pub data: Vec<String>,
}

/// Write `users` to `<dir>/<filename>` as pretty-printed JSON, overwriting
/// any existing file at that path. The directory must already exist.
pub async fn store(dir: &Path, filename: &str, users: &[FollowUser]) -> Result<()> {
    let record = StoredList {
        fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        data: users.iter().map(|u| u.username.clone()).collect(),
    };
    let body = serde_json::to_string_pretty(&record)?;

    let path = dir.join(filename);
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(file = %path.display(), count = record.data.len(), "list stored");
    Ok(())
}
