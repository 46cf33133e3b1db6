// storefront/src/preferences.rs

//! Small persisted key-value settings read at startup: whether the app has
//! been launched before and which user was logged in.

use crate::error::StoreResult;
use crate::state::Observable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceValues {
  #[serde(default)]
  pub app_launched: bool,
  #[serde(default)]
  pub logged_user_id: Option<i64>,
}

/// Preferences backed by a JSON file, or kept in memory when no path is given.
#[derive(Debug, Clone)]
pub struct Preferences {
  path: Option<PathBuf>,
  values: Observable<PreferenceValues>,
  // Serializes edits so file writes land in edit order.
  write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl Preferences {
  pub fn in_memory() -> Self {
    Self {
      path: None,
      values: Observable::default(),
      write_lock: Arc::new(tokio::sync::Mutex::new(())),
    }
  }

  /// Loads preferences from `path`. A missing file yields defaults and is
  /// created on the first edit.
  #[instrument(name = "Preferences::load", skip(path), fields(path = %path.as_ref().display()), err(Display))]
  pub async fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
    let path = path.as_ref().to_path_buf();
    let values = match tokio::fs::read(&path).await {
      Ok(bytes) => serde_json::from_slice::<PreferenceValues>(&bytes)?,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        event!(Level::DEBUG, "No preferences file yet; using defaults.");
        PreferenceValues::default()
      }
      Err(e) => return Err(e.into()),
    };
    Ok(Self {
      path: Some(path),
      values: Observable::new(values),
      write_lock: Arc::new(tokio::sync::Mutex::new(())),
    })
  }

  pub fn values(&self) -> PreferenceValues {
    self.values.get()
  }

  pub fn is_app_launched_before(&self) -> bool {
    self.values.read(|v| v.app_launched)
  }

  pub fn logged_user_id(&self) -> Option<i64> {
    self.values.read(|v| v.logged_user_id)
  }

  pub fn subscribe(&self) -> watch::Receiver<PreferenceValues> {
    self.values.subscribe()
  }

  pub async fn set_app_launched(&self, launched: bool) -> StoreResult<()> {
    self.edit(|v| v.app_launched = launched).await
  }

  pub async fn set_logged_user_id(&self, user_id: Option<i64>) -> StoreResult<()> {
    self.edit(|v| v.logged_user_id = user_id).await
  }

  /// Applies `f` to a copy, persists it, and only then publishes it. A failed
  /// write leaves both the file and the observed values untouched.
  async fn edit(&self, f: impl FnOnce(&mut PreferenceValues)) -> StoreResult<()> {
    let _guard = self.write_lock.lock().await;
    let mut next = self.values.get();
    f(&mut next);
    if let Some(path) = &self.path {
      let bytes = serde_json::to_vec_pretty(&next)?;
      // Write-then-rename so a crash never leaves a truncated file behind.
      let tmp = path.with_extension("json.tmp");
      if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        event!(Level::ERROR, error = %e, path = %path.display(), "Could not write preferences.");
        return Err(e.into());
      }
      if let Err(e) = tokio::fs::rename(&tmp, path).await {
        event!(Level::ERROR, error = %e, path = %path.display(), "Could not replace preferences file.");
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(e.into());
      }
    }
    self.values.set(next);
    Ok(())
  }
}
