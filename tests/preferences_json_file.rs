use std::sync::Arc;

use anyhow::Result;
use fundboard::alert::{AlertBanner, ALERT_DISMISSED_KEY};
use fundboard::preferences::{JsonFilePreferenceStore, PreferenceStore};
use tempfile::TempDir;

#[tokio::test]
async fn missing_file_reads_as_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonFilePreferenceStore::new(dir.path());

    assert_eq!(store.get(ALERT_DISMISSED_KEY).await?, None);
    assert!(!store.path().exists());
    Ok(())
}

#[tokio::test]
async fn values_persist_across_instances() -> Result<()> {
    let dir = TempDir::new()?;
    let data_dir = dir.path().join("nested").join("data");

    let store = JsonFilePreferenceStore::new(&data_dir);
    store.set("theme", "dark").await?;
    store.set("density", "compact").await?;
    store.set("theme", "light").await?;

    let reopened = JsonFilePreferenceStore::new(&data_dir);
    assert_eq!(reopened.get("theme").await?.as_deref(), Some("light"));
    assert_eq!(reopened.get("density").await?.as_deref(), Some("compact"));
    assert_eq!(reopened.get("missing").await?, None);
    Ok(())
}

#[tokio::test]
async fn corrupt_file_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonFilePreferenceStore::new(dir.path());
    std::fs::write(store.path(), "{not json")?;

    assert!(store.get("theme").await.is_err());
    Ok(())
}

#[tokio::test]
async fn banner_dismissal_survives_restart() -> Result<()> {
    let dir = TempDir::new()?;

    let store: Arc<dyn PreferenceStore> = Arc::new(JsonFilePreferenceStore::new(dir.path()));
    let mut banner = AlertBanner::load(store).await?;
    assert!(banner.should_render());
    banner.dismiss().await?;
    assert!(!banner.should_render());

    let store: Arc<dyn PreferenceStore> = Arc::new(JsonFilePreferenceStore::new(dir.path()));
    let banner = AlertBanner::load(store).await?;
    assert!(!banner.should_render());

    let raw = std::fs::read_to_string(dir.path().join(JsonFilePreferenceStore::FILE_NAME))?;
    assert!(raw.contains(ALERT_DISMISSED_KEY));
    Ok(())
}
