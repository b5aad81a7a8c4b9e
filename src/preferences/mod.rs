mod json_file;
mod memory;

pub use json_file::JsonFilePreferenceStore;
pub use memory::MemoryPreferenceStore;

use anyhow::Result;

/// Small persisted key-value settings (e.g. dismissed banners).
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
