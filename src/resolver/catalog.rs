use async_trait::async_trait;

use crate::error::Result;
use crate::jamendo::Track;
use crate::resolver::pass::SearchPass;

/// A searchable track catalog. One call per pass, no retries.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    async fn search(&self, pass: &SearchPass) -> Result<Vec<Track>>;
}
