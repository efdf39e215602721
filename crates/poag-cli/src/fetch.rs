use std::time::Duration;

use poag_core::error::SourceError;
use poag_core::pipeline::SnapshotSource;
use poag_core::snapshot::RawSnapshot;

/// Live snapshot source: a plain HTTP GET against an endpoint serving the
/// scraper's JSON payload. The browser-driven extraction itself lives
/// outside this toolchain.
pub struct HttpSnapshotSource {
    agent: ureq::Agent,
}

impl HttpSnapshotSource {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(120)))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for HttpSnapshotSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn fetch(&self, base_url: &str) -> Result<RawSnapshot, SourceError> {
        let snapshot = self
            .agent
            .get(base_url)
            .call()?
            .body_mut()
            .read_json::<RawSnapshot>()?;
        Ok(snapshot)
    }
}
