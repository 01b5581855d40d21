use anyhow::Result;
use std::path::Path;

use triage_core::TriageConfig;

pub async fn run(base_dir: &Path) -> Result<()> {
    let config_path = TriageConfig::default_path(base_dir);
    let config = TriageConfig::load(&config_path)?;
    triage_web::start_web_server(&config).await
}
