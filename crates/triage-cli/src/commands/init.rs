use anyhow::Result;
use std::path::Path;

use triage_core::TriageConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    println!("Initializing Triage in {}", base_dir.display());

    std::fs::create_dir_all(base_dir)?;

    let config_path = TriageConfig::default_path(base_dir);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        TriageConfig::default_config().save(&config_path)?;
        println!("Created config: {}", config_path.display());
    }

    // Validate whatever is on disk now
    TriageConfig::load(&config_path)?;

    println!("\nTriage initialized. Next steps:");
    println!("  1. Set access.jwt_secret in {} to the shared signing secret", config_path.display());
    println!("  2. Run `triage serve` to start the access service");

    Ok(())
}
