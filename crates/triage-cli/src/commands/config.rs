use anyhow::Result;
use std::path::Path;

use triage_core::TriageConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = TriageConfig::default_path(base_dir);
    let config = TriageConfig::load(&config_path)?;

    println!("Config: {}", config_path.display());
    println!();
    println!("  Default route:  {}", config.access.default_route);
    println!("  Login route:    {}", config.access.login_route);
    println!("  Token TTL:      {}s", config.access.token_ttl_secs);
    println!(
        "  JWT secret:     {}",
        if config.access.jwt_secret.is_empty() { "(empty)" } else { "(set)" }
    );
    println!("  Listen addr:    {}", config.web.listen_addr);

    Ok(())
}
