use anyhow::Result;
use std::path::Path;

use triage_auth::{GuardConfig, GuardDecision, app_routes};
use triage_core::TriageConfig;

use super::offline_resolver;

pub fn run(role: &str, base_dir: &Path) -> Result<()> {
    let config = TriageConfig::load_or_default(&TriageConfig::default_path(base_dir))?;
    let guard_config = GuardConfig::from(&config.access);
    let resolver = offline_resolver(role);

    match resolver.role_descriptor() {
        Some(r) => println!("Routes for {} ({}):", r.code, r.display_name),
        None => println!("Routes for unknown role {role:?}:"),
    }
    for route in app_routes() {
        match route.guard.evaluate(&resolver, &guard_config) {
            GuardDecision::Allow => println!("  {:<16} {}", route.path, route.title),
            GuardDecision::Deny(d) => println!(
                "  {:<16} denied -> {} ({})",
                route.path, d.redirect_to, d.notice
            ),
        }
    }
    Ok(())
}
