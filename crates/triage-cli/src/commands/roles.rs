use std::path::Path;

use anyhow::{Context, Result};

use triage_auth::{BackendRole, RoleDisplay, RoleRegistry};

pub fn run(verbose: bool, backend: Option<&Path>) -> Result<()> {
    let registry = RoleRegistry::builtin();
    let labels = match backend {
        Some(path) => backend_catalog(registry, path)?,
        None => registry.display_catalog(&[]),
    };

    for (role, label) in registry.roles().zip(&labels) {
        println!(
            "{:<15} {:<15} {:>2} permissions  {}",
            role.code,
            label.display_name,
            role.permissions.len(),
            label.description
        );
        if verbose {
            for p in &role.permissions {
                println!("    - {p}");
            }
        }
    }
    Ok(())
}

/// Labels from a backend role listing (a JSON array of `{code, name, description}`).
fn backend_catalog(registry: &RoleRegistry, path: &Path) -> Result<Vec<RoleDisplay>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let backend: Vec<BackendRole> = serde_json::from_str(&content)
        .with_context(|| format!("invalid role listing in {}", path.display()))?;
    Ok(registry.display_catalog(&backend))
}
