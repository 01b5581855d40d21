use anyhow::Result;

use triage_auth::Permission;

pub fn run() -> Result<()> {
    for p in Permission::ALL {
        println!("{:<30} {}", p.as_str(), p.description());
    }
    Ok(())
}
