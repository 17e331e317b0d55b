use crate::core::{
    collaborators::PreferencesStore,
    config::FilePreferencesStore,
    error::Result,
    git::GitRepo,
    output::{print_section_header, print_success},
};
use colored::*;
use std::env;

/// Show the effective preferences, optionally switching the integration on or off first.
pub fn execute_prefs(enable: Option<bool>) -> Result<()> {
    let current_dir = env::current_dir()?;
    let workdir = GitRepo::open(&current_dir)
        .ok()
        .and_then(|repo| repo.workdir().ok());

    let mut store = FilePreferencesStore::load(workdir.as_deref())?;

    if let Some(enable) = enable {
        store.personal.enable_core_integration = enable;
        store.save()?;
        print_success(if enable {
            "Integration enabled"
        } else {
            "Integration disabled"
        });
    }

    print_section_header("Preferences");
    println!(
        "  {} {}",
        "Personal:".bright_black(),
        store.personal_path().display()
    );
    if let Some(workdir) = &workdir {
        println!("  {} {}", "Project:".bright_black(), workdir.display());
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
    println!();
    Ok(())
}
