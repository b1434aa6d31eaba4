use std::path::Path;

use anyhow::Result;
use daybook_core::config::DaybookConfig;
use owo_colors::OwoColorize;

pub fn show(config: &DaybookConfig, config_path: &Path) -> Result<()> {
    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Events:  {}", config.events_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!("  horizon                       {}", config.horizon);
    println!(
        "  default_notification_minutes  {}",
        config.default_notification_minutes
    );
    println!("  log_level                     {}", config.log_level);

    Ok(())
}

pub fn set(mut config: DaybookConfig, config_path: &Path, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save(config_path)?;

    println!("{} {} = {}", "✓".green(), key.bold(), value);
    Ok(())
}
