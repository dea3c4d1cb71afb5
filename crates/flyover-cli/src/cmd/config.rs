use crate::output::print_json;
use clap::Subcommand;
use flyover_core::{Config, WarnLevel};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective config (file + overrides)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(config: &Config, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(config, json),
        ConfigSubcommand::Validate => validate(config, json),
    }
}

fn show(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(config)
    } else {
        print!("{}", serde_yaml::to_string(config)?);
        Ok(())
    }
}

fn validate(config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&serde_json::json!({ "ok": errors == 0, "warnings": warnings }))?;
    } else {
        for w in &warnings {
            let tag = if w.level == WarnLevel::Error { "error" } else { "warning" };
            println!("[{tag}] {}", w.message);
        }
        println!(
            "{} error(s), {} warning(s)",
            errors,
            warnings.len() - errors
        );
    }

    if errors > 0 {
        anyhow::bail!("config has {errors} error(s); `flyover passes` will refuse to run");
    }
    Ok(())
}
