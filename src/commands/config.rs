//! Config subcommands handler

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};

use framestep::config::migrate_config;
use framestep::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print the configuration file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Migrate config file by adding missing fields.
///
/// Reads the existing config file (or empty if it doesn't exist),
/// adds any missing fields from the current default config,
/// shows a preview of changes, and asks for confirmation unless `yes`.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("Config is already up to date.");
        return Ok(());
    }

    if file_exists {
        let total_fields = result.added_fields.len();
        let total_sections = result.sections_added.len();
        if total_sections > 0 {
            println!(
                "Found {} missing field(s) in {} new section(s):",
                total_fields, total_sections
            );
        } else {
            println!("Found {} missing field(s):", total_fields);
        }
    } else {
        println!("Config file does not exist. Will create with default settings.");
    }
    println!();
    for line in diff_preview(&result.content, &result.added_fields, !file_exists) {
        println!("{}", line);
    }
    println!();

    let question = if file_exists {
        format!("Apply these changes to {}?", config_path.display())
    } else {
        format!("Create {}?", config_path.display())
    };
    if !yes && !prompt_confirmation(&question)? {
        println!("No changes made.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    let done = if file_exists {
        "Config updated successfully."
    } else {
        "Config file created successfully."
    };
    println!("{}", done.green());

    Ok(())
}

/// Diff-style preview lines of the migrated config.
///
/// Added fields get a green `+` prefix, as do the headers of sections they
/// live in. For new files every line counts as added.
pub fn diff_preview(new_content: &str, added_fields: &[String], is_new_file: bool) -> Vec<String> {
    let added: HashSet<&str> = added_fields.iter().map(String::as_str).collect();
    let mut lines = Vec::new();
    let mut current_section = String::new();
    let mut pending_header: Option<&str> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current_section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line);
            continue;
        }

        let is_added = match trimmed.find('=') {
            Some(eq_pos) => {
                let key = format!("{}.{}", current_section, trimmed[..eq_pos].trim());
                is_new_file || added.contains(key.as_str())
            }
            None => is_new_file && !trimmed.is_empty(),
        };
        if !is_added {
            continue;
        }

        if let Some(header) = pending_header.take() {
            lines.push(format!("{} {}", "+".green(), header.green()));
        }
        lines.push(format!("{}", format!("+ {}", line).green()));
    }
    lines
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        println!(
            "{}",
            "Non-interactive mode: use --yes to apply changes automatically".dark_grey()
        );
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
