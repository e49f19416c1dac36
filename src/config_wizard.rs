//! Interactive configuration wizard for creating `md-binder.toml`.
//!
//! The wizard asks where the notes live and where the PDF should go, which
//! parts of the document to generate, and the page size. If a cover is wanted
//! and no metadata file exists yet, it offers to write one.

use crate::config::{Configuration, DEFAULT_CONFIG_FILE};
use crate::metadata::Metadata;
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

const PAGE_SIZES: &[&str] = &["Letter", "A4", "Legal", "A5"];

/// Run the interactive configuration wizard.
///
/// Writes `md-binder.toml` to the current directory, and optionally the
/// cover metadata file it points at.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Configuration::default();

    if Path::new(DEFAULT_CONFIG_FILE).exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!("{DEFAULT_CONFIG_FILE} already exists, overwrite it?"))
            .default(false)
            .interact()?
    {
        return Ok(());
    }

    let input: String = Input::with_theme(&theme)
        .with_prompt("Directory containing the Markdown notes")
        .default(config.paths.input_directory.display().to_string())
        .interact_text()
        .with_context(|| "Failed to obtain input directory")?;
    let input = PathBuf::from(input);
    if !input.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", input.display()));
    }
    config.paths.input_directory = input;

    let output: String = Input::with_theme(&theme)
        .with_prompt("Output PDF")
        .default(config.paths.output.display().to_string())
        .interact_text()
        .with_context(|| "Failed to obtain output path")?;
    config.paths.output = PathBuf::from(output);

    let page_size = Select::with_theme(&theme)
        .with_prompt("Page size")
        .items(PAGE_SIZES)
        .default(0)
        .interact()
        .with_context(|| "Failed to obtain page size")?;
    config.page.size = PAGE_SIZES[page_size].to_string();

    config.document.toc = Confirm::with_theme(&theme)
        .with_prompt("Generate a table of contents?")
        .default(true)
        .interact()?;
    if config.document.toc {
        config.document.toc_title = Input::with_theme(&theme)
            .with_prompt("Table of contents heading")
            .default(config.document.toc_title.clone())
            .interact_text()?;
    }
    config.document.numbering = Confirm::with_theme(&theme)
        .with_prompt("Number the pages?")
        .default(true)
        .interact()?;
    config.document.cover = Confirm::with_theme(&theme)
        .with_prompt("Generate a cover page?")
        .default(true)
        .interact()?;

    if config.document.cover && !config.paths.metadata.exists() {
        if Confirm::with_theme(&theme)
            .with_prompt(format!(
                "No cover metadata at {}, create it now?",
                config.paths.metadata.display()
            ))
            .default(true)
            .interact()?
        {
            let metadata = prompt_metadata(&theme)?;
            write_metadata(&config.paths.metadata, &metadata)?;
            println!("Wrote {}", config.paths.metadata.display());
        } else {
            println!(
                "The cover will be skipped until {} exists.",
                config.paths.metadata.display()
            );
        }
    }

    let contents = toml::to_string_pretty(&config).with_context(|| "Failed to serialize config")?;
    std::fs::write(DEFAULT_CONFIG_FILE, contents)
        .with_context(|| format!("Failed to write {DEFAULT_CONFIG_FILE}"))?;
    println!("Wrote {DEFAULT_CONFIG_FILE}");
    Ok(())
}

/// Ask for each cover field; blank answers leave the field out
fn prompt_metadata(theme: &ColorfulTheme) -> Result<Metadata> {
    let ask = |prompt: &str| -> Result<Option<String>> {
        let value: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
    };

    Ok(Metadata {
        course_title: ask("Title (leave blank to skip)")?,
        code: ask("Code (leave blank to skip)")?,
        institution: ask("Institution (leave blank to skip)")?,
        date: ask("Date (leave blank to skip)")?,
        logo: ask("Logo file name in the logo directory (leave blank to skip)")?,
    })
}

fn write_metadata(path: &Path, metadata: &Metadata) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(metadata).with_context(|| "Failed to serialize metadata")?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))
}
