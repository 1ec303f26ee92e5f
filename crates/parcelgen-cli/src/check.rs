//! `parcelgen check`: validate schemas without writing anything.

use crate::config::GeneratorConfig;
use crate::generate::schema_files;
use crate::schema;
use anyhow::Result;
use parcelgen_core::ClassSchema;
use std::path::Path;
use tracing::error;

/// Summary of one valid schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSummary {
    pub class: String,
    pub package: String,
    pub properties: usize,
    pub textual: bool,
}

/// Load and resolve one schema file.
pub fn check_file(source: &Path, config: Option<&GeneratorConfig>) -> Result<SchemaSummary> {
    let loaded = schema::load(source, config)?;
    let schema = ClassSchema::build(&loaded.description, &loaded.options)?;

    Ok(SchemaSummary {
        class: schema.name().to_string(),
        package: schema.package().to_string(),
        properties: schema.len(),
        textual: schema.emits_textual(),
    })
}

/// Command entry point. A directory source checks every schema in it.
pub fn run(source: &Path, config: Option<&Path>) -> Result<()> {
    let config = config.map(GeneratorConfig::from_file).transpose()?;

    let sources = if source.is_dir() {
        schema_files(source)?
    } else {
        vec![source.to_path_buf()]
    };

    let mut failed = 0;
    for source in &sources {
        match check_file(source, config.as_ref()) {
            Ok(summary) => println!(
                "✓ {}.{}: {} properties{}",
                summary.package,
                summary.class,
                summary.properties,
                if summary.textual { ", JSON" } else { "" }
            ),
            Err(err) => {
                error!(source = %source.display(), error = %format!("{err:#}"), "invalid schema");
                println!("✗ {}: {err:#}", source.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} schemas are invalid", sources.len());
    }
    println!("\nAll schemas are valid!");
    Ok(())
}
