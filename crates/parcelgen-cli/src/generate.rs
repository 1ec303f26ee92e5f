//! `parcelgen generate`: load schemas, generate, render and place the Java files.
//!
//! # Output Placement
//!
//! | Destination | Base `_Name.java` | Child `Name.java` |
//! |-------------|-------------------|-------------------|
//! | none | stdout | not generated |
//! | file | that file | not generated |
//! | directory | `<dir>/<package path>/` | same directory, only if absent |
//!
//! The child is created with `create_new`, so an existing (possibly edited)
//! child is never overwritten, even when it appears between the existence
//! check and the write.

use crate::config::GeneratorConfig;
use crate::java::render_unit;
use crate::schema::{self, SourceKind};
use anyhow::{Context, Result};
use parcelgen_core::{ChildState, generate};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Where generated source goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
    /// Root of a Java source tree
    Directory(PathBuf),
}

impl Destination {
    /// An existing directory is a source root; any other path is a file.
    pub fn resolve(path: Option<PathBuf>) -> Self {
        match path {
            None => Destination::Stdout,
            Some(path) if path.is_dir() => Destination::Directory(path),
            Some(path) => Destination::File(path),
        }
    }
}

/// What happened to the child unit of one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildOutcome {
    Written(PathBuf),
    /// Already present, left untouched
    Skipped(PathBuf),
    /// The destination has no place for a child
    NotGenerated,
}

/// Result of generating one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub class: String,
    /// `None` when the base went to stdout
    pub base: Option<PathBuf>,
    pub child: ChildOutcome,
}

/// Result of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<Outcome>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

/// Command entry point.
pub fn run(source: &Path, destination: Option<PathBuf>, config: Option<&Path>) -> Result<()> {
    let config = config.map(GeneratorConfig::from_file).transpose()?;
    let destination = Destination::resolve(destination);

    if source.is_dir() {
        let Destination::Directory(dir) = &destination else {
            anyhow::bail!("A source directory needs an existing destination directory");
        };
        let report = generate_dir(source, dir, config.as_ref())?;
        if !report.failed.is_empty() {
            anyhow::bail!(
                "{} of {} schemas failed",
                report.failed.len(),
                report.failed.len() + report.generated.len()
            );
        }
        return Ok(());
    }

    let stdout = io::stdout();
    generate_file(source, &destination, config.as_ref(), &mut stdout.lock())?;
    Ok(())
}

/// Generate one schema file. `out` receives the base unit for [`Destination::Stdout`].
pub fn generate_file(
    source: &Path,
    destination: &Destination,
    config: Option<&GeneratorConfig>,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let loaded = schema::load(source, config)?;
    let class = loaded.description.class_name.clone();

    match destination {
        Destination::Stdout => {
            let artifact = generate(&loaded.description, &loaded.options, ChildState::Exists)?;
            out.write_all(render_unit(&artifact.base).as_bytes())
                .context("Failed to write to stdout")?;
            Ok(Outcome {
                class,
                base: None,
                child: ChildOutcome::NotGenerated,
            })
        }
        Destination::File(path) => {
            let artifact = generate(&loaded.description, &loaded.options, ChildState::Exists)?;
            write_base(path, &render_unit(&artifact.base))?;
            Ok(Outcome {
                class,
                base: Some(path.clone()),
                child: ChildOutcome::NotGenerated,
            })
        }
        Destination::Directory(root) => {
            let package_dir = package_dir(root, &loaded.options.package);
            fs::create_dir_all(&package_dir)
                .with_context(|| format!("Failed to create directory: {package_dir:?}"))?;

            let base_path = package_dir.join(format!("_{class}.java"));
            let child_path = package_dir.join(format!("{class}.java"));
            let child_state = if child_path.exists() {
                ChildState::Exists
            } else {
                ChildState::Missing
            };

            // nothing is written unless generation succeeded
            let artifact = generate(&loaded.description, &loaded.options, child_state)?;
            write_base(&base_path, &render_unit(&artifact.base))?;

            let child = match &artifact.child {
                Some(unit) => write_child(&child_path, &render_unit(unit))?,
                None => {
                    info!(path = %child_path.display(), "child class exists, skipping");
                    ChildOutcome::Skipped(child_path)
                }
            };

            Ok(Outcome {
                class,
                base: Some(base_path),
                child,
            })
        }
    }
}

/// Generate every schema file of a directory into a source root.
///
/// A failing schema is logged and recorded; the others still run.
pub fn generate_dir(
    source_dir: &Path,
    root: &Path,
    config: Option<&GeneratorConfig>,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    let destination = Destination::Directory(root.to_path_buf());

    for source in schema_files(source_dir)? {
        info!(source = %source.display(), "generating");
        match generate_file(&source, &destination, config, &mut io::sink()) {
            Ok(outcome) => report.generated.push(outcome),
            Err(err) => {
                error!(source = %source.display(), error = %format!("{err:#}"), "generation failed");
                report.failed.push((source, err));
            }
        }
    }

    Ok(report)
}

/// Schema files (`.json`, `.yaml`, `.yml`) of a directory, sorted by name.
pub fn schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {dir:?}"))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {dir:?}"))?
            .path();
        if path.is_file() && SourceKind::of(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `<root>/com/example/model` for `com.example.model`.
pub fn package_dir(root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
}

fn write_base(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {path:?}"))?;
    info!(path = %path.display(), "wrote base class");
    Ok(())
}

fn write_child(path: &Path, text: &str) -> Result<ChildOutcome> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            info!(path = %path.display(), "child class exists, skipping");
            return Ok(ChildOutcome::Skipped(path.to_path_buf()));
        }
        Err(err) => return Err(err).with_context(|| format!("Failed to create {path:?}")),
    };

    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {path:?}"))?;
    info!(path = %path.display(), "wrote child class");
    Ok(ChildOutcome::Written(path.to_path_buf()))
}
