//! Recursive template tree materialization
//!
//! Walks a template tree depth-first, gates every entry through its name
//! conditions, and builds the destination tree: included directories are
//! created (idempotently) and recursed into, included files are either
//! rendered (render-marker files) or copied verbatim under their
//! sanitized names. Excluded entries are skipped with no side effects;
//! an excluded directory prunes its whole subtree.
//!
//! I/O is awaited in sequence, so a destination directory always exists
//! before its children are written.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use colored::Colorize;
use tokio::fs;
use walkdir::WalkDir;

use crate::context::{SelectionContext, VariableContext};
use crate::engine::naming;
use crate::engine::render::Renderer;
use crate::error::MaterializeError;
use crate::templates::manifest::Vocabulary;

/// What happened during one materialization call.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    /// Destination-relative paths of files written
    pub files_written: Vec<PathBuf>,

    /// Entries excluded by their name conditions
    pub entries_skipped: usize,
}

/// Materialize a template tree into a destination tree.
///
/// A missing source directory yields a warning and zero entries rather
/// than an error; all other I/O failures abort the call.
pub async fn materialize(
    vocab: &Vocabulary,
    source_dir: &Path,
    dest_dir: &Path,
    selection: &SelectionContext,
    vars: &VariableContext,
) -> Result<MaterializeReport, MaterializeError> {
    let renderer = Renderer::new(vocab, selection);
    let mut report = MaterializeReport::default();
    materialize_dir(
        vocab,
        &renderer,
        selection,
        vars,
        source_dir.to_path_buf(),
        dest_dir.to_path_buf(),
        PathBuf::new(),
        &mut report,
    )
    .await?;
    Ok(report)
}

/// Recursion helper; boxed because async fns cannot recurse directly.
#[allow(clippy::too_many_arguments)]
fn materialize_dir<'a>(
    vocab: &'a Vocabulary,
    renderer: &'a Renderer,
    selection: &'a SelectionContext,
    vars: &'a VariableContext,
    source: PathBuf,
    dest: PathBuf,
    relative: PathBuf,
    report: &'a mut MaterializeReport,
) -> Pin<Box<dyn Future<Output = Result<(), MaterializeError>> + Send + 'a>> {
    Box::pin(async move {
        let mut entries = match fs::read_dir(&source).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                eprintln!(
                    "{} template directory does not exist: {}",
                    "Warning:".yellow(),
                    source.display()
                );
                return Ok(());
            }
            Err(e) => return Err(MaterializeError::io("read directory", &source, e)),
        };

        fs::create_dir_all(&dest)
            .await
            .map_err(|e| MaterializeError::io("create directory", &dest, e))?;

        // Stable order across calls for reproducibility
        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MaterializeError::io("read directory", &source, e))?
        {
            children.push(entry);
        }
        children.sort_by_key(|e| e.file_name());

        for child in children {
            let name = child.file_name().to_string_lossy().into_owned();
            let source_path = child.path();
            let file_type = child
                .file_type()
                .await
                .map_err(|e| MaterializeError::io("stat entry", &source_path, e))?;

            if file_type.is_dir() {
                if !naming::is_included_dir(vocab, &name, selection) {
                    report.entries_skipped += 1;
                    continue;
                }
                let clean = naming::clean_dir_name(vocab, &name);
                materialize_dir(
                    vocab,
                    renderer,
                    selection,
                    vars,
                    source_path,
                    dest.join(&clean),
                    relative.join(&clean),
                    report,
                )
                .await?;
            } else {
                if !naming::is_included_file(vocab, &name, selection) {
                    report.entries_skipped += 1;
                    continue;
                }
                let dest_name = destination_file_name(vocab, &name, selection);
                let dest_path = dest.join(&dest_name);

                if naming::has_render_marker(vocab, &name) {
                    let template = fs::read_to_string(&source_path)
                        .await
                        .map_err(|e| MaterializeError::io("read template", &source_path, e))?;
                    let rendered = renderer
                        .render(&template, vars)
                        .map_err(|e| MaterializeError::render(&source_path, e))?;
                    fs::write(&dest_path, rendered)
                        .await
                        .map_err(|e| MaterializeError::io("write file", &dest_path, e))?;
                } else {
                    fs::copy(&source_path, &dest_path)
                        .await
                        .map_err(|e| MaterializeError::io("copy file", &dest_path, e))?;
                }
                report.files_written.push(relative.join(&dest_name));
            }
        }

        Ok(())
    })
}

/// Sanitize a source file name and apply the caller-declared per-framework
/// rename rules to the result.
fn destination_file_name(vocab: &Vocabulary, name: &str, selection: &SelectionContext) -> String {
    let clean = naming::clean_file_name(vocab, name);
    match vocab.rename_for(&selection.framework, &clean) {
        Some(renamed) => renamed.to_string(),
        None => clean,
    }
}

/// How a planned entry would be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    CreateDir,
    Render,
    Copy,
}

/// One entry a materialization call would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Path relative to the source tree
    pub source: PathBuf,

    /// Path relative to the destination tree, fully sanitized
    pub destination: PathBuf,

    pub action: PlannedAction,
}

/// Dry-run companion to [`materialize`]: walk the template tree and report
/// what would be created, without touching the filesystem destination.
///
/// Excluded directories are pruned without descending into them.
pub fn plan(
    vocab: &Vocabulary,
    source_dir: &Path,
    selection: &SelectionContext,
) -> Vec<PlannedEntry> {
    if !source_dir.is_dir() {
        eprintln!(
            "{} template directory does not exist: {}",
            "Warning:".yellow(),
            source_dir.display()
        );
        return Vec::new();
    }

    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            naming::is_included_dir(vocab, &name, selection)
        });

    let mut planned = Vec::new();
    for entry in walker.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = match entry.path().strip_prefix(source_dir) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };

        if entry.file_type().is_dir() {
            planned.push(PlannedEntry {
                source: relative.clone(),
                destination: clean_relative_path(vocab, &relative, selection, true),
                action: PlannedAction::CreateDir,
            });
        } else if naming::is_included_file(vocab, &name, selection) {
            let action = if naming::has_render_marker(vocab, &name) {
                PlannedAction::Render
            } else {
                PlannedAction::Copy
            };
            planned.push(PlannedEntry {
                source: relative.clone(),
                destination: clean_relative_path(vocab, &relative, selection, false),
                action,
            });
        }
    }
    planned
}

/// Sanitize every component of a source-relative path.
fn clean_relative_path(
    vocab: &Vocabulary,
    relative: &Path,
    selection: &SelectionContext,
    is_dir: bool,
) -> PathBuf {
    let components: Vec<String> = relative
        .iter()
        .map(|c| c.to_string_lossy().into_owned())
        .collect();
    let mut out = PathBuf::new();
    for (index, component) in components.iter().enumerate() {
        let is_last = index == components.len() - 1;
        if is_last && !is_dir {
            out.push(destination_file_name(vocab, component, selection));
        } else {
            out.push(naming::clean_dir_name(vocab, component));
        }
    }
    out
}
