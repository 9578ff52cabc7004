//! Charm-style CLI prompts using cliclack

use crate::context::{SelectionContext, VariableContext};
use crate::engine::materialize::{materialize, plan, PlannedAction};
use crate::templates::manifest::{RootManifest, TemplateManifest};
use crate::templates::version;
use crate::util::to_valid_package_name;
use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;

/// Upgrade/install command shown in version warnings
const UPGRADE_COMMAND: &str = "cargo install stencil-cli --force";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory holding the template tree (defaults to ./templates)
    pub template_dir: Option<PathBuf>,

    /// Project-type template name to use
    pub template: Option<String>,

    /// Project name
    pub name: Option<String>,

    /// Directory to create the project under
    pub directory: Option<PathBuf>,

    /// Framework to select
    pub framework: Option<String>,

    /// Options to enable
    pub options: Option<Vec<String>>,

    /// Print what would be created without writing anything
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Stencil")?;

    // Step 1: Locate templates and pick the project type
    let templates_dir = args
        .template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("templates"));
    let (template_name, manifest) =
        select_template(&templates_dir, args.template.as_deref()).await?;

    // Step 2: Check version compatibility
    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, UPGRADE_COMMAND)
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 3: Project name
    let package_name = select_name(&args)?;

    // Step 4: Destination directory (with conflict handling)
    let project_dir = select_directory(&args, &package_name).await?;

    // Step 5: Framework and options
    let selection = select_variant(&manifest, &args)?;

    // Step 6: Materialize (or print the plan)
    let source = templates_dir.join(&template_name);
    let vars = build_vars(&template_name, &package_name, &project_dir);

    if args.dry_run {
        print_plan(&manifest, &source, &selection)?;
        cliclack::outro("Dry run complete. Nothing was written.")?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let report = match materialize(&manifest.vocabulary, &source, &project_dir, &selection, &vars)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            spinner.error("Failed to create project");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Created {} file(s) in {}",
        report.files_written.len(),
        project_dir.display()
    ));

    // Step 7: Show next steps
    print_next_steps(&project_dir)?;

    Ok(())
}

async fn select_template(
    templates_dir: &std::path::Path,
    specified_template: Option<&str>,
) -> Result<(String, TemplateManifest)> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let root_manifest = RootManifest::load(templates_dir).await?;

    // If a template was specified via --template flag, use it directly
    if let Some(template_name) = specified_template {
        if !root_manifest.templates.contains(&template_name.to_string()) {
            spinner.stop("Failed to load templates");
            let available = root_manifest.templates.join(", ");
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_name,
                available
            );
        }
        let manifest = TemplateManifest::load(&templates_dir.join(template_name)).await?;
        spinner.stop(format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ));
        return Ok((template_name.to_string(), manifest));
    }

    let mut templates: Vec<(String, TemplateManifest)> = Vec::new();
    for template_name in &root_manifest.templates {
        let manifest = TemplateManifest::load(&templates_dir.join(template_name)).await?;
        templates.push((template_name.clone(), manifest));
    }

    spinner.stop("Templates loaded");

    if templates.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // If only one template, use it automatically
    if templates.len() == 1 {
        let (name, manifest) = templates.into_iter().next().unwrap();
        cliclack::log::info(format!(
            "Using template: {} - {}",
            manifest.name, manifest.description
        ))?;
        return Ok((name, manifest));
    }

    // Build select prompt - use indices to avoid borrow issues
    let mut select = cliclack::select("Select the type of project to create");
    for (idx, (_, manifest)) in templates.iter().enumerate() {
        select = select.item(idx, &manifest.name, &manifest.description);
    }
    let selected_idx: usize = select.interact()?;

    let (name, manifest) = templates.into_iter().nth(selected_idx).unwrap();
    Ok((name, manifest))
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(raw) = &args.name {
        let slug = to_valid_package_name(raw);
        if slug.is_empty() {
            anyhow::bail!("Project name '{}' is not a valid package name.", raw);
        }
        if slug != *raw {
            cliclack::log::info(format!("Using package name: {}", slug))?;
        }
        return Ok(slug);
    }

    let input: String = cliclack::input("Name of the project")
        .validate(|value: &String| {
            if to_valid_package_name(value).is_empty() {
                Err("Project name must contain at least one letter or digit.")
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(to_valid_package_name(&input))
}

async fn select_directory(args: &CreateArgs, package_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let base = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir.clone()
    } else {
        let input: String = cliclack::input("Path for the project")
            .placeholder(".")
            .default_input(".")
            .interact()?;
        if input.is_empty() || input == "." {
            current_dir.clone()
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    let mut project_dir = base.join(package_name);

    // Conflict handling: overwrite or pick another path.
    // Dry runs never touch the filesystem, conflicts included.
    if project_dir.exists() && !args.dry_run {
        let overwrite = if args.yes {
            true
        } else {
            cliclack::confirm(format!(
                "Path \"{}\" already exists. Overwrite?",
                project_dir.display()
            ))
            .initial_value(false)
            .interact()?
        };

        if overwrite {
            fs::remove_dir_all(&project_dir).await?;
        } else {
            let input: String = cliclack::input("Enter a new path for the project")
                .validate(|value: &String| {
                    if value.trim().is_empty() {
                        Err("Path cannot be empty.")
                    } else {
                        Ok(())
                    }
                })
                .interact()?;
            let p = PathBuf::from(&input);
            let base = if p.is_absolute() { p } else { current_dir.join(p) };
            project_dir = base.join(package_name);
        }
    }

    Ok(project_dir)
}

fn select_variant(manifest: &TemplateManifest, args: &CreateArgs) -> Result<SelectionContext> {
    let vocab = &manifest.vocabulary;

    let framework = if let Some(framework) = &args.framework {
        if !vocab.is_framework(framework) {
            anyhow::bail!(
                "Unknown framework '{}'. Available frameworks: {}",
                framework,
                vocab.frameworks.join(", ")
            );
        }
        framework.clone()
    } else if args.yes {
        manifest
            .default_framework
            .clone()
            .or_else(|| vocab.frameworks.first().cloned())
            .ok_or_else(|| anyhow::anyhow!("Template declares no frameworks."))?
    } else {
        let mut select = cliclack::select("Select the framework for the project");
        for framework in &vocab.frameworks {
            select = select.item(framework.clone(), framework, "");
        }
        if let Some(default) = &manifest.default_framework {
            if vocab.is_framework(default) {
                select = select.initial_value(default.clone());
            }
        }
        select.interact()?
    };

    let options: Vec<String> = if let Some(requested) = &args.options {
        let mut known = Vec::new();
        for option in requested {
            if vocab.is_option(option) {
                known.push(option.clone());
            } else {
                cliclack::log::warning(format!("Unknown option: {}", option))?;
            }
        }
        known
    } else if args.yes || vocab.options.is_empty() {
        Vec::new()
    } else {
        let mut multi = cliclack::multiselect("Select the options for the project");
        for option in &vocab.options {
            multi = multi.item(option.clone(), option, "");
        }
        multi.required(false).interact()?
    };

    cliclack::log::success(format!(
        "Selected: {}{}",
        framework,
        if options.is_empty() {
            String::new()
        } else {
            format!(" + {}", options.join(", "))
        }
    ))?;

    Ok(SelectionContext::new(framework, options))
}

fn build_vars(
    template_name: &str,
    package_name: &str,
    project_dir: &std::path::Path,
) -> VariableContext {
    use serde_json::Value;

    let mut vars = VariableContext::new();
    vars.insert(
        "type".to_string(),
        Value::String(template_name.to_string()),
    );
    vars.insert(
        "name".to_string(),
        Value::String(package_name.to_string()),
    );
    vars.insert(
        "package_name".to_string(),
        Value::String(package_name.to_string()),
    );
    vars.insert(
        "path".to_string(),
        Value::String(project_dir.display().to_string()),
    );
    vars
}

fn print_plan(
    manifest: &TemplateManifest,
    source: &std::path::Path,
    selection: &SelectionContext,
) -> Result<()> {
    let planned = plan(&manifest.vocabulary, source, selection);
    for entry in &planned {
        let verb = match entry.action {
            PlannedAction::CreateDir => "mkdir ",
            PlannedAction::Render => "render",
            PlannedAction::Copy => "copy  ",
        };
        cliclack::log::info(format!("{} {}", verb, entry.destination.display()))?;
    }
    cliclack::log::success(format!("{} entries planned", planned.len()))?;
    Ok(())
}

fn print_next_steps(project_dir: &std::path::Path) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();
    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }
    steps.push("npm install".to_string());
    steps.push("npm run dev".to_string());

    cliclack::outro(format!("Project ready. Next steps:\n  {}", steps.join("\n  ")))?;
    Ok(())
}
