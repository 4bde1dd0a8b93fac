pub mod cli;
pub mod config;
pub mod display;
pub mod edit_model;
pub mod error;
pub mod filter;
pub mod panel;
pub mod query;
pub mod translate;
pub mod visibility;
pub mod widget;
pub mod workspace;

use crate::filter::names::{FROM_EVENT_TIME, FROM_SEVERITY, TO_EVENT_TIME, TO_SEVERITY};
use anyhow::{Context, bail};
use log::{LevelFilter, debug, warn};
use std::path::Path;

pub use cli::{Cli, ColorMode, Commands, FilterReference, OutputFormat, PanelEdits, cli_parse};
pub use edit_model::{EditModelNames, EditModelStore, ReconcileReport};
pub use error::{Error, Result};
pub use filter::{Filter, FilterAttribute, FilterSet, RangeInputs};
pub use panel::AlarmFilterPanel;
pub use query::{BASE_QUERY, CurrentQuery, QueryBuilder, QuerySink, compile};
pub use translate::{NoTranslation, Translate, TranslationTable};
pub use visibility::VisibilityConfiguration;
pub use workspace::Workspace;

fn init_logger(verbose: u8, quiet: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if quiet {
        builder.filter_level(LevelFilter::Error);
    } else if verbose > 0 {
        builder.filter_level(match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    let _ = builder.try_init();
}

fn load_workspace(path: &Path) -> anyhow::Result<Workspace> {
    Workspace::load(path)
        .with_context(|| format!("No usable workspace at '{}', run `init` first", path.display()))
}

/// Apply the command-line edits as if they were made in the panel
fn apply_edits<S: QuerySink>(
    panel: &mut AlarmFilterPanel<'_, S>,
    edits: &PanelEdits,
) -> Result<()> {
    for (references, checked) in [(&edits.check, true), (&edits.uncheck, false)] {
        for reference in references {
            panel.set_checked(reference.attribute, &reference.name, checked)?;
        }
    }

    for (name, value) in [(FROM_EVENT_TIME, edits.from_time), (TO_EVENT_TIME, edits.to_time)] {
        if let Some(value) = value
            && !panel.controls_mut().set_date_time(name, value)
        {
            warn!("DateTimePicker \"{}\" is not part of the panel", name);
        }
    }

    for (name, text) in [
        (FROM_SEVERITY, &edits.from_severity),
        (TO_SEVERITY, &edits.to_severity),
    ] {
        if let Some(text) = text
            && !panel.controls_mut().set_text(name, text.as_str())
        {
            warn!("TextBox \"{}\" is not part of the panel", name);
        }
    }
    Ok(())
}

fn print_query(format: OutputFormat, query: &str, executions: usize) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", display::highlight_query(query)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": query,
                "executions": executions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_report(
    format: OutputFormat,
    edit_model: &str,
    report: &ReconcileReport,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if report.is_empty() {
                println!("Edit model '{}' is up to date", edit_model);
            } else {
                println!(
                    "Edit model '{}': {} added, {} removed, {} restored",
                    edit_model,
                    report.instance.added.len(),
                    report.instance.removed.len(),
                    report.instance.restored.len()
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "edit_model": edit_model,
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let app_config =
        config::load_config(cli.config.as_deref()).context("Failed to load config")?;
    let names = app_config.edit_model_names();
    let translator = app_config.translator();
    let format = cli.format;
    let path = cli.workspace.as_path();

    debug!(
        "Workspace {}, edit model {} of type {}",
        path.display(),
        names.edit_model,
        names.type_name()
    );

    match &cli.command {
        Commands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Workspace '{}' already exists, use --force to overwrite it",
                    path.display()
                );
            }
            let mut workspace = Workspace::new(VisibilityConfiguration::builtin());
            let report = workspace
                .edit_models
                .create(&names, &workspace.configuration)?;
            workspace.save(path)?;
            print_report(format, &names.edit_model, &report)?;
        }
        Commands::UpdateDefaults => {
            let mut workspace = load_workspace(path)?;
            let report = workspace
                .edit_models
                .create(&names, &workspace.configuration)?;
            workspace.save(path)?;
            print_report(format, &names.edit_model, &report)?;
        }
        Commands::GenerateDefaults => {
            let mut workspace = load_workspace(path)?;
            workspace.edit_models.delete(&names);
            let report = workspace
                .edit_models
                .create(&names, &workspace.configuration)?;
            workspace.save(path)?;
            print_report(format, &names.edit_model, &report)?;
        }
        Commands::Visibility {
            attribute,
            criterion,
            enable,
            disable,
        } => {
            let mut workspace = load_workspace(path)?;
            let enabled = *enable && !*disable;
            workspace
                .configuration
                .set_enabled(attribute, criterion.as_deref(), enabled)?;
            let report = workspace
                .edit_models
                .create(&names, &workspace.configuration)?;
            workspace.save(path)?;
            print_report(format, &names.edit_model, &report)?;
        }
        Commands::Show => {
            let workspace = load_workspace(path)?;
            match format {
                OutputFormat::Text => {
                    let layout =
                        panel::PanelLayout::generate(&workspace.configuration, &translator)?;
                    print!("{}", display::format_configuration(&workspace.configuration));
                    println!();
                    print!("{}", display::format_layout(&layout));
                    if let Ok(instance) = workspace.edit_models.get(&names.edit_model) {
                        println!();
                        print!("{}", display::format_edit_model(instance));
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&workspace)?);
                }
            }
        }
        Commands::Query => {
            let mut workspace = load_workspace(path)?;
            let mut sink = CurrentQuery::new();
            widget::prepare_query(
                &workspace.configuration,
                &mut workspace.edit_models,
                &names,
                &translator,
                &mut sink,
            )?;
            print_query(format, sink.value(), sink.executions())?;
        }
        Commands::Filter { name, edits } => {
            let mut workspace = load_workspace(path)?;
            let sink = {
                let mut panel = AlarmFilterPanel::new(
                    &workspace.configuration,
                    &mut workspace.edit_models,
                    &names,
                    &translator,
                    CurrentQuery::new(),
                )?;
                apply_edits(&mut panel, edits)?;
                panel.filter(name)?;
                panel.into_sink()
            };
            print_query(format, sink.value(), sink.executions())?;
        }
        Commands::Refresh { edits } => {
            let mut workspace = load_workspace(path)?;
            let sink = {
                let mut panel = AlarmFilterPanel::new(
                    &workspace.configuration,
                    &mut workspace.edit_models,
                    &names,
                    &translator,
                    CurrentQuery::new(),
                )?;
                apply_edits(&mut panel, edits)?;
                panel.refresh()?;
                panel.into_sink()
            };
            print_query(format, sink.value(), sink.executions())?;
        }
        Commands::Apply { edits } => {
            let mut workspace = load_workspace(path)?;
            let sink = {
                let mut panel = AlarmFilterPanel::new(
                    &workspace.configuration,
                    &mut workspace.edit_models,
                    &names,
                    &translator,
                    CurrentQuery::new(),
                )?;
                apply_edits(&mut panel, edits)?;
                panel.apply()?;
                panel.into_sink()
            };
            workspace.save(path)?;
            print_query(format, sink.value(), sink.executions())?;
        }
        Commands::ClearAll => {
            let mut workspace = load_workspace(path)?;
            let sink = {
                let mut panel = AlarmFilterPanel::new(
                    &workspace.configuration,
                    &mut workspace.edit_models,
                    &names,
                    &translator,
                    CurrentQuery::new(),
                )?;
                panel.clear_all()?;
                panel.into_sink()
            };
            workspace.save(path)?;
            print_query(format, sink.value(), sink.executions())?;
        }
    }

    Ok(())
}
