use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_model::{ElementId, ElementType, ProjectSnapshot, ViewKind};
use layout_editor_core::snapshot::{from_json, to_json_pretty};
use layout_editor_core::{
    Editor, EditorConfig, LoadReport, PageSize, PointerTarget, ResizeHandle, ScreenPoint, ViewMode,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "layout-editor-cli")]
#[command(about = "Layout editor CLI")]
pub struct Cli {
    /// Editor configuration file (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print machine-readable project statistics.
    Info {
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
    },
    /// Apply a scripted gesture sequence to a project and print the result.
    Replay {
        #[arg(value_name = "PROJECT")]
        project: PathBuf,
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoOutput {
    path: String,
    schema_version: u32,
    element_count: usize,
    views: BTreeMap<ViewKind, ViewInfo>,
    repairs: LoadReport,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewInfo {
    elements: usize,
    by_type: BTreeMap<ElementType, usize>,
    pages: BTreeSet<u32>,
    layer_order: usize,
}

/// Replay script: a list of steps applied in order
#[derive(Debug, Deserialize)]
struct Script {
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum Step {
    Surface {
        width: f32,
        height: f32,
        #[serde(default = "default_scale")]
        scale: f32,
    },
    Page {
        page: u32,
    },
    ViewMode {
        mode: ModeSpec,
    },
    SelectionMode {
        enabled: bool,
    },
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        target: TargetSpec,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    Frame,
    PointerUp,
    Cancel,
    Undo,
    Redo,
    ToFront {
        id: ElementId,
    },
    ToBack {
        id: ElementId,
    },
    Forward {
        id: ElementId,
    },
    Backward {
        id: ElementId,
    },
    /// Deletes one element, or the current selection when `id` is absent
    Delete {
        #[serde(default)]
        id: Option<ElementId>,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ModeSpec {
    Split,
    Original,
    Translated,
    FinalLayout,
}

impl From<ModeSpec> for ViewMode {
    fn from(mode: ModeSpec) -> Self {
        match mode {
            ModeSpec::Split => ViewMode::Split,
            ModeSpec::Original => ViewMode::Single(ViewKind::Original),
            ModeSpec::Translated => ViewMode::Single(ViewKind::Translated),
            ModeSpec::FinalLayout => ViewMode::Single(ViewKind::FinalLayout),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum TargetSpec {
    #[default]
    Canvas,
    Element {
        id: ElementId,
    },
    Handle {
        id: ElementId,
        handle: ResizeHandle,
    },
}

impl From<TargetSpec> for PointerTarget {
    fn from(target: TargetSpec) -> Self {
        match target {
            TargetSpec::Canvas => PointerTarget::Canvas,
            TargetSpec::Element { id } => PointerTarget::Element(id),
            TargetSpec::Handle { id, handle } => PointerTarget::Handle(id, handle),
        }
    }
}

fn default_scale() -> f32 {
    1.0
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Info { project } => run_info(&project, cli.config.as_deref()),
        Commands::Replay { project, script, output } => {
            run_replay(&project, &script, output.as_deref(), cli.config.as_deref())
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_info(project: &Path, config: Option<&Path>) -> Result<()> {
    let mut editor = open_project(project, config)?;
    let repairs = editor.load_snapshot(read_project(project)?)?;
    let snapshot = editor.snapshot();

    let views = snapshot
        .views
        .iter()
        .map(|(view, saved)| {
            let mut info = ViewInfo {
                elements: saved.elements.len(),
                layer_order: saved.layer_order.len(),
                ..Default::default()
            };
            for element in &saved.elements {
                *info.by_type.entry(element.element_type()).or_default() += 1;
                info.pages.insert(element.page);
            }
            (*view, info)
        })
        .collect();

    let payload = InfoOutput {
        path: project.display().to_string(),
        schema_version: snapshot.schema_version,
        element_count: snapshot.element_count(),
        views,
        repairs,
    };

    let json = serde_json::to_string_pretty(&payload)?;
    println!("{json}");

    Ok(())
}

fn run_replay(
    project: &Path,
    script: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let mut editor = open_project(project, config)?;
    editor.load_snapshot(read_project(project)?)?;

    ensure_file_exists(script)?;
    let raw = fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;
    let script: Script = serde_json::from_str(&raw).context("failed to parse replay script")?;

    for (index, step) in script.steps.into_iter().enumerate() {
        debug!(index, step = ?step, "replay step");
        apply_step(&mut editor, step).with_context(|| format!("replay step {index} failed"))?;
    }
    // Release any gesture the script left open
    editor.pointer_up();

    let json = to_json_pretty(&editor.snapshot())?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{json}"),
    }

    info!(
        undo_levels = editor.history().undo_levels(),
        redo_levels = editor.history().redo_levels(),
        "replay finished"
    );

    Ok(())
}

fn apply_step(editor: &mut Editor, step: Step) -> Result<()> {
    match step {
        Step::Surface { width, height, scale } => {
            editor.set_surface(PageSize::new(width, height), scale)
        }
        Step::Page { page } => editor.set_current_page(page)?,
        Step::ViewMode { mode } => editor.set_view_mode(mode.into()),
        Step::SelectionMode { enabled } => editor.set_selection_mode(enabled),
        Step::PointerDown { x, y, target } => {
            editor.pointer_down(ScreenPoint::new(x, y), target.into());
        }
        Step::PointerMove { x, y } => {
            editor.pointer_move(ScreenPoint::new(x, y));
        }
        Step::Frame => {
            editor.animation_frame();
        }
        Step::PointerUp => editor.pointer_up(),
        Step::Cancel => editor.cancel(),
        Step::Undo => {
            editor.undo();
        }
        Step::Redo => {
            editor.redo();
        }
        Step::ToFront { id } => {
            editor.move_to_front(&id)?;
        }
        Step::ToBack { id } => {
            editor.move_to_back(&id)?;
        }
        Step::Forward { id } => {
            editor.move_forward(&id)?;
        }
        Step::Backward { id } => {
            editor.move_backward(&id)?;
        }
        Step::Delete { id: Some(id) } => editor.delete_element(&id)?,
        Step::Delete { id: None } => {
            editor.delete_selection();
        }
    }
    Ok(())
}

fn open_project(project: &Path, config: Option<&Path>) -> Result<Editor> {
    ensure_file_exists(project)?;
    let config = EditorConfig::load(config).context("failed to load editor configuration")?;
    Ok(Editor::new(config))
}

fn read_project(project: &Path) -> Result<ProjectSnapshot> {
    let raw = fs::read_to_string(project)
        .with_context(|| format!("failed to read {}", project.display()))?;
    from_json(&raw).context("failed to open project")
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
