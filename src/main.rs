use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roomkit::{init_logging, Config, DesignerState};
use roomkit_core::format_length;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roomkit", version, about = "Inspect and create RoomKit projects")]
struct Cli {
    /// Designer configuration (JSON or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every canvas of a project with its units
    Summary { project: PathBuf },
    /// Write an empty project
    New {
        project: PathBuf,
        #[arg(long, default_value = "Untitled")]
        name: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(Config::load_or_default(&Config::default_path())),
    }
}

fn summary(state: &DesignerState) {
    let display = state.config().editing.length_display;
    println!("{}", state.design_name);
    for floor in state.floors() {
        for room in state.rooms_on_floor(&floor.id) {
            println!("{} / {}", floor.name, room.name);
            for canvas in state.list_canvases(&floor.id, &room.id) {
                let marker = if canvas.is_active { "*" } else { " " };
                println!(
                    " {marker} [{}] {} ({} units)",
                    canvas.key.canvas_index, canvas.name, canvas.unit_count
                );
                let Some(document) = state.document_for(&canvas.key) else {
                    continue;
                };
                for unit in &document.units {
                    println!(
                        "      {:<14} {} x {} x {}{}",
                        unit.unit_type.label(),
                        format_length(unit.width_mm, display),
                        format_length(unit.height_mm, display),
                        format_length(unit.depth_mm, display),
                        if unit.loft_rect.is_some() { " + loft" } else { "" },
                    );
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let mut state = DesignerState::new(config);

    match cli.command {
        Command::Summary { project } => {
            state.load_from_file(&project)?;
            summary(&state);
        }
        Command::New { project, name } => {
            state.design_name = name;
            state.save_to_file(&project)?;
            info!(path = %project.display(), "Created project");
        }
    }

    Ok(())
}
