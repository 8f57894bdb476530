//! Command line frontend for the Game of Life grid simulator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use life_grid::{
    config::{CliOverrides, Settings},
    frontend::{PanDirection, StepFormat, TerminalFrontend},
    game_of_life::{find_pattern, PATTERNS},
    simulation::{Scheduler, SimulationController, SystemClock},
    utils::{format_grid_compact, ColorOutput},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_grid")]
#[command(about = "Game of Life grid simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a grid, seed it and run generations
    Run(RunArgs),

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List built-in seed patterns
    Patterns,
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid size (overrides config)
    #[arg(short, long)]
    size: Option<usize>,

    /// Cells built per construction tick (overrides config)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Milliseconds between generations (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed pattern placed at the grid center
    #[arg(short, long, default_value = "glider")]
    pattern: String,

    /// Generations to run
    #[arg(short, long, default_value_t = 10)]
    generations: u64,

    /// Scroll steps applied to the camera; positive zooms in
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    zoom: f32,

    /// Camera pan presses, horizontal then vertical; negative moves left/down
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_hyphen_values = true)]
    pan: Option<Vec<i32>>,

    /// Print the full grid after every generation
    #[arg(long)]
    show_evolution: bool,

    /// Emit step outcomes as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Patterns => patterns_command(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf, quiet: bool) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        if !quiet {
            println!("{}", ColorOutput::warning(&format!(
                "Config file {} not found, using defaults", config_path.display()
            )));
        }
        Ok(Settings::default())
    }
}

fn run_command(args: RunArgs) -> Result<()> {
    let mut settings = load_settings(&args.config, args.json)?;
    settings.merge_with_cli(&CliOverrides {
        size: args.size,
        batch_size: args.batch_size,
        step_delay_ms: args.delay_ms,
    });
    settings.validate()
        .context("Configuration validation failed")?;

    let pattern = find_pattern(&args.pattern).with_context(|| {
        format!("Unknown pattern '{}' (see the `patterns` command)", args.pattern)
    })?;

    let format = if args.json { StepFormat::Json } else { StepFormat::Text };
    let mut controller = SimulationController::new(settings.clone(), TerminalFrontend::new(format));
    let mut scheduler = Scheduler::new(SystemClock, settings.simulation.build_tick());

    let start_time = Instant::now();
    scheduler.run_construction(&mut controller)
        .context("Failed to build grid")?;
    if !args.json {
        println!("{}", ColorOutput::success(&format!(
            "Built {0}x{0} grid in {1:.3}s",
            settings.grid.size,
            start_time.elapsed().as_secs_f64()
        )));
    }

    let origin = controller.centered_origin(pattern);
    controller.stamp_pattern(pattern, origin)
        .with_context(|| format!("Failed to place pattern '{}'", pattern.name))?;

    apply_camera_input(controller.host_mut(), &settings, args.zoom, args.pan.as_deref());

    if !args.json {
        println!("\nInitial state ({}):", pattern.name);
        println!("{}", controller.host().render_viewport());
    }

    let show_evolution = args.show_evolution && !args.json;
    let outcomes = scheduler
        .run_generations(&mut controller, args.generations, |grid, _| {
            if show_evolution {
                println!("{}", format_grid_compact(grid));
            }
        })
        .context("Simulation failed")?;

    if !args.json {
        println!("\nFinal state after {} generations:", outcomes.len());
        println!("{}", controller.host().render_viewport());
    }

    Ok(())
}

fn apply_camera_input(
    frontend: &mut TerminalFrontend,
    settings: &Settings,
    zoom: f32,
    pan: Option<&[i32]>,
) {
    let camera = frontend.camera_mut();
    camera.zoom(zoom, settings.camera.zoom_speed * settings.grid.spacing);

    if let Some(&[dx, dy]) = pan {
        let horizontal = if dx < 0 { PanDirection::Left } else { PanDirection::Right };
        let vertical = if dy < 0 { PanDirection::Down } else { PanDirection::Up };
        for _ in 0..dx.unsigned_abs() {
            camera.pan(horizontal, settings.camera.pan_speed * settings.grid.spacing);
        }
        for _ in 0..dy.unsigned_abs() {
            camera.pan(vertical, settings.camera.pan_speed * settings.grid.spacing);
        }
    }
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up configuration..."));

    let config_path = directory.join("config").join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("Run: cargo run -- run --config {}", config_path.display());
    Ok(())
}

fn patterns_command() -> Result<()> {
    println!("Built-in patterns:");
    for pattern in PATTERNS {
        let (width, height) = pattern.extent();
        println!("  {:12} {}x{}, {} cells", pattern.name, width, height, pattern.cells.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_grid::frontend::RecordingHost;
    use life_grid::simulation::ManualClock;
    use life_grid::utils::format_step_json;
    use life_grid::StepOutcome;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_grid",
            "run",
            "--size", "20",
            "--pattern", "toad",
            "--pan", "-2", "3",
        ]);
        assert!(cli.is_ok());

        let Commands::Run(args) = cli.unwrap().command else {
            panic!("expected run command");
        };
        assert_eq!(args.size, Some(20));
        assert_eq!(args.pan, Some(vec![-2, 3]));
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        let config_path = temp_dir.path().join("config/default.yaml");
        assert_eq!(Settings::from_file(config_path).unwrap(), Settings::default());
    }

    #[test]
    fn test_run_command() {
        let temp_dir = tempdir().unwrap();
        let args = RunArgs {
            config: temp_dir.path().join("missing.yaml"),
            size: Some(6),
            batch_size: Some(50),
            delay_ms: Some(0),
            pattern: "blinker".to_string(),
            generations: 2,
            zoom: 0.0,
            pan: None,
            show_evolution: false,
            json: true,
        };
        assert!(run_command(args).is_ok());
    }

    #[test]
    fn test_json_step_lines() {
        let mut settings = Settings::default();
        settings.grid.size = 6;
        settings.simulation.step_delay_ms = 0;

        let blinker = find_pattern("blinker").unwrap();
        let mut controller = SimulationController::new(settings, RecordingHost::new());
        let mut scheduler = Scheduler::new(ManualClock::new(), Duration::ZERO);
        scheduler.run_construction(&mut controller).unwrap();
        let origin = controller.centered_origin(blinker);
        controller.stamp_pattern(blinker, origin).unwrap();

        let outcomes = scheduler.run_generations(&mut controller, 2, |_, _| {}).unwrap();
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            let line = format_step_json(outcome).unwrap();
            let parsed: StepOutcome = serde_json::from_str(&line).unwrap();
            assert_eq!(&parsed, outcome);
            assert_eq!(parsed.alive, 3);
        }
    }

    #[test]
    fn test_unknown_pattern_fails() {
        let args = RunArgs {
            config: PathBuf::from("does/not/exist.yaml"),
            size: Some(4),
            batch_size: None,
            delay_ms: Some(0),
            pattern: "spaceship".to_string(),
            generations: 1,
            zoom: 0.0,
            pan: None,
            show_evolution: false,
            json: true,
        };
        assert!(run_command(args).is_err());
    }

    #[test]
    fn test_camera_input() {
        let mut frontend = TerminalFrontend::new(StepFormat::Silent);
        let settings = Settings::default();
        apply_camera_input(&mut frontend, &settings, 0.0, Some(&[-2, 1][..]));

        let camera = frontend.camera();
        let step = settings.camera.pan_speed * settings.grid.spacing;
        assert!((camera.x + 2.0 * step).abs() < 1e-6);
        assert!((camera.y - step).abs() < 1e-6);
    }
}
