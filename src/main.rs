use crate::analysis::analysis::{Analysis, AnalysisConfig, analyze};
use crate::analysis::summary::AssignmentKind;
use crate::flow::solver::SolverConfig;
use crate::graph::network::Network;
use crate::loader::load_network;
use crate::report::table::render;
use crate::scenario::braess::BraessScenario;
use crate::scenario::pigou::PigouScenario;
use crate::scenario::random::RandomScenario;
use crate::scenario::scenario::Scenario;
use crate::tui::app::App;
use crate::tui::draw::draw_app;
use crate::view::diagram::diagram;
use anyhow::{Context, bail};
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod analysis;
mod error;
mod flow;
mod graph;
mod loader;
mod report;
mod scenario;
mod tui;
mod view;

/// Traffic flow equilibrium and social optimum calculator
#[derive(Parser)]
#[command(name = "trafficflow", version)]
struct Cli {
    /// GML file, or one of @pigou, @braess, @random for a built-in network
    graph: String,

    /// Number of vehicles
    vehicles: f64,

    /// Origin node (defaults to the built-in network's origin)
    origin: Option<String>,

    /// Destination node (defaults to the built-in network's destination)
    destination: Option<String>,

    /// Show the assignments in an interactive terminal view
    #[arg(long)]
    plot: bool,

    /// Fail when there are more simple paths than this
    #[arg(long)]
    max_paths: Option<usize>,

    /// Relative optimality tolerance
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    /// Path flows at or below this count as zero
    #[arg(long, default_value_t = 1e-6)]
    flow_tolerance: f64,

    #[arg(long, default_value_t = 10_000)]
    max_iterations: usize,

    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Seed for @random
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

enum Source {
    File(PathBuf),
    Builtin(Scenario),
}

fn resolve_source(graph: &str, seed: u64) -> anyhow::Result<Source> {
    match graph.strip_prefix('@') {
        Some("pigou") => Ok(Source::Builtin(PigouScenario::build())),
        Some("braess") => Ok(Source::Builtin(BraessScenario::build())),
        Some("random") => Ok(Source::Builtin(RandomScenario::default().build(seed))),
        Some(other) => bail!("unknown built-in network '@{}'", other),
        None => Ok(Source::File(PathBuf::from(graph))),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (network, defaults) = match resolve_source(&cli.graph, cli.seed)? {
        Source::File(path) => {
            let network = load_network(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            (network, None)
        }
        Source::Builtin(scenario) => {
            let network = Network::build(scenario.graph())
                .with_context(|| format!("built-in network '{}'", scenario.name()))?;
            let defaults = (scenario.origin().to_string(), scenario.destination().to_string());
            (network, Some(defaults))
        }
    };

    let (origin, destination) = match (cli.origin, cli.destination, defaults) {
        (Some(origin), Some(destination), _) => (origin, destination),
        (None, None, Some(defaults)) => defaults,
        _ => bail!("origin and destination are required"),
    };
    let route = network.route(&origin, &destination)?;

    let config = AnalysisConfig {
        solver: SolverConfig {
            tolerance: cli.tolerance,
            flow_tolerance: cli.flow_tolerance,
            max_iterations: cli.max_iterations,
            time_limit: cli.time_limit_ms.map(Duration::from_millis),
        },
        max_paths: cli.max_paths,
    };
    let analysis = analyze(&network, route, cli.vehicles, &config)?;

    print!("{}", render(&analysis, &network));

    if cli.plot {
        show(&network, &analysis)?;
    }
    Ok(())
}

fn show(network: &Network, analysis: &Analysis) -> std::io::Result<()> {
    let [equilibrium, optimum] = [AssignmentKind::Equilibrium, AssignmentKind::SocialOptimum]
        .map(|kind| {
            let summary = analysis.summary(kind);
            diagram(
                network,
                summary.load(),
                analysis.route(),
                kind.label(),
                summary.total_system_cost(),
                summary.beckmann_potential(),
            )
        });

    let mut terminal = ratatui::init();
    let mut app = App::new(analysis, equilibrium, optimum);

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.running = false,
                    KeyCode::Tab => app.toggle(),
                    _ => {}
                },
                _ => continue,
            }
        }
    }
    Ok(())
}
