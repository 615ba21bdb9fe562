use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use city_router::graph::{Graph, NodeId, sample_city};
use city_router::search::{Algorithm, StepEvent};
use city_router::trip::{
    CancelHandle, LegPlan, LegResult, Progress, TripConfig, TripObserver, TripOutcome, TripPlanner,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Plan a multi-stop trip across a city graph.
#[derive(Debug, Parser)]
#[command(name = "city-router", version)]
#[command(about = "Step through BFS, DFS, Dijkstra or A* across a city, leg by leg")]
struct Args {
    /// JSON graph document to load instead of the built-in sample city
    #[arg(long, value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Print the trip outcome as JSON
    #[arg(long)]
    json: bool,

    /// Search algorithm: bfs, dfs, dijkstra or astar
    algorithm: Algorithm,

    /// Stops to visit in order
    #[arg(required = true, num_args = 2.., value_parser = NodeId::parse)]
    stops: Vec<NodeId>,
}

/// Logs trip progress as it happens.
struct LogObserver;

impl TripObserver for LogObserver {
    fn leg_started(&mut self, leg: &LegPlan<'_>) {
        info!(leg = leg.index + 1, from = %leg.from, to = %leg.to, "Searching");
    }

    fn step(&mut self, event: &StepEvent, progress: &Progress) {
        if let StepEvent::Visit { node, frontier, .. } = event {
            debug!(
                leg = progress.leg_index + 1,
                node = %node,
                frontier = frontier.len(),
                visited = progress.trip_nodes_visited,
                elapsed_ms = progress.elapsed.as_millis() as u64,
                "Visit"
            );
        }
    }

    fn leg_finished(&mut self, leg: &LegResult) {
        let path: Vec<&str> = leg.path.iter().map(NodeId::as_str).collect();
        info!(
            leg = leg.leg_index + 1,
            distance = leg.total_distance,
            visited = leg.nodes_visited,
            path = %path.join(" -> "),
            "Leg found"
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let graph = match &args.graph {
        Some(path) => Graph::load(path),
        None => sample_city(),
    };
    let graph = match graph {
        Ok(graph) => graph,
        Err(e) => {
            error!(path = ?args.graph, error = %e, "Failed to load graph");
            return ExitCode::FAILURE;
        }
    };
    info!(nodes = graph.len(), edges = graph.edge_count(), "Graph ready");

    let mut config = TripConfig::from_env();
    config.algorithm = args.algorithm;

    // Ctrl-C stops the trip between steps
    let cancel = CancelHandle::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let planner = TripPlanner::new(&graph, &config);
    let outcome = match planner.run(args.stops, &mut LogObserver, &cancel).await {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            info!("Cancelled");
            return ExitCode::from(130);
        }
        Err(e) => {
            error!(error = %e, "Trip rejected");
            return ExitCode::from(2);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "Failed to serialize outcome");
                return ExitCode::FAILURE;
            }
        }
    }

    match outcome {
        TripOutcome::Completed(result) => {
            if !args.json {
                let full_path = result.full_path();
                let path: Vec<&str> = full_path.iter().map(NodeId::as_str).collect();
                println!("Route:    {}", path.join(" -> "));
                println!("Distance: {}", result.total_distance);
                println!("Legs:     {}", result.total_legs());
                println!("Visited:  {}", result.total_nodes_visited);
                println!("Time:     {:.2?}", result.elapsed);
            }
            ExitCode::SUCCESS
        }
        TripOutcome::NoPathForLeg { from, to, .. } => {
            if !args.json {
                println!("No path from {from} to {to}");
            }
            ExitCode::FAILURE
        }
    }
}
