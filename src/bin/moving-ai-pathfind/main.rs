use route_planner::{NodeId, Point, RouteError, RouteGraph, RouteModel, RoutePlanner, SearchConfig};

use anyhow::{bail, Context as _};
use clap::Parser;
use movingai::{Coords2D, Map2D as _};
use movingai::{MovingAiMap, SceneRecord};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// The path to a .scen file from moving AI, or a directory of .scen files
    scenario: PathBuf,
    /// Maps directory
    #[arg(long)]
    maps: PathBuf,
    /// Re-parent discovered nodes when a cheaper path is found
    #[arg(long)]
    relax: bool,
    /// Write a JSON summary of all scenario files
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long)]
    output_map: Option<PathBuf>,
}

static DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
];

fn neighbors(map: &MovingAiMap, tile: Coords2D) -> impl Iterator<Item = Coords2D> + '_ {
    let (x, y) = (tile.0 as isize, tile.1 as isize);
    DIRECTIONS
        .iter()
        .map(move |(dx, dy)| (x + dx, y + dy))
        .filter(move |&(x, y)| {
            x >= 0 && x < map.width() as isize && y >= 0 && y < map.height() as isize
        })
        .map(|(x, y)| (x as usize, y as usize))
        .filter(move |n| map.is_traversable_from(tile, *n))
}

/// Road graph over the traversable tiles of a map, in normalized coordinates.
struct TileGraph {
    model: RouteModel,
    coord2node: HashMap<Coords2D, NodeId>,
    dim: f32,
}

impl TileGraph {
    fn build(map: &MovingAiMap) -> Self {
        let dim = map.width().max(map.height()) as f32;
        let size = map.width() * map.height();
        // A unit of normalized distance is `dim` tiles.
        let mut model = RouteModel::with_capacity(size, dim);
        let mut coord2node = HashMap::with_capacity(size);

        for (x, y) in map.coords() {
            if map.is_traversable((x, y)) {
                let n = model.add_node(Point::new(x as f32 / dim, y as f32 / dim));
                coord2node.insert((x, y), n);
            }
        }

        for tile in map.coords() {
            let Some(&n) = coord2node.get(&tile) else {
                continue;
            };
            for neighbour in neighbors(map, tile) {
                if let Some(&n2) = coord2node.get(&neighbour) {
                    model.add_edge(n, n2);
                }
            }
        }

        Self {
            model,
            coord2node,
            dim,
        }
    }

    fn percent(&self, tile: Coords2D) -> (f32, f32) {
        (
            tile.0 as f32 / self.dim * 100.0,
            tile.1 as f32 / self.dim * 100.0,
        )
    }
}

fn dump_map(graph: &TileGraph, width: usize, height: usize, filepath: &Path) -> anyhow::Result<()> {
    let mut data = vec!['T'; width * height];
    for (&(x, y), &n) in &graph.coord2node {
        if !graph.model.neighbors(n).is_empty() {
            data[x + width * y] = '.';
        }
    }

    let mut contents = String::with_capacity(width * height + height);
    for row in data.chunks(width) {
        contents.extend(row);
        contents.push('\n');
    }

    std::fs::write(filepath, contents)
        .with_context(|| format!("Bad path: {}", filepath.display()))
}

#[derive(Debug, Default, serde::Serialize)]
struct FileReport {
    scenario_file: PathBuf,
    map_file: String,
    nodes: usize,
    scenarios: usize,
    mismatches: usize,
    unreachable: usize,
    expanded: usize,
}

enum Outcome {
    Match,
    Mismatch,
    Unreachable,
}

fn run_single_scenario(
    scenario: &SceneRecord,
    graph: &TileGraph,
    config: &SearchConfig,
    expanded: &mut usize,
) -> anyhow::Result<Outcome> {
    let mut planner = RoutePlanner::new(
        &graph.model,
        graph.percent(scenario.start_pos),
        graph.percent(scenario.goal_pos),
        config.clone(),
    )?;

    let route = match planner.a_star_search() {
        Ok(route) => route,
        Err(e @ RouteError::SearchExhausted { .. }) => {
            warn!(start = ?scenario.start_pos, goal = ?scenario.goal_pos, "{e}");
            return Ok(Outcome::Unreachable);
        }
        Err(e) => return Err(e.into()),
    };
    *expanded += route.expanded;

    let cost = route.distance as f64;
    let diff = (scenario.optimal_length - cost).abs();
    if diff > 0.001 * scenario.optimal_length.max(1.0) {
        warn!(
            start = ?scenario.start_pos,
            goal = ?scenario.goal_pos,
            expected = scenario.optimal_length,
            got = cost,
            diff,
            "shortest path mismatch"
        );
        return Ok(Outcome::Mismatch);
    }
    Ok(Outcome::Match)
}

fn parse_scenario_file(file: &Path) -> anyhow::Result<(Vec<SceneRecord>, String)> {
    let scenarios = movingai::parser::parse_scen_file(file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let Some(first_map) = scenarios.first().map(|s| s.map_file.clone()) else {
        bail!("No scenarios in {}", file.display());
    };
    if let Some(other) = scenarios.iter().find(|s| s.map_file != first_map) {
        bail!(
            "All maps are not the same as {first_map} in {scenario} (found {other})",
            scenario = file.display(),
            other = other.map_file
        );
    }
    Ok((scenarios, first_map))
}

fn run_for_scenario_file(cli: &Cli, scenario: &Path, config: &SearchConfig) -> anyhow::Result<FileReport> {
    let (scenarios, first_map) = parse_scenario_file(scenario)?;
    let path = cli.maps.join(&first_map);

    let raw_map = movingai::parser::parse_map_file(&path)
        .with_context(|| format!("Failed to parse map {}", path.display()))?;
    let graph = TileGraph::build(&raw_map);

    if let Some(o) = &cli.output_map {
        dump_map(&graph, raw_map.width(), raw_map.height(), o)?;
    }

    info!(scenarios = scenarios.len(), nodes = graph.model.len(), map = %first_map, "running scenarios");
    let mut report = FileReport {
        scenario_file: scenario.to_path_buf(),
        map_file: first_map,
        nodes: graph.model.len(),
        scenarios: scenarios.len(),
        ..Default::default()
    };

    let pg = indicatif::ProgressBar::new(scenarios.len() as u64);
    for scenario in &scenarios {
        pg.inc(1);
        match run_single_scenario(scenario, &graph, config, &mut report.expanded)? {
            Outcome::Match => {}
            Outcome::Mismatch => report.mismatches += 1,
            Outcome::Unreachable => report.unreachable += 1,
        }
    }
    pg.finish_and_clear();

    info!(
        mismatches = report.mismatches,
        unreachable = report.unreachable,
        expanded = report.expanded,
        "finished {}",
        scenario.display()
    );
    Ok(report)
}

fn scenario_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    let itr = std::fs::read_dir(path)
        .with_context(|| format!("Failed to read directory {}", path.display()))?;
    for entry in itr {
        let entry = entry.context("Failed to read path")?;
        if entry.path().extension().is_some_and(|e| e == "scen") {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let config = if cli.relax {
        SearchConfig::relaxing()
    } else {
        SearchConfig::default()
    };

    let mut reports = Vec::new();
    for file in scenario_files(&cli.scenario)? {
        reports.push(run_for_scenario_file(&cli, &file, &config)?);
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json).with_context(|| format!("Bad path: {}", path.display()))?;
    }

    let mismatches: usize = reports.iter().map(|r| r.mismatches).sum();
    let total: usize = reports.iter().map(|r| r.scenarios).sum();
    let elapsed = start.elapsed().as_secs_f32();
    info!(total, mismatches, "took {elapsed} s to run");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse())
}
