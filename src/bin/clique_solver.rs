use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use dcs::log::build_pace_logger_for_level;
use dcs::prelude::*;
use log::LevelFilter;
use structopt::StructOpt;

#[derive(Clone, Copy, Debug)]
enum Algorithm {
    /// `-d`: degeneracy ordering and clique bounds only.
    Degeneracy,
    /// `-m`: full maximum-clique computation.
    MaxClique,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-d" => Ok(Self::Degeneracy),
            "-m" => Ok(Self::MaxClique),
            _ => Err(format!("unknown algorithm {s:?}; expected -d or -m")),
        }
    }
}

#[derive(StructOpt)]
#[structopt(
    name = "clique_solver",
    about = "Exact maximum clique size via degeneracy orderings and vertex-cover kernels"
)]
struct Opts {
    /// Input format: -e (edge list) or -a (adjacency lists)
    #[structopt(allow_hyphen_values = true)]
    format: InputFormat,

    /// Graph file
    filename: PathBuf,

    /// Algorithm: -d (degeneracy ordering only) or -m (maximum clique)
    #[structopt(allow_hyphen_values = true)]
    algorithm: Algorithm,

    /// Cap on the number of worker threads; defaults to the hardware
    /// concurrency and is clamped against it
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    build_pace_logger_for_level(LevelFilter::Info);
    let opt = Opts::from_args();

    let read_start = Instant::now();
    let graph = read_graph_file(opt.format, &opt.filename)
        .with_context(|| format!("reading {}", opt.filename.display()))?;
    let read_time = read_start.elapsed();

    graph.log_summary();

    match opt.algorithm {
        Algorithm::Degeneracy => {
            let ord = graph.degeneracy_ordering();

            println!(
                "{} {} {} {} {} {} {} {}",
                graph.name(),
                graph.number_of_nodes(),
                graph.number_of_edges(),
                graph.min_degree(),
                graph.max_degree(),
                read_time.as_secs_f64(),
                ord.degeneracy,
                ord.clique_lb
            );
        }
        Algorithm::MaxClique => {
            let hardware = std::thread::available_parallelism().map_or(1, |p| p.get());
            let threads = opt.threads.map_or(hardware, |t| t.min(hardware)).max(1);

            let solve_start = Instant::now();
            let (ord, slots) = graph.degeneracy_ordering_with_subgraphs();
            let degeneracy_time = solve_start.elapsed();

            let clique_number = parametric_search(&ord, &slots, threads);
            let total_time = solve_start.elapsed();

            log::info!("maximum clique size: {clique_number}");

            println!(
                "{} {} {} {} {} {} {} {} {} {} {} {}",
                graph.name(),
                graph.number_of_nodes(),
                graph.number_of_edges(),
                graph.min_degree(),
                graph.max_degree(),
                read_time.as_secs_f64(),
                ord.degeneracy,
                ord.clique_lb,
                degeneracy_time.as_secs_f64(),
                clique_number,
                total_time.as_secs_f64(),
                threads
            );
        }
    }

    Ok(())
}
