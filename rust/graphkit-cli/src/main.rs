//! graphkit: run graph algorithms over graph files from the terminal.

use clap::{Parser as ClapParser, Subcommand};
use graphkit_cli::colors::Palette;
use graphkit_cli::commands::{Report, Session, SingleSource, SpanningTree, Traversal};
use graphkit_cli::config::{GraphkitConfig, OutputFormat};
use graphkit_cli::error::{CliError, CliResult};
use graphkit_core::{CancelToken, EulerStrategy, Graph, HamiltonMethod};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "graphkit", version, about = "Classic graph algorithms over weighted graphs")]
struct Cli {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Use this config file instead of searching for graphkit.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a graphkit.toml config file in the current directory
    Init,
    /// Convert a plain adjacency matrix into a graph file
    Import {
        /// Matrix file, one row per line
        input: PathBuf,
        /// Graph file to write
        output: PathBuf,
    },
    /// Print the adjacency matrix
    Matrix {
        file: PathBuf,
    },
    /// Print the incidence matrix
    Incidence {
        file: PathBuf,
    },
    /// Breadth-first traversal
    Bfs {
        file: PathBuf,
        #[arg(long, short)]
        from: String,
        /// Walk the adjacency matrix instead of neighbour lists
        #[arg(long)]
        matrix: bool,
    },
    /// Depth-first traversal
    Dfs {
        file: PathBuf,
        #[arg(long, short)]
        from: String,
        /// Walk the adjacency matrix instead of neighbour lists
        #[arg(long)]
        matrix: bool,
    },
    /// Minimum spanning tree (Kruskal)
    Kruskal {
        file: PathBuf,
        /// Save the tree as a graph file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Minimum spanning tree (Prim)
    Prim {
        file: PathBuf,
        /// Save the tree as a graph file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Single-source distances (Dijkstra)
    Dijkstra {
        file: PathBuf,
        #[arg(long, short)]
        from: String,
    },
    /// Single-source distances with negative weights (Bellman-Ford)
    BellmanFord {
        file: PathBuf,
        #[arg(long, short)]
        from: String,
    },
    /// All-pairs distances (Floyd–Warshall)
    Floyd {
        file: PathBuf,
    },
    /// Shortest path between two vertices
    Path {
        file: PathBuf,
        #[arg(long, short)]
        from: String,
        #[arg(long, short)]
        to: String,
    },
    /// Strongly connected components (Kosaraju)
    Scc {
        file: PathBuf,
    },
    /// Euler cycle
    Euler {
        file: PathBuf,
        /// hierholzer or fleury (default: from config)
        #[arg(long)]
        strategy: Option<EulerStrategy>,
    },
    /// Hamiltonian cycles
    Hamilton {
        file: PathBuf,
        /// backtracking, algebraic or roberts-flores (default: from config)
        #[arg(long)]
        method: Option<HamiltonMethod>,
        /// Start vertex (default: the first vertex)
        #[arg(long, short)]
        from: Option<String>,
        /// Also print the symbolic matrix power
        #[arg(long)]
        show_matrix: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GRAPHKIT_LOG")
                .unwrap_or_else(|_| EnvFilter::new("graphkit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let palette = Palette::from_env();

    let config = match &cli.config {
        Some(path) => match GraphkitConfig::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => fail(&palette, &CliError::Config(e)),
        },
        None => GraphkitConfig::load(),
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::warn!("cannot install Ctrl-C handler: {e}");
    }

    let session = Session::new(config, cancel, palette);
    match dispatch(&session, cli.command).and_then(|report| report.render(format)) {
        Ok(out) => print!("{}", ensure_newline(out)),
        Err(e) if e.is_cancelled() => {
            tracing::info!("cancelled");
            std::process::exit(130);
        }
        Err(e) => fail(&palette, &e),
    }
}

fn dispatch(session: &Session, command: Commands) -> CliResult<Report> {
    match command {
        Commands::Init => session.init(&std::env::current_dir()?),
        Commands::Import { input, output } => session.import(&input, &output),
        Commands::Matrix { file } => session.matrix(&load(&file)?),
        Commands::Incidence { file } => session.incidence(&load(&file)?),
        Commands::Bfs { file, from, matrix } => {
            session.traverse(&load(&file)?, Traversal::Bfs, &from, matrix)
        }
        Commands::Dfs { file, from, matrix } => {
            session.traverse(&load(&file)?, Traversal::Dfs, &from, matrix)
        }
        Commands::Kruskal { file, output } => {
            session.spanning_tree(&load(&file)?, SpanningTree::Kruskal, output.as_deref())
        }
        Commands::Prim { file, output } => {
            session.spanning_tree(&load(&file)?, SpanningTree::Prim, output.as_deref())
        }
        Commands::Dijkstra { file, from } => {
            session.distances(&load(&file)?, SingleSource::Dijkstra, &from)
        }
        Commands::BellmanFord { file, from } => {
            session.distances(&load(&file)?, SingleSource::BellmanFord, &from)
        }
        Commands::Floyd { file } => session.floyd(&load(&file)?),
        Commands::Path { file, from, to } => session.path(&load(&file)?, &from, &to),
        Commands::Scc { file } => session.scc(&load(&file)?),
        Commands::Euler { file, strategy } => session.euler(&load(&file)?, strategy),
        Commands::Hamilton {
            file,
            method,
            from,
            show_matrix,
        } => session.hamilton(&load(&file)?, method, from.as_deref(), show_matrix),
    }
}

fn load(path: &Path) -> CliResult<Graph> {
    Ok(Graph::load(path)?)
}

fn ensure_newline(mut out: String) -> String {
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn fail(palette: &Palette, err: &CliError) -> ! {
    eprintln!("{} {}", palette.red("error:"), err);
    std::process::exit(1);
}
