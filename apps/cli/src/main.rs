use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use explorer_tree::{
    DirectorySource, ExplorerConfig, JsonSource, LoadStatus, TreeNode, WorkspaceSource,
    WorkspaceState, CONFIG_FILE_NAME,
};
use log::debug;

#[derive(Parser)]
#[command(
    name = "explorer",
    about = "Inspect and update workspace file trees",
    author,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 掃描資料夾並輸出檔案樹。 / Scan a directory and print its tree.
    Scan(ScanArgs),
    /// 讀取 JSON 工作區並輸出。 / Load a JSON workspace payload and print it.
    Show(ShowArgs),
    /// 依路徑新增節點後輸出。 / Add slash-delimited paths to a JSON workspace and print it.
    Add(AddArgs),
    /// 列出所有檔案的完整路徑。 / List the full path of every file in a JSON workspace.
    Paths(PathsArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// 以 JSON 格式輸出。 / Print the tree as pretty JSON instead of indented text.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ScanArgs {
    /// 要掃描的資料夾。 / Directory to scan.
    #[arg(value_name = "DIR")]
    root: PathBuf,
    /// 指定設定檔；預設為掃描根目錄下的 .explorer.json。 / Explorer config file (defaults to <DIR>/.explorer.json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct ShowArgs {
    /// 工作區 JSON 檔案。 / Workspace JSON payload.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// 保留空的子節點清單。 / Print the payload as-is, keeping empty child lists.
    #[arg(long)]
    no_prune: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct AddArgs {
    /// 工作區 JSON 檔案。 / Workspace JSON payload.
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// 以 `/` 分隔、從根節點名稱開始的路徑。 / Slash-delimited paths starting with the root name.
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct PathsArgs {
    /// 工作區 JSON 檔案。 / Workspace JSON payload.
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { command } = Cli::parse();
    match command {
        Commands::Scan(args) => execute_scan(args),
        Commands::Show(args) => execute_show(args),
        Commands::Add(args) => execute_add(args),
        Commands::Paths(args) => execute_paths(args),
    }
}

fn execute_scan(args: ScanArgs) -> Result<()> {
    let config = resolve_config(args.config, &args.root)?;
    let source = DirectorySource::new(&args.root, config);
    debug!("scanning {}", source.root().display());
    let state = load_workspace(&source)?;
    print_tree(state.workspace(), &args.output)
}

fn execute_show(args: ShowArgs) -> Result<()> {
    let source = JsonSource::new(&args.input);
    debug!("loading workspace payload {}", source.path().display());
    if args.no_prune {
        let raw = source.fetch()?;
        return print_tree(&raw, &args.output);
    }
    let state = load_workspace(&source)?;
    print_tree(state.workspace(), &args.output)
}

fn execute_add(args: AddArgs) -> Result<()> {
    let mut state = load_workspace(&JsonSource::new(&args.input))?;
    for path in &args.paths {
        debug!("adding '{path}'");
        state.add_node(path);
    }
    print_tree(state.workspace(), &args.output)
}

fn execute_paths(args: PathsArgs) -> Result<()> {
    let state = load_workspace(&JsonSource::new(&args.input))?;
    for path in state.workspace().file_paths() {
        println!("{path}");
    }
    Ok(())
}

fn resolve_config(explicit: Option<PathBuf>, root: &Path) -> Result<ExplorerConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                bail!("config file '{}' does not exist", path.display());
            }
            path
        }
        None => root.join(CONFIG_FILE_NAME),
    };
    debug!("loading explorer config from {}", path.display());
    ExplorerConfig::load(&path)
        .with_context(|| format!("failed to load config '{}'", path.display()))
}

fn load_workspace(source: &dyn WorkspaceSource) -> Result<WorkspaceState> {
    let mut state = WorkspaceState::new();
    if state.refresh(source) == LoadStatus::Failed {
        bail!("{}", state.error().unwrap_or("workspace refresh failed"));
    }
    Ok(state)
}

fn print_tree(node: &TreeNode, output: &OutputArgs) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(node).context("failed to encode tree")?;
        println!("{json}");
    } else {
        print!("{}", node.render());
    }
    Ok(())
}
