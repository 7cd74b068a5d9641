use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wit::areas::repository::Repository;
use wit::artifacts::core::config::LOG_ENV;

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    about = "A minimal local version control system",
    long_about = "wit snapshots a working directory into immutable commits, \
    keeps named references to them, and supports checkout and two-way merge between branches.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .wit directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Copy a file or directory into the staging area"
    )]
    Add {
        #[arg(index = 1, help = "The file or directory to stage")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Snapshot the staging area as a new commit"
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show pending, unstaged and untracked files"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch to a branch or to a raw commit id",
        long_about = "Checking out a branch only moves head. Checking out a commit id restores \
        its files into the working tree and leaves no branch activated."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or (abbreviated) commit id")]
        target: String,
    },
    #[command(name = "graph", about = "Print the commit graph as Graphviz DOT text")]
    Graph,
    #[command(name = "branch", about = "Create a branch at head")]
    Branch {
        #[arg(index = 1, help = "The new branch name")]
        name: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current head"
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(external_subcommand)]
    External(Vec<String>),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::discover(&pwd, Box::new(std::io::stdout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let Some(command) = &cli.command else {
        return Ok(());
    };

    match command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init().await?
        }
        Commands::Add { path } => open_repository()?.add(path).await?,
        Commands::Commit { message } => open_repository()?.commit(message).await?,
        Commands::Status => open_repository()?.status().await?,
        Commands::Checkout { target } => open_repository()?.checkout(target).await?,
        Commands::Graph => open_repository()?.graph().await?,
        Commands::Branch { name } => open_repository()?.branch(name).await?,
        Commands::Merge { branch } => open_repository()?.merge(branch).await?,
        Commands::External(_) => println!("command not found"),
    }

    Ok(())
}
