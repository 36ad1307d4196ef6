use anyhow::Result;
use bitlet::areas::repository::Repository;
use bitlet::errors::RepositoryError;
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small content-addressed version-control system",
    long_about = "bitlet keeps snapshots of a directory as commits in a local object store, \
    with branches, a staging area and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage the current content of a file")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or mark a tracked file for removal and delete it"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the current commit, \
        checkout <commit> -- <file> restores it from the given commit, \
        and checkout <branch> switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::open(path, Box::new(std::io::stdout()))
}

fn run(command: &Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;

    match command {
        Commands::Init => {
            Repository::init(&pwd, Box::new(std::io::stdout()))?;
        }
        Commands::Add { file } => open_repository(&pwd)?.add(file)?,
        Commands::Rm { file } => open_repository(&pwd)?.rm(file)?,
        Commands::Commit { message } => {
            open_repository(&pwd)?.commit(message.as_deref().unwrap_or_default())?
        }
        Commands::Log => open_repository(&pwd)?.log()?,
        Commands::GlobalLog => open_repository(&pwd)?.global_log()?,
        Commands::Find { message } => open_repository(&pwd)?.find(message)?,
        Commands::Status => open_repository(&pwd)?.show_status()?,
        Commands::Checkout { target, file } => {
            let mut repository = open_repository(&pwd)?;

            match (target, file) {
                (None, Some(file)) => repository.checkout_file(file)?,
                (Some(commit_id), Some(file)) => repository.checkout_file_at(commit_id, file)?,
                (Some(branch), None) => repository.checkout_branch(branch)?,
                (None, None) => return Err(RepositoryError::IncorrectOperands.into()),
            }
        }
        Commands::Branch { name } => open_repository(&pwd)?.branch(name)?,
        Commands::RmBranch { name } => open_repository(&pwd)?.rm_branch(name)?,
        Commands::Reset { commit } => open_repository(&pwd)?.reset(commit)?,
        Commands::Merge { branch } => open_repository(&pwd)?.merge(branch)?,
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(error) = run(&cli.command) {
        match error.downcast_ref::<RepositoryError>() {
            // user errors are reported, not failures
            Some(repository_error) if repository_error.is_user_error() => {
                println!("{repository_error}")
            }
            _ => return Err(error),
        }
    }

    Ok(())
}
