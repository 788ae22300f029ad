use std::{
    env, fs,
    io::{self, Write},
};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use cmd::Commands;
use oid::Oid;
use repository::object::commit::Author;
use repository::object::{self, ObjectKind};
use repository::Repository;

mod cmd;
pub mod error;
pub mod oid;
mod repository;

pub struct ConfigUser {
    pub name: String,
    pub email: String,
}

/// Identity defaults for commit construction. The core takes author and
/// timestamp as explicit parameters; reading the environment and the local
/// clock happens only here.
pub struct Config {
    pub user: ConfigUser,
}

fn env_or_default(key: &str) -> String {
    env::var_os(key)
        .map(|var| var.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl Config {
    fn from_env() -> Self {
        let name = env_or_default("GIT_AUTHOR_NAME");
        let email = env_or_default("GIT_AUTHOR_EMAIL");

        Self {
            user: ConfigUser { name, email },
        }
    }
}

fn open_repository() -> Result<Repository, anyhow::Error> {
    let root = env::current_dir().with_context(|| "Can't get current working directory")?;
    Ok(Repository::open(root))
}

fn main() -> Result<(), anyhow::Error> {
    let cli = cmd::Cli::parse();

    match &cli.command {
        Commands::Init { root_path } => {
            let root = match root_path {
                Some(root) => root.to_path_buf(),
                None => {
                    env::current_dir().with_context(|| "Can't get current working directory")?
                }
            };
            Repository::open(root).init()?;
            println!("Initialized git directory");
        }

        Commands::HashObject { write, path } => {
            let oid = if *write {
                open_repository()?
                    .hash_object(path)
                    .with_context(|| format!("Could not store {}", path.display()))?
            } else {
                let data = fs::read(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                object::encode(ObjectKind::Blob, &data).0
            };
            println!("{oid}");
        }

        Commands::CatFile { pretty: _, oid } => {
            let oid: Oid = oid.parse()?;
            let payload = open_repository()?.cat_file(&oid)?;
            io::stdout().write_all(&payload)?;
        }

        Commands::CatTree { oid } => {
            let oid: Oid = oid.parse()?;
            for entry in open_repository()?.cat_tree(&oid)? {
                println!(
                    "{} {} {} {}",
                    entry.mode.as_str(),
                    entry.entry_kind(),
                    entry.child_id,
                    entry.name
                );
            }
        }

        Commands::CommitTree {
            tree,
            message,
            parent,
        } => {
            let config = Config::from_env();
            let author = Author::new(config.user.name, config.user.email, Local::now());

            let tree: Oid = tree.parse()?;
            let parent: Option<Oid> = parent.as_deref().map(str::parse).transpose()?;

            let commit_oid = open_repository()?
                .commit_tree(tree, parent, author, message.clone())
                .with_context(|| "Could not store commit")?;

            println!("{commit_oid}");
        }
    }

    Ok(())
}
