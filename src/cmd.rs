use std::path::PathBuf;

use clap::{command, Parser, Subcommand};

#[derive(Parser)]
#[command(about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the repository skeleton
    Init {
        /// Root path (defaults to the current directory)
        root_path: Option<PathBuf>,
    },

    /// Compute a blob id for a file, optionally storing the blob
    HashObject {
        /// Write the object to the database instead of just hashing
        #[arg(short)]
        write: bool,

        /// File to hash
        path: PathBuf,
    },

    /// Print the payload of a stored object
    CatFile {
        /// Pretty-print the object's content
        #[arg(short)]
        pretty: bool,

        /// Object id (40 hex characters)
        oid: String,
    },

    /// Print a stored tree's entries, one per line
    CatTree {
        /// Tree object id
        oid: String,
    },

    /// Create a commit object referencing a tree and print its id
    CommitTree {
        /// Tree object id
        tree: String,

        /// Commit message
        message: String,

        /// Parent commit id (omit for a root commit)
        parent: Option<String>,
    },
}
