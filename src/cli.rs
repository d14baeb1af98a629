use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use packwright::content_graph::domain::{ContentVersion, Marketplace};

/// Dump content packs from a content graph export and upload them to the platform
#[derive(Parser, Debug)]
#[command(name = "packwright")]
#[command(version)]
#[command(about = "Dump content packs from a content graph export and upload them to the platform", long_about = None)]
pub struct Args {
    /// Path to the content graph export (JSON or YAML)
    pub graph: PathBuf,

    /// Content repository root that relative paths in the graph resolve against
    /// (defaults to the directory holding the graph export)
    #[arg(long, global = true)]
    pub content_root: Option<PathBuf>,

    /// Configuration file (defaults to packwright.config.yml in the content root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a pack into a directory in its deliverable layout
    Dump {
        /// Pack id as it appears in the graph
        #[arg(long)]
        pack: String,

        /// Directory the pack is written into
        #[arg(short, long)]
        output: PathBuf,

        /// Target marketplace (defaults to the config value, then xsoar)
        #[arg(short, long)]
        marketplace: Option<Marketplace>,

        /// Include test playbooks
        #[arg(long)]
        tpb: bool,
    },

    /// Upload one or more packs, zipped or item by item
    Upload {
        /// Pack ids to upload; may be given multiple times
        #[arg(long = "pack", required = true, value_name = "PACK")]
        packs: Vec<String>,

        /// Target marketplace (defaults to the config value, then xsoar)
        #[arg(short, long)]
        marketplace: Option<Marketplace>,

        /// Version of the target platform, e.g. 8.4.0
        #[arg(long)]
        target_version: ContentVersion,

        /// Upload each pack as one zip instead of item by item
        #[arg(long)]
        zip: bool,

        /// Include test playbooks
        #[arg(long)]
        tpb: bool,

        /// Ask the platform to skip pack validation (honored from 6.6.0)
        #[arg(long)]
        skip_validation: bool,

        /// Also collect the pack zips into uploadable_packs.zip in this directory
        #[arg(long)]
        destination_zip_dir: Option<PathBuf>,
    },

    /// Upload an existing pack zip
    UploadZip {
        /// Zip file to upload
        file: PathBuf,

        /// Version of the target platform, e.g. 8.4.0
        #[arg(long)]
        target_version: ContentVersion,

        /// Target marketplace (defaults to the config value, then xsoar)
        #[arg(short, long)]
        marketplace: Option<Marketplace>,

        /// Ask the platform to skip pack validation (honored from 6.6.0)
        #[arg(long)]
        skip_validation: bool,
    },

    /// Print the direct dependencies of a pack
    Dependencies {
        /// Pack id as it appears in the graph
        #[arg(long)]
        pack: String,
    },
}

impl Args {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Directory relative graph paths resolve against
    pub fn resolved_content_root(&self) -> PathBuf {
        match &self.content_root {
            Some(root) => root.clone(),
            None => self
                .graph
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Default `tracing` filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "packwright=debug",
            _ => "packwright=trace",
        }
    }
}
