use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::toc::LevelRange;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "kalem")]
#[command(about = "Slugs, heading anchors and tables of contents for a Turkish blog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site directory holding the config and post store (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Custom configuration file
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<Vec<PathBuf>>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Print the slug for a title
    Slug {
        /// Title words
        #[arg(required = true)]
        title: Vec<String>,

        /// Make the slug unique against the post store
        #[arg(short, long, default_value_t = false)]
        unique: bool,
    },

    /// Print the table of contents of an HTML or markdown file
    Toc {
        /// File to read
        file: PathBuf,

        /// Heading levels to collect, e.g. 2-4
        #[arg(short, long, value_name = "RANGE")]
        levels: Option<LevelRange>,

        /// Prefix entries with hierarchical numbers
        #[arg(short, long, default_value_t = false)]
        numbered: bool,

        /// Drop headings deeper than this level
        #[arg(short, long, value_name = "LEVEL")]
        max_depth: Option<u8>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TocFormat::Html)]
        format: TocFormat,

        /// Regenerate heading ids instead of keeping existing ones
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },

    /// Give every heading an id
    #[command(alias = "a")]
    Anchors {
        /// File, or directory of .html/.md files
        path: PathBuf,

        /// Heading levels to anchor, e.g. 2-4
        #[arg(short, long, value_name = "RANGE")]
        levels: Option<LevelRange>,

        /// Regenerate heading ids instead of keeping existing ones
        #[arg(long, default_value_t = false)]
        overwrite: bool,

        /// Also insert an anchor span before each heading
        #[arg(long, default_value_t = false)]
        spans: bool,

        /// Insert the table of contents at the top, or refresh the one there
        #[arg(long, default_value_t = false)]
        toc: bool,

        /// Remove every table of contents block
        #[arg(long, default_value_t = false, conflicts_with = "toc")]
        strip_toc: bool,

        /// Rewrite files in place instead of printing them
        #[arg(short, long, default_value_t = false)]
        write: bool,
    },

    /// Manage posts
    #[command(alias = "p")]
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Manage topics
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },

    /// Write every post as markdown into the content directory
    Export {
        /// Target directory (defaults to the configured content_dir)
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PostAction {
    /// List posts, newest first
    #[command(alias = "ls")]
    List,

    /// Show one post
    Show {
        /// Slug or title
        slug: String,

        /// Print the table of contents instead of the body
        #[arg(long, default_value_t = false)]
        toc: bool,
    },

    /// Create a post
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// HTML or markdown file with the body
        #[arg(long, value_name = "FILE")]
        content: Option<PathBuf>,

        #[arg(long, value_name = "URL", default_value = "")]
        hero_image: String,

        #[arg(long, default_value = "")]
        alt_text: String,

        /// Topic id
        #[arg(long, value_name = "ID")]
        topic: Option<u32>,

        /// Skip writing the markdown copy
        #[arg(long, default_value_t = false)]
        no_export: bool,
    },

    /// Edit a post; omitted fields keep their value
    Edit {
        slug: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_name = "FILE")]
        content: Option<PathBuf>,

        #[arg(long, value_name = "URL")]
        hero_image: Option<String>,

        #[arg(long)]
        alt_text: Option<String>,

        #[arg(long, value_name = "ID")]
        topic: Option<u32>,

        /// Detach the post from its topic
        #[arg(long, default_value_t = false, conflicts_with = "topic")]
        no_topic: bool,

        #[arg(long, default_value_t = false)]
        no_export: bool,
    },

    /// Delete a post and its markdown copy
    #[command(alias = "rm")]
    Delete {
        slug: String,

        #[arg(long, default_value_t = false)]
        keep_export: bool,
    },

    /// Create posts from the markdown files of a directory
    Import {
        /// Directory to read (defaults to the configured content_dir)
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TopicAction {
    /// List topics
    #[command(alias = "ls")]
    List,

    /// Create a topic
    New {
        name: String,

        #[arg(long)]
        color: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Edit a topic; omitted fields keep their value
    Edit {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a topic, detaching its posts
    #[command(alias = "rm")]
    Delete { id: u32 },
}

/// Table of contents output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TocFormat {
    Html,
    Markdown,
    Json,
}
