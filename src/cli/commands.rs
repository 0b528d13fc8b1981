use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cinematch",
    version,
    about = "CineMatch - filter a movie catalog and let it pick a movie for you",
    after_help = "DATA SOURCE: with KAGGLE_USERNAME and KAGGLE_KEY set, the Kaggle dataset is \
                  downloaded once and used; otherwise the built-in demo catalog is used. \
                  If the dataset cannot be loaded, cinematch switches to the demo catalog \
                  and reports a warning."
)]
pub struct Cli {
    /// Catalog source: auto, demo, kaggle or local
    #[arg(long, global = true, value_parser = ["auto", "demo", "kaggle", "local"])]
    pub source: Option<String>,

    /// Directory with movies.csv and ratings.csv (implies --source local)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Filter flags shared by `filter` and `pick`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterFlags {
    /// Genre to require ("any" for all genres)
    #[arg(short, long)]
    pub genre: Option<String>,
    /// Minimum average rating (0.0 - 10.0, default from config: 7.0)
    #[arg(short = 'r', long)]
    pub min_rating: Option<f64>,
    /// First release year to include (default: max(1980, oldest year))
    #[arg(long = "from")]
    pub from_year: Option<i32>,
    /// Last release year to include (default: newest year)
    #[arg(long = "to")]
    pub to_year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show catalog statistics (source, size, year and rating span)
    Stats,

    /// List the genres available in the catalog
    Genres,

    /// List the movies matching the filters
    Filter {
        #[command(flatten)]
        filters: FilterFlags,
        /// Maximum number of movies to list
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Pick one random movie matching the filters
    Pick {
        #[command(flatten)]
        filters: FilterFlags,
        /// Seed the random generator for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
        /// Print a readable card instead of JSON
        #[arg(long)]
        text: bool,
    },

    /// Build search links for a title
    Links {
        /// Movie title
        title: String,
    },
}
