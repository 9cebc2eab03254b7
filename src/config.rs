use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::clients::omdb_client::DEFAULT_OMDB_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageFormat {
    Json,
    Csv,
}

impl StorageFormat {
    /// `.csv` files use the tabular backend, everything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => StorageFormat::Csv,
            _ => StorageFormat::Json,
        }
    }
}

/// Manage a personal movie collection from the terminal.
#[derive(Debug, Parser)]
#[command(name = "movie-shelf", version, about)]
pub struct Config {
    /// File holding the collection
    #[arg(short, long, default_value = "movies.json")]
    pub file: PathBuf,

    /// Storage format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<StorageFormat>,

    /// OMDb API key. Without it movies are added by typing year and rating
    #[arg(long, env = "OMDB_API_KEY")]
    pub omdb_api_key: Option<String>,

    /// OMDb endpoint
    #[arg(long, default_value = DEFAULT_OMDB_URL)]
    pub omdb_url: String,

    /// Directory the generated website is written to
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,
}

impl Config {
    pub fn storage_format(&self) -> StorageFormat {
        self.format
            .unwrap_or_else(|| StorageFormat::from_path(&self.file))
    }
}
