use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pagefetch::config::Config;

#[derive(Parser, Debug)]
#[command(name = "pagefetch")]
#[command(about = "Download numbered page images and pack them into a CBZ", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download pages 1..=count and optionally build the CBZ
    Fetch(FetchArgs),
    /// Pack the images of an existing directory into a CBZ
    Archive(ArchiveArgs),
    /// Print the resolved configuration as TOML
    ShowConfig(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file (defaults to $PAGEFETCH_CONFIG or config/pagefetch.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// URL prefix; the page index is appended to it
    #[arg(long)]
    pub base_url: Option<String>,

    /// Number of pages to request
    #[arg(long, short = 'n')]
    pub count: Option<u32>,

    /// Directory for downloaded pages
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Text appended after the index in the URL (use "" for none)
    #[arg(long)]
    pub url_suffix: Option<String>,

    /// Build a CBZ after downloading
    #[arg(long, conflicts_with = "no_cbz")]
    pub cbz: bool,

    /// Do not build a CBZ even if the configuration enables it
    #[arg(long)]
    pub no_cbz: bool,

    /// CBZ base name (without extension)
    #[arg(long)]
    pub cbz_name: Option<String>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl FetchArgs {
    /// Layer command-line values over the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.fetch.base_url = base_url.clone();
        }
        if let Some(count) = self.count {
            config.fetch.image_count = count;
        }
        if let Some(output) = &self.output {
            config.fetch.output_dir = output.clone();
        }
        if let Some(suffix) = &self.url_suffix {
            config.fetch.url_suffix = suffix.clone();
        }
        if self.cbz {
            config.archive.enabled = true;
        }
        if self.no_cbz {
            config.archive.enabled = false;
        }
        if let Some(name) = &self.cbz_name {
            config.archive.name = name.clone();
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ArchiveArgs {
    /// Directory to scan recursively for .png/.jpg/.jpeg files
    #[arg(long)]
    pub dir: PathBuf,

    /// CBZ base name; the archive is written to <dir>/<name>.cbz
    #[arg(long, default_value = "chapter")]
    pub name: String,

    /// Explicit archive path (overrides --name)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_overrides() {
        let cli = Cli::parse_from([
            "pagefetch",
            "fetch",
            "--base-url",
            "https://example.com/c/",
            "-n",
            "12",
            "--url-suffix",
            "",
            "--cbz",
            "--cbz-name",
            "c1",
        ]);

        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch command");
        };

        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.fetch.base_url, "https://example.com/c/");
        assert_eq!(config.fetch.image_count, 12);
        assert_eq!(config.fetch.url_suffix, "");
        assert!(config.archive.enabled);
        assert_eq!(config.archive.name, "c1");
    }

    #[test]
    fn test_no_cbz_disables_archive() {
        let cli = Cli::parse_from(["pagefetch", "fetch", "--no-cbz"]);
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch command");
        };

        let mut config = Config::default();
        config.archive.enabled = true;
        args.apply(&mut config);

        assert!(!config.archive.enabled);
    }

    #[test]
    fn test_archive_command() {
        let cli = Cli::parse_from(["pagefetch", "archive", "--dir", "pages"]);
        let Commands::Archive(args) = cli.command else {
            panic!("expected archive command");
        };

        assert_eq!(args.dir, PathBuf::from("pages"));
        assert_eq!(args.name, "chapter");
        assert!(args.output.is_none());
    }
}
