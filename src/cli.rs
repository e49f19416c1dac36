use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a md-binder.toml config file (and optionally cover metadata)
    Config,
    /// Binds the Markdown notes into a PDF
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Configuration file to read settings from
    #[clap(long, env = "MD_BINDER_CONFIG", default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory containing the Markdown notes
    #[clap(short, long)]
    pub input_directory: Option<PathBuf>,

    /// Glob selecting the notes inside the input directory
    #[clap(long)]
    pub pattern: Option<String>,

    /// CSS file embedded in the cover and body
    #[clap(long)]
    pub stylesheet_path: Option<PathBuf>,

    /// YAML file with the cover metadata
    #[clap(long)]
    pub metadata_path: Option<PathBuf>,

    /// Directory the cover logo is looked up in
    #[clap(long)]
    pub logo_directory: Option<PathBuf>,

    /// Where to write the PDF
    #[clap(short, long)]
    pub output_path: Option<PathBuf>,

    /// Where to write the intermediate HTML
    #[clap(long)]
    pub scratch_directory: Option<PathBuf>,

    /// File the build log is appended to
    #[clap(long)]
    pub log_file: Option<PathBuf>,

    /// Don't generate a cover page
    #[clap(long)]
    pub no_cover: bool,

    /// Don't generate a table of contents
    #[clap(long)]
    pub no_toc: bool,

    /// Don't number pages
    #[clap(long)]
    pub no_numbering: bool,

    /// Keep the intermediate HTML files
    #[clap(long)]
    pub keep_intermediate: bool,

    /// More output; repeat for more detail
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::parse_from([
            "md-binder",
            "render",
            "-i",
            "notes",
            "--no-toc",
            "-vv",
        ]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input_directory, Some(PathBuf::from("notes")));
                assert!(args.no_toc);
                assert!(!args.no_cover);
                assert_eq!(args.verbose, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
