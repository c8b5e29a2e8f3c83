use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Story JSON file to lay out
    pub story: PathBuf,
    /// Where to write the booklet (defaults to the story path with a .pdf extension)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Directory containing the story's photos (defaults to <image_root>/<account>)
    #[clap(long)]
    pub images: Option<PathBuf>,
    /// Configuration file (defaults to ./booklet.toml if present)
    #[clap(long, env = "STORY_BOOKLET_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory of story JSON files to lay out
    pub dir: PathBuf,
    /// Directory to write booklets into (defaults to next to each story)
    #[clap(long)]
    pub out_dir: Option<PathBuf>,
    /// Configuration file (defaults to ./booklet.toml if present)
    #[clap(long, env = "STORY_BOOKLET_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Overwrite an existing booklet.toml
    #[clap(long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lays out a single story as a two-up A5 booklet PDF
    Render(RenderArgs),
    /// Lays out every story in a batch directory
    Batch(BatchArgs),
    /// Writes a booklet.toml with the default layout settings
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
