use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SUFFIX: &str = "_adjusted";
pub const DEFAULT_END_MARGIN_MS: i64 = 10_000;
pub const DEFAULT_SONG_END_MS: i64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(
    name = "sv_normalizer",
    about = "Normalize slider velocity to a single dominant BPM in an osu! beatmap!"
)]
pub struct Args {
    /// Path to the target .osu file. Prompted for on stdin if omitted.
    pub beatmap: Option<PathBuf>,

    /// Where to write the rewritten beatmap. Defaults to `<name><suffix>.osu` beside the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Appended to the input file stem to build the default output name.
    #[arg(short, long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Milliseconds added after the last hit object when estimating the song end.
    #[arg(long = "end-margin", default_value_t = DEFAULT_END_MARGIN_MS)]
    pub end_margin_ms: i64,

    /// Song end used when the map has no hit objects.
    #[arg(long = "default-end", default_value_t = DEFAULT_SONG_END_MS)]
    pub default_song_end_ms: i64,

    /// Dry run (compute and log the new timing points, but write nothing).
    #[arg(short, long, default_value_t = false)]
    pub dry_run: bool,

    /// Prints every synthesized SV point to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    pub suffix: String,
    pub end_margin_ms: i64,
    pub default_song_end_ms: i64,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            end_margin_ms: DEFAULT_END_MARGIN_MS,
            default_song_end_ms: DEFAULT_SONG_END_MS,
            dry_run: false,
            verbose: false,
        }
    }
}

impl From<&Args> for NormalizeOptions {
    fn from(args: &Args) -> Self {
        Self {
            suffix: args.suffix.clone(),
            end_margin_ms: args.end_margin_ms,
            default_song_end_ms: args.default_song_end_ms,
            dry_run: args.dry_run,
            verbose: args.verbose,
        }
    }
}
