// bases/fakelib/src/config.rs
use clap::{Args, Parser, Subcommand};
use fake_library::{Shape, ShapeError};
use std::path::PathBuf;

/// Serve a huge fake music library built from one golden MP3
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ShapeArgs {
    /// Number of songs to include in the library
    #[arg(long, default_value_t = fake_library::DEFAULT_TRACKS, global = true)]
    pub library_size: usize,

    /// Max number of tracks in each album
    #[arg(long, default_value_t = 10, global = true)]
    pub tracks_per_album: u32,

    /// Max number of albums for each artist
    #[arg(long, default_value_t = 3, global = true)]
    pub albums_per_artist: u32,

    /// The minimum number of non-separator characters in the generated paths
    #[arg(long, default_value_t = 3, global = true)]
    pub min_path_length: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mount the library and serve it until interrupted
    Mount {
        /// Golden MP3 supplying the audio of every track
        golden: PathBuf,
        /// Directory to mount on, created if missing
        mountpoint: PathBuf,
        /// Let other users read the mount
        #[arg(long)]
        allow_other: bool,
    },

    /// Print the generated paths
    List {
        golden: PathBuf,
        /// Stop after this many paths
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Build the directory tree and report its size
    Inspect {
        golden: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Validated library layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub tracks: usize,
    pub shape: Shape,
}

impl Config {
    pub fn from_args(args: &ShapeArgs) -> Result<Self, ShapeError> {
        let shape = Shape::new(
            args.tracks_per_album,
            args.albums_per_artist,
            args.min_path_length,
        )?;

        Ok(Self {
            tracks: args.library_size,
            shape,
        })
    }
}
