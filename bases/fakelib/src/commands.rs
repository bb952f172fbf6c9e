// bases/fakelib/src/commands.rs
use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use fake_library::{Library, Shape};
use library_tree::{LibraryTree, TreeStats};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub fn load_library(golden: &Path, config: &Config) -> Result<Library> {
    let library = Library::open(golden)
        .wrap_err_with(|| format!("failed to load golden file {}", golden.display()))?
        .with_tracks(config.tracks)
        .with_shape(config.shape);

    tracing::info!(
        "Loaded {}: {} bytes of audio after a {} byte tag",
        golden.display(),
        library.audio_len(),
        library.golden_header_len()
    );

    Ok(library)
}

pub fn list(library: &Library, limit: Option<usize>, out: &mut impl Write) -> Result<()> {
    let count = limit.map_or(library.tracks(), |limit| limit.min(library.tracks()));
    for index in 0..count {
        writeln!(out, "{}", library.path_at(index)?)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub tracks: usize,
    pub shape: Shape,
    pub golden_header_len: u64,
    pub audio_len: usize,
    /// Size of the first song; every song differs only by its tag length
    pub first_song_size: Option<u64>,
    pub tree: TreeStats,
}

pub fn report(library: &Library, config: &Config) -> Result<Report> {
    let tree = LibraryTree::materialize(library).wrap_err("failed to build library tree")?;
    let first_song_size = match library.tracks() {
        0 => None,
        _ => Some(library.song_at(0)?.size()),
    };

    Ok(Report {
        tracks: library.tracks(),
        shape: config.shape,
        golden_header_len: library.golden_header_len(),
        audio_len: library.audio_len(),
        first_song_size,
        tree: tree.stats(),
    })
}

pub fn inspect(library: &Library, config: &Config, json: bool, out: &mut impl Write) -> Result<()> {
    let report = report(library, config)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Tracks:            {}", report.tracks)?;
    writeln!(out, "Tracks per album:  {}", report.shape.tracks_per_album())?;
    writeln!(out, "Albums per artist: {}", report.shape.albums_per_artist())?;
    writeln!(out, "Min path length:   {}", report.shape.min_path_length())?;
    writeln!(out, "Golden tag bytes:  {}", report.golden_header_len)?;
    writeln!(out, "Audio bytes:       {}", report.audio_len)?;
    if let Some(size) = report.first_song_size {
        writeln!(out, "First song bytes:  {}", size)?;
    }
    writeln!(out, "Directories:       {}", report.tree.directories)?;
    writeln!(out, "Songs:             {}", report.tree.songs)?;
    writeln!(out, "Max inode:         {}", report.tree.max_id)?;
    Ok(())
}

#[cfg(feature = "fuse")]
pub async fn mount(library: &Library, mountpoint: &Path, allow_other: bool) -> Result<()> {
    use library_tree::fuse::{spawn_mount, LibraryFs, MountOptions};

    if !mountpoint.exists() {
        std::fs::create_dir_all(mountpoint)
            .wrap_err_with(|| format!("failed to create {}", mountpoint.display()))?;
    }

    let tree = LibraryTree::materialize(library).wrap_err("failed to build library tree")?;
    let options = MountOptions {
        allow_other,
        ..MountOptions::default()
    };
    let session = spawn_mount(LibraryFs::new(tree), mountpoint, &options)
        .wrap_err_with(|| format!("failed to mount at {}", mountpoint.display()))?;

    tracing::info!(
        "Serving library at {}, press Ctrl-C to unmount",
        mountpoint.display()
    );
    tokio::signal::ctrl_c().await?;

    tracing::info!("Unmounting {}", mountpoint.display());
    drop(session);
    Ok(())
}

#[cfg(not(feature = "fuse"))]
pub async fn mount(_library: &Library, _mountpoint: &Path, _allow_other: bool) -> Result<()> {
    Err(color_eyre::eyre::eyre!(
        "fakelib was built without FUSE support, rebuild with `--features fuse`"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn library(tracks: usize) -> Library {
        Library::from_reader(Cursor::new(b"audio".to_vec()))
            .unwrap()
            .with_tracks(tracks)
    }

    fn config(tracks: usize) -> Config {
        Config {
            tracks,
            shape: Shape::default(),
        }
    }

    #[test]
    fn list_respects_limit() {
        let mut out = Vec::new();
        list(&library(100), Some(3), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A/A/A.mp3\nA/A/B.mp3\nA/A/C.mp3\n"
        );
    }

    #[test]
    fn list_stops_at_library_size() {
        let mut out = Vec::new();
        list(&library(2), Some(50), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn report_counts_tree() {
        let report = report(&library(60), &config(60)).unwrap();
        assert_eq!(report.tree.songs, 60);
        // 2 artists with 3 albums each
        assert_eq!(report.tree.directories, 8);
        assert_eq!(report.audio_len, 5);
        assert!(report.first_song_size.unwrap() > 5);
    }

    #[test]
    fn empty_library_reports_no_song() {
        let report = report(&library(0), &config(0)).unwrap();
        assert_eq!(report.first_song_size, None);
        assert_eq!(report.tree.songs, 0);
    }

    #[test]
    fn inspect_json_is_parseable() {
        let mut out = Vec::new();
        inspect(&library(10), &config(10), true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["tracks"], 10);
        assert_eq!(value["tree"]["songs"], 10);
        assert_eq!(value["shape"]["tracks_per_album"], 10);
    }

    #[cfg(not(feature = "fuse"))]
    #[tokio::test]
    async fn mount_without_fuse_fails() {
        let dir = std::env::temp_dir();
        assert!(mount(&library(1), &dir, false).await.is_err());
    }
}
