// components/library_tree/src/fuse.rs
//! Read-only FUSE view of a [`LibraryTree`]
//!
//! Inode numbers are the tree's [`NodeId`]s, so they stay small and unique
//! for the whole mount.

use crate::tree::{EntryKind, LibraryTree, Node, NodeId};
use fuser::{
    BackgroundSession, FileAttr, FileType, Filesystem, KernelConfig, MountOption, ReplyAttr,
    ReplyData, ReplyDirectory, ReplyEmpty, ReplyEntry, ReplyOpen, ReplyStatfs, Request,
};
use libc::c_int;
use std::ffi::OsStr;
use std::path::Path;
use std::time::{Duration, SystemTime};

const TTL: Duration = Duration::from_secs(1);
const BLOCK_SIZE: u32 = 4096;
const WRITE_FLAGS: i32 = libc::O_WRONLY | libc::O_RDWR | libc::O_APPEND | libc::O_TRUNC;

/// One `readdir` entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirListing {
    ino: u64,
    next_offset: i64,
    kind: FileType,
    name: String,
}

impl From<EntryKind> for FileType {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => FileType::Directory,
            EntryKind::Song => FileType::RegularFile,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MountOptions {
    /// Filesystem name shown in mount output
    pub fsname: String,
    pub allow_other: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            fsname: "fakelib".to_string(),
            allow_other: false,
        }
    }
}

impl MountOptions {
    fn to_fuser(&self) -> Vec<MountOption> {
        let mut options = vec![
            MountOption::FSName(self.fsname.clone()),
            MountOption::RO,
            MountOption::AutoUnmount,
            MountOption::DefaultPermissions,
        ];
        if self.allow_other {
            options.push(MountOption::AllowOther);
        }
        options
    }
}

pub struct LibraryFs {
    tree: LibraryTree,
    uid: u32,
    gid: u32,
    mounted_at: SystemTime,
}

impl LibraryFs {
    pub fn new(tree: LibraryTree) -> Self {
        Self {
            tree,
            uid: unsafe { libc::getuid() },
            gid: unsafe { libc::getgid() },
            mounted_at: SystemTime::now(),
        }
    }

    pub fn tree(&self) -> &LibraryTree {
        &self.tree
    }

    fn attr(&self, node: &Node) -> FileAttr {
        let size = node.size();
        let (kind, perm, nlink) = if node.is_dir() {
            (FileType::Directory, 0o555, 2)
        } else {
            (FileType::RegularFile, 0o444, 1)
        };

        FileAttr {
            ino: node.id().get(),
            size,
            blocks: size.div_ceil(512),
            atime: self.mounted_at,
            mtime: self.mounted_at,
            ctime: self.mounted_at,
            crtime: self.mounted_at,
            kind,
            perm,
            nlink,
            uid: self.uid,
            gid: self.gid,
            rdev: 0,
            blksize: BLOCK_SIZE,
            flags: 0,
        }
    }

    /// Error to answer an `open` of `ino` with, or `None` to allow it.
    fn open_error(&self, ino: u64, flags: i32) -> Option<c_int> {
        match self.tree.node(NodeId::new(ino)) {
            Some(node) if node.is_dir() => Some(libc::EISDIR),
            Some(_) if flags & WRITE_FLAGS != 0 => {
                tracing::warn!("Rejected write open of inode {}", ino);
                Some(libc::EROFS)
            }
            Some(_) => None,
            None => Some(libc::ENOENT),
        }
    }

    /// Directory listing of `ino` starting after `offset`, `.` and `..` first.
    ///
    /// Each entry carries the offset a follow-up call resumes from.
    fn dir_entries(&self, ino: u64, offset: i64) -> Result<Vec<DirListing>, c_int> {
        let offset = usize::try_from(offset).map_err(|_| libc::EINVAL)?;
        let id = NodeId::new(ino);
        let Some(children) = self.tree.children(id) else {
            return Err(match self.tree.node(id) {
                Some(_) => libc::ENOTDIR,
                None => libc::ENOENT,
            });
        };

        // The root is its own parent
        let parent = self.tree.parent(id).unwrap_or(id);
        let entries = [
            (id.get(), FileType::Directory, ".".to_string()),
            (parent.get(), FileType::Directory, "..".to_string()),
        ]
        .into_iter()
        .chain(
            children
                .into_iter()
                .map(|entry| (entry.id.get(), entry.kind.into(), entry.name)),
        );

        Ok(entries
            .enumerate()
            .skip(offset)
            .map(|(i, (ino, kind, name))| DirListing {
                ino,
                next_offset: (i + 1) as i64,
                kind,
                name,
            })
            .collect())
    }
}

impl Filesystem for LibraryFs {
    fn init(&mut self, _req: &Request<'_>, _config: &mut KernelConfig) -> Result<(), c_int> {
        let stats = self.tree.stats();
        tracing::info!(
            "Library mounted: {} songs, {} directories",
            stats.songs,
            stats.directories
        );
        Ok(())
    }

    fn destroy(&mut self) {
        tracing::info!("Library unmounted");
    }

    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let found = name
            .to_str()
            .and_then(|name| self.tree.lookup(NodeId::new(parent), name))
            .and_then(|id| self.tree.node(id));

        match found {
            Some(node) => reply.entry(&TTL, &self.attr(node), 0),
            None => reply.error(libc::ENOENT),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, _fh: Option<u64>, reply: ReplyAttr) {
        match self.tree.node(NodeId::new(ino)) {
            Some(node) => reply.attr(&TTL, &self.attr(node)),
            None => reply.error(libc::ENOENT),
        }
    }

    fn open(&mut self, _req: &Request<'_>, ino: u64, flags: i32, reply: ReplyOpen) {
        match self.open_error(ino, flags) {
            Some(errno) => reply.error(errno),
            None => reply.opened(0, 0),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        if offset < 0 {
            reply.error(libc::EINVAL);
            return;
        }

        tracing::trace!("read inode {} offset {} size {}", ino, offset, size);
        match self.tree.read(NodeId::new(ino), offset as u64, size as usize) {
            Some(data) => reply.data(&data),
            None => match self.tree.node(NodeId::new(ino)) {
                Some(_) => reply.error(libc::EISDIR),
                None => reply.error(libc::ENOENT),
            },
        }
    }

    fn release(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _flags: i32,
        _lock_owner: Option<u64>,
        _flush: bool,
        reply: ReplyEmpty,
    ) {
        reply.ok();
    }

    fn opendir(&mut self, _req: &Request<'_>, ino: u64, _flags: i32, reply: ReplyOpen) {
        match self.tree.node(NodeId::new(ino)) {
            Some(node) if node.is_dir() => reply.opened(0, 0),
            Some(_) => reply.error(libc::ENOTDIR),
            None => reply.error(libc::ENOENT),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        match self.dir_entries(ino, offset) {
            Ok(entries) => {
                for entry in entries {
                    // true means the reply buffer is full
                    if reply.add(entry.ino, entry.next_offset, entry.kind, &entry.name) {
                        break;
                    }
                }
                reply.ok();
            }
            Err(errno) => reply.error(errno),
        }
    }

    fn releasedir(
        &mut self,
        _req: &Request<'_>,
        _ino: u64,
        _fh: u64,
        _flags: i32,
        reply: ReplyEmpty,
    ) {
        reply.ok();
    }

    fn statfs(&mut self, _req: &Request<'_>, _ino: u64, reply: ReplyStatfs) {
        let files = self.tree.node_count() as u64;
        reply.statfs(0, 0, 0, files, 0, BLOCK_SIZE, 255, BLOCK_SIZE);
    }
}

/// Mount `fs` at `mountpoint`, blocking until it is unmounted.
pub fn mount(fs: LibraryFs, mountpoint: impl AsRef<Path>, options: &MountOptions) -> std::io::Result<()> {
    fuser::mount2(fs, mountpoint.as_ref(), &options.to_fuser())
}

/// Mount `fs` on a background thread. Dropping the session unmounts it.
pub fn spawn_mount(
    fs: LibraryFs,
    mountpoint: impl AsRef<Path>,
    options: &MountOptions,
) -> std::io::Result<BackgroundSession> {
    fuser::spawn_mount2(fs, mountpoint.as_ref(), &options.to_fuser())
}
