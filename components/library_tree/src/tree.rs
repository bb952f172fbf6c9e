// components/library_tree/src/tree.rs
use crate::error::TreeError;
use fake_library::{Library, Song};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a node in the tree, used directly as the inode number.
///
/// Identifiers stay small: a library of N tracks never issues one above
/// about 2N, so tools that truncate inodes to 32 bits still see unique values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// FUSE reserves 0, and 1 is always the root
    pub const ROOT: NodeId = NodeId(1);
    pub const FIRST_ALLOCATED: NodeId = NodeId(2);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out node identifiers in increasing order, never reusing one.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(NodeId::FIRST_ALLOCATED.get()),
        }
    }

    pub fn next_id(&self) -> NodeId {
        NodeId(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Highest identifier issued so far, if any
    pub fn last_issued(&self) -> Option<NodeId> {
        let next = self.next.load(Ordering::SeqCst);
        (next > NodeId::FIRST_ALLOCATED.get()).then(|| NodeId(next - 1))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Directory { children: BTreeMap<String, NodeId> },
    Song { index: usize, song: Song },
}

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    parent: NodeId,
    name: String,
    kind: NodeKind,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The root is its own parent
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Byte size; directories report 0
    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { .. } => 0,
            NodeKind::Song { song, .. } => song.size(),
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        if self.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Song
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Directory,
    Song,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub id: NodeId,
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Directories below the root
    pub directories: usize,
    pub songs: usize,
    pub max_id: NodeId,
}

/// The directory tree of a library, built once before it is served.
///
/// Nodes live in a single map keyed by identifier. Directories list their
/// children by name and every node knows its parent's identifier, so there
/// are no owning references between nodes.
#[derive(Debug)]
pub struct LibraryTree {
    nodes: HashMap<NodeId, Node>,
    ids: IdAllocator,
    directories: usize,
    songs: usize,
}

impl LibraryTree {
    /// An empty tree holding only the root directory
    pub fn new() -> Self {
        let root = Node {
            id: NodeId::ROOT,
            parent: NodeId::ROOT,
            name: String::new(),
            kind: NodeKind::Directory {
                children: BTreeMap::new(),
            },
        };

        Self {
            nodes: HashMap::from([(NodeId::ROOT, root)]),
            ids: IdAllocator::new(),
            directories: 0,
            songs: 0,
        }
    }

    /// Lay out every track of `library`, sharing directories between tracks
    /// with a common path prefix.
    ///
    /// The highest id is `1 + tracks + directories`, so it stays within
    /// `2 * tracks + 2` only while albums hold at least 2 tracks. A shape of
    /// one track per album gives every track its own artist and album
    /// directory and ends near `3 * tracks`.
    pub fn materialize(library: &Library) -> Result<Self, TreeError> {
        let mut tree = Self::new();

        for index in 0..library.tracks() {
            let path = library.path_at(index)?;
            let song = library.song_at(index)?;
            tree.insert_song(index, &path, song)?;
        }

        let stats = tree.stats();
        tracing::info!(
            "Materialized library tree: {} songs in {} directories, max inode {}",
            stats.songs,
            stats.directories,
            stats.max_id
        );

        Ok(tree)
    }

    /// Add `song` at `path`, creating missing directories on the way.
    pub fn insert_song(&mut self, index: usize, path: &str, song: Song) -> Result<NodeId, TreeError> {
        let mut components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        if components.iter().any(|c| *c == "." || *c == "..") {
            return Err(TreeError::InvalidComponent {
                path: path.to_string(),
            });
        }
        let file_name = components.pop().ok_or(TreeError::EmptyPath { index })?;

        let mut dir = NodeId::ROOT;
        for component in components {
            dir = self.directory(dir, component, path)?;
        }

        if self.lookup(dir, file_name).is_some() {
            return Err(TreeError::DuplicatePath {
                path: path.to_string(),
            });
        }

        let id = self.ids.next_id();
        self.attach(dir, file_name, id, NodeKind::Song { index, song });
        self.songs += 1;
        Ok(id)
    }

    fn directory(&mut self, parent: NodeId, name: &str, path: &str) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.lookup(parent, name) {
            return match self.nodes.get(&existing) {
                Some(node) if node.is_dir() => Ok(existing),
                _ => Err(TreeError::NotADirectory {
                    path: path.to_string(),
                }),
            };
        }

        let id = self.ids.next_id();
        self.attach(
            parent,
            name,
            id,
            NodeKind::Directory {
                children: BTreeMap::new(),
            },
        );
        self.directories += 1;
        Ok(id)
    }

    fn attach(&mut self, parent: NodeId, name: &str, id: NodeId, kind: NodeKind) {
        if let Some(NodeKind::Directory { children }) =
            self.nodes.get_mut(&parent).map(|node| &mut node.kind)
        {
            children.insert(name.to_string(), id);
        }

        self.nodes.insert(
            id,
            Node {
                id,
                parent,
                name: name.to_string(),
                kind,
            },
        );
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child of directory `parent` called `name`
    pub fn lookup(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes.get(&parent)?.kind {
            NodeKind::Directory { children } => children.get(name).copied(),
            NodeKind::Song { .. } => None,
        }
    }

    /// Follow a `/`-separated path from the root
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|c| !c.is_empty())
            .try_fold(NodeId::ROOT, |dir, component| self.lookup(dir, component))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).map(Node::parent)
    }

    /// Children of a directory, sorted by name
    pub fn children(&self, id: NodeId) -> Option<Vec<DirEntry>> {
        let NodeKind::Directory { children } = &self.nodes.get(&id)?.kind else {
            return None;
        };

        Some(
            children
                .iter()
                .filter_map(|(name, child)| {
                    let node = self.nodes.get(child)?;
                    Some(DirEntry {
                        id: *child,
                        name: name.clone(),
                        kind: node.entry_kind(),
                    })
                })
                .collect(),
        )
    }

    pub fn size(&self, id: NodeId) -> Option<u64> {
        self.nodes.get(&id).map(Node::size)
    }

    /// Read up to `len` bytes of a song starting at `offset`. Returns `None`
    /// for unknown ids and directories.
    pub fn read(&self, id: NodeId, offset: u64, len: usize) -> Option<Vec<u8>> {
        let NodeKind::Song { song, .. } = &self.nodes.get(&id)?.kind else {
            return None;
        };

        let remaining = song.size().saturating_sub(offset);
        let mut buf = vec![0u8; len.min(remaining as usize)];
        let read = song.read_at(&mut buf, offset);
        buf.truncate(read);
        Some(buf)
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            directories: self.directories,
            songs: self.songs,
            max_id: self.ids.last_issued().unwrap_or(NodeId::ROOT),
        }
    }
}

impl Default for LibraryTree {
    fn default() -> Self {
        Self::new()
    }
}
