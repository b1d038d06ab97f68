//! Project tree model supplied by the recording collaborator.
//!
//! A [`ProjectTree`] is two flat, insertion-ordered maps (directories and
//! files by id) with parent ids pointing back up the tree. Nodes do not own
//! their children. The collaborator builds and mutates the tree; this crate
//! only reads it.
//!
//! File content is not part of the tree. It comes from a [`ContentProvider`]
//! looked up by file id.

pub mod deletion;

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use deletion::{is_effectively_deleted, DeletionResolver, NodeRef};

/// Path of the root directory.
pub const ROOT_PATH: &str = "/";

/// A directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub id: String,
    /// Absolute, `/`-separated path.
    pub path: String,
    /// `None` only for the root directory.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Directory {
    /// Create a live directory.
    pub fn new(id: impl Into<String>, path: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            parent_id: parent_id.map(String::from),
            is_deleted: false,
        }
    }

    /// Create the live root directory.
    pub fn root(id: impl Into<String>) -> Self {
        Self::new(id, ROOT_PATH, None)
    }

    /// Set the deletion flag.
    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }

    /// Check if this is the root directory.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A file record. Content is fetched separately by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: String,
    /// Absolute, `/`-separated path.
    pub path: String,
    /// Id of the containing directory.
    pub parent_id: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl File {
    /// Create a live file.
    pub fn new(id: impl Into<String>, path: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            parent_id: parent_id.into(),
            is_deleted: false,
        }
    }

    /// Set the deletion flag.
    pub fn deleted(mut self, is_deleted: bool) -> Self {
        self.is_deleted = is_deleted;
        self
    }
}

/// Directory and file records indexed by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTree {
    #[serde(default, alias = "allDirectories")]
    directories: IndexMap<String, Directory>,
    #[serde(default, alias = "allFiles")]
    files: IndexMap<String, File>,
}

impl ProjectTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a directory, keyed by its id.
    pub fn insert_directory(&mut self, directory: Directory) -> Option<Directory> {
        self.directories.insert(directory.id.clone(), directory)
    }

    /// Insert or replace a file, keyed by its id.
    pub fn insert_file(&mut self, file: File) -> Option<File> {
        self.files.insert(file.id.clone(), file)
    }

    /// Builder-style [`insert_directory`](Self::insert_directory).
    pub fn with_directory(mut self, directory: Directory) -> Self {
        self.insert_directory(directory);
        self
    }

    /// Builder-style [`insert_file`](Self::insert_file).
    pub fn with_file(mut self, file: File) -> Self {
        self.insert_file(file);
        self
    }

    /// Look up a directory by id.
    pub fn directory(&self, id: &str) -> Option<&Directory> {
        self.directories.get(id)
    }

    /// Look up a file by id.
    pub fn file(&self, id: &str) -> Option<&File> {
        self.files.get(id)
    }

    /// The first directory without a parent.
    pub fn root(&self) -> Option<&Directory> {
        self.directories.values().find(|d| d.is_root())
    }

    /// All directories in insertion order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.directories.values()
    }

    /// All files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Supplies file content by file id.
pub trait ContentProvider {
    /// Current content of a file, or `None` if the provider has none.
    fn file_content(&self, file_id: &str) -> Option<String>;
}

impl<S: BuildHasher> ContentProvider for HashMap<String, String, S> {
    fn file_content(&self, file_id: &str) -> Option<String> {
        self.get(file_id).cloned()
    }
}

impl ContentProvider for IndexMap<String, String> {
    fn file_content(&self, file_id: &str) -> Option<String> {
        self.get(file_id).cloned()
    }
}

impl<P: ContentProvider + ?Sized> ContentProvider for &P {
    fn file_content(&self, file_id: &str) -> Option<String> {
        (**self).file_content(file_id)
    }
}

/// A tree plus the content of its files, as one serializable document.
///
/// Serialized flat: `{"directories": {...}, "files": {...}, "contents": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub tree: ProjectTree,
    /// File content by file id.
    #[serde(default)]
    pub contents: IndexMap<String, String>,
}

impl SessionSnapshot {
    /// Bundle a tree with its file contents.
    pub fn new(tree: ProjectTree, contents: IndexMap<String, String>) -> Self {
        Self { tree, contents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tree_keeps_insertion_order() {
        let tree = ProjectTree::new()
            .with_directory(Directory::root("root"))
            .with_directory(Directory::new("z", "/z", Some("root")))
            .with_directory(Directory::new("a", "/a", Some("root")));

        let ids: Vec<&str> = tree.directories().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "z", "a"]);
    }

    #[test]
    fn root_is_directory_without_parent() {
        let tree = ProjectTree::new()
            .with_directory(Directory::new("src", "/src", Some("r")))
            .with_directory(Directory::root("r"));

        assert_eq!(tree.root().map(|d| d.id.as_str()), Some("r"));
        assert_eq!(tree.root().map(|d| d.path.as_str()), Some(ROOT_PATH));
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut tree = ProjectTree::new();
        tree.insert_file(File::new("f", "/old.txt", "r"));
        let previous = tree.insert_file(File::new("f", "/new.txt", "r"));

        assert_eq!(previous.map(|f| f.path), Some("/old.txt".to_string()));
        assert_eq!(tree.file_count(), 1);
        assert_eq!(tree.file("f").unwrap().path, "/new.txt");
    }

    #[test]
    fn deserializes_collaborator_json() {
        let doc = json!({
            "allDirectories": {
                "d0": {"id": "d0", "path": "/", "parentId": null, "isDeleted": false},
                "d1": {"id": "d1", "path": "/lib", "parentId": "d0", "isDeleted": true}
            },
            "allFiles": {
                "f1": {"id": "f1", "path": "/lib/a.js", "parentId": "d1", "isDeleted": false}
            }
        });

        let tree: ProjectTree = serde_json::from_value(doc).unwrap();
        assert_eq!(tree.directory_count(), 2);
        assert!(tree.directory("d1").unwrap().is_deleted);
        assert_eq!(tree.file("f1").unwrap().parent_id, "d1");
    }

    #[test]
    fn session_snapshot_serializes_flat() {
        let tree = ProjectTree::new()
            .with_directory(Directory::root("r"))
            .with_file(File::new("f", "/a.txt", "r"));
        let mut contents = IndexMap::new();
        contents.insert("f".to_string(), "hello".to_string());

        let value = serde_json::to_value(SessionSnapshot::new(tree, contents)).unwrap();
        assert!(value.get("directories").is_some());
        assert!(value.get("files").is_some());
        assert_eq!(value["contents"]["f"], "hello");
        assert_eq!(value["files"]["f"]["parentId"], "r");
    }

    #[test]
    fn maps_act_as_content_providers() {
        let mut hashed = HashMap::new();
        hashed.insert("f".to_string(), "x".to_string());
        assert_eq!(hashed.file_content("f"), Some("x".to_string()));
        assert_eq!((&hashed).file_content("missing"), None);

        let mut ordered = IndexMap::new();
        ordered.insert("g".to_string(), "y".to_string());
        assert_eq!(ordered.file_content("g"), Some("y".to_string()));
    }
}
