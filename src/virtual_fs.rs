//! Virtual file system for collecting the files of a pack in memory before writing them.

use std::{collections::HashMap, fs, io, path::Path};

#[cfg(feature = "fs_access")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(feature = "zip")]
use zip::{write::SimpleFileOptions, ZipWriter};

/// Folder representation in virtual file system
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VFolder {
    folders: HashMap<String, VFolder>,
    files: HashMap<String, VFile>,
}

/// Split a path into its first segment and the rest, if there is one.
fn split_head(path: &str) -> (&str, Option<&str>) {
    path.split_once('/')
        .map(|(h, t)| (h, (!t.is_empty()).then_some(t)))
        .unwrap_or((path, None))
}

impl VFolder {
    /// Create a new, empty virtual folder.
    #[must_use]
    pub fn new() -> VFolder {
        VFolder {
            folders: HashMap::new(),
            files: HashMap::new(),
        }
    }

    /// Get all direct subfolders in the folder.
    #[must_use]
    pub fn get_folders(&self) -> &HashMap<String, VFolder> {
        &self.folders
    }
    /// Get all direct files in the folder.
    #[must_use]
    pub fn get_files(&self) -> &HashMap<String, VFile> {
        &self.files
    }

    /// Recursively add an existing folder to the folder.
    ///
    /// A folder already present at the path is merged with the new one.
    pub fn add_existing_folder(&mut self, path: &str, folder: VFolder) {
        match split_head(path) {
            (head, Some(tail)) => self
                .folders
                .entry(head.to_string())
                .or_default()
                .add_existing_folder(tail, folder),
            (head, None) => self.folders.entry(head.to_string()).or_default().merge(folder),
        }
    }

    /// Recursively add a new file to the folder, replacing a file at the same path.
    pub fn add_file(&mut self, path: &str, file: VFile) {
        match split_head(path) {
            (head, Some(tail)) => self
                .folders
                .entry(head.to_string())
                .or_default()
                .add_file(tail, file),
            (head, None) => {
                self.files.insert(head.to_string(), file);
            }
        }
    }

    /// Recursively get a subfolder by path.
    #[must_use]
    pub fn get_folder(&self, path: &str) -> Option<&VFolder> {
        match split_head(path) {
            (head, Some(tail)) => self.folders.get(head)?.get_folder(tail),
            (head, None) => self.folders.get(head),
        }
    }

    /// Recursively get a file by path.
    #[must_use]
    pub fn get_file(&self, path: &str) -> Option<&VFile> {
        match split_head(path) {
            (head, Some(tail)) => self.folders.get(head)?.get_file(tail),
            (head, None) => self.files.get(head),
        }
    }

    /// Check whether a file exists at the path.
    #[must_use]
    pub fn contains_file(&self, path: &str) -> bool {
        self.get_file(path).is_some()
    }

    /// Flatten the folder and its contents into a list of files with full paths.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, &VFile)> {
        let mut files = self
            .files
            .iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<Vec<_>>();

        for (name, folder) in &self.folders {
            files.extend(
                folder
                    .flatten()
                    .into_iter()
                    .map(|(path, file)| (format!("{name}/{path}"), file)),
            );
        }

        files
    }

    /// Get the full paths of all files, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths = self
            .flatten()
            .into_iter()
            .map(|(path, _)| path)
            .collect::<Vec<_>>();
        paths.sort();
        paths
    }

    /// Place the folder and its contents on the file system.
    ///
    /// Files are written in parallel if `concurrent` is set. Files written
    /// before an error occurred are left in place.
    ///
    /// # Errors
    /// - If a directory cannot be created or a file cannot be written
    #[cfg(feature = "fs_access")]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn place(&self, path: &Path, concurrent: bool) -> io::Result<()> {
        fs::create_dir_all(path)?;
        let files = self.flatten();

        let write = |(name, file): &(String, &VFile)| -> io::Result<()> {
            let target = path.join(name);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, file.as_bytes())?;
            tracing::debug!(path = %target.display(), "wrote file");
            Ok(())
        };

        if concurrent {
            files.par_iter().try_for_each(write)
        } else {
            files.iter().try_for_each(write)
        }
    }

    /// Zip the folder and its contents into a zip archive.
    ///
    /// # Errors
    /// - If the archive cannot be created or written
    #[cfg(feature = "zip")]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn zip(&self, path: &Path) -> io::Result<()> {
        use io::Write;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        let mut writer = ZipWriter::new(file);
        let mut virtual_files = self.flatten();
        virtual_files.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (path, file) in virtual_files {
            writer.start_file(path, SimpleFileOptions::default())?;
            writer.write_all(file.as_bytes())?;
        }

        writer.finish()?;

        Ok(())
    }

    /// Recursively merge another folder into this folder.
    ///
    /// Files of `other` replace files at the same path.
    pub fn merge(&mut self, other: Self) {
        for (name, folder) in other.folders {
            if let Some(existing_folder) = self.folders.get_mut(&name) {
                existing_folder.merge(folder);
            } else {
                self.folders.insert(name, folder);
            }
        }
        self.files.extend(other.files);
    }
}

impl TryFrom<&Path> for VFolder {
    type Error = io::Error;

    fn try_from(value: &Path) -> Result<Self, Self::Error> {
        let mut root_vfolder = VFolder::new();
        for dir_entry in fs::read_dir(value)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            let name = dir_entry.file_name().into_string().map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, "Invalid file name")
            })?;

            if path.is_dir() {
                root_vfolder.add_existing_folder(&name, VFolder::try_from(path.as_path())?);
            } else if path.is_file() {
                root_vfolder.add_file(&name, VFile::Binary(fs::read(path)?));
            }
        }

        Ok(root_vfolder)
    }
}

/// File representation in virtual file system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VFile {
    /// Text file
    Text(String),
    /// Binary file
    Binary(Vec<u8>),
}

impl VFile {
    /// Get the content of the file.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VFile::Text(text) => text.as_bytes(),
            VFile::Binary(data) => data,
        }
    }

    /// Get the content of the file as text, if it is a text file.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            VFile::Text(text) => Some(text.as_str()),
            VFile::Binary(_) => None,
        }
    }
}

impl From<String> for VFile {
    fn from(value: String) -> Self {
        VFile::Text(value)
    }
}
impl From<&str> for VFile {
    fn from(value: &str) -> Self {
        VFile::Text(value.to_string())
    }
}
impl From<Vec<u8>> for VFile {
    fn from(value: Vec<u8>) -> Self {
        VFile::Binary(value)
    }
}
impl Default for VFile {
    fn default() -> Self {
        VFile::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vfolder() {
        let mut v_folder = VFolder::new();
        let v_file_1 = VFile::from("foo");
        v_folder.add_file("foo.txt", v_file_1);

        assert_eq!(v_folder.get_files().len(), 1);
        assert_eq!(v_folder.get_folders().len(), 0);

        let v_file_2 = VFile::from("baz");
        v_folder.add_file("bar/baz.txt", v_file_2);

        assert_eq!(v_folder.get_files().len(), 1);
        assert_eq!(v_folder.get_folders().len(), 1);
        assert!(v_folder.contains_file("bar/baz.txt"));
        assert!(v_folder
            .get_folder("bar")
            .expect("folder not found")
            .get_file("baz.txt")
            .is_some());
    }

    #[test]
    fn test_nested_files_share_folders() {
        let mut v_folder = VFolder::new();
        v_folder.add_file("data/a/functions/x.mcfunction", VFile::from("x"));
        v_folder.add_file("data/a/functions/y.mcfunction", VFile::from("y"));
        v_folder.add_file("data/b/tags/z.json", VFile::from("z"));

        assert_eq!(
            v_folder.paths(),
            vec![
                "data/a/functions/x.mcfunction".to_string(),
                "data/a/functions/y.mcfunction".to_string(),
                "data/b/tags/z.json".to_string(),
            ]
        );
        assert_eq!(
            v_folder
                .get_file("data/a/functions/y.mcfunction")
                .and_then(VFile::as_text),
            Some("y")
        );
    }

    #[test]
    fn test_merge_keeps_both_sides() {
        let mut base = VFolder::new();
        base.add_file("a/one.txt", VFile::from("1"));
        base.add_file("a/two.txt", VFile::from("old"));

        let mut other = VFolder::new();
        other.add_file("a/two.txt", VFile::from("new"));
        other.add_file("b/three.txt", VFile::from(vec![3u8]));

        base.merge(other);

        assert_eq!(base.paths().len(), 3);
        assert_eq!(base.get_file("a/two.txt"), Some(&VFile::from("new")));
        assert_eq!(base.get_file("b/three.txt").map(VFile::as_bytes), Some(&[3u8][..]));
    }

    #[cfg(feature = "fs_access")]
    #[test]
    fn test_place_and_read_back() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let mut v_folder = VFolder::new();
        v_folder.add_file("pack.mcmeta", VFile::from("{}"));
        v_folder.add_file("data/foo/functions/bar.mcfunction", VFile::from("say hi\n"));

        for concurrent in [true, false] {
            let target = dir.path().join(concurrent.to_string());
            v_folder.place(&target, concurrent).expect("error placing folder");

            assert_eq!(
                fs::read_to_string(target.join("data/foo/functions/bar.mcfunction"))
                    .expect("file not written"),
                "say hi\n"
            );

            let read_back = VFolder::try_from(target.as_path()).expect("error reading folder");
            assert_eq!(read_back.paths(), v_folder.paths());
        }
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_zip() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let archive = dir.path().join("pack.zip");
        let mut v_folder = VFolder::new();
        v_folder.add_file("data/foo/tags/functions/tick.json", VFile::from("{}"));

        v_folder.zip(&archive).expect("error writing zip");

        let metadata = fs::metadata(&archive).expect("zip not written");
        assert!(metadata.len() > 0);
    }
}
