//! The maps folder: every `*.json` file in it is a map.

use std::path::{Path, PathBuf};

use voxmap_world::{MapError, VoxelStore};

/// File listing of a maps folder, sorted by name.
#[derive(Debug, Clone)]
pub struct MapLibrary {
    dir: PathBuf,
    maps: Vec<PathBuf>,
}

impl MapLibrary {
    /// Opens `dir` and lists its maps. A missing folder is an empty library.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let mut library = Self {
            dir: dir.into(),
            maps: Vec::new(),
        };
        library.refresh();
        library
    }

    /// Folder this library lists.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Re-reads the folder.
    pub fn refresh(&mut self) {
        self.maps.clear();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Maps folder {} not readable: {}", self.dir.display(), e);
                return;
            }
        };
        self.maps = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        self.maps.sort();
    }

    /// Map files, sorted by name.
    pub fn maps(&self) -> &[PathBuf] {
        &self.maps
    }

    /// Maps whose file name contains `filter`, ignoring case.
    pub fn filter<'a>(&'a self, filter: &str) -> impl Iterator<Item = &'a Path> + use<'a> {
        let needle = filter.trim().to_lowercase();
        self.maps
            .iter()
            .filter(move |path| {
                needle.is_empty()
                    || path
                        .file_name()
                        .is_some_and(|name| name.to_string_lossy().to_lowercase().contains(&needle))
            })
            .map(PathBuf::as_path)
    }

    /// First map by name.
    pub fn first(&self) -> Option<&Path> {
        self.maps.first().map(PathBuf::as_path)
    }

    /// Last map by name; the one opened at startup.
    pub fn last(&self) -> Option<&Path> {
        self.maps.last().map(PathBuf::as_path)
    }

    /// Path a map called `name` would have.
    ///
    /// Names must be a single file name inside the folder: empty names, path separators,
    /// and `.` or `..` are rejected.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, MapError> {
        let name = name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(MapError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Writes an empty map called `name` and returns its path.
    pub fn create_empty(&mut self, name: &str) -> Result<PathBuf, MapError> {
        self.save_as(&VoxelStore::new(), name)
    }

    /// Saves `store` as `name`, replacing any existing map of that name.
    pub fn save_as(&mut self, store: &VoxelStore, name: &str) -> Result<PathBuf, MapError> {
        let path = self.path_for(name)?;
        store.save(&path)?;
        tracing::info!("Saved map as: {}", path.display());
        self.refresh();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmap_world::Voxel;

    #[test]
    fn test_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = MapLibrary::open(dir.path().join("nope"));
        assert!(library.maps().is_empty());
        assert!(library.last().is_none());
    }

    #[test]
    fn test_lists_json_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt", "c.JSON.bak"] {
            std::fs::write(dir.path().join(name), "[]").unwrap();
        }
        let library = MapLibrary::open(dir.path());
        let names: Vec<_> = library
            .maps()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
        assert_eq!(library.first(), Some(dir.path().join("a.json").as_path()));
        assert_eq!(library.last(), Some(dir.path().join("b.json").as_path()));
    }

    #[test]
    fn test_create_empty_writes_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = MapLibrary::open(dir.path().join("maps"));
        let path = library.create_empty("untitled").unwrap();

        assert_eq!(path, dir.path().join("maps").join("untitled.json"));
        assert!(VoxelStore::load(&path).unwrap().is_empty());
        assert_eq!(library.maps(), &[path]);
    }

    #[test]
    fn test_names_outside_folder_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = MapLibrary::open(dir.path().join("maps"));
        for name in ["", "  ", ".", "..", "../escape", "sub/map", "..\\escape", "/abs"] {
            assert!(
                matches!(library.path_for(name), Err(MapError::InvalidName(_))),
                "{name:?}"
            );
            assert!(library.create_empty(name).is_err(), "{name:?}");
        }
        assert!(!dir.path().join("escape.json").exists());
        assert!(library.maps().is_empty());

        assert_eq!(
            library.path_for(" my map ").unwrap(),
            dir.path().join("maps").join("my map.json")
        );
    }

    #[test]
    fn test_save_as_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = MapLibrary::open(dir.path());
        let mut store = VoxelStore::new();
        store.set(1, 2, 0, Voxel::new("grass"));
        library.save_as(&store, "Island").unwrap();
        library.create_empty("desert").unwrap();

        let hits: Vec<_> = library.filter("isl").collect();
        assert_eq!(hits, vec![dir.path().join("Island.json").as_path()]);
        assert_eq!(library.filter("").count(), 2);
        assert_eq!(VoxelStore::load(hits[0]).unwrap(), store);
    }
}
