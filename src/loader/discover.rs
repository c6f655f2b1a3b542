use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SCHEMA_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Schema files under `root`, sorted by path. A file path is returned as-is.
pub fn schema_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| is_schema_file(path))
        .collect::<Vec<_>>();
    files.sort();
    files
}

fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCHEMA_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn schema_files_walks_nested_directories_in_order() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::create_dir_all(dir.path().join("nested/deeper")).expect("nested dirs should create");
        fs::write(dir.path().join("b.json"), "{}").expect("json should write");
        fs::write(dir.path().join("nested/a.toml"), "").expect("toml should write");
        fs::write(dir.path().join("nested/deeper/c.JSON"), "{}").expect("upper json should write");
        fs::write(dir.path().join("notes.md"), "# notes").expect("md should write");

        let files = schema_files(dir.path());
        let names = files
            .iter()
            .map(|path| {
                path.strip_prefix(dir.path())
                    .expect("path should be under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b.json", "nested/a.toml", "nested/deeper/c.JSON"]);
    }

    #[test]
    fn schema_files_returns_single_file_unchanged() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("quiz.txt");
        fs::write(&path, "{}").expect("file should write");
        assert_eq!(schema_files(&path), vec![path]);
    }
}
