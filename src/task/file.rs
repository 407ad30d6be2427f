//! Writing task lines to disk

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append one line to the tasks file, creating it if needed.
///
/// A missing trailing newline on the existing content is repaired first so
/// the new task lands on its own line.
pub fn try_add_task_to_file(path: &Path, task_line: &str) -> io::Result<()> {
    let needs_separator = match fs::read(path) {
        Ok(bytes) => bytes.last().is_some_and(|&b| b != b'\n'),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_separator {
        file.write_all(b"\n")?;
    }
    writeln!(file, "{}", task_line)?;
    Ok(())
}

pub fn add_task_to_file(path: &Path, task_line: &str) -> bool {
    match try_add_task_to_file(path, task_line) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Task appended: {}", task_line);
            true
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "Failed to append task: {}", e);
            false
        }
    }
}

/// Create (or truncate) the tasks file with a single line
pub fn try_create_file_with_task(path: &Path, task_line: &str) -> io::Result<()> {
    fs::write(path, format!("{}\n", task_line))
}

pub fn create_file_with_task(path: &Path, task_line: &str) -> bool {
    match try_create_file_with_task(path, task_line) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Created tasks file with: {}", task_line);
            true
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "Failed to create tasks file: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_task_appends_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "09:00 - First\n").unwrap();

        assert!(add_task_to_file(&path, "16:00 - Новая задача"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "09:00 - First\n16:00 - Новая задача\n");
    }

    #[test]
    fn test_add_task_repairs_missing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "09:00 - First").unwrap();

        assert!(add_task_to_file(&path, "10:00 - Second"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "09:00 - First\n10:00 - Second\n");
    }

    #[test]
    fn test_add_task_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");

        assert!(add_task_to_file(&path, "10:00 - Only"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "10:00 - Only\n");
    }

    #[test]
    fn test_add_task_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("tasks.txt");
        assert!(!add_task_to_file(&path, "10:00 - Nowhere"));
    }

    #[test]
    fn test_create_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "old content\n").unwrap();

        assert!(create_file_with_task(&path, "16:00 - Новая задача"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "16:00 - Новая задача\n");
    }

    #[test]
    fn test_create_file_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(!create_file_with_task(dir.path(), "10:00 - Directory"));
    }
}
