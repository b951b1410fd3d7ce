use crate::diagnostics::Diagnostic;
use crate::files::FileAccess;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Check whether a path names a hidden entry.
///
/// On Unix a name starting with `.` is hidden. `.` and `..` themselves are not.
/// On Windows the hidden file attribute also counts.
pub fn is_hidden(path: &Path) -> bool {
	let dot_name = path
		.file_name()
		.is_some_and(|name| name.as_encoded_bytes().starts_with(b"."));

	dot_name || has_hidden_attribute(path)
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
	use std::os::windows::fs::MetadataExt;
	const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

	fs::symlink_metadata(path)
		.map(|meta| meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
		.unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_path: &Path) -> bool {
	false
}

/// Decide whether the walk descends into or yields `entry`.
///
/// Hidden directories are pruned with their whole subtree.
fn keep_entry(access: &FileAccess, entry: &DirEntry) -> bool {
	if entry.depth() == 0 || access.allow_hidden() || !is_hidden(entry.path()) {
		return true;
	}

	let path = entry.path().to_path_buf();
	if entry.file_type().is_dir() {
		access.report(Diagnostic::HiddenDirectorySkipped { path });
	} else {
		access.report(Diagnostic::HiddenFileSkipped { path });
	}
	false
}

/// Depth-first walk of `root`, following symlinks.
///
/// Files come out in pre-order, each directory in the host's listing order.
/// Walk errors skip the offending entry; everything collected so far is kept.
pub(crate) fn scan_directory(access: &FileAccess, root: &Path) -> Vec<PathBuf> {
	let mut found = Vec::new();

	if is_hidden(root) && !access.allow_hidden() {
		access.report(Diagnostic::HiddenDirectorySkipped {
			path: root.to_path_buf(),
		});
		return found;
	}

	let walker = WalkDir::new(root)
		.follow_links(true)
		.into_iter()
		.filter_entry(|entry| keep_entry(access, entry));

	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				let path = e.path().unwrap_or(root).to_path_buf();
				if e.loop_ancestor().is_some() {
					access.report(Diagnostic::ScanFailed {
						path,
						error: e.to_string(),
					});
				} else {
					// Dangling links and unlistable directories land here.
					access.report(Diagnostic::Unreadable { path });
				}
				continue;
			}
		};

		if !entry.file_type().is_file() {
			continue;
		}

		let path = entry.into_path();

		if fs::File::open(&path).is_err() {
			access.report(Diagnostic::Unreadable { path });
			continue;
		}

		access.report(Diagnostic::FileFound { path: path.clone() });
		found.push(path);
	}

	found
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagnostics::MemorySink;
	use std::sync::Arc;

	// tempfile's default `.tmp` prefix would make the root itself hidden.
	fn visible_tempdir() -> tempfile::TempDir {
		tempfile::Builder::new().prefix("scan-").tempdir().unwrap()
	}

	fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
		paths.sort();
		paths
	}

	/// root/b.txt, root/.hidden/a.txt
	fn hidden_fixture() -> tempfile::TempDir {
		let dir = visible_tempdir();
		fs::create_dir(dir.path().join(".hidden")).unwrap();
		fs::write(dir.path().join(".hidden").join("a.txt"), "a").unwrap();
		fs::write(dir.path().join("b.txt"), "b").unwrap();
		dir
	}

	#[test]
	fn test_is_hidden() {
		assert!(is_hidden(Path::new("/tmp/.git")));
		assert!(is_hidden(Path::new(".env")));
		assert!(!is_hidden(Path::new("/tmp/src")));
		assert!(!is_hidden(Path::new(".")));
		assert!(!is_hidden(Path::new("..")));
	}

	#[test]
	fn test_scan_excludes_hidden_subtree() {
		let dir = hidden_fixture();
		let sink = Arc::new(MemorySink::new());
		let access = FileAccess::new(sink.clone());

		let found = access.scan_directory(dir.path());
		assert_eq!(found, vec![dir.path().join("b.txt")]);
		assert!(sink.codes().contains(&9));
	}

	#[test]
	fn test_scan_includes_hidden_when_allowed() {
		let dir = hidden_fixture();
		let mut access = FileAccess::default();
		access.set_allow_hidden(true);

		let found = sorted(access.scan_directory(dir.path()));
		assert_eq!(
			found,
			sorted(vec![
				dir.path().join(".hidden").join("a.txt"),
				dir.path().join("b.txt"),
			])
		);
	}

	#[test]
	fn test_scan_skips_hidden_files() {
		let dir = visible_tempdir();
		fs::write(dir.path().join(".env"), "secret").unwrap();
		fs::write(dir.path().join("visible.txt"), "x").unwrap();
		let sink = Arc::new(MemorySink::new());
		let access = FileAccess::new(sink.clone());

		let found = access.scan_directory(dir.path());
		assert_eq!(found, vec![dir.path().join("visible.txt")]);
		assert!(sink.codes().contains(&8));
	}

	#[test]
	fn test_scan_hidden_root_yields_nothing() {
		let dir = visible_tempdir();
		let root = dir.path().join(".config");
		fs::create_dir(&root).unwrap();
		fs::write(root.join("settings.toml"), "x").unwrap();

		assert!(FileAccess::default().scan_directory(&root).is_empty());

		let mut access = FileAccess::default();
		access.set_allow_hidden(true);
		assert_eq!(access.scan_directory(&root), vec![root.join("settings.toml")]);
	}

	#[test]
	fn test_scan_nested_directories() {
		let dir = visible_tempdir();
		let deep = dir.path().join("a").join("b").join("c");
		fs::create_dir_all(&deep).unwrap();
		fs::write(deep.join("leaf.txt"), "x").unwrap();
		fs::write(dir.path().join("a").join("mid.txt"), "x").unwrap();
		fs::write(dir.path().join("top.txt"), "x").unwrap();

		let found = sorted(FileAccess::default().scan_directory(dir.path()));
		assert_eq!(
			found,
			sorted(vec![
				deep.join("leaf.txt"),
				dir.path().join("a").join("mid.txt"),
				dir.path().join("top.txt"),
			])
		);
	}

	#[test]
	fn test_scan_missing_root_is_empty() {
		let dir = visible_tempdir();
		let sink = Arc::new(MemorySink::new());
		let access = FileAccess::new(sink.clone());

		assert!(access.scan_directory(&dir.path().join("missing")).is_empty());
		assert_eq!(sink.codes(), vec![4]);
	}

	#[test]
	fn test_scan_empty_directories_yield_nothing() {
		let dir = visible_tempdir();
		fs::create_dir_all(dir.path().join("x").join("y")).unwrap();
		assert!(FileAccess::default().scan_directory(dir.path()).is_empty());
	}

	#[cfg(unix)]
	#[test]
	fn test_scan_survives_symlink_cycle() {
		let dir = visible_tempdir();
		let sub = dir.path().join("sub");
		fs::create_dir(&sub).unwrap();
		fs::write(sub.join("file.txt"), "x").unwrap();
		std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();
		let sink = Arc::new(MemorySink::new());
		let access = FileAccess::new(sink.clone());

		let found = access.scan_directory(dir.path());
		assert_eq!(found, vec![sub.join("file.txt")]);
		assert!(sink.codes().contains(&50003));
	}

	#[cfg(unix)]
	#[test]
	fn test_non_utf8_dot_name_is_hidden() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		let name = OsStr::from_bytes(b".\xff\xfecache");
		assert!(is_hidden(&Path::new("/tmp").join(name)));

		let visible = OsStr::from_bytes(b"\xff\xfecache");
		assert!(!is_hidden(&Path::new("/tmp").join(visible)));
	}

	#[cfg(unix)]
	#[test]
	fn test_scan_reports_dangling_symlink() {
		let dir = visible_tempdir();
		std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link")).unwrap();
		let sink = Arc::new(MemorySink::new());
		let access = FileAccess::new(sink.clone());

		assert!(access.scan_directory(dir.path()).is_empty());
		assert_eq!(sink.codes(), vec![4]);
	}
}
