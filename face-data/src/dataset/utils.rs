use crate::common::*;

/// List the regular files in a directory, sorted by file name.
pub fn list_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("failed to list directory '{}'", dir.display()))?
        .map(|entry| -> Result<_> { Ok(entry?.path()) })
        .filter_ok(|path| path.is_file())
        .collect::<Result<_>>()?;
    paths.sort();
    Ok(paths)
}

/// List the files in a directory whose names match a glob pattern, sorted.
pub fn glob_files(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure!(
        dir.is_dir(),
        "the image directory '{}' does not exist",
        dir.display()
    );
    let dir_str = dir
        .to_str()
        .ok_or_else(|| format_err!("non-unicode path '{}'", dir.display()))?;
    let pattern = Path::new(&glob::Pattern::escape(dir_str)).join(pattern);
    let pattern = pattern
        .to_str()
        .ok_or_else(|| format_err!("non-unicode pattern '{}'", pattern.display()))?;

    let mut paths: Vec<_> = glob::glob(pattern)?.collect::<Result<_, _>>()?;
    paths.sort();
    Ok(paths)
}

/// The file name of a path as a string, if it is valid unicode.
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}
