//! Path helpers for benchmark inputs and results

use std::path::{Path, PathBuf};

/// Check whether `path` names a data file with the given extension.
///
/// The comparison is exact: `inst.DAT` is not a `dat` file. A bare
/// `.dat` has no stem and is not a data file either.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Derive the result path for an input: same base name, new extension,
/// inside `output_dir`.
///
/// Returns `None` when the input has no file stem.
pub fn output_path_for(input: &Path, output_dir: &Path, extension: &str) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(extension);
    Some(output_dir.join(file_name))
}
