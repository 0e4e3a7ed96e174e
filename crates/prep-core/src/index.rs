//! Generation of the atom index list consumed by the trajectory converter.
//!
//! This is the only computation the workflow performs itself: an explicit
//! enumeration of the atoms retained when stripping the trajectory, written
//! as space-separated integers from 0 to the configured last atom inclusive.

use crate::error::PrepError;
use std::fs;
use std::path::Path;

/// Formats the retained-atom enumeration `0..=last_atom_index`.
///
/// Deterministic and total: the same index always yields byte-identical
/// output, so re-running the workflow rewrites the file with the same bytes.
pub fn format_index_list(last_atom_index: usize) -> String {
    let mut out = String::new();
    for i in 0..=last_atom_index {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&i.to_string());
    }
    out.push('\n');
    out
}

/// Writes the index list for `0..=last_atom_index` to `path`, overwriting any
/// previous content.
pub fn write_index_file(
    path: &Path,
    last_atom_index: usize,
    step: (usize, &'static str),
) -> Result<(), PrepError> {
    fs::write(path, format_index_list(last_atom_index)).map_err(|source| PrepError::IndexWrite {
        index: step.0,
        name: step.1,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_starts_at_zero_and_ends_at_last_index() {
        assert_eq!(format_index_list(3), "0 1 2 3\n");
    }

    #[test]
    fn single_atom_system() {
        assert_eq!(format_index_list(0), "0\n");
    }

    #[test]
    fn list_contains_exactly_n_plus_one_increasing_entries() {
        let list = format_index_list(1037);
        let values: Vec<usize> = list
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();

        assert_eq!(values.len(), 1038);
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&1037));
    }

    #[test]
    fn rewriting_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indices.dat");

        write_index_file(&path, 42, (1, "atom index list")).unwrap();
        let first = fs::read(&path).unwrap();
        write_index_file(&path, 42, (1, "atom index list")).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn unwritable_path_surfaces_index_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("indices.dat");

        let err = write_index_file(&path, 5, (1, "atom index list")).unwrap_err();
        assert!(matches!(err, PrepError::IndexWrite { index: 1, .. }));
    }
}
