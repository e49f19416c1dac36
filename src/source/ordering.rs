//! Chapter ordering.
//!
//! The order files are discovered in IS the order chapters appear in the
//! book, so it has to be the same on every machine. Paths are compared as raw
//! bytes of the whole path: no locale collation, no case folding, and no
//! component-wise comparison (which would treat `/` differently from other
//! characters).

use std::cmp::Ordering;
use std::path::Path;

/// Ordinal comparison of two full paths
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    a.as_os_str()
        .as_encoded_bytes()
        .cmp(b.as_os_str().as_encoded_bytes())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn sort_paths(paths: &mut [PathBuf]) {
        paths.sort_by(|a, b| compare_paths(a, b));
    }

    #[test]
    fn sorts_by_bytes_not_locale() {
        let mut paths = vec![
            PathBuf::from("/notes/b.md"),
            PathBuf::from("/notes/B.md"),
            PathBuf::from("/notes/a.md"),
            PathBuf::from("/notes/10-end.md"),
            PathBuf::from("/notes/02-start.md"),
        ];
        sort_paths(&mut paths);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/notes/02-start.md"),
                PathBuf::from("/notes/10-end.md"),
                PathBuf::from("/notes/B.md"),
                PathBuf::from("/notes/a.md"),
                PathBuf::from("/notes/b.md"),
            ]
        );
    }

    #[test]
    fn order_is_independent_of_input_order() {
        let forward = vec![
            PathBuf::from("/n/01-intro.md"),
            PathBuf::from("/n/02-body.md"),
            PathBuf::from("/n/03-end.md"),
        ];
        let mut reversed: Vec<PathBuf> = forward.iter().rev().cloned().collect();
        let mut shuffled = vec![forward[1].clone(), forward[2].clone(), forward[0].clone()];
        sort_paths(&mut reversed);
        sort_paths(&mut shuffled);
        assert_eq!(reversed, forward);
        assert_eq!(shuffled, forward);
    }

    #[test]
    fn punctuation_compares_by_byte_value() {
        // '-' (0x2d) sorts before '.' (0x2e) and '_' (0x5f)
        let mut paths = vec![
            PathBuf::from("/n/a_b.md"),
            PathBuf::from("/n/a.md"),
            PathBuf::from("/n/a-b.md"),
        ];
        sort_paths(&mut paths);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/n/a-b.md"),
                PathBuf::from("/n/a.md"),
                PathBuf::from("/n/a_b.md"),
            ]
        );
    }
}
