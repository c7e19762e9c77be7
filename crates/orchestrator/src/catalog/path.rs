#![forbid(unsafe_code)]

use std::path::{Component, Path};

/// Lexically normalized path components, plus a copy folded for comparison.
///
/// `.` is dropped and `..` pops the previous normal component. Nothing is
/// read from disk, so symlinks are not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathKey {
    parts: Vec<String>,
    folded: Vec<String>,
}

impl PathKey {
    pub(crate) fn new(path: &Path) -> Self {
        let mut parts: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.last().is_some_and(|last| !is_anchor(last)) {
                        parts.pop();
                    }
                }
                Component::RootDir => parts.push(ROOT.to_string()),
                Component::Prefix(prefix) => {
                    parts.push(prefix.as_os_str().to_string_lossy().into_owned())
                }
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            }
        }
        let folded = parts.iter().map(|p| fold(p)).collect();
        Self { parts, folded }
    }

    pub(crate) fn len(&self) -> usize {
        self.parts.len()
    }

    /// The component of `self` right below `ancestor`, if `self` lies at
    /// least two levels below it (a folder and something inside it).
    pub(crate) fn child_of(&self, ancestor: &PathKey) -> Option<&str> {
        let depth = ancestor.len();
        if self.len() < depth + 2 || self.folded[..depth] != ancestor.folded[..] {
            return None;
        }
        Some(self.parts[depth].as_str())
    }
}

const ROOT: &str = "/";

fn is_anchor(part: &str) -> bool {
    part == ROOT || part.ends_with(':')
}

#[cfg(any(windows, target_os = "macos"))]
fn fold(part: &str) -> String {
    part.to_lowercase()
}

#[cfg(not(any(windows, target_os = "macos")))]
fn fold(part: &str) -> String {
    part.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        let key = PathKey::new(Path::new("/games/./Wukong/../Wukong/bin/game"));
        let root = PathKey::new(Path::new("/games/"));
        assert_eq!(key.child_of(&root), Some("Wukong"));
    }

    #[test]
    fn parent_segments_cannot_escape_the_root() {
        let key = PathKey::new(Path::new("/games/../etc/passwd"));
        let root = PathKey::new(Path::new("/games"));
        assert_eq!(key.child_of(&root), None);

        let key = PathKey::new(Path::new("/../../games/Wukong/game"));
        assert_eq!(key.child_of(&root), Some("Wukong"));
    }

    #[test]
    fn file_directly_in_root_has_no_game() {
        let key = PathKey::new(Path::new("/games/launcher"));
        let root = PathKey::new(Path::new("/games"));
        assert_eq!(key.child_of(&root), None);
    }

    #[test]
    fn sibling_with_common_prefix_is_not_contained() {
        let key = PathKey::new(Path::new("/games2/Wukong/game"));
        let root = PathKey::new(Path::new("/games"));
        assert_eq!(key.child_of(&root), None);
    }

    #[cfg(any(windows, target_os = "macos"))]
    #[test]
    fn comparison_ignores_case() {
        let key = PathKey::new(Path::new("/Games/Wukong/game"));
        let root = PathKey::new(Path::new("/games"));
        assert_eq!(key.child_of(&root), Some("Wukong"));
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    #[test]
    fn comparison_respects_case() {
        let key = PathKey::new(Path::new("/Games/Wukong/game"));
        let root = PathKey::new(Path::new("/games"));
        assert_eq!(key.child_of(&root), None);
    }
}
