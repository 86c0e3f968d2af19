//! Property-based tests for directory resolution and reconciliation.
//!
//! These tests use proptest to generate random manifests and locks and verify
//! that the invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::identity::resolve_directory;
    use crate::reconcile::merge;
    use crate::record::{RecordSet, RepositoryEntry};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn url_strategy() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["https://github.com", "ssh://git@example.com", "file://"]),
            "[a-z]{1,8}",
            "[a-z][a-z0-9_-]{0,12}",
            any::<bool>(),
        )
            .prop_map(|(host, owner, name, suffix)| {
                format!("{}/{}/{}{}", host, owner, name, if suffix { ".git" } else { "" })
            })
    }

    fn entry_strategy() -> impl Strategy<Value = RepositoryEntry> {
        (
            url_strategy(),
            proptest::option::of("[a-z]{1,8}"),
            proptest::option::of("[0-9a-f]{40}"),
        )
            .prop_map(|(url, directory, hash)| RepositoryEntry {
                url,
                directory,
                hash,
            })
    }

    /// A manifest with unique URLs.
    fn manifest_strategy() -> impl Strategy<Value = RecordSet> {
        prop::collection::vec(entry_strategy(), 0..8).prop_map(|entries| {
            let mut seen = HashSet::new();
            RecordSet {
                base_directory: None,
                repositories: entries
                    .into_iter()
                    .filter(|e| seen.insert(e.url.clone()))
                    .collect(),
            }
        })
    }

    /// A lock that reuses some manifest URLs (possibly more than once) and
    /// adds some of its own.
    fn manifest_and_lock() -> impl Strategy<Value = (RecordSet, RecordSet)> {
        manifest_strategy().prop_flat_map(|manifest| {
            let reused: Vec<String> = manifest.repositories.iter().map(|e| e.url.clone()).collect();
            let locked = prop::collection::vec(
                (
                    prop::sample::select(if reused.is_empty() {
                        vec!["https://example.com/only/lock.git".to_string()]
                    } else {
                        reused
                    }),
                    "[a-z]{1,8}",
                    "[0-9a-f]{40}",
                ),
                0..8,
            );
            let extra = prop::collection::vec(entry_strategy(), 0..4);
            (Just(manifest), locked, extra).prop_map(|(manifest, locked, extra)| {
                let mut repositories: Vec<RepositoryEntry> = locked
                    .into_iter()
                    .map(|(url, directory, hash)| {
                        RepositoryEntry::new(url)
                            .with_directory(directory)
                            .with_hash(hash)
                    })
                    .collect();
                repositories.extend(extra);
                let lock = RecordSet {
                    base_directory: Some("locked-base".to_string()),
                    repositories,
                };
                (manifest, lock)
            })
        })
    }

    proptest! {
        /// Property: resolving the same entry twice gives the same directory
        #[test]
        fn resolve_directory_is_idempotent(entry in entry_strategy()) {
            let first = resolve_directory(&entry).unwrap();
            let second = resolve_directory(&entry).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: an explicit directory always overrides the URL
        #[test]
        fn explicit_directory_always_wins(entry in entry_strategy(), dir in "[a-z]{1,8}") {
            let entry = entry.with_directory(dir.clone());
            prop_assert_eq!(resolve_directory(&entry).unwrap(), dir);
        }

        /// Property: derived directories never contain a separator or the
        /// .git suffix
        #[test]
        fn derived_directory_is_last_segment(url in url_strategy()) {
            let dir = resolve_directory(&RepositoryEntry::new(url.clone())).unwrap();
            prop_assert!(!dir.contains('/'), "{} -> {}", url, dir);
            prop_assert!(!dir.ends_with(".git"), "{} -> {}", url, dir);
            prop_assert!(url.contains(&dir));
        }

        /// Property: merge output follows manifest order and membership
        #[test]
        fn merge_preserves_manifest_order((manifest, lock) in manifest_and_lock()) {
            let merged = merge(&manifest, &lock);
            let expected: Vec<&str> = manifest.repositories.iter().map(|e| e.url.as_str()).collect();
            let actual: Vec<&str> = merged.repositories.iter().map(|e| e.url.as_str()).collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(&merged.base_directory, &manifest.base_directory);
        }

        /// Property: shared URLs take the last lock entry, the rest are
        /// unchanged manifest entries
        #[test]
        fn merge_prefers_lock_values((manifest, lock) in manifest_and_lock()) {
            let merged = merge(&manifest, &lock);
            for (declared, result) in manifest.repositories.iter().zip(&merged.repositories) {
                let last_locked = lock.repositories.iter().rev().find(|l| l.url == declared.url);
                match last_locked {
                    Some(locked) => {
                        prop_assert_eq!(result, locked);
                    }
                    None => {
                        prop_assert_eq!(result, declared);
                    }
                }
            }
        }
    }
}
