//! Run-scoped executable claims.

use std::collections::HashMap;
use std::path::Path;

use tokio::sync::Mutex;

/// Result of trying to claim an executable for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The path was free and now belongs to the caller.
    Claimed,
    /// The caller already owned the path.
    AlreadyOwned,
    /// Another game owns the path; the registry is unchanged.
    Conflict { claimed_by: String },
}

/// Maps each chosen executable to the game that claimed it.
///
/// Entries are only ever added. The check-then-set in [`claim`](Self::claim)
/// happens under one lock, so folders processed concurrently can never both
/// win the same executable.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    claims: Mutex<HashMap<String, String>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `path` for `game` unless another game holds it.
    pub async fn claim(&self, path: &Path, game: &str) -> Claim {
        let key = registry_key(path);
        let mut claims = self.claims.lock().await;

        match claims.get(&key) {
            Some(owner) if owner == game => Claim::AlreadyOwned,
            Some(owner) => Claim::Conflict {
                claimed_by: owner.clone(),
            },
            None => {
                claims.insert(key, game.to_string());
                Claim::Claimed
            }
        }
    }

    /// Returns the game holding `path`, if any.
    pub async fn owner(&self, path: &Path) -> Option<String> {
        self.claims.lock().await.get(&registry_key(path)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.claims.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.lock().await.is_empty()
    }
}

/// Normalizes separators, and case on Windows, so the same file always
/// maps to the same key.
fn registry_key(path: &Path) -> String {
    let key = path.to_string_lossy().replace('\\', "/");
    if cfg!(windows) { key.to_lowercase() } else { key }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn first_claim_wins() {
        let reg = DedupRegistry::new();
        let path = Path::new("/games/A/a.exe");

        assert_eq!(reg.claim(path, "A").await, Claim::Claimed);
        assert_eq!(
            reg.claim(path, "B").await,
            Claim::Conflict {
                claimed_by: "A".into()
            }
        );
        assert_eq!(reg.owner(path).await.as_deref(), Some("A"));
        assert_eq!(reg.len().await, 1);
    }

    #[tokio::test]
    async fn reclaim_by_same_game_is_noop() {
        let reg = DedupRegistry::new();
        let path = Path::new("/games/A/a.exe");

        reg.claim(path, "A").await;
        assert_eq!(reg.claim(path, "A").await, Claim::AlreadyOwned);
        assert_eq!(reg.len().await, 1);
    }

    #[tokio::test]
    async fn separators_are_normalized() {
        let reg = DedupRegistry::new();
        reg.claim(Path::new("C:\\games\\a.exe"), "A").await;
        assert_eq!(
            reg.owner(Path::new("C:/games/a.exe")).await.as_deref(),
            Some("A")
        );
    }

    #[tokio::test]
    async fn concurrent_claims_have_single_winner() {
        let reg = Arc::new(DedupRegistry::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let reg = Arc::clone(&reg);
            handles.push(tokio::spawn(async move {
                reg.claim(Path::new("/shared/game.exe"), &format!("game-{i}"))
                    .await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() == Claim::Claimed {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(reg.len().await, 1);
    }

    #[tokio::test]
    async fn starts_empty() {
        assert!(DedupRegistry::new().is_empty().await);
    }
}
