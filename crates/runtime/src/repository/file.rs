//! File-based ItemRepository implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use forge_core::{Item, ItemDelta, ItemId, OwnerId};

use super::traits::validate_delta;
use super::{ItemRepository, RepositoryError, Result};

const DIGEST_LEN: usize = 32;

/// File-based implementation of ItemRepository.
///
/// Stores the items of each owner in one `owner_{id}.bin` file.
///
/// # File Format
///
/// ```text
/// [32 bytes SHA-256 of payload][bincode Vec<Item>]
/// ```
///
/// A commit rewrites the owner file through a temp file and an atomic rename,
/// so a crash leaves either the previous or the new inventory on disk.
pub struct FileItemRepository {
    base_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileItemRepository {
    /// Create a new file-based item repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to an owner file.
    fn owner_path(&self, owner: OwnerId) -> PathBuf {
        self.base_dir.join(format!("owner_{}.bin", owner.0))
    }

    fn read_items(path: &Path) -> Result<Vec<Item>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(path).map_err(RepositoryError::Io)?;
        if bytes.len() < DIGEST_LEN {
            return Err(RepositoryError::CorruptedData(format!(
                "{} is truncated ({} bytes)",
                path.display(),
                bytes.len()
            )));
        }

        let (stored, payload) = bytes.split_at(DIGEST_LEN);
        let actual = Sha256::digest(payload);
        if stored != actual.as_slice() {
            return Err(RepositoryError::CorruptedData(format!(
                "{} checksum mismatch: stored {}, computed {}",
                path.display(),
                hex::encode(stored),
                hex::encode(actual)
            )));
        }

        bincode::deserialize(payload).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    fn write_items(path: &Path, items: &[Item]) -> Result<()> {
        let temp_path = path.with_extension("bin.tmp");

        let payload =
            bincode::serialize(items).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let mut bytes = Vec::with_capacity(DIGEST_LEN + payload.len());
        bytes.extend_from_slice(&Sha256::digest(&payload));
        bytes.extend_from_slice(&payload);

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;
        Ok(())
    }

    fn owner_files(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let path = entry.map_err(RepositoryError::Io)?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && filename.starts_with("owner_")
                && filename.ends_with(".bin")
            {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

impl ItemRepository for FileItemRepository {
    fn load_owner(&self, owner: OwnerId) -> Result<Vec<Item>> {
        let path = self.owner_path(owner);
        let items = Self::read_items(&path)?;
        tracing::debug!(
            target: "forge::repository",
            %owner,
            count = items.len(),
            "Loaded items from {}",
            path.display()
        );
        Ok(items)
    }

    fn commit(&self, delta: &ItemDelta) -> Result<()> {
        let owner = delta.owner;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let path = self.owner_path(owner);
        let mut items: BTreeMap<ItemId, Item> = Self::read_items(&path)?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();
        validate_delta(delta, |id| items.get(&id).map(|item| item.owner))?;

        for id in &delta.removed {
            items.remove(id);
        }
        for item in delta.updated.iter().chain(&delta.created) {
            items.insert(item.id, item.clone());
        }

        let items: Vec<Item> = items.into_values().collect();
        Self::write_items(&path, &items)?;

        tracing::debug!(
            target: "forge::repository",
            %owner,
            records = delta.len(),
            "Committed delta to {}",
            path.display()
        );
        Ok(())
    }

    fn max_item_id(&self) -> Result<Option<ItemId>> {
        let mut highest = None;
        for path in self.owner_files()? {
            let items = Self::read_items(&path)?;
            highest = highest.max(items.iter().map(|item| item.id).max());
        }
        Ok(highest)
    }
}

#[cfg(test)]
mod tests {
    use forge_core::ItemTypeId;

    use super::*;

    fn item(id: u32, owner: u32) -> Item {
        Item::new(ItemId(id), OwnerId(owner), ItemTypeId(410_335), 3000)
    }

    #[test]
    fn commit_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileItemRepository::new(dir.path()).expect("repo");
        repo.store(OwnerId(1), &[item(1, 1), item(2, 1)])
            .expect("store");

        let delta = ItemDelta {
            owner: OwnerId(1),
            updated: vec![item(1, 1).with_tier(2)],
            created: vec![item(5, 1)],
            removed: vec![ItemId(2)],
        };
        repo.commit(&delta).expect("commit");

        let reopened = FileItemRepository::new(dir.path()).expect("reopen");
        let items = reopened.load_owner(OwnerId(1)).expect("load");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tier, 2);
        assert_eq!(items[1].id, ItemId(5));
        assert_eq!(reopened.max_item_id().expect("max"), Some(ItemId(5)));
        assert!(reopened.load_owner(OwnerId(2)).expect("empty").is_empty());
    }

    #[test]
    fn tampered_file_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileItemRepository::new(dir.path()).expect("repo");
        repo.store(OwnerId(3), &[item(1, 3)]).expect("store");

        let path = dir.path().join("owner_3.bin");
        let mut bytes = fs::read(&path).expect("read");
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, bytes).expect("write");

        let err = repo.load_owner(OwnerId(3)).expect_err("corrupted");
        assert!(matches!(err, RepositoryError::CorruptedData(_)));
    }

    #[test]
    fn stale_delta_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileItemRepository::new(dir.path()).expect("repo");
        repo.store(OwnerId(1), &[item(1, 1), item(2, 1)])
            .expect("store");

        let spend = ItemDelta {
            owner: OwnerId(1),
            updated: vec![item(1, 1).with_tier(1)],
            created: Vec::new(),
            removed: vec![ItemId(2)],
        };
        repo.commit(&spend).expect("first spend");

        let again = ItemDelta {
            updated: vec![item(1, 1).with_tier(2)],
            ..spend
        };
        let err = repo.commit(&again).expect_err("second spend");
        assert!(matches!(err, RepositoryError::MissingItem(ItemId(2))));

        let items = repo.load_owner(OwnerId(1)).expect("load");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tier, 1);
    }
}
