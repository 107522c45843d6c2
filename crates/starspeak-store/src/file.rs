use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use starspeak_core::store::{StoreError, WordStore, newest_first};
use starspeak_core::types::{LookupKey, UserId, WordEntry};
use tokio::fs;
use tokio::sync::Mutex;

/// On-disk shape of one user's words
#[derive(Default, Serialize, Deserialize)]
struct UserFile {
    #[serde(default)]
    words: BTreeMap<String, WordEntry>,
}

/// One JSON file per user under `root`
pub struct JsonFileWordStore {
    root: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

/// Map a user id to a file stem; injective so users never share a file
fn file_stem(user: &UserId) -> String {
    let mut stem = String::with_capacity(user.as_str().len());
    for byte in user.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("_{byte:02x}"));
        }
    }
    stem
}

impl JsonFileWordStore {
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        tracing::info!("Word store at {}", root.display());

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn user_path(&self, user: &UserId) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(user)))
    }

    async fn load(&self, user: &UserId) -> Result<UserFile, StoreError> {
        match fs::read_to_string(self.user_path(user)).await {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(UserFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &UserId, file: &UserFile) -> Result<(), StoreError> {
        let path = self.user_path(user);
        let tmp = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));

        fs::write(&tmp, serde_json::to_string_pretty(file)?).await?;
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WordStore for JsonFileWordStore {
    async fn get(&self, user: &UserId, key: &LookupKey) -> Result<Option<WordEntry>, StoreError> {
        let mut file = self.load(user).await?;
        Ok(file.words.remove(key.as_str()))
    }

    async fn upsert(&self, user: &UserId, key: &LookupKey, entry: &WordEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(user).await?;
        file.words.insert(key.to_string(), entry.clone());
        self.save(user, &file).await
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<WordEntry>, StoreError> {
        let file = self.load(user).await?;
        Ok(newest_first(file.words.into_values().collect(), limit))
    }

    async fn drill_words(&self, user: &UserId) -> Result<Vec<WordEntry>, StoreError> {
        let file = self.load(user).await?;
        let drills = file.words.into_values().filter(|e| e.in_drill).collect();
        Ok(newest_first(drills, usize::MAX))
    }

    async fn set_in_drill(&self, user: &UserId, key: &LookupKey, in_drill: bool) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(user).await?;

        let Some(entry) = file.words.get_mut(key.as_str()) else {
            return Ok(false);
        };
        entry.in_drill = in_drill;
        self.save(user, &file).await?;
        Ok(true)
    }

    async fn delete(&self, user: &UserId, key: &LookupKey) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(user).await?;

        if file.words.remove(key.as_str()).is_none() {
            return Ok(false);
        }
        self.save(user, &file).await?;
        Ok(true)
    }

    async fn len(&self, user: &UserId) -> Result<usize, StoreError> {
        Ok(self.load(user).await?.words.len())
    }
}
