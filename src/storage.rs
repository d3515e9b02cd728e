//! 凭据存储
//!
//! 布局与浏览器 LocalStorage 中的两个键一致：
//! - `adminToken`: bearer token 字符串
//! - `adminUser`: JSON 序列化后的管理员档案
//!
//! 两个键总是一起写入、一起清除，读取方不会看到半写的状态。

use crate::error::StoreError;
use gemadmin_shared::AdminProfile;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "adminToken";
pub const PROFILE_KEY: &str = "adminUser";

/// 已登录会话的凭据
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub token: String,
    pub profile: AdminProfile,
}

pub trait CredentialStore {
    /// 空字符串视为没有 token
    fn token(&self) -> Option<String>;
    fn profile(&self) -> Option<AdminProfile>;
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;

    fn load(&self) -> Option<Credential> {
        Some(Credential {
            token: self.token()?,
            profile: self.profile()?,
        })
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

// =========================================================
// 键值布局辅助
// =========================================================

type Entries = HashMap<String, String>;

fn token_of(entries: &Entries) -> Option<String> {
    entries
        .get(TOKEN_KEY)
        .filter(|t| !t.is_empty())
        .cloned()
}

fn profile_of(entries: &Entries) -> Option<AdminProfile> {
    let raw = entries.get(PROFILE_KEY)?;
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(error = %e, "stored admin profile is not valid JSON, ignoring");
            None
        }
    }
}

fn entries_of(credential: &Credential) -> Result<Entries, StoreError> {
    let mut entries = Entries::new();
    entries.insert(TOKEN_KEY.to_string(), credential.token.clone());
    entries.insert(
        PROFILE_KEY.to_string(),
        serde_json::to_string(&credential.profile)?,
    );
    Ok(entries)
}

// =========================================================
// 内存实现
// =========================================================

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RefCell<Entries>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: &Credential) -> Result<Self, StoreError> {
        let store = Self::new();
        store.save(credential)?;
        Ok(store)
    }

    /// 直接写入原始键值，模拟被外部修改的存储
    pub fn set_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        token_of(&self.entries.borrow())
    }

    fn profile(&self) -> Option<AdminProfile> {
        profile_of(&self.entries.borrow())
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let entries = entries_of(credential)?;
        *self.entries.borrow_mut() = entries;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

// =========================================================
// 文件实现
// =========================================================

/// 以单个 JSON 文件持久化凭据，每次读取都重新读盘
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.config/gemadmin/credentials.json`
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("gemadmin")
                .join("credentials.json"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Entries {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read credential file");
                return Entries::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file is corrupt, treating as signed out");
                Entries::new()
            }
        }
    }

    /// 先写临时文件再 rename，整体替换；文件只对当前用户可读写
    fn write(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = create_private(&tmp)?;
        file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "credential file written");
        Ok(())
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode 只作用于新建文件，残留的临时文件需要显式收紧
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        token_of(&self.read())
    }

    fn profile(&self) -> Option<AdminProfile> {
        profile_of(&self.read())
    }

    fn load(&self) -> Option<Credential> {
        // 一次读盘同时取出两个键
        let entries = self.read();
        Some(Credential {
            token: token_of(&entries)?,
            profile: profile_of(&entries)?,
        })
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        self.write(&entries_of(credential)?)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write(&Entries::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemadmin_shared::RecordId;

    fn credential(token: &str) -> Credential {
        Credential {
            token: token.to_string(),
            profile: AdminProfile {
                admin_id: RecordId::from(7_i64),
                fullname: "Ada Admin".to_string(),
                email: "ada@shop.test".to_string(),
                role: "super_admin".to_string(),
            },
        }
    }

    fn exercise(store: &dyn CredentialStore) {
        assert_eq!(store.token(), None);
        assert_eq!(store.load(), None);
        assert!(!store.is_authenticated());

        store.save(&credential("abc")).unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.load(), Some(credential("abc")));

        store.save(&credential("def")).unwrap();
        assert_eq!(store.load(), Some(credential("def")));

        store.clear().unwrap();
        assert_eq!(store.token(), None);
        assert_eq!(store.profile(), None);
    }

    #[test]
    fn memory_store_lifecycle() {
        exercise(&MemoryCredentialStore::new());
    }

    #[test]
    fn file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");
        exercise(&FileCredentialStore::new(&path));
        assert!(path.exists());
    }

    #[test]
    fn empty_token_is_absent() {
        let store = MemoryCredentialStore::new();
        store.set_raw(TOKEN_KEY, "");
        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn file_layout_matches_browser_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(&path);
        store.save(&credential("abc")).unwrap();

        let raw: HashMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(TOKEN_KEY).map(String::as_str), Some("abc"));
        let profile: serde_json::Value = serde_json::from_str(&raw[PROFILE_KEY]).unwrap();
        assert_eq!(profile["email"], "ada@shop.test");
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let mut stale = path.clone().into_os_string();
        stale.push(".tmp");
        fs::write(&stale, "{}").unwrap();
        fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

        FileCredentialStore::new(&path).save(&credential("abc")).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn file_store_is_shared_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let writer = FileCredentialStore::new(&path);
        let reader = FileCredentialStore::new(&path);

        writer.save(&credential("abc")).unwrap();
        assert_eq!(reader.token().as_deref(), Some("abc"));
        writer.clear().unwrap();
        assert_eq!(reader.token(), None);
    }

    #[test]
    fn corrupt_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.token(), None);
        store.save(&credential("abc")).unwrap();
        assert_eq!(store.token().as_deref(), Some("abc"));
    }

    #[test]
    fn corrupt_profile_keeps_token() {
        let store = MemoryCredentialStore::new();
        store.set_raw(TOKEN_KEY, "abc");
        store.set_raw(PROFILE_KEY, "[object Object]");
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.profile(), None);
        assert_eq!(store.load(), None);
    }
}
