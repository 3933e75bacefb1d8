//! Persistence of the last selected circle count.
//!
//! The count is read once at startup and written whenever it changes. The
//! browser keeps it in a short-lived cookie; the CLI keeps it in a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::MAX_COUNT;
use crate::error::{CircleGridError, Result};

/// Name of the cookie holding the last count. Shared with the earlier
/// JavaScript page so a returning visitor keeps their count.
pub const COUNT_COOKIE: &str = "valor";

/// Cookie lifetime in days
pub const COUNT_COOKIE_DAYS: u32 = 1;

const SECONDS_PER_DAY: u64 = 86_400;

/// Key/value storage for the last selected count.
pub trait CountStore {
    /// Read the stored count. Missing or malformed values yield `Ok(None)`.
    fn load(&self) -> Result<Option<u32>>;

    /// Persist `count`.
    fn save(&mut self, count: u32) -> Result<()>;

    /// Stored count, or `default` when nothing usable is stored.
    fn load_or(&self, default: u32) -> u32 {
        match self.load() {
            Ok(Some(count)) => count,
            Ok(None) => default,
            Err(e) => {
                log::warn!("could not read stored count, using {default}: {e}");
                default
            }
        }
    }
}

/// In-process store, used by tests and as a fallback when no other
/// storage is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    count: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CountStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.count)
    }

    fn save(&mut self, count: u32) -> Result<()> {
        self.count = Some(count);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredState {
    count: u32,
}

/// JSON file store: `{ "count": 25 }`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CountStore for FileStore {
    fn load(&self) -> Result<Option<u32>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<StoredState>(&text) {
            Ok(state) if state.count <= MAX_COUNT => Ok(Some(state.count)),
            Ok(state) => {
                log::warn!("ignoring stored count {} above {MAX_COUNT}", state.count);
                Ok(None)
            }
            Err(e) => {
                log::warn!("ignoring malformed state file {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    fn save(&mut self, count: u32) -> Result<()> {
        let json = serde_json::to_string_pretty(&StoredState { count })?;
        std::fs::write(&self.path, json).map_err(|e| {
            CircleGridError::Store(format!("writing {}: {e}", self.path.display()))
        })
    }
}

/// Cookie assignment string for `document.cookie`.
#[must_use]
pub fn format_cookie(name: &str, value: &str, days: u32) -> String {
    let max_age = u64::from(days) * SECONDS_PER_DAY;
    format!("{name}={value}; max-age={max_age}; path=/")
}

/// Value of cookie `name` in a `document.cookie` string.
#[must_use]
pub fn read_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim_start().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_end())
}

/// Parse a count; anything but a plain integer in `0..=MAX_COUNT` is absent.
#[must_use]
pub fn parse_count(value: &str) -> Option<u32> {
    value
        .trim()
        .parse()
        .ok()
        .filter(|count| *count <= MAX_COUNT)
}

#[cfg(target_arch = "wasm32")]
pub use cookie::CookieStore;

#[cfg(target_arch = "wasm32")]
mod cookie {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    use super::{format_cookie, parse_count, read_cookie, CountStore, COUNT_COOKIE, COUNT_COOKIE_DAYS};
    use crate::error::{CircleGridError, Result};

    /// Browser cookie store.
    pub struct CookieStore {
        document: HtmlDocument,
    }

    impl CookieStore {
        /// Store bound to the current window's document.
        pub fn from_window() -> Result<Self> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or("No document available")?
                .dyn_into::<HtmlDocument>()
                .map_err(|_| "Document is not an HTML document")?;
            Ok(Self { document })
        }
    }

    impl CountStore for CookieStore {
        fn load(&self) -> Result<Option<u32>> {
            let cookies = self
                .document
                .cookie()
                .map_err(|_| CircleGridError::Store("cookies unavailable".to_string()))?;
            Ok(read_cookie(&cookies, COUNT_COOKIE).and_then(parse_count))
        }

        fn save(&mut self, count: u32) -> Result<()> {
            let cookie = format_cookie(COUNT_COOKIE, &count.to_string(), COUNT_COOKIE_DAYS);
            self.document
                .set_cookie(&cookie)
                .map_err(|_| CircleGridError::Store("cookie write rejected".to_string()))
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or(25), 25);
        store.save(7).unwrap();
        assert_eq!(store.load_or(25), 7);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = std::env::temp_dir().join(format!("circlegrid-missing-{}", std::process::id()));
        let store = FileStore::new(dir.join("nope.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_persists_count() {
        let path = std::env::temp_dir().join(format!("circlegrid-state-{}.json", std::process::id()));
        let mut store = FileStore::new(&path);
        store.save(42).unwrap();
        assert_eq!(FileStore::new(&path).load().unwrap(), Some(42));

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or(25), 25);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn cookie_format() {
        assert_eq!(
            format_cookie(COUNT_COOKIE, "12", COUNT_COOKIE_DAYS),
            "valor=12; max-age=86400; path=/"
        );
    }

    #[test]
    fn cookie_lookup() {
        let cookies = "theme=dark; valor=30; other=1";
        assert_eq!(read_cookie(cookies, COUNT_COOKIE), Some("30"));
        assert_eq!(read_cookie(cookies, "missing"), None);
        assert_eq!(read_cookie("", COUNT_COOKIE), None);
        // prefix of another name does not match
        assert_eq!(read_cookie("xvalor=1", COUNT_COOKIE), None);
    }

    #[test]
    fn stored_count_parsing() {
        assert_eq!(parse_count("25"), Some(25));
        assert_eq!(parse_count(" 8 "), Some(8));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("ten"), None);
    }

    #[test]
    fn stored_count_above_max_is_absent() {
        assert_eq!(parse_count(&MAX_COUNT.to_string()), Some(MAX_COUNT));
        assert_eq!(parse_count(&(MAX_COUNT + 1).to_string()), None);
        assert_eq!(parse_count("4294967295"), None);

        let cookies = format!("valor={}", u32::MAX);
        assert_eq!(read_cookie(&cookies, COUNT_COOKIE).and_then(parse_count), None);
    }

    #[test]
    fn file_store_ignores_count_above_max() {
        let path = std::env::temp_dir().join(format!("circlegrid-huge-{}.json", std::process::id()));
        std::fs::write(&path, format!(r#"{{"count": {}}}"#, u32::MAX)).unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or(25), 25);
        let _ = std::fs::remove_file(&path);
    }
}
