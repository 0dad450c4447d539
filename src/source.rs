//! Catalog sources and the background loader.
//!
//! A source is a local JSON file, an `http(s)` URL, or stdin. Loading runs on a
//! background thread and delivers a single result over an mpsc channel, which
//! the event loop polls without blocking.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::catalog::{parse_catalog, Catalog, LoadError};

/// Default catalog file, matching the static export layout.
pub const DEFAULT_SOURCE: &str = "texture_list.json";

/// Network timeout for URL sources.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the raw catalog JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
    Stdin,
}

impl CatalogSource {
    /// Interpret a command-line argument: `-` is stdin, `http(s)://` a URL,
    /// anything else a file path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            CatalogSource::Stdin
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            CatalogSource::Url(arg.to_string())
        } else {
            CatalogSource::File(PathBuf::from(arg))
        }
    }

    /// Location that catalog paths are relative to.
    ///
    /// For a file this is its directory, for a URL everything up to the last
    /// `/`. Stdin has no natural base.
    pub fn asset_base(&self) -> Option<String> {
        match self {
            CatalogSource::File(path) => {
                let dir = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();
                if dir.as_os_str().is_empty() {
                    Some(".".to_string())
                } else {
                    Some(dir.to_string_lossy().into_owned())
                }
            }
            CatalogSource::Url(url) => {
                let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
                match url[scheme_end..].rfind('/') {
                    Some(idx) => Some(url[..scheme_end + idx].to_string()),
                    None => Some(url.clone()),
                }
            }
            CatalogSource::Stdin => None,
        }
    }

    /// Whether the source can be read again. Stdin is drained by the first load.
    pub fn is_reloadable(&self) -> bool {
        !matches!(self, CatalogSource::Stdin)
    }

    /// Read the raw JSON payload (blocking).
    pub fn read_raw(&self) -> Result<String, LoadError> {
        match self {
            CatalogSource::File(path) => fs::read_to_string(path).map_err(|e| LoadError::Io {
                path: path.display().to_string(),
                source: e,
            }),
            CatalogSource::Url(url) => {
                let agent = ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build();
                let response = agent
                    .get(url)
                    .set("User-Agent", "texture-explorer")
                    .set("Accept", "application/json")
                    .call()
                    .map_err(|e| LoadError::Fetch {
                        url: url.clone(),
                        message: e.to_string(),
                    })?;
                response.into_string().map_err(|e| LoadError::Fetch {
                    url: url.clone(),
                    message: e.to_string(),
                })
            }
            CatalogSource::Stdin => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .map_err(|e| LoadError::Io {
                        path: "<stdin>".to_string(),
                        source: e,
                    })?;
                Ok(input)
            }
        }
    }

    /// Read and parse the catalog (blocking).
    pub fn load(&self) -> Result<Catalog, LoadError> {
        let raw = self.read_raw()?;
        parse_catalog(&raw)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
            CatalogSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Single in-flight catalog load running on a background thread.
///
/// The source offers no cancellation: once spawned, the load runs to
/// completion. Dropping the loader detaches a thread that is still busy.
pub struct CatalogLoader {
    receiver: Receiver<Result<Catalog, LoadError>>,
    thread_handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl CatalogLoader {
    /// Start loading `source` in the background.
    pub fn spawn(source: CatalogSource) -> Self {
        let (sender, receiver) = mpsc::channel();

        let thread_handle = thread::spawn(move || {
            log::info!("Loading catalog from {}", source);
            let result = source.load();
            // Receiver gone means the app already quit
            let _ = sender.send(result);
        });

        Self {
            receiver,
            thread_handle: Some(thread_handle),
            finished: false,
        }
    }

    /// Take the load result if it has arrived, without blocking.
    ///
    /// Returns `Some` exactly once. A loader thread that died without sending
    /// is reported as an I/O failure.
    pub fn try_finish(&mut self) -> Option<Result<Catalog, LoadError>> {
        if self.finished {
            return None;
        }

        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Io {
                path: "<loader>".to_string(),
                source: io::Error::other("catalog loader stopped"),
            }),
        };

        self.finished = true;
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        Some(result)
    }

    /// Block until the load completes.
    pub fn wait(mut self) -> Result<Catalog, LoadError> {
        self.finished = true;
        let result = self.receiver.recv().unwrap_or_else(|_| {
            Err(LoadError::Io {
                path: "<loader>".to_string(),
                source: io::Error::other("catalog loader stopped"),
            })
        });
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        result
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for CatalogLoader {
    fn drop(&mut self) {
        // Only join a thread that is already done; a stalled fetch must not
        // hold up quitting.
        if let Some(handle) = self.thread_handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_kinds() {
        assert_eq!(CatalogSource::parse("-"), CatalogSource::Stdin);
        assert_eq!(
            CatalogSource::parse("https://example.com/texture_list.json"),
            CatalogSource::Url("https://example.com/texture_list.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("assets/texture_list.json"),
            CatalogSource::File(PathBuf::from("assets/texture_list.json"))
        );
    }

    #[test]
    fn test_stdin_is_not_reloadable() {
        assert!(!CatalogSource::Stdin.is_reloadable());
        assert!(CatalogSource::parse("texture_list.json").is_reloadable());
        assert!(CatalogSource::parse("https://example.com/texture_list.json").is_reloadable());
    }

    #[test]
    fn test_asset_base() {
        assert_eq!(
            CatalogSource::parse("assets/texture_list.json").asset_base(),
            Some("assets".to_string())
        );
        assert_eq!(
            CatalogSource::parse("texture_list.json").asset_base(),
            Some(".".to_string())
        );
        assert_eq!(
            CatalogSource::parse("https://example.com/site/texture_list.json").asset_base(),
            Some("https://example.com/site".to_string())
        );
        assert_eq!(
            CatalogSource::parse("https://example.com").asset_base(),
            Some("https://example.com".to_string())
        );
        assert_eq!(CatalogSource::Stdin.asset_base(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/texture_list.json"));
        assert!(matches!(source.load(), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_loader_delivers_once() {
        let path = std::env::temp_dir().join(format!(
            "texture_explorer_loader_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"["a/x.png", "b/y.png"]"#).unwrap();

        let mut loader = CatalogLoader::spawn(CatalogSource::File(path.clone()));
        let result = loop {
            if let Some(result) = loader.try_finish() {
                break result;
            }
            thread::sleep(Duration::from_millis(5));
        };

        assert_eq!(result.expect("load should succeed").len(), 2);
        assert!(loader.is_finished());
        assert!(loader.try_finish().is_none());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_loader_wait_reports_failure() {
        let loader = CatalogLoader::spawn(CatalogSource::File(PathBuf::from(
            "/nonexistent/texture_list.json",
        )));
        assert!(loader.wait().is_err());
    }
}
