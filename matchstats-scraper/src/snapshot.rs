//! Offline sessions over a directory of saved pages.
//!
//! Each match page is read from `<dir>/<match_id>.html`; the listing page
//! from `<dir>/listing.html`. Useful for replaying a run without network
//! access and for debugging extraction against a saved page.

use std::path::{Path, PathBuf};

use matchstats_extract::text::match_id_from_identifier;

use crate::error::ScrapeError;
use crate::session::{PageSession, SessionProvider};

pub struct SnapshotProvider {
    dir: PathBuf,
}

impl SnapshotProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

pub struct SnapshotSession {
    dir: PathBuf,
}

impl SessionProvider for SnapshotProvider {
    type Session = SnapshotSession;

    async fn acquire(&self, worker: usize) -> Result<SnapshotSession, ScrapeError> {
        if !self.dir.is_dir() {
            return Err(ScrapeError::session(format!(
                "snapshot directory {} does not exist",
                self.dir.display()
            )));
        }
        log::debug!("Worker {} reading snapshots from {}", worker, self.dir.display());
        Ok(SnapshotSession {
            dir: self.dir.clone(),
        })
    }

    fn address(&self, identifier: &str) -> String {
        self.dir
            .join(format!("{}.html", match_id_from_identifier(identifier)))
            .to_string_lossy()
            .into_owned()
    }
}

impl SnapshotSession {
    fn read(path: &Path) -> Result<String, ScrapeError> {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ScrapeError::navigation(format!("no snapshot at {}", path.display()))
            }
            _ => ScrapeError::Io(e),
        })
    }
}

impl PageSession for SnapshotSession {
    async fn open(&mut self, address: &str) -> Result<String, ScrapeError> {
        Self::read(Path::new(address))
    }

    async fn listing(&mut self, _address: &str) -> Result<String, ScrapeError> {
        Self::read(&self.dir.join("listing.html"))
    }

    async fn release(self) {}
}
