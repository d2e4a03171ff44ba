//! Source archive download and extraction.
//!
//! Downloads are verified against a SHA-256 before being written and are
//! cached by file name. Extraction strips a single top-level directory so the
//! destination holds the project root directly.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use sha2::{Digest, Sha256};
use tar::Archive;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("fetch failed for {url}: {message}")]
  Http { url: String, message: String },

  #[error("hash mismatch for {url}: expected {expected}, got {actual}")]
  HashMismatch {
    url: String,
    expected: String,
    actual: String,
  },

  #[error("unsupported archive format: {0}")]
  UnsupportedArchive(String),

  #[error("zip error: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("extraction task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
  TarGz,
  Tar,
  Zip,
}

impl ArchiveKind {
  pub fn from_path(path: &Path) -> Option<Self> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
      Some(Self::TarGz)
    } else if name.ends_with(".tar") {
      Some(Self::Tar)
    } else if name.ends_with(".zip") {
      Some(Self::Zip)
    } else {
      None
    }
  }
}

/// Downloads `url` into `downloads_dir`, verifying its SHA-256.
///
/// `file://` URLs are read from the local filesystem. A previously
/// downloaded file with the expected hash is reused.
pub async fn download(url: &str, expected_sha256: &str, downloads_dir: &Path) -> Result<PathBuf, FetchError> {
  info!(url = %url, "fetching URL");

  tokio::fs::create_dir_all(downloads_dir).await?;
  let dest_path = downloads_dir.join(url_to_filename(url));

  if dest_path.exists() {
    debug!(path = ?dest_path, "checking cached file");
    if let Ok(actual_hash) = hash_file(&dest_path).await {
      if actual_hash.eq_ignore_ascii_case(expected_sha256) {
        info!(path = ?dest_path, "using cached file");
        return Ok(dest_path);
      }
      debug!(expected = %expected_sha256, actual = %actual_hash, "cached file hash mismatch, re-downloading");
    }
  }

  let bytes = match url.strip_prefix("file://") {
    Some(local) => tokio::fs::read(local).await?,
    None => fetch_bytes(url).await?,
  };

  let actual_hash = hash_bytes(&bytes);
  if !actual_hash.eq_ignore_ascii_case(expected_sha256) {
    return Err(FetchError::HashMismatch {
      url: url.to_string(),
      expected: expected_sha256.to_string(),
      actual: actual_hash,
    });
  }

  let mut file = tokio::fs::File::create(&dest_path).await?;
  file.write_all(&bytes).await?;
  file.flush().await?;

  info!(path = ?dest_path, size = bytes.len(), "download complete");
  Ok(dest_path)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
  let http_error = |e: reqwest::Error| FetchError::Http {
    url: url.to_string(),
    message: e.to_string(),
  };

  let response = reqwest::get(url).await.map_err(http_error)?;
  if !response.status().is_success() {
    return Err(FetchError::Http {
      url: url.to_string(),
      message: format!("HTTP {}", response.status()),
    });
  }
  Ok(response.bytes().await.map_err(http_error)?.to_vec())
}

/// Extracts `archive` into `dest`, replacing whatever `dest` held.
///
/// When the archive has exactly one top-level directory its contents land
/// directly in `dest`; otherwise the archive layout is kept as is.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<(), FetchError> {
  let kind =
    ArchiveKind::from_path(archive).ok_or_else(|| FetchError::UnsupportedArchive(archive.display().to_string()))?;

  let parent = dest.parent().unwrap_or(Path::new("."));
  fs::create_dir_all(parent)?;
  let staging = tempfile::Builder::new().prefix(".extract-").tempdir_in(parent)?;

  match kind {
    ArchiveKind::TarGz => {
      let decoder = GzDecoder::new(BufReader::new(File::open(archive)?));
      Archive::new(decoder).unpack(staging.path())?;
    }
    ArchiveKind::Tar => {
      Archive::new(BufReader::new(File::open(archive)?)).unpack(staging.path())?;
    }
    ArchiveKind::Zip => {
      zip::ZipArchive::new(BufReader::new(File::open(archive)?))?.extract(staging.path())?;
    }
  }

  let root = single_root(staging.path())?.unwrap_or_else(|| staging.path().to_path_buf());

  if dest.exists() {
    fs::remove_dir_all(dest)?;
  }
  fs::create_dir_all(dest)?;
  for entry in fs::read_dir(&root)? {
    let entry = entry?;
    fs::rename(entry.path(), dest.join(entry.file_name()))?;
  }

  info!(archive = ?archive, dest = ?dest, "unpacked");
  Ok(())
}

/// Async wrapper running [`extract_archive`] off the runtime's worker.
pub async fn extract_archive_async(archive: &Path, dest: &Path) -> Result<(), FetchError> {
  let (archive, dest) = (archive.to_path_buf(), dest.to_path_buf());
  tokio::task::spawn_blocking(move || extract_archive(&archive, &dest)).await?
}

/// The only entry of `dir`, if there is exactly one and it is a directory.
fn single_root(dir: &Path) -> Result<Option<PathBuf>, std::io::Error> {
  let entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
  match entries.as_slice() {
    [only] if only.file_type()?.is_dir() => Ok(Some(only.path())),
    _ => Ok(None),
  }
}

fn hash_bytes(bytes: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(bytes);
  hex::encode(hasher.finalize())
}

async fn hash_file(path: &Path) -> Result<String, std::io::Error> {
  let bytes = tokio::fs::read(path).await?;
  Ok(hash_bytes(&bytes))
}

/// Convert a URL to a safe filename.
///
/// Takes the last path component and sanitizes it. Falls back to hash of URL
/// if no suitable filename can be extracted.
fn url_to_filename(url: &str) -> String {
  if let Some(filename) = url.rsplit('/').next() {
    let filename = filename.split('?').next().unwrap_or(filename);

    let sanitized: String = filename
      .chars()
      .map(|c| {
        if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
          c
        } else {
          '_'
        }
      })
      .collect();

    if !sanitized.is_empty() && sanitized != "." && sanitized != ".." {
      return sanitized;
    }
  }

  format!("download_{}", &hash_bytes(url.as_bytes())[..16])
}
