//! Artifact download with progress tracking
//!
//! Streams an artifact into a destination directory under the basename of
//! its URL path. There is no retry and no resume: a failed transfer fails
//! the run and a partial file is overwritten next time.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use nodeup_core::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::http::build_client;
use crate::platform::AssetReference;

/// Downloads artifacts over HTTP
pub struct Downloader {
    client: reqwest::Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_client()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            show_progress: true,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `asset` into `destination_dir`, returning the file path
    pub async fn download(
        &self,
        asset: &AssetReference,
        destination_dir: &Path,
    ) -> Result<PathBuf> {
        let url = asset.url.as_str();
        let file_name = asset
            .file_name()
            .ok_or_else(|| Error::download(url, "URL has no file name"))?;
        let file_path = destination_dir.join(&file_name);

        debug!("Downloading {} to {}", url, file_path.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let progress = self
            .show_progress
            .then(|| progress_bar(response.content_length(), &file_name));

        let mut file = File::create(&file_path).map_err(|e| not_saved(url, &file_path, e))?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::download(url, e.to_string()))?;
            file.write_all(&chunk)
                .map_err(|e| not_saved(url, &file_path, e))?;

            downloaded += chunk.len() as u64;
            if let Some(pb) = &progress {
                pb.set_position(downloaded);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if !file_path.is_file() {
            return Err(Error::download(
                url,
                format!(
                    "{} could not be saved to {}, make sure the directory is writable \
                     and you have internet connectivity",
                    url,
                    file_path.display()
                ),
            ));
        }

        debug!("Downloaded {} bytes", downloaded);
        Ok(file_path)
    }
}

fn not_saved(url: &str, file_path: &Path, e: std::io::Error) -> Error {
    Error::download(
        url,
        format!(
            "{} could not be saved to {}, make sure the directory is writable \
             and you have internet connectivity ({})",
            url,
            file_path.display(),
            e
        ),
    )
}

fn progress_bar(total: Option<u64>, file_name: &str) -> ProgressBar {
    let pb = match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::default_bar().template(concat!(
                "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] ",
                "{bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            )) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    pb.set_message(format!("Downloading {}", file_name));
    pb
}
