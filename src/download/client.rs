use anyhow::{Context, Result};
use indicatif::HumanBytes;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::ui::Ui;

const LATEST_URL: &str = "https://developers.eveonline.com/static-data/tranquility/latest.jsonl";
const ZIP_URL: &str =
    "https://developers.eveonline.com/static-data/eve-online-static-data-latest-jsonl.zip";
const USER_AGENT: &str = concat!("eve-universe-seeder/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of the published build index
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdeInfo {
    #[serde(rename = "_key")]
    pub key: String,
    pub build_number: u64,
    pub release_date: String,
}

/// HTTP access to the published SDE export
pub struct SdeClient {
    http: Client,
}

impl SdeClient {
    /// The archive is large, so only connecting is time-limited
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http })
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!(url, "GET");
        self.http
            .get(url)
            .send()
            .and_then(Response::error_for_status)
            .with_context(|| format!("Request to {} failed", url))
    }

    pub fn fetch_latest_info(&self) -> Result<SdeInfo> {
        let index = self
            .get(LATEST_URL)?
            .text()
            .context("Failed to read build index")?;
        let info = parse_latest_info(&index)?;
        debug!(build = info.build_number, released = %info.release_date, "Latest SDE build");
        Ok(info)
    }

    /// Stream the export archive into `dest`, returning its size in bytes
    pub fn download_zip(&self, dest: &Path, ui: &mut impl Ui) -> Result<u64> {
        let mut response = self.get(ZIP_URL)?;
        let total = response.content_length().unwrap_or(0);
        let file = File::create(dest).with_context(|| format!("Failed to create {:?}", dest))?;

        let mut sink = ProgressWriter::new(BufWriter::new(file), total, ui);
        let bytes = io::copy(&mut response, &mut sink)
            .with_context(|| format!("Failed to download archive to {:?}", dest))?;
        sink.flush().context("Failed to write archive")?;
        drop(sink);

        ui.clear_progress();
        info!(bytes, path = ?dest, "Download complete");
        ui.log(format!("Downloaded {}", HumanBytes(bytes)));
        Ok(bytes)
    }
}

/// Writer that reports the running byte count after every write
struct ProgressWriter<'u, W, U> {
    inner: W,
    written: u64,
    total: u64,
    ui: &'u mut U,
}

impl<'u, W: Write, U: Ui> ProgressWriter<'u, W, U> {
    fn new(inner: W, total: u64, ui: &'u mut U) -> Self {
        Self {
            inner,
            written: 0,
            total,
            ui,
        }
    }
}

impl<W: Write, U: Ui> Write for ProgressWriter<'_, W, U> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        self.ui
            .set_progress(self.written, self.total, transfer_label(self.written, self.total));
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `"3.00 MiB / 10.00 MiB"`, or only the received size when the length is unknown
fn transfer_label(received: u64, total: u64) -> String {
    match total {
        0 => HumanBytes(received).to_string(),
        _ => format!("{} / {}", HumanBytes(received), HumanBytes(total)),
    }
}

/// The index is JSONL; the first non-blank line describes the current build
fn parse_latest_info(index: &str) -> Result<SdeInfo> {
    let line = index
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .context("Latest SDE info was empty")?;
    serde_json::from_str(line).context("Failed to parse SDE info")
}
