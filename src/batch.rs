//! Fills an image directory with one rendered pattern per index.

use crate::error::{Error, Result};
use crate::pattern::{generate_seeded, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, GrayImage};
use log::{error, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "ui/public/images";
pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_START: u32 = 71;
pub const DEFAULT_END: u32 = 170;

/// Multiplier from image index to generator seed
pub const SEED_STRIDE: u64 = 1000;

const PROGRESS_EVERY: u64 = 10;

pub fn seed_for(index: u32) -> u64 {
    index as u64 * SEED_STRIDE
}

pub fn file_name(index: u32) -> String {
    format!("abstract-{index}.jpg")
}

/// Destination for rendered images, addressed by index
pub trait ImageSink {
    fn exists(&self, index: u32) -> bool;
    fn store(&mut self, index: u32, image: &GrayImage) -> Result<()>;
}

/// Writes `abstract-{index}.jpg` files into one directory
#[derive(Debug, Clone)]
pub struct JpegDirSink {
    dir: PathBuf,
    quality: u8,
}

impl JpegDirSink {
    /// Creates the directory (and parents) if needed
    pub fn create(dir: impl Into<PathBuf>, quality: u8) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JpegDirSink { dir, quality })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: u32) -> PathBuf {
        self.dir.join(file_name(index))
    }

    fn write_jpeg(&self, path: &Path, image: &GrayImage) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        JpegEncoder::new_with_quality(&mut writer, self.quality).encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::L8,
        )?;
        writer.flush()?;
        Ok(())
    }
}

impl ImageSink for JpegDirSink {
    fn exists(&self, index: u32) -> bool {
        self.path_for(index).is_file()
    }

    /// Writes to `abstract-{index}.jpg.part` first; the final name only ever
    /// holds a complete image.
    fn store(&mut self, index: u32, image: &GrayImage) -> Result<()> {
        let path = self.path_for(index);
        let partial = path.with_extension("jpg.part");
        let written = self
            .write_jpeg(&partial, image)
            .and_then(|()| fs::rename(&partial, &path).map_err(Error::from));
        if written.is_err() {
            let _ = fs::remove_file(&partial);
        }
        written
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// First index, inclusive
    pub start: u32,
    /// Last index, inclusive
    pub end: u32,
    pub out_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl BatchConfig {
    pub fn new(start: u32, end: u32) -> Self {
        BatchConfig {
            start,
            end,
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quality: DEFAULT_QUALITY,
        }
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::Config(format!(
                "JPEG quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    pub fn total(&self) -> u64 {
        (self.end as u64 + 1).saturating_sub(self.start as u64)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig::new(DEFAULT_START, DEFAULT_END)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: u64,
    pub generated: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl BatchReport {
    /// At least one image was produced by this run
    pub fn success(&self) -> bool {
        self.generated > 0
    }
}

/// Render the configured range into a JPEG directory.
///
/// Failing to create the directory is fatal; failures on single images are
/// logged and counted.
pub fn run(config: &BatchConfig) -> Result<BatchReport> {
    config.validate()?;
    let mut sink = JpegDirSink::create(&config.out_dir, config.quality)?;
    let shown = fs::canonicalize(sink.dir()).unwrap_or_else(|_| sink.dir().to_path_buf());
    info!("Saving to: {}", shown.display());
    run_with_sink(config, &mut sink)
}

pub fn run_with_sink<S: ImageSink + ?Sized>(
    config: &BatchConfig,
    sink: &mut S,
) -> Result<BatchReport> {
    config.validate()?;
    let mut report = BatchReport {
        total: config.total(),
        ..Default::default()
    };
    info!("Generating {} abstract B&W images...", report.total);

    for index in config.start..=config.end {
        let name = file_name(index);
        if sink.exists(index) {
            info!("  {name} already exists, skipping...");
            report.skipped += 1;
            continue;
        }

        match render_one(config, index, sink) {
            Ok(()) => {
                info!("  {name} ✓");
                report.generated += 1;
            }
            Err(e) => {
                error!("  {name} ✗ Error: {e}");
                report.failed += 1;
            }
        }

        if let Some(done) = progress_due(config, index) {
            info!("  Progress: {done}/{} images", report.total);
        }
    }

    info!(
        "Generated {} images ({} skipped, {} failed): {} through {}",
        report.generated,
        report.skipped,
        report.failed,
        file_name(config.start),
        file_name(config.end)
    );
    Ok(report)
}

/// Position of `index` in the range when it lands on a progress boundary
fn progress_due(config: &BatchConfig, index: u32) -> Option<u64> {
    let done = (index - config.start) as u64 + 1;
    (done % PROGRESS_EVERY == 0).then_some(done)
}

fn render_one<S: ImageSink + ?Sized>(
    config: &BatchConfig,
    index: u32,
    sink: &mut S,
) -> Result<()> {
    let canvas = generate_seeded(config.width, config.height, Some(seed_for(index)));
    sink.store(index, canvas.image())
}
