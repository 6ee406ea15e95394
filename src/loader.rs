use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use eframe::egui::{Color32, ColorImage};
use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, DynamicImage, ImageReader};
use resvg::{tiny_skia, usvg};

use crate::error::ViewerError;

const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub image: Arc<ColorImage>,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub enum DecodedImage {
    Static(Arc<ColorImage>),
    Animated(Arc<[AnimationFrame]>),
}

impl DecodedImage {
    /// Natural size of the still image or of the first animation frame.
    pub fn size(&self) -> [usize; 2] {
        match self {
            DecodedImage::Static(image) => image.size,
            DecodedImage::Animated(frames) => {
                frames.first().map(|frame| frame.image.size).unwrap_or([0, 0])
            }
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            DecodedImage::Static(_) => 1,
            DecodedImage::Animated(frames) => frames.len(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, DecodedImage::Animated(_))
    }

    pub fn frame(&self, index: usize) -> Option<&Arc<ColorImage>> {
        match self {
            DecodedImage::Static(image) => (index == 0).then_some(image),
            DecodedImage::Animated(frames) => frames.get(index).map(|frame| &frame.image),
        }
    }
}

#[derive(Debug)]
pub struct LoadResult {
    pub path: PathBuf,
    pub outcome: std::result::Result<DecodedImage, ViewerError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Another request has not produced its result yet.
    Busy,
    WorkerLost,
}

/// Single long-lived decode worker. At most one request is outstanding;
/// results come back through a channel drained by [`LoadPipeline::poll`].
pub struct LoadPipeline {
    job_sender: Option<SyncSender<PathBuf>>,
    result_receiver: Receiver<LoadResult>,
    in_flight: Option<PathBuf>,
    worker: Option<JoinHandle<()>>,
}

impl LoadPipeline {
    /// `notify` runs on the worker after each result is queued, used to wake
    /// the UI loop.
    pub fn spawn<F>(notify: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let (job_sender, job_receiver) = mpsc::sync_channel::<PathBuf>(1);
        let (result_sender, result_receiver) = mpsc::sync_channel::<LoadResult>(1);

        let worker = thread::Builder::new()
            .name("image-decoder".to_string())
            .spawn(move || {
                for path in job_receiver {
                    let outcome =
                        decode_path(&path).map_err(|err| ViewerError::decode(&path, &err));
                    if let Err(err) = &outcome {
                        log::warn!("{err}");
                    }
                    if result_sender.send(LoadResult { path, outcome }).is_err() {
                        break;
                    }
                    notify();
                }
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Could not start image decoder thread: {err}");
                None
            }
        };

        Self {
            job_sender: Some(job_sender),
            result_receiver,
            in_flight: None,
            worker,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&Path> {
        self.in_flight.as_deref()
    }

    pub fn request(&mut self, path: PathBuf) -> Result<(), RequestError> {
        if self.in_flight.is_some() {
            return Err(RequestError::Busy);
        }
        let Some(sender) = self.job_sender.as_ref() else {
            return Err(RequestError::WorkerLost);
        };
        log::debug!("Requesting decode of {}", path.display());
        sender
            .send(path.clone())
            .map_err(|_| RequestError::WorkerLost)?;
        self.in_flight = Some(path);
        Ok(())
    }

    /// Non-blocking. Clears the in-flight marker when a result arrives.
    pub fn poll(&mut self) -> Result<Option<LoadResult>, ViewerError> {
        match self.result_receiver.try_recv() {
            Ok(result) => {
                self.in_flight = None;
                Ok(Some(result))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                Err(ViewerError::WorkerLost)
            }
        }
    }

    #[cfg(test)]
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadResult> {
        let result = self.result_receiver.recv_timeout(timeout).ok()?;
        self.in_flight = None;
        Some(result)
    }
}

impl Drop for LoadPipeline {
    fn drop(&mut self) {
        self.job_sender = None;
        while self.result_receiver.try_recv().is_ok() {}
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

pub fn decode_path(path: &Path) -> Result<DecodedImage> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "svg" | "svgz" => decode_svg(path).map(|image| DecodedImage::Static(Arc::new(image))),
        "gif" => {
            let decoder =
                GifDecoder::new(open_buffered(path)?).context("Invalid GIF header")?;
            collect_animation(decoder)
        }
        "webp" => {
            let decoder =
                WebPDecoder::new(open_buffered(path)?).context("Invalid WebP header")?;
            if decoder.has_animation() {
                collect_animation(decoder)
            } else {
                let image =
                    DynamicImage::from_decoder(decoder).context("Failed to decode WebP")?;
                Ok(DecodedImage::Static(Arc::new(to_color_image(image))))
            }
        }
        _ => decode_raster(path).map(|image| DecodedImage::Static(Arc::new(image))),
    }
}

fn open_buffered(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn decode_raster(path: &Path) -> Result<ColorImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Cannot open {}", path.display()))?
        .with_guessed_format()
        .context("Cannot read image header")?
        .decode()
        .context("Unsupported or corrupt image data")?;
    Ok(to_color_image(image))
}

fn collect_animation<'a, D: AnimationDecoder<'a>>(decoder: D) -> Result<DecodedImage> {
    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame.context("Failed to decode animation frame")?;
        let (numer, denom) = frame.delay().numer_denom_ms();
        let delay = if denom == 0 {
            MIN_FRAME_DELAY
        } else {
            Duration::from_micros(u64::from(numer) * 1000 / u64::from(denom)).max(MIN_FRAME_DELAY)
        };
        let image = to_color_image(DynamicImage::ImageRgba8(frame.into_buffer()));
        frames.push(AnimationFrame {
            image: Arc::new(image),
            delay,
        });
    }

    match frames.len() {
        0 => bail!("Animation has no frames"),
        1 => {
            let only = frames.remove(0);
            Ok(DecodedImage::Static(only.image))
        }
        _ => Ok(DecodedImage::Animated(frames.into())),
    }
}

fn decode_svg(path: &Path) -> Result<ColorImage> {
    let data = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    // `from_data` also accepts gzip-compressed input (svgz).
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .context("Failed to parse SVG")?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    if width == 0 || height == 0 {
        bail!("SVG has empty dimensions");
    }
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).context("Failed to allocate SVG pixmap")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(ColorImage::from_rgba_premultiplied(
        [width as usize, height as usize],
        pixmap.data(),
    ))
}

fn to_color_image(image: DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    if size[0] == 0 || size[1] == 0 {
        return ColorImage {
            size: [1, 1],
            pixels: vec![Color32::TRANSPARENT],
        };
    }
    ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())
}
