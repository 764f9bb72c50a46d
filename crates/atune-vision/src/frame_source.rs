//! Decoded frame sources.
//!
//! A `FrameSource` yields frames in strictly increasing index order and
//! reports end-of-stream with `Ok(None)`. Opening an unreadable resource or
//! a decoder that exits with an error fails fast; nothing here retries.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{VisionError, VisionResult};
use crate::probe::{probe_video, VideoInfo};

/// One decoded RGB24 video frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Zero-based index within the video
    pub index: u64,
    /// Seconds since the start of the video
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
    /// Packed RGB24 pixels (may be empty for synthetic frames)
    pub data: Vec<u8>,
}

impl Frame {
    /// Frame without pixel data, for synthetic sources.
    pub fn blank(index: u64, fps: f64, width: u32, height: u32) -> Self {
        Self {
            index,
            timestamp: frame_timestamp(index, fps),
            width,
            height,
            data: Vec::new(),
        }
    }
}

/// Timestamp of a frame at a constant frame rate.
pub fn frame_timestamp(index: u64, fps: f64) -> f64 {
    if fps > 0.0 {
        index as f64 / fps
    } else {
        0.0
    }
}

/// Source of decoded frames.
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame, or `None` at end of stream.
    async fn next_frame(&mut self) -> VisionResult<Option<Frame>>;

    /// Frame rate used for timestamps.
    fn fps(&self) -> f64;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Frames decoded by an FFmpeg child process writing raw RGB24 to a pipe.
pub struct FfmpegFrameSource {
    child: Child,
    reader: BufReader<ChildStdout>,
    /// Collects FFmpeg's stderr so the pipe never fills
    stderr: Option<JoinHandle<String>>,
    width: u32,
    height: u32,
    frame_bytes: usize,
    fps: f64,
    next_index: u64,
    finished: bool,
}

impl FfmpegFrameSource {
    /// Open a video file.
    ///
    /// `fallback_fps` is used when the container does not report a frame rate.
    pub async fn open(path: impl AsRef<Path>, fallback_fps: f64) -> VisionResult<Self> {
        let path = path.as_ref();
        let info = probe_video(path).await?;

        which::which("ffmpeg").map_err(|_| VisionError::FfmpegNotFound)?;

        let fps = if info.fps > 0.0 { info.fps } else { fallback_fps };

        let mut command = Command::new("ffmpeg");
        command
            .args(["-hide_banner", "-loglevel", "error", "-nostdin", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"]);

        let source = Self::spawn(command, &info, fps)?;

        info!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            fps,
            frames = ?info.frame_count,
            "Opened video"
        );

        Ok(source)
    }

    /// Start a decoder that writes RGB24 frames of `info`'s size to stdout.
    fn spawn(mut command: Command, info: &VideoInfo, fps: f64) -> VisionResult<Self> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VisionError::ffmpeg_failed(format!("Failed to spawn FFmpeg: {}", e), None))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VisionError::ffmpeg_failed("Failed to capture FFmpeg stdout", None))?;

        let stderr = child.stderr.take().map(|mut pipe| {
            tokio::spawn(async move {
                let mut output = String::new();
                if let Err(e) = pipe.read_to_string(&mut output).await {
                    warn!("Failed to read FFmpeg stderr: {}", e);
                }
                output
            })
        });

        Ok(Self {
            child,
            reader: BufReader::new(stdout),
            stderr,
            width: info.width,
            height: info.height,
            frame_bytes: info.frame_bytes(),
            fps,
            next_index: 0,
            finished: false,
        })
    }

    /// Reap the decoder once its output ends; a failed exit is an error.
    async fn finish(&mut self) -> VisionResult<()> {
        self.finished = true;

        let status = self.child.wait().await.map_err(|e| {
            VisionError::ffmpeg_failed(format!("FFmpeg process error: {}", e), None)
        })?;

        let stderr = match self.stderr.take() {
            Some(handle) => handle.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            let stderr = stderr.trim();
            return Err(VisionError::ffmpeg_failed(
                format!("FFmpeg exited with status {:?}", status.code()),
                (!stderr.is_empty()).then(|| stderr.to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FrameSource for FfmpegFrameSource {
    async fn next_frame(&mut self) -> VisionResult<Option<Frame>> {
        if self.finished {
            return Ok(None);
        }

        let mut data = vec![0u8; self.frame_bytes];
        match self.reader.read_exact(&mut data).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                debug!(frames = self.next_index, "FFmpeg stream ended");
                self.finish().await?;
                return Ok(None);
            }
            Err(e) => {
                self.finished = true;
                return Err(e.into());
            }
        }

        let index = self.next_index;
        self.next_index += 1;

        Ok(Some(Frame {
            index,
            timestamp: frame_timestamp(index, self.fps),
            width: self.width,
            height: self.height,
            data,
        }))
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}

/// Frames held in memory.
pub struct MemoryFrameSource {
    frames: VecDeque<Frame>,
    fps: f64,
    last_index: Option<u64>,
}

impl MemoryFrameSource {
    /// Create a source from frames.
    ///
    /// Frames are yielded in the given order; out-of-order indices are
    /// reported as errors when reached.
    pub fn new(fps: f64, frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            fps,
            last_index: None,
        }
    }

    /// `count` blank frames numbered from zero.
    pub fn blank(count: u64, fps: f64, width: u32, height: u32) -> Self {
        let frames = (0..count)
            .map(|i| Frame::blank(i, fps, width, height))
            .collect();
        Self::new(fps, frames)
    }

    /// Frames not yet read.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl FrameSource for MemoryFrameSource {
    async fn next_frame(&mut self) -> VisionResult<Option<Frame>> {
        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };

        if let Some(previous) = self.last_index {
            if frame.index <= previous {
                return Err(VisionError::OutOfOrderFrame {
                    previous,
                    received: frame.index,
                });
            }
        }
        self.last_index = Some(frame.index);

        Ok(Some(frame))
    }

    fn fps(&self) -> f64 {
        self.fps
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
