//! Headless rendering
//!
//! Draws an episode into an RGBA [`Frame`] without any display backend.
//! Rendering only reads simulation state.

pub mod frame;
pub mod shapes;

pub use frame::{Frame, Rgba, colors};

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::error::Result;
use crate::sim::EpisodeState;

/// Thickness of the ground line in pixels
const GROUND_LINE: u32 = 2;
/// Score glyph scale and position
const SCORE_SCALE: u32 = 3;
const SCORE_ORIGIN: (i64, i64) = (10, 10);

/// Draw the episode: background, ground line, dino, obstacles, score
pub fn render(state: &EpisodeState, config: &GameConfig) -> Frame {
    let width = config.screen_width.max(1.0) as u32;
    let height = config.screen_height.max(1.0) as u32;
    let mut frame = Frame::new(width, height, colors::BACKGROUND);

    shapes::hline(&mut frame, config.ground_height, GROUND_LINE, colors::GROUND);
    shapes::fill_rect(&mut frame, &state.dino.rect(config), colors::DINO);
    for obstacle in &state.obstacles {
        shapes::fill_rect(&mut frame, &obstacle.rect(), colors::OBSTACLE);
    }

    shapes::number(
        &mut frame,
        state.score as u64,
        SCORE_ORIGIN.0,
        SCORE_ORIGIN.1,
        SCORE_SCALE,
        colors::SCORE,
    );

    frame
}

/// Accumulates rendered frames for an external encoder
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
    capacity: usize,
    /// Intended playback rate
    pub fps: u32,
}

impl FrameRecorder {
    /// Default playback rate for replays
    pub const DEFAULT_FPS: u32 = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity.min(1024)),
            capacity,
            fps: Self::DEFAULT_FPS,
        }
    }

    /// Store a frame. Returns false (and drops it) once full.
    pub fn push(&mut self, frame: Frame) -> bool {
        if self.is_full() {
            return false;
        }
        self.frames.push(frame);
        true
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Total RGBA payload held
    pub fn total_bytes(&self) -> usize {
        self.frames.iter().map(|f| f.as_bytes().len()).sum()
    }

    /// Write every frame as packed RGB (`frame_00000.rgb`, ...) into `dir`,
    /// creating it if needed. Returns the written paths in frame order.
    /// Files are headerless `width * height * 3` buffers (rgb24 raw video).
    pub fn write_raw(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut paths = Vec::with_capacity(self.frames.len());
        for (i, frame) in self.frames.iter().enumerate() {
            let path = dir.join(format!("frame_{i:05}.rgb"));
            fs::write(&path, frame.to_rgb())?;
            paths.push(path);
        }
        log::info!(
            "Wrote {} frames ({}x{} RGB) to {}",
            paths.len(),
            self.frames.first().map_or(0, |f| f.width),
            self.frames.first().map_or(0, |f| f.height),
            dir.display()
        );
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    fn episode(config: &GameConfig) -> EpisodeState {
        EpisodeState::new(
            config,
            vec![
                Obstacle::ground(300.0, config, 5.0),
                Obstacle::flying(500.0, 100.0, config, 6.0, 1.0),
                Obstacle::ground(900.0, config, 7.0),
            ],
        )
    }

    #[test]
    fn test_render_layout() {
        let config = GameConfig::default();
        let frame = render(&episode(&config), &config);
        assert_eq!((frame.width, frame.height), (800, 400));
        assert_eq!(frame.as_bytes().len(), 800 * 400 * 4);

        // Dino box at (50, 260) 40x40
        assert_eq!(frame.pixel(50, 260), Some(colors::DINO));
        assert_eq!(frame.pixel(89, 299), Some(colors::DINO));
        assert_eq!(frame.pixel(95, 270), Some(colors::BACKGROUND));

        // Ground line spans the width
        assert_eq!(frame.pixel(700, 300), Some(colors::GROUND));
        assert_eq!(frame.pixel(700, 350), Some(colors::BACKGROUND));

        // Ground obstacle at x=300 and flying obstacle at (500, 100)
        assert_eq!(frame.pixel(310, 280), Some(colors::OBSTACLE));
        assert_eq!(frame.pixel(510, 120), Some(colors::OBSTACLE));
        assert_eq!(frame.pixel(510, 160), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_render_score_digits() {
        let config = GameConfig::default();
        let mut state = episode(&config);
        state.score = 8.4;
        let frame = render(&state, &config);
        // "8": top-left pixel of the glyph is set
        assert_eq!(frame.pixel(10, 10), Some(colors::SCORE));
        // Middle column of the second row is hollow
        assert_eq!(frame.pixel(13, 13), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_recorder_capacity() {
        let mut recorder = FrameRecorder::new(2);
        let frame = Frame::new(2, 2, colors::BACKGROUND);
        assert!(recorder.push(frame.clone()));
        assert!(recorder.push(frame.clone()));
        assert!(!recorder.push(frame));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.total_bytes(), 2 * 2 * 2 * 4);
        assert_eq!(recorder.fps, FrameRecorder::DEFAULT_FPS);
    }

    #[test]
    fn test_write_raw_frames() {
        let dir = std::env::temp_dir().join(format!("dino_env_frames_{}", std::process::id()));
        let mut recorder = FrameRecorder::new(3);
        let mut frame = Frame::new(2, 1, colors::BACKGROUND);
        recorder.push(frame.clone());
        frame.put(0, 0, colors::DINO);
        recorder.push(frame);

        let paths = recorder.write_raw(&dir).unwrap();
        let first = std::fs::read(&paths[0]).unwrap();
        let second = std::fs::read(&paths[1]).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("frame_00001.rgb"));
        assert_eq!(first, vec![0, 0, 255, 0, 0, 255]);
        assert_eq!(second, vec![0, 0, 0, 0, 0, 255]);
    }
}
