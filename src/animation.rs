//! Frame sequences
//!
//! Animation-level transforms rebuild the frame list, applying the matching
//! [`PixelBuffer`] transform to each frame and keeping every frame's duration.

use crate::color::ColorSpec;
use crate::config::AnimationConfig;
use crate::editor::{PixelBuffer, Positions};
use crate::error::EditorError;
use crate::frame::Frame;

/// Result of a per-frame mapping callback.
///
/// A bare [`PixelBuffer`] inherits the duration of the frame it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedFrame {
    Frame(Frame),
    Buffer(PixelBuffer),
}

impl MappedFrame {
    fn into_frame(self, duration: u32) -> Frame {
        match self {
            MappedFrame::Frame(frame) => frame,
            MappedFrame::Buffer(buffer) => Frame::new(buffer, duration),
        }
    }
}

impl From<Frame> for MappedFrame {
    fn from(frame: Frame) -> Self {
        MappedFrame::Frame(frame)
    }
}

impl From<PixelBuffer> for MappedFrame {
    fn from(buffer: PixelBuffer) -> Self {
        MappedFrame::Buffer(buffer)
    }
}

/// An ordered sequence of frames.
///
/// # Examples
///
/// ```
/// use pixelkit::animation::Animation;
/// use pixelkit::editor::PixelBuffer;
/// use pixelkit::frame::Frame;
///
/// let mut animation = Animation::new(vec![
///     Frame::new(PixelBuffer::new(2, 2), 10),
///     Frame::new(PixelBuffer::new(2, 2), 20),
/// ]);
/// animation.fill("red")?.scale(2.0);
/// assert_eq!(animation.duration(), 30);
/// assert_eq!(animation.get(1).map(|f| f.dimensions()), Some((4, 4)));
/// # Ok::<(), pixelkit::error::EditorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Build frames from bare buffers, each given the configured default duration.
    pub fn from_buffers(buffers: impl IntoIterator<Item = PixelBuffer>, config: &AnimationConfig) -> Self {
        buffers
            .into_iter()
            .map(|buffer| Frame::new(buffer, config.default_duration))
            .collect()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Frame> {
        self.frames.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: impl Into<Frame>) -> &mut Self {
        self.frames.push(frame.into());
        self
    }

    /// Total of all frame durations.
    pub fn duration(&self) -> u64 {
        self.frames.iter().map(|frame| u64::from(frame.duration())).sum()
    }

    /// Coordinates of the frame at `index`, in row-major order.
    pub fn positions(&self, index: usize) -> Option<Positions> {
        self.get(index).map(|frame| frame.positions())
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Replace every frame with `f(frame)`.
    pub fn map<F, R>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(Frame) -> R,
        R: Into<MappedFrame>,
    {
        let frames = std::mem::take(&mut self.frames);
        self.frames = frames
            .into_iter()
            .map(|frame| {
                let duration = frame.duration();
                f(frame).into().into_frame(duration)
            })
            .collect();
        self
    }

    /// Fallible [`map`](Self::map). Frames are handed out as copies, so on
    /// error the animation is left exactly as it was.
    pub fn try_map<F, R, E>(&mut self, mut f: F) -> Result<&mut Self, E>
    where
        F: FnMut(Frame) -> Result<R, E>,
        R: Into<MappedFrame>,
    {
        let mut mapped = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let duration = frame.duration();
            mapped.push(f(frame.clone())?.into().into_frame(duration));
        }
        self.frames = mapped;
        Ok(self)
    }

    pub fn resize_nearest(&mut self, width: u32, height: u32) -> &mut Self {
        self.map(|mut frame| {
            frame.resize_nearest(width, height);
            frame
        })
    }

    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.map(|mut frame| {
            frame.scale(factor);
            frame
        })
    }

    pub fn rotate(&mut self, degrees: f64, resize: bool) -> &mut Self {
        self.map(|mut frame| {
            frame.rotate(degrees, resize);
            frame
        })
    }

    pub fn flip_horizontal(&mut self) -> &mut Self {
        self.map(|mut frame| {
            frame.flip_horizontal();
            frame
        })
    }

    pub fn flip_vertical(&mut self) -> &mut Self {
        self.map(|mut frame| {
            frame.flip_vertical();
            frame
        })
    }

    pub fn fill(&mut self, value: impl Into<ColorSpec>) -> Result<&mut Self, EditorError> {
        let color = value.into().resolve()?;
        self.try_map(|mut frame| {
            frame.fill(color)?;
            Ok::<_, EditorError>(frame)
        })
    }

    pub fn fill_with<F, C>(&mut self, mut source: F) -> Result<&mut Self, EditorError>
    where
        F: FnMut(u32, u32) -> C,
        C: Into<ColorSpec>,
    {
        self.try_map(|mut frame| {
            frame.fill_with(&mut source)?;
            Ok::<_, EditorError>(frame)
        })
    }

    /// Play the frames backwards.
    pub fn reverse(&mut self) -> &mut Self {
        self.frames.reverse();
        self
    }

    /// Append the frames in reverse so playback bounces.
    ///
    /// `[A, B, C]` becomes `[A, B, C, C, B, A]`, or `[A, B, C, B]` with
    /// `exclude_ends` so the turnaround frames are not doubled.
    pub fn pingpong(&mut self, exclude_ends: bool) -> &mut Self {
        let len = self.frames.len();
        if len < 2 {
            return self;
        }
        let back: Vec<Frame> = if exclude_ends {
            self.frames[1..len - 1].iter().rev().cloned().collect()
        } else {
            self.frames.iter().rev().cloned().collect()
        };
        self.frames.extend(back);
        self
    }
}

impl FromIterator<Frame> for Animation {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Animation {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a Animation {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(durations: &[u32]) -> Animation {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| Frame::new(PixelBuffer::filled(2, 1, i as u32 + 1).unwrap(), d))
            .collect()
    }

    fn durations(animation: &Animation) -> Vec<u32> {
        animation.frames().iter().map(Frame::duration).collect()
    }

    #[test]
    fn test_duration_sums_frames() {
        assert_eq!(tagged(&[10, 20, 30]).duration(), 60);
        assert_eq!(Animation::default().duration(), 0);
    }

    #[test]
    fn test_map_buffer_inherits_duration() {
        let mut animation = tagged(&[10, 20, 30]);
        animation.map(|frame| {
            let mut buffer = frame.into_buffer();
            buffer.flip_horizontal();
            buffer
        });
        assert_eq!(durations(&animation), vec![10, 20, 30]);
        assert_eq!(animation.duration(), 60);
    }

    #[test]
    fn test_map_frame_keeps_its_own_duration() {
        let mut animation = tagged(&[10, 20]);
        animation.map(|frame| Frame::new(frame.into_buffer(), 5));
        assert_eq!(durations(&animation), vec![5, 5]);
    }

    #[test]
    fn test_try_map_failure_is_atomic() {
        let mut animation = tagged(&[10, 20, 30]);
        let before = animation.clone();
        let result = animation.try_map(|mut frame| {
            if frame.duration() == 20 {
                return Err("stop");
            }
            frame.flip_horizontal();
            Ok(frame)
        });
        assert_eq!(result.err(), Some("stop"));
        assert_eq!(animation, before);
    }

    #[test]
    fn test_fill_error_leaves_frames() {
        let mut animation = tagged(&[1, 2]);
        let before = animation.clone();
        assert!(animation.fill("notacolor").is_err());
        assert_eq!(animation, before);

        let mut calls = 0;
        let result = animation.fill_with(|_, _| {
            calls += 1;
            if calls > 3 { "bogus" } else { "red" }
        });
        assert!(result.is_err());
        assert_eq!(animation, before);
    }

    #[test]
    fn test_transform_wrappers() {
        let mut animation = tagged(&[10, 20]);
        animation.rotate(90.0, false).resize_nearest(4, 4).flip_vertical();
        assert!(animation.frames().iter().all(|f| f.dimensions() == (4, 4)));
        animation.fill("red").unwrap();
        assert!(animation.frames().iter().all(|f| f.pixels().all(|p| p == 0xFF0000FF)));
        assert_eq!(durations(&animation), vec![10, 20]);
    }

    #[test]
    fn test_positions() {
        let animation = tagged(&[1]);
        let positions: Vec<_> = animation.positions(0).unwrap().collect();
        assert_eq!(positions, vec![(0, 0), (1, 0)]);
        assert!(animation.positions(1).is_none());
    }

    #[test]
    fn test_from_buffers_uses_default_duration() {
        let config = AnimationConfig { default_duration: 100 };
        let animation = Animation::from_buffers(vec![PixelBuffer::new(1, 1); 3], &config);
        assert_eq!(animation.len(), 3);
        assert_eq!(animation.duration(), 300);
    }

    #[test]
    fn test_push() {
        let mut animation = Animation::default();
        assert!(animation.is_empty());
        animation.push(PixelBuffer::new(1, 1)).push(Frame::new(PixelBuffer::new(1, 1), 7));
        assert_eq!(durations(&animation), vec![0, 7]);
    }

    #[test]
    fn test_reverse() {
        let mut animation = tagged(&[1, 2, 3]);
        animation.reverse();
        assert_eq!(durations(&animation), vec![3, 2, 1]);
    }

    #[test]
    fn test_pingpong() {
        let mut full = tagged(&[1, 2, 3]);
        full.pingpong(false);
        assert_eq!(durations(&full), vec![1, 2, 3, 3, 2, 1]);

        let mut trimmed = tagged(&[1, 2, 3]);
        trimmed.pingpong(true);
        assert_eq!(durations(&trimmed), vec![1, 2, 3, 2]);

        let mut single = tagged(&[1]);
        single.pingpong(false);
        assert_eq!(single.len(), 1);
    }
}
