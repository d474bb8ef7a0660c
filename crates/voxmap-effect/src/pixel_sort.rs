//! Chunked pixel sort.
//!
//! [`PixelSorter`] snapshots a frame and sorts its pixels by brightness a chunk at a time.
//! Each [`advance`](PixelSorter::advance) finalizes the next `min(budget, remaining)`
//! positions: the smallest remaining pixels are selected into place and sorted, the rest
//! stay in snapshot order. The visible result is the sorted prefix sweeping down the frame.
//!
//! Lifecycle: `Idle -> Running -> Done`. Calling [`start`](PixelSorter::start) again from any
//! phase discards the previous run.

use image::{Rgba, RgbaImage};

/// Pixels finalized per frame by the editor.
pub const DEFAULT_PIXELS_PER_FRAME: usize = 50_000;

/// Mean of the colour channels, alpha ignored.
pub fn brightness(px: &Rgba<u8>) -> f32 {
    sort_key(px) as f32 / 3.0
}

/// Channel sum; orders exactly like [`brightness`].
fn sort_key(px: &Rgba<u8>) -> u16 {
    px[0] as u16 + px[1] as u16 + px[2] as u16
}

/// Where a [`PixelSorter`] is in its run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EffectPhase {
    /// Nothing captured.
    #[default]
    Idle,
    /// Captured and partially sorted.
    Running,
    /// Every pixel is in its final position.
    Done,
}

/// Incremental brightness sort over a captured frame.
#[derive(Debug, Clone, Default)]
pub struct PixelSorter {
    width: u32,
    height: u32,
    original: Vec<Rgba<u8>>,
    working: Vec<Rgba<u8>>,
    cursor: usize,
    phase: EffectPhase,
}

impl PixelSorter {
    /// Creates an idle sorter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures `frame` and begins a new run.
    pub fn start(&mut self, frame: &RgbaImage) {
        self.width = frame.width();
        self.height = frame.height();
        self.original = frame.pixels().copied().collect();
        self.working = self.original.clone();
        self.cursor = 0;
        self.phase = if self.working.is_empty() {
            EffectPhase::Done
        } else {
            EffectPhase::Running
        };
        tracing::debug!(
            "pixel sort started: {}x{} ({} px)",
            self.width,
            self.height,
            self.working.len()
        );
    }

    /// Finalizes up to `budget` more pixels. Returns how many were finalized; zero once
    /// the run is done, when nothing is running, or when `budget` is zero.
    ///
    /// The unsorted tail is partitioned, not left in captured order: after each call it
    /// holds the same pixels, all at least as bright as the last finalized one, in
    /// unspecified order. This keeps every finalized prefix globally ascending.
    pub fn advance(&mut self, budget: usize) -> usize {
        if self.phase != EffectPhase::Running {
            return 0;
        }

        let remaining = self.working.len() - self.cursor;
        let chunk = budget.min(remaining);
        if chunk == 0 {
            return 0;
        }

        let rest = &mut self.working[self.cursor..];
        if chunk < rest.len() {
            rest.select_nth_unstable_by_key(chunk - 1, sort_key);
        }
        rest[..chunk].sort_unstable_by_key(sort_key);

        self.cursor += chunk;
        if self.cursor == self.working.len() {
            self.phase = EffectPhase::Done;
            tracing::debug!("pixel sort done");
        }
        chunk
    }

    /// Drops the captured frame and returns to idle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current phase.
    pub fn phase(&self) -> EffectPhase {
        self.phase
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.phase == EffectPhase::Running
    }

    /// Whether the last run completed.
    pub fn is_done(&self) -> bool {
        self.phase == EffectPhase::Done
    }

    /// Pixels in their final position.
    pub fn sorted_len(&self) -> usize {
        self.cursor
    }

    /// Pixels in the captured frame.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Whether no frame (or an empty one) is captured.
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Fraction finalized, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.working.is_empty() {
            return if self.is_done() { 1.0 } else { 0.0 };
        }
        self.cursor as f32 / self.working.len() as f32
    }

    /// Working pixels in row-major order.
    pub fn pixels(&self) -> &[Rgba<u8>] {
        &self.working
    }

    /// The frame as captured.
    pub fn original(&self) -> Option<RgbaImage> {
        self.to_image(&self.original)
    }

    /// The working buffer as an image, valid at any point of the run.
    pub fn render_current(&self) -> Option<RgbaImage> {
        self.to_image(&self.working)
    }

    fn to_image(&self, pixels: &[Rgba<u8>]) -> Option<RgbaImage> {
        if self.phase == EffectPhase::Idle {
            return None;
        }
        let raw = pixels.iter().flat_map(|p| p.0).collect();
        RgbaImage::from_raw(self.width, self.height, raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
