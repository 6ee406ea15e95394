use eframe::egui::{self, Pos2, Rect, Vec2};

pub const ZOOM_IN_FACTOR: f32 = 1.15;
pub const ZOOM_OUT_FACTOR: f32 = 1.0 / ZOOM_IN_FACTOR;
const MIN_SCALE: f32 = 0.01;
const MAX_SCALE: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Fit,
    FreeZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn factor(self) -> f32 {
        match self {
            ZoomDirection::In => ZOOM_IN_FACTOR,
            ZoomDirection::Out => ZOOM_OUT_FACTOR,
        }
    }
}

/// Scroll offset that keeps the document point under `pointer` in place when
/// the scale goes from `old_scale` to `new_scale`. Applied per axis.
pub fn anchored_scroll(scroll: Vec2, pointer: Vec2, old_scale: f32, new_scale: f32) -> Vec2 {
    (scroll + pointer) * (new_scale / old_scale) - pointer
}

/// Largest scale at which `image` fits entirely in `viewport`.
pub fn fit_scale(image: Vec2, viewport: Vec2) -> f32 {
    if image.x <= 0.0 || image.y <= 0.0 || viewport.x <= 0.0 || viewport.y <= 0.0 {
        return 1.0;
    }
    (viewport.x / image.x).min(viewport.y / image.y).max(MIN_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Content {
    None,
    Static(Vec2),
    /// Size stays unknown until the first frame is available.
    Animated { first_frame: Option<Vec2> },
}

/// Playback surface size for an animation in fit mode, computed once per
/// viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinnedSurface {
    viewport: Vec2,
    size: Vec2,
}

/// Display mode, zoom and scroll of the image view.
#[derive(Debug, Clone)]
pub struct DisplayState {
    mode: DisplayMode,
    scale_factor: f32,
    scroll: Vec2,
    viewport: Vec2,
    content: Content,
    pinned: Option<PinnedSurface>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Fit,
            scale_factor: 1.0,
            scroll: Vec2::ZERO,
            viewport: Vec2::ZERO,
            content: Content::None,
            pinned: None,
        }
    }
}

impl DisplayState {
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[cfg(test)]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Only meaningful in free-zoom mode.
    #[cfg(test)]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Resets zoom bookkeeping for a newly displayed still image. The display
    /// mode is kept.
    pub fn show_static(&mut self, size: [usize; 2]) {
        self.reset_zoom();
        self.content = Content::Static(egui::vec2(size[0] as f32, size[1] as f32));
    }

    /// Like [`Self::show_static`], but layout waits for
    /// [`Self::first_frame_ready`].
    pub fn show_animated(&mut self) {
        self.reset_zoom();
        self.content = Content::Animated { first_frame: None };
    }

    /// One-shot: later calls for the same animation are ignored.
    pub fn first_frame_ready(&mut self, size: [usize; 2]) -> bool {
        let Content::Animated { first_frame: None } = self.content else {
            return false;
        };
        self.content = Content::Animated {
            first_frame: Some(egui::vec2(size[0] as f32, size[1] as f32)),
        };
        self.repin();
        true
    }

    pub fn clear(&mut self) {
        self.reset_zoom();
        self.content = Content::None;
    }

    fn reset_zoom(&mut self) {
        self.scale_factor = 1.0;
        self.scroll = Vec2::ZERO;
        self.pinned = None;
    }

    pub fn is_layout_ready(&self) -> bool {
        self.natural_size().is_some()
    }

    fn natural_size(&self) -> Option<Vec2> {
        match self.content {
            Content::None => None,
            Content::Static(size) => Some(size),
            Content::Animated { first_frame } => first_frame,
        }
    }

    fn is_animated(&self) -> bool {
        matches!(self.content, Content::Animated { .. })
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if self.mode == DisplayMode::Fit {
            self.repin();
        }
        self.clamp_scroll();
    }

    fn repin(&mut self) {
        if !self.is_animated() || self.mode != DisplayMode::Fit {
            self.pinned = None;
            return;
        }
        let Some(natural) = self.natural_size() else {
            return;
        };
        if self.pinned.is_some_and(|pinned| pinned.viewport == self.viewport) {
            return;
        }
        self.pinned = Some(PinnedSurface {
            viewport: self.viewport,
            size: natural * fit_scale(natural, self.viewport),
        });
    }

    /// Scale at which the image is currently drawn.
    pub fn effective_scale(&self) -> Option<f32> {
        let natural = self.natural_size()?;
        match self.mode {
            DisplayMode::FreeZoom => Some(self.scale_factor),
            DisplayMode::Fit => match self.pinned {
                Some(pinned) if natural.x > 0.0 => Some(pinned.size.x / natural.x),
                _ => Some(fit_scale(natural, self.viewport)),
            },
        }
    }

    pub fn content_size(&self) -> Option<Vec2> {
        let natural = self.natural_size()?;
        match (self.mode, self.pinned) {
            (DisplayMode::Fit, Some(pinned)) => Some(pinned.size),
            _ => Some(natural * self.effective_scale()?),
        }
    }

    pub fn max_scroll(&self) -> Vec2 {
        self.content_size()
            .map(|content| (content - self.viewport).max(Vec2::ZERO))
            .unwrap_or(Vec2::ZERO)
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        self.scroll = self.scroll.clamp(Vec2::ZERO, max);
    }

    /// Where the image lands inside a viewport whose top-left is `origin`.
    /// Content smaller than the viewport is centred on that axis.
    pub fn image_rect(&self, origin: Pos2) -> Option<Rect> {
        let content = self.content_size()?;
        let slack = ((self.viewport - content) * 0.5).max(Vec2::ZERO);
        let min = origin + slack - self.scroll;
        Some(Rect::from_min_size(min, content))
    }

    /// Explicit mode flip. Entering free zoom this way starts at 100 %.
    pub fn toggle_fit(&mut self) {
        match self.mode {
            DisplayMode::Fit => {
                self.mode = DisplayMode::FreeZoom;
                self.scale_factor = 1.0;
                self.scroll = Vec2::ZERO;
                self.pinned = None;
            }
            DisplayMode::FreeZoom => {
                self.mode = DisplayMode::Fit;
                self.scroll = Vec2::ZERO;
                self.repin();
            }
        }
        self.clamp_scroll();
    }

    /// Zoom one step about `pointer` (viewport coordinates). A zoom gesture
    /// in fit mode first adopts the fit scale so the size does not jump.
    pub fn zoom_step(&mut self, direction: ZoomDirection, pointer: Vec2) -> bool {
        let Some(current) = self.effective_scale() else {
            return false;
        };
        if self.mode == DisplayMode::Fit {
            self.mode = DisplayMode::FreeZoom;
            self.scale_factor = current;
            self.pinned = None;
        }
        self.zoom_to(self.scale_factor * direction.factor(), pointer)
    }

    pub fn zoom_to(&mut self, scale: f32, pointer: Vec2) -> bool {
        if self.mode != DisplayMode::FreeZoom || !self.is_layout_ready() {
            return false;
        }
        let old = self.scale_factor;
        let new = scale.clamp(MIN_SCALE, MAX_SCALE);
        if (new - old).abs() <= f32::EPSILON {
            return false;
        }
        self.scale_factor = new;
        self.scroll = anchored_scroll(self.scroll, pointer, old, new);
        self.clamp_scroll();
        true
    }

    /// Drag panning, refused in fit mode.
    pub fn pan(&mut self, pointer_delta: Vec2) -> bool {
        if self.mode == DisplayMode::Fit {
            return false;
        }
        self.scroll_by(pointer_delta)
    }

    /// Moves the content by `delta` screen points (wheel or drag).
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        let before = self.scroll;
        self.scroll -= delta;
        self.clamp_scroll();
        self.scroll != before
    }

    pub fn zoom_percent(&self) -> Option<f32> {
        self.effective_scale().map(|scale| scale * 100.0)
    }
}
