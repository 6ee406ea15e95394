use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{ColorImage, Vec2};

use crate::animation::AnimationState;
use crate::error::ViewerError;
use crate::files::{self, ImageEntry};
use crate::loader::{DecodedImage, LoadPipeline, LoadResult, RequestError};
use crate::navigation::{Navigation, Removal};
use crate::triage::{Disposal, FsDisposal, TriageTarget};
use crate::view::{DisplayMode, DisplayState, ZoomDirection};

pub const APP_TITLE: &str = "Hiyoko Viewer";
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Normalized user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    First,
    Last,
    ToggleFit,
    ToggleShuffle,
    /// `pointer` is relative to the viewport's top-left corner.
    Zoom {
        direction: ZoomDirection,
        pointer: Vec2,
    },
    ZoomActualSize {
        pointer: Vec2,
    },
    Pan(Vec2),
    Scroll(Vec2),
    Triage(TriageTarget),
    Delete,
    TogglePlayback,
    StepFrame,
    Open(PathBuf),
}

/// What the central view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Image,
    Failed(String),
    /// Every entry of the folder was moved or deleted.
    Empty,
}

/// Redraw hint returned by [`Controller::poll`] and [`Controller::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    None,
    /// A load finished, the texture has to be rebuilt from scratch.
    ImageChanged,
    /// Same image, another animation frame.
    FrameChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    EnterFullscreen,
    ExitFullscreen { maximized: bool },
}

/// Fullscreen flag plus the maximized state to restore on exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct Presentation {
    fullscreen: bool,
    restore_maximized: bool,
}

impl Presentation {
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle(&mut self, currently_maximized: bool) -> WindowChange {
        if self.fullscreen {
            self.fullscreen = false;
            WindowChange::ExitFullscreen {
                maximized: self.restore_maximized,
            }
        } else {
            self.fullscreen = true;
            self.restore_maximized = currently_maximized;
            WindowChange::EnterFullscreen
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    expires_at: Instant,
}

pub struct Controller<D: Disposal = FsDisposal> {
    navigation: Navigation,
    pipeline: LoadPipeline,
    display: DisplayState,
    animation: Option<AnimationState>,
    image: Option<DecodedImage>,
    image_path: Option<PathBuf>,
    screen: Screen,
    status: Option<StatusMessage>,
    pending_open: Option<PathBuf>,
    presentation: Presentation,
    fatal: Option<ViewerError>,
    disposal: D,
}

impl Controller<FsDisposal> {
    pub fn new<F>(notify: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        Self::with_disposal(LoadPipeline::spawn(notify), FsDisposal)
    }
}

impl<D: Disposal> Controller<D> {
    pub fn with_disposal(pipeline: LoadPipeline, disposal: D) -> Self {
        Self {
            navigation: Navigation::default(),
            pipeline,
            display: DisplayState::default(),
            animation: None,
            image: None,
            image_path: None,
            screen: Screen::Welcome,
            status: None,
            pending_open: None,
            presentation: Presentation::default(),
            fatal: None,
            disposal,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pipeline.is_loading()
    }

    #[cfg(test)]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn image(&self) -> Option<(&Path, &DecodedImage)> {
        Some((self.image_path.as_deref()?, self.image.as_ref()?))
    }

    pub fn fatal_error(&self) -> Option<&ViewerError> {
        self.fatal.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.presentation.is_fullscreen()
    }

    /// Frame that should be on screen right now.
    pub fn visible_frame(&self) -> Option<&Arc<ColorImage>> {
        let frame = self.animation.as_ref().map_or(0, AnimationState::frame);
        self.image.as_ref()?.frame(frame)
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.display.set_viewport(size);
    }

    pub fn status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| now < status.expires_at)
            .map(|status| status.text.as_str())
    }

    pub fn set_status(&mut self, text: impl Into<String>, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: now + STATUS_TIMEOUT,
        });
    }

    pub fn title(&self) -> String {
        let Some(entry) = self.navigation.current() else {
            return APP_TITLE.to_string();
        };
        let index = self.navigation.index().unwrap_or(0) + 1;
        let shuffle = if self.navigation.is_shuffled() {
            " [shuffle]"
        } else {
            ""
        };
        format!(
            "{} ({}/{}){} - {}",
            entry.file_name(),
            index,
            self.navigation.len(),
            shuffle,
            APP_TITLE
        )
    }

    /// Returns `false` when the command changed nothing. Every command is
    /// refused while a load is in flight; open requests are kept and run
    /// once it completes.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        if self.pipeline.is_loading() {
            if let Command::Open(path) = command {
                if let Some(loading) = self.pipeline.in_flight() {
                    log::debug!(
                        "Deferring open of {} until {} is loaded",
                        path.display(),
                        loading.display()
                    );
                }
                self.pending_open = Some(path);
            }
            return false;
        }

        match command {
            Command::Next => self.navigate(Navigation::next),
            Command::Prev => self.navigate(Navigation::prev),
            Command::First => self.navigate(Navigation::first),
            Command::Last => self.navigate(Navigation::last),
            Command::ToggleShuffle => {
                let mut rng = rand::rng();
                let Some(entry) = self.navigation.toggle_shuffle(&mut rng).cloned() else {
                    return false;
                };
                let state = if self.navigation.is_shuffled() {
                    "on"
                } else {
                    "off"
                };
                self.set_status(format!("Shuffle {state}"), now);
                self.request(&entry);
                true
            }
            Command::ToggleFit => {
                if self.image.is_none() {
                    return false;
                }
                self.display.toggle_fit();
                true
            }
            Command::Zoom { direction, pointer } => self.display.zoom_step(direction, pointer),
            Command::ZoomActualSize { pointer } => {
                if self.display.mode() == DisplayMode::Fit {
                    self.display.toggle_fit();
                    true
                } else {
                    self.display.zoom_to(1.0, pointer)
                }
            }
            Command::Pan(delta) => self.display.pan(delta),
            Command::Scroll(delta) => self.display.scroll_by(delta),
            Command::Triage(target) => self.triage(target, now),
            Command::Delete => self.delete(now),
            Command::TogglePlayback => match self.animation.as_mut() {
                Some(animation) => {
                    animation.toggle_playback(now);
                    true
                }
                None => false,
            },
            Command::StepFrame => match self.animation.as_mut() {
                Some(animation) => {
                    animation.step();
                    true
                }
                None => false,
            },
            Command::Open(path) => {
                self.open(&path, now);
                true
            }
        }
    }

    /// Refused while loading, like every other command.
    pub fn toggle_fullscreen(&mut self, currently_maximized: bool) -> Option<WindowChange> {
        if self.pipeline.is_loading() {
            return None;
        }
        Some(self.presentation.toggle(currently_maximized))
    }

    fn navigate(&mut self, step: fn(&mut Navigation) -> Option<&ImageEntry>) -> bool {
        let Some(entry) = step(&mut self.navigation).cloned() else {
            return false;
        };
        self.request(&entry);
        true
    }

    fn open(&mut self, path: &Path, now: Instant) {
        match files::resolve(path) {
            Ok(set) => {
                self.navigation.set_list(set.entries, set.start_index);
                if let Some(entry) = self.navigation.current().cloned() {
                    self.request(&entry);
                }
            }
            Err(err) => {
                log::warn!("{err}");
                self.navigation.set_list(Vec::new(), 0);
                self.show_failure(path);
                self.set_status(err.to_string(), now);
            }
        }
    }

    fn request(&mut self, entry: &ImageEntry) {
        match self.pipeline.request(entry.path().to_path_buf()) {
            Ok(()) => {}
            Err(RequestError::Busy) => {
                log::debug!("Ignoring load of {} while busy", entry.path().display());
            }
            Err(RequestError::WorkerLost) => {
                log::error!("Image decode worker is gone");
                self.fatal = Some(ViewerError::WorkerLost);
            }
        }
    }

    fn triage(&mut self, target: TriageTarget, now: Instant) -> bool {
        let Some(entry) = self.navigation.current().cloned() else {
            return false;
        };
        match self.disposal.move_into(entry.path(), target.folder()) {
            Ok(_) => {
                let message = format!("Moved {} to {}", entry.file_name(), target.folder());
                self.set_status(message, now);
                self.after_removal();
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err.to_string(), now);
            }
        }
        true
    }

    fn delete(&mut self, now: Instant) -> bool {
        let Some(entry) = self.navigation.current().cloned() else {
            return false;
        };
        match self.disposal.trash(entry.path()) {
            Ok(()) => {
                self.set_status(format!("Moved {} to trash", entry.file_name()), now);
                self.after_removal();
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err.to_string(), now);
            }
        }
        true
    }

    fn after_removal(&mut self) {
        match self.navigation.remove_current() {
            Some(Removal::Reload(entry)) => self.request(&entry),
            Some(Removal::Empty) => {
                self.image = None;
                self.image_path = None;
                self.animation = None;
                self.display.clear();
                self.screen = Screen::Empty;
            }
            None => {}
        }
    }

    /// Drains the load pipeline. Runs on the interaction thread.
    pub fn poll(&mut self, now: Instant) -> Update {
        let result = match self.pipeline.poll() {
            Ok(Some(result)) => result,
            Ok(None) => return Update::None,
            Err(err) => {
                if self.fatal.is_none() {
                    log::error!("{err}");
                    self.fatal = Some(err);
                }
                return Update::None;
            }
        };

        self.apply_result(result, now);
        if let Some(path) = self.pending_open.take() {
            self.open(&path, now);
        }
        Update::ImageChanged
    }

    fn apply_result(&mut self, result: LoadResult, now: Instant) {
        let LoadResult { path, outcome } = result;
        match outcome {
            Ok(image) => {
                log::info!("Loaded {}", path.display());
                match &image {
                    DecodedImage::Static(_) => {
                        self.animation = None;
                        self.display.show_static(image.size());
                    }
                    DecodedImage::Animated(frames) => {
                        let delays = frames.iter().map(|frame| frame.delay).collect();
                        self.animation = Some(AnimationState::new(delays, now));
                        self.display.show_animated();
                        self.display.first_frame_ready(image.size());
                    }
                }
                self.image = Some(image);
                self.image_path = Some(path);
                self.screen = Screen::Image;
            }
            Err(err) => {
                log::warn!("{err}");
                self.show_failure(&path);
            }
        }
    }

    fn show_failure(&mut self, path: &Path) {
        self.image = None;
        self.image_path = None;
        self.animation = None;
        self.display.clear();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.screen = Screen::Failed(format!("Failed to load {name}"));
    }

    /// Advances a running animation.
    pub fn tick(&mut self, now: Instant) -> Update {
        match self.animation.as_mut().map(|animation| animation.tick(now)) {
            Some(true) => Update::FrameChanged,
            _ => Update::None,
        }
    }

    pub fn until_next_frame(&self, now: Instant) -> Option<Duration> {
        self.animation.as_ref()?.until_next_frame(now)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::thread;

    use super::*;
    use crate::error::FileAction;
    use crate::loader::fixtures::{write_gif, write_jpg, write_png};

    const WAIT: Duration = Duration::from_secs(10);

    fn settle<D: Disposal>(controller: &mut Controller<D>) -> Update {
        let deadline = Instant::now() + WAIT;
        while Instant::now() < deadline {
            let update = controller.poll(Instant::now());
            if !controller.is_loading() {
                return update;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load did not finish in time");
    }

    fn current_name<D: Disposal>(controller: &Controller<D>) -> Option<String> {
        controller.navigation().current().map(ImageEntry::file_name)
    }

    fn names<D: Disposal>(controller: &Controller<D>) -> Vec<String> {
        controller
            .navigation()
            .entries()
            .iter()
            .map(ImageEntry::file_name)
            .collect()
    }

    /// Trash stand-in that deletes the file, or fails on demand.
    #[derive(Default)]
    struct FakeTrash {
        fail: bool,
        trashed: RefCell<Vec<PathBuf>>,
    }

    impl Disposal for FakeTrash {
        fn move_into(&self, path: &Path, folder: &str) -> Result<PathBuf, ViewerError> {
            FsDisposal.move_into(path, folder)
        }

        fn trash(&self, path: &Path) -> Result<(), ViewerError> {
            if self.fail {
                return Err(ViewerError::file_op(path, FileAction::Trash, "in use"));
            }
            fs::remove_file(path)
                .map_err(|err| ViewerError::file_op(path, FileAction::Trash, err))?;
            self.trashed.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn controller_with(disposal: FakeTrash) -> Controller<FakeTrash> {
        Controller::with_disposal(LoadPipeline::spawn(|| {}), disposal)
    }

    #[test]
    fn open_next_and_accept_walkthrough() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(dir.path(), "a.png", 4, 4);
        let gif = write_gif(dir.path(), "b.gif", 3);
        write_jpg(dir.path(), "c.jpg", 6, 4);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        assert!(controller.dispatch(Command::Open(gif), now));
        assert_eq!(settle(&mut controller), Update::ImageChanged);
        assert_eq!(names(&controller), vec!["a.png", "b.gif", "c.jpg"]);
        assert_eq!(controller.navigation().index(), Some(1));
        let animation = controller.animation().expect("gif should animate");
        assert_eq!(animation.frame(), 0);
        assert!(animation.is_running());

        assert!(controller.dispatch(Command::Next, now));
        settle(&mut controller);
        assert_eq!(controller.navigation().index(), Some(2));
        assert!(controller.animation().is_none());
        assert_eq!(controller.screen(), &Screen::Image);
        assert!(controller.visible_frame().is_some());

        assert!(controller.dispatch(Command::Triage(TriageTarget::Accept), now));
        assert!(dir.path().join("_ok").join("c.jpg").is_file());
        assert!(!dir.path().join("c.jpg").exists());
        assert_eq!(names(&controller), vec!["a.png", "b.gif"]);
        assert_eq!(controller.navigation().index(), Some(0));
        assert!(controller.is_loading());
        settle(&mut controller);
        let (path, _) = controller.image().expect("a.png should be shown");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("a.png"));
    }

    #[test]
    fn commands_are_ignored_while_loading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write_png(dir.path(), "a.png", 4, 4);
        write_png(dir.path(), "b.png", 4, 4);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(first), now);
        assert!(controller.is_loading());

        assert!(!controller.dispatch(Command::Next, now));
        assert!(!controller.dispatch(Command::Prev, now));
        assert!(!controller.dispatch(Command::ToggleShuffle, now));
        assert!(!controller.dispatch(Command::Delete, now));
        assert!(!controller.dispatch(Command::Triage(TriageTarget::Reject), now));
        assert!(controller.toggle_fullscreen(false).is_none());
        assert_eq!(controller.navigation().index(), Some(0));
        assert!(!controller.navigation().is_shuffled());
        assert!(dir.path().join("a.png").exists());

        settle(&mut controller);
        assert!(controller.dispatch(Command::Next, now));
        assert_eq!(controller.navigation().index(), Some(1));
    }

    #[test]
    fn open_while_loading_runs_after_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write_png(dir.path(), "a.png", 4, 4);
        let other_dir = tempfile::tempdir().expect("tempdir");
        let second = write_png(other_dir.path(), "z.png", 4, 4);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(first), now);
        assert!(!controller.dispatch(Command::Open(second), now));

        settle(&mut controller);
        assert_eq!(current_name(&controller).as_deref(), Some("z.png"));
        settle(&mut controller);
        let (path, _) = controller.image().expect("z.png should be shown");
        assert!(path.ends_with("z.png"));
    }

    #[test]
    fn decode_failure_shows_placeholder_and_keeps_navigating() {
        let dir = tempfile::tempdir().expect("tempdir");
        let broken = dir.path().join("a.png");
        fs::write(&broken, b"definitely not a png").expect("should write");
        write_png(dir.path(), "b.png", 4, 4);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(broken), now);
        settle(&mut controller);
        assert_eq!(
            controller.screen(),
            &Screen::Failed("Failed to load a.png".to_string())
        );
        assert!(!controller.is_loading());
        assert!(controller.image().is_none());

        assert!(controller.dispatch(Command::Next, now));
        settle(&mut controller);
        assert_eq!(controller.screen(), &Screen::Image);
    }

    #[test]
    fn open_unknown_path_reports_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(dir.path().join("missing.png")), now);
        assert!(!controller.is_loading());
        assert!(matches!(controller.screen(), Screen::Failed(_)));
        assert!(controller.status(now).is_some());
        assert!(controller.navigation().is_empty());
    }

    #[test]
    fn failed_trash_leaves_list_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write_png(dir.path(), "a.png", 4, 4);
        write_png(dir.path(), "b.png", 4, 4);

        let mut controller = controller_with(FakeTrash {
            fail: true,
            ..FakeTrash::default()
        });
        let now = Instant::now();
        controller.dispatch(Command::Open(first), now);
        settle(&mut controller);

        controller.dispatch(Command::Delete, now);
        assert_eq!(names(&controller), vec!["a.png", "b.png"]);
        assert_eq!(controller.navigation().index(), Some(0));
        assert!(!controller.is_loading());
        let status = controller.status(now).expect("failure should be reported");
        assert!(status.contains("in use"));
        assert!(controller.status(now + STATUS_TIMEOUT).is_none());
    }

    #[test]
    fn deleting_last_entry_shows_empty_screen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let only = write_png(dir.path(), "only.png", 4, 4);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(only.clone()), now);
        settle(&mut controller);

        controller.dispatch(Command::Delete, now);
        assert_eq!(controller.screen(), &Screen::Empty);
        assert_eq!(controller.navigation().index(), None);
        assert!(controller.navigation().is_empty());
        assert!(controller.image().is_none());
        assert!(!controller.is_loading());
        assert_eq!(controller.disposal.trashed.borrow().as_slice(), &[only]);
        assert_eq!(controller.title(), APP_TITLE);
    }

    #[test]
    fn shuffle_round_trip_keeps_displayed_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            write_png(dir.path(), name, 2, 2);
        }
        let start = dir.path().join("c.png");

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(start), now);
        settle(&mut controller);

        assert!(controller.dispatch(Command::ToggleShuffle, now));
        assert!(controller.title().contains("[shuffle]"));
        settle(&mut controller);
        assert!(controller.dispatch(Command::ToggleShuffle, now));
        settle(&mut controller);
        assert_eq!(names(&controller), vec!["a.png", "b.png", "c.png", "d.png"]);
        assert_eq!(current_name(&controller).as_deref(), Some("c.png"));
    }

    #[test]
    fn animation_commands_only_apply_to_animations() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png = write_png(dir.path(), "a.png", 4, 4);
        write_gif(dir.path(), "b.gif", 3);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.dispatch(Command::Open(png), now);
        settle(&mut controller);
        assert!(!controller.dispatch(Command::TogglePlayback, now));
        assert!(!controller.dispatch(Command::StepFrame, now));

        controller.dispatch(Command::Next, now);
        settle(&mut controller);
        assert!(controller.dispatch(Command::StepFrame, now));
        let animation = controller.animation().expect("gif should animate");
        assert_eq!(animation.frame(), 1);
        assert!(!animation.is_running());
        assert!(controller.dispatch(Command::TogglePlayback, now));
        assert!(controller.animation().is_some_and(AnimationState::is_running));
    }

    #[test]
    fn tick_advances_running_animation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gif = write_gif(dir.path(), "b.gif", 3);

        let mut controller = controller_with(FakeTrash::default());
        controller.dispatch(Command::Open(gif), Instant::now());
        settle(&mut controller);
        let start = Instant::now();
        controller.dispatch(Command::TogglePlayback, start);
        controller.dispatch(Command::TogglePlayback, start);

        assert_eq!(controller.tick(start), Update::None);
        assert_eq!(
            controller.tick(start + Duration::from_millis(60)),
            Update::FrameChanged
        );
        assert_eq!(controller.animation().map(AnimationState::frame), Some(1));
        assert!(controller.until_next_frame(start + Duration::from_millis(60)).is_some());

        controller.dispatch(Command::TogglePlayback, start);
        assert_eq!(
            controller.tick(start + Duration::from_secs(5)),
            Update::None
        );
    }

    #[test]
    fn zoom_and_pan_follow_display_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png = write_png(dir.path(), "a.png", 400, 400);

        let mut controller = controller_with(FakeTrash::default());
        let now = Instant::now();
        controller.set_viewport(Vec2::new(200.0, 200.0));
        controller.dispatch(Command::Open(png), now);
        settle(&mut controller);

        assert_eq!(controller.display().mode(), DisplayMode::Fit);
        assert!(!controller.dispatch(Command::Pan(Vec2::new(-5.0, 0.0)), now));
        assert!(controller.dispatch(
            Command::Zoom {
                direction: ZoomDirection::In,
                pointer: Vec2::new(100.0, 100.0),
            },
            now
        ));
        assert_eq!(controller.display().mode(), DisplayMode::FreeZoom);
        assert!((controller.display().scale_factor() - 0.5 * 1.15).abs() < 1e-4);

        assert!(controller.dispatch(Command::ToggleFit, now));
        assert_eq!(controller.display().mode(), DisplayMode::Fit);
        assert!(controller.dispatch(Command::ToggleFit, now));
        assert!((controller.display().scale_factor() - 1.0).abs() < 1e-6);
        assert!(controller.dispatch(Command::Pan(Vec2::new(-5.0, -5.0)), now));
    }

    #[test]
    fn fullscreen_restores_prior_maximized_state() {
        let mut presentation = Presentation::default();
        assert_eq!(presentation.toggle(true), WindowChange::EnterFullscreen);
        assert!(presentation.is_fullscreen());
        assert_eq!(
            presentation.toggle(false),
            WindowChange::ExitFullscreen { maximized: true }
        );

        presentation.toggle(false);
        assert_eq!(
            presentation.toggle(true),
            WindowChange::ExitFullscreen { maximized: false }
        );
    }

    #[test]
    fn title_reflects_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(dir.path(), "a.png", 2, 2);
        let second = write_png(dir.path(), "b.png", 2, 2);

        let mut controller = controller_with(FakeTrash::default());
        assert_eq!(controller.title(), APP_TITLE);
        controller.dispatch(Command::Open(second), Instant::now());
        assert_eq!(controller.title(), format!("b.png (2/2) - {APP_TITLE}"));
    }
}
