use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::capture::CaptureSession;
use crate::config::{Config, ROLE_OUTLINES, ROLE_TV};
use crate::content::{FeedContent, ImageContent, SnapshotContent};
use crate::core::{Clock, Countdown, Interval};
use crate::graph::{NodeId, SceneGraph};
use crate::loaders::load_gltf_scene;
use crate::locate::{locate, MatchResult};
use crate::outline::decorate_outlines;
use crate::retexture::Retexturer;
use crate::screen::{place_screen, ScreenError, ScreenPlane};
use crate::traits::{ContentSource, Pixels, ScreenRenderer, ScreenUpdate};

/// How often the loop polls its timers
const LOOP_SLEEP: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub model: PathBuf,
    pub image: Option<PathBuf>,
    pub snapshot_url: Option<String>,
    pub strip_dir: Option<PathBuf>,
}

/// Ties the pieces together: loads the room, locates the surfaces, keeps
/// the screen textured and the capture buffers fed.
///
/// Everything runs on one cooperative loop; the capture tick and the
/// refresh tick are independent timers touching disjoint state, so their
/// relative order per iteration does not matter.
pub struct App<R: ScreenRenderer> {
    config: Config,
    renderer: R,
    graph: SceneGraph,
    matches: MatchResult,
    screen: Option<ScreenPlane>,
    live: Box<dyn ContentSource>,
    session: CaptureSession,
    retexturer: Retexturer,
    strip_dir: Option<PathBuf>,
}

impl<R: ScreenRenderer> App<R> {
    /// Loads the model, resolves surface roles, decorates the furniture,
    /// and binds the initial still image if one was given.
    pub fn new(options: AppOptions, config: Config, mut renderer: R) -> Result<Self> {
        let mut graph = load_gltf_scene(&options.model)?;

        renderer.setup(&config.camera, &config.lights);

        let matches = locate(&graph, graph.root(), &config.roles);

        let outline_targets = matches.all(ROLE_OUTLINES);
        if !outline_targets.is_empty() {
            let overlays = decorate_outlines(&mut graph, outline_targets);
            info!("Outlined {} furniture meshes", overlays.len());
        }

        if matches.single(ROLE_TV).is_none() {
            // Not an error: the room just has no screen to project onto
            warn!("No TV surface matched; projection disabled");
        }

        let live: Box<dyn ContentSource> = match &options.snapshot_url {
            Some(url) => Box::new(SnapshotContent::new(url.clone())),
            None => Box::new(FeedContent::new()),
        };

        if let Some(dir) = &options.strip_dir {
            std::fs::create_dir_all(dir)
                .context(format!("Failed to create strip directory: {:?}", dir))?;
        }

        let mut app = Self {
            config,
            renderer,
            graph,
            matches,
            screen: None,
            live,
            session: CaptureSession::new(),
            retexturer: Retexturer::new(),
            strip_dir: options.strip_dir,
        };

        if let Some(path) = &options.image {
            let mut still = ImageContent::open(path)
                .context(format!("Failed to load initial image: {:?}", path))?;
            match still.snapshot() {
                Ok(pixels) => app.try_bind(&pixels),
                Err(e) => warn!("Initial image unavailable: {}", e),
            }
        }

        app.renderer.present_scene(&app.graph);
        Ok(app)
    }

    /// Runs the cooperative loop until `duration` elapses (forever when
    /// absent). Capture and refresh cadences come from the config.
    pub fn run(&mut self, duration: Option<f32>) -> Result<()> {
        let timing = self.config.timing.clone();
        let mut clock = Clock::new();
        let mut capture_timer = Interval::from_millis(timing.capture_interval_ms);
        let mut refresh_timer = Interval::from_millis(timing.refresh_interval_ms);
        let mut first_refresh = Countdown::from_millis(timing.first_refresh_delay_ms);

        info!(
            "Running: capture every {}ms, refresh every {}ms (first after {}ms)",
            timing.capture_interval_ms, timing.refresh_interval_ms, timing.first_refresh_delay_ms
        );

        loop {
            let delta = clock.tick();

            if capture_timer.tick(delta) {
                self.capture_tick();
            }

            // Both timers must advance every iteration
            let first = first_refresh.tick(delta);
            let repeat = refresh_timer.tick(delta);
            if first || repeat {
                self.refresh_screen();
            }

            if let Some(limit) = duration {
                if clock.elapsed() >= limit {
                    info!("Run complete after {:.1}s", clock.elapsed());
                    break;
                }
            }

            thread::sleep(LOOP_SLEEP);
        }

        Ok(())
    }

    /// One capture tick: best effort, a miss leaves the buffers untouched
    fn capture_tick(&mut self) {
        match self.session.capture(&mut *self.live) {
            Ok(()) => {
                if let Some(frame) = self.session.delayed_frame() {
                    debug!(
                        "Time-shifted frame available, captured at {}",
                        frame.taken_at
                    );
                }
                self.spill_strip();
            }
            Err(e) => warn!("Capture skipped: {}", e),
        }
    }

    /// One refresh tick: fetch live content and rebind the screen.
    ///
    /// The ticket taken before the fetch makes this idempotent under
    /// overlap: if a newer refresh starts while this one is loading, the
    /// stale result is discarded instead of clobbering the screen.
    fn refresh_screen(&mut self) {
        let Some(_tv) = self.matches.single(ROLE_TV) else {
            debug!("Refresh skipped: no TV surface");
            return;
        };

        let ticket = self.retexturer.begin();

        let pixels = match self.live.snapshot() {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!("Refresh skipped: {}", e);
                return;
            }
        };

        if !self.retexturer.is_current(ticket) {
            debug!("Discarding stale refresh");
            return;
        }

        info!("Re-texturing screen from live content");
        self.try_bind(&pixels);
    }

    /// Fits the screen plane to `pixels` and hands both to the renderer.
    /// Skips quietly when no TV was located; logs fit failures.
    fn try_bind(&mut self, pixels: &Pixels) {
        let Some(tv) = self.matches.single(ROLE_TV) else {
            return;
        };

        if let Err(e) = self.bind_content(tv, pixels) {
            warn!("Screen bind failed: {}", e);
        }
    }

    fn bind_content(&mut self, tv: NodeId, pixels: &Pixels) -> Result<(), ScreenError> {
        let dims = (pixels.width, pixels.height);

        if let Some(screen) = &mut self.screen {
            screen.refit(&mut self.graph, dims)?;
        } else {
            self.screen = Some(place_screen(&mut self.graph, tv, dims)?);
        }

        if let Some(screen) = &self.screen {
            self.renderer.update_screen(&ScreenUpdate {
                position: screen.position,
                rect: screen.rect,
                pixels,
            });
        }

        Ok(())
    }

    /// Writes the filmstrip (and the delayed frame, once available) to disk
    fn spill_strip(&self) {
        let Some(dir) = &self.strip_dir else {
            return;
        };

        for (i, frame) in self.session.recent_frames().enumerate() {
            let path = dir.join(format!("strip_{:02}.png", i));
            if let Err(e) = std::fs::write(&path, &frame.png) {
                warn!("Failed to write {:?}: {}", path, e);
                return;
            }
        }

        if let Some(frame) = self.session.delayed_frame() {
            let path = dir.join("delayed.png");
            if let Err(e) = std::fs::write(&path, &frame.png) {
                warn!("Failed to write {:?}: {}", path, e);
            }
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn matches(&self) -> &MatchResult {
        &self.matches
    }

    pub fn screen(&self) -> Option<&ScreenPlane> {
        self.screen.as_ref()
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }
}
