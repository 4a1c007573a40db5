//! Frame-driven render loop
//!
//! The host owns scheduling (`requestAnimationFrame` in a browser, a plain
//! iterator in tests). Each scheduled callback calls [`RenderLoop::tick`]
//! exactly once and schedules the next callback only when told to continue.
use crate::backend::{ImageElement, Renderer};
use crate::clock::FrameClock;
use crate::overlay::Overlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Ticks handled while running
    pub ticks: u64,
    /// Ticks that reached the renderer (degenerate viewports are skipped)
    pub frames_rendered: u64,
    /// Shader clock, in seconds
    pub elapsed: f32,
}

/// Decides, after each tick, whether the loop should end.
pub type StopCondition = Box<dyn FnMut(&FrameStats) -> bool>;

pub struct RenderLoop {
    state: LoopState,
    clock: FrameClock,
    stats: FrameStats,
    stop_condition: StopCondition,
}

impl RenderLoop {
    /// A loop that runs until [`RenderLoop::stop`] is called.
    pub fn new() -> Self {
        Self::with_stop_condition(Box::new(|_: &FrameStats| false))
    }

    pub fn with_stop_condition(stop_condition: StopCondition) -> Self {
        Self {
            state: LoopState::Running,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            stop_condition,
        }
    }

    /// Stop after `frames` rendered frames.
    pub fn for_frames(frames: u64) -> Self {
        Self::with_stop_condition(Box::new(move |stats: &FrameStats| {
            stats.frames_rendered >= frames
        }))
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Advance the shader clock to `now_ms` and render one frame.
    ///
    /// Render errors are returned as-is; the loop stays in its current state.
    pub fn tick<I, R>(
        &mut self,
        now_ms: f64,
        overlay: &mut Overlay<I>,
        renderer: &mut R,
    ) -> Result<LoopControl, R::Error>
    where
        I: ImageElement,
        R: Renderer,
    {
        if self.state == LoopState::Stopped {
            return Ok(LoopControl::Stop);
        }

        let frame = self.clock.tick(now_ms);
        overlay.set_time(frame.elapsed);

        if overlay.render(renderer)? {
            self.stats.frames_rendered += 1;
        }
        self.stats.ticks += 1;
        self.stats.elapsed = frame.elapsed;

        log::trace!(
            "frame {} at {:.1}ms (dt {:.4}s)",
            frame.frame_index,
            now_ms,
            frame.dt
        );

        if (self.stop_condition)(&self.stats) {
            log::debug!("render loop stopped after {} ticks", self.stats.ticks);
            self.state = LoopState::Stopped;
            return Ok(LoopControl::Stop);
        }

        Ok(LoopControl::Continue)
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive `render_loop` from a sequence of frame timestamps (milliseconds).
///
/// Stops early when the loop asks to; returns the loop's stats.
pub fn run_frames<I, R>(
    render_loop: &mut RenderLoop,
    overlay: &mut Overlay<I>,
    renderer: &mut R,
    timestamps: impl IntoIterator<Item = f64>,
) -> Result<FrameStats, R::Error>
where
    I: ImageElement,
    R: Renderer,
{
    for now_ms in timestamps {
        if render_loop.tick(now_ms, overlay, renderer)? == LoopControl::Stop {
            break;
        }
    }
    Ok(render_loop.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::config::OverlayConfig;
    use crate::overlay::tests::{FakeImage, FakeLoader, FakeRenderer};
    use crate::viewport::Viewport;

    fn fixture(images: Vec<FakeImage>) -> (Overlay<FakeImage>, FakeRenderer) {
        let mut loader = FakeLoader::default();
        let mut renderer = FakeRenderer::default();
        let overlay = Overlay::mount(
            OverlayConfig::default(),
            Viewport::new(800, 600),
            images,
            &mut loader,
            &mut renderer,
        );
        (overlay, renderer)
    }

    fn at_60hz(frames: usize) -> impl Iterator<Item = f64> {
        (0..frames).map(|i| i as f64 * 1000.0 / 60.0)
    }

    #[test]
    fn test_one_render_per_tick() {
        let image = FakeImage::new("a.jpg", Bounds::new(0.0, 0.0, 10.0, 10.0));
        let (mut overlay, mut renderer) = fixture(vec![image]);
        let mut render_loop = RenderLoop::new();

        let stats = run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(60)).unwrap();

        assert_eq!(stats.ticks, 60);
        assert_eq!(stats.frames_rendered, 60);
        assert_eq!(renderer.renders, 60);
        assert_eq!(render_loop.state(), LoopState::Running);
    }

    #[test]
    fn test_shader_clock_follows_timestamps() {
        let (mut overlay, mut renderer) = fixture(vec![FakeImage::new(
            "a.jpg",
            Bounds::new(0.0, 0.0, 10.0, 10.0),
        )]);
        let mut render_loop = RenderLoop::new();

        let stats = run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(61)).unwrap();

        assert!((stats.elapsed - 1.0).abs() < 1e-3);
        let (_, material) = overlay.scene().materials().next().unwrap();
        assert_eq!(material.uniforms.time, stats.elapsed);
    }

    #[test]
    fn test_empty_scene_keeps_running() {
        let (mut overlay, mut renderer) = fixture(Vec::new());
        let mut render_loop = RenderLoop::new();

        let stats = run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(10)).unwrap();

        assert_eq!(stats.frames_rendered, 10);
        assert_eq!(render_loop.state(), LoopState::Running);
    }

    #[test]
    fn test_stop_condition_ends_loop() {
        let (mut overlay, mut renderer) = fixture(Vec::new());
        let mut render_loop = RenderLoop::for_frames(5);

        let stats =
            run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(100)).unwrap();

        assert_eq!(stats.frames_rendered, 5);
        assert_eq!(renderer.renders, 5);
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(
            render_loop.tick(10_000.0, &mut overlay, &mut renderer),
            Ok(LoopControl::Stop)
        );
        assert_eq!(renderer.renders, 5);
    }

    #[test]
    fn test_manual_stop() {
        let (mut overlay, mut renderer) = fixture(Vec::new());
        let mut render_loop = RenderLoop::new();
        render_loop.tick(0.0, &mut overlay, &mut renderer).unwrap();
        render_loop.stop();
        assert_eq!(
            render_loop.tick(16.0, &mut overlay, &mut renderer),
            Ok(LoopControl::Stop)
        );
        assert_eq!(renderer.renders, 1);
    }

    #[test]
    fn test_render_error_propagates() {
        let (mut overlay, mut renderer) = fixture(Vec::new());
        renderer.fail = true;
        let mut render_loop = RenderLoop::new();

        let result = run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(3));

        assert_eq!(result, Err("context lost".to_string()));
        assert_eq!(render_loop.stats().ticks, 0);
    }

    #[test]
    fn test_degenerate_viewport_ticks_without_rendering() {
        let (mut overlay, mut renderer) = fixture(Vec::new());
        overlay.resize(Viewport::new(0, 0), &mut renderer);
        let mut render_loop = RenderLoop::new();

        let stats = run_frames(&mut render_loop, &mut overlay, &mut renderer, at_60hz(4)).unwrap();

        assert_eq!(stats.ticks, 4);
        assert_eq!(stats.frames_rendered, 0);
    }
}
