//! Wiring: mount the overlay, listen for layout changes, drive frames
use std::cell::RefCell;
use std::rc::Rc;

use imgplane_core::{LoopControl, Overlay, OverlayConfig, RenderLoop, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

use crate::dom::{self, DomImage};
use crate::error::WebError;
use crate::gl::{self, WebGlRenderer};
use crate::logging;
use crate::texture::{TextureStore, WebTextureLoader};

pub type SharedApp = Rc<RefCell<App>>;

pub struct App {
    overlay: Overlay<DomImage>,
    renderer: WebGlRenderer,
    render_loop: RenderLoop,
    container: HtmlElement,
    animating: bool,
    generation: u64,
}

impl App {
    /// Build the canvas, scene and camera and draw the first frame.
    pub fn mount(config: OverlayConfig) -> Result<SharedApp, WebError> {
        logging::set_level(config.log_level);

        let window = dom::window()?;
        let document = dom::document(&window)?;
        let container = dom::query_html_element(&document, &config.container_selector)?;
        let pixel_ratio = config
            .pixel_ratio
            .unwrap_or_else(|| window.device_pixel_ratio());

        let canvas = dom::create_canvas(&document)?;
        container.append_child(&canvas)?;

        let context = gl::context(&canvas, &config)?;
        let textures = TextureStore::default();
        let mut renderer =
            WebGlRenderer::new(canvas, context.clone(), textures.clone(), &config, pixel_ratio)?;
        let mut loader = WebTextureLoader::new(context, textures);

        let images = dom::query_images(&document, &config.image_selector)?;
        let viewport = dom::element_viewport(&container);
        log::info!(
            "mounting overlay on `{}`: {} images, {}x{} @{}x",
            config.container_selector,
            images.len(),
            viewport.width,
            viewport.height,
            pixel_ratio
        );

        let overlay = Overlay::mount(config, viewport, images, &mut loader, &mut renderer);
        overlay.render(&mut renderer)?;

        Ok(Rc::new(RefCell::new(Self {
            overlay,
            renderer,
            render_loop: RenderLoop::new(),
            container,
            animating: false,
            generation: 0,
        })))
    }

    /// Re-read the container size and realign everything to it.
    pub fn resize(&mut self) {
        let viewport = dom::element_viewport(&self.container);
        self.overlay.resize(viewport, &mut self.renderer);
    }

    pub fn sync_layout(&mut self) {
        self.overlay.sync_layout();
    }

    pub fn viewport(&self) -> Viewport {
        self.overlay.viewport()
    }

    pub fn mesh_count(&self) -> usize {
        self.overlay.scene().mesh_count()
    }

    pub fn stop(&mut self) {
        self.render_loop.stop();
        self.animating = false;
    }

    fn tick(&mut self, now_ms: f64) -> Result<LoopControl, WebError> {
        let control = self
            .render_loop
            .tick(now_ms, &mut self.overlay, &mut self.renderer);
        if !matches!(control, Ok(LoopControl::Continue)) {
            self.animating = false;
        }
        control
    }
}

fn add_listener(
    window: &Window,
    event: &str,
    app: &SharedApp,
    handler: fn(&mut App),
) -> Result<(), WebError> {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        handler(&mut app.borrow_mut());
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Realign on every resize (not debounced), and on scroll when configured.
pub fn install_listeners(app: &SharedApp) -> Result<(), WebError> {
    let window = dom::window()?;
    add_listener(&window, "resize", app, App::resize)?;

    if app.borrow().overlay.config().sync_on_scroll {
        add_listener(&window, "scroll", app, App::sync_layout)?;
    }
    Ok(())
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, WebError> {
    Ok(dom::window()?.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

/// Start the per-frame loop. No-op while a loop is already running.
///
/// A render error is logged and ends the loop, like an uncaught exception in
/// an animation-frame callback would.
///
/// Each call builds a new self-scheduling closure that owns itself through
/// `frame`, so the closure of a stopped loop is never freed. That costs one
/// small allocation per `stop()`/`start()` cycle.
pub fn start_animation(app: &SharedApp) -> Result<(), WebError> {
    let generation = {
        let mut state = app.borrow_mut();
        if state.animating {
            return Ok(());
        }
        state.animating = true;
        state.generation = state.generation.wrapping_add(1);
        state.render_loop = RenderLoop::new();
        state.generation
    };

    // `frame` owns the callback so the callback can re-schedule itself.
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let schedule = frame.clone();
    let handle = app.clone();

    *schedule.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        // A stop() followed by start() before this frame fired supersedes us.
        if handle.borrow().generation != generation {
            return;
        }

        let control = handle.borrow_mut().tick(now);
        match control {
            Ok(LoopControl::Continue) => {
                if let Some(callback) = frame.borrow().as_ref() {
                    if let Err(err) = request_animation_frame(callback) {
                        log::error!("failed to schedule frame: {err}");
                        handle.borrow_mut().animating = false;
                    }
                }
            }
            Ok(LoopControl::Stop) => log::debug!("animation stopped"),
            Err(err) => log::error!("render failed, animation stopped: {err}"),
        }
    }) as Box<dyn FnMut(f64)>));

    let scheduled = match schedule.borrow().as_ref() {
        Some(callback) => request_animation_frame(callback).map(|_| ()),
        None => Ok(()),
    };
    if scheduled.is_err() {
        app.borrow_mut().animating = false;
    }
    scheduled
}
