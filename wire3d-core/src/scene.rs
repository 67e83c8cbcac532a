//! Scene lifecycle: `init`, then one `tick` per displayed frame, then
//! `dispose`
//!
//! Hosts never touch the world directly. Key and wheel events go through
//! the channel returned by [`Scene::input_sender`] and are picked up at the
//! start of the next tick, at most one per tick.
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::animator::{Animator, OperationRequest};
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::Object;
use crate::input::{self, InputEvent, KeyAction};
use crate::render::{Overlay, RenderOptions, Renderer};
use crate::sketch::Sketch;
use crate::surface::DrawingSurface;
use crate::world::WorldSpace;

pub struct Scene {
    config: SceneConfig,
    world: WorldSpace,
    animator: Animator,
    renderer: Renderer,
    sender: Sender<InputEvent>,
    inputs: Receiver<InputEvent>,
    link_highlighted: bool,
    sketch: Option<Sketch>,
}

impl Scene {
    pub fn init(config: SceneConfig, width: f64, height: f64) -> Self {
        let options = RenderOptions {
            background: config.background,
            foreground: config.foreground,
            line_width: config.line_width,
            show_points: config.show_points,
            show_labels: config.show_labels,
            show_grid: config.show_grid,
        };
        let renderer = Renderer::new(width, height, config.zoom_divisor, options);
        let (sender, inputs) = mpsc::channel();

        log::info!("scene initialised at {width}x{height}");

        Self {
            config,
            world: WorldSpace::new(),
            animator: Animator::new(),
            renderer,
            sender,
            inputs,
            link_highlighted: false,
            sketch: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldSpace {
        &self.world
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Place a copy of `template` in the world
    pub fn import(&mut self, template: &Object, x: f64, y: f64, z: f64) -> Result<(), SceneError> {
        self.world.import(template, x, y, z).map(|_| ())
    }

    /// Sender half of the input channel; clone it into event handlers
    pub fn input_sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    /// Queue an operation directly, e.g. an opening animation
    pub fn seed(&mut self, request: OperationRequest) {
        self.animator.set_up_operation(request);
    }

    /// Add one random line per tick from now on
    pub fn start_sketch(&mut self, seed: u64) {
        log::debug!("sketch seeded with {seed}");
        self.sketch = Some(Sketch::new(seed));
    }

    pub fn sketch(&self) -> Option<&Sketch> {
        self.sketch.as_ref()
    }

        pub fn resize(&mut self, width: f64, height: f64) {
        log::info!("resized to {width}x{height}");
        self.renderer.resize(width, height);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.link_highlighted = self.config.link.is_some() && self.renderer.layout().link_region.contains(x, y);
    }

    pub fn link_highlighted(&self) -> bool {
        self.link_highlighted
    }

    /// The URL to navigate to if `(x, y)` hits the link
    pub fn click(&self, x: f64, y: f64) -> Option<&str> {
        let link = self.config.link.as_ref()?;
        self.renderer
            .layout()
            .link_region
            .contains(x, y)
            .then_some(link.url.as_str())
    }

    /// Handle one pending input, advance the animation and draw the frame
    pub fn tick<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) {
        match self.inputs.try_recv() {
            Ok(event) => self.handle(event),
            Err(TryRecvError::Empty) => {}
            // Unreachable while `self.sender` is alive
            Err(TryRecvError::Disconnected) => {}
        }

        self.animator.apply_step(&mut self.world);
        if let Some(sketch) = &mut self.sketch {
            let (width, height) = surface.size();
            sketch.add_line(width, height);
        }

        let overlay = Overlay {
            sketch: self.sketch.as_ref(),
            status: Some(self.animator.description()),
            link: self.config.link.as_ref().map(|l| l.text.as_str()),
            link_highlighted: self.link_highlighted,
        };
        self.renderer.render(&self.world, &overlay, surface);
    }

    pub fn dispose(self) {
        log::info!("scene disposed with {} objects", self.world.len());
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => match input::map_key(key, &self.config) {
                Some(KeyAction::Operation(request)) => self.animator.set_up_operation(request),
                Some(KeyAction::ZoomIn) => self.zoom(-self.config.zoom_step),
                Some(KeyAction::ZoomOut) => self.zoom(self.config.zoom_step),
                None => log::trace!("unbound key {key:?}"),
            },
            InputEvent::Wheel(delta) => {
                self.animator.set_up_operation(input::wheel_request(delta, &self.config));
            }
        }
    }

    fn zoom(&mut self, by: f64) {
        let divisor = (self.renderer.zoom_divisor() + by)
            .clamp(self.config.min_zoom_divisor, self.config.max_zoom_divisor);
        log::debug!("zoom divisor {divisor}");
        self.renderer.set_zoom_divisor(divisor);
    }
}
