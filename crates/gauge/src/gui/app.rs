use crate::config::{self, AnimationConfig};
use crate::events::AppEvent;
use crate::gui::{view, window};
use dialgauge::{Gauge, GaugeConfig, GaugeError, Rect, Scene};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub struct AppModel {
    pub gauge: Rc<RefCell<Gauge<Scene>>>,
    pub animation: AnimationConfig,
    /// Origin of the scene clock.
    pub started: Instant,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Close,
    Resize(i32, i32),
    SetProgress(f64),
    AnimateProgress {
        progress: f64,
        duration: Option<Duration>,
    },
    SetLimit(f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::SetProgress(p) => AppMsg::SetProgress(p),
            AppEvent::AnimateProgress { progress, duration } => {
                AppMsg::AnimateProgress { progress, duration }
            }
            AppEvent::SetLimit(l) => AppMsg::SetLimit(l),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Gauge<Scene>,
        config::Config,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            add_css_class: "gauge-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "gauge-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (gauge, config, rx) = init;

        window::load_css();
        window::init_window(&root, &config.window);

        let model = AppModel {
            gauge: Rc::new(RefCell::new(gauge)),
            animation: config.animation,
            started: Instant::now(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let gauge_draw = model.gauge.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                if let Err(e) = view::draw(cr, gauge_draw.borrow().surface()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        // plays scheduled dial transitions, one step per frame
        let gauge_tick = model.gauge.clone();
        let started = model.started;
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, _| {
                let mut gauge = gauge_tick.borrow_mut();
                let scene = gauge.surface_mut();
                if scene.is_animating() {
                    scene.advance(started.elapsed());
                    drawing_area.queue_draw();
                }
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let result = match msg {
            AppMsg::Close => {
                self.root.close();
                Ok(())
            }
            AppMsg::Resize(width, height) => {
                let bounds = Rect::new(0.0, 0.0, width as f64, height as f64);
                self.gauge.borrow_mut().set_bounds(bounds);
                Ok(())
            }
            AppMsg::SetProgress(progress) => self.gauge.borrow_mut().set_progress(progress),
            AppMsg::AnimateProgress { progress, duration } => {
                let duration = duration.unwrap_or_else(|| self.animation.duration());
                let mut gauge = self.gauge.borrow_mut();
                // schedule relative to now, not to the last rendered frame
                gauge.surface_mut().advance(self.started.elapsed());
                gauge.set_progress_animated(progress, duration)
            }
            AppMsg::SetLimit(limit) => self.gauge.borrow_mut().set_limit(limit),
            AppMsg::ConfigReload => self.reload(),
        };

        if let Err(e) = result {
            log::error!("Failed to update gauge: {}", e);
        }
        self.drawing_area.queue_draw();
    }
}

impl AppModel {
    /// Applies the config file, keeping the live progress.
    fn reload(&mut self) -> Result<(), GaugeError> {
        let new_config = match config::load_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return Ok(());
            }
        };

        let mut gauge = self.gauge.borrow_mut();
        let gauge_config = GaugeConfig {
            progress: gauge.progress(),
            ..new_config.gauge
        };
        gauge.apply_configuration(gauge_config)?;
        gauge.surface_mut().set_easing(new_config.animation.easing);
        self.animation = new_config.animation;

        log::info!("Configuration reloaded");
        Ok(())
    }
}
