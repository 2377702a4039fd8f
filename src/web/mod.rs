//! Browser runtime
//!
//! Picks a demo, sets up wgpu on the page canvas and drives it from
//! `requestAnimationFrame`. Input arrives through DOM listeners that forward
//! `InputEvent`s to the running demo.

pub mod assets;
pub mod demos;
pub mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::audio::AudioManager;
use crate::catalog::DemoKind;
use crate::error::DemoError;
use crate::renderer::GpuContext;
use crate::settings::Settings;
use crate::timing::FpsCounter;
use demos::{Demo, InputEvent, Shell};

/// Page buttons forwarded to the demo as `InputEvent::Button`
const BUTTONS: [&str; 2] = ["draw-btn", "restart-btn"];

/// Keys whose default browser action (scrolling) is suppressed
const CAPTURED_KEYS: [&str; 5] = [" ", "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown"];

/// Running demo plus everything the frame loop needs
struct App {
    gpu: GpuContext,
    demo: Box<dyn Demo>,
    shell: Shell,
    canvas: HtmlCanvasElement,
    last_time: Option<f64>,
    fps: FpsCounter,
}

impl App {
    fn frame(&mut self, time: f64) {
        let dt_ms = self.last_time.map_or(0.0, |last| time - last);
        self.last_time = Some(time);

        if let Ok(window) = dom::window() {
            let (w, h) = dom::fit_canvas(&window, &self.canvas);
            if (w, h) != self.gpu.size {
                log::info!("Canvas resized to {}x{}", w, h);
                self.gpu.resize(w, h);
                self.demo.resized(&self.gpu);
            }
        }

        self.demo.update(&self.gpu, &mut self.shell, dt_ms);

        match self.demo.render(&self.gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
            }
            Err(e) => log::warn!("Surface error: {:?}", e),
        }

        self.fps.record(time);
        if self.shell.settings.show_fps {
            dom::set_text(&self.shell.document, "fps", &format!("FPS: {}", self.fps.fps()));
        }
    }

    /// Persist changed settings and push them to the page and audio
    fn apply_settings(&mut self) {
        let settings = &self.shell.settings;
        settings.save();
        self.shell.audio.apply_settings(settings);
        dom::set_hidden(&self.shell.document, "fps", !settings.show_fps);
        log::info!(
            "Settings: volume {:.1}, FPS {}",
            settings.master_volume,
            if settings.show_fps { "on" } else { "off" }
        );
    }

    fn dispatch(&mut self, event: InputEvent) {
        match &event {
            InputEvent::KeyDown(key) => {
                self.shell.audio.resume();
                if self.shell.settings.apply_key(key) {
                    self.apply_settings();
                }
            }
            InputEvent::FocusLost if self.shell.settings.mute_on_blur => self.shell.audio.set_muted(true),
            InputEvent::FocusGained => self.shell.audio.set_muted(false),
            _ => {}
        }
        self.demo.handle_input(&event, &mut self.shell);
    }
}

/// Entry point called from the wasm start function
pub async fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }

    log::info!("WebGL demos starting...");

    if let Err(e) = start().await {
        log::error!("Startup failed: {}", e);
        if let Ok(document) = dom::document() {
            dom::set_hidden(&document, "loading", true);
            dom::show_error(&document, &e.to_string());
        }
    }
}

async fn start() -> Result<(), DemoError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let canvas = dom::canvas(&document, "canvas")?;

    let query = dom::query_param(&window, "demo");
    let data_attr = dom::data_demo(&canvas);
    let kind = DemoKind::select(query.as_deref(), data_attr.as_deref())?;

    let (width, height) = dom::fit_canvas(&window, &canvas);

    let backends = if has_webgpu(&window) {
        wgpu::Backends::BROWSER_WEBGPU
    } else {
        log::info!("navigator.gpu missing, using WebGL2");
        wgpu::Backends::GL
    };
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    });

    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let gpu = GpuContext::new(surface, &adapter, width, height).await?;

    let settings = Settings::load();
    let mut shell = Shell {
        document: document.clone(),
        audio: AudioManager::new(&settings),
        settings,
    };
    dom::set_hidden(&document, "fps", !shell.settings.show_fps);

    let seed = js_sys::Date::now() as u64;
    let demo = demos::create(kind, &gpu, &mut shell, seed);

    let app = Rc::new(RefCell::new(App {
        gpu,
        demo,
        shell,
        canvas: canvas.clone(),
        last_time: None,
        fps: FpsCounter::default(),
    }));

    setup_input_handlers(&window, &canvas, app.clone());
    setup_buttons(&document, app.clone());
    setup_focus_handlers(&window, app.clone());

    dom::set_hidden(&document, "loading", true);
    dom::set_hidden(&document, "hud", false);

    request_animation_frame(app);

    log::info!("Demo '{}' running", kind.slug());
    Ok(())
}

fn has_webgpu(window: &web_sys::Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}

fn setup_input_handlers(window: &web_sys::Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
    // Keydown
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if CAPTURED_KEYS.contains(&key.as_str()) {
                event.prevent_default();
            }
            app.borrow_mut().dispatch(InputEvent::KeyDown(key));
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keyup
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().dispatch(InputEvent::KeyUp(event.key()));
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Click, in CSS pixels relative to the canvas
    {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let offset = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            let css_size = Vec2::new(rect.width() as f32, rect.height() as f32);
            app.borrow_mut().dispatch(InputEvent::Click { offset, css_size });
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
    for id in BUTTONS {
        let Some(btn) = document.get_element_by_id(id) else {
            continue;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().dispatch(InputEvent::Button(id));
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_focus_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
    let Ok(document) = dom::document() else {
        return;
    };

    // Visibility change (tab switch, minimize)
    {
        let app = app.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let event = if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                log::info!("Tab hidden");
                InputEvent::FocusLost
            } else {
                InputEvent::FocusGained
            };
            app.borrow_mut().dispatch(event);
        });
        let _ = document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window blur (click outside)
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().dispatch(InputEvent::FocusLost);
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().dispatch(InputEvent::FocusGained);
        });
        let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Ok(window) = dom::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        app_loop(app, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn app_loop(app: Rc<RefCell<App>>, time: f64) {
    app.borrow_mut().frame(time);
    request_animation_frame(app);
}
