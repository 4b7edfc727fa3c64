//! Browser front end: canvas renderer, keydown hookup and the win banner

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

use crate::consts::SIM_DT;
use crate::controller::{GameEvent, Key};
use crate::engine::{Shape, World};
use crate::error::{MazeError, Result};
use crate::{Session, Settings};

/// Game instance holding all state
struct App {
    session: Session<World>,
    ctx: CanvasRenderingContext2d,
    document: Document,
    size: (f64, f64),
    last_time: f64,
}

impl App {
    /// Draw every body with its fill style
    fn render(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("#1b1b1b");
        ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);

        for body in self.session.engine().bodies() {
            ctx.set_fill_style_str(body.fill.css());
            let (x, y) = (body.position.x as f64, body.position.y as f64);
            match body.shape {
                Shape::Rect { size } => {
                    let (w, h) = (size.x as f64, size.y as f64);
                    ctx.fill_rect(x - w / 2.0, y - h / 2.0, w, h);
                }
                Shape::Circle { radius } => {
                    ctx.begin_path();
                    if ctx
                        .arc(x, y, radius as f64, 0.0, std::f64::consts::TAU)
                        .is_ok()
                    {
                        ctx.fill();
                    }
                }
            }
        }
    }

    fn show_winner(&self) {
        match self.document.query_selector(".winner") {
            Ok(Some(el)) => {
                let _ = el.class_list().remove_1("hidden");
            }
            _ => log::warn!("No .winner element to reveal"),
        }
    }
}

fn surface_err(what: &str) -> MazeError {
    MazeError::Surface(what.to_string())
}

/// Find `#canvas`, or create one and append it to the body
fn canvas(document: &Document, width: f64, height: f64) -> Result<HtmlCanvasElement> {
    let element = match document.get_element_by_id("canvas") {
        Some(el) => el,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|_| surface_err("cannot create canvas"))?;
            document
                .body()
                .ok_or_else(|| surface_err("no document body"))?
                .append_child(&el)
                .map_err(|_| surface_err("cannot attach canvas"))?;
            el
        }
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| surface_err("#canvas is not a canvas"))?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok(canvas)
}

pub fn run() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| surface_err("no window"))?;
    let document = window.document().ok_or_else(|| surface_err("no document"))?;

    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1200.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1000.0);

    let canvas = canvas(&document, width, height)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| surface_err("2d context request failed"))?
        .ok_or_else(|| surface_err("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| surface_err("unexpected context type"))?;

    // Optional JSON on the canvas element, e.g. <canvas id="canvas" data-settings='{"rows": 6}'>
    let inline = canvas.get_attribute("data-settings");
    let settings = Settings::from_json_or_default(inline.as_deref())
        .with_viewport(width as f32, height as f32);
    let mut rng = Pcg32::seed_from_u64(js_sys::Date::now() as u64);
    let session = Session::start(settings, World::new(), &mut rng)?;
    log::info!("Maze seed: {}", session.seed());

    let app = Rc::new(RefCell::new(App {
        session,
        ctx,
        document,
        size: (width, height),
        last_time: 0.0,
    }));

    setup_keyboard(app.clone())?;
    request_animation_frame(app);

    log::info!("Maze Ball running!");
    Ok(())
}

fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| surface_err("no window"))?;
    let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        let key = Key::from_key_name(&event.key()).or_else(|| Key::from_key_code(event.key_code()));
        let Some(key) = key else {
            log::warn!("Ignoring key {:?} (code {})", event.key(), event.key_code());
            return;
        };
        if let Err(e) = app.borrow_mut().session.handle_key(key) {
            log::error!("Input failed: {}", e);
        }
    });
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
    Ok(())
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(app, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    {
        let mut a = app.borrow_mut();

        let dt = if a.last_time > 0.0 {
            ((time - a.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        a.last_time = time;

        match a.session.update(dt) {
            Ok(events) => {
                if events.contains(&GameEvent::Won) {
                    a.show_winner();
                }
            }
            Err(e) => {
                // Engine failures end the session
                log::error!("Simulation failed: {}", e);
                return;
            }
        }
        a.render();
    }

    request_animation_frame(app);
}
