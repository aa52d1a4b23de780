use crate::config::{Color, Config};
use crate::entity::Rect;
use crate::input::{InputFrame, InputSource, Key, KeyState};
use crate::renderer::{Renderer, TextAnchor};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

fn js_error(value: JsValue) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{:?}", value))
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    window: web_sys::Window,
    device_pixel_ratio: f64,
    font: String,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Get device pixel ratio for high DPI displays
        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            context,
            window,
            device_pixel_ratio,
            font: String::new(),
        })
    }

    /// Size the backing store for the court, scaled for high DPI.
    fn resize(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.canvas.set_width((width * self.device_pixel_ratio) as u32);
        self.canvas.set_height((height * self.device_pixel_ratio) as u32);

        let element: &HtmlElement = self.canvas.unchecked_ref();
        element.style().set_property("width", &format!("{}px", width))?;
        element.style().set_property("height", &format!("{}px", height))?;

        // Setting width/height resets the context transform.
        self.context.scale(self.device_pixel_ratio, self.device_pixel_ratio)?;
        Ok(())
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self, config: &Config) -> io::Result<()> {
        if let Some(document) = self.window.document() {
            document.set_title(&config.caption);
        }
        self.font = format!("{}px 'Comic Sans MS', sans-serif", config.font_size);
        self.resize(config.field_width as f64, config.field_height as f64)
            .map_err(js_error)
    }

    fn clear(&mut self, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&color.to_hex());
        self.context.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64 / self.device_pixel_ratio,
            self.canvas.height() as f64 / self.device_pixel_ratio,
        );
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&color.to_hex());
        self.context.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        Ok(())
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> io::Result<()> {
        self.context.set_fill_style_str(&color.to_hex());
        self.context.begin_path();
        self.context
            .arc(x as f64, y as f64, radius as f64, 0.0, 2.0 * PI)
            .map_err(js_error)?;
        self.context.fill();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> io::Result<()> {
        let (x, y, baseline) = match anchor {
            TextAnchor::TopCenter { x, y } => (x, y, "top"),
            TextAnchor::Center { x, y } => (x, y, "middle"),
        };
        self.context.set_fill_style_str(&color.to_hex());
        self.context.set_font(&self.font);
        self.context.set_text_align("center");
        self.context.set_text_baseline(baseline);
        self.context
            .fill_text(text, x as f64, y as f64)
            .map_err(js_error)
    }

    fn present(&mut self) -> io::Result<()> {
        // The browser composites the canvas after the animation frame.
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn map_key(key: &str) -> Option<Key> {
    match key {
        "w" | "W" => Some(Key::LeftUp),
        "s" | "S" => Some(Key::LeftDown),
        "ArrowUp" => Some(Key::RightUp),
        "ArrowDown" => Some(Key::RightDown),
        _ => None,
    }
}

/// Held-key state fed by keydown/keyup listeners on the window.
pub struct WebInput {
    keys: Rc<RefCell<KeyState>>,
}

impl WebInput {
    pub fn new() -> Self {
        Self {
            keys: Rc::new(RefCell::new(KeyState::default())),
        }
    }

    pub fn attach(&self, window: &web_sys::Window) -> Result<(), JsValue> {
        for (event_name, held) in [("keydown", true), ("keyup", false)] {
            let keys = self.keys.clone();
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    keys.borrow_mut().set(key, held);
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);

            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget(); // Keep listener alive
        }

        // Keyup never arrives once focus is gone.
        let keys = self.keys.clone();
        let blur = Closure::wrap(Box::new(move || {
            *keys.borrow_mut() = KeyState::default();
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();

        Ok(())
    }
}

impl Default for WebInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for WebInput {
    fn poll(&mut self) -> io::Result<InputFrame> {
        // A browser tab has no quit key; closing the tab ends the loop.
        Ok(InputFrame {
            keys: *self.keys.borrow(),
            quit: false,
        })
    }
}
