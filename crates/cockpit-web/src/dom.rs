//! Thin DOM helpers and the dial render surface.

use cockpit_core::render::DialSurface;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, convert::FromWasmAbi};
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, Text, Window};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DomError {
    NoWindow,
    NoDocument,
    MissingElement(String),
    WrongElementType(String),
    Js(String),
}

impl DomError {
    pub fn from_js(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn element(id: &str) -> Result<Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))
}

/// Element by id, cast to a concrete element type.
pub fn element_as<T: JsCast>(id: &str) -> Result<T, DomError> {
    element(id)?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementType(id.to_string()))
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(DomError::from_js)?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but registered as non-passive so the handler may call
/// `preventDefault`.
pub fn listen_active<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(false);

    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(DomError::from_js)?;
    closure.forget();
    Ok(())
}

/// Dial readout and episode panel.
///
/// The readout lives in its own text node so that updating it leaves the
/// dial's other children (the touch area) in place.
pub struct DomDialSurface {
    readout: Text,
    episode: Element,
}

impl DomDialSurface {
    pub fn new(readout: Text, episode: Element) -> Self {
        Self { readout, episode }
    }
}

impl DialSurface for DomDialSurface {
    fn set_dial_text(&mut self, text: &str) {
        self.readout.set_data(text);
    }

    fn set_episode_html(&mut self, html: &str) {
        self.episode.set_inner_html(html);
    }
}
