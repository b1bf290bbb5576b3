//! Overlay calibration panel, opened on demand.

use std::{cell::RefCell, rc::Rc};

use cockpit_core::{
    calibration::{CalibrationEditor, CalibrationStore, ClickOutcome, ImageFrame},
    render::OverlayGeometry,
};
use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement,
    MouseEvent, SvgElement,
};

use crate::{
    dom::{self, DomError},
    fetch::fetch_text,
    storage::BrowserStore,
};

const EDITOR_QUERY: &str = "editor";
const OVERLAY_URL: &str = "assets/overlay.svg";

const PANEL_ID: &str = "editorPanel";
const IMAGE_ID: &str = "cockpitImg";
const SVG_CONTAINER_ID: &str = "svgContainer";
const SVG_ID: &str = "overlaySvg";
const POLYGON_ID: &str = "overlayPoly";
const BUTTON_HOST_ID: &str = "svgButtonFO";

const FIELD_IDS: [&str; 8] = ["p0x", "p0y", "p1x", "p1y", "p2x", "p2y", "p3x", "p3y"];

const PANEL_STYLE: [(&str, &str); 10] = [
    ("position", "fixed"),
    ("top", "12px"),
    ("right", "12px"),
    ("z-index", "10000"),
    ("background", "rgba(0,0,0,0.85)"),
    ("color", "#fff"),
    ("padding", "10px"),
    ("border-radius", "6px"),
    ("width", "300px"),
    ("font-family", "sans-serif"),
];

const PANEL_HTML: &str = r#"
<div style="display:flex;justify-content:space-between;align-items:center;margin-bottom:8px;">
  <strong>Overlay Editor</strong>
  <button id="closeEditor" style="background:#fff;color:#000;border:none;padding:4px 8px;cursor:pointer">Close</button>
</div>
<div id="pickHint" style="font-size:13px;margin-bottom:8px"></div>
<div style="display:grid;grid-template-columns:1fr 1fr;gap:6px;margin-bottom:8px">
  <label>Point A X<input id="p0x" type="number"></label>
  <label>Point A Y<input id="p0y" type="number"></label>
  <label>Point B X<input id="p1x" type="number"></label>
  <label>Point B Y<input id="p1y" type="number"></label>
  <label>Point C X<input id="p2x" type="number"></label>
  <label>Point C Y<input id="p2y" type="number"></label>
  <label>Point D X<input id="p3x" type="number"></label>
  <label>Point D Y<input id="p3y" type="number"></label>
</div>
<div style="display:flex;gap:6px;margin-bottom:8px">
  <button id="pickPoint">Pick</button>
  <button id="saveOverlay">Save</button>
  <button id="resetOverlay">Reset</button>
</div>
<div style="margin-bottom:6px">Button label: <input id="btnLabel" type="text" style="width:100%"></div>
<div style="font-size:12px;opacity:0.8">Changes are saved to localStorage.</div>
"#;

/// Whether the page was opened with the editor requested in its query string.
pub fn requested() -> bool {
    dom::window()
        .and_then(|window| window.location().search().map_err(DomError::from_js))
        .map(|search| search.contains(EDITOR_QUERY))
        .unwrap_or(false)
}

/// Show the panel and wire it once the overlay SVG is in the page.
pub fn open() -> Result<(), DomError> {
    let panel = create_panel()?;
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = wire(panel).await {
            error!("editor: failed to start: {:?}", err);
        }
    });
    Ok(())
}

struct EditorView {
    image: HtmlImageElement,
    svg: SvgElement,
    polygon: Element,
    button_host: SvgElement,
    button: Element,
    pick_button: HtmlButtonElement,
    hint: Element,
    label_input: HtmlInputElement,
    fields: Vec<HtmlInputElement>,
}

impl EditorView {
    fn write_fields(&self, values: [f64; 8]) {
        for (input, value) in self.fields.iter().zip(values) {
            input.set_value(&value.to_string());
        }
    }

    fn read_fields(&self) -> [String; 8] {
        core::array::from_fn(|i| self.fields.get(i).map(HtmlInputElement::value).unwrap_or_default())
    }

    fn show_hint(&self, hint: &str) {
        self.hint.set_text_content(Some(hint));
    }

    /// Resize the overlay to the image and redraw polygon and button.
    fn redraw(&self, geometry: Option<OverlayGeometry>) -> Result<(), DomError> {
        let Some(geometry) = geometry else {
            return Ok(());
        };
        let button = geometry.button;

        self.svg
            .set_attribute("viewBox", &geometry.view_box)
            .map_err(DomError::from_js)?;
        self.polygon
            .set_attribute("points", &geometry.polygon_points)
            .map_err(DomError::from_js)?;
        for (name, value) in [
            ("width", button.width),
            ("height", button.height),
            ("x", button.x),
            ("y", button.y),
        ] {
            self.button_host
                .set_attribute(name, &value.to_string())
                .map_err(DomError::from_js)?;
        }
        for element in [&self.svg, &self.button_host] {
            element
                .style()
                .set_property("pointer-events", "auto")
                .map_err(DomError::from_js)?;
        }
        Ok(())
    }
}

struct EditorState {
    editor: CalibrationEditor<BrowserStore>,
    view: EditorView,
}

impl EditorState {
    fn geometry(&self) -> Option<OverlayGeometry> {
        OverlayGeometry::project(
            self.editor.config(),
            self.view.image.natural_width(),
            self.view.image.natural_height(),
        )
    }

    fn refresh_overlay(&self) {
        if let Err(err) = self.view.redraw(self.geometry()) {
            error!("editor: overlay update failed: {:?}", err);
        }
    }

    fn refresh_all(&self) {
        self.view.write_fields(self.editor.field_values());
        self.view.show_hint(&self.editor.hint());
        self.view
            .pick_button
            .set_disabled(self.editor.session().is_active());
        self.refresh_overlay();
    }
}

type SharedEditor = Rc<RefCell<EditorState>>;

fn create_panel() -> Result<HtmlElement, DomError> {
    let document = dom::document()?;
    let panel: HtmlElement = document
        .create_element("div")
        .map_err(DomError::from_js)?
        .dyn_into()
        .map_err(|_| DomError::WrongElementType(PANEL_ID.to_string()))?;
    panel.set_id(PANEL_ID);

    let style = panel.style();
    for (property, value) in PANEL_STYLE {
        style
            .set_property(property, value)
            .map_err(DomError::from_js)?;
    }
    panel.set_inner_html(PANEL_HTML);

    document
        .body()
        .ok_or(DomError::NoDocument)?
        .append_child(&panel)
        .map_err(DomError::from_js)?;
    debug!("editor: panel attached");
    Ok(panel)
}

/// Insert the overlay SVG unless an earlier load already did.
async fn load_svg() -> Result<SvgElement, DomError> {
    if let Ok(svg) = dom::element_as::<SvgElement>(SVG_ID) {
        return Ok(svg);
    }

    let markup = fetch_text(OVERLAY_URL)
        .await
        .map_err(|err| DomError::Js(format!("{OVERLAY_URL}: {err:?}")))?;
    dom::element(SVG_CONTAINER_ID)?.set_inner_html(&markup);
    dom::element_as::<SvgElement>(SVG_ID)
}

async fn wire(panel: HtmlElement) -> Result<(), DomError> {
    let svg = load_svg().await?;
    let button_host: SvgElement = dom::element_as(BUTTON_HOST_ID)?;
    let button = button_host
        .query_selector("button")
        .map_err(DomError::from_js)?
        .ok_or_else(|| DomError::MissingElement(format!("{BUTTON_HOST_ID} button")))?;

    let fields = FIELD_IDS
        .iter()
        .map(|id| dom::element_as::<HtmlInputElement>(id))
        .collect::<Result<Vec<_>, _>>()?;

    let view = EditorView {
        image: dom::element_as(IMAGE_ID)?,
        svg,
        polygon: dom::element(POLYGON_ID)?,
        button_host,
        button,
        pick_button: dom::element_as("pickPoint")?,
        hint: dom::element("pickHint")?,
        label_input: dom::element_as("btnLabel")?,
        fields,
    };

    let editor = CalibrationEditor::new(CalibrationStore::new(BrowserStore::open()));
    view.label_input.set_value(&editor.config().label);
    view.button.set_text_content(Some(&editor.config().label));

    let state: SharedEditor = Rc::new(RefCell::new(EditorState { editor, view }));
    state.borrow().refresh_all();

    let pick_button = state.borrow().view.pick_button.clone();
    {
        let state = state.clone();
        dom::listen(&pick_button, "click", move |_: MouseEvent| {
            let mut guard = state.borrow_mut();
            if guard.editor.start_pick() {
                guard.refresh_all();
            }
        })?;
    }

    let image = state.borrow().view.image.clone();
    {
        let state = state.clone();
        let frame_source = image.clone();
        dom::listen(&image, "click", move |event: MouseEvent| {
            let rect = frame_source.get_bounding_client_rect();
            let frame = ImageFrame {
                natural_width: frame_source.natural_width(),
                natural_height: frame_source.natural_height(),
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };

            let mut guard = state.borrow_mut();
            let outcome = guard.editor.image_click(
                &frame,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                event.ctrl_key(),
            );
            match outcome {
                ClickOutcome::Ignored => {}
                ClickOutcome::AnchorMoved => guard.refresh_overlay(),
                ClickOutcome::Picked(_) | ClickOutcome::PickedAndAnchorMoved(_) => {
                    guard.refresh_all()
                }
            }
        })?;
    }

    {
        let state = state.clone();
        dom::listen(&dom::element("saveOverlay")?.into(), "click", move |_: MouseEvent| {
            {
                let mut guard = state.borrow_mut();
                let values = guard.view.read_fields();
                guard.editor.apply_fields(&values);
                guard.view.write_fields(guard.editor.field_values());
            }
            let confirmed = dom::window()
                .and_then(|window| window.alert_with_message("Saved").map_err(DomError::from_js));
            if let Err(err) = confirmed {
                warn!("editor: save confirmation failed: {:?}", err);
            }
            state.borrow().refresh_overlay();
        })?;
    }

    {
        let state = state.clone();
        dom::listen(&dom::element("resetOverlay")?.into(), "click", move |_: MouseEvent| {
            let mut guard = state.borrow_mut();
            guard.editor.reset();
            guard.refresh_all();
        })?;
    }

    let label_input = state.borrow().view.label_input.clone();
    {
        let state = state.clone();
        let source = label_input.clone();
        dom::listen(&label_input, "input", move |_: Event| {
            let mut guard = state.borrow_mut();
            let label = guard.editor.set_label(&source.value()).to_string();
            guard.view.button.set_text_content(Some(&label));
        })?;
    }

    {
        let state = state.clone();
        dom::listen(&image, "load", move |_: Event| state.borrow().refresh_overlay())?;
    }
    {
        let state = state.clone();
        dom::listen(&dom::window()?.into(), "resize", move |_: Event| {
            state.borrow().refresh_overlay()
        })?;
    }
    if image.complete() {
        state.borrow().refresh_overlay();
    }

    dom::listen(&dom::element("closeEditor")?.into(), "click", move |_: MouseEvent| {
        panel.remove();
    })?;

    info!("editor: ready");
    Ok(())
}
