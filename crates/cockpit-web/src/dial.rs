//! Episode dial wiring: DOM events in, dial text and episode HTML out.

use std::{cell::RefCell, rc::Rc};

use cockpit_core::{
    app::DialApp,
    content::{EpisodeLoader, LoadStep},
    input::{DialEvent, HitTarget, InputConfig, InputOutcome},
};
use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent, WheelEvent};

use crate::{
    dom::{self, DomDialSurface, DomError},
    fetch::fetch_text,
    now_ms,
};

const DIAL_ID: &str = "dial";
const EPISODE_ID: &str = "episode";
const INSTRUCTION_ARROW_SELECTOR: &str = ".instruction-arrow";
const TOUCH_AREA_WIDTH: &str = "225px";
const TOUCH_AREA_HEIGHT: &str = "150px";

struct DialState {
    app: DialApp<DomDialSurface>,
    idle_timer: Option<Timeout>,
}

type SharedDial = Rc<RefCell<DialState>>;

/// Build the dial inside `#dial`, wire its inputs and start loading episodes.
pub fn mount() -> Result<(), DomError> {
    let document = dom::document()?;
    let dial: HtmlElement = dom::element_as(DIAL_ID)?;
    let episode = dom::element(EPISODE_ID)?;

    dial.set_text_content(None);
    let readout = document.create_text_node("");
    dial.append_child(&readout).map_err(DomError::from_js)?;

    let touch_area = create_touch_area()?;
    dial.append_child(&touch_area).map_err(DomError::from_js)?;

    let app = DialApp::new(
        DomDialSurface::new(readout, episode),
        InputConfig::default(),
    );
    let state: SharedDial = Rc::new(RefCell::new(DialState {
        app,
        idle_timer: None,
    }));

    {
        let state = state.clone();
        dom::listen(&dial, "click", move |_: MouseEvent| {
            dispatch(&state, DialEvent::Click);
        })?;
    }

    for (target, element) in [(HitTarget::Dial, &dial), (HitTarget::TouchArea, &touch_area)] {
        let enter_state = state.clone();
        dom::listen(element, "pointerenter", move |_: Event| {
            dispatch(&enter_state, DialEvent::PointerEnter(target));
        })?;
        let leave_state = state.clone();
        dom::listen(element, "pointerleave", move |_: Event| {
            dispatch(&leave_state, DialEvent::PointerLeave(target));
        })?;
    }

    {
        let state = state.clone();
        dom::listen_active(&touch_area, "touchstart", move |event: TouchEvent| {
            hide_instruction_arrow();
            if let Some(x) = first_touch_x(&event) {
                apply_outcome(&event, dispatch(&state, DialEvent::TouchStart { x }));
            } else {
                event.prevent_default();
            }
        })?;
    }

    {
        let state = state.clone();
        dom::listen_active(&touch_area, "touchmove", move |event: TouchEvent| {
            if let Some(x) = first_touch_x(&event) {
                apply_outcome(&event, dispatch(&state, DialEvent::TouchMove { x }));
            } else {
                event.prevent_default();
            }
        })?;
    }

    {
        let state = state.clone();
        let window = dom::window()?;
        dom::listen_active(&window, "wheel", move |event: WheelEvent| {
            let outcome = dispatch(
                &state,
                DialEvent::Wheel {
                    delta_y: event.delta_y(),
                },
            );
            apply_outcome(&event, outcome);
        })?;
    }

    wasm_bindgen_futures::spawn_local(load_episodes(state));
    info!("dial: mounted");
    Ok(())
}

fn dispatch(state: &SharedDial, event: DialEvent) -> InputOutcome {
    let outcome = state.borrow_mut().app.handle(event, now_ms());
    schedule_idle_reset(state);
    outcome
}

fn apply_outcome(event: &Event, outcome: InputOutcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
}

/// Keep exactly one pending idle timer matching the app's deadline.
fn schedule_idle_reset(state: &SharedDial) {
    let mut guard = state.borrow_mut();
    let deadline = guard.app.idle_deadline_ms();

    // Replacing the handle drops (and cancels) any pending timer.
    guard.idle_timer = deadline.map(|deadline_ms| {
        let delay = deadline_ms.saturating_sub(now_ms()).min(u64::from(u32::MAX)) as u32;
        let state = state.clone();
        // The fired handle stays in `idle_timer` until the next reschedule;
        // dropping it from inside its own callback would free the running closure.
        Timeout::new(delay, move || {
            state.borrow_mut().app.tick(deadline_ms);
        })
    });
}

async fn load_episodes(state: SharedDial) {
    let mut loader = EpisodeLoader::default();
    let token = js_sys::Math::random().to_string();
    let mut request = loader.begin(&token);

    loop {
        debug!("episodes: fetching {} ({:?})", request.url, request.attempt);
        let response = fetch_text(&request.url).await;
        match loader.on_response(response) {
            LoadStep::Fetch(next) => request = next,
            LoadStep::Loaded(catalog) => {
                state.borrow_mut().app.install_episodes(catalog);
                return;
            }
            LoadStep::GaveUp => {
                state.borrow_mut().app.loading_failed();
                return;
            }
            LoadStep::Ignored => return,
        }
    }
}

fn create_touch_area() -> Result<HtmlElement, DomError> {
    let area: HtmlElement = dom::document()?
        .create_element("div")
        .map_err(DomError::from_js)?
        .dyn_into()
        .map_err(|_| DomError::WrongElementType("div".to_string()))?;

    let style = area.style();
    for (property, value) in [
        ("position", "absolute"),
        ("width", TOUCH_AREA_WIDTH),
        ("height", TOUCH_AREA_HEIGHT),
        ("left", "50%"),
        ("top", "50%"),
        ("transform", "translate(-50%, -50%)"),
        ("z-index", "10"),
    ] {
        style
            .set_property(property, value)
            .map_err(DomError::from_js)?;
    }
    Ok(area)
}

fn first_touch_x(event: &TouchEvent) -> Option<f64> {
    event
        .touches()
        .get(0)
        .map(|touch| f64::from(touch.client_x()))
}

fn hide_instruction_arrow() {
    let Ok(document) = dom::document() else {
        return;
    };
    if let Ok(Some(arrow)) = document.query_selector(INSTRUCTION_ARROW_SELECTOR)
        && let Ok(arrow) = arrow.dyn_into::<HtmlElement>()
        && let Err(err) = arrow.style().set_property("display", "none")
    {
        debug!("dial: failed to hide instruction arrow: {:?}", err);
    }
}
