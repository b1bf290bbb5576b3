use super::*;
use crate::input::HitTarget;

#[derive(Default)]
struct RecordingSurface {
    dial: String,
    episode: String,
    dial_writes: usize,
}

impl DialSurface for RecordingSurface {
    fn set_dial_text(&mut self, text: &str) {
        self.dial = text.to_string();
        self.dial_writes += 1;
    }

    fn set_episode_html(&mut self, html: &str) {
        self.episode = html.to_string();
    }
}

fn make_app() -> DialApp<RecordingSurface> {
    DialApp::new(RecordingSurface::default(), InputConfig::default())
}

#[test]
fn initial_render_shows_zero_and_placeholder() {
    let app = make_app();
    assert_eq!(app.surface().dial, "000");
    assert_eq!(app.surface().episode, "Loading...");
}

#[test]
fn click_advances_and_rerenders() {
    let mut app = make_app();
    app.handle(DialEvent::Click, 0);
    assert_eq!(app.value(), 1);
    assert_eq!(app.surface().dial, "001");
}

#[test]
fn swipe_left_from_zero_wraps_to_last_episode() {
    let mut app = make_app();
    app.handle(DialEvent::TouchStart { x: 50.0 }, 0);
    let outcome = app.handle(DialEvent::TouchMove { x: 40.0 }, 0);
    assert!(outcome.prevent_default);
    assert_eq!(app.value(), 146);
    assert_eq!(app.surface().dial, "146");
}

#[test]
fn wheel_without_step_does_not_rerender() {
    let mut app = make_app();
    app.handle(DialEvent::PointerEnter(HitTarget::TouchArea), 0);
    let writes = app.surface().dial_writes;
    app.handle(DialEvent::Wheel { delta_y: 10.0 }, 0);
    assert_eq!(app.surface().dial_writes, writes);
}

#[test]
fn wheel_steps_move_the_dial() {
    let mut app = make_app();
    app.handle(DialEvent::PointerEnter(HitTarget::Dial), 0);
    app.handle(DialEvent::Wheel { delta_y: 25.0 }, 0);
    app.handle(DialEvent::Wheel { delta_y: 25.0 }, 16);
    assert_eq!(app.value(), 1);
    // 10px left over from the previous step, so -90 crosses two boundaries.
    app.handle(DialEvent::Wheel { delta_y: -90.0 }, 32);
    assert_eq!(app.value(), 146);
}

#[test]
fn tick_clears_wheel_charge_after_idle_pause() {
    let mut app = make_app();
    app.handle(DialEvent::PointerEnter(HitTarget::Dial), 0);
    app.handle(DialEvent::Wheel { delta_y: 30.0 }, 100);
    assert_eq!(app.idle_deadline_ms(), Some(250));
    assert_eq!(app.tick(200), TickResult::NoRender);
    assert_eq!(app.tick(250), TickResult::WheelChargeCleared);

    // Leftover 30px is gone, so another 30px does not cross a step.
    app.handle(DialEvent::Wheel { delta_y: 30.0 }, 400);
    assert_eq!(app.value(), 0);
}

#[test]
fn installing_episodes_renders_current_fragment() {
    let mut app = make_app();
    app.handle(DialEvent::Click, 0);
    app.install_episodes(EpisodeCatalog::from_iter([(0, "A"), (1, "<b>one</b>")]));
    assert_eq!(app.surface().episode, "<b>one</b>");

    app.handle(DialEvent::Click, 0);
    assert_eq!(app.surface().episode, "");
}

#[test]
fn failed_load_keeps_placeholder() {
    let mut app = make_app();
    app.loading_failed();
    app.handle(DialEvent::Click, 0);
    assert_eq!(app.surface().episode, "Loading...");
}

#[test]
fn custom_episode_count_wraps_early() {
    let mut app = DialApp::with_episode_count(
        RecordingSurface::default(),
        InputConfig::default(),
        3,
    );
    for _ in 0..3 {
        app.handle(DialEvent::Click, 0);
    }
    assert_eq!(app.value(), 0);
}
