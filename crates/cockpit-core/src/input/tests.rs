use super::*;

fn hovering_normalizer() -> InputNormalizer {
    let mut input = InputNormalizer::default();
    input.apply(DialEvent::PointerEnter(HitTarget::Dial), 0);
    input
}

#[test]
fn click_is_one_step_without_suppressing_default() {
    let mut input = InputNormalizer::default();
    assert_eq!(
        input.apply(DialEvent::Click, 0),
        InputOutcome {
            steps: 1,
            prevent_default: false
        }
    );
}

#[test]
fn wheel_is_ignored_unless_hovering() {
    let mut input = InputNormalizer::default();
    let outcome = input.apply(DialEvent::Wheel { delta_y: 120.0 }, 0);
    assert_eq!(outcome, InputOutcome::default());
    assert_eq!(input.wheel_charge(), 0.0);
    assert_eq!(input.idle_deadline_ms(), None);
}

#[test]
fn wheel_accumulates_small_deltas_into_one_step() {
    let mut input = hovering_normalizer();

    let first = input.apply(DialEvent::Wheel { delta_y: 25.0 }, 10);
    assert_eq!(first.steps, 0);
    assert!(first.prevent_default);

    let second = input.apply(DialEvent::Wheel { delta_y: 25.0 }, 20);
    assert_eq!(second.steps, 1);
    assert_eq!(input.wheel_charge(), 10.0);
}

#[test]
fn wheel_remainder_keeps_negative_sign() {
    let mut input = hovering_normalizer();
    input.apply(DialEvent::Wheel { delta_y: -25.0 }, 10);
    let outcome = input.apply(DialEvent::Wheel { delta_y: -25.0 }, 20);
    assert_eq!(outcome.steps, -1);
    assert_eq!(input.wheel_charge(), -10.0);
}

#[test]
fn fast_wheel_maps_to_multiple_steps() {
    let mut input = hovering_normalizer();
    let outcome = input.apply(DialEvent::Wheel { delta_y: 130.0 }, 0);
    assert_eq!(outcome.steps, 3);
    assert_eq!(input.wheel_charge(), 10.0);
}

#[test]
fn exact_boundary_steps_every_time() {
    let mut input = hovering_normalizer();
    for now in [0, 10, 20] {
        assert_eq!(input.apply(DialEvent::Wheel { delta_y: 40.0 }, now).steps, 1);
        assert_eq!(input.wheel_charge(), 0.0);
    }
}

#[test]
fn idle_pause_discards_leftover_charge() {
    let mut input = hovering_normalizer();
    input.apply(DialEvent::Wheel { delta_y: 30.0 }, 1_000);
    assert_eq!(input.idle_deadline_ms(), Some(1_150));

    assert!(!input.poll_idle(1_149));
    assert_eq!(input.wheel_charge(), 30.0);

    assert!(input.poll_idle(1_150));
    assert_eq!(input.wheel_charge(), 0.0);
    assert_eq!(input.idle_deadline_ms(), None);
}

#[test]
fn continued_scrolling_pushes_idle_deadline_back() {
    let mut input = hovering_normalizer();
    input.apply(DialEvent::Wheel { delta_y: 10.0 }, 0);
    input.apply(DialEvent::Wheel { delta_y: 10.0 }, 100);
    assert!(!input.poll_idle(200));
    assert_eq!(input.wheel_charge(), 20.0);
    assert!(input.poll_idle(250));
}

#[test]
fn leaving_hit_region_clears_charge_immediately() {
    let mut input = hovering_normalizer();
    input.apply(DialEvent::Wheel { delta_y: 30.0 }, 0);
    input.apply(DialEvent::PointerLeave(HitTarget::Dial), 5);
    assert_eq!(input.wheel_charge(), 0.0);
    assert_eq!(input.idle_deadline_ms(), None);
    assert!(!input.is_hovering());
}

#[test]
fn either_hit_target_enables_wheel() {
    let mut input = InputNormalizer::default();
    input.apply(DialEvent::PointerEnter(HitTarget::TouchArea), 0);
    input.apply(DialEvent::PointerEnter(HitTarget::Dial), 0);
    input.apply(DialEvent::PointerLeave(HitTarget::TouchArea), 0);
    assert!(input.is_hovering());
    assert_eq!(input.apply(DialEvent::Wheel { delta_y: 40.0 }, 0).steps, 1);
}

#[test]
fn swipe_at_threshold_does_not_step() {
    let mut input = InputNormalizer::default();
    input.apply(DialEvent::TouchStart { x: 100.0 }, 0);
    let outcome = input.apply(DialEvent::TouchMove { x: 108.0 }, 0);
    assert_eq!(outcome.steps, 0);
    assert!(outcome.prevent_default);
}

#[test]
fn swipe_past_threshold_steps_once_regardless_of_distance() {
    let mut input = InputNormalizer::default();
    input.apply(DialEvent::TouchStart { x: 100.0 }, 0);
    assert_eq!(input.apply(DialEvent::TouchMove { x: 109.0 }, 0).steps, 1);

    input.apply(DialEvent::TouchStart { x: 100.0 }, 0);
    assert_eq!(input.apply(DialEvent::TouchMove { x: 400.0 }, 0).steps, 1);
    assert_eq!(input.apply(DialEvent::TouchMove { x: 20.0 }, 0).steps, -1);
}

#[test]
fn swipe_reference_follows_each_step() {
    let mut gesture = TouchGesture::new(SWIPE_SENSITIVITY_PX);
    gesture.begin(0.0);
    assert_eq!(gesture.track(5.0), 0);
    assert_eq!(gesture.reference_x(), Some(0.0));
    assert_eq!(gesture.track(10.0), 1);
    assert_eq!(gesture.reference_x(), Some(10.0));
    assert_eq!(gesture.track(18.0), 0);
    assert_eq!(gesture.track(19.0), 1);
}

#[test]
fn touch_start_suppresses_default() {
    let mut input = InputNormalizer::default();
    assert!(input.apply(DialEvent::TouchStart { x: 3.0 }, 0).prevent_default);
}

#[test]
fn custom_config_changes_step_size() {
    let config = InputConfig::default()
        .with_wheel_step_pixels(100.0)
        .with_wheel_idle_reset_ms(50)
        .with_swipe_sensitivity_px(20.0);
    let mut input = InputNormalizer::new(config);
    input.apply(DialEvent::PointerEnter(HitTarget::Dial), 0);
    assert_eq!(input.apply(DialEvent::Wheel { delta_y: 99.0 }, 0).steps, 0);
    assert_eq!(input.idle_deadline_ms(), Some(50));

    input.apply(DialEvent::TouchStart { x: 0.0 }, 0);
    assert_eq!(input.apply(DialEvent::TouchMove { x: 15.0 }, 0).steps, 0);
}
