//! Episode dial state machine: raw input in, dial text and episode HTML out.

use log::{debug, error};

use crate::{
    content::{EpisodeCatalog, EpisodeContent},
    counter::{CircularCounter, EPISODE_COUNT},
    input::{DialEvent, InputConfig, InputNormalizer, InputOutcome},
    render::{DialSurface, dial_label},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    WheelChargeCleared,
}

pub struct DialApp<S>
where
    S: DialSurface,
{
    counter: CircularCounter,
    input: InputNormalizer,
    content: EpisodeContent,
    surface: S,
}

impl<S> DialApp<S>
where
    S: DialSurface,
{
    pub fn new(surface: S, config: InputConfig) -> Self {
        Self::with_episode_count(surface, config, EPISODE_COUNT)
    }

    pub fn with_episode_count(surface: S, config: InputConfig, episode_count: u16) -> Self {
        let mut app = Self {
            counter: CircularCounter::new(episode_count),
            input: InputNormalizer::new(config),
            content: EpisodeContent::default(),
            surface,
        };
        app.render();
        app
    }

    /// Apply one page event. The outcome tells the caller whether to
    /// suppress the browser's default handling.
    pub fn handle(&mut self, event: DialEvent, now_ms: u64) -> InputOutcome {
        let outcome = self.input.apply(event, now_ms);
        if outcome.steps != 0 {
            let value = self.counter.advance(outcome.steps);
            debug!("dial: {:?} steps={} value={}", event, outcome.steps, value);
            self.render();
        }
        outcome
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.input.poll_idle(now_ms) {
            debug!("dial: wheel idle, charge cleared at {}ms", now_ms);
            TickResult::WheelChargeCleared
        } else {
            TickResult::NoRender
        }
    }

    /// Deadline at which [`Self::tick`] should run next, if any.
    pub fn idle_deadline_ms(&self) -> Option<u64> {
        self.input.idle_deadline_ms()
    }

    pub fn install_episodes(&mut self, catalog: EpisodeCatalog) {
        self.content.install(catalog);
        self.render_episode();
    }

    /// Catalog could not be loaded; the panel keeps its placeholder.
    pub fn loading_failed(&mut self) {
        error!("dial: episode catalog unavailable, staying on placeholder");
        self.render_episode();
    }

    pub fn value(&self) -> u16 {
        self.counter.value()
    }

    pub fn is_hovering(&self) -> bool {
        self.input.is_hovering()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn render(&mut self) {
        let label = dial_label(self.counter.value());
        self.surface.set_dial_text(label.as_str());
        self.render_episode();
    }

    fn render_episode(&mut self) {
        let html = self.content.resolve(self.counter.value());
        self.surface.set_episode_html(html);
    }
}

#[cfg(test)]
mod tests;
