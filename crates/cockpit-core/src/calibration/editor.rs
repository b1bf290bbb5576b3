use log::{debug, info, warn};

use super::{
    CalibrationConfig, DEFAULT_LABEL, ImageFrame, PickProgress, PickSession, Point,
    store::{CalibrationStore, KeyValueStore},
};

pub const IDLE_HINT: &str = "Click \"Pick\" then click the image to set points A \u{2192} D in order.";
pub const COMPLETE_HINT: &str = "Pick complete, saved to localStorage";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    AnchorMoved,
    Picked(PickProgress),
    /// Modifier click during a pick: the corner was stored and the anchor moved.
    PickedAndAnchorMoved(PickProgress),
}

/// `Number(text) || 0`: blank, unparsable and non-finite input reads as zero.
pub fn parse_coordinate(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Calibration state plus its persistence.
///
/// Every completed mutation is written through to the store. Write failures
/// are logged and otherwise ignored.
pub struct CalibrationEditor<K>
where
    K: KeyValueStore,
{
    config: CalibrationConfig,
    session: PickSession,
    pick_completed: bool,
    store: CalibrationStore<K>,
}

impl<K> CalibrationEditor<K>
where
    K: KeyValueStore,
{
    pub fn new(store: CalibrationStore<K>) -> Self {
        let config = match store.load() {
            Some(config) => {
                info!("calibration: restored saved overlay");
                config
            }
            None => CalibrationConfig::default(),
        };

        Self {
            config,
            session: PickSession::Inactive,
            pick_completed: false,
            store,
        }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn session(&self) -> PickSession {
        self.session
    }

    pub fn store(&self) -> &CalibrationStore<K> {
        &self.store
    }

    /// Enter picking at corner A. Returns `false` while a pick is underway.
    pub fn start_pick(&mut self) -> bool {
        let started = self.session.start();
        if started {
            self.pick_completed = false;
            debug!("calibration: pick started");
        }
        started
    }

    pub fn submit_point(&mut self, point: Point) -> PickProgress {
        let progress = self.session.submit(&mut self.config.quadrilateral, point);
        match progress {
            PickProgress::Ignored => {}
            PickProgress::Next(corner) => {
                debug!(
                    "calibration: stored ({}, {}), next corner {}",
                    point.x,
                    point.y,
                    corner.label()
                );
            }
            PickProgress::Complete => {
                self.pick_completed = true;
                info!("calibration: pick complete");
                self.persist();
            }
        }
        progress
    }

    /// Click on the background image. Every click feeds the pick sequence;
    /// with `modifier` held the anchor also moves to the clicked point.
    pub fn image_click(
        &mut self,
        frame: &ImageFrame,
        client_x: f64,
        client_y: f64,
        modifier: bool,
    ) -> ClickOutcome {
        let Some(point) = frame.to_natural(client_x, client_y) else {
            return ClickOutcome::Ignored;
        };

        let progress = self.submit_point(point);
        if !modifier {
            return match progress {
                PickProgress::Ignored => ClickOutcome::Ignored,
                progress => ClickOutcome::Picked(progress),
            };
        }

        self.move_anchor(point);
        match progress {
            PickProgress::Ignored => ClickOutcome::AnchorMoved,
            progress => ClickOutcome::PickedAndAnchorMoved(progress),
        }
    }

    pub fn move_anchor(&mut self, anchor: Point) {
        self.config.anchor = anchor;
        debug!("calibration: anchor moved to ({}, {})", anchor.x, anchor.y);
        self.persist();
    }

    /// Replace all four corners from the numeric fields (`p0x, p0y, .. p3y`).
    pub fn apply_fields<T: AsRef<str>>(&mut self, fields: &[T; 8]) {
        for (i, point) in self.config.quadrilateral.iter_mut().enumerate() {
            *point = Point::new(
                parse_coordinate(fields[i * 2].as_ref()),
                parse_coordinate(fields[i * 2 + 1].as_ref()),
            );
        }
        self.persist();
    }

    /// Flattened corner coordinates in field order.
    pub fn field_values(&self) -> [f64; 8] {
        let mut values = [0.0; 8];
        for (i, point) in self.config.quadrilateral.iter().enumerate() {
            values[i * 2] = point.x;
            values[i * 2 + 1] = point.y;
        }
        values
    }

    /// Set the button label; blank text falls back to the default.
    pub fn set_label(&mut self, text: &str) -> &str {
        self.config.label = if text.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            text.to_string()
        };
        self.persist();
        &self.config.label
    }

    /// Restore default geometry and drop the stored record.
    pub fn reset(&mut self) {
        self.config.reset_geometry();
        if let Err(err) = self.store.clear() {
            warn!("calibration: failed to clear stored overlay: {:?}", err);
        }
        info!("calibration: reset to defaults");
    }

    pub fn hint(&self) -> String {
        match self.session {
            PickSession::Picking(corner) => {
                format!("Picking mode: click image for Point {}", corner.label())
            }
            PickSession::Inactive if self.pick_completed => COMPLETE_HINT.to_string(),
            PickSession::Inactive => IDLE_HINT.to_string(),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.config) {
            warn!("calibration: failed to persist overlay: {:?}", err);
        }
    }
}
