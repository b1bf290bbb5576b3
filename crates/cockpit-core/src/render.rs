//! Render capabilities and view models handed to the page layer.

use core::fmt::Write;

use heapless::String as HeaplessString;

use crate::calibration::{CalibrationConfig, Point};

pub const DIAL_LABEL_BYTES: usize = 8;

/// Output sink for the episode dial.
pub trait DialSurface {
    fn set_dial_text(&mut self, text: &str);
    fn set_episode_html(&mut self, html: &str);
}

/// Dial readout, zero padded to three digits.
pub fn dial_label(value: u16) -> HeaplessString<DIAL_LABEL_BYTES> {
    let mut label = HeaplessString::new();
    let _ = write!(label, "{value:03}");
    label
}

const BUTTON_WIDTH_RATIO: f64 = 0.08;
const BUTTON_ASPECT: f64 = 0.36;
const BUTTON_MIN_WIDTH: f64 = 80.0;
const BUTTON_MIN_HEIGHT: f64 = 32.0;

/// Overlay button box in natural image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ButtonBox {
    /// Box sized from the image width and centred on `anchor`.
    pub fn around(anchor: Point, natural_width: f64) -> Self {
        let width = BUTTON_MIN_WIDTH.max((natural_width * BUTTON_WIDTH_RATIO).round());
        let height = BUTTON_MIN_HEIGHT.max((width * BUTTON_ASPECT).round());
        Self {
            x: anchor.x - width / 2.0,
            y: anchor.y - height / 2.0,
            width,
            height,
        }
    }
}

/// SVG attributes for the calibration overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayGeometry {
    pub view_box: String,
    pub polygon_points: String,
    pub button: ButtonBox,
}

impl OverlayGeometry {
    /// `None` until the image reports its natural size.
    pub fn project(
        config: &CalibrationConfig,
        natural_width: u32,
        natural_height: u32,
    ) -> Option<Self> {
        if natural_width == 0 {
            return None;
        }

        let polygon_points = config
            .quadrilateral
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            view_box: format!("0 0 {natural_width} {natural_height}"),
            polygon_points,
            button: ButtonBox::around(config.anchor, f64::from(natural_width)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dial_label_is_zero_padded() {
        assert_eq!(dial_label(0).as_str(), "000");
        assert_eq!(dial_label(7).as_str(), "007");
        assert_eq!(dial_label(42).as_str(), "042");
        assert_eq!(dial_label(146).as_str(), "146");
    }

    #[test]
    fn overlay_waits_for_natural_size() {
        assert_eq!(OverlayGeometry::project(&CalibrationConfig::default(), 0, 0), None);
    }

    #[test]
    fn overlay_projects_default_geometry() {
        let geometry = OverlayGeometry::project(&CalibrationConfig::default(), 1920, 1080).unwrap();
        assert_eq!(geometry.view_box, "0 0 1920 1080");
        assert_eq!(geometry.polygon_points, "400,50 1500,50 1400,950 500,950");
        // 1920 * 0.08 = 153.6 -> 154 wide, 154 * 0.36 = 55.44 -> 55 high
        assert_eq!(
            geometry.button,
            ButtonBox {
                x: 950.0 - 77.0,
                y: 500.0 - 27.5,
                width: 154.0,
                height: 55.0,
            }
        );
    }

    #[test]
    fn button_box_has_a_floor_on_small_images() {
        let button = ButtonBox::around(Point::new(100.0, 100.0), 300.0);
        assert_eq!(button.width, 80.0);
        assert_eq!(button.height, 32.0);
        assert_eq!(button.x, 60.0);
        assert_eq!(button.y, 84.0);
    }
}
