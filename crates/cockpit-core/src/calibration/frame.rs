use super::Point;

/// Displayed placement of the background image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageFrame {
    pub natural_width: u32,
    pub natural_height: u32,
    /// Bounding rect in client coordinates.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageFrame {
    /// Map a client-space position onto natural image pixels, rounded.
    pub fn to_natural(&self, client_x: f64, client_y: f64) -> Option<Point> {
        if self.natural_width == 0 || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        let x = (client_x - self.left) / self.width * f64::from(self.natural_width);
        let y = (client_y - self.top) / self.height * f64::from(self.natural_height);
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(Point::new(x.round(), y.round()))
    }
}
