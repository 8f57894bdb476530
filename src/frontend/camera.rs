//! Orthographic camera over the grid

use super::VisualPosition;

const MIN_ORTHO_SIZE: f32 = 0.01;
const MAX_ORTHO_SIZE: f32 = 100.0;

/// Direction of a single pan input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A 2D orthographic camera. `ortho_size` is half the visible height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub ortho_size: f32,
    /// Visible width divided by visible height
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            ortho_size: 5.0,
            aspect: 1.0,
        }
    }
}

impl Camera {
    /// Look at the middle of the grid: horizontally at the center column of
    /// the bottom row, lifted by half the grid's height.
    pub fn center_on_grid(&mut self, size: usize, spacing: f32) {
        self.x = (size / 2) as f32 * spacing;
        self.y = spacing * size as f32 / 2.0;
    }

    /// Zoom just far enough out to see the whole grid
    pub fn frame_grid(&mut self, size: usize, spacing: f32) {
        let half_height = spacing * size as f32 / 2.0 + spacing;
        self.ortho_size = half_height.clamp(MIN_ORTHO_SIZE, MAX_ORTHO_SIZE);
    }

    /// Apply a scroll wheel delta; scrolling up zooms in
    pub fn zoom(&mut self, scroll_delta: f32, zoom_speed: f32) {
        if scroll_delta == 0.0 {
            return;
        }
        let zoomed = self.ortho_size - zoom_speed * scroll_delta;
        self.ortho_size = zoomed.clamp(MIN_ORTHO_SIZE, MAX_ORTHO_SIZE);
    }

    pub fn pan(&mut self, direction: PanDirection, speed: f32) {
        match direction {
            PanDirection::Up => self.y += speed,
            PanDirection::Down => self.y -= speed,
            PanDirection::Left => self.x -= speed,
            PanDirection::Right => self.x += speed,
        }
    }

    /// Whether a visual at `position` falls inside the view
    pub fn contains(&self, position: VisualPosition) -> bool {
        let half_height = self.ortho_size;
        let half_width = self.ortho_size * self.aspect;
        (position.x - self.x).abs() <= half_width && (position.y - self.y).abs() <= half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_on_grid() {
        let mut camera = Camera::default();
        camera.center_on_grid(10, 0.5);
        assert_eq!((camera.x, camera.y), (2.5, 2.5));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.zoom(1.0, 2.0);
        assert_eq!(camera.ortho_size, 3.0);

        camera.zoom(100.0, 1.0);
        assert_eq!(camera.ortho_size, MIN_ORTHO_SIZE);

        camera.zoom(-1000.0, 1.0);
        assert_eq!(camera.ortho_size, MAX_ORTHO_SIZE);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::default();
        camera.pan(PanDirection::Up, 0.5);
        camera.pan(PanDirection::Left, 0.25);
        assert_eq!((camera.x, camera.y), (-0.25, 0.5));
    }

    #[test]
    fn test_contains() {
        let mut camera = Camera::default();
        camera.ortho_size = 1.0;
        assert!(camera.contains(VisualPosition::new(1.0, -1.0)));
        assert!(!camera.contains(VisualPosition::new(1.5, 0.0)));

        camera.aspect = 2.0;
        assert!(camera.contains(VisualPosition::new(1.5, 0.0)));
    }
}
