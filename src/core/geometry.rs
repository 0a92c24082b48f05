//=========================================================================
// Geometry
//=========================================================================
//
// Axis-aligned rectangles in stage units (top-left origin, y grows down).
//
//=========================================================================

//=== Rect ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point test, inclusive of the top-left edge and exclusive of the
    /// bottom-right edge.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Same size, moved so its top-left corner sits at `(x, y)`.
    pub fn moved_to(&self, x: f32, y: f32) -> Rect {
        Rect { x, y, ..*self }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);

        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(29.9, 29.9));
        assert!(!rect.contains(30.0, 15.0));
        assert!(!rect.contains(9.9, 15.0));
    }

    #[test]
    fn intersects_requires_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn center_and_move() {
        let rect = Rect::new(0.0, 0.0, 60.0, 40.0);
        assert_eq!(rect.center(), (30.0, 20.0));
        assert_eq!(rect.moved_to(5.0, 6.0), Rect::new(5.0, 6.0, 60.0, 40.0));
    }
}
