/// Integer axis-aligned rectangle in world pixels.
///
/// Overlap is strict: rectangles that only share an edge do not collide.
/// This is what lets a body rest on a floor without being pushed out of it
/// every frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 { self.x }
    #[inline]
    pub fn right(&self) -> i32 { self.x + self.w }
    #[inline]
    pub fn top(&self) -> i32 { self.y }
    #[inline]
    pub fn bottom(&self) -> i32 { self.y + self.h }
    #[inline]
    pub fn center_x(&self) -> i32 { self.x + self.w / 2 }

    pub fn set_right(&mut self, right: i32) { self.x = right - self.w; }
    pub fn set_bottom(&mut self, bottom: i32) { self.y = bottom - self.h; }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow by `dw` total width and `dh` total height, keeping the center.
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect {
            x: self.x - dw / 2,
            y: self.y - dh / 2,
            w: self.w + dw,
            h: self.h + dh,
        }
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }
}
