/// Axis-aligned rectangle in root-window pixel space.
///
/// `valid == false` means "no region", e.g. a monitor that reservations have
/// clipped away entirely. Width and height are signed so that clipping can be
/// expressed without casts; they are never negative once a `Rect` leaves this
/// module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub valid: bool,
}

impl Rect {
    pub const INVALID: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        valid: false,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            valid: true,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> i64 {
        if !self.valid {
            return 0;
        }
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// A valid rectangle with positive extent on both axes.
    pub fn is_usable(&self) -> bool {
        self.valid && !self.is_degenerate()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.valid && x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 <= x1 || y2 <= y1 {
            return Rect::INVALID;
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrinks the rectangle by `margin` on every side.
    ///
    /// An axis that would drop below one pixel collapses to a single pixel at
    /// the middle of the original span, so the result never leaves `self`.
    pub fn inset(&self, margin: i32) -> Rect {
        let (x, width) = inset_span(self.x, self.width, margin);
        let (y, height) = inset_span(self.y, self.height, margin);
        Rect {
            x,
            y,
            width,
            height,
            valid: self.valid,
        }
    }

    /// Forces both dimensions to be non-negative and drops validity when the
    /// rectangle has no area left.
    pub fn normalized(&self) -> Rect {
        let width = self.width.max(0);
        let height = self.height.max(0);
        Rect {
            x: self.x,
            y: self.y,
            width,
            height,
            valid: self.valid && width > 0 && height > 0,
        }
    }
}

fn inset_span(start: i32, len: i32, margin: i32) -> (i32, i32) {
    let shrunk = len - 2 * margin;
    if shrunk >= 1 {
        return (start + margin, shrunk);
    }
    (start + (len.max(1) - 1) / 2, 1)
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.valid {
            return write!(f, "<none>");
        }
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
