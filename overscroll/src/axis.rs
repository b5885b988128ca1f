/// Which of the two spring axes is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// The scroll axis a controller is bound to.
///
/// A reversed layout lays content out from the far edge (e.g. a chat list anchored to the
/// bottom), which flips the sign of every delta and velocity relative to the head/tail gaps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBinding {
    pub orientation: Orientation,
    pub reversed: bool,
}

impl AxisBinding {
    pub fn new(orientation: Orientation, reversed: bool) -> Self {
        Self {
            orientation,
            reversed,
        }
    }

    pub fn axis(self) -> Axis {
        match self.orientation {
            Orientation::Vertical => Axis::Y,
            Orientation::Horizontal => Axis::X,
        }
    }

    /// `-1` for reversed layouts, `1` otherwise.
    pub fn sign(self) -> i32 {
        if self.reversed { -1 } else { 1 }
    }

    /// Picks the component along the bound axis.
    pub fn along<T>(self, x: T, y: T) -> T {
        match self.orientation {
            Orientation::Vertical => y,
            Orientation::Horizontal => x,
        }
    }

    /// Spreads a delta along the bound axis into `(dx, dy)`.
    pub fn split(self, delta: i32) -> (i32, i32) {
        match self.orientation {
            Orientation::Vertical => (0, delta),
            Orientation::Horizontal => (delta, 0),
        }
    }

    /// Converts a raw (physical) delta along the axis into logical space, where positive moves
    /// toward the tail.
    pub fn logical(self, delta: i32) -> i32 {
        delta * self.sign()
    }
}
