use num_traits::NumCast;

/// Width and height of a rectangular area.
///
/// A zero size is a legal value. A viewport that has not been laid out yet
/// reports a zero size, and everything downstream is expected to check
/// [`Size::is_zero`] before dividing by a dimension.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + PartialOrd + Copy + NumCast> Size<Num> {
    /// Creates a new instance.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width of the area.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Height of the area.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }

    /// Converts the underlying numeric type.
    pub fn cast<T: num_traits::Num + NumCast + PartialOrd + Copy>(&self) -> Size<T> {
        Size {
            width: T::from(self.width).expect("invalid value"),
            height: T::from(self.height).expect("invalid value"),
        }
    }
}
