//! Fixed-point and angle types shared by the entity model
//!
//! The target has no FPU, so positions and speeds are stored as signed 8.8
//! fixed-point and headings as 8-bit binary angles.

/// Fixed-point 8.8 number
///
/// Upper 8 bits are the signed integer part, lower 8 bits are fractional,
/// giving a range of -128.0 to just under 128.0 in steps of 1/256.
///
/// # Example
/// ```
/// use mech::types::Fix8;
///
/// let speed = Fix8::from_milli(300); // 0.3, truncated to 76/256
/// let step = speed + speed;
/// assert_eq!(step.raw(), 152);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Debug, Hash)]
#[repr(transparent)]
pub struct Fix8(pub i16);

impl Fix8 {
    /// Zero value
    pub const ZERO: Fix8 = Fix8(0);
    /// One (1.0)
    pub const ONE: Fix8 = Fix8(0x100);
    /// One half (0.5)
    pub const HALF: Fix8 = Fix8(0x80);

    /// Number of fractional bits
    pub const FRAC_BITS: u32 = 8;

    /// Create from integer value
    #[inline]
    pub const fn from_int(n: i8) -> Self {
        Fix8((n as i16) << 8)
    }

    /// Create from raw fixed-point value
    #[inline]
    pub const fn from_raw(raw: i16) -> Self {
        Fix8(raw)
    }

    /// Create from thousandths, truncating toward zero
    ///
    /// This is how decimal literals such as `0.3` land in 8.8: the
    /// fraction that does not fit in 1/256 steps is dropped.
    #[inline]
    pub const fn from_milli(milli: i32) -> Self {
        Fix8(((milli << 8) / 1000) as i16)
    }

    /// Get integer part (rounded toward negative infinity)
    #[inline]
    pub const fn to_int(self) -> i8 {
        (self.0 >> 8) as i8
    }

    /// Get raw fixed-point value
    #[inline]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Multiply two Fix8 values
    #[inline]
    pub const fn mul(self, other: Fix8) -> Fix8 {
        Fix8(((self.0 as i32 * other.0 as i32) >> 8) as i16)
    }

    /// Saturating addition
    #[inline]
    pub const fn saturating_add(self, other: Fix8) -> Fix8 {
        Fix8(self.0.saturating_add(other.0))
    }
}

impl core::ops::Add for Fix8 {
    type Output = Fix8;
    #[inline]
    fn add(self, other: Fix8) -> Fix8 {
        Fix8(self.0.wrapping_add(other.0))
    }
}

impl core::ops::Sub for Fix8 {
    type Output = Fix8;
    #[inline]
    fn sub(self, other: Fix8) -> Fix8 {
        Fix8(self.0.wrapping_sub(other.0))
    }
}

impl core::ops::AddAssign for Fix8 {
    #[inline]
    fn add_assign(&mut self, other: Fix8) {
        self.0 = self.0.wrapping_add(other.0);
    }
}

impl core::ops::SubAssign for Fix8 {
    #[inline]
    fn sub_assign(&mut self, other: Fix8) {
        self.0 = self.0.wrapping_sub(other.0);
    }
}

impl core::ops::Neg for Fix8 {
    type Output = Fix8;
    #[inline]
    fn neg(self) -> Fix8 {
        Fix8(self.0.wrapping_neg())
    }
}

/// Binary angle
///
/// The full circle is 256 steps, so one step is 1.40625 degrees and all
/// arithmetic wraps for free.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash)]
#[repr(transparent)]
pub struct Angle(pub u8);

impl Angle {
    /// Facing along +x
    pub const ZERO: Angle = Angle(0);
    /// Quarter turn (90°)
    pub const QUARTER: Angle = Angle(64);
    /// Half turn (180°)
    pub const HALF: Angle = Angle(128);

    /// Rotate counter-clockwise by `steps`
    #[inline]
    pub const fn turn_left(self, steps: u8) -> Angle {
        Angle(self.0.wrapping_add(steps))
    }

    /// Rotate clockwise by `steps`
    #[inline]
    pub const fn turn_right(self, steps: u8) -> Angle {
        Angle(self.0.wrapping_sub(steps))
    }

    /// Angle in whole degrees (truncated)
    #[inline]
    pub const fn degrees(self) -> u16 {
        ((self.0 as u32 * 360) / 256) as u16
    }
}

/// 2D vector with Fix8 components
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Vec2 {
    pub x: Fix8,
    pub y: Fix8,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: Fix8::ZERO, y: Fix8::ZERO };

    /// Create new vector
    #[inline]
    pub const fn new(x: Fix8, y: Fix8) -> Self {
        Vec2 { x, y }
    }

    /// Create from integer coordinates
    #[inline]
    pub const fn from_ints(x: i8, y: i8) -> Self {
        Vec2 {
            x: Fix8::from_int(x),
            y: Fix8::from_int(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_milli_truncates() {
        assert_eq!(Fix8::from_milli(300).raw(), 76);
        assert_eq!(Fix8::from_milli(200).raw(), 51);
        assert_eq!(Fix8::from_milli(100).raw(), 25);
        assert_eq!(Fix8::from_milli(1000), Fix8::ONE);
        assert_eq!(Fix8::from_milli(-500), -Fix8::HALF);
    }

    #[test]
    fn test_int_conversion() {
        assert_eq!(Fix8::from_int(5).to_int(), 5);
        assert_eq!(Fix8::from_int(-3).to_int(), -3);
        assert_eq!((Fix8::from_int(2) + Fix8::HALF).to_int(), 2);
    }

    #[test]
    fn test_mul() {
        let a = Fix8::from_int(3);
        assert_eq!(a.mul(Fix8::HALF), Fix8::from_raw(0x180));
        assert_eq!(Fix8::from_int(-2).mul(Fix8::from_int(4)), Fix8::from_int(-8));
    }

    #[test]
    fn test_angle_wraps() {
        assert_eq!(Angle(250).turn_left(10), Angle(4));
        assert_eq!(Angle(3).turn_right(5), Angle(254));
        assert_eq!(Angle::QUARTER.degrees(), 90);
        assert_eq!(Angle::HALF.degrees(), 180);
    }
}
