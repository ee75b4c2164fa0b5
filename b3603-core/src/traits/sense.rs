//! Regulation mode sense trait

/// CC/CV sense line
pub trait ModeSense {
    /// Whether the regulator is limiting current
    fn is_constant_current(&mut self) -> bool;
}
