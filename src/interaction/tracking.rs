/// Per (node, pointer) interaction state.
///
/// An entry is created on the first hit and removed once no flag remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionTrackingData {
    pointer_id: u32,
    flags: u8,
}

impl InteractionTrackingData {
    pub const NONE: u8 = 0;
    pub const OVER: u8 = 1 << 0;
    pub const LEFT_DOWN: u8 = 1 << 1;
    pub const RIGHT_DOWN: u8 = 1 << 2;

    #[must_use]
    pub fn new(pointer_id: u32) -> Self {
        Self {
            pointer_id,
            flags: Self::NONE,
        }
    }

    #[must_use]
    pub fn pointer_id(&self) -> u32 {
        self.pointer_id
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[must_use]
    pub fn none(&self) -> bool {
        self.flags == Self::NONE
    }

    #[must_use]
    pub fn over(&self) -> bool {
        self.flags & Self::OVER != 0
    }

    pub fn set_over(&mut self, yes: bool) {
        self.set_flag(Self::OVER, yes);
    }

    #[must_use]
    pub fn left_down(&self) -> bool {
        self.flags & Self::LEFT_DOWN != 0
    }

    pub fn set_left_down(&mut self, yes: bool) {
        self.set_flag(Self::LEFT_DOWN, yes);
    }

    #[must_use]
    pub fn right_down(&self) -> bool {
        self.flags & Self::RIGHT_DOWN != 0
    }

    pub fn set_right_down(&mut self, yes: bool) {
        self.set_flag(Self::RIGHT_DOWN, yes);
    }

    fn set_flag(&mut self, flag: u8, yes: bool) {
        if yes {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionTrackingData;

    #[test]
    fn flags_are_independent() {
        let mut tracking = InteractionTrackingData::new(1);
        assert!(tracking.none());
        tracking.set_over(true);
        tracking.set_right_down(true);
        assert!(tracking.over() && tracking.right_down() && !tracking.left_down());
        tracking.set_over(false);
        tracking.set_right_down(false);
        assert!(tracking.none());
    }
}
