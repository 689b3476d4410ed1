use bitflags::bitflags;

bitflags! {
    /// Flags a control returns to tell the host event loop what it needs.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Update: u8 {
        /// The control's appearance changed and a redraw is needed.
        const DRAW = 0b001;
        /// The control's geometry changed and layout should run again.
        const LAYOUT = 0b010;
        /// Application state changed and dependent values should re-evaluate.
        const EVAL = 0b100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine() {
        let mut update = Update::empty();
        assert!(update.is_empty());

        update.insert(Update::DRAW);
        update |= Update::LAYOUT;
        assert!(update.contains(Update::DRAW));
        assert!(update.contains(Update::LAYOUT));
        assert!(!update.contains(Update::EVAL));
    }
}
