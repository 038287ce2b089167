/// Player actions delivered by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Quick Math: the option button carrying this value was clicked.
    SelectAnswer(i32),
    /// Color Catcher: bucket index into the palette.
    PickBucket(usize),
    /// Memory Flash: grid slot 0..=8.
    PressSlot(usize),
    /// Lucky Wheel spin button.
    Spin,
    /// Reaction Test box.
    Tap,
}
