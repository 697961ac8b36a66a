use dailyflame_core::catalog::{BehaviorTag, GameDescriptor};
use dailyflame_core::slot::Slot;

/// What a slot card shows on the main page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCard {
    pub slot: Slot,
    pub name: String,
    pub description: String,
    /// Completed cards show a check glyph and no play action.
    pub completed: bool,
}

/// The presentation side the host drives.
pub trait RenderSurface {
    /// Redraw every slot card and the `completed / total` counter.
    fn render_slots(&mut self, cards: &[SlotCard]);
    /// Light or dim the reward flame.
    fn set_reward(&mut self, lit: bool);
    fn open_modal(&mut self, slot: Slot, descriptor: &GameDescriptor);
    /// Redraw a game from its MessagePack state snapshot.
    fn render_game(&mut self, slot: Slot, behavior: BehaviorTag, state: &[u8]);
    fn close_modal(&mut self, slot: Slot);
    /// Throw away everything drawn and start over.
    fn reload(&mut self);
}
