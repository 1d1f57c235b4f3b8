//! Identifier and display-color assignment for new subscriptions.

use uuid::Uuid;

/// Fixed palette display colors are drawn from.
pub const SUBSCRIPTION_COLORS: [&str; 6] = [
    "#4F46E5", // blue
    "#6366F1", // indigo
    "#8B5CF6", // purple
    "#EC4899", // pink
    "#14B8A6", // teal
    "#10B981", // green
];

/// Produces identifiers for newly created records.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> Uuid;
}

/// Random v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic identifiers `1, 2, 3, …` encoded as UUIDs.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    pub fn starting_at(first: u128) -> Self {
        Self {
            issued: first.saturating_sub(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::from_u128(self.issued)
    }
}

/// Chooses a display color for records created without one.
pub trait ColorPicker: Send {
    fn pick(&mut self) -> String;
}

/// Walks the palette from a seed offset, wrapping around.
#[derive(Debug, Default, Clone)]
pub struct PaletteColors {
    cursor: usize,
}

impl PaletteColors {
    pub fn seeded(seed: u64) -> Self {
        Self {
            cursor: (seed % SUBSCRIPTION_COLORS.len() as u64) as usize,
        }
    }

    /// Seeds the walk from a fresh random UUID.
    pub fn random() -> Self {
        let bytes = Uuid::new_v4().as_u128();
        Self::seeded((bytes % u128::from(u64::MAX)) as u64)
    }
}

impl ColorPicker for PaletteColors {
    fn pick(&mut self) -> String {
        let color = SUBSCRIPTION_COLORS[self.cursor % SUBSCRIPTION_COLORS.len()];
        self.cursor = (self.cursor + 1) % SUBSCRIPTION_COLORS.len();
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_reproducible() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), Uuid::from_u128(1));
        assert_eq!(ids.next_id(), Uuid::from_u128(2));
        let mut offset = SequentialIds::starting_at(10);
        assert_eq!(offset.next_id(), Uuid::from_u128(10));
    }

    #[test]
    fn palette_wraps_from_seed() {
        let mut colors = PaletteColors::seeded(5);
        assert_eq!(colors.pick(), "#10B981");
        assert_eq!(colors.pick(), "#4F46E5");
        assert!(SUBSCRIPTION_COLORS.contains(&PaletteColors::random().pick().as_str()));
    }
}
