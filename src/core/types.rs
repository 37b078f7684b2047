use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Palette chains cycle through as they are created.
pub const CHAIN_PALETTE: [[u8; 3]; 6] = [
    [255, 94, 94],
    [94, 200, 255],
    [255, 206, 84],
    [130, 230, 140],
    [200, 140, 255],
    [255, 150, 210],
];

/// Color/identity tag of a chain, stored as an index into [`CHAIN_PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChainColor(pub usize);

impl ChainColor {
    /// Tag for the chain at `index` in creation order.
    pub fn cycle(index: usize) -> Self {
        Self(index % CHAIN_PALETTE.len())
    }

    pub fn rgb(&self) -> [u8; 3] {
        CHAIN_PALETTE[self.0 % CHAIN_PALETTE.len()]
    }
}

/// Rectangular working domain anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub width: f32,
    pub height: f32,
}

impl Domain {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Offset that must be applied to a point to bring it back into
    /// `[-margin, extent + margin]` on each axis, or zero if it is inside.
    ///
    /// The period along an axis is `extent + 2 * margin`.
    pub fn wrap_offset(&self, point: Vec2, margin: f32) -> Vec2 {
        let period = self.size() + Vec2::splat(2.0 * margin);
        let mut offset = Vec2::ZERO;

        if point.x < -margin {
            offset.x = period.x;
        } else if point.x > self.width + margin {
            offset.x = -period.x;
        }

        if point.y < -margin {
            offset.y = period.y;
        } else if point.y > self.height + margin {
            offset.y = -period.y;
        }

        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_through_palette() {
        assert_eq!(ChainColor::cycle(0), ChainColor(0));
        assert_eq!(ChainColor::cycle(CHAIN_PALETTE.len()), ChainColor(0));
        assert_eq!(ChainColor::cycle(CHAIN_PALETTE.len() + 2).rgb(), CHAIN_PALETTE[2]);
    }

    #[test]
    fn wrap_offset_only_outside_margin() {
        let domain = Domain::new(100.0, 50.0);
        assert_eq!(domain.wrap_offset(Vec2::new(-10.0, 60.0), 20.0), Vec2::ZERO);
        assert_eq!(
            domain.wrap_offset(Vec2::new(-21.0, 25.0), 20.0),
            Vec2::new(140.0, 0.0)
        );
        assert_eq!(
            domain.wrap_offset(Vec2::new(50.0, 71.0), 20.0),
            Vec2::new(0.0, -90.0)
        );
    }
}
