//! Bubbles - the pieces placed on the grid.
//!
//! A placed bubble is a color at a grid cell. Its pixel centre is kept
//! alongside as a rendering cache and is always derived from the cell.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hex::GridCoord;

/// The fixed six-color palette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Default, Serialize, Deserialize,
)]
pub enum BubbleColor {
    #[default]
    Coral,
    Teal,
    Sky,
    Salmon,
    Mint,
    Sun,
}

impl BubbleColor {
    /// Every palette entry, in draw order.
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Coral,
        BubbleColor::Teal,
        BubbleColor::Sky,
        BubbleColor::Salmon,
        BubbleColor::Mint,
        BubbleColor::Sun,
    ];

    /// Get the actual color for rendering.
    pub fn to_color(self) -> Color {
        match self {
            BubbleColor::Coral => Color::srgb_u8(0xFF, 0x6B, 0x6B),
            BubbleColor::Teal => Color::srgb_u8(0x4E, 0xCD, 0xC4),
            BubbleColor::Sky => Color::srgb_u8(0x45, 0xB7, 0xD1),
            BubbleColor::Salmon => Color::srgb_u8(0xFF, 0xA0, 0x7A),
            BubbleColor::Mint => Color::srgb_u8(0x98, 0xD8, 0xC8),
            BubbleColor::Sun => Color::srgb_u8(0xF7, 0xDC, 0x6F),
        }
    }

    /// Draw a uniformly random palette color.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A bubble sitting on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Bubble {
    pub coord: GridCoord,
    pub color: BubbleColor,
    /// Pixel centre, always `coord.to_pixel()`.
    pos: Vec2,
}

impl Bubble {
    pub fn new(coord: GridCoord, color: BubbleColor) -> Self {
        Self {
            coord,
            color,
            pos: coord.to_pixel(),
        }
    }

    /// Pixel centre of this bubble.
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }
}
