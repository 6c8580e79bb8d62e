//! Layer/mask filtering for the collision broad phase
//!
//! A [`LayerMask`] packs two 16-bit halves into one `u32`:
//! - bits 0-15 are *layers*: what a body is
//! - bits 16-31 are *masks*: what a body looks for
//!
//! Mask bit `16 + k` pairs with layer bit `k`. Ids are 1-based, so layer id
//! `1` is bit 0 and mask id `1` is bit 16.

use super::error::CollisionError;
use bitflags::bitflags;
use std::fmt;

/// Number of layer (and mask) ids
pub const LAYER_COUNT: u8 = 16;

bitflags! {
    /// Collision layer and mask bits of a body
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct LayerMask: u32 {
        /// Layer 1
        const LAYER_1 = 1 << 0;
        /// Layer 2
        const LAYER_2 = 1 << 1;
        /// Layer 3
        const LAYER_3 = 1 << 2;
        /// Layer 4
        const LAYER_4 = 1 << 3;
        /// Layer 5
        const LAYER_5 = 1 << 4;
        /// Layer 6
        const LAYER_6 = 1 << 5;
        /// Layer 7
        const LAYER_7 = 1 << 6;
        /// Layer 8
        const LAYER_8 = 1 << 7;
        /// Layer 9
        const LAYER_9 = 1 << 8;
        /// Layer 10
        const LAYER_10 = 1 << 9;
        /// Layer 11
        const LAYER_11 = 1 << 10;
        /// Layer 12
        const LAYER_12 = 1 << 11;
        /// Layer 13
        const LAYER_13 = 1 << 12;
        /// Layer 14
        const LAYER_14 = 1 << 13;
        /// Layer 15
        const LAYER_15 = 1 << 14;
        /// Layer 16
        const LAYER_16 = 1 << 15;

        /// Mask 1 (looks for layer 1)
        const MASK_1 = 1 << 16;
        /// Mask 2
        const MASK_2 = 1 << 17;
        /// Mask 3
        const MASK_3 = 1 << 18;
        /// Mask 4
        const MASK_4 = 1 << 19;
        /// Mask 5
        const MASK_5 = 1 << 20;
        /// Mask 6
        const MASK_6 = 1 << 21;
        /// Mask 7
        const MASK_7 = 1 << 22;
        /// Mask 8
        const MASK_8 = 1 << 23;
        /// Mask 9
        const MASK_9 = 1 << 24;
        /// Mask 10
        const MASK_10 = 1 << 25;
        /// Mask 11
        const MASK_11 = 1 << 26;
        /// Mask 12
        const MASK_12 = 1 << 27;
        /// Mask 13
        const MASK_13 = 1 << 28;
        /// Mask 14
        const MASK_14 = 1 << 29;
        /// Mask 15
        const MASK_15 = 1 << 30;
        /// Mask 16
        const MASK_16 = 1 << 31;

        /// Every layer bit
        const LAYER_ALL = 0x0000_FFFF;
        /// Every mask bit
        const MASK_ALL = 0xFFFF_0000;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_id(id: u8) -> Result<u8, CollisionError> {
    if (1..=LAYER_COUNT).contains(&id) {
        Ok(id)
    } else {
        Err(CollisionError::InvalidLayerId(id))
    }
}

impl LayerMask {
    /// Single layer bit for `id`
    pub fn layer(id: u8) -> Result<Self, CollisionError> {
        let id = check_id(id)?;
        Ok(Self::from_bits_retain(1 << (id - 1)))
    }

    /// Single mask bit for `id`
    pub fn mask(id: u8) -> Result<Self, CollisionError> {
        let id = check_id(id)?;
        Ok(Self::from_bits_retain(1 << (u32::from(id) + 15)))
    }

    /// Build a value from layer ids and mask ids
    ///
    /// # Example
    /// ```
    /// use glyph_engine::physics::LayerMask;
    ///
    /// let player = LayerMask::from_ids(&[1], &[2, 3]).unwrap();
    /// assert!(player.has_layer(1).unwrap());
    /// assert!(player.has_mask(3).unwrap());
    /// ```
    pub fn from_ids(layers: &[u8], masks: &[u8]) -> Result<Self, CollisionError> {
        let mut value = Self::empty();
        for &id in layers {
            value.add_layer(id)?;
        }
        for &id in masks {
            value.add_mask(id)?;
        }
        Ok(value)
    }

    /// Set layer bit `id`
    pub fn add_layer(&mut self, id: u8) -> Result<(), CollisionError> {
        self.insert(Self::layer(id)?);
        Ok(())
    }

    /// Set mask bit `id`
    pub fn add_mask(&mut self, id: u8) -> Result<(), CollisionError> {
        self.insert(Self::mask(id)?);
        Ok(())
    }

    /// Clear layer bit `id`
    pub fn remove_layer(&mut self, id: u8) -> Result<(), CollisionError> {
        self.remove(Self::layer(id)?);
        Ok(())
    }

    /// Clear mask bit `id`
    pub fn remove_mask(&mut self, id: u8) -> Result<(), CollisionError> {
        self.remove(Self::mask(id)?);
        Ok(())
    }

    /// Whether layer bit `id` is set
    pub fn has_layer(&self, id: u8) -> Result<bool, CollisionError> {
        Ok(self.contains(Self::layer(id)?))
    }

    /// Whether mask bit `id` is set
    pub fn has_mask(&self, id: u8) -> Result<bool, CollisionError> {
        Ok(self.contains(Self::mask(id)?))
    }

    /// Set layer ids in ascending order
    pub fn layers(&self) -> impl Iterator<Item = u8> {
        let bits = self.bits();
        (1..=LAYER_COUNT).filter(move |&id| bits & (1 << (id - 1)) != 0)
    }

    /// Set mask ids in ascending order
    pub fn masks(&self) -> impl Iterator<Item = u8> {
        let bits = self.bits() >> 16;
        (1..=LAYER_COUNT).filter(move |&id| bits & (1 << (id - 1)) != 0)
    }

    /// Whether any of our mask bits looks for one of `other`'s layers
    pub fn looks_for(&self, other: Self) -> bool {
        (self.bits() >> 16) & other.bits() & Self::LAYER_ALL.bits() != 0
    }

    /// Whether this value can take part in a tick at all
    pub fn is_inert(&self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for LayerMask {
    /// Binary form, masks then layers: `MMMMMMMMMMMMMMMM_LLLLLLLLLLLLLLLL`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();
        write!(f, "{:016b}_{:016b}", bits >> 16, bits & 0xFFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_and_mask_bit_positions() {
        assert_eq!(LayerMask::layer(1).unwrap(), LayerMask::LAYER_1);
        assert_eq!(LayerMask::layer(16).unwrap(), LayerMask::LAYER_16);
        assert_eq!(LayerMask::mask(1).unwrap(), LayerMask::MASK_1);
        assert_eq!(LayerMask::mask(16).unwrap().bits(), 0x8000_0000);
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut value = LayerMask::empty();
        assert!(matches!(value.add_layer(0), Err(CollisionError::InvalidLayerId(0))));
        assert!(matches!(value.add_mask(17), Err(CollisionError::InvalidLayerId(17))));
        assert!(value.has_layer(17).is_err());
        assert!(value.remove_mask(0).is_err());
        assert!(value.is_empty());
    }

    #[test]
    fn test_add_remove_query() {
        let mut value = LayerMask::empty();
        value.add_layer(3).unwrap();
        value.add_mask(5).unwrap();

        assert!(value.has_layer(3).unwrap());
        assert!(!value.has_mask(3).unwrap());
        assert!(value.has_mask(5).unwrap());

        value.remove_layer(3).unwrap();
        assert!(!value.has_layer(3).unwrap());
        assert_eq!(value, LayerMask::MASK_5);
    }

    #[test]
    fn test_iteration_ascending() {
        let value = LayerMask::from_ids(&[9, 1, 16], &[2, 15]).unwrap();
        assert_eq!(value.layers().collect::<Vec<_>>(), vec![1, 9, 16]);
        assert_eq!(value.masks().collect::<Vec<_>>(), vec![2, 15]);
        assert_eq!(LayerMask::LAYER_ALL.layers().count(), 16);
        assert_eq!(LayerMask::LAYER_ALL.masks().count(), 0);
    }

    #[test]
    fn test_union_and_difference() {
        let a = LayerMask::LAYER_1 | LayerMask::MASK_2;
        let b = a | LayerMask::LAYER_3;
        assert_eq!(b - LayerMask::LAYER_1, LayerMask::MASK_2 | LayerMask::LAYER_3);
        assert_eq!(LayerMask::LAYER_ALL | LayerMask::MASK_ALL, LayerMask::all());
    }

    #[test]
    fn test_looks_for() {
        let seeker = LayerMask::MASK_4;
        let target = LayerMask::LAYER_4;
        assert!(seeker.looks_for(target));
        assert!(!target.looks_for(seeker));
        assert!(!seeker.looks_for(LayerMask::LAYER_5));
    }

    #[test]
    fn test_display_binary() {
        let value = LayerMask::LAYER_1 | LayerMask::MASK_16;
        assert_eq!(value.to_string(), "1000000000000000_0000000000000001");
    }
}
