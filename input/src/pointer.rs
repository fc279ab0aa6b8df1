use bitflags::bitflags;
use derive_more::{Display, From};
use serde::Deserialize;
use winit::keyboard::ModifiersState;

/// Identifies one physical contact (mouse, finger, pen) from press until release.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, From)]
#[display("#{_0}")]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: Self = Self(0);

    /// The pointer for a winit touch contact. Touch ids are shifted by one so that they never
    /// collide with [`Self::MOUSE`].
    pub fn touch(id: u64) -> Self {
        Self(id.wrapping_add(1))
    }
}

bitflags! {
    /// Keyboard modifiers held while an event was generated.
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL = 0b0010;
        const ALT = 0b0100;
        /// The Windows key on Windows or the Command key on a Mac.
        const META = 0b1000;
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, state.shift_key());
        modifiers.set(Modifiers::CTRL, state.control_key());
        modifiers.set(Modifiers::ALT, state.alt_key());
        modifiers.set(Modifiers::META, state.super_key());
        modifiers
    }
}

/// A single modifier key, as named in configuration files.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl From<ModifierKey> for Modifiers {
    fn from(key: ModifierKey) -> Self {
        match key {
            ModifierKey::Shift => Modifiers::SHIFT,
            ModifierKey::Ctrl => Modifiers::CTRL,
            ModifierKey::Alt => Modifiers::ALT,
            ModifierKey::Meta => Modifiers::META,
        }
    }
}

impl Modifiers {
    pub fn is_held(&self, key: ModifierKey) -> bool {
        self.contains(key.into())
    }
}
