mod combo;
mod listener;

pub(crate) use {
    combo::{ComboDetector, ComboSignal, HotkeyCombo, KeyEvent, KeyTransition, ModKey},
    listener::KeyListener,
};
