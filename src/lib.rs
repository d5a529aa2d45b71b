/// Terminal Space Invaders.
///
/// `entities` holds the pure data types, `sim` the pure per-frame logic.
/// Everything terminal-related lives in the binary.

pub mod entities;
pub mod sim;
