//! Keystate records and timeline resolution.

/// Keystate record and mixed-format entry types.
pub mod keystate;
/// Resolution of raw keystate lists into ordered timelines.
pub mod resolve;
