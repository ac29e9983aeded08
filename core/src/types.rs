//! Shared primitive types used across the entire simulation.

/// A simulated calendar day. The month runs from day 1 to day 30.
pub type Day = u32;

/// Currency units (yen). Signed — negative money is a meaningful state,
/// not an error.
pub type Money = i64;

/// The canonical session identifier.
pub type SessionId = String;

/// Mint a fresh session identifier.
pub fn new_session_id() -> SessionId {
    format!("session-{}", uuid::Uuid::new_v4())
}
