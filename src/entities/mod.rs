// Entity Models
//
// Each account has:
// - Stable identity (UUID) that NEVER changes
// - An append-only ledger of movements
// The roster holds every account and is the only place they are looked up.

pub mod account;
pub mod roster;

pub use account::{Account, MovementKind};
pub use roster::Roster;
