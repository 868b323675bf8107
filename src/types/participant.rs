//! Participant-related types for the settlement engine
//!
//! Participants are the immutable input of a settlement run. Working entries
//! are the owned, mutable copies the matcher drains while pairing creditors
//! with debtors.

use rust_decimal::Decimal;

/// Participant identifier
///
/// Opaque key supplied by the ledger source. Must be unique within a session.
pub type ParticipantId = String;

/// Session identifier
///
/// Groups participants that settle against each other (e.g. one poker session).
pub type SessionId = String;

/// Session name used when an input row does not specify one
pub const DEFAULT_SESSION: &str = "default";

/// A participant and their net position before settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Unique key within a session
    pub identifier: ParticipantId,

    /// Human-readable label, copied onto transfers
    pub display_name: String,

    /// Net balance: positive when owed money, negative when owing money
    pub net_balance: Decimal,
}

impl Participant {
    /// Create a participant from a decimal net balance
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        net_balance: Decimal,
    ) -> Self {
        Participant {
            identifier: identifier.into(),
            display_name: display_name.into(),
            net_balance,
        }
    }

    /// Create a participant from an integer amount of minor units
    ///
    /// `scale` is the number of decimal places one major unit is split into,
    /// so `from_minor_units("a", "A", -1050, 2)` has a net balance of `-10.50`.
    pub fn from_minor_units(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        minor: i64,
        scale: u32,
    ) -> Self {
        Self::new(identifier, display_name, Decimal::new(minor, scale))
    }
}

/// Which side of the settlement a working entry sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Owed money (positive net balance)
    Creditor,
    /// Owes money (negative net balance)
    Debtor,
}

/// Owned working copy of a creditor or debtor
///
/// `remaining` starts at the absolute net balance and only ever decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingEntry {
    pub identifier: ParticipantId,
    pub display_name: String,
    pub side: Side,
    pub remaining: Decimal,
}

impl WorkingEntry {
    /// Build a working entry from a participant with a non-zero balance
    pub fn from_participant(participant: &Participant, side: Side) -> Self {
        WorkingEntry {
            identifier: participant.identifier.clone(),
            display_name: participant.display_name.clone(),
            side,
            remaining: participant.net_balance.abs(),
        }
    }

    /// Whether this entry has been fully settled
    pub fn is_settled(&self) -> bool {
        self.remaining.is_zero()
    }
}
