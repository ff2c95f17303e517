//! Group power policies.
//!
//! Turning a group on and turning it off are deliberately asymmetric: the
//! on path skips members that are probably on already, the off path always
//! commands every member. Since power state is only advisory, sending an
//! extra off command is the safe direction to err in.

use serde::{Deserialize, Serialize};

/// Which members of a group receive an on-command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOnPolicy {
    /// Skip members whose advisory state says they are already on.
    #[default]
    SkipIfOn,
    /// Command every member.
    Always,
}

impl GroupOnPolicy {
    /// Whether a member with the given advisory state gets the command.
    #[must_use]
    pub fn should_command(self, probably_turned_on: bool) -> bool {
        match self {
            Self::SkipIfOn => !probably_turned_on,
            Self::Always => true,
        }
    }
}

/// Which members of a group receive an off-command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOffPolicy {
    /// Command every member regardless of advisory state.
    #[default]
    Unconditional,
    /// Skip members whose advisory state says they are already off.
    SkipIfOff,
}

impl GroupOffPolicy {
    /// Whether a member with the given advisory state gets the command.
    #[must_use]
    pub fn should_command(self, probably_turned_on: bool) -> bool {
        match self {
            Self::Unconditional => true,
            Self::SkipIfOff => probably_turned_on,
        }
    }
}

/// The pair of policies the dispatcher applies to group intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPowerPolicy {
    #[serde(default)]
    pub on: GroupOnPolicy,
    #[serde(default)]
    pub off: GroupOffPolicy,
}

impl GroupPowerPolicy {
    /// Whether a member with the given advisory state gets a command for `on`.
    #[must_use]
    pub fn should_command(self, on: bool, probably_turned_on: bool) -> bool {
        if on {
            self.on.should_command(probably_turned_on)
        } else {
            self.off.should_command(probably_turned_on)
        }
    }
}
