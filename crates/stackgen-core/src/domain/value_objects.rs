//! Domain value objects: ModuleKind, OutputMode.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file defines the types and their string representations. Only
//! `ModuleKind` is parsed from user text; `OutputMode` is chosen by flags.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `FromStr` arm and the `ALL` entry here
//! 3. Done: the validator picks the new kind up from `ModuleKind::ALL`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// The closed category a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Application code (a framework such as a web backend or frontend).
    Code,
    /// Add-on functionality layered over code modules.
    Extension,
    /// Cloud or hosting provider integration.
    Provider,
    /// Version-control integration.
    Vcs,
}

impl ModuleKind {
    /// Every kind, in the order used in messages.
    pub const ALL: [ModuleKind; 4] = [Self::Code, Self::Extension, Self::Provider, Self::Vcs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Extension => "extension",
            Self::Provider => "provider",
            Self::Vcs => "vcs",
        }
    }

    /// `"code, extension, provider, vcs"`
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    /// Exact, case-sensitive match: the persisted document uses the
    /// lowercase wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "extension" => Ok(Self::Extension),
            "provider" => Ok(Self::Provider),
            "vcs" => Ok(Self::Vcs),
            other => Err(DomainError::UnknownModuleKind(other.to_string())),
        }
    }
}

// ── OutputMode ───────────────────────────────────────────────────────────────

/// Where a generation run delivers its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Archive returned to the client and written under a local path.
    Local,
    /// Service pushes the generated tree to a new GitHub repository.
    Github,
}

impl OutputMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
