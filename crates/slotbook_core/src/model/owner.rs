//! Owner roster model and configuration loading.
//!
//! # Responsibility
//! - Define the `Owner` identity (display name + display color).
//! - Load and validate the static roster table used by the UI.
//!
//! # Invariants
//! - Owner names are non-blank and unique within one directory.
//! - Colors are `#RRGGBB` hex strings.
//! - A directory never contains zero owners.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

const DEFAULT_ROSTER: &[(&str, &str)] = &[
    ("John Smith", "#FFB3BA"),
    ("Jane Doe", "#BAFFC9"),
    ("Mike Johnson", "#BAE1FF"),
    ("Sarah Wilson", "#FFFFBA"),
];

/// Person that can hold reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Display name, also used as the owner key on intervals.
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl Owner {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Roster load/validation errors.
#[derive(Debug)]
pub enum OwnerDirectoryError {
    Empty,
    BlankName,
    DuplicateName(String),
    InvalidColor { name: String, color: String },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl Display for OwnerDirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "owner roster must contain at least one owner"),
            Self::BlankName => write!(f, "owner name cannot be blank"),
            Self::DuplicateName(name) => write!(f, "duplicate owner name `{name}`"),
            Self::InvalidColor { name, color } => {
                write!(f, "owner `{name}` has invalid color `{color}`; expected #RRGGBB")
            }
            Self::Json(err) => write!(f, "invalid owner roster json: {err}"),
            Self::Io(err) => write!(f, "failed to read owner roster: {err}"),
        }
    }
}

impl Error for OwnerDirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OwnerDirectoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::io::Error> for OwnerDirectoryError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Validated, ordered owner roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDirectory {
    owners: Vec<Owner>,
}

impl OwnerDirectory {
    /// Builds a directory from owners, trimming names and enforcing roster
    /// invariants.
    pub fn new(owners: Vec<Owner>) -> Result<Self, OwnerDirectoryError> {
        if owners.is_empty() {
            return Err(OwnerDirectoryError::Empty);
        }

        let mut seen = BTreeSet::<String>::new();
        let mut normalized = Vec::with_capacity(owners.len());
        for owner in owners {
            let name = owner.name.trim().to_string();
            if name.is_empty() {
                return Err(OwnerDirectoryError::BlankName);
            }
            if !COLOR_RE.is_match(owner.color.trim()) {
                return Err(OwnerDirectoryError::InvalidColor {
                    name,
                    color: owner.color,
                });
            }
            if !seen.insert(name.clone()) {
                return Err(OwnerDirectoryError::DuplicateName(name));
            }
            normalized.push(Owner {
                name,
                color: owner.color.trim().to_string(),
            });
        }

        Ok(Self { owners: normalized })
    }

    /// Parses a JSON array of `{ "name", "color" }` objects.
    pub fn from_json_str(raw: &str) -> Result<Self, OwnerDirectoryError> {
        let owners: Vec<Owner> = serde_json::from_str(raw)?;
        Self::new(owners)
    }

    /// Reads and parses a JSON roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OwnerDirectoryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Looks up an owner by exact name.
    pub fn find(&self, name: &str) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Display color for an owner name, if the owner is on the roster.
    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.find(name).map(|owner| owner.color.as_str())
    }
}

impl Default for OwnerDirectory {
    /// Reference deployment roster of four people.
    fn default() -> Self {
        Self {
            owners: DEFAULT_ROSTER
                .iter()
                .map(|(name, color)| Owner::new(*name, *color))
                .collect(),
        }
    }
}
