/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the provider client and the UI layer.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Location value the provider uses when a submitter has no location
pub const NO_LOCATION: &str = "null";

/// One of the fixed animal categories offered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cats,
    Dogs,
    Fish,
    Horse,
    Rabbit,
    Birds,
    Cow,
}

impl Category {
    /// Every category, in the order the selector buttons are shown
    pub const ALL: [Category; 7] = [
        Category::Cats,
        Category::Dogs,
        Category::Fish,
        Category::Horse,
        Category::Rabbit,
        Category::Birds,
        Category::Cow,
    ];

    /// Lower-case token used in the provider URL (`/data/{token}`)
    pub fn token(self) -> &'static str {
        match self {
            Category::Cats => "cats",
            Category::Dogs => "dogs",
            Category::Fish => "fish",
            Category::Horse => "horse",
            Category::Rabbit => "rabbit",
            Category::Birds => "birds",
            Category::Cow => "cow",
        }
    }

    /// Exact, case-sensitive lookup of a token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.token() == token)
    }

    /// Button label: the token with its first letter capitalized
    pub fn label(self) -> String {
        let mut chars = self.token().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returned when a string is not one of the fixed category tokens
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}' (expected one of: cats, dogs, fish, horse, rabbit, birds, cow)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Record identifier as sent by the provider (numeric today, strings tolerated)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// The person who submitted a photo
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submitter {
    pub name: String,
    /// `"null"` (the literal string) when the submitter has no location
    #[serde(default)]
    pub location: Option<String>,
}

/// Represents a single photo returned by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimalRecord {
    /// Unique provider ID
    pub id: RecordId,
    /// Where the image service serves the JPEG
    pub image_url: String,
    pub description: String,
    pub likes: u64,
    /// Dominant colour of the photo as `#rrggbb`. Not used for styling.
    #[allow(dead_code)]
    #[serde(default)]
    pub color: Option<String>,
    pub user: Submitter,
}

impl AnimalRecord {
    /// Location to show, hiding the provider's `"null"` sentinel.
    /// A missing or JSON `null` location is hidden as well.
    pub fn location(&self) -> Option<&str> {
        self.user
            .location
            .as_deref()
            .filter(|location| *location != NO_LOCATION)
    }
}
