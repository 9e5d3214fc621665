//! Graph value objects
//!
//! Value objects are immutable types that represent concepts in the company network.
//! They are compared by value rather than identity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable external company identifier (the Firmenbuchnummer for companies,
/// an opaque hash for person and location nodes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    /// Create a new identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CompanyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for CompanyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Represents the position of a node in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub const ORIGIN: Position2D = Position2D { x: 0.0, y: 0.0 };

    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` in direction `angle` (radians)
    pub fn polar(center: Position2D, radius: f64, angle: f64) -> Self {
        Self::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Get the distance to another position
    pub fn distance_to(&self, other: &Position2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Polar angle of `self` seen from `center`
    pub fn angle_from(&self, center: &Position2D) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

impl Default for Position2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// How densely a company node is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// The company the view was opened on
    Root,
    /// Medium card with name and actions
    Standard,
    /// Compact marker
    Minimal,
}

impl DisplayType {
    /// Parse a display type, accepting the UI's long names as well
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "root" | "main" | "main_company_display" => Some(DisplayType::Root),
            "standard" | "medium" | "default" | "default_company_display" => {
                Some(DisplayType::Standard)
            }
            "minimal" | "minimal_company_display" => Some(DisplayType::Minimal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Root => "root",
            DisplayType::Standard => "standard",
            DisplayType::Minimal => "minimal",
        }
    }

    /// Standard and Minimal swap; Root stays Root
    pub fn toggled(self) -> Self {
        match self {
            DisplayType::Root => DisplayType::Root,
            DisplayType::Standard => DisplayType::Minimal,
            DisplayType::Minimal => DisplayType::Standard,
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for DisplayType {
    fn default() -> Self {
        DisplayType::Standard
    }
}

/// Kind of relation an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    /// Shared partner / officer
    Person,
    /// Shared registered address
    Location,
    Other,
}

impl RelationType {
    /// Derive the relation from the raw edge label
    pub fn from_label(label: &str) -> Self {
        match label {
            "Person" => RelationType::Person,
            "Location" => RelationType::Location,
            _ => RelationType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Person => "Person",
            RelationType::Location => "Location",
            RelationType::Other => "Other",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an upstream node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Company,
    Person,
    Location,
    Other,
}

impl NodeKind {
    /// Parse the optional `type` tag of a network node; untagged nodes are companies
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.to_lowercase()) {
            None => NodeKind::Company,
            Some(t) => match t.as_str() {
                "company" => NodeKind::Company,
                "person" => NodeKind::Person,
                "location" => NodeKind::Location,
                _ => NodeKind::Other,
            },
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Company
    }
}

/// User-chosen relationship filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeFilter {
    All,
    Person,
    Location,
}

impl EdgeFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(EdgeFilter::All),
            "person" => Some(EdgeFilter::Person),
            "location" => Some(EdgeFilter::Location),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeFilter::All => "all",
            EdgeFilter::Person => "person",
            EdgeFilter::Location => "location",
        }
    }

    /// Whether a relation type passes this filter (root adjacency is checked separately)
    pub fn matches(&self, relation: RelationType) -> bool {
        match self {
            EdgeFilter::All => true,
            EdgeFilter::Person => relation == RelationType::Person,
            EdgeFilter::Location => relation == RelationType::Location,
        }
    }
}

impl fmt::Display for EdgeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for EdgeFilter {
    fn default() -> Self {
        EdgeFilter::All
    }
}

/// Unordered endpoint pair; `a -> b` and `b -> a` share one key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    low: CompanyId,
    high: CompanyId,
}

impl EdgeKey {
    pub fn new(a: &CompanyId, b: &CompanyId) -> Self {
        if a <= b {
            Self { low: a.clone(), high: b.clone() }
        } else {
            Self { low: b.clone(), high: a.clone() }
        }
    }

    pub fn contains(&self, id: &CompanyId) -> bool {
        &self.low == id || &self.high == id
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.low, self.high)
    }
}

/// Directed path key `"from->to"` used by the root-path highlighter
pub fn path_edge_key(from: &CompanyId, to: &CompanyId) -> String {
    format!("{from}->{to}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_type_from_string() {
        assert_eq!(DisplayType::from_str("minimal_company_display"), Some(DisplayType::Minimal));
        assert_eq!(DisplayType::from_str("MEDIUM"), Some(DisplayType::Standard));
        assert_eq!(DisplayType::from_str("main_company_display"), Some(DisplayType::Root));
        assert_eq!(DisplayType::from_str("huge"), None);
    }

    #[test]
    fn test_display_type_toggle_keeps_root() {
        assert_eq!(DisplayType::Root.toggled(), DisplayType::Root);
        assert_eq!(DisplayType::Standard.toggled(), DisplayType::Minimal);
        assert_eq!(DisplayType::Minimal.toggled(), DisplayType::Standard);
    }

    #[test]
    fn test_relation_type_from_label() {
        assert_eq!(RelationType::from_label("Person"), RelationType::Person);
        assert_eq!(RelationType::from_label("Location"), RelationType::Location);
        assert_eq!(RelationType::from_label("person"), RelationType::Other);
    }

    #[test]
    fn test_edge_key_is_unordered() {
        let a = CompanyId::from("FN100a");
        let b = CompanyId::from("FN200b");
        assert_eq!(EdgeKey::new(&a, &b), EdgeKey::new(&b, &a));
        assert_eq!(EdgeKey::new(&b, &a).to_string(), "FN100a|FN200b");
        assert!(EdgeKey::new(&a, &b).contains(&b));
    }

    #[test]
    fn test_edge_filter_matches() {
        assert!(EdgeFilter::All.matches(RelationType::Other));
        assert!(EdgeFilter::Person.matches(RelationType::Person));
        assert!(!EdgeFilter::Person.matches(RelationType::Location));
        assert_eq!(EdgeFilter::from_str("Location"), Some(EdgeFilter::Location));
    }

    #[test]
    fn test_polar_position() {
        let p = Position2D::polar(Position2D::new(10.0, 0.0), 5.0, 0.0);
        assert_eq!(p, Position2D::new(15.0, 0.0));
        assert!((p.angle_from(&Position2D::new(10.0, 0.0))).abs() < 1e-12);
        assert_eq!(Position2D::ORIGIN.distance_to(&Position2D::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_serialization() {
        let id = CompanyId::from("123456a");
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "\"123456a\"");

        let filter: EdgeFilter = serde_json::from_str("\"person\"").unwrap();
        assert_eq!(filter, EdgeFilter::Person);
    }
}
