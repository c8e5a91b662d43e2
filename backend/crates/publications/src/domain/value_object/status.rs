//! Publication Status
//!
//! Two-state lifecycle. Every publication starts "No resuelto"; only the
//! owner may flip it.

use serde::{Deserialize, Serialize};

/// Resolution state of a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationStatus {
    #[serde(rename = "Resuelto")]
    Resuelto,
    #[serde(rename = "No resuelto")]
    NoResuelto,
}

impl PublicationStatus {
    /// Canonical wire/storage spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resuelto => "Resuelto",
            Self::NoResuelto => "No resuelto",
        }
    }

    /// Parse the canonical spelling; the error is a client-facing message
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "Resuelto" => Ok(Self::Resuelto),
            "No resuelto" => Ok(Self::NoResuelto),
            other => Err(format!("Estado inválido: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_values() {
        assert_eq!(
            PublicationStatus::parse("Resuelto").unwrap(),
            PublicationStatus::Resuelto
        );
        assert_eq!(
            PublicationStatus::parse("No resuelto").unwrap(),
            PublicationStatus::NoResuelto
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_case_variants() {
        assert!(PublicationStatus::parse("resuelto").is_err());
        assert!(PublicationStatus::parse("Pendiente").is_err());
        assert!(PublicationStatus::parse("").is_err());
    }

    #[test]
    fn test_serializes_with_space() {
        let json = serde_json::to_string(&PublicationStatus::NoResuelto).unwrap();
        assert_eq!(json, "\"No resuelto\"");
    }
}
