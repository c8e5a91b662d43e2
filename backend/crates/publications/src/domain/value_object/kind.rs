//! Publication Type
//!
//! Whether the item was lost by the poster or found by them.

use serde::{Deserialize, Serialize};

/// Lost-or-found type of a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationType {
    Perdido,
    Encontrado,
}

impl PublicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perdido => "Perdido",
            Self::Encontrado => "Encontrado",
        }
    }

    /// Parse the canonical spelling; the error is a client-facing message
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "Perdido" => Ok(Self::Perdido),
            "Encontrado" => Ok(Self::Encontrado),
            other => Err(format!("Tipo inválido: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for raw in ["Perdido", "Encontrado"] {
            assert_eq!(PublicationType::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = PublicationType::parse("Robado").unwrap_err();
        assert!(err.contains("Robado"));
    }
}
