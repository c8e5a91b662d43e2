//! Publication Category
//!
//! Closed set of item categories. "Otros" is the catch-all.

use serde::{Deserialize, Serialize};

/// Item category of a publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Documentos,
    #[serde(rename = "Electrónica")]
    Electronica,
    Mascotas,
    Llaves,
    Ropa,
    Accesorios,
    Otros,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documentos => "Documentos",
            Self::Electronica => "Electrónica",
            Self::Mascotas => "Mascotas",
            Self::Llaves => "Llaves",
            Self::Ropa => "Ropa",
            Self::Accesorios => "Accesorios",
            Self::Otros => "Otros",
        }
    }

    /// Parse the canonical spelling; the error is a client-facing message
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "Documentos" => Ok(Self::Documentos),
            "Electrónica" => Ok(Self::Electronica),
            "Mascotas" => Ok(Self::Mascotas),
            "Llaves" => Ok(Self::Llaves),
            "Ropa" => Ok(Self::Ropa),
            "Accesorios" => Ok(Self::Accesorios),
            "Otros" => Ok(Self::Otros),
            other => Err(format!("Categoría inválida: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_canonical_values() {
        for raw in [
            "Documentos",
            "Electrónica",
            "Mascotas",
            "Llaves",
            "Ropa",
            "Accesorios",
            "Otros",
        ] {
            assert_eq!(Category::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_parse_requires_accent() {
        // The unaccented spelling is not canonical
        assert!(Category::parse("Electronica").is_err());
    }
}
