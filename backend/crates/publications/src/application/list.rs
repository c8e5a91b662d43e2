//! List Publications Use Case
//!
//! Equality filters, AND-combined, plus bounded pagination. Unknown enum
//! spellings and malformed user ids in the query string are client errors,
//! not empty result sets.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{
    PageRequest, PublicationFilter, PublicationRecord, PublicationRepository,
};
use crate::domain::value_object::{Category, PublicationStatus, PublicationType};
use crate::error::{PubError, PubResult};

/// Raw query parameters, before any parsing. `page` and `limit` arrive
/// as strings so a non-numeric value gets the same accumulated JSON 400
/// as any other bad parameter.
#[derive(Debug, Default)]
pub struct ListPublicationsInput {
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub estado: Option<String>,
    pub usuario_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of results plus the numbers the envelope needs
#[derive(Debug)]
pub struct PublicationPage {
    pub records: Vec<PublicationRecord>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// Parse a numeric query parameter. Absent or empty means "use the
/// default"; anything non-numeric is a violation.
fn parse_page_param(raw: Option<&str>, nombre: &str, errores: &mut Vec<String>) -> Option<u32> {
    match raw {
        None => None,
        Some("") => None,
        Some(raw) => match raw.parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => {
                errores.push(format!("El parámetro {nombre} debe ser un número entero"));
                None
            }
        },
    }
}

/// Parse the whole query, accumulating every violation. Out-of-range
/// numeric values are clamped by [`PageRequest`], not rejected.
fn parse_input(
    input: &ListPublicationsInput,
) -> Result<(PublicationFilter, PageRequest), Vec<String>> {
    let mut errores = Vec::new();
    let mut filter = PublicationFilter::default();

    if let Some(raw) = input.tipo.as_deref() {
        match PublicationType::parse(raw) {
            Ok(tipo) => filter.tipo = Some(tipo),
            Err(e) => errores.push(e),
        }
    }

    if let Some(raw) = input.categoria.as_deref() {
        match Category::parse(raw) {
            Ok(categoria) => filter.categoria = Some(categoria),
            Err(e) => errores.push(e),
        }
    }

    if let Some(raw) = input.estado.as_deref() {
        match PublicationStatus::parse(raw) {
            Ok(estado) => filter.estado = Some(estado),
            Err(e) => errores.push(e),
        }
    }

    if let Some(raw) = input.usuario_id.as_deref() {
        match UserId::parse_str(raw) {
            Ok(usuario_id) => filter.usuario_id = Some(usuario_id),
            Err(_) => errores.push("Identificador de usuario inválido".to_string()),
        }
    }

    let page = parse_page_param(input.page.as_deref(), "page", &mut errores);
    let limit = parse_page_param(input.limit.as_deref(), "limit", &mut errores);

    if errores.is_empty() {
        Ok((filter, PageRequest::new(page, limit)))
    } else {
        Err(errores)
    }
}

/// List publications use case
pub struct ListPublicationsUseCase<R>
where
    R: PublicationRepository,
{
    repo: Arc<R>,
}

impl<R> ListPublicationsUseCase<R>
where
    R: PublicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ListPublicationsInput) -> PubResult<PublicationPage> {
        let (filter, page) = parse_input(&input).map_err(PubError::Validation)?;

        let (records, total) = self.repo.list(&filter, &page).await?;

        Ok(PublicationPage {
            records,
            page: page.page(),
            limit: page.limit(),
            total,
            pages: page.pages_for(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_parse_empty_query_is_unconstrained() {
        let (filter, page) = parse_input(&ListPublicationsInput::default()).unwrap();
        assert!(filter.tipo.is_none());
        assert!(filter.categoria.is_none());
        assert!(filter.estado.is_none());
        assert!(filter.usuario_id.is_none());
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 50);
    }

    #[test]
    fn test_parse_all_fields() {
        let owner = Uuid::new_v4();
        let input = ListPublicationsInput {
            tipo: Some("Perdido".to_string()),
            categoria: Some("Llaves".to_string()),
            estado: Some("No resuelto".to_string()),
            usuario_id: Some(owner.to_string()),
            page: Some("2".to_string()),
            limit: Some("10".to_string()),
        };
        let (filter, page) = parse_input(&input).unwrap();
        assert_eq!(filter.tipo, Some(PublicationType::Perdido));
        assert_eq!(filter.categoria, Some(Category::Llaves));
        assert_eq!(filter.estado, Some(PublicationStatus::NoResuelto));
        assert_eq!(filter.usuario_id.unwrap().into_uuid(), owner);
        assert_eq!(page.page(), 2);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let input = ListPublicationsInput {
            tipo: Some("perdido".to_string()),
            usuario_id: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        let errores = parse_input(&input).unwrap_err();
        assert_eq!(errores.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_numeric_pagination() {
        let input = ListPublicationsInput {
            page: Some("abc".to_string()),
            limit: Some("-1".to_string()),
            ..Default::default()
        };
        let errores = parse_input(&input).unwrap_err();
        assert_eq!(
            errores,
            vec![
                "El parámetro page debe ser un número entero".to_string(),
                "El parámetro limit debe ser un número entero".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_clamps_numeric_out_of_range() {
        let input = ListPublicationsInput {
            page: Some("0".to_string()),
            limit: Some("500".to_string()),
            ..Default::default()
        };
        let (_, page) = parse_input(&input).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 100);
    }
}
