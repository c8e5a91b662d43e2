//! Route Definitions
//!
//! Reads are public; create and update sit behind the session guard in a
//! sub-router that is merged back in, so `/publicaciones` and
//! `/publicaciones/{id}` expose public and guarded methods side by side.

use std::sync::Arc;

use auth::presentation::middleware::require_session;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use platform::upload::MAX_BODY_BYTES;

use crate::domain::repository::PublicationRepository;
use crate::presentation::handlers::{
    PubState, create_publication, get_publication, list_publications, update_publication,
};

/// Build the `/publicaciones` routes
pub fn router<R>(state: PubState<R>) -> Router
where
    R: PublicationRepository + Send + Sync + 'static,
{
    let guard = middleware::from_fn_with_state(Arc::clone(&state.config), require_session);

    let protected = Router::new()
        .route("/publicaciones", post(create_publication::<R>))
        .route("/publicaciones/{id}", put(update_publication::<R>))
        .route_layer(guard);

    Router::new()
        .route("/publicaciones", get(list_publications::<R>))
        .route("/publicaciones/{id}", get(get_publication::<R>))
        .merge(protected)
        // The framework default (2 MiB) would cut image uploads off below
        // the documented limit
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::publication::Publication;
    use crate::domain::repository::{
        PageRequest, PublicationFilter, PublicationRecord,
    };
    use crate::error::PubResult;
    use auth::application::config::SessionConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kernel::id::PublicationId;
    use platform::upload::ImageStore;
    use tower::ServiceExt;

    struct EmptyRepo;

    impl PublicationRepository for EmptyRepo {
        async fn create(&self, _publication: &Publication) -> PubResult<()> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &PublicationId) -> PubResult<Option<Publication>> {
            Ok(None)
        }

        async fn find_record(&self, _id: &PublicationId) -> PubResult<Option<PublicationRecord>> {
            Ok(None)
        }

        async fn list(
            &self,
            _filter: &PublicationFilter,
            _page: &PageRequest,
        ) -> PubResult<(Vec<PublicationRecord>, u64)> {
            Ok((vec![], 0))
        }

        async fn update(&self, _publication: &Publication) -> PubResult<()> {
            Ok(())
        }

        async fn delete_all(&self) -> PubResult<u64> {
            Ok(0)
        }
    }

    fn test_router() -> Router {
        router(PubState {
            repo: Arc::new(EmptyRepo),
            config: Arc::new(SessionConfig::development()),
            images: Arc::new(ImageStore::new(std::env::temp_dir())),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_non_numeric_page_gets_a_json_error_body() {
        let (status, json) = get_json("/publicaciones?page=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detalles = json["detalles"].as_array().unwrap();
        assert!(
            detalles
                .iter()
                .any(|d| d == "El parámetro page debe ser un número entero")
        );
    }

    #[tokio::test]
    async fn test_empty_list_still_carries_the_envelope() {
        let (status, json) = get_json("/publicaciones").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["publicaciones"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["page"], 1);
        assert_eq!(json["pagination"]["limit"], 50);
    }
}
