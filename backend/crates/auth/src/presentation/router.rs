//! Route Definitions
//!
//! Two route groups share one state: the session endpoints under `/login`
//! and the user endpoints under `/usuarios`. Protected routes live in a
//! sub-router wrapped by the session guard and are merged back in, so a
//! path can expose public and guarded methods side by side.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use platform::upload::MAX_BODY_BYTES;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{
    AuthState, create_user, current_user, get_user, list_users, login, logout, update_user,
};
use crate::presentation::middleware::require_session;

/// Build the `/login` and `/usuarios` routes
pub fn router<R>(state: AuthState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let guard = middleware::from_fn_with_state(Arc::clone(&state.config), require_session);

    let protected = Router::new()
        .route("/login/me", get(current_user::<R>))
        .route("/usuarios/me", get(current_user::<R>))
        .route("/usuarios/{id}", put(update_user::<R>))
        .route_layer(guard);

    Router::new()
        .route("/login", post(login::<R>))
        .route("/login/logout", post(logout::<R>))
        .route("/usuarios", get(list_users::<R>).post(create_user::<R>))
        .route("/usuarios/{id}", get(get_user::<R>))
        .merge(protected)
        // The framework default (2 MiB) would cut image uploads off below
        // the documented limit
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::SessionConfig;
    use crate::domain::repository::mem::MemUsers;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::upload::ImageStore;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AuthState {
            user_repo: Arc::new(MemUsers::new()),
            config: Arc::new(SessionConfig::development()),
            images: Arc::new(ImageStore::new(std::env::temp_dir())),
        };
        router(state)
    }

    fn multipart_body_with_image(image_len: usize) -> (String, Vec<u8>) {
        let boundary = "xyzformbound";
        let mut body = Vec::new();
        body.extend_from_slice(b"--xyzformbound\r\n");
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"imagen\"; filename=\"foto.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(&vec![0u8; image_len]);
        body.extend_from_slice(b"\r\n--xyzformbound--\r\n");
        (
            format!("multipart/form-data; boundary={boundary}"),
            body,
        )
    }

    #[tokio::test]
    async fn test_registration_accepts_a_multi_megabyte_image_part() {
        let (content_type, body) = multipart_body_with_image(3 * 1024 * 1024);

        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/usuarios")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        // The body must survive transport: the rejection has to be field
        // validation, not a truncated form
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let detalles = json["detalles"].as_array().unwrap();
        assert!(
            detalles
                .iter()
                .any(|d| d == "El nombre es requerido")
        );
    }
}
