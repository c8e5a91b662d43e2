//! Image Upload Storage
//!
//! Uploaded images are buffered in memory while the owning request is
//! checked, then written under type-partitioned directories
//! (`<root>/usuarios/`, `<root>/publicaciones/`). Stored files get a
//! random UUID name with a validated extension; the returned value is the
//! URL path the owning record references.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted image size (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Request body cap for the multipart routes: the image limit plus
/// headroom for the text fields and the multipart framing. Without an
/// explicit cap the framework default (2 MiB) would cut uploads off
/// well below [`MAX_IMAGE_BYTES`].
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Accepted image extensions (lowercased)
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Type partition for uploaded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Usuarios,
    Publicaciones,
}

impl UploadKind {
    /// Parse a URL path segment. Anything else is an invalid type segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "usuarios" => Some(Self::Usuarios),
            "publicaciones" => Some(Self::Publicaciones),
            _ => None,
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Usuarios => "usuarios",
            Self::Publicaciones => "publicaciones",
        }
    }
}

/// Upload failures. Everything except `Io` is the client's fault (400).
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("La imagen supera el tamaño máximo permitido")]
    TooLarge,

    #[error("Tipo de archivo no soportado: {0}")]
    UnsupportedType(String),

    #[error("Campo de archivo inesperado: {0}")]
    UnexpectedField(String),

    #[error("El archivo no tiene nombre")]
    MissingFileName,

    #[error("Error de E/S al guardar la imagen")]
    Io(#[from] std::io::Error),
}

/// An uploaded file held in memory until the surrounding operation has
/// passed its checks. Nothing touches the disk while a request can still
/// fail validation or ownership.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Disk-backed image store rooted at the configured uploads directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist an uploaded image and return its URL path
    /// (`/uploads/<tipo>/<uuid>.<ext>`).
    pub async fn store(
        &self,
        kind: UploadKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }

        let ext = validated_extension(original_name)?;
        let file_name = format!("{}.{}", Uuid::new_v4(), ext);

        let dir = self.root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        Ok(format!("/uploads/{}/{}", kind.dir_name(), file_name))
    }

    /// Persist a buffered upload. See [`ImageStore::store`].
    pub async fn store_pending(
        &self,
        kind: UploadKind,
        pending: &PendingUpload,
    ) -> Result<String, UploadError> {
        self.store(kind, &pending.file_name, &pending.bytes).await
    }

    /// Resolve a stored file for static retrieval. Returns `None` for
    /// names that are not a plain file name (path traversal).
    pub fn resolve(&self, kind: UploadKind, file_name: &str) -> Option<PathBuf> {
        if !is_plain_file_name(file_name) {
            return None;
        }
        Some(self.root.join(kind.dir_name()).join(file_name))
    }
}

/// Extract and validate the extension of an uploaded file name
fn validated_extension(original_name: &str) -> Result<String, UploadError> {
    if original_name.is_empty() {
        return Err(UploadError::MissingFileName);
    }

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| UploadError::UnsupportedType(original_name.to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(UploadError::UnsupportedType(original_name.to_string()));
    }

    Ok(ext)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}

/// Content type for a stored file, by extension
pub fn content_type_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_cap_leaves_room_for_a_full_size_image() {
        // A maximum-size image plus its text fields must fit in one body
        assert!(MAX_BODY_BYTES > MAX_IMAGE_BYTES + 64 * 1024);
    }

    #[test]
    fn test_kind_from_segment() {
        assert_eq!(
            UploadKind::from_segment("usuarios"),
            Some(UploadKind::Usuarios)
        );
        assert_eq!(
            UploadKind::from_segment("publicaciones"),
            Some(UploadKind::Publicaciones)
        );
        assert_eq!(UploadKind::from_segment("etc"), None);
        assert_eq!(UploadKind::from_segment(".."), None);
    }

    #[test]
    fn test_validated_extension() {
        assert_eq!(validated_extension("photo.JPG").unwrap(), "jpg");
        assert_eq!(validated_extension("a.b.png").unwrap(), "png");
        assert!(matches!(
            validated_extension("malware.exe"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            validated_extension("noextension"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert!(matches!(
            validated_extension(""),
            Err(UploadError::MissingFileName)
        ));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = ImageStore::new("/tmp/uploads");
        assert!(store.resolve(UploadKind::Usuarios, "a.png").is_some());
        assert!(store.resolve(UploadKind::Usuarios, "../secret").is_none());
        assert!(store.resolve(UploadKind::Usuarios, "a/b.png").is_none());
        assert!(store.resolve(UploadKind::Usuarios, "").is_none());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("x.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("x.png"), "image/png");
        assert_eq!(content_type_for("x.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_store_and_limits() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let url = store
            .store(UploadKind::Publicaciones, "foto.png", b"fake image bytes")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/publicaciones/"));
        assert!(url.ends_with(".png"));

        // The stored file exists under the type partition
        let file_name = url.rsplit('/').next().unwrap();
        let path = store.resolve(UploadKind::Publicaciones, file_name).unwrap();
        assert!(path.exists());

        let too_big = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            store
                .store(UploadKind::Publicaciones, "foto.png", &too_big)
                .await,
            Err(UploadError::TooLarge)
        ));
    }
}
