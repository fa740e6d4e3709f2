//! Turns stored pet image references into loadable URLs

use crate::config::BackendConfig;

const UPLOAD_MARKERS: [&str; 2] = ["\\uploads\\", "/uploads/"];
const LEADING_UPLOAD_DIRS: [&str; 2] = ["uploads\\", "uploads/"];

#[derive(Debug, Clone)]
pub struct ImageUrlResolver {
    base_url: String,
    uploads_path: String,
    legacy_prefix: String,
}

impl ImageUrlResolver {
    pub fn new(base_url: &str, uploads_path: &str, legacy_prefix: &str) -> Self {
        let uploads_path = match uploads_path.trim_matches('/') {
            "" => String::new(),
            path => format!("/{path}"),
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            uploads_path,
            legacy_prefix: legacy_prefix.to_string(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.base_url, &config.uploads_path, &config.legacy_upload_prefix)
    }

    /// Reduces a stored image reference to the file name the static server
    /// knows. A value that is already a bare file name comes back unchanged.
    pub fn normalize<'a>(&self, image: &'a str) -> std::borrow::Cow<'a, str> {
        let stripped = match image.strip_prefix(self.legacy_prefix.as_str()) {
            Some(rest) if !self.legacy_prefix.is_empty() => rest,
            _ => UPLOAD_MARKERS
                .iter()
                .filter_map(|marker| image.rfind(marker).map(|at| at + marker.len()))
                .max()
                .map_or(image, |start| &image[start..]),
        };
        let stripped = LEADING_UPLOAD_DIRS
            .iter()
            .find_map(|dir| stripped.strip_prefix(*dir))
            .unwrap_or(stripped);

        if stripped.contains('\\') || stripped.starts_with('/') {
            stripped.replace('\\', "/").trim_start_matches('/').to_string().into()
        } else {
            stripped.into()
        }
    }

    pub fn resolve(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }

        if image.starts_with("http://") || image.starts_with("https://") {
            return Some(image.to_string());
        }

        let file_name = self.normalize(image);
        if file_name.is_empty() {
            return None;
        }

        Some(format!("{}{}/{}", self.base_url, self.uploads_path, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LEGACY_UPLOAD_PREFIX;

    fn resolver() -> ImageUrlResolver {
        ImageUrlResolver::new("https://pets.example/", "uploads", LEGACY_UPLOAD_PREFIX)
    }

    #[test]
    fn test_legacy_path_is_stripped() {
        let image = format!("{LEGACY_UPLOAD_PREFIX}rex.png");
        assert_eq!(
            resolver().resolve(&image).as_deref(),
            Some("https://pets.example/uploads/rex.png")
        );
    }

    #[test]
    fn test_unknown_windows_path_keeps_file_after_uploads() {
        let url = resolver().resolve(r"D:\srv\public\uploads\rex.png").unwrap();
        assert!(url.ends_with("/uploads/rex.png"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let resolver = resolver();
        assert_eq!(resolver.normalize("rex.png"), "rex.png");

        let once = resolver.normalize(r"C:\data\uploads\nested\rex.png").into_owned();
        assert_eq!(once, "nested/rex.png");
        assert_eq!(resolver.normalize(&once), once);
    }

    #[test]
    fn test_relative_upload_path() {
        assert_eq!(
            resolver().resolve("/uploads/rex.png").as_deref(),
            Some("https://pets.example/uploads/rex.png")
        );
    }

    #[test]
    fn test_path_starting_with_uploads_dir() {
        let resolver = resolver();
        for image in ["uploads/rex.png", r"uploads\rex.png"] {
            assert_eq!(
                resolver.resolve(image).as_deref(),
                Some("https://pets.example/uploads/rex.png")
            );
            let once = resolver.normalize(image).into_owned();
            assert_eq!(once, "rex.png");
            assert_eq!(resolver.normalize(&once), once);
        }
    }

    #[test]
    fn test_root_uploads_path_has_no_double_slash() {
        for uploads_path in ["/", ""] {
            let resolver = ImageUrlResolver::new("https://pets.example", uploads_path, "");
            assert_eq!(
                resolver.resolve("rex.png").as_deref(),
                Some("https://pets.example/rex.png")
            );
        }
    }

    #[test]
    fn test_full_url_is_used_as_is() {
        let url = "https://cdn.example/pets/rex.png";
        assert_eq!(resolver().resolve(url).as_deref(), Some(url));
    }

    #[test]
    fn test_blank_image_has_no_url() {
        assert_eq!(resolver().resolve(""), None);
        assert_eq!(resolver().resolve("   "), None);
    }
}
