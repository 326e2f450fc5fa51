//! Shared HTTP constants (headers, problem URIs, paths).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

pub(crate) const PROBLEM_INTERNAL: &str = "https://mundovacacional.com/problems/internal";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://mundovacacional.com/problems/unauthorized";
pub(crate) const PROBLEM_FORBIDDEN: &str = "https://mundovacacional.com/problems/forbidden";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://mundovacacional.com/problems/bad-request";
pub(crate) const PROBLEM_VALIDATION: &str = "https://mundovacacional.com/problems/validation";
pub(crate) const PROBLEM_CONFLICT: &str = "https://mundovacacional.com/problems/conflict";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://mundovacacional.com/problems/not-found";
pub(crate) const PROBLEM_PAYLOAD_TOO_LARGE: &str =
    "https://mundovacacional.com/problems/payload-too-large";
pub(crate) const PROBLEM_SERVICE_UNAVAILABLE: &str =
    "https://mundovacacional.com/problems/service-unavailable";

pub(crate) const LOGIN_PAGE: &str = "/admin/login";
pub(crate) const UPLOAD_CACHE_CONTROL: &str = "public, max-age=31536000";
pub(crate) const UPLOAD_FIELD: &str = "files";
pub(crate) const MAX_FILES_PER_UPLOAD: u64 = 10;
pub(crate) const INQUIRY_BASE: &str = "https://wa.me/";
pub(crate) const INQUIRY_GREETING: &str = "Hola, me interesa reservar la propiedad: ";
pub(crate) const SITEMAP_STATIC_PAGES: [(&str, &str, &str); 4] = [
    ("", "daily", "1.0"),
    ("/apartamentos", "daily", "0.9"),
    ("/hotel", "weekly", "0.8"),
    ("/como-vamos", "monthly", "0.6"),
];
