//! Minimal HTML shell for the back office. Rendering happens client side; the
//! server only names the section and the signed-in user.

use axum::{
    Extension,
    extract::MatchedPath,
    response::Html,
};
use mundo_auth::SessionIdentity;

use crate::http::handlers::escape_markup;

const LOGIN_FORM: &str = r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><title>Mundo Vacacional | Acceso</title></head>
<body>
<main>
<h1>Panel de administración</h1>
<form id="login">
<label>Usuario <input name="username" autocomplete="username" required></label>
<label>Contraseña <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Ingresar</button>
<p id="error" role="alert"></p>
</form>
</main>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const body = JSON.stringify(Object.fromEntries(new FormData(event.target)));
  const response = await fetch("/api/auth/login", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body,
  });
  if (response.ok) {
    window.location.href = "/admin/dashboard";
  } else {
    document.getElementById("error").textContent = "Credenciales inválidas";
  }
});
</script>
</body>
</html>
"#;

pub(crate) async fn login_page() -> Html<&'static str> {
    Html(LOGIN_FORM)
}

pub(crate) async fn admin_page(
    matched: MatchedPath,
    Extension(identity): Extension<SessionIdentity>,
) -> Html<String> {
    Html(render_shell(section_title(matched.as_str()), &identity))
}

fn section_title(path: &str) -> &'static str {
    match path {
        "/admin/properties" => "Propiedades",
        "/admin/reviews" => "Reseñas",
        _ => "Panel",
    }
}

fn render_shell(section: &str, identity: &SessionIdentity) -> String {
    format!(
        "<!doctype html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\">\
         <title>Mundo Vacacional | {section}</title></head>\n<body>\n\
         <header><h1>{section}</h1><p>Sesión: <strong>{user}</strong> ({role})</p>\
         <button id=\"logout\" type=\"button\">Salir</button>\
         </header>\n<main id=\"app\" data-section=\"{section}\"></main>\n\
         <script>document.getElementById(\"logout\").addEventListener(\"click\", async () => {{\
         await fetch(\"/api/auth/logout\", {{ method: \"POST\" }});\
         window.location.href = \"/admin/login\";\
         }});</script>\n</body>\n</html>\n",
        user = escape_markup(&identity.username),
        role = identity.role,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mundo_auth::Role;

    #[test]
    fn shell_escapes_the_username() {
        let identity = SessionIdentity {
            user_id: "1".to_string(),
            username: "<ana>".to_string(),
            role: Role::SuperAdmin,
        };
        let html = render_shell(section_title("/admin/reviews"), &identity);
        assert!(html.contains("&lt;ana&gt;"));
        assert!(html.contains("super_admin"));
        assert!(html.contains("<h1>Reseñas</h1>"));
    }
}
