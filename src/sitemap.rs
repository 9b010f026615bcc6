// ABOUTME: HTML sitemap served at the root path
// ABOUTME: Lists every endpoint so the API can be explored from a browser

use axum::response::Html;

/// (method, path) for every route the router exposes besides `/`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/users/:user_id/favorites"),
    ("GET", "/planets"),
    ("POST", "/planets"),
    ("GET", "/planets/:planet_id"),
    ("GET", "/people"),
    ("POST", "/people"),
    ("GET", "/people/:people_id"),
    ("POST", "/favorite/planet/:planet_id"),
    ("POST", "/favorite/people/:people_id"),
];

pub async fn sitemap() -> Html<String> {
    Html(render())
}

fn render() -> String {
    let items: String = ENDPOINTS
        .iter()
        .map(|(method, path)| {
            // Only parameterless GET routes are clickable.
            if *method == "GET" && !path.contains(':') {
                format!("<li>{method} <a href=\"{path}\">{path}</a></li>")
            } else {
                format!("<li>{method} {path}</li>")
            }
        })
        .collect();

    format!(
        "<!DOCTYPE html><html><head><title>Star Wars Catalog API</title></head>\
         <body><h1>Star Wars Catalog API</h1><p>Endpoints:</p><ul>{items}</ul></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_links_list_routes() {
        let html = render();
        assert!(html.contains("<a href=\"/users\">/users</a>"));
        assert!(html.contains("<a href=\"/planets\">/planets</a>"));
        assert!(html.contains("<li>GET /planets/:planet_id</li>"));
        assert!(html.contains("<li>POST /favorite/people/:people_id</li>"));
    }
}
