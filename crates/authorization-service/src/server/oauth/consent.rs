//! Consent page rendering.

/// Fields shown on the consent page.
#[derive(Debug, Clone)]
pub struct ConsentView {
    pub logo: String,
    pub name: String,
    pub website: String,
    pub state: String,
    pub scopes: Vec<String>,
}

/// Renders the consent surface for a pending authorization.
pub trait ConsentRenderer: Send + Sync {
    /// Produce the HTML document for `view`.
    fn render(&self, view: &ConsentView) -> String;
}

/// Built-in HTML consent page.
///
/// The approve and deny buttons submit `GET /confirm_auth` with `authorize`,
/// `state` and `client_id`. All interpolated values are HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlConsentRenderer;

impl ConsentRenderer for HtmlConsentRenderer {
    fn render(&self, view: &ConsentView) -> String {
        render_consent_page(view)
    }
}

/// Render the authorization consent page.
pub fn render_consent_page(view: &ConsentView) -> String {
    let scopes_html: String = view
        .scopes
        .iter()
        .map(|scope| format!("<li>{}</li>", html_escape(scope)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Authorize {name}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f5f5f5; margin: 0; display: flex; justify-content: center; align-items: center; min-height: 100vh; }}
.card {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); padding: 32px; max-width: 400px; width: 100%; text-align: center; }}
.logo {{ width: 72px; height: 72px; border-radius: 8px; }}
h1 {{ font-size: 20px; margin: 16px 0 8px; color: #333; }}
.subtitle {{ color: #666; font-size: 14px; margin: 0 0 16px; }}
ul {{ text-align: left; color: #333; font-size: 14px; }}
.actions {{ display: flex; gap: 12px; margin-top: 24px; }}
button {{ flex: 1; padding: 10px; border: none; border-radius: 4px; font-size: 14px; font-weight: 500; cursor: pointer; }}
.approve {{ background: #4a90d9; color: #fff; }}
.approve:hover {{ background: #357abd; }}
.deny {{ background: #eee; color: #333; }}
</style>
</head>
<body>
<div class="card">
<img class="logo" src="{logo}" alt="{name}">
<h1>{name}</h1>
<p class="subtitle"><a href="{website}">{website}</a> is requesting access to:</p>
<ul>
{scopes_html}
</ul>
<form method="GET" action="/confirm_auth">
<input type="hidden" name="state" value="{state}">
<input type="hidden" name="client_id" value="{name}">
<div class="actions">
<button class="deny" type="submit" name="authorize" value="false">Deny</button>
<button class="approve" type="submit" name="authorize" value="true">Approve</button>
</div>
</form>
</div>
</body>
</html>"#,
        name = html_escape(&view.name),
        logo = html_escape(&view.logo),
        website = html_escape(&view.website),
        state = html_escape(&view.state),
        scopes_html = scopes_html,
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
