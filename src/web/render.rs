use std::fmt::Write;
use crate::models::{ImageDetail, RepositorySummary, TagSummary};
use crate::web::session::encode;
use crate::web::AppState;

const STYLESHEET_URL: &str = "https://cdn.jsdelivr.net/npm/water.css@2/out";

/// Escape text for use in html content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn optional(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

fn page(state: &AppState, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - {site}</title>
<link rel="stylesheet" href="{STYLESHEET_URL}/{stylesheet}">
</head>
<body>
<header><h1><a href="/">{site}</a></h1></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        site = escape(&state.site),
        stylesheet = state.theme.stylesheet(),
    )
}

pub fn repositories(state: &AppState, repositories: &[RepositorySummary]) -> String {
    let mut rows = String::new();
    for repository in repositories {
        let _ = writeln!(
            rows,
            r#"<tr><td><a href="/repo?repo={}">{}</a></td><td>{}</td></tr>"#,
            encode(&repository.name),
            escape(&repository.name),
            repository.tag_count
        );
    }
    let body = format!(
        "<h2>Repositories</h2>\n<table>\n<thead><tr><th>Repository</th><th>Tags</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
    );
    page(state, "Repositories", &body)
}

pub fn tags(state: &AppState, repo: &str, tags: &[TagSummary]) -> String {
    let mut rows = String::new();
    for tag in tags {
        let _ = writeln!(
            rows,
            r#"<tr><td><a href="/image?repo={}&amp;tag={}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
            encode(repo),
            encode(&tag.tag),
            escape(&tag.tag),
            escape(&tag.size_human),
            optional(tag.date.as_deref())
        );
    }
    let body = if tags.is_empty() {
        format!("<h2>{}</h2>\n<p>This repository doesn't have any tags.</p>", escape(repo))
    } else {
        format!(
            "<h2>{}</h2>\n<table>\n<thead><tr><th>Tag</th><th>Size</th><th>Created</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>",
            escape(repo)
        )
    };
    page(state, repo, &body)
}

fn image(image: &ImageDetail) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<section>\n<h3>{}</h3>\n<table>", escape(&image.platform()));
    let mut field = |name: &str, value: String| {
        let _ = writeln!(html, "<tr><th>{name}</th><td>{value}</td></tr>");
    };
    field("Digest", format!("<code>{}</code>", optional(image.digest.as_deref())));
    field("Created", optional(image.date.as_deref()));
    field("Size", escape(&image.size_human));
    field("Working dir", optional(image.working_dir.as_deref()));
    field("Entrypoint", format!("<code>{}</code>", optional(image.entrypoint.as_deref())));
    field("Cmd", format!("<code>{}</code>", optional(image.cmd.as_deref())));
    field("Ports", escape(&image.ports));
    html.push_str("</table>\n");

    if !image.env.is_empty() {
        html.push_str("<h4>Environment</h4>\n<table>\n<thead><tr><th>Name</th><th>Value</th></tr></thead>\n<tbody>\n");
        for var in &image.env {
            let _ = writeln!(html, "<tr><td>{}</td><td><code>{}</code></td></tr>", escape(&var.key), escape(&var.value));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<h4>Layers</h4>\n<table>\n<thead><tr><th>Digest</th><th>Size</th><th>Created</th><th>Command</th></tr></thead>\n<tbody>\n");
    for layer in &image.layers {
        let _ = writeln!(
            html,
            r#"<tr><td title="{}"><code>{}</code></td><td>{}</td><td>{}</td><td><code>{}</code></td></tr>"#,
            optional(layer.digest.as_deref()),
            optional(layer.short_digest.as_deref()),
            optional(layer.size_human.as_deref()),
            optional(layer.date.as_deref()),
            optional(layer.command.as_deref())
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

pub fn images(state: &AppState, repo: &str, tag: &str, images: &[ImageDetail]) -> String {
    let title = format!("{repo}:{tag}");
    let mut body = format!(
        "<h2><a href=\"/repo?repo={}\">{}</a>:{}</h2>\n",
        encode(repo),
        escape(repo),
        escape(tag)
    );
    if images.is_empty() {
        body.push_str("<p>The manifest list of this tag is empty.</p>");
    }
    for detail in images {
        body.push_str(&image(detail));
    }
    page(state, &title, &body)
}

pub fn login(state: &AppState) -> String {
    let body = r#"<h2>Login</h2>
<form action="/submit_login" method="post">
<label for="username">Username</label>
<input id="username" name="username" type="text" autocomplete="username" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Login</button>
</form>"#;
    page(state, "Login", body)
}

pub fn unauthorized(state: &AppState) -> String {
    page(state, "Unauthorized", "<h2>Unauthorized</h2>\n<p>The registry requires credentials which were not configured.</p>")
}

pub fn error(state: &AppState, message: &str) -> String {
    let body = format!("<h2>Error</h2>\n<p>{}</p>", escape(message));
    page(state, "Error", &body)
}

#[cfg(test)]
mod test {
    use crate::web::render::escape;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<script>alert('x') & \"y\"</script>"), "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;");
        assert_eq!(escape("plain/repo"), "plain/repo");
    }
}
