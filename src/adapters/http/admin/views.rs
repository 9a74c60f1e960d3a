//! HTML fragments for the admin console.
//!
//! Every value that came from a request or from upstream goes through
//! [`escape_html`] before it is written into markup.

use std::fmt::Write;

use crate::domain::Conference;

/// Escapes the five characters with meaning in HTML text and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn result_success(message: &str) -> String {
    format!(
        r#"<div class="result result-success" role="status">{}</div>"#,
        escape_html(message)
    )
}

pub fn result_error(message: &str) -> String {
    format!(
        r#"<div class="result result-error" role="alert">{}</div>"#,
        escape_html(message)
    )
}

/// The dashboard page: one form per reindex scope.
pub fn dashboard(conferences: &[Conference]) -> String {
    let mut options = String::new();
    for conference in conferences {
        // Writing into a String cannot fail.
        let _ = write!(
            options,
            r#"<option value="{}">{}</option>"#,
            escape_html(&conference.slug),
            escape_html(&conference.name)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Talks Indexer</title>
</head>
<body>
<h1>Talks Indexer</h1>
<section>
<h2>All conferences</h2>
<form method="post" action="/admin/reindex/all">
<button type="submit">Reindex all</button>
</form>
</section>
<section>
<h2>Conference</h2>
<form method="post" action="/admin/reindex/conference">
<select name="slug">
<option value="">Select a conference</option>
{options}
</select>
<button type="submit">Reindex conference</button>
</form>
</section>
<section>
<h2>Talk</h2>
<form method="post" action="/admin/reindex/talk">
<input type="text" name="talkId" placeholder="Talk ID">
<button type="submit">Reindex talk</button>
</form>
</section>
<div id="result"></div>
</body>
</html>
"#
    )
}
