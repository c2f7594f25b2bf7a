//! Minimal HTML to text reduction.

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];
const BLOCK_ELEMENTS: [&str; 14] = [
    "p", "div", "br", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "header",
];

/// Strip markup from `html`, returning readable text with one blank-free line
/// per block element.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&decode_entities(&rest[..start]));
        let after = &rest[start + 1..];
        if after.starts_with("!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }
        let Some(end) = after.find('>') else {
            rest = "";
            break;
        };
        let tag = &after[..end];
        rest = &after[end + 1..];

        let name = tag_name(tag);
        if !tag.starts_with('/') && !tag.ends_with('/') && SKIPPED_ELEMENTS.contains(&name.as_str())
        {
            rest = skip_element(rest, &name);
        } else if BLOCK_ELEMENTS.contains(&name.as_str()) {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    out.push_str(&decode_entities(rest));

    out.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything after the closing tag of `name`, or "" when it is never closed
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    // ASCII lowercasing keeps byte offsets intact.
    let lower = rest.to_ascii_lowercase();
    let closing = format!("</{name}");
    let Some(close) = lower.find(&closing) else {
        return "";
    };
    match rest[close..].find('>') {
        Some(end) => &rest[close + end + 1..],
        None => "",
    }
}

/// Contents of the first `<title>` element, if any
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let body_start = open + lower[open..].find('>')? + 1;
    let body_end = body_start + lower[body_start..].find("</title")?;
    let title = decode_entities(&html[body_start..body_end]);
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
