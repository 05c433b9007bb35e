use std::{
    fs,
    path::Path,
};

use anyhow::{Context, Result};

use crate::info::RequestInfo;

const BUNDLED_TEMPLATE: &str = include_str!("../templates/index.html");

/// HTML page for browser clients. Placeholders look like `{{ ip }}`; values
/// are HTML-escaped and unknown placeholders are left untouched.
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    source: String,
}

impl HtmlTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_TEMPLATE)
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::bundled());
        };

        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded html template");
        Ok(Self::new(source))
    }

    pub fn render(&self, info: &RequestInfo) -> String {
        let mut out = String::with_capacity(self.source.len() + 128);
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let placeholder = &rest[start..start + 2 + end + 2];
            match lookup(info, after_open[..end].trim()) {
                Some(value) => escape_into(&mut out, &value),
                None => out.push_str(placeholder),
            }
            rest = &after_open[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

fn lookup(info: &RequestInfo, key: &str) -> Option<String> {
    let value = match key {
        "ip" => info.ip_text(),
        "port" => info.port.to_string(),
        "user_agent" => info.user_agent.clone(),
        "language" => info.language.clone(),
        "encoding" => info.encoding.clone(),
        "mime" => info.mime.clone(),
        "forwarded" => info.forwarded.clone(),
        "method" => info.method.clone(),
        _ => return None,
    };
    Some(value)
}

fn escape_into(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::HtmlTemplate;
    use crate::info::RequestInfo;

    fn sample() -> RequestInfo {
        RequestInfo {
            ip: "198.51.100.7".parse().ok(),
            port: 4242,
            user_agent: "Mozilla/5.0 <script>alert('x')</script>".to_string(),
            language: "en".to_string(),
            encoding: String::new(),
            mime: String::new(),
            forwarded: String::new(),
            method: "GET".to_string(),
        }
    }

    #[test]
    fn substitutes_known_placeholders() {
        let tpl = HtmlTemplate::new("<p>{{ip}}:{{ port }} via {{  method}}</p>");
        assert_eq!(tpl.render(&sample()), "<p>198.51.100.7:4242 via GET</p>");
    }

    #[test]
    fn escapes_header_values() {
        let tpl = HtmlTemplate::new("{{ user_agent }}");
        assert_eq!(
            tpl.render(&sample()),
            "Mozilla/5.0 &lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn missing_ip_renders_as_escaped_nil() {
        let info = RequestInfo {
            ip: None,
            ..sample()
        };
        assert_eq!(HtmlTemplate::new("{{ ip }}").render(&info), "&lt;nil&gt;");
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders_alone() {
        let tpl = HtmlTemplate::new("{{ nope }} {{ ip");
        assert_eq!(tpl.render(&sample()), "{{ nope }} {{ ip");
    }

    #[test]
    fn bundled_template_mentions_every_field() {
        let html = HtmlTemplate::bundled().render(&sample());
        assert!(html.contains("198.51.100.7"));
        assert!(html.contains("4242"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn missing_template_file_is_an_error() {
        let err = HtmlTemplate::load(Some(Path::new("/definitely/not/here.tmpl"))).unwrap_err();
        assert!(err.to_string().contains("failed to read template"));
    }
}
