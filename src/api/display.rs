//! Server-rendered debug page enumerating the audit log and both intake
//! stores.

use serde_json::Value;

use crate::audit::AuditEntry;
use crate::error::Result;

const PAGE_HEAD: &str = r#"<html>
    <head>
        <title>Received Content</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 20px; }
            .content-item { margin: 10px 0; padding: 10px; border: 1px solid #ccc; }
            .section { margin-bottom: 30px; }
        </style>
    </head>
    <body>
        <h1>Received Content</h1>
"#;

const PAGE_TAIL: &str = r#"    </body>
</html>
"#;

/// Render the full debug page
pub fn render_page(
    audit: &[AuditEntry],
    hospital: &[Value],
    consultation: &[Value],
) -> Result<String> {
    let mut page = String::from(PAGE_HEAD);

    let audit_values = audit
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    render_section(&mut page, "Webhook Data", &audit_values)?;
    render_section(&mut page, "Hospital Data", hospital)?;
    render_section(&mut page, "Consultation Data", consultation)?;

    page.push_str(PAGE_TAIL);
    Ok(page)
}

fn render_section(page: &mut String, title: &str, items: &[Value]) -> Result<()> {
    page.push_str("        <div class=\"section\">\n");
    page.push_str(&format!("            <h2>{}</h2>\n", title));

    for item in items {
        let pretty = serde_json::to_string_pretty(item)?;
        page.push_str(&format!(
            "            <div class=\"content-item\"><pre>{}</pre></div>\n",
            escape_html(&pretty)
        ));
    }

    page.push_str("        </div>\n");
    Ok(())
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_has_all_sections() {
        let page = render_page(&[], &[], &[]).unwrap();

        assert!(page.contains("<h1>Received Content</h1>"));
        assert!(page.contains("<h2>Webhook Data</h2>"));
        assert!(page.contains("<h2>Hospital Data</h2>"));
        assert!(page.contains("<h2>Consultation Data</h2>"));
    }

    #[test]
    fn test_items_are_rendered_and_escaped() {
        let hospital = vec![json!({"issue": "<script>alert(1)</script>"})];
        let page = render_page(&[], &hospital, &[]).unwrap();

        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>alert"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<pre>"), "&lt;pre&gt;");
    }
}
