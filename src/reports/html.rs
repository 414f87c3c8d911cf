//! HTML report generator.

use super::escape::{escape_html, safe_href};
use crate::error::Result;
use crate::model::{InventoryDocument, InventoryEntry};
use crate::registry::LicenseRegistry;
use std::fmt::Write;

const STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        line-height: 1.5;
        margin: 2rem;
        color: #222;
    }

    ul, #topUL, #licenseUL {
        list-style-type: none;
    }

    #topUL, #licenseUL {
        margin: 0;
        padding: 0;
    }

    .caret {
        cursor: pointer;
        user-select: none;
        font-weight: 600;
    }

    .caret::before {
        content: "\25B6";
        color: #555;
        display: inline-block;
        margin-right: 6px;
    }

    .caret-down::before {
        transform: rotate(90deg);
    }

    .nested {
        display: none;
    }

    .active {
        display: block;
    }

    .boxed {
        border: 1px solid #ccc;
        border-radius: 4px;
        padding: 0.5rem 1rem;
        margin: 0.25rem 0 0.75rem 0;
    }

    .lictext {
        white-space: pre-wrap;
        font-family: ui-monospace, Menlo, Consolas, monospace;
        font-size: 0.85rem;
    }

    .licdetails li {
        margin-left: 1rem;
    }
"#;

const SCRIPT: &str = r#"
    var toggler = document.getElementsByClassName("caret");
    for (var i = 0; i < toggler.length; i++) {
        toggler[i].addEventListener("click", function() {
            this.parentElement.querySelector(".nested").classList.toggle("active");
            this.classList.toggle("caret-down");
        });
    }
"#;

/// Renders an inventory as a standalone page of collapsible entries.
///
/// "See Also" links come from the registry entry matching each dependency's
/// SPDX id, so entries without one only show their license name.
#[derive(Debug, Clone)]
pub struct HtmlReporter {
    title: String,
    local_license: Option<String>,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    pub fn new() -> Self {
        Self {
            title: "Third-Party Licenses".to_string(),
            local_license: None,
        }
    }

    /// Set the page title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Show the project's own license text above the dependency list
    #[must_use]
    pub fn with_local_license(mut self, text: impl Into<String>) -> Self {
        self.local_license = Some(text.into());
        self
    }

    /// Render the page.
    ///
    /// Dependencies are written in document order.
    pub fn generate(&self, doc: &InventoryDocument, registry: &LicenseRegistry) -> Result<String> {
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(
            html,
            "<!-- Auto-generated by {}. Do not edit manually. -->",
            env!("CARGO_PKG_NAME")
        )?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"UTF-8\">")?;
        writeln!(html, "<title>{}</title>", escape_html(&self.title))?;
        writeln!(html, "<style>{}</style>", STYLES)?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;

        if let Some(text) = &self.local_license {
            self.write_local_license(&mut html, text)?;
        }

        writeln!(
            html,
            "<p>This project makes use of resources from the following third parties."
        )?;
        writeln!(
            html,
            "Their use is subject to the licenses described here.</p>"
        )?;
        writeln!(html, "<ul id='topUL'>")?;
        for entry in &doc.dependencies {
            tracing::debug!("  module: {}", entry.name);
            write_entry(&mut html, entry, registry)?;
        }
        writeln!(html, "</ul>")?;

        writeln!(html, "<script>{}</script>", SCRIPT)?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn write_local_license(&self, html: &mut String, text: &str) -> Result<()> {
        writeln!(
            html,
            "<p>This software is subject to the following license agreement.</p>"
        )?;
        writeln!(html, "<ul id='licenseUL'>")?;
        writeln!(html, "  <li><span class='caret'>View License</span>")?;
        writeln!(html, "  <ul class='nested lictext boxed'>")?;
        writeln!(html, "  <li>{}</li>", escape_html(text))?;
        writeln!(html, "  </ul>")?;
        writeln!(html, "  </li>")?;
        writeln!(html, "</ul>")?;
        Ok(())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_entry(html: &mut String, entry: &InventoryEntry, registry: &LicenseRegistry) -> Result<()> {
    let name = escape_html(&entry.name);
    writeln!(html, "<!-- {} -->", name)?;
    writeln!(html, "  <li><span class='caret'>{}</span>", name)?;
    writeln!(html, "  <ul class='nested boxed'>")?;

    if let Some(url) = entry.url.as_deref().filter(|u| !u.trim().is_empty()) {
        match safe_href(url) {
            Some(href) => writeln!(
                html,
                "  <li>Project URL: <a href='{}'>{}</a></li>",
                href,
                escape_html(url)
            )?,
            None => writeln!(html, "  <li>Project URL: {}</li>", escape_html(url))?,
        }
    }

    if !entry.license.is_empty() {
        writeln!(html, "  <li>License: {}</li>", escape_html(&entry.license))?;
        let see_also = entry
            .spdx_id
            .as_deref()
            .and_then(|id| registry.get_by_id(id))
            .map(|e| e.see_also.as_slice())
            .unwrap_or_default();
        write_see_also(html, see_also)?;
    }

    writeln!(html, "  </ul>")?;
    writeln!(html, "  </li>")?;
    Ok(())
}

fn write_see_also(html: &mut String, links: &[String]) -> Result<()> {
    let hrefs: Vec<(String, &String)> = links
        .iter()
        .filter_map(|url| safe_href(url).map(|href| (href, url)))
        .collect();
    if hrefs.is_empty() {
        return Ok(());
    }
    writeln!(html, "  <li>See Also:")?;
    writeln!(html, "  <ul class='licdetails'>")?;
    for (href, url) in hrefs {
        writeln!(html, "   <li><a href='{}'>{}</a></li>", href, escape_html(url))?;
    }
    writeln!(html, "  </ul>")?;
    writeln!(html, "  </li>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, license: &str, spdx_id: Option<&str>, url: Option<&str>) -> InventoryEntry {
        let mut e = InventoryEntry::new(name);
        e.license = license.to_string();
        e.spdx_id = spdx_id.map(str::to_string);
        e.url = url.map(str::to_string);
        e
    }

    fn document(entries: Vec<InventoryEntry>) -> InventoryDocument {
        InventoryDocument {
            dependencies: entries,
            generated: None,
        }
    }

    #[test]
    fn test_page_skeleton() {
        let html = HtmlReporter::new()
            .generate(&document(vec![]), &LicenseRegistry::builtin())
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<!-- Auto-generated by license-scanner."));
        assert!(html.contains("<ul id='topUL'>\n</ul>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(!html.contains("id='licenseUL'"));
    }

    #[test]
    fn test_entry_with_see_also() {
        let doc = document(vec![entry(
            "Alpha",
            "BSD Zero Clause License",
            Some("0BSD"),
            Some("https://github.com/x/alpha"),
        )]);
        let html = HtmlReporter::new()
            .generate(&doc, &LicenseRegistry::builtin())
            .unwrap();
        assert!(html.contains("<span class='caret'>Alpha</span>"));
        assert!(html.contains("Project URL: <a href='https://github.com/x/alpha'>"));
        assert!(html.contains("<li>License: BSD Zero Clause License</li>"));
        assert!(html.contains("See Also:"));
        assert!(html.contains("https://spdx.org/licenses/0BSD.html"));
    }

    #[test]
    fn test_unknown_license_has_no_links() {
        let doc = document(vec![entry("Mystery", "Unknown", None, None)]);
        let html = HtmlReporter::new()
            .generate(&doc, &LicenseRegistry::builtin())
            .unwrap();
        assert!(html.contains("<li>License: Unknown</li>"));
        assert!(!html.contains("See Also:"));
        assert!(!html.contains("Project URL"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let doc = document(vec![entry(
            "<script>alert(1)</script>",
            "A & B",
            None,
            Some("javascript:alert(1)"),
        )]);
        let html = HtmlReporter::new()
            .with_title("<Title>")
            .generate(&doc, &LicenseRegistry::builtin())
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("License: A &amp; B"));
        assert!(html.contains("<li>Project URL: javascript:alert(1)</li>"));
        assert!(!html.contains("href='javascript"));
        assert!(html.contains("<title>&lt;Title&gt;</title>"));
    }

    #[test]
    fn test_local_license_section() {
        let html = HtmlReporter::new()
            .with_local_license("Copyright <me>\nAll rights reserved.")
            .generate(&document(vec![]), &LicenseRegistry::builtin())
            .unwrap();
        let license_at = html.find("id='licenseUL'").unwrap();
        let deps_at = html.find("id='topUL'").unwrap();
        assert!(license_at < deps_at);
        assert!(html.contains("View License"));
        assert!(html.contains("Copyright &lt;me&gt;\nAll rights reserved."));
    }

    #[test]
    fn test_document_order_preserved() {
        let doc = document(vec![
            entry("zeta", "Unknown", None, None),
            entry("alpha", "Unknown", None, None),
        ]);
        let html = HtmlReporter::new()
            .generate(&doc, &LicenseRegistry::builtin())
            .unwrap();
        assert!(html.find("zeta").unwrap() < html.find("alpha").unwrap());
    }
}
