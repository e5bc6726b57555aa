//! Language tab groups rendered as Docusaurus `<Tabs>` markup.
//!
//! The opening tag always declares the same six-language catalogue in the
//! `site-lang` group, whatever languages the group actually carries.

use guidegen_shared::{Result, TabBody, TabVariant};

/// Opening `<Tabs>` tag, including the blank line that follows it.
const TABS_OPEN: &str = "<Tabs\n\
defaultValue=\"go\"\n\
groupId=\"site-lang\"\n\
values={[{label: 'Go', value: 'go'},{label: 'Java', value: 'java'},{label: 'PHP', value: 'php'},{label: 'Python', value: 'python'},{label: 'Ruby', value: 'ruby'},{label: 'TypeScript', value: 'typescript'},]}>\n\n";

const TABS_CLOSE: &str = "</Tabs>\n\n";

/// Body of a tab whose content is intentionally absent.
pub const UNAVAILABLE_NOTICE: &str = "Content is currently unavailable.";

/// Body of a tab for a language the section does not apply to.
pub const NOT_APPLICABLE_NOTICE: &str = "Not applicable to this SDK.";

/// Render a tab group, one `<TabItem>` per variant in input order.
///
/// Fails with `MissingVariantContent` when a variant names real content but
/// carries no node.
pub fn render_tabgroup(variants: &[TabVariant]) -> Result<String> {
    let mut out = String::from(TABS_OPEN);

    for variant in variants {
        let body = match variant.body()? {
            TabBody::Unavailable => UNAVAILABLE_NOTICE,
            TabBody::NotApplicable => NOT_APPLICABLE_NOTICE,
            TabBody::Content(node) => node.markdown_content.as_str(),
        };
        out.push_str(&format!("<TabItem value=\"{}\">\n\n", variant.lang));
        out.push_str(body);
        out.push_str("\n\n</TabItem>\n");
    }

    out.push_str(TABS_CLOSE);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidegen_shared::GuideGenError;

    fn variants(json: serde_json::Value) -> Vec<TabVariant> {
        serde_json::from_value(json).expect("valid variants")
    }

    #[test]
    fn content_and_unavailable_variants() {
        let tabs = variants(serde_json::json!([
            {"lang": "go", "id": "1", "node": {"markdown_content": "Go body"}},
            {"lang": "python", "id": "none"}
        ]));

        let out = render_tabgroup(&tabs).unwrap();
        let expected = format!(
            "{TABS_OPEN}<TabItem value=\"go\">\n\nGo body\n\n</TabItem>\n\
             <TabItem value=\"python\">\n\nContent is currently unavailable.\n\n</TabItem>\n\
             </Tabs>\n\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn opening_tag_is_byte_exact() {
        let out = render_tabgroup(&[]).unwrap();
        assert_eq!(
            out,
            "<Tabs\ndefaultValue=\"go\"\ngroupId=\"site-lang\"\n\
             values={[{label: 'Go', value: 'go'},{label: 'Java', value: 'java'},\
             {label: 'PHP', value: 'php'},{label: 'Python', value: 'python'},\
             {label: 'Ruby', value: 'ruby'},{label: 'TypeScript', value: 'typescript'},]}>\n\n\
             </Tabs>\n\n"
        );
    }

    #[test]
    fn order_and_count_preserved() {
        let tabs = variants(serde_json::json!([
            {"lang": "typescript", "id": "na"},
            {"lang": "ruby", "id": "none"},
            {"lang": "kotlin", "id": "k1", "node": {"markdown_content": "fun main() {}"}},
            {"lang": "go", "id": "na"}
        ]));

        let out = render_tabgroup(&tabs).unwrap();
        let langs: Vec<&str> = out
            .lines()
            .filter_map(|l| l.strip_prefix("<TabItem value=\""))
            .filter_map(|l| l.strip_suffix("\">"))
            .collect();
        assert_eq!(langs, ["typescript", "ruby", "kotlin", "go"]);
        assert_eq!(out.matches("</TabItem>").count(), 4);
        assert_eq!(out.matches(NOT_APPLICABLE_NOTICE).count(), 2);
        // Languages outside the catalogue still get their own tab.
        assert!(out.contains("fun main() {}"));
    }

    #[test]
    fn missing_node_is_an_error() {
        let tabs = variants(serde_json::json!([
            {"lang": "go", "id": "none"},
            {"lang": "java", "id": "java-1"}
        ]));

        let err = render_tabgroup(&tabs).unwrap_err();
        match err {
            GuideGenError::MissingVariantContent { lang, id } => {
                assert_eq!(lang, "java");
                assert_eq!(id, "java-1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
