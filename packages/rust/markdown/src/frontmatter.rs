//! Guide header: YAML front matter, generated-file banner, and preamble.

use guidegen_shared::GuideConfig;

/// Comment placed under the front matter of every generated guide.
pub const GENERATED_BANNER: &str =
    "<!-- THIS FILE IS GENERATED. DO NOT EDIT THIS FILE DIRECTLY -->";

/// Render the header every guide document starts with.
///
/// Values are written unquoted, exactly as they appear in the guide config.
pub fn render_frontmatter(guide: &GuideConfig) -> String {
    let mut fm = String::from("---\n");
    fm.push_str(&format!("id: {}\n", guide.id));
    fm.push_str(&format!("title: {}\n", guide.title));
    fm.push_str(&format!("sidebar_label: {}\n", guide.sidebar_label));
    fm.push_str(&format!("description: {}\n", guide.description));
    fm.push_str(&format!(
        "toc_max_heading_level: {}\n",
        guide.toc_max_heading_level
    ));
    fm.push_str("---\n\n");
    fm.push_str(GENERATED_BANNER);
    fm.push_str("\n\n");

    if guide.add_tabs_support {
        fm.push_str("import Tabs from '@theme/Tabs';\n");
        fm.push_str("import TabItem from '@theme/TabItem';\n\n");
    }

    if guide.use_description {
        fm.push_str(&guide.description);
        fm.push_str("\n\n");
    }

    fm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(add_tabs_support: bool, use_description: bool) -> GuideConfig {
        serde_json::from_value(serde_json::json!({
            "id": "timers",
            "title": "Durable timers",
            "sidebar_label": "Timers",
            "description": "Sleep for days.",
            "toc_max_heading_level": 4,
            "file_dir": "/",
            "file_name": "timers.md",
            "add_tabs_support": add_tabs_support,
            "use_description": use_description,
        }))
        .expect("valid guide")
    }

    const HEADER: &str = "---\n\
        id: timers\n\
        title: Durable timers\n\
        sidebar_label: Timers\n\
        description: Sleep for days.\n\
        toc_max_heading_level: 4\n\
        ---\n\n\
        <!-- THIS FILE IS GENERATED. DO NOT EDIT THIS FILE DIRECTLY -->\n\n";

    #[test]
    fn plain_header() {
        assert_eq!(render_frontmatter(&guide(false, false)), HEADER);
    }

    #[test]
    fn tabs_imports_follow_banner() {
        let fm = render_frontmatter(&guide(true, false));
        assert_eq!(
            fm,
            format!(
                "{HEADER}import Tabs from '@theme/Tabs';\nimport TabItem from '@theme/TabItem';\n\n"
            )
        );
    }

    #[test]
    fn description_repeated_last() {
        let fm = render_frontmatter(&guide(true, true));
        assert!(fm.ends_with("import TabItem from '@theme/TabItem';\n\nSleep for days.\n\n"));

        let fm = render_frontmatter(&guide(false, true));
        assert_eq!(fm, format!("{HEADER}Sleep for days.\n\n"));
    }
}
