//! Plain-text rendering of the proxy tree for the console driver

use folders::{ProxyTree, Section};

/// Render the tree the way the overlay would present it: visible sections
/// with their counts, collapsed sections without their items.
pub fn render_tree(tree: &ProxyTree) -> String {
    let mut out = String::new();
    for section in tree.visible_sections() {
        render_section(section, &mut out);
    }
    if out.is_empty() {
        out.push_str("(empty)\n");
    }
    out
}

fn render_section(section: &Section, out: &mut String) {
    let marker = if section.collapsed { "▶" } else { "▼" };
    out.push_str(&format!("{marker} {} ({})\n", section.title, section.count));
    if section.collapsed {
        return;
    }
    for item in &section.items {
        out.push_str(&format!("    {}\n", item.chat.as_str()));
    }
}
