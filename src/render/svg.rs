//! SVG serialization for [`SceneTree`].

use super::{NodeId, Scene, SceneTree};

impl SceneTree {
    /// Renders the current (post-transition) state of the tree as SVG markup.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_node(&mut out, self.root(), 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Ok(node) = self.node(id) else {
            return;
        };
        let indent = "  ".repeat(depth);

        out.push_str(&indent);
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attrs {
            out.push_str(&format!(r#" {name}="{}""#, escape(value)));
        }

        if node.children.is_empty() && node.text.is_none() {
            out.push_str("/>\n");
            return;
        }

        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(&escape(text));
        }
        if !node.children.is_empty() {
            out.push('\n');
            for child in &node.children {
                self.write_node(out, *child, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str(&format!("</{}>\n", node.tag));
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
