use crate::{ProjectArgs, open_engine};
use hdlscope_api::{EngineLifecycle, HierarchyService, ModuleNode};

fn node_title(node: &ModuleNode) -> String {
    if node.recursive {
        format!("{} (recursive)", node.label)
    } else {
        node.label.clone()
    }
}

fn render_children(nodes: &[ModuleNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&node_title(node));
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(&node.children, &child_prefix, out);
    }
}

/// Text rendering of the forest, one root per block.
pub fn render_forest(forest: &[ModuleNode]) -> String {
    let mut out = String::new();
    for root in forest {
        out.push_str(&node_title(root));
        out.push('\n');
        render_children(&root.children, "", &mut out);
    }
    out
}

pub async fn run(project: ProjectArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine(&project);
    engine.rebuild().await?;
    let forest = engine.dependency_forest().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
    } else if forest.is_empty() {
        println!("No top-level modules found.");
    } else {
        print!("{}", render_forest(&forest));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlscope_api::SymbolKind;
    use std::path::PathBuf;

    fn node(label: &str, recursive: bool, children: Vec<ModuleNode>) -> ModuleNode {
        ModuleNode {
            label: label.to_string(),
            module_name: label.to_string(),
            instance_name: None,
            path: PathBuf::from("a.v"),
            kind: SymbolKind::Module,
            recursive,
            children,
        }
    }

    #[test]
    fn test_render_forest() {
        let forest = vec![node(
            "top",
            false,
            vec![
                node("u1 (a)", false, vec![node("ub (b)", false, vec![])]),
                node("u2 (top)", true, vec![]),
            ],
        )];
        assert_eq!(
            render_forest(&forest),
            "top\n├── u1 (a)\n│   └── ub (b)\n└── u2 (top) (recursive)\n"
        );
    }
}
