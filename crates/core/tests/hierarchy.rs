mod common;

use common::TestProject;
use hdlscope_api::{EngineLifecycle, HierarchyService, ModuleNode};

fn labels(nodes: &[ModuleNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.label.as_str()).collect()
}

#[tokio::test]
async fn test_forest_for_two_level_design() {
    let p = TestProject::new(&[
        ("top.v", "module top();\n  counter u1();\n  counter u2();\nendmodule\n"),
        ("counter.v", "module counter();\n  adder add0();\nendmodule\n"),
        ("adder.v", "module adder();\nendmodule\n"),
    ]);
    p.handle.rebuild().await.unwrap();

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(labels(&forest), vec!["top"]);
    let top = &forest[0];
    assert_eq!(labels(&top.children), vec!["u1 (counter)", "u2 (counter)"]);
    for counter in &top.children {
        assert_eq!(labels(&counter.children), vec!["add0 (adder)"]);
        assert!(!counter.children[0].is_expandable());
    }
}

#[tokio::test]
async fn test_self_instantiation_is_cut() {
    let p = TestProject::new(&[
        ("top.v", "module top();\n  node n0();\nendmodule\n"),
        ("node.v", "module node();\n  node child();\nendmodule\n"),
    ]);
    p.handle.rebuild().await.unwrap();

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(labels(&forest), vec!["top"]);
    let n0 = &forest[0].children[0];
    assert_eq!(n0.label, "n0 (node)");
    assert!(!n0.recursive);
    let child = &n0.children[0];
    assert_eq!(child.label, "child (node)");
    assert!(child.recursive);
    assert!(child.children.is_empty());
}

#[tokio::test]
async fn test_pure_cycle_has_no_root() {
    let p = TestProject::new(&[
        ("a.v", "module a();\n  b ub();\nendmodule\n"),
        ("b.v", "module b();\n  a ua();\nendmodule\n"),
    ]);
    p.handle.rebuild().await.unwrap();

    assert!(p.handle.dependency_forest().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_block_commented_instantiations_are_ignored() {
    let p = TestProject::new(&[
        (
            "top.v",
            "module top();\n  /* counter old0();\n  counter old1(); */\n  counter u0();\nendmodule\n",
        ),
        ("counter.v", "module counter();\nendmodule\n"),
    ]);
    p.handle.rebuild().await.unwrap();

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(labels(&forest[0].children), vec!["u0 (counter)"]);
}
