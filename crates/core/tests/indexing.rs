mod common;

use common::{ScriptedTags, TestProject};
use hdlscope_api::{
    EngineLifecycle, HierarchyService, HoverInfo, IndexService, IndexState, NavigationService,
    PositionContext, SymbolKind,
};
use std::time::Duration;

const TOP: &str = "module top(
    input clk
);
    counter u1 (.clk(clk));
    counter u2 (.clk(clk));
endmodule
";

const COUNTER: &str = "module counter(
    input clk
);
endmodule
";

fn project() -> TestProject {
    TestProject::new(&[("rtl/top.v", TOP), ("rtl/counter.v", COUNTER)])
}

#[tokio::test]
async fn test_rebuild_indexes_symbols_and_references() {
    let p = project();
    assert_eq!(p.handle.index_state(), IndexState::Empty);

    p.handle.rebuild().await.unwrap();
    assert_eq!(p.handle.index_state(), IndexState::Ready);
    assert_eq!(p.tags.calls(), 2);

    let stats = p.handle.get_stats().await.unwrap();
    assert_eq!(stats.file_count, 2);
    assert_eq!(stats.module_count, 2);
    assert_eq!(stats.reference_count, 2);

    let refs = p.handle.module_references("counter").await.unwrap();
    let lines: Vec<_> = refs.iter().map(|r| r.position.line).collect();
    assert_eq!(lines, vec![3, 4]);
    assert!(refs.iter().all(|r| r.path == p.path("rtl/top.v")));

    let symbols = p.handle.file_symbols(&p.path("rtl/top.v"), None).await.unwrap();
    let top = symbols.iter().find(|s| s.name == "top").unwrap();
    assert_eq!(top.kind, SymbolKind::Module);
    assert_eq!(top.end_line(), 5);
    assert!(top.is_valid);
    let clk = symbols.iter().find(|s| s.name == "clk").unwrap();
    assert_eq!(clk.parent_scope, "top");
}

#[tokio::test]
async fn test_rebuild_is_repeatable() {
    let p = project();
    p.handle.rebuild().await.unwrap();
    let first = p.handle.get_stats().await.unwrap();
    p.handle.rebuild().await.unwrap();
    assert_eq!(p.handle.get_stats().await.unwrap(), first);
}

#[tokio::test]
async fn test_reindexing_unchanged_file_keeps_references() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    let top = p.path("rtl/top.v");
    p.handle.reindex_file(&top).await.unwrap();
    p.handle.reindex_file(&top).await.unwrap();

    assert_eq!(p.handle.module_references("counter").await.unwrap().len(), 2);
    assert_eq!(p.handle.get_stats().await.unwrap().file_count, 2);
}

#[tokio::test]
async fn test_reindex_drops_removed_instantiations() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    p.write(
        "rtl/top.v",
        "module top(\n    input clk\n);\n    counter u1 (.clk(clk));\nendmodule\n",
    );
    p.handle.reindex_file(&p.path("rtl/top.v")).await.unwrap();

    let refs = p.handle.module_references("counter").await.unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].position.line, 3);

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].label, "u1 (counter)");
}

#[tokio::test]
async fn test_relative_paths_resolve_against_root() {
    let p = project();
    p.handle.rebuild().await.unwrap();
    p.write("rtl/counter.v", "module counter2(\n    input clk\n);\nendmodule\n");
    p.handle.reindex_file(std::path::Path::new("rtl/counter.v")).await.unwrap();

    let all = p.handle.workspace_symbols().await.unwrap();
    let counter = &all[&p.path("rtl/counter.v")];
    assert!(counter.iter().any(|s| s.name == "counter2"));
    assert!(!counter.iter().any(|s| s.name == "counter"));
}

#[tokio::test]
async fn test_deleted_file_leaves_the_index() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    std::fs::remove_file(p.path("rtl/counter.v")).unwrap();
    p.handle.reindex_file(&p.path("rtl/counter.v")).await.unwrap();

    let stats = p.handle.get_stats().await.unwrap();
    assert_eq!(stats.file_count, 1);
    assert_eq!(stats.module_count, 1);
    // The instantiations live in top.v and stay.
    assert_eq!(p.handle.module_references("counter").await.unwrap().len(), 2);

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].label, "top");
    assert!(forest[0].children.is_empty());
}

#[tokio::test]
async fn test_on_demand_symbols_are_not_stored() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    p.write("scratch.v", "module scratch(\n    input a\n);\nendmodule\n");
    let symbols = p.handle.file_symbols(&p.path("scratch.v"), None).await.unwrap();
    assert!(symbols.iter().any(|s| s.name == "scratch"));

    assert_eq!(p.handle.get_stats().await.unwrap().file_count, 2);
    assert!(
        !p.handle
            .workspace_symbols()
            .await
            .unwrap()
            .contains_key(&p.path("scratch.v"))
    );
}

#[tokio::test]
async fn test_apply_changes_skips_identical_content() {
    let p = project();
    p.handle.rebuild().await.unwrap();
    let engine = p.handle.engine();

    let touched = engine
        .apply_changes(vec![p.path("rtl/top.v"), p.path("rtl/counter.v")])
        .await
        .unwrap();
    assert_eq!(touched, 0);
    assert_eq!(p.tags.calls(), 2);

    p.write("rtl/counter.v", "module counter(\n    input clk,\n    input rst\n);\nendmodule\n");
    let touched = engine.apply_changes(vec![p.path("rtl/counter.v")]).await.unwrap();
    assert_eq!(touched, 1);
    let symbols = p.handle.file_symbols(&p.path("rtl/counter.v"), None).await.unwrap();
    assert!(symbols.iter().any(|s| s.name == "rst"));
}

#[tokio::test]
async fn test_hover_and_lenses_on_instantiated_module() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    let ctx = PositionContext {
        path: p.path("rtl/counter.v"),
        line: 0,
        col: 9,
        content: None,
    };
    match p.handle.hover(&ctx).await.unwrap() {
        Some(HoverInfo::Instantiations { name, references, .. }) => {
            assert_eq!(name, "counter");
            assert_eq!(references.len(), 2);
        }
        other => panic!("unexpected hover: {:?}", other),
    }

    let lenses = p.handle.code_lenses(&p.path("rtl/counter.v")).await.unwrap();
    assert_eq!(lenses.len(), 1);
    assert_eq!(lenses[0].title, "↑ top.v");
    assert!(p.handle.code_lenses(&p.path("rtl/top.v")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_definition_of_instantiated_module() {
    let p = project();
    p.handle.rebuild().await.unwrap();

    let ctx = PositionContext {
        path: p.path("rtl/top.v"),
        line: 3,
        col: 6,
        content: None,
    };
    let target = p.handle.find_definition(&ctx).await.unwrap().unwrap();
    assert_eq!(target.name, "counter");
    assert_eq!(target.path, p.path("rtl/counter.v"));
    assert_eq!(target.position.line, 0);
}

#[tokio::test]
async fn test_queries_wait_for_running_rebuild() {
    let tags = ScriptedTags::default().with_delay("counter.v", Duration::from_millis(100));
    let p = TestProject::with_tags(&[("rtl/top.v", TOP), ("rtl/counter.v", COUNTER)], tags);

    let handle = p.handle.clone();
    let rebuild = tokio::spawn(async move { handle.rebuild().await });
    while p.handle.index_state() != IndexState::Indexing {
        tokio::task::yield_now().await;
    }

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(p.handle.index_state(), IndexState::Ready);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].label, "top");
    assert_eq!(forest[0].children.len(), 2);
    rebuild.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_first_discovered_declaration_wins_regardless_of_timing() {
    let dup = "module dup(\n    input clk\n);\nendmodule\n";
    let tags = ScriptedTags::default().with_delay("a.v", Duration::from_millis(200));
    let p = TestProject::with_tags(&[("a.v", dup), ("b.v", dup)], tags);
    p.handle.rebuild().await.unwrap();

    let forest = p.handle.dependency_forest().await.unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].path, p.path("a.v"));

    let ctx = PositionContext {
        path: p.path("b.v"),
        line: 0,
        col: 8,
        content: None,
    };
    let target = p.handle.find_definition(&ctx).await.unwrap().unwrap();
    assert_eq!(target.path, p.path("a.v"));

    let files: Vec<_> = p.handle.engine().store().await.files().map(|(f, _)| f.clone()).collect();
    assert_eq!(files, vec![p.path("a.v"), p.path("b.v")]);
}
