use crate::{CursorArgs, ProjectArgs, open_engine};
use hdlscope_api::{
    EngineLifecycle, IndexService, Language, NavigationService, PositionContext, Symbol,
};
use hdlscope_core::features::navigation::render_markdown;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Tabled)]
struct SymbolRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "End")]
    end: String,
}

impl From<&Symbol> for SymbolRow {
    fn from(s: &Symbol) -> Self {
        let scope = if s.is_top_level() {
            "-".to_string()
        } else {
            format!("{}:{}", s.parent_kind, s.parent_scope)
        };
        let end = if s.is_valid {
            (s.end_line() + 1).to_string()
        } else {
            "-".to_string()
        };
        Self {
            line: s.start_line() + 1,
            kind: s.kind.to_string(),
            name: s.name.clone(),
            scope,
            end,
        }
    }
}

fn context(cursor: CursorArgs) -> PositionContext {
    PositionContext {
        path: cursor.file,
        line: cursor.line.saturating_sub(1),
        col: cursor.col.saturating_sub(1),
        content: None,
    }
}

fn location(path: &Path, line: usize, col: usize) -> String {
    format!("{}:{}:{}", path.display(), line + 1, col + 1)
}

pub async fn refs(project: ProjectArgs, module: String) -> CliResult {
    let engine = open_engine(&project);
    engine.rebuild().await?;
    let references = engine.module_references(&module).await?;
    if references.is_empty() {
        println!("Module `{}` is not instantiated.", module);
    }
    for r in references {
        println!("{}", location(&r.path, r.position.line, r.position.col));
    }
    Ok(())
}

pub async fn symbols(project: ProjectArgs, file: PathBuf) -> CliResult {
    let engine = open_engine(&project);
    let symbols = engine.file_symbols(&file, None).await?;
    let rows: Vec<SymbolRow> = symbols.iter().map(SymbolRow::from).collect();
    println!("{}", Table::new(rows).with(Style::psql()));
    Ok(())
}

pub async fn definition(project: ProjectArgs, cursor: CursorArgs) -> CliResult {
    let engine = open_engine(&project);
    engine.rebuild().await?;
    match engine.find_definition(&context(cursor)).await? {
        Some(target) => println!(
            "{} {} {}",
            target.kind,
            target.name,
            location(&target.path, target.position.line, target.position.col)
        ),
        None => println!("No definition found."),
    }
    Ok(())
}

pub async fn hover(project: ProjectArgs, cursor: CursorArgs) -> CliResult {
    let engine = open_engine(&project);
    engine.rebuild().await?;
    let language = Language::from_path(&cursor.file);
    match engine.hover(&context(cursor)).await? {
        Some(info) => println!("{}", render_markdown(&info, language)),
        None => println!("Nothing to show."),
    }
    Ok(())
}

pub async fn lens(project: ProjectArgs, file: PathBuf) -> CliResult {
    let engine = open_engine(&project);
    engine.rebuild().await?;
    for lens in engine.code_lenses(&file).await? {
        println!("{}:{}  {}", lens.module_name, lens.position.line + 1, lens.title);
    }
    Ok(())
}

pub async fn complete(project: ProjectArgs, cursor: CursorArgs) -> CliResult {
    let engine = open_engine(&project);
    let items = engine.completions(&context(cursor), None).await?;
    for item in items {
        println!("{}\t{}", item.insert_text.as_deref().unwrap_or(&item.label), item.detail);
    }
    Ok(())
}

pub async fn instantiate(project: ProjectArgs, file: PathBuf, module: Option<String>) -> CliResult {
    let engine = open_engine(&project);
    let template = engine
        .instantiation_template(&file, module.as_deref())
        .await?;
    print!("{}", template.text);
    Ok(())
}
