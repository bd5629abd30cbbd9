//! depref 命令行：对 import map / 源码文件执行依赖引用提取，每条引用输出一行 JSON
//!
//! 用法：
//!   depref deno.json src/mod.ts
//!   depref --kind thin-url --kind scoped-registry src/**/*.ts
//!   depref --catalog my-rules.json deps.ts
//!   depref --dump-catalog

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};

use depref::{
    parse_jsonc, ConfigManager, Document, DocumentKind, ExtractedReference, LocatorKind,
    ReferenceExtractor, RuleLoader,
};

/// 依赖引用提取工具
#[derive(Parser, Debug)]
#[command(name = "depref", version)]
#[command(about = "Extract versioned dependency references from import maps and module sources")]
struct Args {
    /// 自定义规则文件（JSON），缺省使用内置规则库
    #[arg(long, short = 'c')]
    catalog: Option<PathBuf>,

    /// 仅启用指定托管约定（可重复）
    #[arg(long, short = 'k', value_parser = parse_kind)]
    kind: Vec<LocatorKind>,

    /// 输出调试日志
    #[arg(long, short = 'v')]
    verbose: bool,

    /// 打印规则库定义后退出
    #[arg(long)]
    dump_catalog: bool,

    /// 待提取的文件
    files: Vec<PathBuf>,
}

/// 单条输出
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputLine<'a> {
    file: &'a Path,
    #[serde(flatten)]
    reference: &'a ExtractedReference,
    datasource: &'static str,
}

fn parse_kind(s: &str) -> Result<LocatorKind, String> {
    LocatorKind::parse(s).ok_or_else(|| {
        let known: Vec<&str> = LocatorKind::ALL.iter().map(LocatorKind::as_str).collect();
        format!("unknown locator kind {:?}, expected one of: {}", s, known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "depref=debug" } else { "depref=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut builder = ConfigManager::custom().verbose(args.verbose);
    if let Some(path) = &args.catalog {
        builder = builder.catalog_path(path.clone());
    }
    if !args.kind.is_empty() {
        builder = builder.kinds(args.kind.clone());
    }
    let config = builder.build();

    if args.dump_catalog {
        let catalog = RuleLoader::load(&config).context("failed to load rule catalog")?;
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let extractor = Arc::new(ReferenceExtractor::from_config(&config).context("failed to build rule catalog")?);
    debug!("规则集：{:?}", extractor.catalog().kinds().collect::<Vec<_>>());

    let results = extract_files(extractor, &args.files).await;
    for (file, references) in &results {
        for reference in references {
            let line = OutputLine {
                file,
                reference,
                datasource: reference.datasource(),
            };
            println!("{}", serde_json::to_string(&line)?);
        }
    }

    Ok(())
}

/// 逐个文件提取；读取或解析失败的文件记录告警后跳过，不影响其余文件
async fn extract_files(
    extractor: Arc<ReferenceExtractor>,
    files: &[PathBuf],
) -> Vec<(PathBuf, Vec<ExtractedReference>)> {
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        match extract_path(Arc::clone(&extractor), file).await {
            Ok(references) => results.push((file.clone(), references)),
            Err(e) => warn!("⚠️ 跳过{}：{:#}", file.display(), e),
        }
    }
    results
}

async fn extract_path(extractor: Arc<ReferenceExtractor>, file: &Path) -> Result<Vec<ExtractedReference>> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let kind = DocumentKind::from_path(file);
    tokio::task::spawn_blocking(move || extract_file(&extractor, kind, &content))
        .await
        .context("extraction task panicked")?
        .with_context(|| format!("failed to extract {}", file.display()))
}

fn extract_file(extractor: &ReferenceExtractor, kind: DocumentKind, content: &str) -> Result<Vec<ExtractedReference>> {
    match kind {
        DocumentKind::Json => {
            let value = parse_jsonc(content).context("failed to parse JSON document")?;
            Ok(extractor.extract_all(&Document::Json(&value)))
        }
        DocumentKind::Text => Ok(extractor.extract_all(&Document::Text(content))),
    }
}
