use anyhow::Result;
use clap::Parser;
use std::path::Path;

use catalyst_content_core::{ParserConfig, ProposalProcessor};

#[derive(Parser)]
#[command(name = "catalyst-content")]
#[command(about = "Extracts structured field groups from Catalyst proposal markdown")]
struct Args {
    /// Path to a single proposal markdown file to process
    #[arg(short, long, conflicts_with = "batch")]
    input: Option<String>,

    /// Directory of proposal files to process in batch (.md and .txt)
    #[arg(short, long)]
    batch: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Extract only one field group: project_details, pitch, category_questions, or theme.
    /// Applies in both single-file and batch mode.
    #[arg(short = 'g', long)]
    field_group: Option<String>,

    /// Output file path (single-file mode; auto-generated if not specified)
    #[arg(short, long)]
    output: Option<String>,

    /// Output directory for batch extraction results
    #[arg(long, default_value = "extractions")]
    output_dir: String,

    /// Output format: full or flat
    #[arg(short = 'f', long, default_value = "full")]
    output_format: String,

    /// Parse without writing any extraction files (batch mode)
    #[arg(long)]
    dry_run: bool,

    /// Skip cache and force fresh processing
    #[arg(long)]
    skip_cache: bool,

    /// Cache directory for extraction results
    #[arg(long, default_value = "cache")]
    cache_dir: String,

    /// List supported field groups and their keys, then exit
    #[arg(long)]
    show_fields: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    println!("🦀 Catalyst Content Parser");

    let config = ParserConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    let processor = if args.skip_cache {
        ProposalProcessor::new_uncached(config)?
    } else {
        ProposalProcessor::new_with_cache_dir(config, &args.cache_dir)?
    };

    if args.show_fields {
        show_fields(&processor);
        return Ok(());
    }

    if let Some(batch_dir) = &args.batch {
        return run_batch(&processor, batch_dir, &args);
    }

    let Some(input) = &args.input else {
        eprintln!("❌ Provide --input <file> or --batch <dir> (see --help)");
        std::process::exit(1);
    };

    if !Path::new(input).exists() {
        println!("⚠️  Input file not found at: {}", input);
        println!("   Please check the file path.");
        return Ok(());
    }

    let content = std::fs::read_to_string(input)?;
    println!("📄 Processing: {}", input);

    // Single-group mode prints the requested group and exits
    if let Some(group) = &args.field_group {
        match processor.parser().parse_with_fallback(&content, group) {
            Some(result) => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            None => {
                println!("⚠️  No {} sections found", group);
            }
        }
        return Ok(());
    }

    match processor.process_content(&content) {
        Ok(record) => {
            println!("✅ Successfully processed proposal");
            println!("📊 Extraction metrics:");
            println!("   - Field groups: {}", record.fields.group_count());
            println!("   - Sections: {}", record.fields.section_count());
            if let Some(format) = &record.content_format {
                println!("   - Format: {:?}", format);
            }

            let output_path = if let Some(output) = &args.output {
                output.clone()
            } else {
                let input_name = Path::new(input)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                format!("{input_name}_extraction.json")
            };

            record.save_with_format(&output_path, &args.output_format)?;
            println!("💾 Results saved to: {}", output_path);
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn show_fields(processor: &ProposalProcessor) {
    println!("\n📋 Supported field groups:");
    for group in processor.parser().supported_field_groups() {
        let keys = processor.parser().field_keys(group);
        println!("  {:<20} {}", group, keys.join(", "));
    }
}

fn run_batch(processor: &ProposalProcessor, batch_dir: &str, args: &Args) -> Result<()> {
    if !Path::new(batch_dir).is_dir() {
        eprintln!("❌ Batch directory not found: {}", batch_dir);
        std::process::exit(1);
    }

    if !args.dry_run {
        std::fs::create_dir_all(&args.output_dir)?;
    }

    println!("📦 Batch processing: {}", batch_dir);

    let mut processed = 0usize;
    let mut extracted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    let mut entries: Vec<_> = std::fs::read_dir(batch_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("md") | Some("txt")
            )
        })
        .collect();
    entries.sort();

    for path in &entries {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("<unnamed>");
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {}: read failed: {e}", name);
                failed += 1;
                continue;
            }
        };
        if content.trim().is_empty() {
            skipped += 1;
            continue;
        }

        processed += 1;

        // Restricted run: extract only the requested field group per file
        if let Some(group) = &args.field_group {
            match processor.parser().parse_with_fallback(&content, group) {
                Some(result) => {
                    extracted += 1;
                    if !args.dry_run {
                        let stem = path
                            .file_stem()
                            .and_then(|s| s.to_str())
                            .unwrap_or("proposal");
                        let out = format!("{}/{}_extraction.json", args.output_dir, stem);
                        std::fs::write(&out, serde_json::to_string_pretty(&result)?)?;
                    }
                    println!("  ✅ {} ({} {} sections)", name, result.len(), group);
                }
                None => {
                    println!("  ⚠️  {}: no {} sections found", name, group);
                }
            }
            continue;
        }

        match processor.process_content(&content) {
            Ok(record) => {
                if !record.fields.is_empty() {
                    extracted += 1;
                }
                if !args.dry_run {
                    let stem = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("proposal");
                    let out = format!("{}/{}_extraction.json", args.output_dir, stem);
                    record.save_with_format(&out, &args.output_format)?;
                }
                println!(
                    "  ✅ {} ({} groups, {} sections)",
                    name,
                    record.fields.group_count(),
                    record.fields.section_count()
                );
            }
            Err(e) => {
                eprintln!("  ❌ {}: {e}", name);
                failed += 1;
            }
        }
    }

    println!("\n📊 Batch summary:");
    println!("   - Processed: {}", processed);
    println!("   - With extractions: {}", extracted);
    println!("   - Skipped (empty): {}", skipped);
    println!("   - Failed: {}", failed);

    if !args.dry_run {
        let summary = serde_json::json!({
            "batch_dir": batch_dir,
            "completed_at": chrono::Utc::now().to_rfc3339(),
            "counts": {
                "processed": processed,
                "extracted": extracted,
                "skipped": skipped,
                "failed": failed,
            }
        });
        let summary_path = format!("{}/summary.json", args.output_dir);
        std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        println!("💾 Summary saved to: {}", summary_path);
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_args(batch_dir: &str, output_dir: &str, field_group: Option<&str>) -> Args {
        Args {
            input: None,
            batch: Some(batch_dir.to_string()),
            config: None,
            field_group: field_group.map(str::to_string),
            output: None,
            output_dir: output_dir.to_string(),
            output_format: "full".to_string(),
            dry_run: false,
            skip_cache: true,
            cache_dir: "cache".to_string(),
            show_fields: false,
        }
    }

    #[test]
    fn batch_field_group_restricts_extraction() {
        let dir = std::env::temp_dir().join("catalyst_cli_batch_group_test");
        let out_dir = dir.join("out");
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("p1.md"),
            "### \\[SOLUTION\\]\nA voting dashboard.\n\n### \\[TEAM\\]\nTwo engineers.\n",
        )
        .unwrap();

        let processor = ProposalProcessor::new_uncached(ParserConfig::default()).unwrap();
        let args = batch_args(dir.to_str().unwrap(), out_dir.to_str().unwrap(), Some("pitch"));
        run_batch(&processor, dir.to_str().unwrap(), &args).unwrap();

        let json = std::fs::read_to_string(out_dir.join("p1_extraction.json")).unwrap();
        assert!(json.contains("\"team\""));
        assert!(json.contains("Two engineers."));
        // Only the requested group is extracted and written.
        assert!(!json.contains("solution"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn batch_without_field_group_extracts_everything() {
        let dir = std::env::temp_dir().join("catalyst_cli_batch_full_test");
        let out_dir = dir.join("out");
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("p1.md"),
            "### \\[SOLUTION\\]\nA voting dashboard.\n\n### \\[TEAM\\]\nTwo engineers.\n",
        )
        .unwrap();

        let processor = ProposalProcessor::new_uncached(ParserConfig::default()).unwrap();
        let args = batch_args(dir.to_str().unwrap(), out_dir.to_str().unwrap(), None);
        run_batch(&processor, dir.to_str().unwrap(), &args).unwrap();

        let json = std::fs::read_to_string(out_dir.join("p1_extraction.json")).unwrap();
        assert!(json.contains("project_details"));
        assert!(json.contains("pitch"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
