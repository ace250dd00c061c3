//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full parse → assemble → publish pipeline,
//! error handling paths, and CLI command handlers with real fixture files.

use mlbom_doc::cli::{run_generate, GenerateConfig};
use mlbom_doc::config::{load_config_file, AppConfig};
use mlbom_doc::pipeline::{
    exit_codes, generate_document, output_report, parse_mlbom_with_context, OutputTarget,
    PipelineError,
};
use mlbom_doc::reports::{BuilderOptions, ReportFormat};
use mlbom_doc::MlbomDocError;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn full_model_card() -> PathBuf {
    fixture_path("cyclonedx/full-model-card.cdx.json")
}

// ============================================================================
// Pipeline Parse Stage Tests
// ============================================================================

mod parse_stage {
    use super::*;

    #[test]
    fn parse_cyclonedx_fixture() {
        let parsed = parse_mlbom_with_context(&full_model_card(), true)
            .expect("parse should succeed");

        assert_eq!(parsed.mlbom().package_count(), 3);
        assert_eq!(parsed.mlbom().ml_model_count(), 1);
        assert!(parsed.file_name().ends_with("full-model-card.cdx.json"));
    }

    #[test]
    fn parse_failure_names_the_file() {
        let path = fixture_path("invalid/truncated.cdx.json");
        let err = parse_mlbom_with_context(&path, true).unwrap_err();

        let pipeline_err = err
            .downcast_ref::<PipelineError>()
            .expect("should be a PipelineError");
        assert!(matches!(pipeline_err, PipelineError::ParseFailed { .. }));
        assert!(err.to_string().contains("truncated.cdx.json"));
    }

    #[test]
    fn into_mlbom_keeps_packages() {
        let parsed = parse_mlbom_with_context(&fixture_path("cyclonedx/no-model-card.cdx.json"), true)
            .expect("parse should succeed");
        let mlbom = parsed.into_mlbom();
        assert_eq!(mlbom.package_count(), 2);
    }
}

// ============================================================================
// Document Generation Tests
// ============================================================================

mod generation {
    use super::*;

    fn generate(format: ReportFormat, file_name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join(file_name);
        generate_document(
            &full_model_card(),
            format,
            &OutputTarget::File(out.clone()),
            &BuilderOptions::default(),
            false,
        )
        .expect("generation should succeed");
        (dir, out)
    }

    #[test]
    fn markdown_document_contents() {
        let (_dir, out) = generate(ReportFormat::Markdown, "model.md");
        let text = std::fs::read_to_string(out).expect("read output");

        assert!(text.starts_with("# MLBOM Summary\n\n| Item | Details |\n|---|---|\n"));
        assert!(text.contains("| MLBOM Type | CycloneDX |"));
        assert!(text.contains("# Model Details - bert-sentiment"));
        assert!(text.contains("## Performance Metrics"));
        assert!(text.contains("| accuracy | 0.93 | validation | 0.91 | 0.95 |"));
        assert!(text.contains("| **Properties** |  |"));
        assert!(text.contains("| Custodian | Acme AI | data@acme.ai |"));
    }

    #[test]
    fn json_document_structure() {
        let (_dir, out) = generate(ReportFormat::Json, "model.json");
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out).expect("read output")).expect("valid json");

        assert_eq!(doc["title"], "MLBOM Summary");
        let content = doc["content"].as_array().expect("content array");
        assert_eq!(content[0]["type"], "heading");
        assert_eq!(content[0]["text"], "MLBOM Summary");
        assert_eq!(content[1]["type"], "table");
        assert_eq!(content[1]["headers"], serde_json::json!(["Item", "Details"]));
        assert_eq!(content[1]["rows"][1]["Details"], "CycloneDX");
        assert_eq!(content[2], serde_json::json!({"type": "paragraph", "text": ""}));

        let headings: Vec<&str> = content
            .iter()
            .filter(|block| block["type"] == "heading")
            .filter_map(|block| block["text"].as_str())
            .collect();
        assert_eq!(headings.len(), 12);
        assert_eq!(headings.last(), Some(&"Properties"));
    }

    #[test]
    fn console_document_is_plain_text() {
        let (_dir, out) = generate(ReportFormat::Console, "model.txt");
        let text = std::fs::read_to_string(out).expect("read output");

        assert!(text.starts_with("MLBOM Summary\n============="));
        assert!(text.contains("Model Details - bert-sentiment"));
        assert!(text.contains('┌'));
        assert!(!text.contains('\u{1b}'), "no ANSI escapes without color");
    }

    #[test]
    fn same_input_renders_identical_documents() {
        let (_a, first) = generate(ReportFormat::Markdown, "a.md");
        let (_b, second) = generate(ReportFormat::Markdown, "b.md");
        assert_eq!(
            std::fs::read(first).expect("read"),
            std::fs::read(second).expect("read")
        );
    }

    #[test]
    fn custom_title_used_for_paragraph_and_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("model.json");
        let options = BuilderOptions {
            title: Some("Model Inventory".to_string()),
            ..BuilderOptions::default()
        };
        generate_document(
            &full_model_card(),
            ReportFormat::Json,
            &OutputTarget::File(out.clone()),
            &options,
            false,
        )
        .expect("generation should succeed");

        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out).expect("read")).expect("valid json");
        assert_eq!(doc["title"], "Model Inventory");
        assert_eq!(doc["content"][0]["text"], "MLBOM Summary");
        assert_eq!(
            doc["content"][1],
            serde_json::json!({"type": "paragraph", "text": "Model Inventory"})
        );
    }

    #[test]
    fn strict_mode_writes_nothing_on_missing_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("model.md");
        let err = generate_document(
            &fixture_path("cyclonedx/missing-classification.cdx.json"),
            ReportFormat::Markdown,
            &OutputTarget::File(out.clone()),
            &BuilderOptions::default(),
            true,
        )
        .unwrap_err();

        assert!(matches!(err, MlbomDocError::Report { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn output_report_uses_configured_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("model.md");
        let parsed = parse_mlbom_with_context(&fixture_path("cyclonedx/minimal-model.cdx.json"), true)
            .expect("parse should succeed");

        let mut config = AppConfig::default();
        config.output.format = ReportFormat::Markdown;
        config.output.file = Some(out.clone());
        config.report.title = Some("ResNet".to_string());

        output_report(&config, &parsed, true).expect("output should succeed");
        let text = std::fs::read_to_string(out).expect("read output");
        assert!(text.starts_with("# MLBOM Summary\n\nResNet\n"));
        assert!(text.contains("| Version | 1.5 |"));
    }
}

// ============================================================================
// CLI Command Tests
// ============================================================================

mod cli_generate {
    use super::*;

    fn base(input: PathBuf) -> GenerateConfig {
        GenerateConfig {
            input: Some(input),
            quiet: true,
            ..GenerateConfig::default()
        }
    }

    #[test]
    fn missing_input_is_usage_error() {
        let code = run_generate(GenerateConfig {
            quiet: true,
            ..GenerateConfig::default()
        })
        .expect("run");
        assert_eq!(code, exit_codes::USAGE);
    }

    #[test]
    fn file_format_without_output_is_usage_error() {
        for format in [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Pdf] {
            let code = run_generate(GenerateConfig {
                format: Some(format),
                ..base(full_model_card())
            })
            .expect("run");
            assert_eq!(code, exit_codes::USAGE, "{format} needs an output file");
        }
    }

    #[test]
    fn nonexistent_input_is_error() {
        let code = run_generate(base(fixture_path("cyclonedx/nope.cdx.json"))).expect("run");
        assert_eq!(code, exit_codes::ERROR);
    }

    #[test]
    fn unparseable_input_propagates_error() {
        assert!(run_generate(base(fixture_path("invalid/truncated.cdx.json"))).is_err());
    }

    #[test]
    fn markdown_written_to_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("model.md");

        let code = run_generate(GenerateConfig {
            format: Some(ReportFormat::Markdown),
            output_file: Some(out.clone()),
            title: Some("BERT".to_string()),
            ..base(full_model_card())
        })
        .expect("run");

        assert_eq!(code, exit_codes::SUCCESS);
        let text = std::fs::read_to_string(out).expect("read output");
        assert!(text.starts_with("# MLBOM Summary\n\nBERT\n"));
    }

    #[test]
    fn strict_flag_fails_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("model.md");

        let result = run_generate(GenerateConfig {
            format: Some(ReportFormat::Markdown),
            output_file: Some(out.clone()),
            strict: true,
            ..base(fixture_path("cyclonedx/missing-classification.cdx.json"))
        });

        assert!(result.is_err());
        assert!(!out.exists());
    }
}

// ============================================================================
// Config File Tests
// ============================================================================

mod config_file {
    use super::*;

    #[test]
    fn config_file_supplies_format_and_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("from-config.json");
        let config_path = dir.path().join("mlbomdoc.yaml");
        std::fs::write(
            &config_path,
            format!(
                "output:\n  format: json\n  file: {}\nreport:\n  title: Configured\n",
                out.display()
            ),
        )
        .expect("write config");

        let code = run_generate(GenerateConfig {
            input: Some(full_model_card()),
            config_file: Some(config_path),
            quiet: true,
            ..GenerateConfig::default()
        })
        .expect("run");

        assert_eq!(code, exit_codes::SUCCESS);
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(out).expect("read")).expect("valid json");
        assert_eq!(doc["title"], "Configured");
    }

    #[test]
    fn cli_format_overrides_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("mlbomdoc.yaml");
        std::fs::write(&config_path, "output:\n  format: json\n").expect("write config");

        let config = GenerateConfig {
            format: Some(ReportFormat::Markdown),
            config_file: Some(config_path),
            ..GenerateConfig::default()
        }
        .resolve();
        assert_eq!(config.output.format, ReportFormat::Markdown);
    }

    #[test]
    fn pdf_settings_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("mlbomdoc.yaml");
        std::fs::write(&config_path, "pdf:\n  margins: 15\n  font_size: 11\n")
            .expect("write config");

        let config = load_config_file(&config_path).expect("load");
        assert_eq!(config.pdf.margins, 15);
        assert_eq!(config.pdf.font_size, 11);
        assert_eq!(config.output.format, ReportFormat::Console);
    }

    #[test]
    fn malformed_config_file_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("mlbomdoc.yaml");
        std::fs::write(&config_path, "output: [unclosed").expect("write config");

        assert!(load_config_file(&config_path).is_err());
    }
}
