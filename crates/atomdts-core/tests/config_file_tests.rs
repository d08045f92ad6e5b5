//! Configuration file loading from disk.

use atomdts_core::{FormatterKind, GeneratorConfig};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
module_name = "atom-shell"
suppressed_superclass = "Base"
metadata_path = "docs/api.json"
builtin_patches = false

[formatter]
kind = "command"
indent_width = 2
program = "tsfmt"
args = ["--stdin", "{file}"]
"#,
    );

    let config = GeneratorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.module_name, "atom-shell");
    assert_eq!(config.suppressed_superclass, "Base");
    assert_eq!(config.metadata_path, PathBuf::from("docs/api.json"));
    assert!(!config.builtin_patches);
    assert_eq!(config.formatter.kind, FormatterKind::Command);
    assert_eq!(config.formatter.indent_width, 2);
    assert_eq!(config.formatter.program.as_deref(), Some("tsfmt"));
    assert_eq!(config.formatter.args, vec!["--stdin", "{file}"]);
}

#[test]
fn test_empty_file_is_all_defaults() {
    let file = write_config("");
    assert_eq!(GeneratorConfig::from_file(file.path()).unwrap(), GeneratorConfig::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "module_name = \"\"",
        "[formatter]\nindent_width = 0",
        "[formatter]\nindent_width = 17",
        "[formatter]\nkind = \"command\"",
        "[formatter]\nkind = \"prettier\"",
        "builtin_patches = \"yes\"",
    ];

    for case in cases {
        let file = write_config(case);
        let err = GeneratorConfig::from_file(file.path()).unwrap_err();
        assert!(err.is_config_error(), "{case}: {err}");
    }
}

#[test]
fn test_missing_file() {
    let err = GeneratorConfig::from_file("/nonexistent/atomdts.toml").unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("/nonexistent/atomdts.toml"));
}
