//! End-to-end integration tests
//!
//! Exercises the complete flow: config loading -> write -> read -> insert ->
//! strip, across the fs, yaml, and frontmatter crates.

use fmf_test_utils::{TestDir, init_tracing};
use frontmatter_format::{
    FmfConfig, Frontmatter, Metadata, Style, insert_frontmatter, read, read_raw,
    strip_frontmatter, write,
};
use pretty_assertions::assert_eq;
use serde_yaml::Value;

fn post_metadata() -> Frontmatter {
    fmf_yaml::from_yaml_string("author: Ada\nsummary: |\n  Two lines\n  of summary\ntitle: Notes\ndraft: ~\n")
        .unwrap()
        .as_mapping()
        .cloned()
        .unwrap()
}

#[test]
fn config_driven_write_read_strip_cycle() {
    init_tracing();
    let dir = TestDir::new();
    let config_path = dir.write(
        "fmf.toml",
        "style = \"hash\"\npriority_keys = [\"title\", \"author\"]\n",
    );
    let config = FmfConfig::load(&config_path).unwrap();
    let options = config.write_options();
    let path = dir.path("scripts/notes.py");

    write(
        &path,
        "print('notes')\n",
        Some(&Metadata::Parsed(post_metadata())),
        &options,
    )
    .unwrap();

    let content = dir.read("scripts/notes.py");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "#---");
    assert_eq!(lines[1], "# title: Notes");
    assert_eq!(lines[2], "# author: Ada");
    assert!(lines[3].starts_with("# summary: |"), "got {:?}", lines[3]);
    assert!(!content.contains("draft"), "null values are suppressed");
    assert!(content.ends_with("#---\nprint('notes')\n"));

    let (body, metadata) = read(&path).unwrap();
    let metadata = metadata.unwrap();
    assert_eq!(body, "print('notes')\n");
    assert_eq!(
        metadata.get("summary").and_then(Value::as_str),
        Some("Two lines\nof summary\n")
    );
    assert_eq!(metadata.get("draft"), None);

    strip_frontmatter(&path).unwrap();
    dir.assert_file_content("scripts/notes.py", "print('notes')\n");
    dir.assert_no_temp_files();
}

#[test]
fn yaml_config_with_json_equivalent() {
    let dir = TestDir::new();
    let yaml = FmfConfig::load(dir.write(
        "fmf.yaml",
        "style: html\nmake_parents: false\nstringify_unknown: true\n",
    ))
    .unwrap();
    let json = FmfConfig::load(dir.write(
        "fmf.json",
        r#"{"style": "html", "make_parents": false, "stringify_unknown": true}"#,
    ))
    .unwrap();

    assert_eq!(yaml, json);
    assert_eq!(yaml.style, Style::Html);
    assert!(!yaml.write_options().make_parents);
}

#[test]
fn html_page_metadata_replaced_in_place() {
    let dir = TestDir::new();
    let page = "<html>\n<body>\n<p>Hello</p>\n</body>\n</html>\n";
    let path = dir.write("site/index.html", page);
    let config = FmfConfig {
        style: Style::Html,
        ..FmfConfig::default()
    };

    insert_frontmatter(&path, Some(&Metadata::from("title: Home")), &config.write_options())
        .unwrap();
    insert_frontmatter(
        &path,
        Some(&Metadata::from("title: Home\nlayout: default")),
        &config.write_options(),
    )
    .unwrap();

    let (body, raw) = read_raw(&path).unwrap();
    assert_eq!(body, page);
    assert_eq!(raw.as_deref(), Some("title: Home\nlayout: default\n"));
    dir.assert_no_temp_files();
}

#[test]
fn metadata_from_yaml_file_into_markdown() {
    let dir = TestDir::new();
    let source = dir.path("meta.yml");
    fmf_yaml::write_yaml_file(&post_metadata(), &source, None, false).unwrap();
    let value = fmf_yaml::read_yaml_file(&source).unwrap();
    let metadata = Metadata::from_serialize(&value).unwrap().unwrap();

    let path = dir.path("post.md");
    write(&path, "# Post\n", Some(&metadata), &Default::default()).unwrap();

    let (body, parsed) = read(&path).unwrap();
    assert_eq!(body, "# Post\n");
    assert_eq!(
        parsed.unwrap().get("title").and_then(Value::as_str),
        Some("Notes")
    );
}

#[test]
fn config_parse_errors_surface() {
    let dir = TestDir::new();
    let err = FmfConfig::load(dir.write("fmf.toml", "style = [")).unwrap_err();
    assert!(!err.is_format());
    assert!(err.to_string().contains("TOML"));

    let err = FmfConfig::load(dir.write("fmf.ini", "style=yaml")).unwrap_err();
    assert!(err.to_string().contains("ini"));
    tracing::debug!(%err, "expected config error");
}
