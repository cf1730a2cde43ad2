use seoedit::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use seoedit::document::{ColumnLabels, Page, encode_with};
use seoedit::ids::Id;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".seoeditrc");
    let content = r#"
# comment
--labels en

--title "Spring refresh"
   
--verbose
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.verbose);
    assert_eq!(flags.labels, Some(ColumnLabels::En));
    assert_eq!(flags.title.as_deref(), Some("Spring refresh"));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".seoeditrc");
    std::fs::write(&path, "--labels en\n--title Draft\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "seoedit".to_string(),
        "--labels".to_string(),
        "zh".to_string(),
        "--no-title".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.labels, Some(ColumnLabels::Zh), "cli should override labels");
    assert!(effective.no_title, "cli flags should be applied");
    assert_eq!(
        effective.title.as_deref(),
        Some("Draft"),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_effective_flags_shape_export() {
    let flags = ConfigFlags {
        title: Some("Launch copy".to_string()),
        labels: Some(ColumnLabels::En),
        ..ConfigFlags::default()
    };
    let mut page = Page::new(Id::new("p"), "Home");
    page.blocks.push(seoedit::document::Block::new(Id::new("b"), "Hero"));
    page.blocks[0]
        .tags
        .push(seoedit::document::Tag::new(Id::new("t"), "h1", "a", "b"));

    let text = encode_with(&[page], &flags.encode_options());
    assert!(text.starts_with("# Launch copy\n"));
    assert!(text.contains("| Type | Original Content | Updated Content |"));
}
