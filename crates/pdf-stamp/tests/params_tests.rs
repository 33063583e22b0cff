use pdf_stamp::*;

#[test]
fn test_defaults() {
    let params = StampParameters::default();
    assert_eq!(params.stamp_type(), StampType::Text);
    assert_eq!(params.stamp_text(), "");
    assert_eq!(params.alphabet(), Alphabet::Roman);
    assert!(params.stamp_image().is_none());
    assert_eq!(params.font_size(), 80.0);
    assert_eq!(params.rotation(), 0.0);
    assert_eq!(params.opacity(), 50.0);
    assert_eq!(params.opacity_fraction(), 0.5);
    assert_eq!(params.custom_color().to_hex(), "#d3d3d3");
    assert_eq!(params.position_mode(), PositionMode::QuickGrid);
    assert_eq!(params.anchor_cell(), AnchorCell::Center);
    assert_eq!(params.margin(), Margin::Medium);
    assert_eq!(params.page_selection(), "");
}

#[test]
fn test_non_latin_alphabets_default_larger() {
    let roman = Alphabet::Roman.default_font_size();
    for alphabet in Alphabet::ALL.into_iter().filter(|a| *a != Alphabet::Roman) {
        assert!(
            alphabet.default_font_size() > roman,
            "{alphabet} should default larger than roman"
        );
    }
}

#[test]
fn test_external_values() {
    let margins: Vec<String> = Margin::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(margins, ["small", "medium", "large", "x-large"]);

    let alphabets: Vec<String> = Alphabet::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        alphabets,
        ["roman", "arabic", "japanese", "korean", "chinese", "thai"]
    );

    assert_eq!("bottom-right".parse::<AnchorCell>(), Ok(AnchorCell::BottomRight));
    assert_eq!("custom".parse::<PositionMode>(), Ok(PositionMode::Custom));
    assert_eq!("IMAGE".parse::<StampType>(), Ok(StampType::Image));
    assert!("middle".parse::<AnchorCell>().is_err());
}

#[test]
fn test_snapshots_are_independent() {
    let first = StampParameters::text("one");
    let second = first.update_fields([
        StampField::StampText("two".into()),
        StampField::CustomColor(Color::rgb(255, 0, 0)),
        StampField::PageSelection("1-3".into()),
    ]);
    assert_eq!(first.stamp_text(), "one");
    assert_eq!(first.page_selection(), "");
    assert_eq!(second.stamp_text(), "two");
    assert_eq!(second.custom_color(), Color::rgb(255, 0, 0));
    assert_eq!(second.page_selection(), "1-3");
}

#[test]
fn test_fonts_per_alphabet() {
    assert_eq!(Alphabet::Roman.font_family(), "NotoSans-Regular");
    assert_eq!(Alphabet::Chinese.font_family(), "NotoSansSC-Regular");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_parameters() {
    use tempfile::NamedTempFile;

    let params = StampParameters::text("APPROVED").update_fields([
        StampField::Alphabet(Alphabet::Japanese),
        StampField::FontSize(42.0),
        StampField::Rotation(-30.0),
        StampField::Opacity(75.0),
        StampField::CustomColor(Color::rgb(0x12, 0x34, 0x56)),
        StampField::AnchorCell(AnchorCell::BottomRight),
        StampField::Margin(Margin::XLarge),
        StampField::PageSelection("2n-1".into()),
    ]);

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    params.save(path).await.unwrap();
    let loaded = StampParameters::load(path).await.unwrap();

    assert_eq!(loaded, params);
    assert!(loaded.font_size_overridden());

    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("\"x-large\""));
    assert!(json.contains("\"bottom-right\""));
    assert!(json.contains("\"#123456\""));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_image_payload_is_not_persisted() {
    use tempfile::NamedTempFile;

    let params = StampParameters::image(StampImage::new("logo.png", vec![1u8, 2, 3], 10, 10));
    let temp_file = NamedTempFile::new().unwrap();

    params.save(temp_file.path()).await.unwrap();
    let loaded = StampParameters::load(temp_file.path()).await.unwrap();

    assert_eq!(loaded.stamp_type(), StampType::Image);
    assert!(loaded.stamp_image().is_none());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"{ "stamp_text": "COPY", "margin": "small" }"#,
    )
    .unwrap();

    let loaded = StampParameters::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.stamp_text(), "COPY");
    assert_eq!(loaded.margin(), Margin::Small);
    assert_eq!(loaded.opacity(), 50.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_bad_config_is_config_error() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "margin": "enormous" }"#).unwrap();

    match StampParameters::load(temp_file.path()).await {
        Err(StampError::Config(msg)) => assert!(msg.contains("Failed to parse")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_loaded_custom_point_stays_on_page() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"{ "position_mode": "custom", "custom_point": { "x": 3.5, "y": -0.25 } }"#,
    )
    .unwrap();

    let loaded = StampParameters::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.custom_point(), NormalizedPoint::new(1.0, 0.0));
    assert_eq!(loaded.position_mode(), PositionMode::Custom);
}
