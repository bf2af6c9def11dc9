//! Tests for configuration building and loading.

use rstest::rstest;

use super::{Config, CopyFlag, CopyFlags, CopyOptions, DEFAULT_STRUCT_TAG, FieldMap};
use crate::convert::ConvertOptions;

#[test]
fn defaults_are_empty() {
    let config = Config::default();
    assert!(config.flags().is_empty());
    assert_eq!(config.struct_tag_name(), DEFAULT_STRUCT_TAG);
    assert!(config.field_map().is_empty());
    assert!(config.callback().is_none());
}

#[test]
fn with_added_flags_leaves_the_original_untouched() {
    let base = Config::builder()
        .flags(CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING)
        .rename_field("A", "B")
        .build();
    let derived = base.with_added_flags(CopyFlags::OVERWRITE_EXISTING);

    assert!(!base.has_flags(CopyFlags::OVERWRITE_EXISTING));
    assert!(derived.has_flags(
        CopyFlags::OVERWRITE_EXISTING | CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING
    ));
    assert_eq!(derived.field_map().renamed("A"), Some("B"));
}

#[test]
fn flags_render_by_name() {
    let flags = CopyFlags::OVERWRITE_EXISTING | CopyFlags::DISABLE_MAP_OF_ANY_TARGET_RECURSION;
    assert_eq!(
        format!("{flags:?}"),
        "CopyFlags(OVERWRITE_EXISTING | DISABLE_MAP_OF_ANY_TARGET_RECURSION)"
    );
    assert_eq!(format!("{:?}", CopyFlags::NONE), "CopyFlags(NONE)");
    assert_eq!(CopyFlags::from_bits_truncate(0xFF).bits(), 0b1_1111);
}

#[test]
fn field_map_collects_from_pairs() {
    let map: FieldMap = [("XValue2", "Value2"), ("Outer.X", "Y")].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.renamed("Outer.X"), Some("Y"));
    assert_eq!(map.renamed("X"), None);
}

#[test]
fn options_load_from_toml() -> anyhow::Result<()> {
    let options: CopyOptions = toml::from_str(
        r#"
        flags = ["overwrite_existing", "error_if_struct_field_missing"]
        struct_tag_name = "copy"

        [field_map]
        "Outer.XValue2" = "Value2"

        [conversion]
        reject_fractional_floats = true
        "#,
    )?;
    let config = Config::from_options(&options);

    assert!(config.has_flags(
        CopyFlags::OVERWRITE_EXISTING | CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING
    ));
    assert_eq!(config.struct_tag_name(), "copy");
    assert_eq!(config.field_map().renamed("Outer.XValue2"), Some("Value2"));
    assert!(format!("{config:?}").contains("reject_fractional_floats: true"));
    Ok(())
}

#[test]
fn options_accept_null_field_map_entries() -> anyhow::Result<()> {
    let options: CopyOptions =
        serde_json::from_str(r#"{"field_map": {"Kept": null}}"#)?;
    let config = Config::from(&options);
    let entry = config.field_map().get("Kept");
    assert!(entry.is_some_and(|e| e.field_name().is_none()));
    Ok(())
}

#[rstest]
#[case::unknown_flag(r#"{"flags": ["overwrite_everything"]}"#)]
#[case::unknown_key(r#"{"flag": []}"#)]
fn options_reject_unknown_input(#[case] json: &str) {
    assert!(serde_json::from_str::<CopyOptions>(json).is_err());
}

#[test]
fn options_round_trip_through_json() -> anyhow::Result<()> {
    let options = CopyOptions {
        flags: vec![CopyFlag::AllowDuplicatingIfNotSettable],
        struct_tag_name: None,
        field_map: [("A".to_owned(), Some("B".to_owned()))].into(),
        conversion: ConvertOptions {
            reject_fractional_floats: false,
            empty_string_as_zero: true,
        },
    };
    let json = serde_json::to_string(&options)?;
    assert!(json.contains("allow_duplicating_if_not_settable"));
    assert_eq!(serde_json::from_str::<CopyOptions>(&json)?, options);
    Ok(())
}
