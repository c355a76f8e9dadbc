//! Property tests for the app/vendor glob partition.

use std::path::Path;

use proptest::prelude::*;

use assetpipe::domain::entities::OutputFile;
use assetpipe::domain::value_objects::{
    AssetCategory, AssetGlob, AssetKind, GlobPartition, DEFAULT_APP_GLOB, DEFAULT_VENDOR_GLOB,
};

fn partition() -> GlobPartition {
    GlobPartition::new(
        AssetGlob::new(DEFAULT_APP_GLOB).unwrap(),
        AssetGlob::new(DEFAULT_VENDOR_GLOB).unwrap(),
        "normalize",
    )
    .unwrap()
}

fn kind() -> impl Strategy<Value = AssetKind> {
    prop_oneof![Just(AssetKind::Css), Just(AssetKind::Js)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every app output matches the app glob, never the vendor one.
    #[test]
    fn property_app_outputs_stay_in_app_family(
        content in proptest::collection::vec(any::<u8>(), 0..512),
        kind in kind(),
    ) {
        let output = OutputFile::fingerprinted(AssetCategory::App, kind, "app", content);
        let partition = partition();

        prop_assert!(partition.glob(AssetCategory::App).is_match(output.rel_path()));
        prop_assert!(!partition.glob(AssetCategory::Vendor).is_match(output.rel_path()));
    }

    /// PROPERTY: vendor outputs match the vendor glob, never the app one.
    #[test]
    fn property_vendor_outputs_stay_in_vendor_family(
        content in proptest::collection::vec(any::<u8>(), 0..512),
        normalize in any::<bool>(),
    ) {
        let output = if normalize {
            OutputFile::fingerprinted(AssetCategory::Vendor, AssetKind::Css, "normalize", content)
        } else {
            OutputFile::fingerprinted(AssetCategory::Vendor, AssetKind::Js, "vendor", content)
        };
        let partition = partition();

        prop_assert!(partition.glob(AssetCategory::Vendor).is_match(output.rel_path()));
        prop_assert!(!partition.glob(AssetCategory::App).is_match(output.rel_path()));
    }

    /// PROPERTY: no path belongs to both families.
    #[test]
    fn property_families_are_disjoint(
        dir in prop_oneof![Just("css"), Just("js"), Just("img")],
        name in "[a-z]{1,10}-[0-9a-f]{0,12}\\.(css|js|map)",
    ) {
        let path = format!("{dir}/{name}");
        let partition = partition();
        let app = partition.glob(AssetCategory::App).is_match(Path::new(&path));
        let vendor = partition.glob(AssetCategory::Vendor).is_match(Path::new(&path));

        prop_assert!(!(app && vendor), "{} matched both families", path);
    }
}
