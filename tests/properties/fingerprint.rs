//! Property tests for content fingerprints.

use proptest::prelude::*;

use assetpipe::domain::entities::OutputFile;
use assetpipe::domain::value_objects::{AssetCategory, AssetKind, ContentHash};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a fingerprint is ten lowercase hex characters.
    #[test]
    fn property_fingerprint_shape(content in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let hash = ContentHash::from_bytes(&content);
        let fp = hash.fingerprint();

        prop_assert_eq!(fp.len(), ContentHash::FINGERPRINT_LEN);
        prop_assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// PROPERTY: the same content always lands at the same path.
    #[test]
    fn property_name_is_deterministic(content in "(?s).{0,256}") {
        let a = OutputFile::fingerprinted(AssetCategory::App, AssetKind::Css, "app", content.clone());
        let b = OutputFile::fingerprinted(AssetCategory::App, AssetKind::Css, "app", content);

        prop_assert_eq!(a.rel_path(), b.rel_path());
    }

    /// PROPERTY: changed content produces a different name.
    #[test]
    fn property_name_follows_content(a in "(?s).{0,256}", b in "(?s).{0,256}") {
        prop_assume!(a != b);
        let first = OutputFile::fingerprinted(AssetCategory::App, AssetKind::Js, "app", a);
        let second = OutputFile::fingerprinted(AssetCategory::App, AssetKind::Js, "app", b);

        prop_assert_ne!(first.rel_path(), second.rel_path());
    }
}
