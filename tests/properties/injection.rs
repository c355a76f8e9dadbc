//! Property tests for HTML injection.

use proptest::prelude::*;

use assetpipe::domain::services::inject;

const TEMPLATE: &str = "<head>\n  <!-- inject:css -->\n  <!-- endinject -->\n</head>\n<body>\n  <!-- inject:js -->\n  <!-- endinject -->\n</body>\n";

fn hrefs() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("(css|js)/[a-z]{1,8}-[0-9a-f]{10}\\.(css|js)", 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: injection never panics on arbitrary templates.
    #[test]
    fn property_inject_never_panics(template in "(?s).{0,512}", hrefs in hrefs()) {
        let _ = inject(&template, &hrefs);
    }

    /// PROPERTY: injecting the same assets twice is a no-op the second time.
    #[test]
    fn property_reinjection_is_idempotent(hrefs in hrefs()) {
        let once = inject(TEMPLATE, &hrefs).html;
        let twice = inject(&once, &hrefs).html;

        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: every asset is referenced exactly once.
    #[test]
    fn property_each_asset_referenced(hrefs in hrefs()) {
        let html = inject(TEMPLATE, &hrefs).html;

        for href in &hrefs {
            let quoted = format!("\"{href}\"");
            prop_assert_eq!(html.matches(quoted.as_str()).count(), hrefs.iter().filter(|h| *h == href).count());
        }
    }
}
