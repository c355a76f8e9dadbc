//! Scenario: Vendor Upgrade
//!
//! Journey: a dependency is upgraded in node_modules and the developer
//! rebuilds everything.
//!
//! Success Criteria:
//! - The vendor bundle gets a new name
//! - App outputs keep their names

use crate::common::*;

fn named(env: &TestEnv, prefix: &str) -> String {
    env.outputs()
        .into_iter()
        .find(|n| n.starts_with(prefix))
        .unwrap_or_else(|| panic!("no {prefix}* output"))
}

/// SCENARIO: react changes, the app does not
#[test]
fn scenario_vendor_upgrade_renames_only_vendor_bundle() {
    let env = TestEnv::standard();
    assert!(env.run(&["build"]).success);
    let vendor = named(&env, "js/vendor-");
    let app = named(&env, "js/app-");
    let normalize = named(&env, "css/normalize-");

    env.write(
        "node_modules/react/index.js",
        "module.exports = { render: function () {}, version: '2' };\n",
    );
    let result = env.run(&["build"]);
    assert!(result.success, "build failed: {}", result.stderr);

    assert_ne!(named(&env, "js/vendor-"), vendor);
    assert_eq!(named(&env, "js/app-"), app);
    assert_eq!(named(&env, "css/normalize-"), normalize);
    assert_eq!(env.outputs().len(), 4);
}
