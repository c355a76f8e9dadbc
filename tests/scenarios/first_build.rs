//! Scenario: First Build
//!
//! Journey: a developer checks out the project and runs a full build.
//!
//! Success Criteria:
//! - Four fingerprinted outputs and an injected index.html
//! - The page loads vendor code before app code
//! - Nothing is written outside the build root

use crate::common::*;
use crate::{assert_built, assert_output_contains};

/// SCENARIO: fresh checkout, one command
#[test]
fn scenario_first_build_from_fresh_checkout() {
    let env = TestEnv::standard();

    let result = env.run(&["build"]);
    assert!(result.success, "build failed: {}", result.stderr);
    assert_output_contains!(result, "Finished 'build'");

    assert_built!(env, "index.html");
    let outputs = env.outputs();
    let prefixes = ["css/app-", "css/normalize-", "js/app-", "js/vendor-"];
    for prefix in prefixes {
        assert!(
            outputs.iter().any(|o| o.starts_with(prefix)),
            "missing {prefix}* in {outputs:?}"
        );
    }

    let html = env.read("webroot/index.html");
    let vendor = html.find("js/vendor-").unwrap();
    let app = html.find("js/app-").unwrap();
    assert!(vendor < app, "vendor must load first:\n{html}");

    let template = env.read("ui-src/index.html");
    assert!(!template.contains("js/app-"), "template must not be modified");
}
