//! Test fixtures - reusable project content.

/// HTML template with both injection regions
pub const INDEX_HTML: &str = "<!doctype html>
<html>
  <head>
    <!-- inject:css -->
    <!-- endinject -->
  </head>
  <body>
    <!-- inject:js -->
    <!-- endinject -->
  </body>
</html>
";

pub const APP_CSS: &str = "body { color: red; }\n";

/// Entry script: plain JS requiring a vendor module and a JSX view
pub const APP_JS: &str = "var React = require('react');
var View = require('./view');
React.render(React.createElement(View), document.body);
";

pub const VIEW_JSX: &str = "module.exports = function () {
  return <main className=\"app\">ok</main>;
};
";

pub const NORMALIZE_CSS: &str = "html { margin: 0; }\n";

pub const REACT_INDEX: &str = "module.exports = { render: function () {} };\n";

/// Project config exposing `react` from the vendor bundle
pub const CONFIG_TOML: &str = "[vendor]
modules = [\"react\"]
";
