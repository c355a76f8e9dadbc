//! CommonJS bundler
//!
//! Walks `require("...")` calls from a set of entry modules and emits one
//! self-contained script. Every module is wrapped in
//! `function (require, module, exports) { ... }` and registered under an id:
//! exposed entries use their public name, everything else a number assigned in
//! discovery order, so the same sources always produce the same bytes.
//!
//! The emitted prelude assigns the global `require`. A bundle that cannot
//! find a module delegates to the `require` defined by a previously loaded
//! bundle, which is how the app bundle reaches vendor modules by name.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::ports::FileSystem;
use crate::error::PipeResult;

use super::jsx::JsxTransform;
use super::lexer::code_text;
use super::resolver::{is_bare, ModuleResolver};

static REQUIRE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*(?:"([^"]+)"|'([^']+)')\s*\)"#)
        .expect("require pattern should always compile")
});

const PRELUDE: &str = r#"require = (function (modules, cache, entries) {
  var previousRequire = typeof require === "function" && require;
  function newRequire(name) {
    if (!cache[name]) {
      if (!modules[name]) {
        if (previousRequire) return previousRequire(name);
        var err = new Error("Cannot find module '" + name + "'");
        err.code = "MODULE_NOT_FOUND";
        throw err;
      }
      var module = cache[name] = { exports: {} };
      modules[name][0].call(module.exports, function (x) {
        var id = modules[name][1][x];
        return newRequire(id ? id : x);
      }, module, module.exports);
    }
    return cache[name].exports;
  }
  for (var i = 0; i < entries.length; i++) newRequire(entries[i]);
  return newRequire;
})"#;

/// A module the bundle starts from
#[derive(Debug, Clone)]
pub struct BundleEntry {
    pub path: PathBuf,
    /// Public id; `None` gets a numeric id
    pub expose: Option<String>,
    /// Execute the module when the bundle loads
    pub run: bool,
    /// Include verbatim without scanning for dependencies
    pub no_parse: bool,
}

impl BundleEntry {
    /// Entry module executed on load (the app entry point)
    pub fn main(path: PathBuf) -> Self {
        Self {
            path,
            expose: None,
            run: true,
            no_parse: false,
        }
    }

    /// Module registered under a public name for other bundles
    pub fn exposed(path: PathBuf, name: &str, no_parse: bool) -> Self {
        Self {
            path,
            expose: Some(name.to_string()),
            run: false,
            no_parse,
        }
    }
}

/// One wrapped module
#[derive(Debug, Clone, PartialEq)]
pub struct BundledModule {
    pub id: String,
    pub path: PathBuf,
    pub source: String,
    /// Specifier to module id, for specifiers bundled here
    pub deps: BTreeMap<String, String>,
}

/// Bundling result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    pub modules: Vec<BundledModule>,
    pub entries: Vec<String>,
    /// Bare specifiers left for another bundle to provide
    pub externals: Vec<String>,
}

impl Bundle {
    pub fn module(&self, id: &str) -> Option<&BundledModule> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Render the bundle as a single script.
    pub fn render(&self) -> String {
        let mut out = String::from(PRELUDE);
        out.push_str("({\n");
        for (i, module) in self.modules.iter().enumerate() {
            let deps = serde_json::to_string(&module.deps).unwrap_or_else(|_| "{}".to_string());
            out.push_str(&json_string(&module.id));
            out.push_str(": [function (require, module, exports) {\n");
            out.push_str(&module.source);
            if !module.source.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("}, ");
            out.push_str(&deps);
            out.push(']');
            if i + 1 < self.modules.len() {
                out.push(',');
            }
            out.push('\n');
        }
        let entries = serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string());
        out.push_str("}, {}, ");
        out.push_str(&entries);
        out.push_str(");\n");
        out
    }
}

/// Bundling options
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Bundle bare specifiers instead of leaving them external
    pub bundle_external: bool,
    /// Extensions whose modules go through the JSX transform
    pub transform_extensions: Vec<String>,
}

/// Builds a [`Bundle`] from entry modules.
pub struct Bundler<'a> {
    fs: &'a dyn FileSystem,
    resolver: ModuleResolver<'a>,
    jsx: &'a JsxTransform,
    options: BundleOptions,
}

struct Pending {
    id: String,
    path: PathBuf,
    no_parse: bool,
}

impl<'a> Bundler<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        resolver: ModuleResolver<'a>,
        jsx: &'a JsxTransform,
        options: BundleOptions,
    ) -> Self {
        Self {
            fs,
            resolver,
            jsx,
            options,
        }
    }

    pub fn bundle(&self, entries: &[BundleEntry]) -> PipeResult<Bundle> {
        let mut bundle = Bundle::default();
        let mut ids: HashMap<PathBuf, String> = HashMap::new();
        let mut queue: VecDeque<Pending> = VecDeque::new();
        let mut next_id = 1usize;

        for entry in entries {
            if ids.contains_key(&entry.path) {
                continue;
            }
            let id = match &entry.expose {
                Some(name) => name.clone(),
                None => {
                    let id = next_id.to_string();
                    next_id += 1;
                    id
                }
            };
            ids.insert(entry.path.clone(), id.clone());
            if entry.run {
                bundle.entries.push(id.clone());
            }
            queue.push_back(Pending {
                id,
                path: entry.path.clone(),
                no_parse: entry.no_parse,
            });
        }

        while let Some(pending) = queue.pop_front() {
            let raw = self.fs.read_to_string(&pending.path)?;
            let source = if self.needs_transform(&pending.path) {
                self.jsx.transform(&raw, &pending.path)?
            } else {
                raw
            };

            let mut deps = BTreeMap::new();
            if !pending.no_parse {
                for specifier in required_specifiers(&source) {
                    if is_bare(&specifier) && !self.options.bundle_external {
                        if !bundle.externals.contains(&specifier) {
                            bundle.externals.push(specifier);
                        }
                        continue;
                    }
                    let path = self.resolver.resolve(&specifier, &pending.path)?;
                    let id = match ids.get(&path) {
                        Some(id) => id.clone(),
                        None => {
                            let id = next_id.to_string();
                            next_id += 1;
                            ids.insert(path.clone(), id.clone());
                            queue.push_back(Pending {
                                id: id.clone(),
                                path,
                                no_parse: false,
                            });
                            id
                        }
                    };
                    deps.insert(specifier, id);
                }
            }

            debug!(id = %pending.id, path = %pending.path.display(), deps = deps.len(), "bundled module");
            bundle.modules.push(BundledModule {
                id: pending.id,
                path: pending.path,
                source,
                deps,
            });
        }

        Ok(bundle)
    }

    fn needs_transform(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        self.options
            .transform_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }
}

/// String-literal `require` specifiers in source order, deduplicated.
///
/// Comments and regex literals are blanked first, so commented-out requires
/// are ignored and a `/*` inside a regex does not hide the code after it.
pub fn required_specifiers(source: &str) -> Vec<String> {
    let code = code_text(source);
    let mut found: Vec<String> = Vec::new();
    for caps in REQUIRE_CALL.captures_iter(&code) {
        if let Some(spec) = caps.get(1).or_else(|| caps.get(2)) {
            let spec = spec.as_str().to_string();
            if !found.contains(&spec) {
                found.push(spec);
            }
        }
    }
    found
}

fn json_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
