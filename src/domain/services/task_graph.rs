//! Task graph definition
//!
//! Pure description of which tasks exist and what must finish before each
//! one starts. Execution lives in the application layer.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::value_objects::TaskName;
use crate::error::{PipeError, PipeResult};

/// One node of the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: TaskName,
    pub prerequisites: Vec<TaskName>,
    pub description: &'static str,
}

impl TaskSpec {
    pub fn new(name: TaskName, prerequisites: &[TaskName], description: &'static str) -> Self {
        Self {
            name,
            prerequisites: prerequisites.to_vec(),
            description,
        }
    }
}

/// Directed acyclic graph of named tasks
#[derive(Debug, Clone)]
pub struct TaskGraph {
    specs: BTreeMap<TaskName, TaskSpec>,
}

impl TaskGraph {
    /// Build a graph, rejecting undefined prerequisites and cycles.
    pub fn new(specs: Vec<TaskSpec>) -> PipeResult<Self> {
        let specs: BTreeMap<TaskName, TaskSpec> =
            specs.into_iter().map(|spec| (spec.name, spec)).collect();

        for spec in specs.values() {
            if let Some(missing) = spec
                .prerequisites
                .iter()
                .find(|p| !specs.contains_key(p))
            {
                return Err(PipeError::UndefinedTask { task: *missing });
            }
        }

        let graph = Self { specs };
        for name in graph.specs.keys() {
            graph.check_acyclic(*name, &mut Vec::new(), &mut BTreeSet::new())?;
        }
        Ok(graph)
    }

    /// The pipeline's task graph.
    pub fn standard() -> Self {
        use TaskName::*;
        let specs = vec![
            TaskSpec::new(CleanApp, &[], "Delete app-family outputs"),
            TaskSpec::new(CleanVendor, &[], "Delete vendor-family outputs"),
            TaskSpec::new(Css, &[CleanApp], "Fingerprint the app stylesheet"),
            TaskSpec::new(Js, &[CleanApp], "Bundle application scripts"),
            TaskSpec::new(
                Vendor,
                &[CleanVendor],
                "Bundle vendor scripts and the normalize stylesheet",
            ),
            TaskSpec::new(Build, &[Css, Js, Vendor], "Full build, then inject HTML"),
            TaskSpec::new(BuildApp, &[Css, Js], "App-only build, then inject HTML"),
            TaskSpec::new(Watch, &[Build], "Build, then rebuild the app on change"),
        ];
        Self {
            specs: specs.into_iter().map(|spec| (spec.name, spec)).collect(),
        }
    }

    pub fn spec(&self, task: TaskName) -> Option<&TaskSpec> {
        self.specs.get(&task)
    }

    pub fn specs(&self) -> impl Iterator<Item = &TaskSpec> {
        self.specs.values()
    }

    pub fn prerequisites(&self, task: TaskName) -> &[TaskName] {
        self.specs
            .get(&task)
            .map(|spec| spec.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// `target` and everything it transitively depends on, prerequisites first.
    pub fn closure(&self, target: TaskName) -> PipeResult<Vec<TaskName>> {
        if !self.specs.contains_key(&target) {
            return Err(PipeError::UndefinedTask { task: target });
        }
        let mut order = Vec::new();
        let mut seen = BTreeSet::new();
        self.visit(target, &mut seen, &mut order);
        Ok(order)
    }

    fn visit(&self, task: TaskName, seen: &mut BTreeSet<TaskName>, order: &mut Vec<TaskName>) {
        if !seen.insert(task) {
            return;
        }
        for prerequisite in self.prerequisites(task) {
            self.visit(*prerequisite, seen, order);
        }
        order.push(task);
    }

    fn check_acyclic(
        &self,
        task: TaskName,
        stack: &mut Vec<TaskName>,
        done: &mut BTreeSet<TaskName>,
    ) -> PipeResult<()> {
        if done.contains(&task) {
            return Ok(());
        }
        if stack.contains(&task) {
            return Err(PipeError::DependencyCycle { task });
        }
        stack.push(task);
        for prerequisite in self.prerequisites(task) {
            self.check_acyclic(*prerequisite, stack, done)?;
        }
        stack.pop();
        done.insert(task);
        Ok(())
    }
}
