//! Task dependency management
//!
//! This module builds the task dependency graph, detects cycles and resolves the
//! order in which a set of targets and their dependencies run.

use std::collections::{HashMap, HashSet};

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::tasks::TaskRegistry;
use crate::types::{CovtaskError, CovtaskResult};

/// Build a graph with an edge from each task to every task it depends on
pub fn build_task_graph(registry: &TaskRegistry) -> CovtaskResult<DiGraph<String, ()>> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    for task in registry.iter() {
        let node_index = graph.add_node(task.name.clone());
        node_indices.insert(task.name.clone(), node_index);
    }

    for task in registry.iter() {
        let from_node = node_indices[&task.name];
        for dep in &task.dependencies {
            match node_indices.get(dep) {
                Some(&to_node) => {
                    graph.add_edge(from_node, to_node, ());
                }
                None => {
                    return Err(CovtaskError::Task(format!(
                        "Dependency '{}' not found for task '{}'",
                        dep, task.name
                    )));
                }
            }
        }
    }

    Ok(graph)
}

/// Strongly connected components that form cycles, each sorted by name
pub fn find_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();
    cycles
}

/// Order in which `targets` run: dependencies depth-first in declaration
/// order, each task at most once.
pub fn resolve_execution_order(
    registry: &TaskRegistry,
    targets: &[String],
) -> CovtaskResult<Vec<String>> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut visiting = Vec::new();

    for target in targets {
        if !registry.contains(target) {
            return Err(CovtaskError::Task(format!("Task '{}' not found", target)));
        }
        visit(registry, target, &mut visited, &mut visiting, &mut order)?;
    }

    Ok(order)
}

fn visit(
    registry: &TaskRegistry,
    name: &str,
    visited: &mut HashSet<String>,
    visiting: &mut Vec<String>,
    order: &mut Vec<String>,
) -> CovtaskResult<()> {
    if visited.contains(name) {
        return Ok(());
    }

    if let Some(start) = visiting.iter().position(|n| n == name) {
        let mut path = visiting[start..].to_vec();
        path.push(name.to_string());
        return Err(CovtaskError::Cycle(path.join(" -> ")));
    }

    let task = registry
        .get(name)
        .ok_or_else(|| CovtaskError::Task(format!("Task '{}' not found", name)))?;

    visiting.push(name.to_string());
    for dep in &task.dependencies {
        if !registry.contains(dep) {
            return Err(CovtaskError::Task(format!(
                "Dependency '{}' not found for task '{}'",
                dep, name
            )));
        }
        visit(registry, dep, visited, visiting, order)?;
    }
    visiting.pop();

    visited.insert(name.to_string());
    order.push(name.to_string());
    Ok(())
}
