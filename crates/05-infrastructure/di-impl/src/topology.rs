//! 依赖图拓扑排序
//!
//! 使用 Kahn 算法。队列按接口键的字典序初始化，出队顺序因此是确定的。

use infrastructure_common::{ContainerError, ContainerResult, TypeInfo};
use std::collections::{BTreeMap, VecDeque};

/// 依赖图：节点 -> 它依赖的节点
pub type DependencyGraph = BTreeMap<TypeInfo, Vec<TypeInfo>>;

/// 拓扑排序，被依赖的节点排在前面
///
/// 存在环时返回 `CircularDependency`，残余集合为入度仍大于零的节点。
/// 所有依赖都必须是图中的节点。
pub fn topological_sort(graph: &DependencyGraph) -> ContainerResult<Vec<TypeInfo>> {
    let mut in_degree: BTreeMap<TypeInfo, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<TypeInfo, Vec<TypeInfo>> = BTreeMap::new();

    for (node, deps) in graph {
        in_degree.insert(*node, deps.len());
        for dep in deps {
            dependents.entry(*dep).or_default().push(*node);
        }
    }

    let mut queue: VecDeque<TypeInfo> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(node, _)| *node)
        .collect();
    let mut sorted = Vec::with_capacity(graph.len());

    while let Some(node) = queue.pop_front() {
        sorted.push(node);
        for dependent in dependents.get(&node).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*dependent);
                }
            }
        }
    }

    if sorted.len() != graph.len() {
        let residual = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(node, _)| node.to_string())
            .collect();
        return Err(ContainerError::CircularDependency { residual });
    }

    Ok(sorted)
}
