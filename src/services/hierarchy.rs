//! Hierarchy Flattening Service
//!
//! Flattens a project hierarchy into a map from dotted path to entity. The
//! project itself is keyed by its display name; a child's dotted path joins
//! the names of its ancestor chain below the project with its own name.
//! Task entities are leaves: nothing underneath a task is enumerated.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::Result;
use crate::host::session::HostSession;
use crate::models::entity::Entity;

/// Flatten a project hierarchy into dotted-path keys
///
/// Traversal is an explicit work list with a visited set keyed by entity id,
/// so malformed host data with repeated or cyclic child links terminates.
pub async fn flatten_hierarchy<S>(session: &S, project: &Entity) -> Result<HashMap<String, Entity>>
where
    S: HostSession + ?Sized,
{
    let mut paths = HashMap::new();
    paths.insert(project.display_name().to_string(), project.clone());

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(project.id.clone());

    // The ancestor chain of a direct project child is empty: the project
    // contributes only the synthetic root entry above.
    let mut worklist: VecDeque<(Entity, Vec<String>)> = session
        .children_of(&project.id)
        .await?
        .into_iter()
        .map(|child| (child, Vec::new()))
        .collect();

    while let Some((entity, ancestors)) = worklist.pop_front() {
        if !visited.insert(entity.id.clone()) {
            tracing::warn!(
                "Skipping already-visited entity '{}' ({}): child links repeat",
                entity.name,
                entity.id
            );
            continue;
        }

        let mut chain = ancestors;
        chain.push(entity.name.clone());
        let dotted_path = chain.join(".");

        if !entity.is_task() {
            for child in session.children_of(&entity.id).await? {
                worklist.push_back((child, chain.clone()));
            }
        }

        paths.insert(dotted_path, entity);
    }

    Ok(paths)
}
