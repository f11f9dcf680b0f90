//! Suffix Matching Service
//!
//! Matches file stems against the flattened dotted paths: a path is assigned
//! to the first stem (longest first) that it ends with, case-insensitively.
//! One stem may collect several entities; every entity is assigned at most
//! one stem.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::entity::Entity;

/// Match flattened dotted paths against file stems
///
/// Candidate stems are ordered by descending length, then lexicographically,
/// so a more specific file name always beats one that is merely its suffix.
/// Paths matching no stem are excluded from the result.
pub fn match_files(
    entity_paths: &HashMap<String, Entity>,
    files: &HashMap<String, PathBuf>,
) -> HashMap<String, Vec<Entity>> {
    let mut stems: Vec<(&str, String)> = files
        .keys()
        .map(|stem| (stem.as_str(), stem.to_lowercase()))
        .collect();
    stems.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    // Sorted path order keeps the per-stem entity lists reproducible
    let mut sorted_paths: Vec<&String> = entity_paths.keys().collect();
    sorted_paths.sort();

    let mut matches: HashMap<String, Vec<Entity>> = HashMap::new();
    for path in sorted_paths {
        let path_lower = path.to_lowercase();
        if let Some((stem, _)) = stems.iter().find(|(_, lower)| path_lower.ends_with(lower)) {
            matches
                .entry((*stem).to_string())
                .or_default()
                .push(entity_paths[path].clone());
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn paths(entries: &[(&str, &str)]) -> HashMap<String, Entity> {
        entries
            .iter()
            .map(|(path, id)| ((*path).to_string(), Entity::new(id, path, "Shot")))
            .collect()
    }

    fn files(stems: &[&str]) -> HashMap<String, PathBuf> {
        stems
            .iter()
            .map(|stem| ((*stem).to_string(), PathBuf::from(format!("/x/{}.png", stem))))
            .collect()
    }

    #[test]
    fn test_scenario_a_three_distinct_matches() {
        let entity_paths = paths(&[
            ("Show1", "p-1"),
            ("0010", "sq-1"),
            ("0010.0010.010", "sh-1"),
            ("0010.0010.010.0010.010.generic", "t-1"),
        ]);
        let file_map = files(&["0010", "0010.010", "0010.010.generic"]);

        let matches = match_files(&entity_paths, &file_map);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches["0010"].len(), 1);
        assert_eq!(matches["0010"][0].id, "sq-1");
        assert_eq!(matches["0010.010"][0].id, "sh-1");
        assert_eq!(matches["0010.010.generic"][0].id, "t-1");
    }

    #[test]
    fn test_scenario_b_only_sequence_matches() {
        let entity_paths = paths(&[
            ("Show1", "p-1"),
            ("0010", "sq-1"),
            ("0010.0010.010", "sh-1"),
            ("0010.0010.010.0010.010.generic", "t-1"),
        ]);
        let file_map = files(&["0010"]);

        let matches = match_files(&entity_paths, &file_map);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches["0010"].len(), 1);
        assert_eq!(matches["0010"][0].id, "sq-1");
    }

    #[test]
    fn test_one_stem_collects_several_entities() {
        let entity_paths = paths(&[("A.010", "sh-a"), ("B.010", "sh-b")]);
        let file_map = files(&["010"]);

        let matches = match_files(&entity_paths, &file_map);

        assert_eq!(matches.len(), 1);
        let ids: Vec<&str> = matches["010"].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["sh-a", "sh-b"]);
    }

    #[test]
    fn test_longest_stem_wins_over_its_own_suffix() {
        let entity_paths = paths(&[("0010", "sq-1"), ("0010.010", "sh-1")]);
        let file_map = files(&["010", "0010.010"]);

        let matches = match_files(&entity_paths, &file_map);

        // The shot takes the specific stem; the shorter one only gets the
        // sequence, whichever order the stems were produced in.
        assert_eq!(matches["0010.010"].len(), 1);
        assert_eq!(matches["0010.010"][0].id, "sh-1");
        assert_eq!(matches["010"].len(), 1);
        assert_eq!(matches["010"][0].id, "sq-1");
    }

    #[rstest]
    #[case("SQ001.SH010", "sh010")]
    #[case("sq001.sh010", "SH010")]
    #[case("Sq001.Sh010", "sH010")]
    fn test_match_is_case_insensitive(#[case] path: &str, #[case] stem: &str) {
        let entity_paths = paths(&[(path, "sh-1")]);
        let file_map = files(&[stem]);

        let matches = match_files(&entity_paths, &file_map);

        assert_eq!(matches[stem].len(), 1);
    }

    #[test]
    fn test_every_match_preserves_the_suffix_property() {
        let entity_paths = paths(&[
            ("Show1", "p-1"),
            ("0010", "sq-1"),
            ("0010.0010.010", "sh-1"),
            ("A.010", "sh-a"),
            ("B.010", "sh-b"),
        ]);
        let file_map = files(&["0010", "010", "0010.010", "zzz"]);

        let matches = match_files(&entity_paths, &file_map);

        for (stem, entities) in &matches {
            for entity in entities {
                // The helper keys each entity by its own dotted path
                assert!(entity.name.to_lowercase().ends_with(&stem.to_lowercase()));
            }
        }
    }

    #[test]
    fn test_unmatched_paths_are_excluded() {
        let entity_paths = paths(&[("0010", "sq-1")]);
        let file_map = files(&["9999"]);

        let matches = match_files(&entity_paths, &file_map);
        assert!(matches.is_empty());
    }
}
