//! Internal-consistency sweep over the embedded campaign catalog. Every
//! canonical answer must reference things the challenge actually declares,
//! otherwise a challenge could be unsolvable at runtime.

use std::collections::HashSet;

use opsquest_game::{Catalog, ChallengeData, LEVEL_COUNT};

fn catalog() -> Catalog {
    Catalog::builtin().expect("embedded catalog parses")
}

#[test]
fn campaign_has_five_sequential_levels() {
    let catalog = catalog();
    assert_eq!(catalog.levels.len() as u32, LEVEL_COUNT);
    for (idx, level) in catalog.levels.iter().enumerate() {
        assert_eq!(level.id, idx as u32 + 1, "levels must be ordered 1..=5");
        assert!(!level.title.is_empty());
        assert!(!level.challenges.is_empty(), "level {} has no challenges", level.id);
    }
}

#[test]
fn prerequisites_reference_earlier_levels() {
    for level in &catalog().levels {
        for prereq in &level.prerequisites {
            assert!(
                *prereq >= 1 && *prereq < level.id,
                "level {} lists invalid prerequisite {prereq}",
                level.id
            );
        }
    }
    // Level 1 is the entry point and must not be gated.
    assert!(catalog().levels[0].prerequisites.is_empty());
}

#[test]
fn challenge_ids_are_globally_unique() {
    let catalog = catalog();
    let mut seen = HashSet::new();
    for level in &catalog.levels {
        for challenge in &level.challenges {
            assert!(
                seen.insert(challenge.id.clone()),
                "duplicate challenge id {}",
                challenge.id
            );
            assert!(challenge.points > 0, "{} awards no points", challenge.id);
        }
    }
}

#[test]
fn badge_ids_are_unique() {
    let mut seen = HashSet::new();
    for level in &catalog().levels {
        if let Some(badge) = &level.badge {
            assert!(seen.insert(badge.id.clone()), "duplicate badge id {}", badge.id);
        }
    }
}

#[test]
fn quiz_answers_are_in_range() {
    for level in &catalog().levels {
        for challenge in &level.challenges {
            if let ChallengeData::Quiz(quiz) = &challenge.data {
                assert!(
                    quiz.correct_answer < quiz.options.len(),
                    "{}: answer index {} out of range",
                    challenge.id,
                    quiz.correct_answer
                );
                assert!(quiz.options.len() >= 2, "{}: not a real choice", challenge.id);
            }
        }
    }
}

#[test]
fn drag_drop_mappings_reference_declared_items_and_zones() {
    for level in &catalog().levels {
        for challenge in &level.challenges {
            let ChallengeData::DragDrop(data) = &challenge.data else {
                continue;
            };
            let item_ids: HashSet<_> = data.items.iter().map(|i| i.id.as_str()).collect();
            let zone_ids: HashSet<_> = data.drop_zones.iter().map(|z| z.id.as_str()).collect();
            for (item, zone) in &data.correct_mappings {
                assert!(item_ids.contains(item.as_str()), "{}: unknown item {item}", challenge.id);
                assert!(zone_ids.contains(zone.as_str()), "{}: unknown zone {zone}", challenge.id);
            }
            // Every item must have a home, or the placement gate can never open.
            for item in &data.items {
                assert!(
                    data.correct_mappings.contains_key(&item.id),
                    "{}: item {} has no canonical zone",
                    challenge.id,
                    item.id
                );
            }
        }
    }
}

#[test]
fn terminal_output_keys_match_expected_commands() {
    for level in &catalog().levels {
        for challenge in &level.challenges {
            let ChallengeData::Terminal(data) = &challenge.data else {
                continue;
            };
            assert!(!data.expected_commands.is_empty(), "{}: empty sequence", challenge.id);
            for command in data.simulated_output.keys() {
                assert!(
                    data.expected_commands.contains(command),
                    "{}: output for unexpected command {command}",
                    challenge.id
                );
            }
        }
    }
}

#[test]
fn role_assignments_reference_declared_characters_and_permissions() {
    for level in &catalog().levels {
        for challenge in &level.challenges {
            let ChallengeData::RoleAssignment(data) = &challenge.data else {
                continue;
            };
            let character_ids: HashSet<_> = data.characters.iter().map(|c| c.id.as_str()).collect();
            let permission_ids: HashSet<_> =
                data.permissions.iter().map(|p| p.id.as_str()).collect();
            for (character, perms) in &data.correct_assignments {
                assert!(
                    character_ids.contains(character.as_str()),
                    "{}: unknown character {character}",
                    challenge.id
                );
                for perm in perms {
                    assert!(
                        permission_ids.contains(perm.as_str()),
                        "{}: unknown permission {perm}",
                        challenge.id
                    );
                }
            }
        }
    }
}
