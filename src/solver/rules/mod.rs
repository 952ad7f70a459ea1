//! The rule library: one module per deduction rule, registered here in the
//! order the driver's initial cost sort will reorder anyway.

mod enclose_full_garden;
mod ensure_garden_can_expand_one_route;
mod ensure_garden_with_clue_can_expand;
mod ensure_garden_without_clue_can_expand;
mod ensure_no_two_by_two_walls;
mod fill_correctly_sized_weak_garden;
mod naively_unreachable_from_clue;
mod naively_unreachable_from_garden;
mod no_isolated_wall_sections;
mod no_isolated_wall_sections_naive;
mod separate_clues;
mod separate_gardens_with_clues;
mod unreachable_from_garden;

use super::SolverRule;

pub fn all_rules() -> Vec<Box<dyn SolverRule>> {
    vec![
        Box::new(separate_clues::SeparateClues),
        Box::new(ensure_garden_can_expand_one_route::EnsureGardenCanExpandOneRoute),
        Box::new(ensure_no_two_by_two_walls::EnsureNoTwoByTwoWalls),
        Box::new(naively_unreachable_from_clue::NaivelyUnreachableFromClueCell),
        Box::new(no_isolated_wall_sections_naive::NoIsolatedWallSectionsNaive),
        Box::new(fill_correctly_sized_weak_garden::FillCorrectlySizedWeakGarden),
        Box::new(enclose_full_garden::EncloseFullGarden),
        Box::new(ensure_garden_without_clue_can_expand::EnsureGardenWithoutClueCanExpand),
        Box::new(ensure_garden_with_clue_can_expand::EnsureGardenWithClueCanExpand),
        Box::new(separate_gardens_with_clues::SeparateGardensWithClues),
        Box::new(naively_unreachable_from_garden::NaivelyUnreachableFromGarden),
        Box::new(unreachable_from_garden::UnreachableFromGarden),
        Box::new(no_isolated_wall_sections::NoIsolatedWallSections),
    ]
}
