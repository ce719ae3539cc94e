//! Focus blueprints: the main lift and accessory slots for each workout day.

use crate::{MovementPattern, MuscleGroup, SetScheme, WorkoutType};

/// Scheme for the main lift: heavier, lower reps
pub const MAIN_SCHEME: SetScheme = SetScheme {
    sets: 4,
    rep_min: 4,
    rep_max: 6,
};

/// Scheme for accessory slots
pub const ACCESSORY_SCHEME: SetScheme = SetScheme {
    sets: 3,
    rep_min: 8,
    rep_max: 12,
};

/// Scheme for exercises added to reach the requested count
pub const TOP_UP_SCHEME: SetScheme = SetScheme {
    sets: 3,
    rep_min: 10,
    rep_max: 15,
};

/// One slot of a blueprint
///
/// `MovementPattern::None` means the slot is matched on muscles alone.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub pattern: MovementPattern,
    pub muscles: &'static [MuscleGroup],
    pub scheme: SetScheme,
}

impl Slot {
    const fn main(pattern: MovementPattern, muscles: &'static [MuscleGroup]) -> Self {
        Slot {
            pattern,
            muscles,
            scheme: MAIN_SCHEME,
        }
    }

    const fn accessory(pattern: MovementPattern, muscles: &'static [MuscleGroup]) -> Self {
        Slot {
            pattern,
            muscles,
            scheme: ACCESSORY_SCHEME,
        }
    }
}

/// Main slot plus ordered accessories
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    pub main: Slot,
    pub accessories: Vec<Slot>,
}

impl Blueprint {
    /// Main slot first, then accessories in order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        std::iter::once(&self.main).chain(self.accessories.iter())
    }
}

/// Blueprint for a focus
pub fn blueprint_for(focus: WorkoutType) -> Blueprint {
    use MovementPattern as P;
    use MuscleGroup::*;

    match focus {
        WorkoutType::Push => Blueprint {
            main: Slot::main(P::HorizontalPush, &[Chest, Triceps]),
            accessories: vec![
                Slot::accessory(P::VerticalPush, &[Shoulders]),
                Slot::accessory(P::None, &[Triceps]),
                Slot::accessory(P::None, &[Shoulders, Chest]),
            ],
        },
        WorkoutType::Pull => Blueprint {
            main: Slot::main(P::HorizontalPull, &[Back, Lats]),
            accessories: vec![
                Slot::accessory(P::VerticalPull, &[Lats]),
                Slot::accessory(P::None, &[Biceps]),
                Slot::accessory(P::None, &[RearDelts, Traps]),
            ],
        },
        WorkoutType::LegsCore => Blueprint {
            main: Slot::main(P::Squat, &[Quads, Glutes]),
            accessories: vec![
                Slot::accessory(P::Hinge, &[Hamstrings, Glutes]),
                Slot::accessory(P::Lunge, &[Quads, Glutes]),
                Slot::accessory(P::Core, &[Abs, Obliques]),
            ],
        },
        WorkoutType::Full => Blueprint {
            main: Slot::main(P::Hinge, &[Hamstrings, Glutes]),
            accessories: vec![
                Slot::accessory(P::HorizontalPush, &[Chest]),
                Slot::accessory(P::HorizontalPull, &[Back]),
                Slot::accessory(P::Squat, &[Quads]),
                Slot::accessory(P::Core, &[Abs]),
            ],
        },
    }
}
