//! Default exercise catalog.
//!
//! This module provides the built-in exercise library that is seeded on first
//! run and read-only afterwards, plus the filtered listing the selector uses.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// Filter for `Catalog::list_exercises`
///
/// Every populated field narrows the result. `muscles` matches on primary
/// muscles; an empty `equipment` list means any equipment.
#[derive(Clone, Debug, Default)]
pub struct ExerciseFilter {
    pub pattern: Option<MovementPattern>,
    pub muscles: Vec<MuscleGroup>,
    pub equipment: Vec<Equipment>,
    pub modality: Option<Modality>,
}

impl ExerciseFilter {
    fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(pattern) = self.pattern {
            if exercise.pattern != pattern {
                return false;
            }
        }
        if !self.muscles.is_empty()
            && !exercise.primary_muscles().any(|m| self.muscles.contains(&m))
        {
            return false;
        }
        if !self.equipment.is_empty() && !self.equipment.contains(&exercise.equipment) {
            return false;
        }
        if let Some(modality) = self.modality {
            if exercise.modality != modality {
                return false;
            }
        }
        true
    }
}

impl Catalog {
    /// Build a catalog from a list of exercises (later duplicates win)
    pub fn from_exercises(exercises: impl IntoIterator<Item = Exercise>) -> Self {
        Catalog {
            exercises: exercises.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    pub fn get(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.get(&id)
    }

    /// List exercises matching `filter`, in ascending id order
    pub fn list_exercises(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        self.exercises.values().filter(|e| filter.matches(e)).collect()
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, exercise) in &self.exercises {
            if id != &exercise.id {
                errors.push(format!(
                    "Exercise key '{}' doesn't match exercise.id '{}'",
                    id, exercise.id
                ));
            }
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty name", id));
            }
            if exercise.muscles.is_empty() {
                errors.push(format!("Exercise '{}' has no muscle tags", id));
            }
            if exercise.modality == Modality::Strength
                && exercise.primary_muscles().next().is_none()
            {
                errors.push(format!(
                    "Strength exercise '{}' has no primary muscle",
                    id
                ));
            }
        }

        let mut names: BTreeMap<&str, ExerciseId> = BTreeMap::new();
        for exercise in self.exercises.values() {
            if let Some(other) = names.insert(exercise.name.as_str(), exercise.id) {
                errors.push(format!(
                    "Exercises '{}' and '{}' share the name '{}'",
                    other, exercise.id, exercise.name
                ));
            }
        }

        errors
    }
}

fn tags(primary: &[MuscleGroup], secondary: &[MuscleGroup]) -> Vec<MuscleTag> {
    primary
        .iter()
        .map(|&muscle| MuscleTag {
            muscle,
            role: MuscleRole::Primary,
        })
        .chain(secondary.iter().map(|&muscle| MuscleTag {
            muscle,
            role: MuscleRole::Secondary,
        }))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn strength(
    id: u32,
    name: &str,
    workout_type: WorkoutType,
    equipment: Equipment,
    pattern: MovementPattern,
    primary: &[MuscleGroup],
    secondary: &[MuscleGroup],
) -> Exercise {
    Exercise {
        id: ExerciseId(id),
        name: name.into(),
        workout_type,
        equipment,
        pattern,
        modality: Modality::Strength,
        muscles: tags(primary, secondary),
    }
}

fn metcon(id: u32, name: &str, equipment: Equipment, primary: &[MuscleGroup]) -> Exercise {
    Exercise {
        id: ExerciseId(id),
        name: name.into(),
        workout_type: WorkoutType::Full,
        equipment,
        pattern: MovementPattern::None,
        modality: Modality::Metcon,
        muscles: tags(primary, &[]),
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    use Equipment::*;
    use MovementPattern as P;
    use MuscleGroup::*;
    use WorkoutType::*;

    let exercises = vec![
        // Push
        strength(1, "Barbell Bench Press", Push, Barbell, P::HorizontalPush, &[Chest], &[Triceps, Shoulders]),
        strength(2, "Dumbbell Bench Press", Push, Dumbbell, P::HorizontalPush, &[Chest], &[Triceps, Shoulders]),
        strength(3, "Incline Dumbbell Press", Push, Dumbbell, P::HorizontalPush, &[Chest, Shoulders], &[Triceps]),
        strength(4, "Push-up", Push, Bodyweight, P::HorizontalPush, &[Chest], &[Triceps, Abs]),
        strength(5, "Machine Chest Press", Push, Machine, P::HorizontalPush, &[Chest], &[Triceps]),
        strength(6, "Overhead Press", Push, Barbell, P::VerticalPush, &[Shoulders], &[Triceps, Abs]),
        strength(7, "Seated Dumbbell Shoulder Press", Push, Dumbbell, P::VerticalPush, &[Shoulders], &[Triceps]),
        strength(8, "Kettlebell Press", Push, Kettlebell, P::VerticalPush, &[Shoulders], &[Triceps, Abs]),
        strength(9, "Pike Push-up", Push, Bodyweight, P::VerticalPush, &[Shoulders], &[Triceps]),
        strength(10, "Dumbbell Lateral Raise", Push, Dumbbell, P::None, &[Shoulders], &[]),
        strength(11, "Cable Triceps Pushdown", Push, Cable, P::None, &[Triceps], &[]),
        strength(12, "Dumbbell Skull Crusher", Push, Dumbbell, P::None, &[Triceps], &[]),
        strength(13, "Bench Dip", Push, Bodyweight, P::None, &[Triceps], &[Chest, Shoulders]),
        strength(14, "Cable Fly", Push, Cable, P::None, &[Chest], &[Shoulders]),
        // Pull
        strength(20, "Barbell Row", Pull, Barbell, P::HorizontalPull, &[Back, Lats], &[Biceps, RearDelts]),
        strength(21, "One-Arm Dumbbell Row", Pull, Dumbbell, P::HorizontalPull, &[Back, Lats], &[Biceps]),
        strength(22, "Seated Cable Row", Pull, Cable, P::HorizontalPull, &[Back], &[Lats, Biceps]),
        strength(23, "Inverted Row", Pull, Bodyweight, P::HorizontalPull, &[Back], &[Biceps, RearDelts]),
        strength(24, "Kettlebell Row", Pull, Kettlebell, P::HorizontalPull, &[Back, Lats], &[Biceps]),
        strength(25, "Pull-up", Pull, PullupBar, P::VerticalPull, &[Lats], &[Biceps, Back]),
        strength(26, "Chin-up", Pull, PullupBar, P::VerticalPull, &[Lats, Biceps], &[Back]),
        strength(27, "Lat Pulldown", Pull, Cable, P::VerticalPull, &[Lats], &[Biceps]),
        strength(28, "Band-Assisted Pull-up", Pull, Band, P::VerticalPull, &[Lats], &[Biceps]),
        strength(29, "Barbell Curl", Pull, Barbell, P::None, &[Biceps], &[Forearms]),
        strength(30, "Dumbbell Hammer Curl", Pull, Dumbbell, P::None, &[Biceps, Forearms], &[]),
        strength(31, "Face Pull", Pull, Cable, P::None, &[RearDelts], &[Traps]),
        strength(32, "Band Pull-Apart", Pull, Band, P::None, &[RearDelts], &[Traps]),
        strength(33, "Dumbbell Shrug", Pull, Dumbbell, P::None, &[Traps], &[Forearms]),
        // Legs & core
        strength(40, "Back Squat", LegsCore, Barbell, P::Squat, &[Quads, Glutes], &[LowerBack, Abs]),
        strength(41, "Front Squat", LegsCore, Barbell, P::Squat, &[Quads], &[Glutes, Abs]),
        strength(42, "Goblet Squat", LegsCore, Kettlebell, P::Squat, &[Quads, Glutes], &[Abs]),
        strength(43, "Leg Press", LegsCore, Machine, P::Squat, &[Quads, Glutes], &[]),
        strength(44, "Dumbbell Squat", LegsCore, Dumbbell, P::Squat, &[Quads, Glutes], &[]),
        strength(45, "Romanian Deadlift", LegsCore, Barbell, P::Hinge, &[Hamstrings, Glutes], &[LowerBack]),
        strength(46, "Dumbbell Romanian Deadlift", LegsCore, Dumbbell, P::Hinge, &[Hamstrings, Glutes], &[LowerBack]),
        strength(47, "Kettlebell Swing", LegsCore, Kettlebell, P::Hinge, &[Glutes, Hamstrings], &[LowerBack]),
        strength(48, "Hip Thrust", LegsCore, Barbell, P::Hinge, &[Glutes], &[Hamstrings]),
        strength(49, "Walking Lunge", LegsCore, Dumbbell, P::Lunge, &[Quads, Glutes], &[Hamstrings]),
        strength(50, "Bulgarian Split Squat", LegsCore, Dumbbell, P::Lunge, &[Quads, Glutes], &[]),
        strength(51, "Reverse Lunge", LegsCore, Bodyweight, P::Lunge, &[Quads, Glutes], &[]),
        strength(52, "Barbell Lunge", LegsCore, Barbell, P::Lunge, &[Quads, Glutes], &[Hamstrings]),
        strength(53, "Plank", LegsCore, Bodyweight, P::Core, &[Abs], &[Obliques]),
        strength(54, "Hanging Knee Raise", LegsCore, PullupBar, P::Core, &[Abs], &[Forearms]),
        strength(55, "Cable Woodchop", LegsCore, Cable, P::Core, &[Obliques], &[Abs]),
        strength(56, "Kettlebell Windmill", LegsCore, Kettlebell, P::Core, &[Obliques], &[Shoulders]),
        strength(57, "Leg Curl", LegsCore, Machine, P::None, &[Hamstrings], &[]),
        strength(58, "Standing Calf Raise", LegsCore, Machine, P::None, &[Calves], &[]),
        // Full body
        strength(60, "Deadlift", Full, Barbell, P::Hinge, &[Hamstrings, Glutes, LowerBack], &[Back, Traps, Forearms]),
        strength(61, "Trap Bar Deadlift", Full, Barbell, P::Hinge, &[Quads, Glutes], &[Hamstrings, Back]),
        strength(62, "Kettlebell Clean and Press", Full, Kettlebell, P::VerticalPush, &[Shoulders, Glutes], &[Hamstrings, Triceps]),
        strength(63, "Dumbbell Thruster", Full, Dumbbell, P::Squat, &[Quads, Shoulders], &[Glutes, Triceps]),
        // Metcon / engine
        metcon(80, "Burpee", Bodyweight, &[Chest, Quads]),
        metcon(81, "Rowing Intervals", Rower, &[Back, Quads]),
        metcon(82, "Kettlebell Swing EMOM", Kettlebell, &[Glutes, Hamstrings]),
    ];

    Catalog::from_exercises(exercises)
}
