//! Core domain types for the lift tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their classification (pattern, muscles, equipment)
//! - Logged sets (the append-only source of truth)
//! - Personal records and the celebration events they produce
//! - Suggestions handed back to the planner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

// ============================================================================
// Exercise Classification
// ============================================================================

/// Stable exercise identifier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ExerciseId(pub u32);

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workout-day category, also used as the selector's focus
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Push,
    Pull,
    LegsCore,
    Full,
}

impl FromStr for WorkoutType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "push" => Ok(WorkoutType::Push),
            "pull" => Ok(WorkoutType::Pull),
            "legs_core" | "legs" => Ok(WorkoutType::LegsCore),
            "full" | "full_body" => Ok(WorkoutType::Full),
            _ => Err(Error::Other(format!("Unknown focus: {}", s))),
        }
    }
}

/// Movement pattern of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    HorizontalPush,
    VerticalPush,
    HorizontalPull,
    VerticalPull,
    Squat,
    Hinge,
    Lunge,
    Core,
    None,
}

impl MovementPattern {
    /// The pattern tried when every candidate for this one is already used
    pub fn alternate(self) -> Option<MovementPattern> {
        match self {
            MovementPattern::Squat => Some(MovementPattern::Lunge),
            MovementPattern::Lunge => Some(MovementPattern::Squat),
            MovementPattern::HorizontalPush => Some(MovementPattern::VerticalPush),
            MovementPattern::VerticalPush => Some(MovementPattern::HorizontalPush),
            MovementPattern::HorizontalPull => Some(MovementPattern::VerticalPull),
            MovementPattern::VerticalPull => Some(MovementPattern::HorizontalPull),
            MovementPattern::Hinge => Some(MovementPattern::Squat),
            MovementPattern::Core | MovementPattern::None => None,
        }
    }
}

impl FromStr for MovementPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "horizontal_push" => Ok(MovementPattern::HorizontalPush),
            "vertical_push" => Ok(MovementPattern::VerticalPush),
            "horizontal_pull" => Ok(MovementPattern::HorizontalPull),
            "vertical_pull" => Ok(MovementPattern::VerticalPull),
            "squat" => Ok(MovementPattern::Squat),
            "hinge" => Ok(MovementPattern::Hinge),
            "lunge" => Ok(MovementPattern::Lunge),
            "core" => Ok(MovementPattern::Core),
            "none" => Ok(MovementPattern::None),
            _ => Err(Error::Other(format!("Unknown movement pattern: {}", s))),
        }
    }
}

/// Training modality
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Strength,
    Metcon,
}

/// Muscle groups used for slot matching
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Shoulders,
    RearDelts,
    Triceps,
    Back,
    Lats,
    Traps,
    Biceps,
    Forearms,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    LowerBack,
    Abs,
    Obliques,
}

/// How strongly an exercise loads a muscle group
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleRole {
    Primary,
    Secondary,
}

/// Equipment an exercise is performed with
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Kettlebell,
    Cable,
    Machine,
    Bodyweight,
    PullupBar,
    Band,
    Rower,
}

impl Equipment {
    /// Every equipment kind; an empty pool means this
    pub const ALL: [Equipment; 9] = [
        Equipment::Barbell,
        Equipment::Dumbbell,
        Equipment::Kettlebell,
        Equipment::Cable,
        Equipment::Machine,
        Equipment::Bodyweight,
        Equipment::PullupBar,
        Equipment::Band,
        Equipment::Rower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Barbell => "barbell",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Kettlebell => "kettlebell",
            Equipment::Cable => "cable",
            Equipment::Machine => "machine",
            Equipment::Bodyweight => "bodyweight",
            Equipment::PullupBar => "pullup_bar",
            Equipment::Band => "band",
            Equipment::Rower => "rower",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Equipment::ALL
            .into_iter()
            .find(|e| e.as_str() == normalized)
            .ok_or_else(|| Error::Other(format!("Unknown equipment: {}", s)))
    }
}

/// A (muscle group, role) tag on an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuscleTag {
    pub muscle: MuscleGroup,
    pub role: MuscleRole,
}

/// An exercise definition (e.g., "Barbell Bench Press")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub workout_type: WorkoutType,
    pub equipment: Equipment,
    pub pattern: MovementPattern,
    pub modality: Modality,
    pub muscles: Vec<MuscleTag>,
}

impl Exercise {
    /// Primary muscle groups only
    pub fn primary_muscles(&self) -> impl Iterator<Item = MuscleGroup> + '_ {
        self.muscles
            .iter()
            .filter(|tag| tag.role == MuscleRole::Primary)
            .map(|tag| tag.muscle)
    }
}

// ============================================================================
// Logged Sets
// ============================================================================

/// Outcome recorded for a set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SetOutcome {
    Success,
    Fail,
    Neutral,
}

impl SetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SetOutcome::Success)
    }
}

/// A single logged set. Never mutated once written.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_id: ExerciseId,
    pub equipment: Equipment,
    pub reps: u32,
    /// `None` for time-based work
    pub weight_kg: Option<f64>,
    pub outcome: SetOutcome,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

// ============================================================================
// Personal Records
// ============================================================================

/// Which kind of best a personal record tracks
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordType {
    /// Hard PR: heaviest successful weight at exactly `reps`
    RepMax { reps: u32 },
    /// Soft PR: best Epley estimate over any rep count in range
    EstimatedOneRepMax,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::RepMax { reps } => write!(f, "{}RM", reps),
            RecordType::EstimatedOneRepMax => f.write_str("e1RM"),
        }
    }
}

/// Key under which at most one current record is kept
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub exercise_id: ExerciseId,
    pub equipment: Equipment,
    pub record_type: RecordType,
}

/// Cached "best so far" value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecord {
    pub exercise_id: ExerciseId,
    pub equipment: Equipment,
    pub record_type: RecordType,
    pub value_kg: f64,
    pub achieved_at: DateTime<Utc>,
}

impl PersonalRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            exercise_id: self.exercise_id,
            equipment: self.equipment,
            record_type: self.record_type,
        }
    }
}

/// Emitted once per log action that beat a stored best
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrCelebrationEvent {
    pub exercise_id: ExerciseId,
    pub equipment: Equipment,
    pub is_hard_pr: bool,
    /// Only set for hard PRs
    pub reps: Option<u32>,
    pub new_weight_kg: Option<f64>,
    pub prev_weight_kg: Option<f64>,
    /// `None` only when the rep count is outside the estimable range
    pub new_e1rm_kg: Option<f64>,
    pub prev_e1rm_kg: Option<f64>,
}

// ============================================================================
// Suggestions
// ============================================================================

/// Where in the blueprint a suggestion came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Main,
    Accessory,
    TopUp,
}

/// Sets x rep-range prescription
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetScheme {
    pub sets: u32,
    pub rep_min: u32,
    pub rep_max: u32,
}

impl fmt::Display for SetScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rep_min == self.rep_max {
            write!(f, "{}x{}", self.sets, self.rep_min)
        } else {
            write!(f, "{}x{}-{}", self.sets, self.rep_min, self.rep_max)
        }
    }
}

/// A planned exercise for one workout
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Suggestion {
    pub exercise: Exercise,
    pub role: SlotRole,
    pub scheme: SetScheme,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The exercise library, ordered by id
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: BTreeMap<ExerciseId, Exercise>,
}
