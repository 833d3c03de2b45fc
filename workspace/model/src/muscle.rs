//! Canonical muscle groups and the mapping from the free-text labels found
//! in the exercise catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Muscle groups the workout report tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Muscle {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Traps,
    Abs,
    LowerBack,
    Glutes,
    Quadriceps,
    Hamstrings,
    Calves,
}

impl Muscle {
    pub const ALL: [Muscle; 13] = [
        Muscle::Chest,
        Muscle::Back,
        Muscle::Shoulders,
        Muscle::Biceps,
        Muscle::Triceps,
        Muscle::Forearms,
        Muscle::Traps,
        Muscle::Abs,
        Muscle::LowerBack,
        Muscle::Glutes,
        Muscle::Quadriceps,
        Muscle::Hamstrings,
        Muscle::Calves,
    ];

    /// Stable key, used in configuration and in overlay file names.
    pub fn key(&self) -> &'static str {
        match self {
            Muscle::Chest => "chest",
            Muscle::Back => "back",
            Muscle::Shoulders => "shoulders",
            Muscle::Biceps => "biceps",
            Muscle::Triceps => "triceps",
            Muscle::Forearms => "forearms",
            Muscle::Traps => "traps",
            Muscle::Abs => "abs",
            Muscle::LowerBack => "lower_back",
            Muscle::Glutes => "glutes",
            Muscle::Quadriceps => "quadriceps",
            Muscle::Hamstrings => "hamstrings",
            Muscle::Calves => "calves",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Muscle::Chest => "Peito",
            Muscle::Back => "Costas",
            Muscle::Shoulders => "Ombros",
            Muscle::Biceps => "Bíceps",
            Muscle::Triceps => "Tríceps",
            Muscle::Forearms => "Antebraços",
            Muscle::Traps => "Trapézio",
            Muscle::Abs => "Abdômen",
            Muscle::LowerBack => "Lombar",
            Muscle::Glutes => "Glúteos",
            Muscle::Quadriceps => "Quadríceps",
            Muscle::Hamstrings => "Posteriores",
            Muscle::Calves => "Panturrilhas",
        }
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of looking up a free-text muscle label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuscleLabel {
    /// The label names a tracked muscle group.
    Muscle(Muscle),
    /// A known label that deliberately earns no muscle credit
    /// (cardio, mobility, whole-body work, measurements).
    NoCredit,
    /// Not in the table.
    Unknown,
}

impl MuscleLabel {
    pub fn muscle(&self) -> Option<Muscle> {
        match self {
            MuscleLabel::Muscle(muscle) => Some(*muscle),
            MuscleLabel::NoCredit | MuscleLabel::Unknown => None,
        }
    }
}

/// Every label the catalogue is known to use, after folding (lower case,
/// no accents). `None` is the explicit no-credit case.
const LABELS: &[(&str, Option<Muscle>)] = &[
    ("peito", Some(Muscle::Chest)),
    ("peitoral", Some(Muscle::Chest)),
    ("chest", Some(Muscle::Chest)),
    ("costas", Some(Muscle::Back)),
    ("dorsal", Some(Muscle::Back)),
    ("dorsais", Some(Muscle::Back)),
    ("back", Some(Muscle::Back)),
    ("lats", Some(Muscle::Back)),
    ("ombro", Some(Muscle::Shoulders)),
    ("ombros", Some(Muscle::Shoulders)),
    ("deltoide", Some(Muscle::Shoulders)),
    ("deltoides", Some(Muscle::Shoulders)),
    ("shoulders", Some(Muscle::Shoulders)),
    ("biceps", Some(Muscle::Biceps)),
    ("triceps", Some(Muscle::Triceps)),
    ("antebraco", Some(Muscle::Forearms)),
    ("antebracos", Some(Muscle::Forearms)),
    ("forearms", Some(Muscle::Forearms)),
    ("trapezio", Some(Muscle::Traps)),
    ("traps", Some(Muscle::Traps)),
    ("abdomen", Some(Muscle::Abs)),
    ("abdominal", Some(Muscle::Abs)),
    ("abdominais", Some(Muscle::Abs)),
    ("abs", Some(Muscle::Abs)),
    ("core", Some(Muscle::Abs)),
    ("lombar", Some(Muscle::LowerBack)),
    ("lower back", Some(Muscle::LowerBack)),
    ("gluteo", Some(Muscle::Glutes)),
    ("gluteos", Some(Muscle::Glutes)),
    ("glutes", Some(Muscle::Glutes)),
    ("quadriceps", Some(Muscle::Quadriceps)),
    ("quads", Some(Muscle::Quadriceps)),
    ("posterior", Some(Muscle::Hamstrings)),
    ("posteriores", Some(Muscle::Hamstrings)),
    ("posterior de coxa", Some(Muscle::Hamstrings)),
    ("isquiotibiais", Some(Muscle::Hamstrings)),
    ("hamstrings", Some(Muscle::Hamstrings)),
    ("panturrilha", Some(Muscle::Calves)),
    ("panturrilhas", Some(Muscle::Calves)),
    ("calves", Some(Muscle::Calves)),
    ("cardio", None),
    ("corrida", None),
    ("mobilidade", None),
    ("alongamento", None),
    ("corpo inteiro", None),
    ("full body", None),
    ("pernas", None),
    ("hrr", None),
];

/// Maps a free-text label to a muscle group.
pub fn classify_label(label: &str) -> MuscleLabel {
    let folded = fold(label);
    match LABELS.iter().find(|(known, _)| *known == folded) {
        Some((_, Some(muscle))) => MuscleLabel::Muscle(*muscle),
        Some((_, None)) => MuscleLabel::NoCredit,
        None => MuscleLabel::Unknown,
    }
}

fn fold(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
