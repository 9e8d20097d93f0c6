use std::fmt;

use serde::{Deserialize, Serialize};

/// Broadcast day. Serialized with the station's locale label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    #[serde(rename = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
    #[serde(rename = "Domingo")]
    Sunday,
}

impl Default for DayOfWeek {
    fn default() -> Self {
        DayOfWeek::Monday
    }
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Lunes",
            DayOfWeek::Tuesday => "Martes",
            DayOfWeek::Wednesday => "Miércoles",
            DayOfWeek::Thursday => "Jueves",
            DayOfWeek::Friday => "Viernes",
            DayOfWeek::Saturday => "Sábado",
            DayOfWeek::Sunday => "Domingo",
        }
    }

    /// Position in `ALL`, used as the slot index on the board.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
