use crate::error::FocusError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FocusMode
// ---------------------------------------------------------------------------

/// The fixed catalog of focus modes. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    Work,
    Personal,
    Sleep,
    Presentation,
    Gaming,
    Driving,
    Fitness,
    Mindfulness,
    Reading,
    Writing,
    Research,
    Creative,
    Social,
    Family,
    Friends,
}

impl FocusMode {
    pub fn all() -> &'static [FocusMode] {
        &[
            FocusMode::Work,
            FocusMode::Personal,
            FocusMode::Sleep,
            FocusMode::Presentation,
            FocusMode::Gaming,
            FocusMode::Driving,
            FocusMode::Fitness,
            FocusMode::Mindfulness,
            FocusMode::Reading,
            FocusMode::Writing,
            FocusMode::Research,
            FocusMode::Creative,
            FocusMode::Social,
            FocusMode::Family,
            FocusMode::Friends,
        ]
    }

    /// Name typed on the command line, e.g. `work`.
    pub fn as_str(self) -> &'static str {
        match self {
            FocusMode::Work => "work",
            FocusMode::Personal => "personal",
            FocusMode::Sleep => "sleep",
            FocusMode::Presentation => "presentation",
            FocusMode::Gaming => "gaming",
            FocusMode::Driving => "driving",
            FocusMode::Fitness => "fitness",
            FocusMode::Mindfulness => "mindfulness",
            FocusMode::Reading => "reading",
            FocusMode::Writing => "writing",
            FocusMode::Research => "research",
            FocusMode::Creative => "creative",
            FocusMode::Social => "social",
            FocusMode::Family => "family",
            FocusMode::Friends => "friends",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FocusMode::Work => "Work",
            FocusMode::Personal => "Personal",
            FocusMode::Sleep => "Sleep",
            FocusMode::Presentation => "Presentation",
            FocusMode::Gaming => "Gaming",
            FocusMode::Driving => "Driving",
            FocusMode::Fitness => "Fitness",
            FocusMode::Mindfulness => "Mindfulness",
            FocusMode::Reading => "Reading",
            FocusMode::Writing => "Writing",
            FocusMode::Research => "Research",
            FocusMode::Creative => "Creative",
            FocusMode::Social => "Social",
            FocusMode::Family => "Family",
            FocusMode::Friends => "Friends",
        }
    }

    /// Stable reverse-domain identifier used as the store key component.
    pub fn identifier(self) -> &'static str {
        match self {
            FocusMode::Work => "com.apple.focus.work",
            FocusMode::Personal => "com.apple.focus.personal",
            FocusMode::Sleep => "com.apple.focus.sleep",
            FocusMode::Presentation => "com.apple.focus.presentation",
            FocusMode::Gaming => "com.apple.focus.gaming",
            FocusMode::Driving => "com.apple.focus.driving",
            FocusMode::Fitness => "com.apple.focus.fitness",
            FocusMode::Mindfulness => "com.apple.focus.mindfulness",
            FocusMode::Reading => "com.apple.focus.reading",
            FocusMode::Writing => "com.apple.focus.writing",
            FocusMode::Research => "com.apple.focus.research",
            FocusMode::Creative => "com.apple.focus.creative",
            FocusMode::Social => "com.apple.focus.social",
            FocusMode::Family => "com.apple.focus.family",
            FocusMode::Friends => "com.apple.focus.friends",
        }
    }

    /// SF Symbols glyph name embedded in the exported Shortcuts icon block.
    pub fn icon_tag(self) -> &'static str {
        match self {
            FocusMode::Work => "briefcase.fill",
            FocusMode::Personal => "person.fill",
            FocusMode::Sleep => "moon.fill",
            FocusMode::Presentation => "presentation.fill",
            FocusMode::Gaming => "gamecontroller.fill",
            FocusMode::Driving => "car.fill",
            FocusMode::Fitness => "figure.walk",
            FocusMode::Mindfulness => "leaf.fill",
            FocusMode::Reading => "book.fill",
            FocusMode::Writing => "pencil.fill",
            FocusMode::Research => "magnifyingglass",
            FocusMode::Creative => "paintbrush.fill",
            FocusMode::Social => "person.2.fill",
            FocusMode::Family => "house.fill",
            FocusMode::Friends => "person.3.fill",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<FocusMode> {
        FocusMode::all()
            .iter()
            .copied()
            .find(|m| m.identifier() == identifier)
    }
}

impl fmt::Display for FocusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FocusMode {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FocusMode::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| FocusError::UnknownMode(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ModeAction
// ---------------------------------------------------------------------------

/// Action keyword accepted after a mode name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeAction {
    On,
    Off,
    Toggle,
}

impl ModeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeAction::On => "on",
            ModeAction::Off => "off",
            ModeAction::Toggle => "toggle",
        }
    }
}

impl fmt::Display for ModeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModeAction {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(ModeAction::On),
            "off" => Ok(ModeAction::Off),
            "toggle" => Ok(ModeAction::Toggle),
            _ => Err(FocusError::InvalidAction(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_fifteen_modes_starting_with_work() {
        let all = FocusMode::all();
        assert_eq!(all.len(), 15);
        assert_eq!(all[0], FocusMode::Work);
        assert_eq!(all[14], FocusMode::Friends);
    }

    #[test]
    fn identifiers_and_names_are_unique() {
        let ids: HashSet<_> = FocusMode::all().iter().map(|m| m.identifier()).collect();
        let names: HashSet<_> = FocusMode::all().iter().map(|m| m.as_str()).collect();
        assert_eq!(ids.len(), FocusMode::all().len());
        assert_eq!(names.len(), FocusMode::all().len());
    }

    #[test]
    fn parse_round_trips_every_mode() {
        for mode in FocusMode::all() {
            assert_eq!(mode.as_str().parse::<FocusMode>().unwrap(), *mode);
            assert_eq!(FocusMode::from_identifier(mode.identifier()), Some(*mode));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_display_names() {
        assert!(matches!(
            "meditation".parse::<FocusMode>(),
            Err(FocusError::UnknownMode(ref s)) if s == "meditation"
        ));
        assert!("Work".parse::<FocusMode>().is_err());
    }

    #[test]
    fn action_keywords() {
        assert_eq!("on".parse::<ModeAction>().unwrap(), ModeAction::On);
        assert_eq!("off".parse::<ModeAction>().unwrap(), ModeAction::Off);
        assert_eq!("toggle".parse::<ModeAction>().unwrap(), ModeAction::Toggle);
        assert!(matches!(
            "flip".parse::<ModeAction>(),
            Err(FocusError::InvalidAction(_))
        ));
    }
}
