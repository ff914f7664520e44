use super::{TimeRange, UserPreferences};
use crate::error::AppError;

/// A batch of edits to saved preferences, validated before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceChanges {
    /// Weekday whose time windows are replaced; no windows means any time.
    pub set_day: Option<(u8, Vec<TimeRange>)>,
    pub enable_days: Vec<u8>,
    pub disable_days: Vec<u8>,
    /// Drop every selected club before adding `select_clubs`.
    pub clear_clubs: bool,
    pub select_clubs: Vec<String>,
}

impl PreferenceChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Rejects edits that contradict each other.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(day) = self
            .enable_days
            .iter()
            .find(|day| self.disable_days.contains(day))
        {
            return Err(AppError::invalid_parameter(format!(
                "Weekday {day} cannot be both enabled and disabled"
            )));
        }
        if self.select_clubs.iter().any(|club| club.trim().is_empty()) {
            return Err(AppError::invalid_parameter("Club name cannot be empty"));
        }
        Ok(())
    }

    /// Applies the edits. Time windows are normalized on the way in.
    pub fn apply(&self, prefs: &mut UserPreferences) {
        if let Some((day, ranges)) = &self.set_day {
            prefs.set_ranges(*day, ranges.clone());
        }
        for &day in &self.enable_days {
            prefs.set_enabled(day, true);
        }
        for &day in &self.disable_days {
            prefs.set_enabled(day, false);
        }

        if self.clear_clubs {
            prefs.clubs.clear();
        }
        for club in &self.select_clubs {
            let club = club.trim();
            if !prefs.clubs.iter().any(|selected| selected == club) {
                prefs.clubs.push(club.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_windows_and_toggles_days() {
        let changes = PreferenceChanges {
            set_day: Some((
                3,
                vec![
                    TimeRange::new("19:00", "21:00"),
                    TimeRange::new("18:00", "19:30"),
                ],
            )),
            enable_days: vec![0],
            disable_days: vec![2],
            ..Default::default()
        };
        let mut prefs = UserPreferences::default();
        prefs.set_enabled(0, false);

        changes.apply(&mut prefs);

        assert_eq!(prefs.day(3).ranges, vec![TimeRange::new("18:00", "21:00")]);
        assert!(prefs.day(0).enabled);
        assert!(!prefs.day(2).enabled);
    }

    #[test]
    fn test_empty_window_list_clears_day() {
        let mut prefs = UserPreferences::default();
        prefs.set_ranges(5, vec![TimeRange::new("06:00", "08:00")]);

        PreferenceChanges {
            set_day: Some((5, Vec::new())),
            ..Default::default()
        }
        .apply(&mut prefs);

        assert!(prefs.day(5).ranges.is_empty());
    }

    #[test]
    fn test_club_selection() {
        let mut prefs = UserPreferences::default();
        prefs.clubs = vec!["Old Club".to_string()];

        let add = PreferenceChanges {
            select_clubs: vec!["Monkey Padel Bali".to_string(), " Monkey Padel Bali ".to_string()],
            ..Default::default()
        };
        add.apply(&mut prefs);
        assert_eq!(prefs.clubs, vec!["Old Club", "Monkey Padel Bali"]);

        let replace = PreferenceChanges {
            clear_clubs: true,
            select_clubs: vec!["Simply Padel".to_string()],
            ..Default::default()
        };
        replace.apply(&mut prefs);
        assert_eq!(prefs.clubs, vec!["Simply Padel"]);
    }

    #[test]
    fn test_validate_rejects_conflicts() {
        let conflicting = PreferenceChanges {
            enable_days: vec![1, 2],
            disable_days: vec![2],
            ..Default::default()
        };
        assert!(conflicting.validate().is_err());

        let blank_club = PreferenceChanges {
            select_clubs: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(blank_club.validate().is_err());

        assert!(PreferenceChanges::default().validate().is_ok());
        assert!(PreferenceChanges::default().is_empty());
    }
}
