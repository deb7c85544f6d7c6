//! Picks the bin for a target day and turns it into a light command.

use chrono::NaiveDate;

use crate::model::{BinCategory, Hue, Schedule};

/// Brightness used when signalling a collection, in percent.
pub const SIGNAL_BRIGHTNESS: u8 = 30;
/// Highest saturation the Hue API accepts.
pub const MAX_SATURATION: u8 = 254;

/// Category collected on `target_date`, if any.
#[must_use]
pub fn select(schedule: &Schedule, target_date: NaiveDate) -> Option<BinCategory> {
    schedule.get(target_date)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fixed assignment of a hue to every bin category.
///
/// Built once at startup and shared by reference.
pub struct ColorTable {
    plastic: Hue,
    paper: Hue,
    plants: Hue,
    residual: Hue,
}

impl ColorTable {
    /// Red plastic, blue paper, green plants and a grey-derived residual hue.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            plastic: Hue(0),
            paper: Hue(46_920),
            plants: Hue(25_500),
            residual: hue_from_rgb(128, 128, 128),
        }
    }

    /// Hue shown for `category`.
    #[must_use]
    pub fn color_for(&self, category: BinCategory) -> Hue {
        match category {
            BinCategory::Plastic => self.plastic,
            BinCategory::Paper => self.paper,
            BinCategory::Plants => self.plants,
            BinCategory::Residual => self.residual,
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// HSV hue of an RGB color, scaled to the 16-bit Hue wheel.
///
/// Achromatic colors (all channels equal) have hue 0.
#[must_use]
pub fn hue_from_rgb(red: u8, green: u8, blue: u8) -> Hue {
    let (red, green, blue) = (f64::from(red), f64::from(green), f64::from(blue));
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let delta = max - min;
    if delta <= 0.0 {
        return Hue(0);
    }

    let sector = if (max - red).abs() < f64::EPSILON {
        (green - blue) / delta
    } else if (max - green).abs() < f64::EPSILON {
        2.0 + (blue - red) / delta
    } else {
        4.0 + (red - green) / delta
    };
    let fraction = (sector / 6.0).rem_euclid(1.0);

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "fraction is within [0, 1), so the product fits in u16"
    )]
    let hue = (fraction * f64::from(u16::MAX)) as u16;
    Hue(hue)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Desired light state for a collection signal.
pub struct LightCommand {
    /// Whether the light is switched on.
    pub on: bool,
    /// Brightness in percent (0..=100).
    pub brightness: u8,
    /// Color wheel position.
    pub hue: Hue,
    /// Saturation on the Hue scale (0..=254).
    pub saturation: u8,
}

impl LightCommand {
    /// Full-saturation signal in the given hue at [`SIGNAL_BRIGHTNESS`].
    #[must_use]
    pub fn for_hue(hue: Hue) -> Self {
        Self {
            on: true,
            brightness: SIGNAL_BRIGHTNESS,
            hue,
            saturation: MAX_SATURATION,
        }
    }

    /// Replace the brightness, clamped to 100 percent.
    #[must_use]
    pub fn with_brightness(self, percent: u8) -> Self {
        Self {
            brightness: percent.min(100),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_a_direct_lookup() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 3).expect("valid test date");
        let other = NaiveDate::from_ymd_opt(2025, 6, 4).expect("valid test date");
        let schedule: Schedule = [(day, BinCategory::Paper)].into_iter().collect();

        assert_eq!(select(&schedule, day), Some(BinCategory::Paper));
        assert_eq!(select(&schedule, other), None);
        assert_eq!(select(&Schedule::new(), day), None);
    }

    #[test]
    fn standard_colors() {
        let table = ColorTable::standard();
        assert_eq!(table.color_for(BinCategory::Plastic), Hue(0));
        assert_eq!(table.color_for(BinCategory::Paper), Hue(46_920));
        assert_eq!(table.color_for(BinCategory::Plants), Hue(25_500));
        assert_eq!(table.color_for(BinCategory::Residual), Hue(0));
    }

    #[test]
    fn hue_of_primary_colors() {
        assert_eq!(hue_from_rgb(255, 0, 0), Hue(0));
        assert_eq!(hue_from_rgb(0, 255, 0), Hue(21_845));
        assert_eq!(hue_from_rgb(0, 0, 255), Hue(43_690));
        assert_eq!(hue_from_rgb(128, 128, 128), Hue(0));
    }

    #[test]
    fn command_defaults() {
        let command = LightCommand::for_hue(Hue(46_920));
        assert!(command.on);
        assert_eq!(command.brightness, 30);
        assert_eq!(command.saturation, 254);
        assert_eq!(command.with_brightness(180).brightness, 100);
    }
}
