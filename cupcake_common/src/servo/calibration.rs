//! Per-channel angle limits.
//!
//! A [`CalibrationTable`] holds exactly one [`ServoCalibration`] per
//! [`ServoChannel`], addressed by the channel enum. Validation collects one
//! `InvalidCalibration` per offending channel across the whole table.

use serde::{Deserialize, Serialize};

use crate::consts::{CHANNEL_COUNT, TRAVEL_MAX_DEG, TRAVEL_MIN_DEG};
use crate::error::{CalibrationFault, ValidationError, ValidationErrors};
use crate::servo::channel::ServoChannel;

/// Physical travel bound of the servos [deg].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TravelRange {
    #[serde(default = "default_travel_min")]
    pub min: u8,
    #[serde(default = "default_travel_max")]
    pub max: u8,
}

fn default_travel_min() -> u8 {
    TRAVEL_MIN_DEG
}
fn default_travel_max() -> u8 {
    TRAVEL_MAX_DEG
}

impl Default for TravelRange {
    fn default() -> Self {
        Self {
            min: TRAVEL_MIN_DEG,
            max: TRAVEL_MAX_DEG,
        }
    }
}

impl TravelRange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min >= self.max {
            return Err(ValidationError::InvalidTravelRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// `(min, neutral, max)` angle bounds for one channel [deg].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServoCalibration {
    pub min: u8,
    pub neutral: u8,
    pub max: u8,
}

impl ServoCalibration {
    pub const fn new(min: u8, neutral: u8, max: u8) -> Self {
        Self { min, neutral, max }
    }

    /// Check this triple against `travel`.
    ///
    /// Reports the first fault in order: below travel, above travel,
    /// inverted, neutral out of range.
    pub fn check(&self, travel: &TravelRange) -> Result<(), CalibrationFault> {
        if self.min < travel.min {
            return Err(CalibrationFault::BelowTravel {
                min: self.min,
                bound: travel.min,
            });
        }
        if self.max > travel.max {
            return Err(CalibrationFault::AboveTravel {
                max: self.max,
                bound: travel.max,
            });
        }
        if self.min > self.max {
            return Err(CalibrationFault::Inverted {
                min: self.min,
                max: self.max,
            });
        }
        if self.neutral < self.min || self.neutral > self.max {
            return Err(CalibrationFault::NeutralOutOfRange {
                min: self.min,
                neutral: self.neutral,
                max: self.max,
            });
        }
        Ok(())
    }

    /// `true` if `angle` lies within `[min, max]`.
    pub fn contains(&self, angle: u8) -> bool {
        (self.min..=self.max).contains(&angle)
    }

    /// Saturate `angle` into `[min, max]`.
    ///
    /// Only meaningful on a validated triple.
    pub fn clamp(&self, angle: u8) -> u8 {
        angle.clamp(self.min, self.max.max(self.min))
    }

    /// Usable travel `max - min` [deg].
    pub fn span(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }
}

/// Factory calibration, in channel order.
const DEFAULT_TABLE: [ServoCalibration; CHANNEL_COUNT] = [
    ServoCalibration::new(60, 90, 120), // jaw
    ServoCalibration::new(45, 90, 135), // head_pan
    ServoCalibration::new(45, 90, 135), // head_tilt
    ServoCalibration::new(60, 90, 120), // ear_left
    ServoCalibration::new(60, 90, 120), // ear_right
    ServoCalibration::new(45, 90, 135), // extra_1
    ServoCalibration::new(45, 90, 135), // extra_2
];

/// Calibration for every channel, indexed by [`ServoChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CalibrationTableRepr", into = "CalibrationTableRepr")]
pub struct CalibrationTable {
    entries: [ServoCalibration; CHANNEL_COUNT],
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_TABLE,
        }
    }
}

impl CalibrationTable {
    pub const fn new(entries: [ServoCalibration; CHANNEL_COUNT]) -> Self {
        Self { entries }
    }

    /// Factory calibration for a single channel.
    pub const fn factory(channel: ServoChannel) -> ServoCalibration {
        DEFAULT_TABLE[channel.index()]
    }

    pub fn get(&self, channel: ServoChannel) -> ServoCalibration {
        self.entries[channel.index()]
    }

    /// Look up by raw output index.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidChannel` for indices past the last channel.
    pub fn get_index(&self, index: usize) -> Result<ServoCalibration, ValidationError> {
        ServoChannel::from_index(index).map(|c| self.get(c))
    }

    /// Replace one entry. The table must be validated again before use.
    pub fn set(&mut self, channel: ServoChannel, calibration: ServoCalibration) {
        self.entries[channel.index()] = calibration;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServoChannel, ServoCalibration)> + '_ {
        ServoChannel::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Collect one error per miscalibrated channel into `errors`.
    pub(crate) fn collect_errors(&self, travel: &TravelRange, errors: &mut Vec<ValidationError>) {
        for (channel, calibration) in self.iter() {
            if let Err(reason) = calibration.check(travel) {
                errors.push(ValidationError::InvalidCalibration { channel, reason });
            }
        }
    }

    /// Validate every channel against `travel`.
    ///
    /// # Errors
    ///
    /// One `InvalidCalibration` per offending channel.
    pub fn validate(&self, travel: &TravelRange) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        self.collect_errors(travel, &mut errors);
        ValidationErrors::check(errors)
    }
}

/// On-disk layout: one table per channel, missing channels take the
/// factory values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CalibrationTableRepr {
    #[serde(default = "factory_jaw")]
    jaw: ServoCalibration,
    #[serde(default = "factory_head_pan")]
    head_pan: ServoCalibration,
    #[serde(default = "factory_head_tilt")]
    head_tilt: ServoCalibration,
    #[serde(default = "factory_ear_left")]
    ear_left: ServoCalibration,
    #[serde(default = "factory_ear_right")]
    ear_right: ServoCalibration,
    #[serde(default = "factory_extra_1")]
    extra_1: ServoCalibration,
    #[serde(default = "factory_extra_2")]
    extra_2: ServoCalibration,
}

fn factory_jaw() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::Jaw)
}
fn factory_head_pan() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::HeadPan)
}
fn factory_head_tilt() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::HeadTilt)
}
fn factory_ear_left() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::EarLeft)
}
fn factory_ear_right() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::EarRight)
}
fn factory_extra_1() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::Extra1)
}
fn factory_extra_2() -> ServoCalibration {
    CalibrationTable::factory(ServoChannel::Extra2)
}

impl From<CalibrationTableRepr> for CalibrationTable {
    fn from(r: CalibrationTableRepr) -> Self {
        Self::new([
            r.jaw,
            r.head_pan,
            r.head_tilt,
            r.ear_left,
            r.ear_right,
            r.extra_1,
            r.extra_2,
        ])
    }
}

impl From<CalibrationTable> for CalibrationTableRepr {
    fn from(t: CalibrationTable) -> Self {
        Self {
            jaw: t.get(ServoChannel::Jaw),
            head_pan: t.get(ServoChannel::HeadPan),
            head_tilt: t.get(ServoChannel::HeadTilt),
            ear_left: t.get(ServoChannel::EarLeft),
            ear_right: t.get(ServoChannel::EarRight),
            extra_1: t.get(ServoChannel::Extra1),
            extra_2: t.get(ServoChannel::Extra2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        let table = CalibrationTable::default();
        assert!(table.validate(&TravelRange::default()).is_ok());
        for (_, c) in table.iter() {
            assert!(c.min <= c.neutral && c.neutral <= c.max);
            assert!(c.max <= TRAVEL_MAX_DEG);
        }
    }

    #[test]
    fn default_values_match_factory_table() {
        let table = CalibrationTable::default();
        assert_eq!(table.get(ServoChannel::Jaw), ServoCalibration::new(60, 90, 120));
        assert_eq!(table.get(ServoChannel::HeadPan), ServoCalibration::new(45, 90, 135));
        assert_eq!(table.get(ServoChannel::EarRight), ServoCalibration::new(60, 90, 120));
        assert_eq!(table.get(ServoChannel::Extra2), ServoCalibration::new(45, 90, 135));
    }

    #[test]
    fn inverted_entry_reports_only_that_channel() {
        let mut table = CalibrationTable::default();
        table.set(ServoChannel::HeadTilt, ServoCalibration::new(120, 90, 60));

        let errors = table.validate(&TravelRange::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.as_slice()[0],
            ValidationError::InvalidCalibration {
                channel: ServoChannel::HeadTilt,
                reason: CalibrationFault::Inverted { min: 120, max: 60 },
            }
        );
    }

    #[test]
    fn every_bad_channel_is_reported() {
        let mut table = CalibrationTable::default();
        table.set(ServoChannel::Jaw, ServoCalibration::new(60, 150, 120));
        table.set(ServoChannel::EarLeft, ServoCalibration::new(10, 90, 200));
        table.set(ServoChannel::Extra2, ServoCalibration::new(100, 90, 50));

        let errors = table.validate(&TravelRange::default()).unwrap_err();
        assert_eq!(
            errors.miscalibrated_channels(),
            vec![ServoChannel::Jaw, ServoChannel::EarLeft, ServoChannel::Extra2]
        );
    }

    #[test]
    fn travel_bound_is_configurable() {
        let travel = TravelRange { min: 20, max: 160 };
        let mut table = CalibrationTable::default();
        table.set(ServoChannel::HeadPan, ServoCalibration::new(10, 90, 135));
        table.set(ServoChannel::HeadTilt, ServoCalibration::new(45, 90, 170));

        let errors = table.validate(&travel).unwrap_err().into_vec();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidCalibration {
                    channel: ServoChannel::HeadPan,
                    reason: CalibrationFault::BelowTravel { min: 10, bound: 20 },
                },
                ValidationError::InvalidCalibration {
                    channel: ServoChannel::HeadTilt,
                    reason: CalibrationFault::AboveTravel {
                        max: 170,
                        bound: 160
                    },
                },
            ]
        );
    }

    #[test]
    fn get_index_past_last_channel_fails() {
        let table = CalibrationTable::default();
        assert!(table.get_index(6).is_ok());
        assert_eq!(
            table.get_index(7),
            Err(ValidationError::InvalidChannel { index: 7 })
        );
    }

    #[test]
    fn clamp_and_contains() {
        let c = ServoCalibration::new(60, 90, 120);
        assert!(c.contains(60));
        assert!(c.contains(120));
        assert!(!c.contains(121));
        assert_eq!(c.clamp(10), 60);
        assert_eq!(c.clamp(95), 95);
        assert_eq!(c.clamp(180), 120);
        assert_eq!(c.span(), 60);
    }

    #[test]
    fn degenerate_travel_range_is_rejected() {
        let travel = TravelRange { min: 90, max: 90 };
        assert_eq!(
            travel.validate(),
            Err(ValidationError::InvalidTravelRange { min: 90, max: 90 })
        );
    }

    #[test]
    fn missing_channels_fall_back_to_factory() {
        let table: CalibrationTable = toml::from_str(
            r#"
[jaw]
min = 70
neutral = 90
max = 110
"#,
        )
        .unwrap();
        assert_eq!(table.get(ServoChannel::Jaw), ServoCalibration::new(70, 90, 110));
        assert_eq!(
            table.get(ServoChannel::HeadPan),
            CalibrationTable::factory(ServoChannel::HeadPan)
        );
    }

    #[test]
    fn unknown_channel_key_is_rejected() {
        let result: Result<CalibrationTable, _> = toml::from_str(
            r#"
[tail]
min = 0
neutral = 90
max = 180
"#,
        );
        assert!(result.is_err());
    }
}
