//! Human and machine readable views of a servo configuration.

use std::fmt::Write as _;

use cupcake_common::servo::{ServoChannel, ServoConfig, TimingConfig, TimingField, TravelRange};
use serde::Serialize;

/// One calibration row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelRow {
    pub channel: ServoChannel,
    pub index: usize,
    pub min: u8,
    pub neutral: u8,
    pub max: u8,
    pub span: u8,
}

/// Flattened configuration for `show --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub device_address: String,
    pub travel: TravelRange,
    pub channels: Vec<ChannelRow>,
    pub timing: TimingConfig,
}

impl ConfigReport {
    pub fn new(config: &ServoConfig) -> Self {
        let channels = config
            .calibration
            .iter()
            .map(|(channel, c)| ChannelRow {
                channel,
                index: channel.index(),
                min: c.min,
                neutral: c.neutral,
                max: c.max,
                span: c.span(),
            })
            .collect();

        Self {
            device_address: config.device_address.to_string(),
            travel: config.travel,
            channels,
            timing: config.timing,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PWM driver address: {}", self.device_address);
        let _ = writeln!(
            out,
            "Travel bound:       {}°..{}°",
            self.travel.min, self.travel.max
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<3} {:<10} {:>4} {:>8} {:>4} {:>5}",
            "#", "channel", "min", "neutral", "max", "span"
        );
        for row in &self.channels {
            let _ = writeln!(
                out,
                "{:<3} {:<10} {:>4} {:>8} {:>4} {:>5}",
                row.index,
                row.channel.name(),
                row.min,
                row.neutral,
                row.max,
                row.span
            );
        }
        let _ = writeln!(out);
        for field in TimingField::ALL {
            let _ = writeln!(
                out,
                "{:<24} {:>6} ms",
                field.as_str(),
                self.timing.value(field)
            );
        }
        let _ = writeln!(out, "{:<24} {:>6}", "DEBUG_MODE", self.timing.debug);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_channels_in_output_order() {
        let report = ConfigReport::new(&ServoConfig::default());
        assert_eq!(report.channels.len(), 7);
        assert_eq!(report.channels[0].channel, ServoChannel::Jaw);
        assert_eq!(report.channels[6].channel, ServoChannel::Extra2);
        assert_eq!(report.channels[1].span, 90);
        assert_eq!(report.device_address, "0x40");
    }

    #[test]
    fn text_view_contains_every_value() {
        let text = ConfigReport::new(&ServoConfig::default()).to_text();
        assert!(text.contains("PWM driver address: 0x40"));
        assert!(text.contains("head_tilt"));
        assert!(text.contains("SERVO_TIMEOUT"));
        assert!(text.contains("10000 ms"));
        assert!(text.contains("DEBUG_MODE"));
    }

    #[test]
    fn json_view_uses_config_keys() {
        let json = ConfigReport::new(&ServoConfig::default()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["device_address"], "0x40");
        assert_eq!(value["channels"][5]["channel"], "extra_1");
        assert_eq!(value["timing"]["max_servo_speed"], 5);
    }
}
