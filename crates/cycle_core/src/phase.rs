use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    /// Phases in cycle order.
    pub const ALL: [CyclePhase; 4] = [
        CyclePhase::Menstrual,
        CyclePhase::Follicular,
        CyclePhase::Ovulation,
        CyclePhase::Luteal,
    ];

    /// Stable lowercase key, suitable for translation lookups.
    pub fn label(self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulation => "ovulation",
            CyclePhase::Luteal => "luteal",
        }
    }

    fn index(self) -> usize {
        match self {
            CyclePhase::Menstrual => 0,
            CyclePhase::Follicular => 1,
            CyclePhase::Ovulation => 2,
            CyclePhase::Luteal => 3,
        }
    }
}

/// Inclusive range of 1-based cycle days belonging to one phase.
/// `start > end` marks a phase that does not occur in this cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseSegment {
    pub phase: CyclePhase,
    pub start: u32,
    pub end: u32,
}

impl PhaseSegment {
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn contains(&self, day: u32) -> bool {
        self.start <= day && day <= self.end
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhaseInfo {
    pub phase: CyclePhase,
    pub cycle_day: u32,
    pub day_in_phase: u32,
    pub total_phase_days: u32,
}

/// One cycle day as drawn on the progress ring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RingDay {
    pub day: u32,
    pub phase: CyclePhase,
    pub is_past: bool,
    pub is_current: bool,
}

/// Split `[1, cycle_length]` into the four phases, in order.
///
/// Boundaries follow the classification thresholds. On short cycles where the
/// thresholds cross, later segments start after the previous one ends, leaving
/// the skipped phase empty.
pub fn phase_segments(config: &CycleConfig) -> [PhaseSegment; 4] {
    let cycle_length = i64::from(config.cycle_length());
    let menstrual_end = i64::from(config.period_length());
    let follicular_end = config.fertile_start_day().max(menstrual_end);
    let ovulation_end = (config.ovulation_day() + 1).max(follicular_end);

    // every bound lies in [1, cycle_length] once clamped
    let segment = |phase, start: i64, end: i64| PhaseSegment {
        phase,
        start: start as u32,
        end: end as u32,
    };

    [
        segment(CyclePhase::Menstrual, 1, menstrual_end),
        segment(CyclePhase::Follicular, menstrual_end + 1, follicular_end),
        segment(CyclePhase::Ovulation, follicular_end + 1, ovulation_end),
        segment(CyclePhase::Luteal, ovulation_end + 1, cycle_length),
    ]
}

/// Phase of a 1-based cycle day. The first matching rule wins.
pub fn classify_day(config: &CycleConfig, day: u32) -> CyclePhase {
    let day = i64::from(day);
    if day <= i64::from(config.period_length()) {
        CyclePhase::Menstrual
    } else if day <= config.fertile_start_day() {
        CyclePhase::Follicular
    } else if day <= config.ovulation_day() + 1 {
        CyclePhase::Ovulation
    } else {
        CyclePhase::Luteal
    }
}

pub fn phase_info(config: &CycleConfig, today: NaiveDate) -> PhaseInfo {
    let cycle_day = config.current_cycle_day(today);
    let phase = classify_day(config, cycle_day);
    let segment = phase_segments(config)[phase.index()];
    PhaseInfo {
        phase,
        cycle_day,
        day_in_phase: cycle_day - (segment.start - 1),
        total_phase_days: segment.len(),
    }
}

pub fn cycle_ring(config: &CycleConfig, today: NaiveDate) -> Vec<RingDay> {
    let current_day = config.current_cycle_day(today);
    (1..=config.cycle_length())
        .map(|day| RingDay {
            day,
            phase: classify_day(config, day),
            is_past: day <= current_day,
            is_current: day == current_day,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn canonical() -> CycleConfig {
        CycleConfig::new(ymd(2024, 1, 1), 28, 5).unwrap()
    }

    fn bounds(segments: &[PhaseSegment; 4]) -> Vec<(CyclePhase, u32, u32)> {
        segments
            .iter()
            .map(|segment| (segment.phase, segment.start, segment.end))
            .collect()
    }

    #[test]
    fn canonical_segments() {
        assert_eq!(
            bounds(&phase_segments(&canonical())),
            vec![
                (CyclePhase::Menstrual, 1, 5),
                (CyclePhase::Follicular, 6, 9),
                (CyclePhase::Ovulation, 10, 15),
                (CyclePhase::Luteal, 16, 28),
            ]
        );
    }

    #[test]
    fn boundary_days_use_first_match() {
        let config = canonical();
        assert_eq!(classify_day(&config, 5), CyclePhase::Menstrual);
        assert_eq!(classify_day(&config, 6), CyclePhase::Follicular);
        assert_eq!(classify_day(&config, 9), CyclePhase::Follicular);
        assert_eq!(classify_day(&config, 10), CyclePhase::Ovulation);
        assert_eq!(classify_day(&config, 15), CyclePhase::Ovulation);
        assert_eq!(classify_day(&config, 16), CyclePhase::Luteal);
        assert_eq!(classify_day(&config, 28), CyclePhase::Luteal);
    }

    #[test]
    fn phase_info_reports_position_within_phase() {
        let config = canonical();
        let info = phase_info(&config, ymd(2024, 1, 10));
        assert_eq!(
            info,
            PhaseInfo {
                phase: CyclePhase::Ovulation,
                cycle_day: 10,
                day_in_phase: 1,
                total_phase_days: 6,
            }
        );

        let luteal = phase_info(&config, ymd(2024, 1, 28));
        assert_eq!(luteal.phase, CyclePhase::Luteal);
        assert_eq!(luteal.day_in_phase, 13);
        assert_eq!(luteal.total_phase_days, 13);

        let menstrual = phase_info(&config, ymd(2024, 1, 3));
        assert_eq!(menstrual.day_in_phase, 3);
        assert_eq!(menstrual.total_phase_days, 5);
    }

    #[test]
    fn short_cycle_skips_collapsed_phases() {
        // fertile start (2) falls inside the period, so follicular never occurs
        let config = CycleConfig::new(ymd(2024, 1, 1), 21, 5).unwrap();
        let segments = phase_segments(&config);
        assert_eq!(
            bounds(&segments),
            vec![
                (CyclePhase::Menstrual, 1, 5),
                (CyclePhase::Follicular, 6, 5),
                (CyclePhase::Ovulation, 6, 8),
                (CyclePhase::Luteal, 9, 21),
            ]
        );
        assert!(segments[1].is_empty());
        assert_eq!(segments[1].len(), 0);
        assert!((1..=21).all(|day| classify_day(&config, day) != CyclePhase::Follicular));
    }

    #[test]
    fn short_cycle_ovulation_starts_right_after_period() {
        let config = CycleConfig::new(ymd(2024, 1, 1), 21, 5).unwrap();
        assert_eq!(
            phase_info(&config, ymd(2024, 1, 6)),
            PhaseInfo {
                phase: CyclePhase::Ovulation,
                cycle_day: 6,
                day_in_phase: 1,
                total_phase_days: 3,
            }
        );
    }

    #[test]
    fn tiny_cycle_keeps_segments_in_range() {
        let config = CycleConfig::new(ymd(2024, 1, 1), 3, 2).unwrap();
        let segments = phase_segments(&config);
        assert_eq!(
            bounds(&segments),
            vec![
                (CyclePhase::Menstrual, 1, 2),
                (CyclePhase::Follicular, 3, 2),
                (CyclePhase::Ovulation, 3, 2),
                (CyclePhase::Luteal, 3, 3),
            ]
        );
        assert_eq!(classify_day(&config, 3), CyclePhase::Luteal);
    }

    #[test]
    fn segments_partition_cycle_and_agree_with_classification() {
        let start = ymd(2024, 1, 1);
        for cycle_length in 2..=60u32 {
            for period_length in 1..cycle_length {
                let config = CycleConfig::new(start, cycle_length, period_length).unwrap();
                let segments = phase_segments(&config);

                let mut expected_start = 1;
                for segment in &segments {
                    assert_eq!(segment.start, expected_start, "gap or overlap in {segments:?}");
                    expected_start = segment.end + 1;
                }
                assert_eq!(expected_start, cycle_length + 1);

                for day in 1..=cycle_length {
                    let containing: Vec<_> =
                        segments.iter().filter(|segment| segment.contains(day)).collect();
                    assert_eq!(containing.len(), 1);
                    assert_eq!(containing[0].phase, classify_day(&config, day));
                }
            }
        }
    }

    #[test]
    fn day_in_phase_is_within_phase_length() {
        let start = ymd(2024, 1, 1);
        for cycle_length in 2..=45u32 {
            for period_length in 1..cycle_length {
                let config = CycleConfig::new(start, cycle_length, period_length).unwrap();
                for offset in 0..i64::from(cycle_length) {
                    let info = phase_info(&config, crate::dates::add_days(start, offset));
                    assert!(info.day_in_phase >= 1);
                    assert!(info.day_in_phase <= info.total_phase_days);
                }
            }
        }
    }

    #[test]
    fn ring_marks_progress_up_to_today() {
        let config = canonical();
        let ring = cycle_ring(&config, ymd(2024, 1, 6));
        assert_eq!(ring.len(), 28);
        assert!(ring[..6].iter().all(|day| day.is_past));
        assert!(ring[6..].iter().all(|day| !day.is_past));
        let current: Vec<_> = ring.iter().filter(|day| day.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].day, 6);
        assert_eq!(current[0].phase, CyclePhase::Follicular);
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CyclePhase::Ovulation).unwrap(),
            "\"ovulation\""
        );
        for phase in CyclePhase::ALL {
            assert_eq!(
                serde_json::to_value(phase).unwrap(),
                serde_json::Value::from(phase.label())
            );
        }
    }
}
