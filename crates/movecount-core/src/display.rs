//! Text rendering of a counter record.
//!
//! Pure data-to-string formatting; layout, fonts and screen regions are the
//! host's business. Lines are empty until the value they describe exists, so
//! hosts can blank the corresponding region.

use crate::counter::{ClockTime, CounterRecord, CUTOFF_HOUR, TARGET_COUNT};

/// `"7 Movements"`.
pub fn count_line(record: &CounterRecord) -> String {
    format!("{} Movements", record.move_count)
}

/// `"#10: 14h05"` once the target is reached, empty below it.
///
/// A target reached at exactly midnight shows `0h00`, matching the persisted
/// form where midnight and "unset" share an encoding.
pub fn target_line(record: &CounterRecord) -> String {
    if !record.target_reached() {
        return String::new();
    }
    let t = record.target_time.unwrap_or(ClockTime::new(0, 0));
    format!("#{}: {}h{:02}", TARGET_COUNT, t.hour, t.minute)
}

/// `"@21h: #9"` once the cutoff snapshot is captured, empty before.
pub fn cutoff_line(record: &CounterRecord) -> String {
    match record.cutoff_count {
        Some(count) => format!("@{}h: #{}", CUTOFF_HOUR, count),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_line_formats_count() {
        let record = CounterRecord {
            move_count: 7,
            ..Default::default()
        };
        assert_eq!(count_line(&record), "7 Movements");
    }

    #[test]
    fn target_line_empty_below_target() {
        let record = CounterRecord {
            move_count: TARGET_COUNT - 1,
            ..Default::default()
        };
        assert_eq!(target_line(&record), "");
    }

    #[test]
    fn target_line_zero_pads_minutes() {
        let record = CounterRecord {
            move_count: TARGET_COUNT,
            target_time: Some(ClockTime::new(14, 5)),
            ..Default::default()
        };
        assert_eq!(target_line(&record), "#10: 14h05");
    }

    #[test]
    fn target_line_midnight_fallback() {
        let record = CounterRecord {
            move_count: TARGET_COUNT,
            target_time: None,
            ..Default::default()
        };
        assert_eq!(target_line(&record), "#10: 0h00");
    }

    #[test]
    fn cutoff_line_empty_until_captured() {
        let mut record = CounterRecord::default();
        assert_eq!(cutoff_line(&record), "");
        record.cutoff_count = Some(9);
        assert_eq!(cutoff_line(&record), "@21h: #9");
    }
}
