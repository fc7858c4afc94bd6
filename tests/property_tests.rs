//! Property-based tests for rust_tracelog using proptest

use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rust_tracelog::prelude::*;
use rust_tracelog::MAX_MESSAGE_CHARS;
use std::collections::HashSet;

fn mock_store(groups: usize, spans: usize, messages: usize) -> (Tracelog, MockClock) {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 8, 10, 0, 0)
        .single()
        .expect("valid datetime");
    let clock = MockClock::new(start);
    let tracelog = Tracelog::builder()
        .num_groups(groups)
        .num_spans(spans)
        .num_messages(messages)
        .clock(clock.clone())
        .build();
    (tracelog, clock)
}

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

/// One write: group index, span index, level, message index, clock advance in ms.
fn write_strategy() -> impl Strategy<Value = (u8, u8, LogLevel, u8, u16)> {
    (0u8..6, 0u8..6, level_strategy(), 0u8..8, 0u16..1500)
}

// ============================================================================
// Capacity and consistency
// ============================================================================

proptest! {
    /// Any sequence of writes leaves the store within capacity and with
    /// consistent indexes. Zero clock advances exercise timestamp ties.
    #[test]
    fn test_invariants_hold_after_any_writes(
        groups in 1usize..4,
        spans in 1usize..4,
        messages in 1usize..4,
        writes in prop::collection::vec(write_strategy(), 1..120),
    ) {
        let (tracelog, clock) = mock_store(groups, spans, messages);

        for (g, s, level, m, advance) in writes {
            tracelog.write(&format!("g{}", g), &format!("s{}", s), level, format!("m{}", m));
            prop_assert!(tracelog.check_invariants().is_ok());
            clock.advance(TimeDelta::milliseconds(i64::from(advance % 3)));
        }
    }

    /// The group and span just written always survive that write.
    #[test]
    fn test_write_never_evicts_its_target(
        writes in prop::collection::vec(write_strategy(), 1..80),
    ) {
        let (tracelog, clock) = mock_store(2, 2, 2);

        for (g, s, level, m, advance) in writes {
            let group = format!("g{}", g);
            let span = format!("s{}", s);
            let message = format!("m{}", m);
            tracelog.write(&group, &span, level, message.clone());

            prop_assert!(tracelog.list_groups().contains(&group));
            prop_assert!(tracelog.list_spans(&group).contains(&span));
            let spans = tracelog.entries(&group);
            let newest = &spans[0][0];
            prop_assert_eq!(&newest.span, &span);
            prop_assert_eq!(&newest.message, &message);
            prop_assert_eq!(newest.level, level);

            // Strictly increasing time so the written span is the newest.
            clock.advance(TimeDelta::milliseconds(i64::from(advance) + 1));
        }
    }

    /// Distinct writes that fit within capacity are all kept once.
    #[test]
    fn test_distinct_writes_within_capacity_are_kept(
        writes in prop::collection::hash_set((0u8..3, 0u8..3, 0u8..6), 1..30),
    ) {
        let (tracelog, clock) = mock_store(3, 3, 6);

        for (g, s, m) in &writes {
            tracelog.write(&format!("g{}", g), &format!("s{}", s), LogLevel::Info, format!("m{}", m));
            clock.advance(TimeDelta::milliseconds(5));
        }

        let mut seen = HashSet::new();
        for group in tracelog.list_groups() {
            for entry in tracelog.entries(&group).into_iter().flatten() {
                prop_assert_eq!(entry.count, 1);
                seen.insert((entry.group, entry.span, entry.message));
            }
        }

        let expected: HashSet<_> = writes
            .iter()
            .map(|(g, s, m)| (format!("g{}", g), format!("s{}", s), format!("m{}", m)))
            .collect();
        prop_assert_eq!(seen, expected);
    }
}

// ============================================================================
// Deduplication and message handling
// ============================================================================

proptest! {
    /// Writing the same message N times yields one entry counted N times,
    /// stamped with the time of the last write.
    #[test]
    fn test_repeats_collapse_into_count(
        repeats in 1u32..200,
        level in level_strategy(),
        message in "[a-z ]{1,40}",
    ) {
        let (tracelog, clock) = mock_store(2, 2, 4);

        let mut last = clock.now();
        for _ in 0..repeats {
            last = clock.now();
            tracelog.write("g", "s", level, message.clone());
            clock.advance(TimeDelta::milliseconds(3));
        }

        let spans = tracelog.entries("g");
        prop_assert_eq!(spans.len(), 1);
        prop_assert_eq!(spans[0].len(), 1);
        prop_assert_eq!(spans[0][0].count, repeats);
        prop_assert_eq!(spans[0][0].timestamp, last);
    }

    /// Stored messages are the formatted input clamped to 1000 characters.
    #[test]
    fn test_message_is_clamped(message in "\\PC{1,1300}") {
        let tracelog = Tracelog::new();
        tracelog.write("g", "s", LogLevel::Info, message.clone());

        let spans = tracelog.entries("g");
        let stored = &spans[0][0].message;
        let expected: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        prop_assert_eq!(stored, &expected);
    }

    /// Projected lines carry a count suffix only for repeated messages.
    #[test]
    fn test_projection_suffix_matches_count(repeats in 1u32..6) {
        let (tracelog, _) = mock_store(2, 2, 4);
        for _ in 0..repeats {
            tracelog.write("g", "s", LogLevel::Warn, "again");
        }

        let view = tracelog.project("UTC", true, "", "");
        let line = &view["g"]["s"][0];
        let suffix = format!(" [x{}]", repeats);
        prop_assert_eq!(line.ends_with(&suffix), repeats > 1);
        prop_assert!(line.contains("[WARN] again"));
    }
}

// ============================================================================
// LogLevel
// ============================================================================

proptest! {
    /// LogLevel string conversions roundtrip, case-insensitively
    #[test]
    fn test_log_level_str_roundtrip(level in level_strategy(), lower in any::<bool>()) {
        let text = if lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }
}
