//! Property-based invariant tests for geometry and the dismissal timer.
//!
//! 1. Intersection is commutative and fits within both inputs.
//! 2. Bounding boxes agree with the rectangle they were taken from.
//! 3. A dismissal timer fires at most once per schedule.
//! 4. A cancelled or superseded deadline never fires.
//! 5. A deadline fires on the first poll at or after `schedule + delay`.

use std::time::{Duration, Instant};

use mlui_core::dismiss::DismissTimer;
use mlui_core::geometry::{BoundingBox, Rect};
use proptest::prelude::*;

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Schedule,
    Cancel,
    Poll,
}

fn op_strategy() -> impl Strategy<Value = (Op, u64)> {
    (
        prop_oneof![Just(Op::Schedule), Just(Op::Cancel), Just(Op::Poll)],
        0u64..80,
    )
}

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        if let Some(i) = a.intersection_opt(&b) {
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn bounding_box_matches_rect(r in small_rect_strategy()) {
        let bbox = BoundingBox::from(r);
        prop_assert_eq!(bbox.bottom(), i32::from(r.bottom()));
        prop_assert_eq!(bbox.right(), i32::from(r.right()));
    }

    #[test]
    fn timer_fires_at_most_once_per_schedule(
        delay_ms in 0u64..200,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let start = Instant::now();
        let delay = Duration::from_millis(delay_ms);
        let mut timer = DismissTimer::new(delay);
        let mut now = start;
        let mut live_deadline: Option<Instant> = None;
        let mut schedules = 0u64;

        for (op, advance) in ops {
            now += Duration::from_millis(advance);
            match op {
                Op::Schedule => {
                    timer.schedule(now);
                    live_deadline = Some(now + delay);
                    schedules += 1;
                }
                Op::Cancel => {
                    let was_pending = timer.cancel();
                    prop_assert_eq!(was_pending, live_deadline.is_some());
                    live_deadline = None;
                }
                Op::Poll => {
                    let fired = timer.poll(now);
                    let expected = live_deadline.is_some_and(|d| now >= d);
                    prop_assert_eq!(fired, expected);
                    if fired {
                        live_deadline = None;
                    }
                }
            }
            prop_assert_eq!(timer.is_pending(), live_deadline.is_some());
        }

        prop_assert!(timer.fired_count() <= schedules);
    }
}
