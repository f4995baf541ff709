#![forbid(unsafe_code)]
use garde::{
    model::{Capability, RoleLabel, Worker, WorkerId},
    scheduler::{RotationOptions, SchedError, Scheduler, Shortfall, ShortfallKind},
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn run_small_roster() {
    let mut s = Scheduler::new(RotationOptions {
        horizon_weeks: 1,
        ..RotationOptions::default()
    })
    .unwrap();
    s.add_workers(vec![
        Worker::new("a", "Alice", [Capability::Charge, Capability::Generic]),
        Worker::new("b", "Bob", [Capability::Charge, Capability::Specialist]),
        Worker::new("c", "Carol", [Capability::Generic]),
    ])
    .unwrap();

    let outcome = s.run();
    let plan = &outcome.plan;
    assert_eq!(plan.weeks.len(), 1);

    let day1 = plan.day_at(1).unwrap();
    assert_eq!(plan.weeks[0].day(1), Some(day1));
    assert_eq!(plan.weeks[0].day(8), None);
    assert_eq!(day1.holder_of(RoleLabel::Charge), Some(&WorkerId::new("a")));
    assert_eq!(day1.holder_of(RoleLabel::BackupCharge), Some(&WorkerId::new("b")));
    assert_eq!(day1.holder_of(RoleLabel::Specialist), None);
    assert_eq!(day1.role_of(&WorkerId::new("c")), Some(RoleLabel::Generic));

    // 3 membres × plafond 3 = 9 jours au total sur la semaine
    let total: u32 = outcome.report.workers.iter().map(|w| w.total_days).sum();
    assert_eq!(total, 9);
    assert!(s.detect_violations(plan).is_empty());
}

#[test]
fn invalid_options_are_rejected() {
    let horizon = Scheduler::new(RotationOptions {
        horizon_weeks: 0,
        ..RotationOptions::default()
    });
    assert!(matches!(horizon, Err(SchedError::InvalidHorizon(0))));

    let cap = Scheduler::new(RotationOptions {
        weekly_cap: 0,
        ..RotationOptions::default()
    });
    assert!(matches!(cap, Err(SchedError::InvalidWeeklyCap)));

    let slots = Scheduler::new(RotationOptions {
        slots_per_day: 2,
        ..RotationOptions::default()
    });
    assert!(matches!(slots, Err(SchedError::InvalidSlotsPerDay(2))));

    let eps = Scheduler::new(RotationOptions {
        epsilon: 0.0,
        ..RotationOptions::default()
    });
    assert!(matches!(eps, Err(SchedError::InvalidScoring(_))));
}

#[test]
fn leave_requires_start_date() {
    let mut s = Scheduler::new(RotationOptions::default()).unwrap();
    s.add_workers(vec![Worker::new("a", "Alice", [Capability::Generic])])
        .unwrap();

    let err = s
        .add_leave(&WorkerId::new("a"), date(2024, 9, 24), date(2024, 9, 26))
        .unwrap_err();
    assert!(matches!(err, SchedError::MissingStartDate));
    insta::assert_snapshot!(err.to_string(), @"start date must be set before registering leave");
}

#[test]
fn leave_outside_horizon_is_dropped() {
    let mut s = Scheduler::new(RotationOptions::default()).unwrap();
    s.add_workers(vec![Worker::new("a", "Alice", [Capability::Generic])])
        .unwrap();
    s.set_start_date(date(2024, 9, 22)).unwrap();

    let a = WorkerId::new("a");
    // avant le départ : rien
    assert_eq!(s.add_leave(&a, date(2024, 9, 1), date(2024, 9, 21)).unwrap(), 0);
    // à cheval sur la fin (jour 42 = 2024-11-02)
    assert_eq!(s.add_leave(&a, date(2024, 11, 1), date(2024, 11, 10)).unwrap(), 2);
    assert!(s.leave().is_on_leave(&a, 41));
    assert!(s.leave().is_on_leave(&a, 42));
    assert!(!s.leave().is_on_leave(&a, 40));

    let requests = s.leave().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].offsets.iter().copied().collect::<Vec<_>>(), vec![41, 42]);

    assert!(matches!(
        s.add_leave(&a, date(2024, 9, 26), date(2024, 9, 24)),
        Err(SchedError::InvalidDateRange)
    ));
}

#[test]
fn open_ended_leave_is_clamped_to_horizon() {
    let mut s = Scheduler::new(RotationOptions::default()).unwrap();
    s.add_workers(vec![Worker::new("a", "Alice", [Capability::Generic])])
        .unwrap();
    s.set_start_date(date(2024, 9, 22)).unwrap();

    let a = WorkerId::new("a");
    assert_eq!(s.add_leave(&a, date(2024, 9, 1), NaiveDate::MAX).unwrap(), 42);
    assert!(s.leave().is_on_leave(&a, 1));
    assert!(s.leave().is_on_leave(&a, 42));
    assert!(!s.leave().is_on_leave(&a, 43));

    // plage entièrement après l'horizon
    assert_eq!(s.add_leave(&a, date(2030, 1, 1), NaiveDate::MAX).unwrap(), 0);
}

#[test]
fn start_date_is_locked_once_leave_exists() {
    let mut s = Scheduler::new(RotationOptions::default()).unwrap();
    s.add_workers(vec![Worker::new("a", "Alice", [Capability::Generic])])
        .unwrap();
    s.set_start_date(date(2024, 9, 22)).unwrap();
    // aucun congé encore : la date reste modifiable
    s.set_start_date(date(2024, 9, 15)).unwrap();
    s.set_start_date(date(2024, 9, 22)).unwrap();

    s.add_leave(&WorkerId::new("a"), date(2024, 9, 24), date(2024, 9, 24))
        .unwrap();
    let err = s.set_start_date(date(2024, 9, 29)).unwrap_err();
    assert!(matches!(err, SchedError::StartDateLocked));
    insta::assert_snapshot!(err.to_string(), @"start date cannot change once leave is registered");

    s.set_start_date(date(2024, 9, 22)).unwrap();
    assert_eq!(s.leave().start_date(), Some(date(2024, 9, 22)));
    assert!(s.leave().is_on_leave(&WorkerId::new("a"), 3));
}

#[test]
fn roster_validation() {
    let mut s = Scheduler::new(RotationOptions::default()).unwrap();
    s.add_workers(vec![Worker::new("a", "Alice", [Capability::Generic])])
        .unwrap();

    let dup = s.add_workers(vec![Worker::new("a", "Other", [Capability::Generic])]);
    assert!(matches!(dup, Err(SchedError::DuplicateWorker(id)) if id == "a"));

    let bad_day = s.add_workers(vec![
        Worker::new("b", "Bob", [Capability::Generic]).with_fixed_weekdays([1, 8])
    ]);
    assert!(matches!(bad_day, Err(SchedError::InvalidWeekday { day: 8, .. })));
    assert_eq!(s.workers().len(), 1);

    s.set_start_date(date(2024, 9, 22)).unwrap();
    let unknown = s.add_leave(&WorkerId::new("zz"), date(2024, 9, 24), date(2024, 9, 24));
    assert!(matches!(unknown, Err(SchedError::UnknownWorker(id)) if id == "zz"));
}

#[test]
fn shortfall_messages() {
    let gap = Shortfall {
        week: 1,
        day: 3,
        offset: 3,
        kind: ShortfallKind::CoverageGap {
            role: RoleLabel::Specialist,
        },
    };
    insta::assert_snapshot!(gap.to_string(), @"week 1 day 3 (offset 3): no candidate for specialist");

    let short = Shortfall {
        week: 2,
        day: 7,
        offset: 14,
        kind: ShortfallKind::Exhaustion {
            filled: 4,
            target: 6,
        },
    };
    insta::assert_snapshot!(short.to_string(), @"week 2 day 7 (offset 14): understaffed, 4/6 slots filled");
}
