//! Criterion benchmarks for the payroll calculations.
//!
//! Benchmarks the tip pool allocator and the break penalty detector over a
//! synthetic two-week timesheet for a large store roster.

use chrono::{Days, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::calculation::{allocate_tips, detect_break_penalties};
use payroll_engine::config::{BreakPolicy, EligibilityRule};
use payroll_engine::models::{DailyTipTotal, EmployeeProfile, TimesheetEntry};

const EMPLOYEES: usize = 150;
const DAYS: u64 = 14;

fn synthetic_profiles() -> Vec<EmployeeProfile> {
    (0..EMPLOYEES)
        .map(|i| EmployeeProfile {
            employee_key: format!("gus_{:04}", i),
            name: format!("Worker {}", i),
            job_title: if i % 10 == 0 { "Trainee" } else { "Barista" }.to_string(),
            hourly_rate: Decimal::new(2000 + (i as i64 % 7) * 25, 2),
            sick_leave_hours: Decimal::ZERO,
        })
        .collect()
}

fn synthetic_timesheet(profiles: &[EmployeeProfile]) -> Vec<TimesheetEntry> {
    let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let mut entries = Vec::new();
    for day in 0..DAYS {
        let date = start + Days::new(day);
        for (i, profile) in profiles.iter().enumerate() {
            // Staggered shift lengths between 4 and 10.75 hours
            let quarter_hours = 16 + ((i as u64 + day) % 28) as i64;
            entries.push(TimesheetEntry {
                employee_key: profile.employee_key.clone(),
                date,
                clock_in: "8:00AM".to_string(),
                clock_out: "6:45PM".to_string(),
                break_reported: Decimal::new(30, 0),
                regular_hours: Decimal::new(quarter_hours, 0) / Decimal::new(4, 0),
                overtime_hours: Decimal::ZERO,
                double_overtime_hours: Decimal::ZERO,
            });
        }
    }
    entries
}

fn synthetic_tips() -> Vec<DailyTipTotal> {
    let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    (0..DAYS)
        .map(|day| DailyTipTotal {
            date: start + Days::new(day),
            amount: Decimal::new(80_000 + (day as i64) * 1_337, 2),
        })
        .collect()
}

fn bench_tip_allocation(c: &mut Criterion) {
    let profiles = synthetic_profiles();
    let entries = synthetic_timesheet(&profiles);
    let tips = synthetic_tips();
    let rule = EligibilityRule::default();

    c.bench_function("allocate_tips_150_employees_14_days", |b| {
        b.iter(|| {
            allocate_tips(
                black_box(&tips),
                black_box(&entries),
                black_box(&profiles),
                black_box(&rule),
            )
            .unwrap()
        })
    });
}

fn bench_break_detection(c: &mut Criterion) {
    let profiles = synthetic_profiles();
    let entries = synthetic_timesheet(&profiles);
    let policy = BreakPolicy::default();

    c.bench_function("detect_break_penalties_150_employees_14_days", |b| {
        b.iter(|| detect_break_penalties(black_box(&entries), black_box(&policy)))
    });
}

criterion_group!(benches, bench_tip_allocation, bench_break_detection);
criterion_main!(benches);
