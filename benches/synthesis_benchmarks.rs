//! Performance benchmarks for expense report and application synthesis.
//!
//! This benchmark suite covers each stage of document generation:
//! - Layout of an expense report with 1, 10 and 50 travelers
//! - Full synthesis (layout, styling, pagination) of the same reports
//! - Rendering a synthesized report into an in-memory workbook
//! - Application synthesis
//! - End-to-end `POST /reports` including the file write
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use trip_paperwork::api::{AppState, create_router};
use trip_paperwork::config::{ConfigLoader, Organization, PaperworkConfig};
use trip_paperwork::models::{
    AdditionalCostEntry, ApplicationForm, EmployeeTripEntry, ExtraDutyDays, Traveler,
    TripMetadata,
};
use trip_paperwork::synthesis::{
    layout_expense_report, render_workbook, synthesize_application, synthesize_expense_report,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn issued_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()
}

fn create_trip() -> TripMetadata {
    TripMetadata {
        project_manager: "한영석".to_string(),
        project_name: "해양 환경 모니터링 기술 개발".to_string(),
        destination: "여수".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
        end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        purpose: "부유물 시료 채취".to_string(),
        extra_duty: ExtraDutyDays::new(0, 1, 0).unwrap(),
    }
}

/// Creates `count` priced travelers on the same trip.
fn create_employees(count: usize) -> Vec<EmployeeTripEntry> {
    let trip = create_trip();
    (0..count)
        .map(|i| {
            let rate = Decimal::from(30_000 + (i as i64 % 3) * 10_000);
            let meal = Decimal::from(15_000);
            EmployeeTripEntry {
                employee_name: format!("출장자{:02}", i + 1),
                position: "연구원".to_string(),
                trip_days: 3,
                daily_allowance_rate: rate,
                meal_rate: meal,
                daily_allowance_total: rate * Decimal::from(3),
                meal_total: meal * Decimal::from(3),
                trip: trip.clone(),
            }
        })
        .collect()
}

fn create_costs() -> Vec<AdditionalCostEntry> {
    vec![
        AdditionalCostEntry::new("숙박비", "법인카드", Decimal::from(80_000)),
        AdditionalCostEntry::new("숙박비", "개인카드", Decimal::from(45_000)),
        AdditionalCostEntry::new("주유비", "법인카드\n(3619)", Decimal::from(60_000)),
    ]
}

/// Benchmark: Expense report layout by traveler count.
fn bench_report_layout(c: &mut Criterion) {
    let organization = Organization::default();
    let costs = create_costs();

    let mut group = c.benchmark_group("report_layout");
    for count in [1, 10, 50] {
        let employees = create_employees(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &employees, |b, employees| {
            b.iter(|| {
                black_box(layout_expense_report(
                    black_box(employees),
                    black_box(&costs),
                    &organization,
                    issued_on(),
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: Full expense report synthesis by traveler count.
fn bench_report_synthesis(c: &mut Criterion) {
    let organization = Organization::default();
    let costs = create_costs();

    let mut group = c.benchmark_group("report_synthesis");
    for count in [1, 10, 50] {
        let employees = create_employees(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &employees, |b, employees| {
            b.iter(|| {
                black_box(synthesize_expense_report(
                    black_box(employees),
                    black_box(&costs),
                    &organization,
                    issued_on(),
                ))
            })
        });
    }
    group.finish();
}

/// Benchmark: Rendering a 10-traveler report into an xlsx buffer.
fn bench_render_workbook(c: &mut Criterion) {
    let config = PaperworkConfig::default();
    let document = synthesize_expense_report(
        &create_employees(10),
        &create_costs(),
        &config.organization,
        issued_on(),
    );

    c.bench_function("render_workbook_10", |b| {
        b.iter(|| {
            let mut workbook = render_workbook(black_box(&document), &config.font_name).unwrap();
            black_box(workbook.save_to_buffer().unwrap())
        })
    });
}

/// Benchmark: Application synthesis with a full traveler table.
fn bench_application_synthesis(c: &mut Criterion) {
    let organization = Organization::default();
    let form = ApplicationForm {
        project_manager: "김병모".to_string(),
        project_name: "연안 수질 조사 용역".to_string(),
        destination: "군산".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 10, 14).unwrap(),
        purpose: "수질 측정".to_string(),
        company_car: "스타렉스 - 81서0873".to_string(),
        public_transport: String::new(),
        travelers: (0..8)
            .map(|i| Traveler {
                position: "연구원".to_string(),
                name: format!("출장자{i}"),
                account: "급여 계좌".to_string(),
                note: String::new(),
            })
            .collect(),
    };

    c.bench_function("application_synthesis", |b| {
        b.iter(|| black_box(synthesize_application(black_box(&form), &organization, issued_on())))
    });
}

/// Benchmark: `POST /reports` through the router, including the file write.
fn bench_report_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut config = ConfigLoader::load("./config")
        .expect("Failed to load config")
        .into_config();
    config.output_dir = dir.path().join("output");
    config.option_store = dir.path().join("options.json");
    let state = AppState::load(ConfigLoader::from_config(config)).expect("Failed to load state");
    let router = create_router(state);

    let body = serde_json::json!({
        "trip": serde_json::to_value(create_trip()).unwrap(),
        "employees": ["김민수", "이서연", "박지훈", "최유진"],
        "additional_costs": [
            {"item": "숙박비", "payment_method": "법인카드", "amount": "320000"}
        ],
        "issued_on": "2025-09-05"
    })
    .to_string();

    c.bench_function("report_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/reports")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_report_layout,
    bench_report_synthesis,
    bench_render_workbook,
    bench_application_synthesis,
    bench_report_endpoint,
);

criterion_main!(benches);
