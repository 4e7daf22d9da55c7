use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use employee_insight::data::labels::DEPARTMENT_LABELS;
use employee_insight::features::feature_names;
use employee_insight::predictor::LinearModel;

/// Write a synthetic employee dataset and a matching model artifact.
#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(version)]
struct Cli {
    /// Number of employees
    #[arg(long, default_value_t = 500)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Dataset output (.csv); a .parquet copy is written next to it
    #[arg(long, default_value = employee_insight::config::DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[arg(long, default_value = employee_insight::config::DEFAULT_MODEL_PATH)]
    model: PathBuf,
}

const JOB_TITLES: [&str; 7] = [
    "Analyst",
    "Developer",
    "Consultant",
    "Engineer",
    "Manager",
    "Specialist",
    "Technician",
];

/// Weights of the process that generates `Performance_Score`. The model
/// artifact carries the same weights.
const INTERCEPT: f64 = 1.2;
const WEIGHTS: [(&str, f64); 4] = [
    ("Training_Hours", 0.015),
    ("Employee_Satisfaction_Score", 0.35),
    ("Overtime_Hours", -0.03),
    ("Promotions", 0.1),
];

struct Employee {
    id: i64,
    department: i64,
    gender: &'static str,
    age: i64,
    job_title: &'static str,
    hire_date: NaiveDate,
    years_at_company: i64,
    performance: i64,
    monthly_salary: f64,
    work_hours: i64,
    projects: i64,
    overtime: i64,
    sick_days: i64,
    remote: i64,
    team_size: i64,
    training: i64,
    promotions: i64,
    satisfaction: f64,
    productivity: f64,
}

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(1e-15..1.0);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn generate_employee(id: i64, as_of: NaiveDate, rng: &mut StdRng) -> Employee {
    let age = rng.gen_range(22..=60);
    let years_at_company = rng.gen_range(0..=(age - 21).min(10));
    let hire_date = as_of - Duration::days(years_at_company * 365 + rng.gen_range(0..365));
    let gender = match rng.gen_range(0..100) {
        0..=47 => "Male",
        48..=95 => "Female",
        _ => "Other",
    };

    let overtime = rng.gen_range(0..30);
    let training = rng.gen_range(0..100);
    let promotions = rng.gen_range(0..=2);
    let satisfaction = (rng.gen_range(1.0..5.0_f64) * 100.0).round() / 100.0;

    let inputs = [training as f64, satisfaction, overtime as f64, promotions as f64];
    let latent = INTERCEPT
        + WEIGHTS
            .iter()
            .zip(inputs)
            .map(|((_, w), x)| w * x)
            .sum::<f64>()
        + gauss(rng, 0.0, 0.4);
    let performance = latent.round().clamp(1.0, 5.0) as i64;
    let productivity =
        ((50.0 + 8.0 * performance as f64 + gauss(rng, 0.0, 8.0)).clamp(0.0, 100.0) * 10.0)
            .round()
            / 10.0;

    Employee {
        id,
        department: rng.gen_range(0..DEPARTMENT_LABELS.len() as i64),
        gender,
        age,
        job_title: JOB_TITLES[rng.gen_range(0..JOB_TITLES.len())],
        hire_date,
        years_at_company,
        performance,
        monthly_salary: (3000.0 + 400.0 * years_at_company as f64 + gauss(rng, 0.0, 500.0))
            .max(1500.0)
            .round(),
        work_hours: rng.gen_range(30..=60),
        projects: rng.gen_range(0..50),
        overtime,
        sick_days: rng.gen_range(0..15),
        remote: [0, 25, 50, 75, 100][rng.gen_range(0..5)],
        team_size: rng.gen_range(1..=20),
        training,
        promotions,
        satisfaction,
        productivity,
    }
}

const HEADER: [&str; 19] = [
    "Employee_ID",
    "Department",
    "Gender",
    "Age",
    "Job_Title",
    "Hire_Date",
    "Years_At_Company",
    "Performance_Score",
    "Monthly_Salary",
    "Work_Hours_Per_Week",
    "Projects_Handled",
    "Overtime_Hours",
    "Sick_Days",
    "Remote_Work_Frequency",
    "Team_Size",
    "Training_Hours",
    "Promotions",
    "Employee_Satisfaction_Score",
    "Productivity_Score",
];

fn write_csv(path: &Path, employees: &[Employee]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for e in employees {
        writer.write_record([
            e.id.to_string(),
            e.department.to_string(),
            e.gender.to_string(),
            e.age.to_string(),
            e.job_title.to_string(),
            e.hire_date.format("%Y-%m-%d").to_string(),
            e.years_at_company.to_string(),
            e.performance.to_string(),
            format!("{:.1}", e.monthly_salary),
            e.work_hours.to_string(),
            e.projects.to_string(),
            e.overtime.to_string(),
            e.sick_days.to_string(),
            e.remote.to_string(),
            e.team_size.to_string(),
            e.training.to_string(),
            e.promotions.to_string(),
            format!("{:.2}", e.satisfaction),
            format!("{:.1}", e.productivity),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, employees: &[Employee]) -> Result<()> {
    let int = |f: fn(&Employee) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Employee) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(employees.iter().map(f).collect::<Vec<_>>()))
    };
    let text = |f: fn(&Employee) -> String| -> ArrayRef {
        Arc::new(StringArray::from(employees.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        int(|e| e.id),
        int(|e| e.department),
        text(|e| e.gender.to_string()),
        int(|e| e.age),
        text(|e| e.job_title.to_string()),
        text(|e| e.hire_date.format("%Y-%m-%d").to_string()),
        int(|e| e.years_at_company),
        int(|e| e.performance),
        float(|e| e.monthly_salary),
        int(|e| e.work_hours),
        int(|e| e.projects),
        int(|e| e.overtime),
        int(|e| e.sick_days),
        int(|e| e.remote),
        int(|e| e.team_size),
        int(|e| e.training),
        int(|e| e.promotions),
        float(|e| e.satisfaction),
        float(|e| e.productivity),
    ];
    let schema = Arc::new(Schema::new(
        HEADER
            .iter()
            .zip(&columns)
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn model() -> LinearModel {
    let names = feature_names();
    let coefficients = names
        .iter()
        .map(|n| {
            WEIGHTS
                .iter()
                .find(|(w, _)| w == n)
                .map_or(0.0, |(_, v)| *v)
        })
        .collect();
    LinearModel {
        feature_names: names.iter().map(|s| s.to_string()).collect(),
        coefficients,
        intercept: INTERCEPT,
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).context("invalid reference date")?;

    let employees: Vec<Employee> = (1..=cli.rows as i64)
        .map(|id| generate_employee(id, as_of, &mut rng))
        .collect();

    ensure_parent(&cli.data)?;
    write_csv(&cli.data, &employees).with_context(|| format!("writing {}", cli.data.display()))?;
    let parquet_path = cli.data.with_extension("parquet");
    write_parquet(&parquet_path, &employees)
        .with_context(|| format!("writing {}", parquet_path.display()))?;

    ensure_parent(&cli.model)?;
    let json = serde_json::to_string_pretty(&model())?;
    fs::write(&cli.model, json).with_context(|| format!("writing {}", cli.model.display()))?;

    println!(
        "Wrote {} employees to {} and {}, model to {}",
        employees.len(),
        cli.data.display(),
        parquet_path.display(),
        cli.model.display()
    );
    Ok(())
}
