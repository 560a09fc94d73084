use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use salary_gap::data::model::SurveyRecord;

/// (currency, base yearly salary, respondents)
const CURRENCIES: [(&str, f64, usize); 4] = [
    ("EUR", 42_000.0, 400),
    ("USD", 65_000.0, 600),
    ("GBP", 38_000.0, 150),
    ("CHF", 80_000.0, 4),
];

/// Box-Muller transform for a standard normal draw.
fn gauss(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn respondent(rng: &mut StdRng, currency: &str, base: f64) -> SurveyRecord {
    let years = (rng.gen_range(0.0_f64..25.0) * 2.0).round() / 2.0;
    // ~4% raise per year of experience, log-normal spread.
    let salary = base * (1.0 + 0.04 * years) * (0.25 * gauss(rng)).exp();
    let mut record = SurveyRecord::new(salary.round(), years, currency);

    // Sprinkle the kinds of rows cleaning has to drop.
    match rng.gen_range(0..100) {
        0 => record.salary = None,
        1 => record.years_experience = None,
        2 => record.salary = Some(0.0),
        3 => record.years_experience = Some(-1.0),
        _ => {}
    }
    record
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "DATA.csv".to_string());
    let mut rng = StdRng::seed_from_u64(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0;
    for (currency, base, count) in CURRENCIES {
        for _ in 0..count {
            writer.serialize(respondent(&mut rng, currency, base))?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} survey responses to {output_path}");
    Ok(())
}
