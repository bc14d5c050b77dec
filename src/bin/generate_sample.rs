//! Generates the two sample artifacts the dashboard loads at startup:
//! `salary_dataset.csv` and `gradient_boosting_model.json`. Deterministic,
//! so regenerating produces identical files.

use serde_json::json;

const DATASET_PATH: &str = "salary_dataset.csv";
const MODEL_PATH: &str = "gradient_boosting_model.json";
const RECORDS: usize = 200;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    /// Box-Muller normal sample.
    fn gauss(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mu + sigma * z
    }
}

const DEPARTMENTS: [&str; 5] = ["Engineering", "Sales", "HR", "Finance", "Marketing"];

fn write_dataset(rng: &mut SimpleRng) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(DATASET_PATH)?;
    writer.write_record(["Age", "Year of Experience", "Current Salary", "Department"])?;

    for _ in 0..RECORDS {
        let age = rng.range(21, 60);
        let max_experience = (age - 21).min(40);
        let experience = if max_experience == 0 {
            0
        } else {
            rng.range(0, max_experience)
        };
        let salary = (26000.0
            + 2450.0 * experience as f64
            + 310.0 * age as f64
            + rng.gauss(0.0, 4000.0))
        .max(18000.0);
        let department = DEPARTMENTS[(rng.next_u64() % DEPARTMENTS.len() as u64) as usize];

        writer.write_record([
            age.to_string(),
            experience.to_string(),
            format!("{salary:.2}"),
            department.to_string(),
        ])?;
    }
    writer.flush()?;
    println!("wrote {DATASET_PATH} ({RECORDS} records)");
    Ok(())
}

/// A small hand-built ensemble approximating the salary curve of the
/// generated dataset. Stand-in for a real fitted export, good enough to
/// drive the dashboard.
fn write_model() -> Result<(), Box<dyn std::error::Error>> {
    let experience_tree = |threshold: f64, low: f64, high: f64| {
        json!({
            "nodes": [
                {"feature": 1, "threshold": threshold, "left": 1, "right": 2},
                {"value": low},
                {"value": high}
            ]
        })
    };
    let age_tree = |threshold: f64, low: f64, high: f64| {
        json!({
            "nodes": [
                {"feature": 0, "threshold": threshold, "left": 1, "right": 2},
                {"value": low},
                {"value": high}
            ]
        })
    };

    let artifact = json!({
        "feature_names": ["Age", "Year of Experience"],
        "init_prediction": 38000.0,
        "learning_rate": 1.0,
        "trees": [
            experience_tree(5.0, -6000.0, 9000.0),
            experience_tree(15.0, -4000.0, 22000.0),
            experience_tree(30.0, -2000.0, 30000.0),
            age_tree(30.0, -3000.0, 2500.0),
            age_tree(45.0, -1000.0, 4000.0)
        ]
    });

    std::fs::write(MODEL_PATH, serde_json::to_string_pretty(&artifact)?)?;
    println!("wrote {MODEL_PATH}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);
    write_dataset(&mut rng)?;
    write_model()?;
    Ok(())
}
