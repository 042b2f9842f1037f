use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// (code, name, latitude, longitude, population in millions)
const COUNTRIES: &[(&str, &str, f64, f64, f64)] = &[
    ("CHN", "China", 35.0, 105.0, 1410.0),
    ("IND", "India", 21.0, 78.0, 1420.0),
    ("USA", "United States", 38.0, -97.0, 333.0),
    ("IDN", "Indonesia", -5.0, 120.0, 276.0),
    ("BRA", "Brazil", -10.0, -55.0, 215.0),
    ("NGA", "Nigeria", 10.0, 8.0, 218.0),
    ("RUS", "Russia", 60.0, 100.0, 144.0),
    ("MEX", "Mexico", 23.0, -102.0, 128.0),
    ("JPN", "Japan", 36.0, 138.0, 125.0),
    ("DEU", "Germany", 51.0, 9.0, 84.0),
    ("FRA", "France", 46.0, 2.0, 68.0),
    ("GBR", "United Kingdom", 54.0, -2.0, 67.0),
    ("ZAF", "South Africa", -29.0, 24.0, 60.0),
    ("ARG", "Argentina", -34.0, -64.0, 46.0),
    ("CAN", "Canada", 60.0, -95.0, 39.0),
    ("AUS", "Australia", -27.0, 133.0, 26.0),
    ("NZL", "New Zealand", -41.0, 174.0, 5.1),
    ("ISL", "Iceland", 65.0, -18.0, 0.4),
];

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

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

struct Row {
    country: String,
    name: String,
    latitude: f64,
    longitude: f64,
    m1: f64,
    m2: f64,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // m1: visits per million inhabitants, m2: population in millions.
    let mut rows: Vec<Row> = COUNTRIES
        .iter()
        .map(|&(code, name, lat, lon, population)| Row {
            country: code.to_string(),
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            m1: (rng.uniform(5.0, 500.0) * 10.0).round() / 10.0,
            m2: population,
        })
        .collect();

    // Unattributed traffic, excluded from the map by its sentinel code.
    rows.push(Row {
        country: "XXX".to_string(),
        name: "Unknown".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        m1: rng.uniform(0.0, 50.0).round(),
        m2: 0.0,
    });

    // The viewer centres the map on the first row.
    rows.sort_by(|a, b| b.m1.total_cmp(&a.m1));

    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("m1", DataType::Float64, false),
        Field::new("m2", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.country.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.longitude))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.name.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.m1))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.m2))),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_world.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} country rows to {output_path}", rows.len());
    Ok(())
}
