use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const YEARS: std::ops::RangeInclusive<u32> = 2016..=2023;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One wide row: state, aquifer and a level per year (None = not measured).
struct SiteRow {
    region: String,
    site: Option<String>,
    levels: Vec<Option<f64>>,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SiteRow> {
    let regions: [(&str, &[&str]); 4] = [
        ("Aguascalientes", &["EL LLANO", "VALLE DE AGUASCALIENTES", "VALLE DE CHICALOTE"]),
        ("Baja California", &["VALLE DE MEXICALI", "LLANOS DEL BERRENDO", "TIJUANA"]),
        ("Chihuahua", &["CUAUHTEMOC", "JIMENEZ-CAMARGO", "MEOQUI-DELICIAS", "ALDAMA-SAN DIEGO"]),
        ("Sonora", &["COSTA DE HERMOSILLO", "CABORCA"]),
    ];

    let mut rows = Vec::new();
    for (region, sites) in regions {
        for site in sites {
            // Each aquifer is measured at several wells, one row per well.
            let wells = 1 + (rng.next_f64() * 4.0) as usize;
            for _ in 0..wells {
                let base = 10.0 + rng.next_f64() * 120.0;
                let levels = YEARS
                    .enumerate()
                    .map(|(i, _)| {
                        // Roughly one reading in six is missing.
                        if rng.next_f64() < 0.17 {
                            None
                        } else {
                            let level = base + i as f64 * 0.8 + rng.next_f64() * 3.0;
                            Some((level * 100.0).round() / 100.0)
                        }
                    })
                    .collect();
                rows.push(SiteRow {
                    region: region.to_string(),
                    site: Some(site.to_string()),
                    levels,
                });
            }
        }
    }

    // A well without an aquifer name; dropped on load.
    rows.push(SiteRow {
        region: "Sonora".to_string(),
        site: None,
        levels: YEARS.map(|_| Some(42.0)).collect(),
    });
    rows
}

fn headers() -> Vec<String> {
    ["NOM_EDO".to_string(), "NOM_ACUIF".to_string()]
        .into_iter()
        .chain(YEARS.map(|y| format!("PNE_{y}")))
        .collect()
}

fn write_csv(rows: &[SiteRow], path: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers())?;
    for row in rows {
        let mut record = vec![row.region.clone(), row.site.clone().unwrap_or_default()];
        record.extend(row.levels.iter().map(|l| l.map(|v| v.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[SiteRow], path: &str) -> anyhow::Result<()> {
    let fields: Vec<Field> = headers()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let data_type = if i < 2 { DataType::Utf8 } else { DataType::Float64 };
            Field::new(name, data_type, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|r| Some(r.region.as_str())).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.site.as_deref()).collect::<Vec<_>>(),
        )),
    ];
    for (i, _) in YEARS.enumerate() {
        columns.push(Arc::new(Float64Array::from(
            rows.iter().map(|r| r.levels[i]).collect::<Vec<_>>(),
        )));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_groundwater.csv")?;
    write_parquet(&rows, "sample_groundwater.parquet")?;

    println!(
        "Wrote {} wells x {} years to sample_groundwater.csv and sample_groundwater.parquet",
        rows.len(),
        YEARS.count()
    );
    Ok(())
}
