//! Writes a synthetic `VNL2023_sample.csv` with the same columns as the real
//! VNL player statistics, so the dashboard can be tried without the dataset:
//!
//! ```text
//! cargo run --bin generate_sample
//! VNL_EXPLORER_DATA=VNL2023_sample.csv cargo run
//! ```

/// SplitMix64: small, seedable and good enough for fake box scores.
struct StatRng(u64);

impl StatRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * f64::EPSILON / 2.0
    }

    /// Normal sample via the Marsaglia polar method.
    fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        loop {
            let u = 2.0 * self.unit() - 1.0;
            let v = 2.0 * self.unit() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                return mean + sd * u * (-2.0 * s.ln() / s).sqrt();
            }
        }
    }

    /// Uniform integer in `lo..=hi`.
    fn between(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }
}

/// Per-position mean of Attack, Block, Serve, Set, Dig, Receive.
const PROFILES: [(&str, [f64; 6]); 5] = [
    ("OH", [11.0, 1.2, 1.1, 0.1, 3.0, 4.5]),
    ("OP", [14.0, 1.6, 1.4, 0.1, 1.5, 0.3]),
    ("MB", [5.5, 2.8, 0.9, 0.0, 0.6, 0.0]),
    ("S", [1.2, 1.0, 0.9, 9.5, 2.2, 0.1]),
    ("L", [0.0, 0.0, 0.0, 0.4, 5.5, 5.2]),
];

/// Roster slots per team, in `PROFILES` order.
const ROSTER: [usize; 5] = [3, 2, 3, 2, 2];

const COUNTRIES: [&str; 16] = [
    "Argentina", "Brazil", "Bulgaria", "Canada", "China", "Cuba", "France", "Germany", "Iran",
    "Italy", "Japan", "Netherlands", "Poland", "Serbia", "Slovenia", "USA",
];

fn main() {
    let mut rng = StatRng(2023);
    let output_path = "VNL2023_sample.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "Player", "Country", "Age", "Attack", "Block", "Serve", "Set", "Dig", "Receive",
            "Position",
        ])
        .expect("Failed to write header");

    let mut rows = 0;
    for country in COUNTRIES {
        for ((position, means), &slots) in PROFILES.iter().zip(&ROSTER) {
            for slot in 0..slots {
                let name = format!("{} {}{}", country, position, slot + 1);
                let age = rng.between(19, 36).to_string();

                let mut record = vec![name, country.to_string(), age];
                for &mean in means {
                    let value = rng.normal(mean, mean * 0.25).max(0.0);
                    record.push(format!("{value:.2}"));
                }
                record.push(position.to_string());

                writer.write_record(&record).expect("Failed to write row");
                rows += 1;
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} players from {} countries to {output_path}", COUNTRIES.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = StatRng(7);
        let mut b = StatRng(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = StatRng(2023);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
            assert!((19..=36).contains(&rng.between(19, 36)));
            assert!(rng.normal(5.0, 1.0).is_finite());
        }
    }
}
