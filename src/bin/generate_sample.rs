//! Write a synthetic CORD-19 style `metadata.csv` for demos.
//!
//! Output is deterministic for a given seed and row count. Some cells are
//! deliberately blank or malformed so the cleaner has something to do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "generate_sample")]
struct Cli {
    /// Output path.
    #[arg(short, long, default_value = "metadata.csv")]
    output: PathBuf,

    /// Number of paper rows.
    #[arg(short, long, default_value_t = 20_000)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const HEADERS: [&str; 19] = [
    "cord_uid",
    "sha",
    "source_x",
    "title",
    "doi",
    "pmcid",
    "pubmed_id",
    "license",
    "abstract",
    "publish_time",
    "authors",
    "journal",
    "mag_id",
    "who_covidence_id",
    "arxiv_id",
    "pdf_json_files",
    "pmc_json_files",
    "url",
    "s2_id",
];

const SOURCES: [&str; 6] = ["PMC", "Medline", "WHO", "Elsevier", "MedRxiv", "ArXiv"];
const LICENSES: [&str; 4] = ["cc-by", "cc-by-nc", "els-covid", "no-cc"];
const JOURNALS: [&str; 12] = [
    "PLoS One",
    "BMJ",
    "Lancet",
    "Nature",
    "Science",
    "Virology",
    "J Virol",
    "Emerg Infect Dis",
    "Sci Rep",
    "Viruses",
    "Vaccine",
    "Int J Infect Dis",
];
const TOPIC_WORDS: [&str; 24] = [
    "coronavirus", "covid-19", "sars-cov-2", "respiratory", "infection", "patients",
    "clinical", "pandemic", "transmission", "vaccine", "viral", "analysis",
    "outbreak", "hospital", "china", "protein", "immune", "response",
    "disease", "health", "model", "severe", "acute", "syndrome",
];
const FILLER_WORDS: [&str; 8] = ["of", "the", "in", "and", "for", "a", "with", "on"];
const SURNAMES: [&str; 10] = [
    "Wang", "Smith", "Li", "Garcia", "Müller", "Kim", "Nguyen", "Rossi", "Khan", "Silva",
];
const YEARS: [i32; 6] = [2020, 2021, 2019, 2015, 2010, 2005];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Skewed pick: early entries come up far more often, like real
    /// journal and source frequencies.
    fn skewed<T: Copy>(&mut self, items: &[T]) -> T {
        let u = self.next_f64();
        items[((u * u) * items.len() as f64) as usize % items.len()]
    }
}

fn sentence(rng: &mut SimpleRng, words: usize) -> String {
    (0..words)
        .map(|i| {
            if i % 3 == 1 {
                FILLER_WORDS[rng.below(FILLER_WORDS.len())]
            } else {
                TOPIC_WORDS[rng.below(TOPIC_WORDS.len())]
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn publish_time(rng: &mut SimpleRng) -> String {
    let year = rng.skewed(&YEARS);
    let month = rng.below(12) + 1;
    let day = rng.below(28) + 1;
    match rng.below(20) {
        0 => String::new(),
        1 => "unknown".to_string(),
        2 => year.to_string(),
        3 => format!("{year} {}", MONTHS[month - 1]),
        _ => format!("{year}-{month:02}-{day:02}"),
    }
}

fn blank_or(rng: &mut SimpleRng, p: f64, value: String) -> String {
    if rng.chance(p) {
        String::new()
    } else {
        value
    }
}

fn row(rng: &mut SimpleRng, i: usize) -> Vec<String> {
    let title_len = 5 + rng.below(8);
    let title = sentence(rng, title_len);
    let abstract_len = 40 + rng.below(160);
    let abstract_text = sentence(rng, abstract_len);
    let author_count = 1 + rng.below(4);
    let authors = (0..author_count)
        .map(|_| {
            let surname = SURNAMES[rng.below(SURNAMES.len())];
            let initial = (b'A' + rng.below(26) as u8) as char;
            format!("{surname}, {initial}.")
        })
        .collect::<Vec<_>>()
        .join("; ");
    let sha = format!("{:040x}", rng.next_u64());
    let source = rng.skewed(&SOURCES).to_string();
    let license = LICENSES[rng.below(LICENSES.len())].to_string();
    let journal = rng.skewed(&JOURNALS).to_string();

    vec![
        format!("uid{i:07}"),
        blank_or(rng, 0.6, sha),
        source,
        blank_or(rng, 0.02, title),
        format!("10.1000/cord.{i}"),
        blank_or(rng, 0.7, format!("PMC{}", 1_000_000 + i)),
        blank_or(rng, 0.5, (30_000_000 + i).to_string()),
        license,
        blank_or(rng, 0.2, abstract_text),
        publish_time(rng),
        blank_or(rng, 0.05, authors),
        blank_or(rng, 0.1, journal),
        String::new(),
        blank_or(rng, 0.9, format!("#{}", 10_000 + i)),
        blank_or(rng, 0.98, format!("2003.{:05}", i % 100_000)),
        String::new(),
        String::new(),
        format!("https://doi.org/10.1000/cord.{i}"),
        String::new(),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    writer.write_record(HEADERS)?;
    for i in 0..cli.rows {
        writer.write_record(row(&mut rng, i))?;
    }
    writer.flush()?;

    println!("Wrote {} synthetic papers to {}", cli.rows, cli.output.display());
    Ok(())
}
