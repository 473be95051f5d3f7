//! Shared fakes for integration tests.
//!
//! `CatalogStore` answers compiled queries from an in-memory catalog by
//! reading back the constraints the compiler emits (archive, VALUES blocks,
//! the overlap FILTER). It only understands the shapes this crate produces.

#![allow(dead_code)]

use async_trait::async_trait;
use paleo_query::llm::{LlmProvider, ProviderKind, ProviderRegistry};
use paleo_query::query::TimeInterval;
use paleo_query::store::{Row, SparqlTerm, TripleStore};
use paleo_query::types::{PaleoError, Result};
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Provider returning a fixed response and counting calls.
pub struct FakeProvider {
    pub available: bool,
    pub response: std::result::Result<String, String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn answering(response: &str) -> Arc<Self> {
        Arc::new(Self {
            available: true,
            response: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            available: false,
            response: Ok("{}".to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            available: true,
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn generate_response(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response
            .clone()
            .map_err(|m| PaleoError::provider("fake", m))
    }
}

/// Registry whose providers are the given fakes, by kind.
pub fn registry_with(
    ollama: Arc<FakeProvider>,
    openai: Arc<FakeProvider>,
    claude: Arc<FakeProvider>,
) -> ProviderRegistry {
    ProviderRegistry::default().with_builder(move |kind, _, _| -> Arc<dyn LlmProvider> {
        match kind {
            ProviderKind::Ollama => ollama.clone(),
            ProviderKind::OpenAi => openai.clone(),
            ProviderKind::Claude => claude.clone(),
        }
    })
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: &'static str,
    pub archive: &'static str,
    pub variables: &'static [&'static str],
    pub interpretations: &'static [&'static str],
    /// Age range in years BP
    pub ages: (f64, f64),
}

/// Small LiPD-like catalog.
pub fn catalog() -> Vec<Dataset> {
    vec![
        Dataset {
            name: "Ocn-Palmyra.Cobb.2003",
            archive: "Coral",
            variables: &["d18O"],
            interpretations: &["temperature"],
            ages: (0.0, 1100.0),
        },
        Dataset {
            name: "Ocn-Maiana.Urban.2000",
            archive: "Coral",
            variables: &["d18O", "Sr_Ca"],
            interpretations: &["sea_surface_temperature"],
            ages: (-50.0, 160.0),
        },
        Dataset {
            name: "Ocn-Tahiti.DeLong.2012",
            archive: "Coral",
            variables: &["Sr_Ca"],
            interpretations: &["sea_surface_temperature"],
            ages: (5000.0, 8000.0),
        },
        Dataset {
            name: "Ant-EPICADomeC.Jouzel.2007",
            archive: "GlacierIce",
            variables: &["dD"],
            interpretations: &["temperature"],
            ages: (0.0, 800000.0),
        },
        Dataset {
            name: "MD98-2181.Stott.2007",
            archive: "MarineSediment",
            variables: &["d18O", "Mg_Ca"],
            interpretations: &["seawater_temperature"],
            ages: (12000.0, 30000.0),
        },
    ]
}

/// Store evaluating compiled queries against `catalog()`.
pub struct CatalogStore {
    datasets: Vec<Dataset>,
    pub queries: Mutex<Vec<String>>,
}

impl CatalogStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            datasets: catalog(),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn matches(&self, ds: &Dataset, query: &str) -> bool {
        let archive = Regex::new(r"le:hasArchiveType archive:(\w+)").unwrap();
        if let Some(caps) = archive.captures(query) {
            if ds.archive != &caps[1] {
                return false;
            }
        }

        if let Some(wanted) = values_block(query, "?standardVariable", "pvar:") {
            if !ds.variables.iter().any(|v| wanted.iter().any(|w| w == v)) {
                return false;
            }
        }

        if let Some(wanted) = values_block(query, "?interpretationVariable", "interp:") {
            if !ds.interpretations.iter().any(|v| wanted.iter().any(|w| w == v)) {
                return false;
            }
        }

        let overlap = Regex::new(
            r"FILTER\(\?ageStart (<=|>=) (-?[\d.]+) && \?ageEnd (<=|>=) (-?[\d.]+)\)",
        )
        .unwrap();
        if let Some(caps) = overlap.captures(query) {
            let (start, end) = ds.ages;
            let a: f64 = caps[2].parse().unwrap();
            let b: f64 = caps[4].parse().unwrap();
            let first = compare(start, &caps[1], a);
            let second = compare(end, &caps[3], b);
            if !(first && second) {
                return false;
            }
        }

        true
    }

    /// Names whose interval satisfies a mode, straight from the catalog.
    pub fn expected(&self, mode: paleo_query::OverlapMode, query: &TimeInterval) -> Vec<&'static str> {
        self.datasets
            .iter()
            .filter(|ds| {
                TimeInterval::new(ds.ages.0, ds.ages.1)
                    .unwrap()
                    .satisfies(mode, query)
            })
            .map(|ds| ds.name)
            .collect()
    }
}

fn compare(value: f64, op: &str, bound: f64) -> bool {
    match op {
        "<=" => value <= bound,
        ">=" => value >= bound,
        other => panic!("unexpected operator {}", other),
    }
}

fn values_block(query: &str, var: &str, prefix: &str) -> Option<Vec<String>> {
    let pattern = format!(r"VALUES {} \{{ ([^}}]*) \}}", regex::escape(var));
    let re = Regex::new(&pattern).unwrap();
    re.captures(query).map(|caps| {
        caps[1]
            .split_whitespace()
            .map(|t| t.trim_start_matches(prefix).to_string())
            .collect()
    })
}

#[async_trait]
impl TripleStore for CatalogStore {
    async fn execute(&self, query: &str) -> Result<Vec<Row>> {
        self.queries.lock().unwrap().push(query.to_string());
        // Each dataset appears once per matching variable, like a real join
        let mut rows = Vec::new();
        for ds in &self.datasets {
            if self.matches(ds, query) {
                for _ in 0..ds.variables.len().max(1) {
                    rows.push(Row::from([(
                        "datasetName".to_string(),
                        SparqlTerm::literal(ds.name),
                    )]));
                }
            }
        }
        Ok(rows)
    }
}
