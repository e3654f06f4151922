// Diagnosis Engine: situation catalog, score tables, narrative templates and the
// pure `generate_diagnosis` entry point. No I/O anywhere under this module.

pub mod catalog;
pub mod engine;
pub mod language;
pub mod narrative;
pub mod scoring;

pub use catalog::{Solution, CATALOG_VERSION};
pub use engine::{generate_diagnosis, DiagnosisResult, WizardAnswer};
pub use language::{Language, Localized};
