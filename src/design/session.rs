//! Design session: carries the latest probe set from generation to export

use std::path::Path;

use tracing::warn;

use super::error::{DesignError, Result};
use super::export::export_probes;
use super::generator::design_probes;
use super::sequence::normalize_sequence;
use super::thermo::TmMethod;
use super::types::{DesignParams, ExportFormat, ParamInput, ProbeRecord};

#[derive(Debug, Clone, Default)]
pub struct DesignSession {
    /// Model used by the next run
    pub method: TmMethod,
    /// Parameters and model of the run that produced `probes`
    produced_by: Option<(DesignParams, TmMethod)>,
    probes: Vec<ProbeRecord>,
}

impl DesignSession {
    /// Run a design over free text and replace the current probe set.
    ///
    /// On error the previous probe set is kept.
    pub fn generate(&mut self, sequence_text: &str, input: &ParamInput) -> Result<usize> {
        let sequence = normalize_sequence(sequence_text);
        if sequence.is_empty() {
            warn!("probe design requested without a sequence");
            return Err(DesignError::EmptyInput);
        }
        input
            .parse()
            .and_then(|params| self.generate_with(&sequence, params))
            .inspect_err(|e| {
                if e.is_validation() {
                    warn!("rejected design settings: {}", e);
                }
            })
    }

    /// Same as [`generate`](Self::generate) with parsed parameters and a
    /// normalized sequence.
    pub fn generate_with(&mut self, sequence: &str, params: DesignParams) -> Result<usize> {
        self.method.validate()?;
        let model = self.method.build();
        let probes = design_probes(sequence, &params, &*model)?;
        self.probes = probes;
        self.produced_by = Some((params, self.method.clone()));
        Ok(self.probes.len())
    }

    pub fn probes(&self) -> &[ProbeRecord] {
        &self.probes
    }

    /// Parameters of the run that produced the current probe set.
    pub fn params(&self) -> Option<&DesignParams> {
        self.produced_by.as_ref().map(|(params, _)| params)
    }

    /// Model of the run that produced the current probe set.
    pub fn produced_with(&self) -> Option<&TmMethod> {
        self.produced_by.as_ref().map(|(_, method)| method)
    }

    /// The current probe set, if there is anything to export.
    pub fn exportable(&self) -> Result<&[ProbeRecord]> {
        if self.probes.is_empty() {
            return Err(DesignError::EmptyResult);
        }
        Ok(&self.probes)
    }

    pub fn export(&self, format: ExportFormat, path: &Path) -> Result<()> {
        export_probes(path, self.exportable()?, format)
    }

    /// Mean GC content and mean Tm of the current probe set.
    pub fn summary(&self) -> Option<(f64, f64)> {
        if self.probes.is_empty() {
            return None;
        }
        let n = self.probes.len() as f64;
        let gc = self.probes.iter().map(|p| p.gc_content).sum::<f64>() / n;
        let tm = self.probes.iter().map(|p| p.melting_temperature).sum::<f64>() / n;
        Some((gc, tm))
    }
}
