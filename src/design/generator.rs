//! Sliding-window probe generation
//!
//! Walks the sequence left to right with a fixed window, scores each window
//! for GC content and melting temperature, and keeps the windows that fall
//! inside the requested ranges.

use tracing::{debug, info};

use super::error::{DesignError, Result};
use super::sequence::gc_content;
use super::thermo::MeltingModel;
use super::types::{DesignParams, ProbeRecord};

/// Round to the two decimals that get stored and exported.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Generate probes from an already normalized sequence.
///
/// GC and Tm are rounded to two decimals before the bounds are checked, so
/// every returned record satisfies the bounds as stored.
pub fn design_probes<M>(sequence: &str, params: &DesignParams, model: &M) -> Result<Vec<ProbeRecord>>
where
    M: MeltingModel + ?Sized,
{
    if sequence.is_empty() {
        return Err(DesignError::EmptyInput);
    }
    let step = params.step()?;
    let length = params.probe_length;

    let symbols: Vec<char> = sequence.chars().collect();
    debug!(
        sequence_length = symbols.len(),
        probe_length = length,
        step,
        model = %model.name(),
        "designing probes"
    );

    if symbols.len() < length {
        info!(
            sequence_length = symbols.len(),
            probe_length = length,
            "sequence shorter than probe length"
        );
        return Ok(Vec::new());
    }

    let mut probes = Vec::new();
    let mut windows = 0usize;
    for offset in (0..=symbols.len() - length).step_by(step) {
        windows += 1;
        if let Some(probe) = evaluate_window(&symbols[offset..offset + length], offset, params, model) {
            probes.push(probe);
        }
    }

    info!(windows, accepted = probes.len(), "probe design finished");
    Ok(probes)
}

/// Score one window and build a record if it passes both filters.
fn evaluate_window<M>(
    window: &[char],
    offset: usize,
    params: &DesignParams,
    model: &M,
) -> Option<ProbeRecord>
where
    M: MeltingModel + ?Sized,
{
    let gc = round2(gc_content(window));
    if !params.gc_in_range(gc) {
        return None;
    }

    let sequence: String = window.iter().collect();
    let tm = round2(model.tm(&sequence)?);
    if !params.tm_in_range(tm) {
        return None;
    }

    Some(ProbeRecord {
        sequence,
        gc_content: gc,
        melting_temperature: tm,
        start: offset + 1,
        end: offset + window.len(),
    })
}
