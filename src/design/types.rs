//! Data types for probe design

use serde::{Deserialize, Serialize};

use super::error::{DesignError, Result};

/// Numeric design parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParams {
    pub probe_length: usize,
    pub gc_min: f64,
    pub gc_max: f64,
    pub tm_min: f64,
    pub tm_max: f64,
    pub overlap: usize,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            probe_length: 25,
            gc_min: 40.0,
            gc_max: 60.0,
            tm_min: 50.0,
            tm_max: 70.0,
            overlap: 0,
        }
    }
}

impl DesignParams {
    /// Distance between consecutive window starts.
    ///
    /// Fails when the window would not advance.
    pub fn step(&self) -> Result<usize> {
        if self.probe_length == 0 {
            return Err(DesignError::ZeroProbeLength);
        }
        if self.overlap >= self.probe_length {
            return Err(DesignError::InvalidOverlap {
                overlap: self.overlap,
                probe_length: self.probe_length,
            });
        }
        Ok(self.probe_length - self.overlap)
    }

    pub fn gc_in_range(&self, gc: f64) -> bool {
        self.gc_min <= gc && gc <= self.gc_max
    }

    pub fn tm_in_range(&self, tm: f64) -> bool {
        self.tm_min <= tm && tm <= self.tm_max
    }
}

/// Design parameters as typed into the form, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamInput {
    pub probe_length: String,
    pub gc_min: String,
    pub gc_max: String,
    pub tm_min: String,
    pub tm_max: String,
    pub overlap: String,
}

impl Default for ParamInput {
    fn default() -> Self {
        Self::from(&DesignParams::default())
    }
}

impl From<&DesignParams> for ParamInput {
    fn from(params: &DesignParams) -> Self {
        Self {
            probe_length: params.probe_length.to_string(),
            gc_min: params.gc_min.to_string(),
            gc_max: params.gc_max.to_string(),
            tm_min: params.tm_min.to_string(),
            tm_max: params.tm_max.to_string(),
            overlap: params.overlap.to_string(),
        }
    }
}

impl ParamInput {
    /// Parse every field, reporting the first one that is not a valid number.
    pub fn parse(&self) -> Result<DesignParams> {
        Ok(DesignParams {
            probe_length: parse_count("probe length", &self.probe_length)?,
            gc_min: parse_bound("GC min", &self.gc_min)?,
            gc_max: parse_bound("GC max", &self.gc_max)?,
            tm_min: parse_bound("Tm min", &self.tm_min)?,
            tm_max: parse_bound("Tm max", &self.tm_max)?,
            overlap: parse_count("overlap", &self.overlap)?,
        })
    }
}

fn parse_count(field: &'static str, text: &str) -> Result<usize> {
    text.trim().parse::<usize>().map_err(|_| DesignError::Validation {
        field,
        value: text.to_string(),
    })
}

fn parse_bound(field: &'static str, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DesignError::Validation {
            field,
            value: text.to_string(),
        }),
    }
}

/// An accepted probe window. Positions are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    #[serde(rename = "Probe")]
    pub sequence: String,
    #[serde(rename = "GC_Content")]
    pub gc_content: f64,
    #[serde(rename = "Tm")]
    pub melting_temperature: f64,
    #[serde(rename = "Start")]
    pub start: usize,
    #[serde(rename = "End")]
    pub end: usize,
}

/// Export file format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Comma-separated table with a header row
    Tabular,
    /// One `>Probe_<n>` record per probe
    Fasta,
    /// Pretty-printed array of probe objects
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Tabular, Self::Fasta, Self::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tabular => "csv",
            Self::Fasta => "fasta",
            Self::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tabular => "CSV",
            Self::Fasta => "FASTA",
            Self::Json => "JSON",
        }
    }

    pub fn default_file_name(&self) -> String {
        format!("probes.{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_parses_to_defaults() {
        let params = ParamInput::default().parse().unwrap();
        assert_eq!(params, DesignParams::default());
        assert_eq!(params.step().unwrap(), 25);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let input = ParamInput {
            gc_max: "sixty".to_string(),
            ..Default::default()
        };
        match input.parse() {
            Err(DesignError::Validation { field, value }) => {
                assert_eq!(field, "GC max");
                assert_eq!(value, "sixty");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_negative_overlap_and_nan() {
        let input = ParamInput {
            overlap: "-1".to_string(),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().is_validation());

        let input = ParamInput {
            tm_min: "NaN".to_string(),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let input = ParamInput {
            probe_length: " 30 ".to_string(),
            ..Default::default()
        };
        assert_eq!(input.parse().unwrap().probe_length, 30);
    }

    #[test]
    fn test_step_rejects_non_advancing_overlap() {
        let params = DesignParams {
            overlap: 25,
            ..Default::default()
        };
        assert!(matches!(
            params.step(),
            Err(DesignError::InvalidOverlap { overlap: 25, probe_length: 25 })
        ));

        let params = DesignParams {
            probe_length: 0,
            overlap: 0,
            ..Default::default()
        };
        assert!(matches!(params.step(), Err(DesignError::ZeroProbeLength)));
    }

    #[test]
    fn test_export_format_extensions() {
        assert_eq!(ExportFormat::Tabular.default_file_name(), "probes.csv");
        assert_eq!(ExportFormat::Fasta.extension(), "fasta");
        assert_eq!(ExportFormat::Json.label(), "JSON");
    }
}
