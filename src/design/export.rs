//! Probe set export
//!
//! Every format is rendered into memory first and written with a single
//! call, so a failed render never leaves a partial file behind.

use std::io::Write;
use std::path::Path;

use bio::io::fasta;
use tracing::info;

use super::error::{DesignError, Result};
use super::types::{ExportFormat, ProbeRecord};

/// Header row of the tabular format
pub const TABULAR_HEADER: &str = "Probe,GC_Content,Tm,Start,End";

/// Write comma-separated rows with a header line.
pub fn write_tabular<W: Write>(writer: &mut W, probes: &[ProbeRecord]) -> Result<()> {
    writeln!(writer, "{}", TABULAR_HEADER)?;
    for probe in probes {
        writeln!(
            writer,
            "{},{:.2},{:.2},{},{}",
            probe.sequence, probe.gc_content, probe.melting_temperature, probe.start, probe.end
        )?;
    }
    Ok(())
}

/// Write one `>Probe_<n>` record per probe, numbered in emission order.
pub fn write_fasta<W: Write>(writer: W, probes: &[ProbeRecord]) -> Result<()> {
    let mut fasta_writer = fasta::Writer::new(writer);
    for (idx, probe) in probes.iter().enumerate() {
        let id = format!("Probe_{}", idx + 1);
        fasta_writer.write(&id, None, probe.sequence.as_bytes())?;
    }
    fasta_writer.flush()?;
    Ok(())
}

/// Write the probes as a pretty-printed JSON array.
pub fn write_json<W: Write>(writer: W, probes: &[ProbeRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, probes)?;
    Ok(())
}

/// Render a probe set in the given format.
pub fn render(probes: &[ProbeRecord], format: ExportFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        ExportFormat::Tabular => write_tabular(&mut buffer, probes)?,
        ExportFormat::Fasta => write_fasta(&mut buffer, probes)?,
        ExportFormat::Json => {
            write_json(&mut buffer, probes)?;
            buffer.push(b'\n');
        }
    }
    Ok(buffer)
}

/// Create or overwrite `path` with the probe set.
///
/// Fails with [`DesignError::EmptyResult`] without touching the filesystem
/// when there is nothing to export.
pub fn export_probes(path: &Path, probes: &[ProbeRecord], format: ExportFormat) -> Result<()> {
    if probes.is_empty() {
        return Err(DesignError::EmptyResult);
    }
    let content = render(probes, format)?;
    std::fs::write(path, content)?;
    info!(
        path = %path.display(),
        format = format.label(),
        probes = probes.len(),
        "probes exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_probes() -> Vec<ProbeRecord> {
        vec![
            ProbeRecord {
                sequence: "ATGCATGCATGCATGCATGCATGCA".to_string(),
                gc_content: 48.0,
                melting_temperature: 61.63,
                start: 1,
                end: 25,
            },
            ProbeRecord {
                sequence: "GCATGCATGCATGCATGCATGCATG".to_string(),
                gc_content: 52.0,
                melting_temperature: 63.1,
                start: 26,
                end: 50,
            },
        ]
    }

    #[test]
    fn test_tabular_rows() {
        let text = String::from_utf8(render(&sample_probes(), ExportFormat::Tabular).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Probe,GC_Content,Tm,Start,End");
        assert_eq!(lines[1], "ATGCATGCATGCATGCATGCATGCA,48.00,61.63,1,25");
        assert_eq!(lines[2], "GCATGCATGCATGCATGCATGCATG,52.00,63.10,26,50");
    }

    #[test]
    fn test_fasta_two_records() {
        let text = String::from_utf8(render(&sample_probes(), ExportFormat::Fasta).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                ">Probe_1",
                "ATGCATGCATGCATGCATGCATGCA",
                ">Probe_2",
                "GCATGCATGCATGCATGCATGCATG",
            ]
        );
    }

    #[test]
    fn test_json_uses_table_keys() {
        let bytes = render(&sample_probes(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["Probe"], "ATGCATGCATGCATGCATGCATGCA");
        assert_eq!(first["GC_Content"], 48.0);
        assert_eq!(first["Start"], 1);
        assert_eq!(first["End"], 25);

        let back: Vec<ProbeRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, sample_probes());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probes.fasta");
        export_probes(&path, &sample_probes(), ExportFormat::Fasta).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(">Probe_1\n"));

        // Overwrites on a second export
        export_probes(&path, &sample_probes()[..1], ExportFormat::Fasta).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_export_empty_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probes.csv");
        let err = export_probes(&path, &[], ExportFormat::Tabular).unwrap_err();
        assert!(matches!(err, DesignError::EmptyResult));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("probes.csv");
        let err = export_probes(&path, &sample_probes(), ExportFormat::Tabular).unwrap_err();
        assert!(matches!(err, DesignError::Io(_)));
    }
}
