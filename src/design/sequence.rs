//! Sequence normalization, FASTA loading and base composition

use bio::io::fasta;

use super::error::{DesignError, Result};

/// Check if a character is a standard DNA base
pub fn is_standard_base(c: char) -> bool {
    matches!(c, 'A' | 'C' | 'G' | 'T')
}

/// Check if a character is G or C
pub fn is_gc(c: char) -> bool {
    matches!(c, 'G' | 'C')
}

/// Normalize free text into a sequence: drop FASTA header lines and
/// whitespace, uppercase everything else. The alphabet is not checked.
pub fn normalize_sequence(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('>'))
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// GC percentage (0-100) of a window, counted over all its symbols.
pub fn gc_content(window: &[char]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let gc = window.iter().filter(|&&c| is_gc(c)).count();
    gc as f64 / window.len() as f64 * 100.0
}

/// A named sequence read from a FASTA file
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    pub name: String,
    pub sequence: String,
}

/// Read a single-sequence FASTA document.
/// Text without any header line is taken as one unnamed raw sequence.
pub fn parse_single_fasta(text: &str) -> Result<SequenceRecord> {
    if !text.lines().any(|line| line.trim_start().starts_with('>')) {
        return Ok(SequenceRecord {
            name: "Sequence_1".to_string(),
            sequence: normalize_sequence(text),
        });
    }

    let mut records = Vec::new();
    for record in fasta::Reader::new(text.trim_start().as_bytes()).records() {
        let record = record.map_err(|e| DesignError::Fasta(e.to_string()))?;
        records.push(record);
    }

    match records.as_slice() {
        [] => Err(DesignError::Fasta("no sequence found".to_string())),
        [record] => Ok(SequenceRecord {
            name: record.id().to_string(),
            sequence: normalize_sequence(&String::from_utf8_lossy(record.seq())),
        }),
        many => Err(DesignError::Fasta(format!(
            "expected exactly 1 sequence, found {}",
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_and_strips() {
        assert_eq!(normalize_sequence("acgt\nAC GT\r\n"), "ACGTACGT");
        assert_eq!(normalize_sequence(">chr1 test\nacgt\nnnnn"), "ACGTNNNN");
        assert_eq!(normalize_sequence("  \n\t"), "");
    }

    #[test]
    fn test_gc_content_ignores_other_symbols() {
        let window: Vec<char> = "GCAT".chars().collect();
        assert_eq!(gc_content(&window), 50.0);
        let window: Vec<char> = "GGNN".chars().collect();
        assert_eq!(gc_content(&window), 50.0);
        assert_eq!(gc_content(&[]), 0.0);
    }

    #[test]
    fn test_parse_single_fasta() {
        let record = parse_single_fasta(">Target gene\nacgtac\nGTAC\n").unwrap();
        assert_eq!(record.name, "Target");
        assert_eq!(record.sequence, "ACGTACGTAC");
    }

    #[test]
    fn test_parse_single_fasta_raw_text() {
        let record = parse_single_fasta("acgt\nacgt").unwrap();
        assert_eq!(record.sequence, "ACGTACGT");
    }

    #[test]
    fn test_parse_single_fasta_rejects_multiple() {
        let err = parse_single_fasta(">a\nACGT\n>b\nACGT\n").unwrap_err();
        assert!(matches!(err, DesignError::Fasta(_)));
    }
}
