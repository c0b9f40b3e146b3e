//! Melting temperature models
//!
//! The generator only sees the [`MeltingModel`] trait. The default model is a
//! two-state nearest-neighbour calculation over a thermodynamic table with a
//! salt correction; the Wallace rule is kept as a quick alternative.

use std::collections::HashMap;

use bio::alphabets::dna;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::{DesignError, Result};
use super::sequence::is_standard_base;

/// Universal gas constant in cal/(K*mol)
const GAS_CONSTANT: f64 = 1.987;

/// Kelvin offset
const KELVIN: f64 = 273.15;

/// A pure `Tm(sequence)` function.
pub trait MeltingModel {
    /// Melting temperature in degrees Celsius, or `None` when the model has
    /// nothing to compute on (for example, no A/C/G/T symbols).
    fn tm(&self, seq: &str) -> Option<f64>;

    fn name(&self) -> String;
}

/// Enthalpy (kcal/mol) and entropy (cal/(K*mol)) pair
type Thermo = (f64, f64);

/// Initiation terms and the ten Watson-Crick stacks of one parameter set.
/// Stack keys read `5'-XY-3'/3'-X'Y'-5'`.
pub struct NnTable {
    pub init: Thermo,
    pub init_at: Thermo,
    pub init_gc: Thermo,
    pub symmetry: Thermo,
    pub stacks: HashMap<&'static str, Thermo>,
}

/// Allawi & SantaLucia (1997)
pub static ALLAWI_SANTALUCIA_1997: Lazy<NnTable> = Lazy::new(|| NnTable {
    init: (0.0, 0.0),
    init_at: (2.3, 4.1),
    init_gc: (0.1, -2.8),
    symmetry: (0.0, -1.4),
    stacks: [
        ("AA/TT", (-7.9, -22.2)),
        ("AT/TA", (-7.2, -20.4)),
        ("TA/AT", (-7.2, -21.3)),
        ("CA/GT", (-8.5, -22.7)),
        ("GT/CA", (-8.4, -22.4)),
        ("CT/GA", (-7.8, -21.0)),
        ("GA/CT", (-8.2, -22.2)),
        ("CG/GC", (-10.6, -27.2)),
        ("GC/CG", (-9.8, -24.4)),
        ("GG/CC", (-8.0, -19.9)),
    ]
    .into_iter()
    .collect(),
});

/// SantaLucia & Hicks (2004)
pub static SANTALUCIA_HICKS_2004: Lazy<NnTable> = Lazy::new(|| NnTable {
    init: (0.2, -5.7),
    init_at: (2.2, 6.9),
    init_gc: (0.0, 0.0),
    symmetry: (0.0, -1.4),
    stacks: [
        ("AA/TT", (-7.6, -21.3)),
        ("AT/TA", (-7.2, -20.4)),
        ("TA/AT", (-7.2, -20.4)),
        ("CA/GT", (-8.5, -22.7)),
        ("GT/CA", (-8.4, -22.4)),
        ("CT/GA", (-7.8, -21.0)),
        ("GA/CT", (-8.2, -22.2)),
        ("CG/GC", (-10.6, -27.2)),
        ("GC/CG", (-9.8, -24.4)),
        ("GG/CC", (-8.0, -19.0)),
    ]
    .into_iter()
    .collect(),
});

/// Nearest-neighbour parameter set selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NnTableKind {
    #[default]
    AllawiSantaLucia1997,
    SantaLuciaHicks2004,
}

impl NnTableKind {
    pub const ALL: [NnTableKind; 2] = [Self::AllawiSantaLucia1997, Self::SantaLuciaHicks2004];

    pub fn table(&self) -> &'static NnTable {
        match self {
            Self::AllawiSantaLucia1997 => &ALLAWI_SANTALUCIA_1997,
            Self::SantaLuciaHicks2004 => &SANTALUCIA_HICKS_2004,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AllawiSantaLucia1997 => "Allawi & SantaLucia (1997)",
            Self::SantaLuciaHicks2004 => "SantaLucia & Hicks (2004)",
        }
    }
}

/// Salt correction method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaltCorrection {
    None,
    /// 16.6 * log10[Na+], added to Tm
    Schildkraut1965,
    /// 16.6 * log10([Na+] / (1 + 0.7[Na+])), added to Tm
    Wetmur1991,
    /// 12.5 * log10[Na+], added to Tm
    SantaLucia1996,
    /// 11.7 * log10[Na+], added to Tm
    SantaLucia1998Tm,
    /// 0.368 * (N - 1) * ln[Na+], added to the entropy
    #[default]
    SantaLucia1998Entropy,
    /// GC-dependent correction applied to 1/Tm
    Owczarzy2004,
}

impl SaltCorrection {
    pub const ALL: [SaltCorrection; 7] = [
        Self::None,
        Self::Schildkraut1965,
        Self::Wetmur1991,
        Self::SantaLucia1996,
        Self::SantaLucia1998Tm,
        Self::SantaLucia1998Entropy,
        Self::Owczarzy2004,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Schildkraut1965 => "Schildkraut & Lifson (1965)",
            Self::Wetmur1991 => "Wetmur (1991)",
            Self::SantaLucia1996 => "SantaLucia (1996)",
            Self::SantaLucia1998Tm => "SantaLucia (1998), Tm",
            Self::SantaLucia1998Entropy => "SantaLucia (1998), entropy",
            Self::Owczarzy2004 => "Owczarzy (2004)",
        }
    }

    /// Correction term for a cleaned sequence under the given conditions.
    /// The unit depends on the method: degrees, entropy units, or 1/K.
    fn correction(&self, seq: &[u8], conditions: &ThermoConditions) -> f64 {
        let mon = conditions.monovalent_equivalent() * 1e-3;
        match self {
            Self::None => 0.0,
            Self::Schildkraut1965 => 16.6 * mon.log10(),
            Self::Wetmur1991 => 16.6 * (mon / (1.0 + 0.7 * mon)).log10(),
            Self::SantaLucia1996 => 12.5 * mon.log10(),
            Self::SantaLucia1998Tm => 11.7 * mon.log10(),
            Self::SantaLucia1998Entropy => {
                0.368 * (seq.len().saturating_sub(1)) as f64 * mon.ln()
            }
            Self::Owczarzy2004 => {
                let gc = seq.iter().filter(|&&b| b == b'G' || b == b'C').count() as f64
                    / seq.len() as f64;
                (4.29 * gc - 3.95) * 1e-5 * mon.ln() + 9.40e-6 * mon.ln().powi(2)
            }
        }
    }
}

/// Strand and ion concentrations. Strands in nM, ions in mM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoConditions {
    pub dnac1: f64,
    pub dnac2: f64,
    pub na: f64,
    pub k: f64,
    pub tris: f64,
    pub mg: f64,
    pub dntps: f64,
    pub self_complementary: bool,
}

impl Default for ThermoConditions {
    fn default() -> Self {
        Self {
            dnac1: 25.0,
            dnac2: 25.0,
            na: 50.0,
            k: 0.0,
            tris: 0.0,
            mg: 0.0,
            dntps: 0.0,
            self_complementary: false,
        }
    }
}

impl ThermoConditions {
    /// Sodium-equivalent monovalent concentration in mM (von Ahsen 2001).
    /// Free Mg2+ only counts when it exceeds the dNTPs binding it.
    pub fn monovalent_equivalent(&self) -> f64 {
        let mut mon = self.na + self.k + self.tris / 2.0;
        if self.mg > self.dntps {
            mon += 120.0 * (self.mg - self.dntps).sqrt();
        }
        mon
    }

    /// Reject concentrations the two-state model cannot take the log of.
    /// Ions only matter when a salt correction is applied.
    pub fn validate(&self, salt: SaltCorrection) -> Result<()> {
        let values = [
            self.dnac1, self.dnac2, self.na, self.k, self.tris, self.mg, self.dntps,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(DesignError::InvalidConditions(
                "concentrations must be finite and non-negative".to_string(),
            ));
        }
        if self.strand_term() <= 0.0 {
            let message = if self.self_complementary {
                "strand 1 concentration must be positive".to_string()
            } else {
                format!(
                    "strand 1 concentration ({} nM) must exceed half of strand 2 ({} nM)",
                    self.dnac1, self.dnac2
                )
            };
            return Err(DesignError::InvalidConditions(message));
        }
        if salt != SaltCorrection::None && self.monovalent_equivalent() <= 0.0 {
            return Err(DesignError::InvalidConditions(format!(
                "salt correction '{}' needs a positive monovalent ion concentration",
                salt.description()
            )));
        }
        Ok(())
    }

    /// Effective strand concentration term in M.
    fn strand_term(&self) -> f64 {
        if self.self_complementary {
            self.dnac1 * 1e-9
        } else {
            (self.dnac1 - self.dnac2 / 2.0) * 1e-9
        }
    }
}

/// Two-state nearest-neighbour model for perfectly matched duplexes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearestNeighbor {
    pub table: NnTableKind,
    pub salt: SaltCorrection,
    pub conditions: ThermoConditions,
}

impl NearestNeighbor {
    /// Sum enthalpy and entropy of initiation and all stacks.
    fn duplex_thermo(&self, seq: &[u8]) -> Thermo {
        let table = self.table.table();
        let (mut dh, mut ds) = table.init;

        let ends = [seq[0], seq[seq.len() - 1]];
        for end in ends {
            let term = if end == b'A' || end == b'T' {
                table.init_at
            } else {
                table.init_gc
            };
            dh += term.0;
            ds += term.1;
        }

        let complement: Vec<u8> = seq.iter().map(|&b| dna::complement(b)).collect();
        for i in 0..seq.len().saturating_sub(1) {
            let key = format!(
                "{}{}/{}{}",
                seq[i] as char,
                seq[i + 1] as char,
                complement[i] as char,
                complement[i + 1] as char
            );
            let stack = table.stacks.get(key.as_str()).or_else(|| {
                let reversed: String = key.chars().rev().collect();
                table.stacks.get(reversed.as_str())
            });
            if let Some(&(h, s)) = stack {
                dh += h;
                ds += s;
            }
        }

        if self.conditions.self_complementary {
            dh += table.symmetry.0;
            ds += table.symmetry.1;
        }

        (dh, ds)
    }
}

impl MeltingModel for NearestNeighbor {
    fn tm(&self, seq: &str) -> Option<f64> {
        let cleaned: Vec<u8> = seq
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .filter(|&c| is_standard_base(c))
            .map(|c| c as u8)
            .collect();
        if cleaned.is_empty() || self.conditions.validate(self.salt).is_err() {
            return None;
        }

        let (dh, mut ds) = self.duplex_thermo(&cleaned);
        let corr = self.salt.correction(&cleaned, &self.conditions);
        if self.salt == SaltCorrection::SantaLucia1998Entropy {
            ds += corr;
        }

        let k = self.conditions.strand_term();
        let mut tm = (1000.0 * dh) / (ds + GAS_CONSTANT * k.ln()) - KELVIN;

        match self.salt {
            SaltCorrection::Schildkraut1965
            | SaltCorrection::Wetmur1991
            | SaltCorrection::SantaLucia1996
            | SaltCorrection::SantaLucia1998Tm => tm += corr,
            SaltCorrection::Owczarzy2004 => tm = 1.0 / (1.0 / (tm + KELVIN) + corr) - KELVIN,
            SaltCorrection::None | SaltCorrection::SantaLucia1998Entropy => {}
        }

        tm.is_finite().then_some(tm)
    }

    fn name(&self) -> String {
        format!(
            "Nearest neighbour, {}, salt: {}",
            self.table.description(),
            self.salt.description()
        )
    }
}

/// Wallace rule: 4 degrees per G/C, 2 per A/T
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Wallace;

impl MeltingModel for Wallace {
    fn tm(&self, seq: &str) -> Option<f64> {
        let (mut gc, mut at) = (0usize, 0usize);
        for c in seq.chars().map(|c| c.to_ascii_uppercase()) {
            match c {
                'G' | 'C' => gc += 1,
                'A' | 'T' => at += 1,
                _ => {}
            }
        }
        if gc + at == 0 {
            return None;
        }
        Some((4 * gc + 2 * at) as f64)
    }

    fn name(&self) -> String {
        "Wallace rule".to_string()
    }
}

/// Serializable model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TmMethod {
    NearestNeighbor {
        table: NnTableKind,
        salt: SaltCorrection,
        conditions: ThermoConditions,
    },
    Wallace,
}

impl Default for TmMethod {
    fn default() -> Self {
        Self::NearestNeighbor {
            table: NnTableKind::default(),
            salt: SaltCorrection::default(),
            conditions: ThermoConditions::default(),
        }
    }
}

impl TmMethod {
    /// Check the model settings before any window is scored.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::NearestNeighbor {
                salt, conditions, ..
            } => conditions.validate(*salt),
            Self::Wallace => Ok(()),
        }
    }

    pub fn build(&self) -> Box<dyn MeltingModel> {
        match self {
            Self::NearestNeighbor {
                table,
                salt,
                conditions,
            } => Box::new(NearestNeighbor {
                table: *table,
                salt: *salt,
                conditions: conditions.clone(),
            }),
            Self::Wallace => Box::new(Wallace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_OLIGO: &str = "CGTTCCAAAGATGTGGGCATGAGCTTAC";

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn test_nearest_neighbor_reference_value() {
        let tm = NearestNeighbor::default().tm(REFERENCE_OLIGO).unwrap();
        assert_eq!(round2(tm), 60.32);
    }

    #[test]
    fn test_nearest_neighbor_is_case_insensitive_and_skips_unknown() {
        let model = NearestNeighbor::default();
        let upper = model.tm(REFERENCE_OLIGO).unwrap();
        let lower = model.tm(&REFERENCE_OLIGO.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
        let with_gap = format!("{}NN{}", &REFERENCE_OLIGO[..10], &REFERENCE_OLIGO[10..]);
        assert_eq!(model.tm(&with_gap).unwrap(), upper);
        assert!(model.tm("NNNN").is_none());
    }

    #[test]
    fn test_gc_rich_melts_higher() {
        let model = NearestNeighbor::default();
        let gc_rich = model.tm("GGGGCCCCGGGGCCCCGGGGCCCCG").unwrap();
        let at_rich = model.tm("AAAAAAAAAAAAAAAAAAAAAAAAA").unwrap();
        assert!(gc_rich > at_rich);
    }

    #[test]
    fn test_higher_salt_raises_tm() {
        let low = NearestNeighbor::default();
        let high = NearestNeighbor {
            conditions: ThermoConditions {
                na: 500.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(high.tm(REFERENCE_OLIGO).unwrap() > low.tm(REFERENCE_OLIGO).unwrap());
    }

    #[test]
    fn test_every_salt_correction_is_finite() {
        for salt in SaltCorrection::ALL {
            let model = NearestNeighbor {
                salt,
                ..Default::default()
            };
            let tm = model.tm(REFERENCE_OLIGO).unwrap();
            assert!(tm > 0.0 && tm < 100.0, "{:?} gave {}", salt, tm);
        }
    }

    #[test]
    fn test_magnesium_counts_only_above_dntps() {
        let conditions = ThermoConditions {
            mg: 1.5,
            dntps: 2.0,
            ..Default::default()
        };
        assert_eq!(conditions.monovalent_equivalent(), 50.0);
        let conditions = ThermoConditions {
            mg: 2.0,
            dntps: 1.0,
            ..Default::default()
        };
        assert_eq!(conditions.monovalent_equivalent(), 170.0);
    }

    #[test]
    fn test_wallace_reference_value() {
        assert_eq!(Wallace.tm(REFERENCE_OLIGO), Some(84.0));
        assert_eq!(Wallace.tm("---"), None);
    }

    #[test]
    fn test_method_builds_models() {
        let nn = TmMethod::default().build();
        assert_eq!(round2(nn.tm(REFERENCE_OLIGO).unwrap()), 60.32);
        assert!(nn.name().contains("Allawi"));

        let table_2004 = TmMethod::NearestNeighbor {
            table: NnTableKind::SantaLuciaHicks2004,
            salt: SaltCorrection::default(),
            conditions: ThermoConditions::default(),
        }
        .build();
        assert_eq!(round2(table_2004.tm(REFERENCE_OLIGO).unwrap()), 62.09);

        assert_eq!(TmMethod::Wallace.build().name(), "Wallace rule");
    }

    #[test]
    fn test_zero_salt_is_rejected() {
        let model = NearestNeighbor {
            conditions: ThermoConditions {
                na: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(model.tm("ACGTACGTACGTACGTACGTACGTA"), None);
        assert!(matches!(
            model.conditions.validate(model.salt),
            Err(DesignError::InvalidConditions(_))
        ));

        // Without a salt correction the ion concentration is irrelevant
        let uncorrected = NearestNeighbor {
            salt: SaltCorrection::None,
            ..model
        };
        assert!(uncorrected.tm("ACGTACGTACGTACGTACGTACGTA").is_some());
    }

    #[test]
    fn test_excess_second_strand_is_rejected() {
        let conditions = ThermoConditions {
            dnac2: 100.0,
            ..Default::default()
        };
        let method = TmMethod::NearestNeighbor {
            table: NnTableKind::default(),
            salt: SaltCorrection::default(),
            conditions: conditions.clone(),
        };
        assert!(method.validate().unwrap_err().is_validation());

        let self_complementary = ThermoConditions {
            self_complementary: true,
            ..conditions
        };
        assert!(self_complementary.validate(SaltCorrection::default()).is_ok());
        assert!(TmMethod::Wallace.validate().is_ok());
    }

    #[test]
    fn test_negative_concentration_is_rejected() {
        let conditions = ThermoConditions {
            mg: -1.0,
            ..Default::default()
        };
        assert!(conditions.validate(SaltCorrection::None).is_err());
    }
}
