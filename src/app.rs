//! Main application state and UI

use eframe::egui;
use tracing::info;

use fish_probe_design::{
    parse_single_fasta, DesignError, DesignSession, ExportFormat, NnTableKind, ParamInput,
    SaltCorrection, ThermoConditions, TmMethod,
};

/// Application state
pub struct ProbeDesignApp {
    // Input state
    sequence_input: String,
    params_input: ParamInput,

    // Melting temperature model selection
    model_selection: ModelSelection,
    nn_table: NnTableKind,
    salt_correction: SaltCorrection,
    conditions: ThermoConditions,

    // Results
    session: DesignSession,
    status: Option<Status>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelSelection {
    NearestNeighbor,
    Wallace,
}

/// Message shown under the buttons
#[derive(Debug, Clone)]
enum Status {
    Info(String),
    Error(String),
}

impl Default for ProbeDesignApp {
    fn default() -> Self {
        Self {
            sequence_input: String::new(),
            params_input: ParamInput::default(),
            model_selection: ModelSelection::NearestNeighbor,
            nn_table: NnTableKind::default(),
            salt_correction: SaltCorrection::default(),
            conditions: ThermoConditions::default(),
            session: DesignSession::default(),
            status: None,
        }
    }
}

impl ProbeDesignApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn selected_method(&self) -> TmMethod {
        match self.model_selection {
            ModelSelection::NearestNeighbor => TmMethod::NearestNeighbor {
                table: self.nn_table,
                salt: self.salt_correction,
                conditions: self.conditions.clone(),
            },
            ModelSelection::Wallace => TmMethod::Wallace,
        }
    }

    fn run_design(&mut self) {
        self.session.method = self.selected_method();
        self.status = Some(
            match self.session.generate(&self.sequence_input, &self.params_input) {
                Ok(count) => Status::Info(format!("Generated {} probes.", count)),
                Err(e) => Status::Error(e.to_string()),
            },
        );
    }

    fn save_probes(&mut self, format: ExportFormat) {
        if let Err(e) = self.session.exportable() {
            self.status = Some(Status::Error(e.to_string()));
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter(format!("{} files", format.label()), &[format.extension()])
            .add_filter("All Files", &["*"])
            .set_file_name(format.default_file_name())
            .save_file()
        else {
            return;
        };

        self.status = Some(match self.session.export(format, &path) {
            Ok(()) => Status::Info(format!("File saved: {}", path.display())),
            Err(e) => Status::Error(e.to_string()),
        });
    }

    fn load_sequence_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("FASTA", &["fasta", "fa", "fna", "fas", "txt"])
            .pick_file()
        else {
            return;
        };

        let loaded = std::fs::read_to_string(&path)
            .map_err(DesignError::from)
            .and_then(|text| parse_single_fasta(&text));
        match loaded {
            Ok(record) => {
                info!(name = %record.name, length = record.sequence.len(), "sequence loaded");
                self.status = Some(Status::Info(format!(
                    "Loaded {} ({} bp)",
                    record.name,
                    record.sequence.len()
                )));
                self.sequence_input = record.sequence;
            }
            Err(e) => {
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}

impl eframe::App for ProbeDesignApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| match &self.status {
                Some(Status::Info(message)) => {
                    ui.colored_label(egui::Color32::from_rgb(100, 200, 100), message.as_str());
                }
                Some(Status::Error(message)) => {
                    ui.colored_label(egui::Color32::RED, format!("Error: {}", message));
                }
                None => {
                    ui.label("Enter a DNA sequence and press Generate Probes");
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_input(ui);
                ui.add_space(5.0);
                self.show_parameters(ui);
                ui.add_space(5.0);
                self.show_actions(ui);
                ui.add_space(5.0);
                self.show_results(ui);
            });
        });
    }
}

impl ProbeDesignApp {
    fn show_input(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.heading("DNA Sequence");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        self.sequence_input.clear();
                    }
                    if ui.button("Load File").clicked() {
                        self.load_sequence_file();
                    }
                    if ui.button("Load Example").clicked() {
                        self.sequence_input = EXAMPLE_SEQUENCE.to_string();
                    }
                });
            });

            ui.label(
                "Plain sequence or FASTA. Whitespace and '>' header lines are removed; \
                 Start/End count positions in the cleaned sequence.",
            );

            egui::ScrollArea::vertical()
                .id_salt("sequence_scroll")
                .max_height(140.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.sequence_input)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(5),
                    );
                });
        });
    }

    fn show_parameters(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Probe Parameters");
            egui::Grid::new("parameter_grid")
                .num_columns(4)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Probe Length:");
                    text_field(ui, &mut self.params_input.probe_length);
                    ui.label("Overlap:");
                    text_field(ui, &mut self.params_input.overlap);
                    ui.end_row();

                    ui.label("GC Min (%):");
                    text_field(ui, &mut self.params_input.gc_min);
                    ui.label("GC Max (%):");
                    text_field(ui, &mut self.params_input.gc_max);
                    ui.end_row();

                    ui.label("Tm Min (°C):");
                    text_field(ui, &mut self.params_input.tm_min);
                    ui.label("Tm Max (°C):");
                    text_field(ui, &mut self.params_input.tm_max);
                    ui.end_row();
                });
        });

        ui.add_space(5.0);

        ui.group(|ui| {
            ui.heading("Melting Temperature Model");
            ui.radio_value(
                &mut self.model_selection,
                ModelSelection::NearestNeighbor,
                "Nearest neighbour thermodynamics",
            );

            if self.model_selection == ModelSelection::NearestNeighbor {
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    egui::ComboBox::from_label("Parameter table")
                        .selected_text(self.nn_table.description())
                        .show_ui(ui, |ui| {
                            for table in NnTableKind::ALL {
                                ui.selectable_value(&mut self.nn_table, table, table.description());
                            }
                        });
                });
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    egui::ComboBox::from_label("Salt correction")
                        .selected_text(self.salt_correction.description())
                        .show_ui(ui, |ui| {
                            for salt in SaltCorrection::ALL {
                                ui.selectable_value(
                                    &mut self.salt_correction,
                                    salt,
                                    salt.description(),
                                );
                            }
                        });
                });
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    ui.label("Strand 1 (nM):");
                    ui.add(egui::DragValue::new(&mut self.conditions.dnac1).range(0.0..=10000.0));
                    ui.label("Strand 2 (nM):");
                    ui.add(egui::DragValue::new(&mut self.conditions.dnac2).range(0.0..=10000.0));
                });
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    ui.label("Na+ (mM):");
                    ui.add(egui::DragValue::new(&mut self.conditions.na).range(0.0..=2000.0));
                    ui.label("K+ (mM):");
                    ui.add(egui::DragValue::new(&mut self.conditions.k).range(0.0..=2000.0));
                    ui.label("Tris (mM):");
                    ui.add(egui::DragValue::new(&mut self.conditions.tris).range(0.0..=2000.0));
                });
                ui.horizontal(|ui| {
                    ui.add_space(20.0);
                    ui.label("Mg2+ (mM):");
                    ui.add(
                        egui::DragValue::new(&mut self.conditions.mg)
                            .range(0.0..=100.0)
                            .speed(0.1),
                    );
                    ui.label("dNTPs (mM):");
                    ui.add(
                        egui::DragValue::new(&mut self.conditions.dntps)
                            .range(0.0..=100.0)
                            .speed(0.1),
                    );
                    ui.checkbox(&mut self.conditions.self_complementary, "Self-complementary");
                });
            }

            ui.radio_value(
                &mut self.model_selection,
                ModelSelection::Wallace,
                "Wallace rule (4 x GC + 2 x AT)",
            );
        });
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Generate Probes").clicked() {
                self.run_design();
            }
            ui.separator();
            for format in ExportFormat::ALL {
                if ui.button(format!("Save as {}", format.label())).clicked() {
                    self.save_probes(format);
                }
            }
        });
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let probes = self.session.probes();
        if probes.is_empty() {
            return;
        }

        ui.group(|ui| {
            ui.heading("Probes");
            if let Some((gc, tm)) = self.session.summary() {
                ui.label(format!(
                    "{} probes, mean GC {:.2}%, mean Tm {:.2} °C",
                    probes.len(),
                    gc,
                    tm
                ));
            }
            if let (Some(params), Some(method)) =
                (self.session.params(), self.session.produced_with())
            {
                ui.label(format!(
                    "Length {}, overlap {}, {}",
                    params.probe_length,
                    params.overlap,
                    method.build().name()
                ));
            }

            egui::ScrollArea::both()
                .id_salt("results_scroll")
                .max_height(300.0)
                .show(ui, |ui| {
                    egui::Grid::new("results_grid")
                        .striped(true)
                        .num_columns(6)
                        .show(ui, |ui| {
                            for title in ["#", "Probe", "GC_Content", "Tm", "Start", "End"] {
                                ui.strong(title);
                            }
                            ui.end_row();

                            for (idx, probe) in probes.iter().enumerate() {
                                ui.label(format!("{}", idx + 1));
                                ui.monospace(probe.sequence.as_str());
                                ui.label(format!("{:.2}", probe.gc_content));
                                ui.label(format!("{:.2}", probe.melting_temperature));
                                ui.label(probe.start.to_string());
                                ui.label(probe.end.to_string());
                                ui.end_row();
                            }
                        });
                });
        });
    }
}

fn text_field(ui: &mut egui::Ui, value: &mut String) {
    ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
}

const EXAMPLE_SEQUENCE: &str = "ATGGCGTACGCTAGCTAGGCTTACGATCGGATCCGTAGCTAGCATCGATCGGCTAGCTTAGCGATCG\
GCTAGCGGATCCATGCTAGCTAGGCGCTAGCATCGACTGACGTAGCTAGCGCGATCGATGCTAGCTAGC\
TAGGCTACGATCGGCTAGCTAGCGATCGTAGCTAGCTAGGCGATCGATCGTACGATCGGCTAGCTAGCG";
