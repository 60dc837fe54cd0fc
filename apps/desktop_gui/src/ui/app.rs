//! The Form Submission Controller as an egui app: one product form, two
//! trigger buttons, a results region with one slot per prediction kind, and
//! a single error slot. All presentation state lives here, owned by the app
//! and reset at the start of every submission.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{ProductFields, FORM_VALIDATION_MESSAGE},
    protocol::{PredictionEndpoint, PredictionOutcome, ResultPresentation},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

/// A result slot's content: the rendered line plus the presentation state
/// that decides how the slot is colored.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub text: String,
    pub presentation: ResultPresentation,
}

impl RenderedResult {
    fn from_outcome(outcome: &PredictionOutcome) -> Self {
        Self {
            text: outcome.display_text(),
            presentation: outcome.presentation(),
        }
    }

    fn color(&self) -> egui::Color32 {
        match self.presentation {
            ResultPresentation::PriceNormal => egui::Color32::LIGHT_BLUE,
            ResultPresentation::FraudDetected => egui::Color32::from_rgb(220, 80, 80),
            ResultPresentation::FraudNotDetected => egui::Color32::from_rgb(90, 190, 120),
        }
    }
}

struct PendingRequest {
    generation: u64,
    endpoint: PredictionEndpoint,
}

pub struct PredictApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: ProductFields,

    results_visible: bool,
    price_slot: Option<RenderedResult>,
    fraud_slot: Option<RenderedResult>,
    error_text: Option<String>,

    status: String,
    startup_failed: bool,

    // Re-entrancy guard: each submission gets a fresh generation, and only
    // events carrying the generation of the outstanding request may touch
    // the presentation state.
    request_generation: u64,
    pending_request: Option<PendingRequest>,
}

impl PredictApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: ProductFields::default(),
            results_visible: false,
            price_slot: None,
            fraud_slot: None,
            error_text: None,
            status: "Starting backend worker...".to_string(),
            startup_failed: false,
            request_generation: 0,
            pending_request: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::StartupFailed(error) => {
                    self.startup_failed = true;
                    self.pending_request = None;
                    self.display_error(error.message());
                    self.status = format!("{} failure", error.category().label());
                }
                UiEvent::PredictionReady {
                    generation,
                    outcome,
                } => {
                    if !self.is_current(generation) {
                        tracing::debug!(generation, "discarding stale prediction result");
                        continue;
                    }
                    self.pending_request = None;
                    self.render_outcome(&outcome);
                    self.status = format!("Completed {}", outcome.endpoint().label());
                }
                UiEvent::PredictionFailed { generation, error } => {
                    if !self.is_current(generation) {
                        tracing::debug!(generation, "discarding stale prediction failure");
                        continue;
                    }
                    self.pending_request = None;
                    self.display_error(error.message());
                    self.status = format!("{} failure", error.category().label());
                }
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.pending_request
            .as_ref()
            .is_some_and(|pending| pending.generation == generation)
    }

    /// Trigger-click entry point shared by both buttons: reset, validate,
    /// then hand the query to the backend worker.
    fn submit(&mut self, endpoint: PredictionEndpoint) {
        self.clear_results();

        let query = match self.form.parse() {
            Ok(query) => query,
            Err(err) => {
                tracing::warn!(endpoint = endpoint.path(), "form validation failed: {err}");
                self.display_error(FORM_VALIDATION_MESSAGE);
                return;
            }
        };

        self.request_generation += 1;
        let generation = self.request_generation;
        self.pending_request = Some(PendingRequest {
            generation,
            endpoint,
        });
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                generation,
                endpoint,
                query,
            },
            &mut self.status,
        );
        if queued {
            self.status = format!("Requesting {}...", endpoint.label());
        } else {
            self.pending_request = None;
        }
    }

    fn render_outcome(&mut self, outcome: &PredictionOutcome) {
        self.results_visible = true;
        let rendered = RenderedResult::from_outcome(outcome);
        match outcome {
            PredictionOutcome::Price { .. } => self.price_slot = Some(rendered),
            PredictionOutcome::Fraud { .. } => self.fraud_slot = Some(rendered),
        }
    }

    fn display_error(&mut self, message: &str) {
        self.error_text = Some(format!("Error: {message}"));
    }

    fn clear_results(&mut self) {
        self.price_slot = None;
        self.fraud_slot = None;
        self.error_text = None;
        self.results_visible = false;
    }

    fn form_text_field(
        ui: &mut egui::Ui,
        label: &str,
        hint: &str,
        value: &mut String,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY);
        ui.add(edit)
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        Self::form_text_field(ui, "Brand", "Acme", &mut self.form.brand);
        Self::form_text_field(ui, "Category", "Footwear", &mut self.form.category);
        Self::form_text_field(ui, "Material", "Leather", &mut self.form.material);
        Self::form_text_field(ui, "Rating", "4.5", &mut self.form.rating);
        Self::form_text_field(ui, "Transactions", "12", &mut self.form.transactions);
    }

    fn show_triggers(&mut self, ui: &mut egui::Ui) {
        let idle = self.pending_request.is_none() && !self.startup_failed;
        ui.horizontal(|ui| {
            let predict =
                ui.add_enabled(idle, egui::Button::new(egui::RichText::new("Predict Price")));
            let detect =
                ui.add_enabled(idle, egui::Button::new(egui::RichText::new("Detect Fraud")));
            if predict.clicked() {
                self.submit(PredictionEndpoint::Price);
            }
            if detect.clicked() {
                self.submit(PredictionEndpoint::Fraud);
            }
            if self.pending_request.is_some() {
                ui.spinner();
                ui.weak("Awaiting response...");
            }
        });
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        if self.results_visible {
            ui.separator();
            ui.heading("Results");
            for slot in [&self.price_slot, &self.fraud_slot].into_iter().flatten() {
                ui.colored_label(slot.color(), egui::RichText::new(&slot.text).strong());
            }
        }

        if let Some(error) = &self.error_text {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(220, 80, 80),
                egui::RichText::new(error).strong(),
            );
        }
    }
}

impl eframe::App for PredictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Smart Pricing & Fraud Detection");
            ui.weak("Submit product attributes for a price estimate or a fraud check.");
            ui.add_space(8.0);

            self.show_form(ui);
            ui.add_space(8.0);
            self.show_triggers(ui);
            self.show_results(ui);

            ui.add_space(12.0);
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        if self.pending_request.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
