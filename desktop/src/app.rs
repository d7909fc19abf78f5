use eframe::egui;
use quiz_core::{
    DifficultyTier, ExerciseMode, OptionMark, Question, Scoreboard, Session, Stage, TableNumber,
    Verdict,
};
use std::time::Instant;
use tracing::warn;

const CORRECT: egui::Color32 = egui::Color32::from_rgb(50, 205, 50);
const WRONG: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
const NEUTRAL: egui::Color32 = egui::Color32::from_rgb(200, 200, 200);
const PENDING: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);

const BUTTON: [f32; 2] = [220.0, 40.0];
const OPTION_BUTTON: [f32; 2] = [120.0, 48.0];

enum Action {
    Tier(DifficultyTier),
    Mode(ExerciseMode),
    Table(TableNumber),
    Answer(u32),
    Restart,
}

#[derive(Default)]
pub struct MathQuizApp {
    session: Session,
}

impl MathQuizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn apply(&mut self, action: Action, now: Instant) {
        let result = match action {
            Action::Tier(tier) => self.session.select_tier(tier),
            Action::Mode(mode) => self.session.select_mode(mode),
            Action::Table(table) => self.session.select_table(table),
            Action::Answer(answer) => self.session.submit(answer, now).map(|_| ()),
            Action::Restart => {
                self.session.restart();
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!(%err, "quiz action rejected");
        }
    }
}

impl eframe::App for MathQuizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if let Err(err) = self.session.tick(now) {
            warn!(%err, "could not advance to the next question");
        }
        if let Some(wait) = self.session.time_until_advance(now) {
            ctx.request_repaint_after(wait);
        }

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                action = match self.session.stage() {
                    Stage::SelectTier => tier_screen(ui),
                    Stage::SelectMode { .. } => mode_screen(ui),
                    Stage::SelectTable { .. } => table_screen(ui),
                    Stage::Answering { question, .. } => {
                        question_screen(ui, question, None, self.session.score())
                    }
                    Stage::Feedback {
                        question, verdict, ..
                    } => question_screen(ui, question, Some(verdict), self.session.score()),
                };
            });
        });

        if let Some(action) = action {
            self.apply(action, now);
            ctx.request_repaint();
        }
    }
}

fn tier_screen(ui: &mut egui::Ui) -> Option<Action> {
    ui.heading("Choose a difficulty");
    ui.add_space(20.0);

    let mut picked = None;
    for tier in DifficultyTier::ALL {
        if ui.add_sized(BUTTON, egui::Button::new(tier.label())).clicked() {
            picked = Some(Action::Tier(tier));
        }
        ui.add_space(8.0);
    }
    picked
}

fn mode_screen(ui: &mut egui::Ui) -> Option<Action> {
    ui.heading("Choose an exercise type");
    ui.add_space(20.0);

    let mut picked = None;
    for mode in ExerciseMode::ALL {
        if ui.add_sized(BUTTON, egui::Button::new(mode.label())).clicked() {
            picked = Some(Action::Mode(mode));
        }
        ui.add_space(8.0);
    }
    picked
}

fn table_screen(ui: &mut egui::Ui) -> Option<Action> {
    ui.heading("Choose a times table");
    ui.add_space(20.0);

    let mut picked = None;
    egui::Grid::new("tables")
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for table in TableNumber::all() {
                let label = format!("Table of {table}");
                if ui.add_sized(OPTION_BUTTON, egui::Button::new(label)).clicked() {
                    picked = Some(Action::Table(table));
                }
                if table.get() % 2 == 0 {
                    ui.end_row();
                }
            }
        });
    picked
}

fn question_screen(
    ui: &mut egui::Ui,
    question: &Question,
    verdict: Option<&Verdict>,
    score: &Scoreboard,
) -> Option<Action> {
    let mut picked = None;

    ui.heading("Math Quiz");
    ui.add_space(20.0);
    ui.label(
        egui::RichText::new(format!("Question: {}", question.expression))
            .size(32.0)
            .strong(),
    );
    ui.add_space(20.0);

    egui::Grid::new("options")
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (idx, option) in question.options.iter().copied().enumerate() {
                let fill = match verdict.map(|v| v.mark(option)) {
                    None => PENDING,
                    Some(OptionMark::Correct) => CORRECT,
                    Some(OptionMark::WrongPick) => WRONG,
                    Some(OptionMark::Neutral) => NEUTRAL,
                };
                let button = egui::Button::new(egui::RichText::new(option.to_string()).size(22.0))
                    .fill(fill)
                    .min_size(OPTION_BUTTON.into());
                if ui.add_enabled(verdict.is_none(), button).clicked() {
                    picked = Some(Action::Answer(option));
                }
                if idx % 2 == 1 {
                    ui.end_row();
                }
            }
        });

    ui.add_space(15.0);
    match verdict {
        Some(v) if v.is_correct => {
            ui.label(egui::RichText::new("✅ Correct!").size(24.0).color(CORRECT));
        }
        Some(v) => {
            ui.label(
                egui::RichText::new(format!(
                    "❌ Wrong. The correct answer is {}",
                    v.correct_answer
                ))
                .size(20.0)
                .color(WRONG),
            );
        }
        None => {}
    }

    ui.add_space(20.0);
    ui.separator();
    ui.label(format!("Score: {}", score.correct));
    ui.label(format!("Success rate: {}%", score.percentage()));
    ui.add_space(15.0);

    if ui.button("🔁 Restart").clicked() {
        picked = Some(Action::Restart);
    }
    picked
}
