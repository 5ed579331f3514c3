#![cfg(feature = "egui")]

use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, RichText, Sense};

use crate::view::{CardId, CardView, CellRef};

use super::state::{CardAction, InjectorApp};
use super::text::highlight_query_job;

const CARD_WIDTH: f32 = 280.0;
const LOADING_POLL: Duration = Duration::from_millis(50);

pub fn update(app: &mut InjectorApp, ctx: &egui::Context) {
    let now = Instant::now();
    app.poll_background(now);
    app.view.tick(now);

    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut app.search_input)
                    .hint_text("Brand, description, capacity or impedance")
                    .desired_width(320.0),
            );
            if resp.changed() {
                app.view.input(app.search_input.clone(), now);
            }
            if app.is_loading() {
                ui.spinner();
            }
            ui.separator();
            ui.label(app.view.summary());
            if let Some(date) = &app.last_updated {
                ui.separator();
                ui.weak(format!("Last updated {}", date));
            }
        });
    });

    let views = app.view.renderer().views();
    let query = app.view.term().to_string();
    let mut actions: Vec<CardAction> = Vec::new();
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (id, view) in &views {
                        draw_card(ui, *id, view, &query, &mut actions);
                    }
                });
            });
    });
    for action in actions {
        app.apply(action, now);
    }

    if let Some(notice) = app.view.notice(now) {
        egui::Area::new(egui::Id::new("notice"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -24.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(notice.message.as_str());
                });
            });
    }

    // Keep frames coming while a debounce, notice or load is outstanding.
    let wake = [
        app.view.debouncer().remaining(now),
        app.view.notices().remaining(now),
        app.is_loading().then_some(LOADING_POLL),
    ]
    .into_iter()
    .flatten()
    .min();
    if let Some(d) = wake {
        ctx.request_repaint_after(d);
    }
}

fn draw_card(
    ui: &mut egui::Ui,
    id: CardId,
    view: &CardView,
    query: &str,
    actions: &mut Vec<CardAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            let title = ui.add(
                egui::Label::new(highlight_query_job(&view.title, query)).sense(Sense::click()),
            );
            if title.clicked() {
                actions.push(CardAction::ToggleExpanded(id));
            }
            if let Some(d) = &view.description {
                let resp =
                    ui.add(egui::Label::new(highlight_query_job(d, query)).sense(Sense::click()));
                if resp.clicked() {
                    actions.push(CardAction::ToggleExpanded(id));
                }
            }
            ui.horizontal(|ui| {
                ui.strong("Capacity:");
                if ui
                    .link(view.capacity.as_str())
                    .on_hover_text("Click to switch between CC/min and LB/hour")
                    .clicked()
                {
                    actions.push(CardAction::ToggleUnit(id));
                }
            });
            if let Some(ohm) = &view.impedance {
                ui.horizontal(|ui| {
                    ui.strong("Impedance:");
                    ui.label(ohm.as_str());
                });
            }
            if let Some(p) = &view.pressure {
                ui.horizontal(|ui| {
                    ui.strong("Pressure:");
                    ui.label(p.as_str());
                });
            }
            if view.duplicate {
                ui.colored_label(Color32::from_rgb(230, 150, 40), "⚠ Possible duplicate");
            }

            if view.expanded {
                if !view.tabs.is_empty() {
                    ui.horizontal(|ui| {
                        for (i, tab) in view.tabs.iter().enumerate() {
                            if ui.selectable_label(tab.active, tab.label.as_str()).clicked()
                                && !tab.active
                            {
                                actions.push(CardAction::SelectTab(id, i));
                            }
                        }
                    });
                }
                if let Some(table) = &view.table {
                    egui::Grid::new(("offsets", id.index()))
                        .striped(true)
                        .show(ui, |ui| {
                            for (col, v) in table.voltages.iter().enumerate() {
                                copy_cell(
                                    ui,
                                    RichText::new(v).strong(),
                                    id,
                                    CellRef::voltage(col),
                                    actions,
                                );
                            }
                            ui.end_row();
                            for (col, l) in table.latencies.iter().enumerate() {
                                copy_cell(
                                    ui,
                                    RichText::new(l).monospace(),
                                    id,
                                    CellRef::latency(col),
                                    actions,
                                );
                            }
                            ui.end_row();
                        });
                }
            }

            let toggle = if view.expanded {
                "▾ Hide offsets"
            } else {
                "▸ Show offsets"
            };
            if ui.small_button(toggle).clicked() {
                actions.push(CardAction::ToggleExpanded(id));
            }
        });
    });
}

fn copy_cell(
    ui: &mut egui::Ui,
    text: RichText,
    id: CardId,
    cell: CellRef,
    actions: &mut Vec<CardAction>,
) {
    let resp = ui
        .add(egui::Label::new(text).sense(Sense::click()))
        .on_hover_text("Click to copy the value.");
    if resp.clicked() {
        actions.push(CardAction::Copy(id, cell));
    }
}
