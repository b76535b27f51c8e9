use crate::statics;
use crate::{PlistFormat, SavedSearchEditor, ScriptedFinder};
use anyhow::Context as _;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::collections::HashSet;
use std::path::PathBuf;

pub fn run_gui() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 520.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ScopeApp::default()))),
    )
}

/// The main application state and GUI logic.
/// Stores the SavedSearchEditor (owned) plus UI state (selection, buffers).
struct ScopeApp {
    editor: SavedSearchEditor,
    document_path: Option<PathBuf>,
    dialog_dir: Option<PathBuf>,
    add_path_input: String,
    selection: HashSet<PathBuf>,
    status: String,
    last_error: Option<String>,
    about_open: bool,
    theme_dark: bool,
}

impl Default for ScopeApp {
    fn default() -> Self {
        Self {
            editor: SavedSearchEditor::new(Box::new(ScriptedFinder)),
            document_path: None,
            dialog_dir: None,
            add_path_input: String::new(),
            selection: HashSet::new(),
            status: String::new(),
            last_error: None,
            about_open: false,
            theme_dark: true,
        }
    }
}

impl ScopeApp {
    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter("Saved Search", &["savedSearch"]);

        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };

        let result = self
            .editor
            .load_path(&path)
            .with_context(|| format!("loading {}", path.display()));
        match result {
            Ok(()) => {
                let format_label = match self.editor.document().map(|d| d.source_format()) {
                    Some(PlistFormat::Xml) => statics::EN_FORMAT_XML,
                    _ => statics::EN_FORMAT_BINARY,
                };
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {} ({format_label})", path.display());
                self.document_path = Some(path);
                self.selection.clear();
                self.add_path_input.clear();
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load: {e:#}"));
            }
        }
    }

    fn new_document(&mut self) {
        self.editor.new_document();
        self.document_path = None;
        self.selection.clear();
        self.add_path_input.clear();
        self.status = format!("New smart folder {}", statics::EN_PLACEHOLDER_UNSAVED);
        self.last_error = None;
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(file_name) = self.document_path.as_ref().and_then(|p| p.file_name()) {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }

        let Some(path) = dlg.save_file() else {
            return;
        };

        let result = self
            .editor
            .commit_and_save(&path)
            .with_context(|| format!("writing {}", path.display()));
        match result {
            Ok(()) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Saved {}", path.display());
                self.document_path = Some(path);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to save: {e:#}"));
            }
        }
    }

    fn add_typed_path(&mut self) {
        let trimmed = self.add_path_input.trim();
        if trimmed.is_empty() {
            return;
        }
        self.editor.insert_path(PathBuf::from(trimmed), true);
        self.add_path_input.clear();
    }

    fn add_folder_dialog(&mut self) {
        let mut dlg = rfd::FileDialog::new();
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        let Some(folder) = dlg.pick_folder() else {
            return;
        };
        self.editor.insert_path(folder, true);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.editor.is_loaded() {
            return;
        }
        // Each accepted item goes to the front, one per drop, same as the
        // platform drag target this replaces.
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.editor.insert_path(path, true);
            }
        }
    }

    fn render_path_table(&mut self, ui: &mut egui::Ui) {
        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
        let paths: Vec<PathBuf> = self.editor.paths().to_vec();

        enum RowOp {
            MoveUp(usize),
            MoveDown(usize),
        }

        let mut op: Option<RowOp> = None;

        ui.push_id("scope_path_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(60.0).resizable(false))
                .column(Column::remainder().resizable(true))
                .column(Column::initial(110.0).resizable(false))
                .header(row_h, |mut header| {
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_INDEX);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_COL_PATH);
                    });
                    header.col(|ui| {
                        ui.strong(statics::EN_EMPTY);
                    });
                })
                .body(|mut body| {
                    for (idx, path) in paths.iter().enumerate() {
                        body.row(row_h, |mut row| {
                            row.col(|ui| {
                                ui.monospace(idx.to_string());
                            });
                            row.col(|ui| {
                                let selected = self.selection.contains(path);
                                if ui
                                    .selectable_label(selected, path.display().to_string())
                                    .clicked()
                                {
                                    if selected {
                                        self.selection.remove(path);
                                    } else {
                                        self.selection.insert(path.clone());
                                    }
                                }
                            });
                            row.col(|ui| {
                                ui.horizontal(|ui| {
                                    if ui.small_button(statics::EN_BTN_UP).clicked() {
                                        op = Some(RowOp::MoveUp(idx));
                                    }
                                    if ui.small_button(statics::EN_BTN_DOWN).clicked() {
                                        op = Some(RowOp::MoveDown(idx));
                                    }
                                });
                            });
                        });
                    }
                });
        });

        match op {
            Some(RowOp::MoveUp(idx)) if idx > 0 => self.editor.move_path(idx, idx - 1),
            // Out-of-bounds targets are ignored by the editor.
            Some(RowOp::MoveDown(idx)) => self.editor.move_path(idx, idx + 1),
            _ => {}
        }
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }
                if ui.button(statics::EN_BTN_NEW).clicked() {
                    self.new_document();
                }

                let has_doc = self.editor.is_loaded();
                if ui
                    .add_enabled(has_doc, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }

                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }

                if self.editor.is_dirty() {
                    ui.separator();
                    ui.label(statics::EN_BADGE_MODIFIED);
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_BLURB);
                    ui.label(statics::EN_ABOUT_FINDER_NOTE);
                    ui.separator();
                    ui.hyperlink_to(
                        format!("{} @ {}", statics::EN_PROJECT_REPO, statics::GITHUB_URL),
                        statics::GITHUB_URL,
                    );
                });
            self.about_open = open;
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if !self.editor.is_loaded() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
                ui.label(statics::EN_HOME_DROP_HINT);
            });
            return;
        }

        egui::TopBottomPanel::bottom("actions_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(statics::EN_LABEL_ADD_PATH);
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.add_path_input)
                        .hint_text(statics::EN_HINT_ADD_PATH)
                        .desired_width(300.0),
                );
                let submitted =
                    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button(statics::EN_BTN_ADD_PATH).clicked() || submitted {
                    self.add_typed_path();
                }
                if ui.button(statics::EN_BTN_ADD_FOLDER).clicked() {
                    self.add_folder_dialog();
                }

                ui.separator();
                let selected_count = self.selection.len();
                if ui
                    .add_enabled(
                        selected_count > 0,
                        egui::Button::new(statics::EN_BTN_REMOVE_SELECTED),
                    )
                    .clicked()
                {
                    let selected = std::mem::take(&mut self.selection);
                    self.editor.remove_paths(&selected);
                }
                if selected_count > 0 {
                    ui.label(format!(
                        "{} {selected_count}",
                        statics::EN_SELECTED_COUNT_LABEL
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(statics::EN_HEADING_SCOPE);
                let name = self
                    .document_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
                ui.monospace(name);
            });
            ui.separator();

            if self.editor.paths().is_empty() {
                ui.label(statics::EN_SCOPE_EMPTY);
            } else {
                self.render_path_table(ui);
            }
        });
    }
}
