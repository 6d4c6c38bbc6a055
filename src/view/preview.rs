// Preview pane: the shell's implementation of the preview surface
use crate::config::PreviewConfig;
use crate::entry::FileEntry;
use crate::io::{is_likely_binary, read_directory, ListingOptions};
use crate::preview::{PreviewKey, PreviewSurface};
use crate::style::{self, Theme};
use eframe::egui;
use std::fs;
use std::io::Read;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

#[derive(Debug, PartialEq)]
pub enum PreviewContent {
    Text { text: String, truncated: bool },
    Directory(Vec<FileEntry>),
    Binary,
    Error(String),
}

impl PreviewContent {
    /// Read what the pane shows for `entry`. Text is cut at `limits.max_bytes`.
    pub fn load(entry: &FileEntry, limits: &PreviewConfig, listing: &ListingOptions) -> Self {
        if entry.is_dir {
            return match read_directory(&entry.path, listing) {
                Ok(entries) => PreviewContent::Directory(entries),
                Err(e) => PreviewContent::Error(e.to_string()),
            };
        }
        if is_likely_binary(&entry.path) {
            return PreviewContent::Binary;
        }

        let mut data = Vec::new();
        let read = fs::File::open(&entry.path)
            .and_then(|f| f.take(limits.max_bytes).read_to_end(&mut data));
        match read {
            Ok(_) => PreviewContent::Text {
                text: String::from_utf8_lossy(&data).to_string(),
                truncated: entry.size > limits.max_bytes,
            },
            Err(e) => PreviewContent::Error(format!("Read error: {}", e)),
        }
    }
}

pub struct PreviewPane {
    open: bool,
    entry: Option<FileEntry>,
    content: Option<PreviewContent>,
    limits: PreviewConfig,
    listing: ListingOptions,
    theme: Theme,
    /// Highlighted text of the current entry, built once per load
    highlighted: Option<egui::text::LayoutJob>,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl PreviewPane {
    pub fn new(limits: PreviewConfig, listing: ListingOptions, theme: Theme) -> Self {
        Self {
            open: false,
            entry: None,
            content: None,
            limits,
            listing,
            theme,
            highlighted: None,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    pub fn set_listing(&mut self, listing: ListingOptions) {
        self.listing = listing;
    }

    pub fn entry(&self) -> Option<&FileEntry> {
        self.entry.as_ref()
    }

    fn load(&mut self, entry: &FileEntry) {
        let content = PreviewContent::load(entry, &self.limits, &self.listing);
        self.highlighted = match &content {
            PreviewContent::Text { text, .. } => Some(self.highlight(entry, text)),
            _ => None,
        };
        self.content = Some(content);
        self.entry = Some(entry.clone());
    }

    /// Arrow keys pressed this frame. Only meaningful while open.
    pub fn capture_keys(&self, ctx: &egui::Context) -> Vec<PreviewKey> {
        if !self.open {
            return Vec::new();
        }
        ctx.input(|i| {
            let mut keys = Vec::new();
            if i.key_pressed(egui::Key::ArrowUp) {
                keys.push(PreviewKey::Up);
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                keys.push(PreviewKey::Down);
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                keys.push(PreviewKey::Left);
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                keys.push(PreviewKey::Right);
            }
            keys
        })
    }

    pub fn render(&self, ui: &mut egui::Ui) {
        let (Some(entry), Some(content)) = (&self.entry, &self.content) else {
            ui.centered_and_justified(|ui| {
                ui.label("No file selected");
            });
            return;
        };

        ui.add_space(4.0);
        ui.label(egui::RichText::new(entry.display_name()).strong().size(18.0));
        ui.label(format!("{} · {}", entry.kind.label(), entry.display_size()));
        ui.label(format!("Modified: {}", entry.display_modified()));
        ui.separator();

        match content {
            PreviewContent::Text { text, truncated } => {
                if *truncated {
                    ui.label(
                        egui::RichText::new(format!(
                            "Showing the first {}",
                            bytesize::ByteSize(self.limits.max_bytes)
                        ))
                        .italics(),
                    );
                }
                self.render_text(ui, text);
            }
            PreviewContent::Directory(entries) => {
                ui.label(format!("{} items", entries.len()));
                egui::ScrollArea::vertical()
                    .id_salt("preview_dir")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for child in entries {
                            ui.label(format!("{} {}", child.icon(), child.display_name()));
                        }
                    });
            }
            PreviewContent::Binary => {
                ui.centered_and_justified(|ui| {
                    ui.label("Binary file");
                });
            }
            PreviewContent::Error(message) => {
                ui.colored_label(style::ERROR, message.as_str());
            }
        }
    }

    fn render_text(&self, ui: &mut egui::Ui, text: &str) {
        egui::ScrollArea::vertical()
            .id_salt("preview_code")
            .auto_shrink([false, false])
            .show(ui, |ui| match &self.highlighted {
                Some(job) => {
                    ui.label(job.clone());
                }
                None => {
                    ui.monospace(text);
                }
            });
    }

    fn highlight(&self, entry: &FileEntry, text: &str) -> egui::text::LayoutJob {
        let font_id = egui::FontId::monospace(12.0);
        let mut job = egui::text::LayoutJob::default();

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(&entry.extension)
            .or_else(|| self.syntax_set.find_syntax_by_first_line(text))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let theme_name = match self.theme {
            Theme::Dark => "base16-ocean.dark",
            Theme::Light => "base16-ocean.light",
        };
        let Some(highlight_theme) = self.theme_set.themes.get(theme_name) else {
            job.append(
                text,
                0.0,
                egui::TextFormat::simple(font_id, self.theme.visuals().text_color()),
            );
            return job;
        };

        let mut highlighter = HighlightLines::new(syntax, highlight_theme);
        for line in LinesWithEndings::from(text).take(self.limits.max_lines) {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            for (span, piece) in ranges {
                let fg = span.foreground;
                job.append(
                    piece,
                    0.0,
                    egui::TextFormat::simple(font_id.clone(), egui::Color32::from_rgb(fg.r, fg.g, fg.b)),
                );
            }
        }
        job
    }
}

impl PreviewSurface for PreviewPane {
    fn is_open(&self) -> bool {
        self.open
    }

    fn show(&mut self, entry: &FileEntry) {
        self.open = true;
        self.load(entry);
    }

    fn update(&mut self, entry: &FileEntry) {
        if !self.open || self.entry.as_ref() == Some(entry) {
            return;
        }
        self.load(entry);
    }

    fn hide(&mut self) {
        self.open = false;
        self.entry = None;
        self.content = None;
        self.highlighted = None;
    }
}
