use std::io::{self, Write};

use crate::{
    domain::{HealthStatus, WordLean},
    draft::DraftStats,
    samples::SampleEmail,
    view::model::preview,
};

use super::{
    model::{BatchViewModel, DashboardView, ResultViewModel},
    ResultView, Theme,
};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: &'static str,
    spam: &'static str,
    ham: &'static str,
    warn: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    fn new(theme: Theme, color: bool) -> Self {
        if !color {
            return Self {
                accent: "",
                spam: "",
                ham: "",
                warn: "",
                muted: "",
                reset: "",
            };
        }
        match theme {
            Theme::Dark => Self {
                accent: "\x1b[96m",
                spam: "\x1b[91m",
                ham: "\x1b[92m",
                warn: "\x1b[93m",
                muted: "\x1b[90m",
                reset: "\x1b[0m",
            },
            Theme::Light => Self {
                accent: "\x1b[34m",
                spam: "\x1b[31m",
                ham: "\x1b[32m",
                warn: "\x1b[33m",
                muted: "\x1b[2m",
                reset: "\x1b[0m",
            },
        }
    }

    fn verdict(&self, is_spam: bool) -> &'static str {
        if is_spam {
            self.spam
        } else {
            self.ham
        }
    }
}

/// Renders to any writer; stdout in the binary, a buffer in tests.
pub struct TerminalView<W: Write + Send> {
    out: W,
    color: bool,
    palette: Palette,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, theme: Theme, color: bool) -> Self {
        Self {
            out,
            color,
            palette: Palette::new(theme, color),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, title: &str) -> io::Result<()> {
        let p = self.palette;
        writeln!(self.out, "\n{}{title}{}", p.accent, p.reset)
    }
}

fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

impl<W: Write + Send> ResultView for TerminalView<W> {
    fn show_result(&mut self, vm: &ResultViewModel) -> io::Result<()> {
        let p = self.palette;
        writeln!(
            self.out,
            "\n{}{} {}{}",
            p.verdict(vm.is_spam),
            vm.badge_icon,
            vm.badge_text,
            p.reset
        )?;
        writeln!(
            self.out,
            "Confidence: {:.2}%  {}  {}",
            vm.confidence_percent,
            bar(vm.confidence_percent, BAR_WIDTH),
            vm.tier.label()
        )?;
        writeln!(self.out, "Risk: {} {}", vm.risk.icon, vm.risk.label)?;
        writeln!(
            self.out,
            "Email length: {} characters   Processed length: {} characters",
            vm.email_length, vm.cleaned_length
        )?;

        self.heading(vm.explanation.title)?;
        writeln!(self.out, "{}", vm.explanation.body)?;

        self.heading("Spam indicators")?;
        let ind = &vm.indicators;
        writeln!(
            self.out,
            "  URLs: {}   Capitalization: {:.1}%   Exclamation marks: {}   Money terms: {}",
            ind.url_count, ind.caps_percentage, ind.exclamation_count, ind.money_terms
        )?;

        self.heading("Suspicious keywords")?;
        if vm.keywords.is_empty() {
            writeln!(self.out, "  {}No suspicious keywords detected{}", p.muted, p.reset)?;
        } else {
            let badges: Vec<String> = vm.keywords.iter().map(|k| format!("[{k}]")).collect();
            writeln!(self.out, "  {}{}{}", p.warn, badges.join(" "), p.reset)?;
        }

        self.heading("Safety recommendations")?;
        if vm.recommendations.is_empty() {
            writeln!(self.out, "  No specific recommendations at this time.")?;
        } else {
            for rec in &vm.recommendations {
                writeln!(self.out, "  • ({}) {}", rec.class, rec.text)?;
            }
        }

        if !vm.words.is_empty() {
            self.heading("Top words")?;
            let cloud: Vec<String> = vm
                .word_cloud()
                .iter()
                .map(|w| {
                    let color = if w.lean == WordLean::Spam { p.spam } else { p.ham };
                    format!("{color}{}{} ({:.3})", w.word, p.reset, w.importance)
                })
                .collect();
            writeln!(self.out, "  {}", cloud.join("  "))?;

            self.heading("Word importance")?;
            for w in &vm.words {
                writeln!(
                    self.out,
                    "  {:<18} {} {:.3} {}",
                    w.word,
                    bar(w.bar_percent(), 16),
                    w.importance.abs(),
                    w.lean.as_str()
                )?;
            }
        }

        self.heading("Patterns")?;
        for group in &vm.patterns {
            if group.items.is_empty() {
                writeln!(
                    self.out,
                    "  {} (0): {}None detected{}",
                    group.label, p.muted, p.reset
                )?;
            } else {
                writeln!(self.out, "  {} ({}):", group.label, group.items.len())?;
                for item in &group.items {
                    writeln!(self.out, "    - {item}")?;
                }
            }
        }

        if let Some(comparison) = &vm.comparison {
            self.heading("Model comparison")?;
            writeln!(
                self.out,
                "  Agreement: {}%  {}",
                comparison.agreement_percent,
                comparison.level.description()
            )?;
            for card in &comparison.models {
                writeln!(
                    self.out,
                    "  {:<24} {}{}{}  {}% {}",
                    card.name,
                    p.verdict(card.prediction.is_spam()),
                    card.label,
                    p.reset,
                    card.confidence_percent,
                    bar(card.confidence_percent, 12)
                )?;
            }
        }
        self.out.flush()
    }

    fn show_batch(&mut self, vm: &BatchViewModel) -> io::Result<()> {
        let p = self.palette;
        let s = &vm.summary;
        self.heading("Batch results")?;
        writeln!(
            self.out,
            "Total: {}   Processed: {}   Spam: {}   Legitimate: {}   Avg confidence: {:.1}%",
            s.total, s.processed, s.spam_count, s.ham_count, s.avg_confidence_percent
        )?;
        writeln!(
            self.out,
            "\n{:>4}  {:<53}  {:<10} {:>10}  {:<9} {:>4} {:>8}",
            "#", "Email", "Prediction", "Confidence", "Risk", "URLs", "Keywords"
        )?;
        for row in &vm.rows {
            writeln!(
                self.out,
                "{:>4}  {:<53}  {}{:<10}{} {:>9.1}%  {:<9} {:>4} {:>8}",
                row.position,
                row.preview.replace('\n', " "),
                p.verdict(row.prediction.is_spam()),
                row.prediction.as_str().to_uppercase(),
                p.reset,
                row.confidence_percent,
                row.risk_level.as_str(),
                row.url_count,
                row.suspicious_keywords_count
            )?;
        }
        self.out.flush()
    }

    fn show_dashboard(&mut self, vm: &DashboardView) -> io::Result<()> {
        let p = self.palette;
        let s = &vm.stats;
        self.heading("Scan history")?;
        writeln!(
            self.out,
            "Total scans: {}   Spam caught: {}   Legitimate: {}   Avg confidence: {:.1}%",
            s.total, s.spam_count, s.ham_count, s.avg_confidence_percent
        )?;
        if vm.items.is_empty() {
            writeln!(
                self.out,
                "{}No scan history yet. Start by checking an email!{}",
                p.muted, p.reset
            )?;
            return self.out.flush();
        }
        for item in &vm.items {
            writeln!(
                self.out,
                "\n{}{}{}  {}{}{}  id={}",
                p.verdict(item.is_spam),
                item.badge,
                p.reset,
                p.muted,
                item.time_ago,
                p.reset,
                item.id
            )?;
            writeln!(self.out, "  {}", item.preview.replace('\n', " "))?;
            writeln!(
                self.out,
                "  Confidence: {:.1}%   Risk: {}   Length: {} chars",
                item.confidence_percent, item.risk_level, item.length
            )?;
        }
        self.out.flush()
    }

    fn show_health(&mut self, status: HealthStatus, base_url: &str) -> io::Result<()> {
        let p = self.palette;
        let color = match status {
            HealthStatus::Online => p.ham,
            HealthStatus::Unknown => p.muted,
            HealthStatus::Degraded | HealthStatus::Offline => p.spam,
        };
        writeln!(
            self.out,
            "API status: {color}{}{} ({base_url})",
            status.label(),
            p.reset
        )?;
        self.out.flush()
    }

    fn show_draft(&mut self, stats: &DraftStats) -> io::Result<()> {
        self.heading("Draft preview")?;
        writeln!(self.out, "{}", stats.preview)?;
        writeln!(
            self.out,
            "Characters: {}   Words: {}   Sentences: {}   URLs: {}   Caps: {:.1}%",
            stats.chars, stats.words, stats.sentences, stats.urls, stats.caps_percent
        )?;
        self.out.flush()
    }

    fn show_samples(&mut self, samples: &[SampleEmail]) -> io::Result<()> {
        let p = self.palette;
        self.heading("Sample emails")?;
        for sample in samples {
            writeln!(
                self.out,
                "{:>3}. {:<26} {}{}{}",
                sample.id,
                sample.title,
                p.verdict(sample.expected.is_spam()),
                sample.expected.as_str().to_uppercase(),
                p.reset
            )?;
            writeln!(
                self.out,
                "     {}{}{}",
                p.muted,
                preview(sample.text, 100).replace('\n', " "),
                p.reset
            )?;
        }
        self.out.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        let p = self.palette;
        writeln!(self.out, "\n{}✗ Error:{} {message}", p.spam, p.reset)?;
        self.out.flush()
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        let p = self.palette;
        writeln!(self.out, "\n{}[!] {message}{}", p.warn, p.reset)?;
        self.out.flush()
    }

    fn prompt(&mut self, status: HealthStatus) -> io::Result<()> {
        let p = self.palette;
        write!(self.out, "{}[{}]{} spam-scan> ", p.muted, status.label(), p.reset)?;
        self.out.flush()
    }

    fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::new(theme, self.color);
    }
}
