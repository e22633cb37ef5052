use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use reqwest::Client;
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::timeout,
};
use tokio_cron_scheduler::JobScheduler;

use crate::{
    api::{ApiError, Endpoints, SpamApiClient},
    cli::{self, Command, ExportKind, HistoryAction},
    config::AppConfig,
    db::{
        self,
        kv::{DRAFT_KEY, THEME_KEY},
        KvRepository,
    },
    domain::NewScan,
    draft,
    export::{self, NO_RESULT_MESSAGE},
    history::HistoryStore,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    ingest::{self, CSV_TEMPLATE, CSV_TEMPLATE_FILENAME},
    samples::{self, SAMPLES},
    state::{AppState, CurrentResult},
    tasks::health::{refresh_health, start_health_monitor},
    view::{BatchViewModel, DashboardView, ResultView, ResultViewModel, TerminalView, Theme},
};

const APPLICATION_DEFAULT_MESSAGE: &str = "An error occurred while checking the email.";
const BATCH_TRANSPORT_MESSAGE: &str =
    "Failed to process batch. Please check your connection and try again.";

/// How a command ended, as far as the caller is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The failure has already been shown to the user.
    Failed,
    Quit,
}

#[derive(Debug, Error)]
enum CommandError {
    /// Shown in the result area; used for single-email scans.
    #[error("{0}")]
    Inline(String),
    /// Shown as a blocking alert; used for batches and files.
    #[error("{0}")]
    Alert(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
    #[error(transparent)]
    Output(#[from] io::Error),
}

pub struct SpamScanApp {
    config: Arc<AppConfig>,
    paths: ResolvedPaths,
    tz: Tz,
    client: SpamApiClient,
    kv: KvRepository,
    history: HistoryStore,
    state: AppState,
    view: Box<dyn ResultView>,
    theme: Theme,
    shutdown: Shutdown,
}

impl SpamScanApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
        color: bool,
    ) -> Result<Self> {
        Self::with_view(config, paths, shutdown, |theme| {
            Box::new(TerminalView::new(io::stdout(), theme, color))
        })
        .await
    }

    /// Builds the app around a view created once the stored theme is known.
    pub async fn with_view<F>(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
        make_view: F,
    ) -> Result<Self>
    where
        F: FnOnce(Theme) -> Box<dyn ResultView>,
    {
        let config = Arc::new(config);
        let tz = config.display_tz();
        tracing::debug!(
            target: "db",
            data_dir = %paths.data_dir.display(),
            db = %paths.db_path.display(),
            "opening local store"
        );
        let pool = db::init_pool(&paths.db_path).await?;
        let kv = KvRepository::new(pool);
        let history = HistoryStore::load(kv.clone()).await?;
        let theme = Theme::from_preference(kv.get(THEME_KEY).await?.as_deref());

        let http = Client::builder()
            .user_agent(format!("spam-scan/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base = config.api.base_url();
        let endpoints = Endpoints::new(base)
            .with_context(|| format!("invalid classification service URL: {base}"))?;
        let client = SpamApiClient::new(http, endpoints);
        tracing::info!(target: "api", base = client.base_url(), "classification service selected");

        Ok(Self {
            config,
            paths,
            tz,
            client,
            kv,
            history,
            state: AppState::new(),
            view: make_view(theme),
            theme,
            shutdown,
        })
    }

    /// Runs one command and renders its failure, if any. Only a broken
    /// output stream is returned as an error.
    ///
    /// Takes `&mut self`, so a scan or batch cannot be submitted again
    /// while its request is outstanding.
    pub async fn execute(&mut self, command: Command) -> io::Result<Outcome> {
        match self.dispatch(command).await {
            Ok(outcome) => Ok(outcome),
            Err(CommandError::Inline(message)) => {
                self.view.show_error(&message)?;
                Ok(Outcome::Failed)
            }
            Err(CommandError::Alert(message)) => {
                self.view.alert(&message)?;
                Ok(Outcome::Failed)
            }
            Err(CommandError::Internal(err)) => {
                tracing::error!(error = ?err, "command failed");
                self.view.alert(&format!("{err:#}"))?;
                Ok(Outcome::Failed)
            }
            Err(CommandError::Output(err)) => Err(err),
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::Scan {
                sample,
                json,
                report,
                text,
            } => {
                self.scan(sample, text, json.as_deref(), report.as_deref())
                    .await?
            }
            Command::Batch {
                csv,
                csv_out,
                json_out,
            } => {
                self.batch(&csv, csv_out.as_deref(), json_out.as_deref())
                    .await?
            }
            Command::Template { path } => {
                let path = self
                    .write(path.as_deref(), CSV_TEMPLATE_FILENAME, CSV_TEMPLATE)
                    .await?;
                self.view.notice(&format!("CSV template written to {}", path.display()))?;
            }
            Command::History { action } => {
                self.history_command(action.unwrap_or(HistoryAction::List))
                    .await?
            }
            Command::Health => {
                let status = refresh_health(&self.client, &self.state.health_handle()).await;
                self.view.show_health(status, self.client.base_url())?;
            }
            Command::Draft { text } => {
                let text = text.join(" ");
                if text.trim().is_empty() {
                    self.kv.remove(DRAFT_KEY).await?;
                } else {
                    self.kv.set(DRAFT_KEY, &text).await?;
                }
                self.view.show_draft(&draft::analyze(&text))?;
            }
            Command::Samples => self.view.show_samples(&SAMPLES)?,
            Command::Theme { theme } => {
                let next = theme.map(Theme::from).unwrap_or(self.theme.toggled());
                self.kv.set(THEME_KEY, next.as_str()).await?;
                self.theme = next;
                self.view.set_theme(next);
                self.view.notice(&format!("Theme set to {}", next.as_str()))?;
            }
            Command::Export { kind, path } => self.export(kind, path.as_deref()).await?,
            Command::Shell => self.view.notice("Already in the interactive shell.")?,
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Done)
    }

    async fn scan(
        &mut self,
        sample: Option<u32>,
        words: Vec<String>,
        json_out: Option<&Path>,
        report_out: Option<&Path>,
    ) -> Result<(), CommandError> {
        let text = match sample {
            Some(id) => samples::find(id)
                .map(|s| s.text.to_string())
                .ok_or_else(|| {
                    CommandError::Inline(format!(
                        "There is no sample {id}; run `samples` to list them."
                    ))
                })?,
            None => words.join(" "),
        };

        let result = self.client.predict(&text).await.map_err(|err| match err {
            ApiError::Validation(message) => CommandError::Inline(message),
            ApiError::Transport(source) => {
                tracing::warn!(target: "api", error = %source, "prediction request failed");
                CommandError::Inline(format!(
                    "Failed to connect to the API. Please make sure the backend server is running on {}",
                    self.client.base_url()
                ))
            }
            ApiError::Application { message } => CommandError::Inline(
                message.unwrap_or_else(|| APPLICATION_DEFAULT_MESSAGE.to_string()),
            ),
        })?;

        self.view.show_result(&ResultViewModel::new(&result))?;

        let current = CurrentResult {
            email_text: text,
            timestamp: Utc::now(),
            result,
        };
        self.history
            .record(NewScan {
                prediction: current.result.prediction,
                confidence: current.result.confidence,
                risk_level: current.result.risk_level,
                email_text: current.email_text.clone(),
                timestamp: current.timestamp,
            })
            .await?;
        self.state.set_current_result(current);

        if let Some(path) = json_out {
            self.export(ExportKind::ResultJson, Some(path)).await?;
        }
        if let Some(path) = report_out {
            self.export(ExportKind::Report, Some(path)).await?;
        }
        Ok(())
    }

    async fn batch(
        &mut self,
        csv: &Path,
        csv_out: Option<&Path>,
        json_out: Option<&Path>,
    ) -> Result<(), CommandError> {
        let rows = match ingest::read_csv_file(csv).await {
            Ok(rows) => rows,
            Err(err) => {
                self.state.set_csv_rows(Vec::new());
                return Err(CommandError::Alert(err.to_string()));
            }
        };
        self.state.set_csv_rows(rows);
        self.view
            .notice(&format!(
                "Loaded {} emails from {}",
                self.state.csv_rows().len(),
                csv.display()
            ))?;

        let response = self
            .client
            .predict_batch(self.state.csv_rows())
            .await
            .map_err(|err| match err {
                ApiError::Validation(message) => CommandError::Alert(message),
                ApiError::Transport(source) => {
                    tracing::warn!(target: "api", error = %source, "batch request failed");
                    CommandError::Alert(BATCH_TRANSPORT_MESSAGE.to_string())
                }
                ApiError::Application { message } => CommandError::Alert(format!(
                    "Error processing batch: {}",
                    message.as_deref().unwrap_or("Unknown error")
                )),
            })?;

        self.view.show_batch(&BatchViewModel::new(&response, self.state.csv_rows()))?;
        self.state.set_batch_results(response);

        if let Some(path) = csv_out {
            self.export(ExportKind::BatchCsv, Some(path)).await?;
        }
        if let Some(path) = json_out {
            self.export(ExportKind::BatchJson, Some(path)).await?;
        }
        Ok(())
    }

    async fn history_command(&mut self, action: HistoryAction) -> Result<(), CommandError> {
        match action {
            HistoryAction::List => {
                let view = DashboardView::new(
                    self.history.list_all(),
                    self.history.aggregate(),
                    Utc::now(),
                    self.tz,
                );
                self.view.show_dashboard(&view)?;
            }
            HistoryAction::Stats => {
                let stats = self.history.aggregate();
                self.view
                    .notice(&format!(
                        "Total scans: {}   Spam caught: {}   Legitimate: {}   Avg confidence: {:.1}%",
                        stats.total, stats.spam_count, stats.ham_count, stats.avg_confidence_percent
                    ))?;
            }
            HistoryAction::Delete { id } => {
                if !self.history.delete(id).await? {
                    return Err(CommandError::Alert(format!("No history entry with id {id}")));
                }
                self.view.notice(&format!("Deleted history entry {id}"))?;
            }
            HistoryAction::Clear { yes } => {
                let message = if self.history.clear(|| yes).await? {
                    "History cleared."
                } else {
                    "History kept. Run `history clear --yes` to delete all scan history."
                };
                self.view.notice(message)?;
            }
        }
        Ok(())
    }

    async fn export(&mut self, kind: ExportKind, target: Option<&Path>) -> Result<(), CommandError> {
        let now = Utc::now();
        let (contents, fallback) = match kind {
            ExportKind::ResultJson | ExportKind::Report => {
                let current = self
                    .state
                    .current_result()
                    .ok_or_else(|| CommandError::Alert(NO_RESULT_MESSAGE.to_string()))?;
                if kind == ExportKind::ResultJson {
                    (
                        export::json::result_json(current)?,
                        export::default_file_name("spam_detection_result", "json", now),
                    )
                } else {
                    (
                        export::report::printable_report(current, self.tz),
                        export::default_file_name("spam_detection_report", "html", now),
                    )
                }
            }
            ExportKind::BatchCsv | ExportKind::BatchJson => {
                let batch = self
                    .state
                    .batch_results()
                    .ok_or_else(|| CommandError::Alert(NO_RESULT_MESSAGE.to_string()))?;
                if kind == ExportKind::BatchCsv {
                    (
                        export::csv::batch_results_csv(batch, self.state.csv_rows()),
                        export::default_file_name("spam_detection_results", "csv", now),
                    )
                } else {
                    (
                        export::json::batch_results_json(batch)?,
                        export::default_file_name("spam_detection_results", "json", now),
                    )
                }
            }
        };

        let path = self.write(target, &fallback, &contents).await?;
        self.view.notice(&format!("Exported to {}", path.display()))?;
        Ok(())
    }

    async fn write(
        &self,
        target: Option<&Path>,
        fallback: &str,
        contents: &str,
    ) -> Result<PathBuf, CommandError> {
        export::write_artifact(&self.paths.exports_dir, target, fallback, contents)
            .await
            .map_err(|err| CommandError::Alert(format!("{err:#}")))
    }

    /// Reads commands from stdin until `quit`, end of input or a shutdown
    /// signal. The health poll only runs while the shell is open.
    pub async fn run_shell(&mut self) -> Result<()> {
        let mut scheduler = start_health_monitor(
            self.client.clone(),
            &self.config.health.poll_cron,
            self.state.health_handle(),
        )
        .await?;
        tracing::info!(target: "shell", "interactive shell started");
        self.view.notice("Type `help` for commands, `quit` to leave.")?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut listener = self.shutdown.subscribe();
        loop {
            self.view.prompt(self.state.health())?;
            let line = tokio::select! {
                _ = listener.notified() => break,
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match cli::parse_shell_line(&line) {
                Ok(command) => {
                    if self.execute(command).await? == Outcome::Quit || listener.is_triggered() {
                        break;
                    }
                }
                Err(err) => self.view.notice(err.render().to_string().trim_end())?,
            }
        }

        stop_scheduler(&mut scheduler).await;
        tracing::info!(target: "shell", "interactive shell closed");
        Ok(())
    }

    pub async fn close(self) {
        let wait = Duration::from_secs(5);
        if timeout(wait, self.kv.close()).await.is_err() {
            tracing::warn!(target: "db", "database pool did not close within {:?}", wait);
        }
    }
}

async fn stop_scheduler(scheduler: &mut JobScheduler) {
    let wait = Duration::from_secs(5);
    match timeout(wait, scheduler.shutdown()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::error!(target: "scheduler", ?err, "scheduler shutdown failed"),
        Err(_) => tracing::warn!(
            target: "scheduler",
            "scheduler did not stop within {:?}",
            wait
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use parking_lot::Mutex;
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    use super::*;
    use crate::{
        api::test_support::serve_once,
        config::{env::LoggingConfig, ApiConfig, DirectoryConfig, HealthConfig},
        domain::Prediction,
        infrastructure::directories::ensure_directories,
    };

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn app(dir: &TempDir, base: &str) -> (SpamScanApp, Captured) {
        let root = dir.path();
        let config = AppConfig {
            api: ApiConfig {
                host: "localhost".into(),
                base_override: Some(base.to_string()),
            },
            directories: DirectoryConfig {
                logs_dir: root.join("logs").display().to_string(),
                data_dir: root.join("data").display().to_string(),
                exports_dir: root.join("exports").display().to_string(),
                db_filename: "test.db".into(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
            },
            timezone: "UTC".into(),
            health: HealthConfig {
                poll_cron: "0/30 * * * * *".into(),
            },
        };
        let paths = ensure_directories(&config.directories).unwrap();
        let out = Captured::default();
        let sink = out.clone();
        let app = SpamScanApp::with_view(config, paths, Shutdown::new(), move |theme| {
            Box::new(TerminalView::new(sink, theme, false))
        })
        .await
        .unwrap();
        (app, out)
    }

    fn scan(text: &str) -> Command {
        Command::Scan {
            sample: None,
            json: None,
            report: None,
            text: text.split_whitespace().map(String::from).collect(),
        }
    }

    #[tokio::test]
    async fn empty_scan_fails_inline_without_history() {
        let dir = TempDir::new().unwrap();
        let (mut app, out) = app(&dir, "http://127.0.0.1:9").await;

        assert_eq!(app.execute(scan("   ")).await.unwrap(), Outcome::Failed);
        assert!(out.text().contains("Please enter email text to check."));
        assert!(app.history.list_all().is_empty());
    }

    #[tokio::test]
    async fn successful_scan_records_history_and_exports() {
        let dir = TempDir::new().unwrap();
        let (base, _server) = serve_once(
            "200 OK",
            r#"{"status":"success","prediction":"spam","confidence":0.93,"risk_level":"Critical","email_length":18,"cleaned_length":12}"#,
        )
        .await;
        let (mut app, _out) = app(&dir, &base).await;

        let report = dir.path().join("report.html");
        let outcome = app
            .execute(Command::Scan {
                sample: None,
                json: None,
                report: Some(report.clone()),
                text: vec!["  WIN".into(), "a".into(), "FREE".into(), "prize\n".into()],
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done);
        let entries = app.history.list_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prediction, Prediction::Spam);
        assert_eq!(entries[0].email_text, "  WIN a FREE prize\n");
        assert_eq!(
            app.state.current_result().unwrap().email_text,
            "  WIN a FREE prize\n"
        );
        let html = std::fs::read_to_string(report).unwrap();
        assert!(html.contains("Confidence: 93.00%"));
    }

    #[tokio::test]
    async fn scan_is_accepted_again_after_a_failed_one() {
        let dir = TempDir::new().unwrap();
        let (base, _server) = serve_once(
            "200 OK",
            r#"{"status":"success","prediction":"ham","confidence":0.8,"risk_level":"Low","email_length":5,"cleaned_length":5}"#,
        )
        .await;
        let (mut app, _out) = app(&dir, &base).await;

        assert_eq!(app.execute(scan("")).await.unwrap(), Outcome::Failed);
        assert_eq!(app.execute(scan("lunch")).await.unwrap(), Outcome::Done);
        assert_eq!(app.history.list_all().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_service_names_the_base_url() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let dir = TempDir::new().unwrap();
        let (mut app, out) = app(&dir, &base).await;

        assert_eq!(app.execute(scan("hello there")).await.unwrap(), Outcome::Failed);
        assert!(out.text().contains(&format!(
            "Failed to connect to the API. Please make sure the backend server is running on {base}"
        )));
    }

    #[tokio::test]
    async fn export_without_result_alerts() {
        let dir = TempDir::new().unwrap();
        let (mut app, out) = app(&dir, "http://127.0.0.1:9").await;

        let outcome = app
            .execute(Command::Export {
                kind: ExportKind::BatchCsv,
                path: None,
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.text().contains(NO_RESULT_MESSAGE));
    }

    #[tokio::test]
    async fn batch_with_bad_header_alerts_schema_error() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("bad.csv");
        std::fs::write(&csv, "name,date\nBob,today\n").unwrap();
        let (mut app, out) = app(&dir, "http://127.0.0.1:9").await;

        let outcome = app
            .execute(Command::Batch {
                csv,
                csv_out: None,
                json_out: None,
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Failed);
        assert!(out
            .text()
            .contains(r#"CSV must have a column named "email", "text", "message", or "content""#));
    }

    #[tokio::test]
    async fn theme_toggle_is_persisted() {
        let dir = TempDir::new().unwrap();
        let (mut app, _out) = app(&dir, "http://127.0.0.1:9").await;
        assert_eq!(app.theme, Theme::Dark);

        app.execute(Command::Theme { theme: None }).await.unwrap();
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.kv.get(THEME_KEY).await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn template_lands_in_exports_dir() {
        let dir = TempDir::new().unwrap();
        let (mut app, _out) = app(&dir, "http://127.0.0.1:9").await;

        app.execute(Command::Template { path: None }).await.unwrap();
        let written =
            std::fs::read_to_string(dir.path().join("exports").join(CSV_TEMPLATE_FILENAME)).unwrap();
        assert_eq!(written, CSV_TEMPLATE);
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let (mut app, out) = app(&dir, "http://127.0.0.1:9").await;

        app.execute(Command::History {
            action: Some(HistoryAction::Clear { yes: false }),
        })
        .await
        .unwrap();
        assert!(out.text().contains("history clear --yes"));
    }
}
