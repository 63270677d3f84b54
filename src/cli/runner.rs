//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::FetcherConfig;
use crate::descriptor::RequestDescriptor;
use crate::error::{Error, Result};
use crate::fetcher::PagedFetcher;
use crate::notify::Notification;
use futures::future::join_all;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                slugs,
                class,
                per_page,
                page,
                trigger,
            } => {
                let template = RequestDescriptor {
                    slug: String::new(),
                    class: class.clone(),
                    per_page: *per_page,
                    page: *page,
                    trigger: trigger.clone(),
                };
                self.fetch(slugs, &template).await
            }
            Commands::Config => self.show_config(),
        }
    }

    /// Resolve the config from the file and command-line overrides
    ///
    /// Validation runs once, after `--base-url` has been applied, so the flag
    /// can fill in or replace the file's base URL.
    pub fn resolve_config(&self) -> Result<FetcherConfig> {
        let mut config = match (&self.cli.config, &self.cli.base_url) {
            (Some(path), _) => FetcherConfig::parse_file(path)?,
            (None, Some(base_url)) => FetcherConfig::new(base_url.clone()),
            (None, None) => {
                return Err(Error::config(
                    "No base URL (use --config, --base-url or WPREST_BASE_URL)",
                ))
            }
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Fetch every slug concurrently and print notifications as they arrive
    async fn fetch(&self, slugs: &[String], template: &RequestDescriptor) -> Result<()> {
        let fetcher = PagedFetcher::new(self.resolve_config()?)?;
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        info!(
            "Fetching {} collection(s) from {}",
            slugs.len(),
            fetcher.config().base_url
        );

        let handles: Vec<_> = slugs
            .iter()
            .map(|slug| {
                let descriptor = RequestDescriptor {
                    slug: slug.clone(),
                    ..template.clone()
                }
                .normalized();
                fetcher.spawn(descriptor, tx.clone())
            })
            .collect();
        drop(tx);

        while let Some(notification) = rx.recv().await {
            println!("{}", self.render(&notification)?);
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("Fetch task ended abnormally: {e}");
            }
        }

        Ok(())
    }

    /// Print the resolved config as YAML
    fn show_config(&self) -> Result<()> {
        let config = self.resolve_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }

    /// Render a notification in the selected output format
    fn render(&self, notification: &Notification) -> Result<String> {
        match self.cli.format {
            OutputFormat::Json => Ok(serde_json::to_string(notification)?),
            OutputFormat::Pretty => Ok(render_pretty(notification)),
        }
    }
}

fn render_pretty(notification: &Notification) -> String {
    match notification {
        Notification::Success { trigger, envelope } => {
            let mut out = format!(
                "[{trigger}] {}: {} item(s) of {}{}",
                envelope.args.slug,
                envelope.items.len(),
                envelope.items_count,
                if envelope.next_page {
                    ", more pages"
                } else {
                    ""
                }
            );
            for item in &envelope.items {
                let label = item
                    .get("name")
                    .or_else(|| item.get("slug"))
                    .or_else(|| item.get("id"))
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), ToString::to_string))
                    .unwrap_or_default();
                out.push_str(&format!("\n  - {label}"));
            }
            out
        }
        Notification::RequestError => "[request-error] response was not a collection page".into(),
        Notification::RequestFailed {
            descriptor,
            failure,
        } => format!("[request-failed] {}: {failure}", descriptor.slug),
        Notification::Always { descriptor } => format!("[always] {}", descriptor.slug),
    }
}
