use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, error, info, info_span, instrument};
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::crawler::{SiteLayout, article_links, parse_article};
use crate::extractor::PublicationAssembler;
use crate::fetcher::{FetchError, fetch};
use crate::store::{PublicationStore, UpsertOutcome};

/// Tally of one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// One crawl run: read the index, then process every announcement with at
/// most `concurrency` in flight. A failing announcement is logged and
/// counted, never fatal.
pub struct Runner {
    index_url: Url,
    assembler: Arc<PublicationAssembler>,
    layout: Arc<SiteLayout>,
    store: Arc<dyn PublicationStore>,
    concurrency: usize,
    run_id: Uuid,
    shutdown_token: CancellationToken,
}

impl Runner {
    pub fn new(config: &Config, store: Arc<dyn PublicationStore>) -> Result<Self> {
        let index_url = Url::parse(config.index_url()).context("invalid index url")?;

        Ok(Self {
            index_url,
            assembler: Arc::new(PublicationAssembler::new(config.pipeline().clone())),
            layout: Arc::new(SiteLayout::default()),
            store,
            concurrency: config.concurrency(),
            run_id: Uuid::new_v4(),
            shutdown_token: CancellationToken::new(),
        })
    }

    pub fn with_layout(mut self, layout: SiteLayout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// Cancelling stops new announcements from being started; the ones in
    /// flight still finish and are counted.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let span = info_span!("run", run_id = %self.run_id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<RunSummary> {
        info!(
            index = %self.index_url,
            concurrency = self.concurrency,
            "starting crawl run"
        );

        let index = fetch(self.index_url.as_str())
            .await
            .context("failed to fetch index page")?;
        let links = article_links(&index.body_utf8, &index.url_final, &self.layout);
        info!(count = links.len(), "discovered announcements");

        let mut summary = RunSummary {
            discovered: links.len(),
            ..RunSummary::default()
        };

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(links.len());

        for url in links {
            let permit = tokio::select! {
                biased;
                _ = self.shutdown_token.cancelled() => {
                    info!("shutdown requested, not starting further announcements");
                    break;
                }
                permit = semaphore.clone().acquire_owned() => permit?,
            };

            let assembler = self.assembler.clone();
            let layout = self.layout.clone();
            let store = self.store.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit; // Hold permit until the announcement is stored
                process_announcement(url, &assembler, &layout, store.as_ref()).await
            }));
        }

        for handle in handles {
            match handle.await {
                Ok(Ok(outcome)) => summary.record(outcome),
                Ok(Err(e)) => {
                    error!(
                        error = %format!("{e:#}"),
                        retriable = ?retriable(&e),
                        "announcement failed"
                    );
                    summary.failed += 1;
                }
                Err(e) => {
                    error!(error = %e, "announcement task panicked");
                    summary.failed += 1;
                }
            }
        }

        info!(
            inserted = summary.inserted,
            updated = summary.updated,
            unchanged = summary.unchanged,
            failed = summary.failed,
            "crawl run finished"
        );
        Ok(summary)
    }
}

/// Retry class of a failed announcement; `None` when the fetch succeeded
/// and a later step failed.
fn retriable(err: &anyhow::Error) -> Option<bool> {
    err.downcast_ref::<FetchError>().map(FetchError::should_retry)
}

#[instrument(skip_all, fields(url = %url))]
async fn process_announcement(
    url: Url,
    assembler: &PublicationAssembler,
    layout: &SiteLayout,
    store: &dyn PublicationStore,
) -> Result<UpsertOutcome> {
    let page = fetch(url.as_str()).await?;
    let announcement = parse_article(&page.body_utf8, &page.url_final, layout)?;
    let publication = assembler.assemble(&announcement);
    let outcome = store
        .upsert(&publication)
        .await
        .with_context(|| format!("failed to store {}", publication.identifier))?;
    info!(identifier = %publication.identifier, ?outcome, "announcement stored");
    Ok(outcome)
}
