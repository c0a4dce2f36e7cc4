//! Sheet sync: read SKU rows, resolve them, write the URL and status columns back.

use crate::batch::BatchRunner;
use crate::config::StatusMarkers;
use crate::probe::Prober;
use crate::record::OutputRecord;
use crate::sheet::{RecordSink, RecordSource, Rows, SheetError, SheetLayout};

/// Outcome of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub rows: usize,
    pub found: usize,
    pub not_found: usize,
    /// False for dry runs and empty sheets.
    pub written: bool,
    pub outputs: Vec<OutputRecord>,
}

/// Fetch records, resolve them, and write both output columns.
///
/// Only sheet failures abort; per-row problems are already folded into the outputs.
pub async fn sync_sheet<S, P>(
    store: &S,
    layout: &SheetLayout,
    markers: &StatusMarkers,
    runner: &BatchRunner<P>,
    dry_run: bool,
) -> Result<SyncReport, SheetError>
where
    S: RecordSource + RecordSink,
    P: Prober,
{
    let sku_range = layout.sku_range()?;
    let sku_rows = store.fetch_records(&sku_range).await?;
    let handle_rows = match layout.handle_range()? {
        Some(range) => Some(store.fetch_records(&range).await?),
        None => None,
    };
    let records = layout.records(&sku_rows, handle_rows.as_ref());
    tracing::info!(range = %sku_range, rows = records.len(), "fetched records");

    let outputs = runner.run(records).await;
    let found = outputs.iter().filter(|o| o.is_found()).count();

    let written = !dry_run && !outputs.is_empty();
    if written {
        let (urls, statuses) = render_columns(&outputs, markers);
        let url_range = layout.url_range(outputs.len())?;
        let status_range = layout.status_range(outputs.len())?;
        store.write_column(&url_range, urls).await?;
        store.write_column(&status_range, statuses).await?;
        tracing::info!(urls = %url_range, statuses = %status_range, "results written");
    }

    Ok(SyncReport {
        rows: outputs.len(),
        found,
        not_found: outputs.len() - found,
        written,
        outputs,
    })
}

/// Two parallel single-cell columns: URLs and rendered status markers.
pub fn render_columns(outputs: &[OutputRecord], markers: &StatusMarkers) -> (Rows, Rows) {
    outputs
        .iter()
        .map(|o| (vec![o.url.clone()], vec![markers.render(o.status).to_string()]))
        .unzip()
}
