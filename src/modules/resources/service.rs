use tracing::{debug, error, instrument};

use doe_core::Failure;
use doe_db::InfoRepository;
use doe_models::{InfoRecord, InfoTable};

pub struct ResourceService;

impl ResourceService {
    /// Contents of every record in `table` that has text, in repository order.
    #[instrument(skip(repository), fields(db.operation = "SELECT", db.table = table.table_name()))]
    pub async fn retrieve_info(
        repository: &dyn InfoRepository,
        table: InfoTable,
    ) -> Result<Vec<String>, Failure> {
        let records = repository.find_all().await.map_err(|e| {
            error!(error = %e, "Database error retrieving info records");
            Failure::from(e)
        })?;

        let total = records.len();
        let contents = keep_contents(records);

        debug!(total, kept = contents.len(), "Retrieved info records");

        Ok(contents)
    }
}

fn keep_contents(records: Vec<InfoRecord>) -> Vec<String> {
    records
        .into_iter()
        .filter(InfoRecord::has_text)
        .filter_map(|record| record.contents)
        .collect()
}
