use super::Db;
use crate::{materialize, Model, Params, ResponseInformation, Table};

use sprocket_core::{Connection as _, Result};

impl Db {
    /// Executes a filtered single-row read. Zero rows yields the
    /// empty-result envelope and the default model, not a failure.
    pub async fn first<M: Model, F: Model>(
        &self,
        procedure: &str,
        filter: &F,
    ) -> Result<(ResponseInformation, M)> {
        match self.run_first(procedure, filter).await {
            Ok(model) => Ok((ResponseInformation::default(), model)),
            Err(err) => Ok((self.recover("first", procedure, err)?, M::default())),
        }
    }

    /// Executes a filtered read of the whole result set into models.
    pub async fn list<M: Model, F: Model>(
        &self,
        procedure: &str,
        filter: &F,
    ) -> Result<(ResponseInformation, Vec<M>)> {
        match self.run_list(procedure, filter).await {
            Ok(models) => Ok((ResponseInformation::default(), models)),
            Err(err) => Ok((self.recover("list", procedure, err)?, Vec::new())),
        }
    }

    /// Executes with ad-hoc parameters and reads the first result set into
    /// a generic table.
    ///
    /// Unlike every other operation, this path re-raises execution
    /// failures after logging them; callers of the tabular family depend
    /// on receiving the original error.
    pub async fn table(&self, procedure: &str, params: &Params) -> Result<Table> {
        match self.run_table(procedure, params).await {
            Ok(table) => Ok(table),
            Err(err) => {
                self.sink.record("table", &format!("{procedure}: {err}"));
                Err(err)
            }
        }
    }

    async fn run_first<M: Model, F: Model>(&self, procedure: &str, filter: &F) -> Result<M> {
        let bound = self.bind(procedure, filter, &[]).await?;
        let schema = self.schema_of::<M>();
        let mut connection = self.connect().await?;
        let result = async {
            let mut cursor = connection.call(procedure, &bound).await?;
            materialize::one(&schema, &mut cursor, procedure)
        }
        .await;
        Self::finish(connection, result).await
    }

    async fn run_list<M: Model, F: Model>(&self, procedure: &str, filter: &F) -> Result<Vec<M>> {
        let bound = self.bind(procedure, filter, &[]).await?;
        let schema = self.schema_of::<M>();
        let mut connection = self.connect().await?;
        let result = async {
            let mut cursor = connection.call(procedure, &bound).await?;
            materialize::many(&schema, &mut cursor)
        }
        .await;
        Self::finish(connection, result).await
    }

    async fn run_table(&self, procedure: &str, params: &Params) -> Result<Table> {
        let bound = params.to_bound(self.prefix());
        let mut connection = self.connect().await?;
        let result = async {
            let mut cursor = connection.call(procedure, &bound).await?;
            Ok(Table::read(&mut cursor, None))
        }
        .await;
        Self::finish(connection, result).await
    }
}
