use super::Db;
use crate::{materialize, Grid, Model, ResponseInformation, Table};

use sprocket_core::{Connection as _, Result};

impl Db {
    /// Executes a paged query: the first result set carries the page's
    /// rows, the second the total row count.
    pub async fn grid<M: Model, F: Model>(
        &self,
        procedure: &str,
        filter: &F,
    ) -> Result<(ResponseInformation, Grid<Vec<M>>)> {
        self.grid_excluding(procedure, filter, &[]).await
    }

    /// [`grid`](Db::grid) with filter fields to leave unbound.
    pub async fn grid_excluding<M: Model, F: Model>(
        &self,
        procedure: &str,
        filter: &F,
        exclude: &[&str],
    ) -> Result<(ResponseInformation, Grid<Vec<M>>)> {
        match self.run_grid(procedure, filter, exclude).await {
            Ok(grid) => Ok((ResponseInformation::default(), grid)),
            Err(err) => Ok((self.recover("grid", procedure, err)?, Grid::default())),
        }
    }

    /// Paged query materialized as a generic table, optionally restricted
    /// to an allow-list of column names.
    pub async fn grid_table<F: Model>(
        &self,
        procedure: &str,
        filter: &F,
        columns: Option<&[&str]>,
    ) -> Result<(ResponseInformation, Grid<Table>)> {
        match self.run_grid_table(procedure, filter, columns).await {
            Ok(grid) => Ok((ResponseInformation::default(), grid)),
            Err(err) => Ok((self.recover("grid_table", procedure, err)?, Grid::default())),
        }
    }

    async fn run_grid<M: Model, F: Model>(
        &self,
        procedure: &str,
        filter: &F,
        exclude: &[&str],
    ) -> Result<Grid<Vec<M>>> {
        let bound = self.bind(procedure, filter, exclude).await?;
        let schema = self.schema_of::<M>();
        let mut connection = self.connect().await?;
        let result = async {
            let mut cursor = connection.call(procedure, &bound).await?;
            let rows = materialize::many(&schema, &mut cursor)?;
            let total_rows = crate::grid::total_rows(&mut cursor)?;
            Ok(Grid::new(rows, total_rows))
        }
        .await;
        Self::finish(connection, result).await
    }

    async fn run_grid_table<F: Model>(
        &self,
        procedure: &str,
        filter: &F,
        columns: Option<&[&str]>,
    ) -> Result<Grid<Table>> {
        let bound = self.bind(procedure, filter, &[]).await?;
        let mut connection = self.connect().await?;
        let result = async {
            let mut cursor = connection.call(procedure, &bound).await?;
            let rows = Table::read(&mut cursor, columns);
            let total_rows = crate::grid::total_rows(&mut cursor)?;
            Ok(Grid::new(rows, total_rows))
        }
        .await;
        Self::finish(connection, result).await
    }
}
