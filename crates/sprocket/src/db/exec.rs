use super::Db;
use crate::{Model, Params, ResponseInformation};

use sprocket_core::driver::BoundParameter;
use sprocket_core::{Connection, Result};

impl Db {
    /// Binds `model` onto the procedure's declared parameters and executes
    /// it, reading the output row into the response envelope.
    pub async fn exec<M: Model>(&self, procedure: &str, model: &M) -> Result<ResponseInformation> {
        self.exec_excluding(procedure, model, &[]).await
    }

    /// [`exec`](Db::exec) with field names to leave unbound, at any
    /// flattening depth.
    pub async fn exec_excluding<M: Model>(
        &self,
        procedure: &str,
        model: &M,
        exclude: &[&str],
    ) -> Result<ResponseInformation> {
        match self.run_exec(procedure, model, exclude).await {
            Ok(response) => Ok(response),
            Err(err) => self.recover("exec", procedure, err),
        }
    }

    /// Executes with an ad-hoc parameter list, bypassing catalog matching.
    pub async fn exec_params(
        &self,
        procedure: &str,
        params: &Params,
    ) -> Result<ResponseInformation> {
        let bound = params.to_bound(self.prefix());
        match self.run_call(procedure, bound).await {
            Ok(response) => Ok(response),
            Err(err) => self.recover("exec_params", procedure, err),
        }
    }

    /// The validated-update path: every declared parameter must have a
    /// caller-supplied key, otherwise nothing executes and the envelope
    /// names the absent parameters.
    pub async fn exec_strict(
        &self,
        procedure: &str,
        params: &Params,
    ) -> Result<ResponseInformation> {
        match self.run_exec_strict(procedure, params).await {
            Ok(response) => Ok(response),
            Err(err) => self.recover("exec_strict", procedure, err),
        }
    }

    async fn run_exec<M: Model>(
        &self,
        procedure: &str,
        model: &M,
        exclude: &[&str],
    ) -> Result<ResponseInformation> {
        let bound = self.bind(procedure, model, exclude).await?;
        self.run_call(procedure, bound).await
    }

    async fn run_exec_strict(
        &self,
        procedure: &str,
        params: &Params,
    ) -> Result<ResponseInformation> {
        let parameters = self.catalog.resolve(procedure).await?;
        let bound = crate::binder::bind_strict(params, &parameters, self.prefix())?;
        self.run_call(procedure, bound).await
    }

    async fn run_call(
        &self,
        procedure: &str,
        bound: Vec<BoundParameter>,
    ) -> Result<ResponseInformation> {
        let mut connection = self.connect().await?;
        let result = read_response(&mut *connection, procedure, &bound).await;
        Self::finish(connection, result).await
    }
}

async fn read_response(
    connection: &mut dyn Connection,
    procedure: &str,
    bound: &[BoundParameter],
) -> Result<ResponseInformation> {
    let mut cursor = connection.call(procedure, bound).await?;
    ResponseInformation::from_cursor(&mut cursor)
}
