use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    SqlServer,
    MySql,
}

/// Per-backend strategy: everything that differs between backend kinds,
/// resolved once per call instead of branching per operation.
#[derive(Debug)]
pub struct Backend {
    pub kind: BackendKind,

    /// Token prepended to a field name to form its parameter name.
    pub parameter_prefix: &'static str,

    /// Catalog text listing a procedure's declared parameters. Takes a
    /// single bound parameter holding the procedure name and yields
    /// `(parameter_name, is_nullable)` rows in declaration order.
    pub parameter_catalog_query: &'static str,
}

impl Backend {
    /// SQL Server strategy.
    pub const SQL_SERVER: Backend = Backend {
        kind: BackendKind::SqlServer,
        parameter_prefix: "@",
        parameter_catalog_query: "SELECT p.name, p.is_nullable \
             FROM sys.parameters p \
             WHERE p.object_id = OBJECT_ID(@procedure) \
             ORDER BY p.parameter_id",
    };

    /// MySQL strategy. The catalog does not track parameter nullability,
    /// so every parameter reports nullable.
    pub const MYSQL: Backend = Backend {
        kind: BackendKind::MySql,
        parameter_prefix: "?",
        parameter_catalog_query: "SELECT PARAMETER_NAME, 1 \
             FROM information_schema.PARAMETERS \
             WHERE SPECIFIC_NAME = ? AND PARAMETER_MODE IS NOT NULL \
             ORDER BY ORDINAL_POSITION",
    };
}

impl BackendKind {
    pub fn backend(self) -> &'static Backend {
        match self {
            BackendKind::SqlServer => &Backend::SQL_SERVER,
            BackendKind::MySql => &Backend::MYSQL,
        }
    }

    /// Infer the backend kind from connection-string keywords: a host token
    /// together with credential/port tokens means MySQL, a host token alone
    /// means SQL Server, anything else is a configuration error.
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let lower = connection_string.to_lowercase();
        let has = |key: &str| {
            lower
                .split(';')
                .any(|part| part.trim_start().starts_with(key))
        };

        let host = has("server=") || has("data source=") || has("host=");
        let mysql_tokens = has("uid=") || has("pwd=") || has("port=");

        if host && mysql_tokens {
            Ok(BackendKind::MySql)
        } else if host {
            Ok(BackendKind::SqlServer)
        } else {
            Err(Error::configuration(format!(
                "connection string matches no known backend kind: {connection_string}"
            )))
        }
    }
}
