use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, TableId};
use crate::engine::{RandomSource, TableService};
use crate::infra::mapping::{map_table_to_dto, Viewer};
use crate::infra::persistence::TableStore;

use super::dto::{TableSnapshotDto, TableSummaryDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Query {
    /// Получить состояние стола глазами `viewer`.
    GetState {
        table_id: TableId,
        #[serde(default)]
        viewer: Viewer,
    },

    /// Может ли игрок сейчас сделать check.
    CanCheck { table_id: TableId, player_id: PlayerId },

    /// Список столов (для лобби).
    ListTables,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QueryResponse {
    Table(TableSnapshotDto),
    CanCheck(bool),
    Tables(Vec<TableSummaryDto>),
}

pub fn execute_query<S, R>(service: &TableService<S, R>, query: Query) -> Result<QueryResponse, ApiError>
where
    S: TableStore,
    R: RandomSource,
{
    let response = match query {
        Query::GetState { table_id, viewer } => {
            let state = service.get_state(table_id)?;
            QueryResponse::Table(map_table_to_dto(&state, viewer))
        }
        Query::CanCheck {
            table_id,
            player_id,
        } => QueryResponse::CanCheck(service.can_check(table_id, player_id)?),
        Query::ListTables => {
            let mut tables = Vec::new();
            for id in service.table_ids() {
                let state = service.get_state(id)?;
                tables.push(TableSummaryDto::from(&state));
            }
            QueryResponse::Tables(tables)
        }
    };
    Ok(response)
}
