use serde::{Deserialize, Serialize};

use crate::domain::{parse_cards, Card, Chips, NewPlayer, PlayerId, SeatIndex, Street, TableConfig, TableId};
use crate::engine::game_loop::{ActionOutcome, EndHandOutcome, ManualSettlement};
use crate::engine::showdown::ShowdownResult;
use crate::engine::{ActionKind, RandomSource, TableService};
use crate::infra::mapping::{map_player_to_dto, map_table_to_dto, Viewer};
use crate::infra::persistence::TableStore;

use super::dto::{PlayerDto, TableSnapshotDto};
use super::errors::ApiError;

/// Команды — всё, что меняет состояние стола.
///
/// Карты передаются строками ("Ah", "10d", "K♠"); в одной строке
/// можно перечислить несколько через пробел или запятую.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    CreateTable {
        config: TableConfig,
    },
    AddPlayer {
        table_id: TableId,
        name: String,
        chips: Chips,
        #[serde(default)]
        position: Option<SeatIndex>,
    },
    StartHand {
        table_id: TableId,
    },
    PlayerAction {
        table_id: TableId,
        player_id: PlayerId,
        action: ActionKind,
        /// Улица, для которой отправлен ход.
        #[serde(default)]
        round: Option<Street>,
    },
    DealCommunityCards {
        table_id: TableId,
        count: usize,
    },
    SetCommunityCards {
        table_id: TableId,
        cards: Vec<String>,
        round: Street,
    },
    SetHoleCards {
        table_id: TableId,
        player_id: PlayerId,
        cards: Vec<String>,
    },
    SettleManually {
        table_id: TableId,
        winner_id: PlayerId,
    },
    SettleSplit {
        table_id: TableId,
        winner_ids: Vec<PlayerId>,
    },
    EndHand {
        table_id: TableId,
    },
    SetButtonPosition {
        table_id: TableId,
        player_id: PlayerId,
    },
    CancelTable {
        table_id: TableId,
    },
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CommandResponse {
    Table(TableSnapshotDto),
    Player(PlayerDto),
    Action(ActionOutcome),
    Cards(Vec<Card>),
    Settlement(ManualSettlement),
    Showdown(ShowdownResult),
    HandEnded(EndHandOutcome),
}

/// Выполнить команду через сервис столов.
pub fn execute_command<S, R>(
    service: &TableService<S, R>,
    command: Command,
) -> Result<CommandResponse, ApiError>
where
    S: TableStore,
    R: RandomSource,
{
    let response = match command {
        Command::CreateTable { config } => {
            let table = service.create_table(config)?;
            snapshot(service, table.id)?
        }
        Command::AddPlayer {
            table_id,
            name,
            chips,
            position,
        } => {
            let mut new_player = NewPlayer::new(name, chips);
            new_player.position = position;
            let player = service.add_player(table_id, new_player)?;
            CommandResponse::Player(map_player_to_dto(&player, Viewer::Operator))
        }
        Command::StartHand { table_id } => {
            service.start_hand(table_id)?;
            snapshot(service, table_id)?
        }
        Command::PlayerAction {
            table_id,
            player_id,
            action,
            round,
        } => CommandResponse::Action(service.apply_action(table_id, player_id, action, round)?),
        Command::DealCommunityCards { table_id, count } => {
            CommandResponse::Cards(service.deal_community_cards(table_id, count)?)
        }
        Command::SetCommunityCards {
            table_id,
            cards,
            round,
        } => {
            let cards = parse_card_list(&cards)?;
            CommandResponse::Cards(service.set_community_cards(table_id, cards, round)?)
        }
        Command::SetHoleCards {
            table_id,
            player_id,
            cards,
        } => {
            let cards = parse_card_list(&cards)?;
            let player = service.set_hole_cards(table_id, player_id, cards)?;
            CommandResponse::Player(map_player_to_dto(&player, Viewer::Operator))
        }
        Command::SettleManually {
            table_id,
            winner_id,
        } => CommandResponse::Settlement(service.settle_manually(table_id, winner_id)?),
        Command::SettleSplit {
            table_id,
            winner_ids,
        } => CommandResponse::Showdown(service.settle_split(table_id, &winner_ids)?),
        Command::EndHand { table_id } => CommandResponse::HandEnded(service.end_hand(table_id)?),
        Command::SetButtonPosition {
            table_id,
            player_id,
        } => {
            service.set_button_position(table_id, player_id)?;
            snapshot(service, table_id)?
        }
        Command::CancelTable { table_id } => {
            service.cancel_table(table_id)?;
            snapshot(service, table_id)?
        }
    };
    Ok(response)
}

/// Команда в JSON -> ответ в JSON.
pub fn execute_command_json<S, R>(service: &TableService<S, R>, input: &str) -> Result<String, ApiError>
where
    S: TableStore,
    R: RandomSource,
{
    let command: Command = serde_json::from_str(input)?;
    let response = execute_command(service, command)?;
    Ok(serde_json::to_string(&response)?)
}

fn parse_card_list(cards: &[String]) -> Result<Vec<Card>, ApiError> {
    Ok(parse_cards(&cards.join(" "))?)
}

fn snapshot<S, R>(service: &TableService<S, R>, table_id: TableId) -> Result<CommandResponse, ApiError>
where
    S: TableStore,
    R: RandomSource,
{
    let state = service.get_state(table_id)?;
    Ok(CommandResponse::Table(map_table_to_dto(&state, Viewer::Operator)))
}
