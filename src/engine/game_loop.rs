use serde::{Deserialize, Serialize};

use crate::domain::{
    ActionRecord, Card, Chips, NewPlayer, Player, PlayerId, Role, SeatIndex, Street, Table,
    TableConfig, TableId, TableStatus,
};
use crate::engine::actions::{ActionKind, PlayerAction};
use crate::engine::betting::{self, first_to_act, is_round_complete, next_player_after, reopen_action};
use crate::engine::dealer::{deal_excluding, ensure_available};
use crate::engine::errors::EngineError;
use crate::engine::positions::{button_index_of, player_with_role, rotate_dealer_button, setup_positions};
use crate::engine::showdown::{self, can_evaluate, settle_showdown, settle_uncontested, ShowdownResult};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;
use crate::state::TableState;

/// Результат одного хода игрока.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Игрок после хода (и после выплаты, если раздача закончилась).
    pub player: Player,
    pub next_player: Option<PlayerId>,
    /// Этот ход закрыл раунд ставок.
    pub round_complete: bool,
    /// Последняя улица, на которую перешёл стол после хода.
    pub next_round: Option<Street>,
    /// Итог раздачи, если ход её завершил.
    pub showdown: Option<ShowdownResult>,
    pub record: ActionRecord,
}

/// Результат ручного расчёта банка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManualSettlement {
    pub winner: PlayerId,
    pub pot_amount: Chips,
}

/// Результат закрытия раздачи.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndHandOutcome {
    /// Меньше двух игроков с фишками — игра окончена.
    pub game_ended: bool,
    /// Игроков с фишками.
    pub active_players: usize,
    pub hand_number: u64,
    /// Новая раздача могла закончиться сразу (все в олл-ине на блайндах).
    pub showdown: Option<ShowdownResult>,
}

/// Что произошло при автоматическом продвижении раздачи.
#[derive(Debug, Default)]
struct Progress {
    next_round: Option<Street>,
    showdown: Option<ShowdownResult>,
}

/// Новый стол в статусе Waiting.
pub fn create_table(id: TableId, config: TableConfig) -> Result<TableState, EngineError> {
    config.validate().map_err(EngineError::InvalidConfig)?;
    log::info!(
        "table {}: created '{}' ({}/{}, {} seats, {:?})",
        id,
        config.name,
        config.small_blind,
        config.big_blind,
        config.max_seats,
        config.deal_mode
    );
    Ok(TableState::new(Table::new(id, config)))
}

/// Статусы, между которыми можно переставить кнопку или закрыть стол.
const BETWEEN_HANDS: &[TableStatus] = &[TableStatus::Waiting, TableStatus::HandCompleted];

/// Проверить, что игрока можно посадить, и выбрать ему место.
/// Стол не меняется.
pub fn seat_for_new_player(
    state: &TableState,
    new_player: &NewPlayer,
) -> Result<SeatIndex, EngineError> {
    ensure_status(&state.table, TableStatus::Waiting)?;
    if new_player.chips.is_zero() {
        return Err(EngineError::EmptyStack);
    }

    let max_seats = state.table.max_seats();
    if state.players.len() >= usize::from(max_seats) {
        return Err(EngineError::TableFull);
    }

    let taken = |seat: SeatIndex| state.players.iter().any(|p| p.position == seat);
    match new_player.position {
        Some(seat) if seat >= max_seats || taken(seat) => Err(EngineError::SeatUnavailable(seat)),
        Some(seat) => Ok(seat),
        None => (0..max_seats)
            .find(|&seat| !taken(seat))
            .ok_or(EngineError::TableFull),
    }
}

/// Посадить игрока. Только пока стол ждёт старта.
pub fn add_player(
    state: &mut TableState,
    id: PlayerId,
    new_player: NewPlayer,
) -> Result<Player, EngineError> {
    let position = seat_for_new_player(state, &new_player)?;
    let player = Player::new(id, state.id(), position, new_player.name, new_player.chips);
    log::info!(
        "table {}: player {} '{}' seated at {} with {}",
        state.id(),
        id,
        player.name,
        position,
        player.chips
    );
    state.insert_player(player.clone());
    Ok(player)
}

/// Первая раздача за столом.
pub fn start_hand<R: RandomSource>(state: &mut TableState, rng: &mut R) -> Result<(), EngineError> {
    ensure_status(&state.table, TableStatus::Waiting)?;
    if state.players_with_chips() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    reset_for_next_hand(state);
    begin_hand(state, rng)?;
    Ok(())
}

/// Применить ход игрока.
///
/// `round` — улица, для которой клиент отправил ход; если она не совпадает
/// с текущей, ход отклоняется (устаревший запрос).
pub fn apply_action<R: RandomSource>(
    state: &mut TableState,
    action: PlayerAction,
    round: Option<Street>,
    rng: &mut R,
) -> Result<ActionOutcome, EngineError> {
    if !state.table.hand_in_progress() {
        return Err(EngineError::NoActiveHand);
    }
    let current_round = state.table.current_round;
    if let Some(requested) = round {
        if requested != current_round {
            return Err(EngineError::RoundMismatch {
                requested,
                actual: current_round,
            });
        }
    }

    let player = state.player(action.player_id)?;
    if state.table.current_player_id != Some(player.id) {
        return Err(EngineError::NotPlayersTurn(player.id));
    }
    let amount = validate_action(state, player, &action.kind)?;
    let position = player.position;
    let bet_before = state.table.current_bet;

    // Дальше только изменения: все проверки пройдены.
    let new_bet = {
        let p = state.player_mut(action.player_id)?;
        match action.kind {
            ActionKind::Fold => p.is_folded = true,
            ActionKind::Check => {}
            ActionKind::Call(_) | ActionKind::Raise(_) | ActionKind::AllIn => {
                p.chips -= amount;
                p.current_bet += amount;
                if p.chips.is_zero() {
                    p.is_all_in = true;
                }
            }
        }
        p.has_acted_this_round = true;
        p.current_bet
    };
    state.table.current_pot += amount;

    if new_bet > bet_before {
        state.table.current_bet = new_bet;
        reopen_action(state, action.player_id);
    }

    let record = record_action(state, action, amount)?;
    log::debug!(
        "table {}: hand #{} {:?} player {} {:?} {} (pot {}, bet {})",
        state.id(),
        state.table.hand_number,
        current_round,
        action.player_id,
        record.action_type,
        amount,
        state.table.current_pot,
        state.table.current_bet
    );

    let round_complete = state.in_hand_count() <= 1 || is_round_complete(state);
    if !round_complete {
        state.table.current_player_id = next_player_after(state, position);
    }

    let progress = progress(state, rng)?;

    Ok(ActionOutcome {
        player: state.player(action.player_id)?.clone(),
        next_player: state.table.current_player_id,
        round_complete,
        next_round: progress.next_round,
        showdown: progress.showdown,
        record,
    })
}

/// Выложить `count` случайных карт на борд, когда их ждёт текущая улица
/// (ручной режим без ввода конкретных карт).
pub fn deal_community_cards<R: RandomSource>(
    state: &mut TableState,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>, EngineError> {
    if !state.table.hand_in_progress() {
        return Err(EngineError::NoActiveHand);
    }
    let round = state.table.current_round;
    let missing = round
        .board_size()
        .saturating_sub(state.table.community_cards.len());
    if missing == 0 {
        return Err(EngineError::BoardOutOfOrder(round));
    }
    if count != missing {
        return Err(EngineError::WrongCardCount {
            expected: missing,
            actual: count,
        });
    }

    let cards = deal_excluding(&state.cards_in_play(), count, rng)?;
    state.table.community_cards.extend(cards.iter().copied());
    log::debug!("table {}: dealt {:?} on {:?}", state.id(), cards, round);

    progress(state, rng)?;
    Ok(cards)
}

/// Задать общие карты улицы `round` руками.
///
/// Если карты этой улицы уже лежат, они заменяются; иначе добавляются.
/// Возвращает борд целиком.
pub fn set_community_cards<R: RandomSource>(
    state: &mut TableState,
    cards: Vec<Card>,
    round: Street,
    rng: &mut R,
) -> Result<Vec<Card>, EngineError> {
    if !state.table.hand_in_progress() {
        return Err(EngineError::NoActiveHand);
    }
    let expected = round.cards_dealt();
    if expected == 0 || round > state.table.current_round {
        return Err(EngineError::BoardOutOfOrder(round));
    }

    let board = &state.table.community_cards;
    let start = round.board_size() - expected;
    if board.len() < start {
        return Err(EngineError::BoardOutOfOrder(round));
    }
    if cards.len() != expected {
        return Err(EngineError::WrongCardCount {
            expected,
            actual: cards.len(),
        });
    }

    let end = board.len().min(start + expected);
    let mut used: Vec<Card> = state
        .players
        .iter()
        .flat_map(|p| p.hole_cards.iter().copied())
        .collect();
    used.extend_from_slice(&board[..start]);
    used.extend_from_slice(&board[end..]);
    ensure_available(&used, &cards)?;

    let mut new_board = board[..start].to_vec();
    new_board.extend_from_slice(&cards);
    new_board.extend_from_slice(&board[end..]);
    state.table.community_cards = new_board;
    log::debug!("table {}: board set to {:?}", state.id(), state.table.community_cards);

    progress(state, rng)?;
    Ok(state.table.community_cards.clone())
}

/// Задать карманные карты игрока руками.
pub fn set_hole_cards<R: RandomSource>(
    state: &mut TableState,
    player_id: PlayerId,
    cards: Vec<Card>,
    rng: &mut R,
) -> Result<Player, EngineError> {
    if !state.table.hand_in_progress() {
        return Err(EngineError::NoActiveHand);
    }
    if cards.len() != 2 {
        return Err(EngineError::WrongCardCount {
            expected: 2,
            actual: cards.len(),
        });
    }
    if !state.player(player_id)?.is_active {
        return Err(EngineError::NotInHand(player_id));
    }

    let used: Vec<Card> = state
        .players
        .iter()
        .filter(|p| p.id != player_id)
        .flat_map(|p| p.hole_cards.iter().copied())
        .chain(state.table.community_cards.iter().copied())
        .collect();
    ensure_available(&used, &cards)?;

    state.player_mut(player_id)?.hole_cards = cards;
    log::debug!("table {}: hole cards set for player {}", state.id(), player_id);

    progress(state, rng)?;
    Ok(state.player(player_id)?.clone())
}

/// Отдать весь банк указанному игроку без вскрытия.
pub fn settle_manually(
    state: &mut TableState,
    winner: PlayerId,
) -> Result<ManualSettlement, EngineError> {
    let result = showdown::settle_split(state, &[winner])?;
    Ok(ManualSettlement {
        winner,
        pot_amount: result.pot,
    })
}

/// Поделить банк между несколькими игроками.
pub fn settle_split(
    state: &mut TableState,
    winners: &[PlayerId],
) -> Result<ShowdownResult, EngineError> {
    showdown::settle_split(state, winners)
}

/// Закрыть завершённую раздачу: сдвинуть кнопку и начать следующую,
/// либо закончить игру, если фишки остались меньше чем у двух игроков.
pub fn end_hand<R: RandomSource>(
    state: &mut TableState,
    rng: &mut R,
) -> Result<EndHandOutcome, EngineError> {
    ensure_status(&state.table, TableStatus::HandCompleted)?;

    let active_players = state.players_with_chips();
    if active_players < 2 {
        state.table.status = TableStatus::Completed;
        state.table.current_player_id = None;
        log::info!(
            "table {}: game over after hand #{} ({} player(s) with chips)",
            state.id(),
            state.table.hand_number,
            active_players
        );
        return Ok(EndHandOutcome {
            game_ended: true,
            active_players,
            hand_number: state.table.hand_number,
            showdown: None,
        });
    }

    match state.table.pending_button.take() {
        Some(id) => match button_index_of(state, id) {
            Ok(idx) => state.table.dealer_position = idx,
            Err(_) => rotate_dealer_button(state),
        },
        None => rotate_dealer_button(state),
    }

    reset_for_next_hand(state);
    let progress = begin_hand(state, rng)?;

    Ok(EndHandOutcome {
        game_ended: false,
        active_players,
        hand_number: state.table.hand_number,
        showdown: progress.showdown,
    })
}

/// Поставить кнопку на конкретного игрока.
///
/// До первой раздачи применяется сразу, между раздачами — к следующей.
pub fn set_button_position(state: &mut TableState, player_id: PlayerId) -> Result<(), EngineError> {
    let idx = button_index_of(state, player_id)?;
    match state.table.status {
        TableStatus::Waiting => {
            state.table.dealer_position = idx;
            setup_positions(state);
        }
        TableStatus::HandCompleted => state.table.pending_button = Some(player_id),
        actual => {
            return Err(EngineError::StatusNotAllowed {
                allowed: BETWEEN_HANDS,
                actual,
            })
        }
    }
    log::info!("table {}: button set to player {}", state.id(), player_id);
    Ok(())
}

/// Закрыть стол. Нельзя посреди раздачи.
pub fn cancel_table(state: &mut TableState) -> Result<(), EngineError> {
    match state.table.status {
        TableStatus::Waiting | TableStatus::HandCompleted => {
            state.table.status = TableStatus::Cancelled;
            state.table.current_player_id = None;
            log::info!("table {}: cancelled", state.id());
            Ok(())
        }
        actual => Err(EngineError::StatusNotAllowed {
            allowed: BETWEEN_HANDS,
            actual,
        }),
    }
}

/// Можно ли игроку сейчас сделать check.
pub fn can_check(state: &TableState, player_id: PlayerId) -> Result<bool, EngineError> {
    let player = state.player(player_id)?;
    Ok(betting::can_check(state, player))
}

fn ensure_status(table: &Table, expected: TableStatus) -> Result<(), EngineError> {
    if table.status == expected {
        Ok(())
    } else {
        Err(EngineError::WrongStatus {
            expected,
            actual: table.status,
        })
    }
}

/// Сброс между раздачами. Стеки и позиции сохраняются.
fn reset_for_next_hand(state: &mut TableState) {
    for p in state.players.iter_mut() {
        p.reset_for_hand();
    }
    let table = &mut state.table;
    table.community_cards.clear();
    table.current_pot = Chips::ZERO;
    table.current_bet = Chips::ZERO;
    table.current_player_id = None;
    table.current_round = Street::Preflop;
    table.hand_number += 1;
}

/// Роли, блайнды, карманные карты — и раздача пошла.
fn begin_hand<R: RandomSource>(state: &mut TableState, rng: &mut R) -> Result<Progress, EngineError> {
    state.table.status = TableStatus::Active;
    setup_positions(state);
    post_blinds(state)?;

    if !state.table.is_manual() {
        let seated: Vec<PlayerId> = state
            .players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.id)
            .collect();
        let cards = deal_excluding(&state.cards_in_play(), seated.len() * 2, rng)?;
        for (id, pair) in seated.iter().zip(cards.chunks(2)) {
            state.player_mut(*id)?.hole_cards = pair.to_vec();
        }
    }

    log::info!(
        "table {}: hand #{} started, button index {}, {} players",
        state.id(),
        state.table.hand_number,
        state.table.dealer_position,
        state.players_with_chips()
    );

    progress(state, rng)
}

/// Блайнды: каждый не больше стека. Ставка стола — big blind,
/// даже если BB поставил меньше.
fn post_blinds(state: &mut TableState) -> Result<(), EngineError> {
    let sb = player_with_role(state, Role::SmallBlind).ok_or(EngineError::NotEnoughPlayers)?;
    let bb = player_with_role(state, Role::BigBlind).ok_or(EngineError::NotEnoughPlayers)?;
    let small = state.table.small_blind();
    let big = state.table.big_blind();

    for (id, blind) in [(sb, small), (bb, big)] {
        let p = state.player_mut(id)?;
        let paid = blind.min(p.chips);
        p.chips -= paid;
        p.current_bet += paid;
        if p.chips.is_zero() {
            p.is_all_in = true;
        }
        state.table.current_pot += paid;
    }
    state.table.current_bet = big;

    let bb_position = state.player(bb)?.position;
    state.table.current_player_id = next_player_after(state, bb_position);
    Ok(())
}

/// Перейти на следующую улицу: обнулить ставки, в автоматическом режиме
/// доложить недостающие общие карты.
fn advance_round<R: RandomSource>(state: &mut TableState, rng: &mut R) -> Result<Street, EngineError> {
    let next = state
        .table
        .current_round
        .next()
        .ok_or(EngineError::BoardOutOfOrder(Street::Showdown))?;

    for p in state.players.iter_mut() {
        p.current_bet = Chips::ZERO;
        p.has_acted_this_round = false;
    }
    state.table.current_bet = Chips::ZERO;
    state.table.current_round = next;

    if !state.table.is_manual() {
        let missing = next
            .board_size()
            .saturating_sub(state.table.community_cards.len());
        if missing > 0 {
            let cards = deal_excluding(&state.cards_in_play(), missing, rng)?;
            state.table.community_cards.extend(cards);
        }
    }

    state.table.current_player_id = if next == Street::Showdown {
        None
    } else {
        first_to_act(state)
    };

    log::debug!(
        "table {}: hand #{} -> {:?}, board {:?}",
        state.id(),
        state.table.hand_number,
        next,
        state.table.community_cards
    );
    Ok(next)
}

/// Двигать раздачу, пока никому не нужно ходить: переходы улиц,
/// выплата одному оставшемуся, вскрытие.
fn progress<R: RandomSource>(state: &mut TableState, rng: &mut R) -> Result<Progress, EngineError> {
    let mut out = Progress::default();

    while state.table.hand_in_progress() {
        if state.in_hand_count() <= 1 {
            out.showdown = Some(settle_uncontested(state)?);
            break;
        }
        if state.table.current_round == Street::Showdown {
            // В ручном режиме ждём недостающие карты.
            if can_evaluate(state) {
                out.showdown = Some(settle_showdown(state)?);
            }
            break;
        }
        if !is_round_complete(state) {
            break;
        }
        out.next_round = Some(advance_round(state, rng)?);
    }

    Ok(out)
}

fn record_action(
    state: &mut TableState,
    action: PlayerAction,
    amount: Chips,
) -> Result<ActionRecord, EngineError> {
    let player = state.player(action.player_id)?;
    let table = &state.table;
    let record = ActionRecord {
        id: state.actions.next_id(),
        hand_number: table.hand_number,
        round: table.current_round,
        player_id: player.id,
        position: player.position,
        role: player.role,
        action_type: action.kind.action_type(),
        amount,
        pot_size: table.current_pot,
        table_bet: table.current_bet,
        hole_cards: player.hole_cards.clone(),
        community_cards: table.community_cards.clone(),
    };
    state.actions.push(record.clone());
    Ok(record)
}
