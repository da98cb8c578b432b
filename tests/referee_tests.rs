//! Referee integration tests.
//!
//! These drive full games through the public API with scripted dice and
//! check every contract the engine makes: canonical start state, silent
//! no-op gates, the special-tile outcomes, win handling, and rotation.

use tilerun::{
    BoardBuilder, BoardState, IllegalMove, PlayerId, Referee, ScriptedDie, UserId, START_MESSAGE,
};

const OWNER: UserId = UserId(100);
const ADA: PlayerId = PlayerId(1);
const GRACE: PlayerId = PlayerId(2);
const EDSGER: PlayerId = PlayerId(3);

fn user_of(player: PlayerId) -> UserId {
    UserId::new(100 + player.raw())
}

fn two_player_board() -> BoardState {
    BoardBuilder::new(OWNER)
        .player(ADA, user_of(ADA), "Ada")
        .player(GRACE, user_of(GRACE), "Grace")
        .build()
}

fn three_player_board() -> BoardState {
    BoardBuilder::new(OWNER)
        .player(ADA, user_of(ADA), "Ada")
        .player(GRACE, user_of(GRACE), "Grace")
        .player(EDSGER, user_of(EDSGER), "Edsger")
        .build()
}

fn started(board: &BoardState) -> BoardState {
    Referee::new().start_game(OWNER, board).expect("owner starts").state
}

/// One accepted turn with a scripted roll, checking the occupancy invariant.
fn take(referee: &Referee, board: &BoardState, player: PlayerId, roll: u8) -> BoardState {
    let mut die = ScriptedDie::new([roll]);
    let transition = referee
        .play_turn(user_of(player), player, board, &mut die)
        .expect("turn accepted");
    assert!(transition.state.occupancy_consistent());
    transition.state
}

/// Alternate scripted turns among whoever holds the pointer.
fn walk(referee: &Referee, mut board: BoardState, rolls: &[u8]) -> BoardState {
    for &roll in rolls {
        let player = board.turn.expect("game still in progress");
        board = take(referee, &board, player, roll);
    }
    board
}

#[test]
fn start_produces_canonical_state() {
    let transition = Referee::new()
        .start_game(OWNER, &three_player_board())
        .unwrap();
    let state = &transition.state;

    assert_eq!(transition.messages.as_slice(), [START_MESSAGE.to_string()]);
    assert_eq!(state.winner, None);
    assert_eq!(state.turn, Some(ADA));

    for player in state.players() {
        assert_eq!(player.position, 1);
        assert_eq!(player.last_roll, 0);
    }

    let first_tile = state.tile(1).unwrap();
    assert_eq!(first_tile.occupants.len(), 3);
    for cell in 2..=state.track_len() {
        assert!(state.tile(cell).unwrap().occupants.is_empty());
    }
    assert!(state.occupancy_consistent());
}

#[test]
fn start_mid_game_re_resets() {
    let referee = Referee::new();
    let fresh = started(&two_player_board());
    let mid_game = walk(&referee, fresh.clone(), &[2, 1, 6, 1]);
    assert_ne!(mid_game, fresh);

    let restarted = referee.start_game(OWNER, &mid_game).unwrap().state;
    assert_eq!(restarted, fresh);
}

#[test]
fn start_by_non_owner_is_silent_noop() {
    let referee = Referee::new();
    let board = two_player_board();

    assert!(referee.start_game(user_of(ADA), &board).is_none());
    assert_eq!(
        referee.try_start_game(user_of(ADA), &board),
        Err(IllegalMove::NotAuthorized)
    );
}

#[test]
fn gates_are_checked_in_order() {
    let referee = Referee::new();
    let mut state = started(&two_player_board());
    let mut die = ScriptedDie::new([3, 3, 3]);

    // Wrong actor for a player whose turn it also isn't: authorization first.
    assert_eq!(
        referee.try_play_turn(user_of(ADA), GRACE, &state, &mut die),
        Err(IllegalMove::NotAuthorized)
    );

    // Right actor, wrong turn.
    assert_eq!(
        referee.try_play_turn(user_of(GRACE), GRACE, &state, &mut die),
        Err(IllegalMove::NotYourTurn)
    );

    // A winner outranks the turn check.
    state.winner = Some(ADA);
    assert_eq!(
        referee.try_play_turn(user_of(GRACE), GRACE, &state, &mut die),
        Err(IllegalMove::GameOver)
    );

    // No roll was consumed by any rejected call.
    assert_eq!(die.remaining(), 3);
}

#[test]
fn plain_roll_moves_and_reports() {
    let referee = Referee::new();
    let state = started(&two_player_board());

    let mut die = ScriptedDie::new([2]);
    let transition = referee
        .play_turn(user_of(ADA), ADA, &state, &mut die)
        .unwrap();

    assert_eq!(
        transition.messages.as_slice(),
        ["Ada rolled 2 and went to tile 3".to_string()]
    );

    let ada = transition.state.player(ADA).unwrap();
    assert_eq!(ada.position, 3);
    assert_eq!(ada.last_roll, 2);

    // The other player is untouched.
    let grace = transition.state.player(GRACE).unwrap();
    assert_eq!(grace.position, 1);
    assert_eq!(grace.last_roll, 0);

    // Occupancy followed the move.
    assert!(!transition.state.tile(1).unwrap().occupants.contains(&ADA));
    assert!(transition.state.tile(3).unwrap().occupants.contains(&ADA));
    assert!(transition.state.tile(1).unwrap().occupants.contains(&GRACE));
}

#[test]
fn superman_jump_from_start() {
    // Position 1, roll 4: target 5 flies ahead to 8.
    let referee = Referee::new();
    let state = started(&two_player_board());

    let mut die = ScriptedDie::new([4]);
    let transition = referee
        .play_turn(user_of(ADA), ADA, &state, &mut die)
        .unwrap();

    assert_eq!(transition.state.player(ADA).unwrap().position, 8);
    assert_eq!(transition.messages.len(), 2);
    assert_eq!(
        transition.messages[1],
        "Ada rolled 4 and went to tile 5. \
         Superman just used his powers! Fly 3 steps ahead to 8!"
    );
    assert!(transition.state.tile(8).unwrap().occupants.contains(&ADA));
    assert!(transition.state.occupancy_consistent());
}

#[test]
fn banana_slip_back() {
    // Walk Ada to 9, then roll 4: target 13 slips back to 10.
    let referee = Referee::new();
    let state = walk(&referee, started(&two_player_board()), &[2, 1, 6, 1]);
    assert_eq!(state.player(ADA).unwrap().position, 9);

    let next = take(&referee, &state, ADA, 4);
    assert_eq!(next.player(ADA).unwrap().position, 10);
    assert!(next.tile(10).unwrap().occupants.contains(&ADA));
}

#[test]
fn rest_resets_to_start() {
    // Walk Ada to 24, then roll 3: target 27 goes back to tile 1.
    let referee = Referee::new();
    let state = walk(
        &referee,
        started(&two_player_board()),
        &[2, 1, 6, 1, 4, 1, 6, 2, 6, 1, 2, 1],
    );
    assert_eq!(state.player(ADA).unwrap().position, 24);

    let next = take(&referee, &state, ADA, 3);
    let ada = next.player(ADA).unwrap();
    assert_eq!(ada.position, 1);
    assert_eq!(ada.last_roll, 3);
    assert!(next.tile(1).unwrap().occupants.contains(&ADA));
    assert_eq!(next.winner, None);
}

#[test]
fn overshoot_bounces_back_by_excess() {
    // Walk Ada to 29, then roll 4: target 33 bounces back to 27.
    let referee = Referee::new();
    let state = walk(
        &referee,
        started(&two_player_board()),
        &[3, 1, 4, 1, 6, 1, 6, 2, 6, 1, 3, 1],
    );
    assert_eq!(state.player(ADA).unwrap().position, 29);

    let next = take(&referee, &state, ADA, 4);
    assert_eq!(next.player(ADA).unwrap().position, 27);
    assert_eq!(next.winner, None);
}

#[test]
fn bounce_onto_own_tile_keeps_occupancy() {
    // Position 27, roll 6: target 33 bounces back to 27, so no net movement.
    // Tile 27 itself is only reachable through a bounce, since reaching
    // target 27 directly always rests back to the start.
    let referee = Referee::new();
    let state = walk(
        &referee,
        started(&two_player_board()),
        &[3, 1, 4, 1, 6, 1, 6, 2, 6, 1, 3, 1, 4, 1],
    );
    assert_eq!(state.player(ADA).unwrap().position, 27);

    let next = take(&referee, &state, ADA, 6);
    assert_eq!(next.player(ADA).unwrap().position, 27);
    assert_eq!(next.player(ADA).unwrap().last_roll, 6);
    assert_eq!(
        next.tile(27).unwrap().occupants,
        state.tile(27).unwrap().occupants
    );
}

#[test]
fn exact_landing_wins_and_freezes_the_board() {
    // Walk Ada to 28, then roll 2: lands exactly on 30.
    let referee = Referee::new();
    let state = walk(
        &referee,
        started(&two_player_board()),
        &[3, 1, 4, 1, 6, 1, 6, 2, 6, 1, 2, 1],
    );
    assert_eq!(state.player(ADA).unwrap().position, 28);

    let won = take(&referee, &state, ADA, 2);
    assert_eq!(won.winner, Some(ADA));
    assert_eq!(won.turn, None);
    assert!(!won.can_play(ADA));
    assert!(!won.can_play(GRACE));

    // Any further turn by anyone is a no-op.
    for player in [ADA, GRACE] {
        let mut die = ScriptedDie::new([1]);
        assert!(referee
            .play_turn(user_of(player), player, &won, &mut die)
            .is_none());
        assert_eq!(die.remaining(), 1);
    }
}

#[test]
fn rotation_is_circular() {
    let referee = Referee::new();
    let state = started(&three_player_board());
    assert_eq!(state.turn, Some(ADA));

    let state = take(&referee, &state, ADA, 1);
    assert_eq!(state.turn, Some(GRACE));

    let state = take(&referee, &state, GRACE, 1);
    assert_eq!(state.turn, Some(EDSGER));

    // Last in order wraps back to the first.
    let state = take(&referee, &state, EDSGER, 1);
    assert_eq!(state.turn, Some(ADA));
}

#[test]
fn snapshots_are_never_mutated() {
    let referee = Referee::new();
    let state = started(&two_player_board());
    let before = state.clone();

    let mut die = ScriptedDie::new([4]);
    let _ = referee.play_turn(user_of(ADA), ADA, &state, &mut die);

    assert_eq!(state, before);
}
