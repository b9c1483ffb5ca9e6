//! End-to-end league scenarios.
//!
//! These tests drive the ledger only through its public operations (plus a
//! snapshot restore where a league needs players already on rosters) and
//! check balances, rosters and match state after each step.

use league_ledger::{LeagueLedger, LedgerSnapshot};
use league_types::*;

const DATE: i64 = 1_625_097_600;

fn admin() -> Principal {
    Principal::from("contract-owner")
}

fn owner1() -> Principal {
    Principal::from("owner1")
}

fn owner2() -> Principal {
    Principal::from("owner2")
}

/// Teams 1 and 2 with one match between them already scheduled.
fn two_team_league(config: LeagueConfig) -> (LeagueLedger, MatchId) {
    let mut ledger = LeagueLedger::new(config);
    ledger.create_team(&owner1(), "Team A").unwrap();
    ledger.create_team(&owner2(), "Team B").unwrap();
    let m = ledger
        .schedule_match(&admin(), TeamId(1), TeamId(2), DATE)
        .unwrap();
    (ledger, m)
}

/// Team 2 has won one match (1,000,000), player 1 sits on team 1's roster.
fn league_with_signed_player() -> LeagueLedger {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.add_player(&admin(), "Player 1", 1_000_000).unwrap();
    ledger.report_match_result(&admin(), m, 0, 1).unwrap();

    let mut snapshot: LedgerSnapshot = ledger.snapshot();
    snapshot.players[0].team_id = Some(TeamId(1));
    snapshot.teams[0].roster.push(PlayerId(1));
    LeagueLedger::restore(snapshot).expect("rostered snapshot should restore")
}

// =============================================================================
// Teams, players, matches
// =============================================================================

#[test]
fn creating_teams() {
    let mut ledger = LeagueLedger::default();
    let id = ledger.create_team(&owner1(), "Team A").unwrap();
    assert_eq!(id, TeamId(1));

    let team = ledger.team(id).expect("team should exist");
    assert_eq!(team.name, "Team A");
    assert_eq!(team.owner, owner1());
}

#[test]
fn team_ids_increase_regardless_of_caller() {
    let mut ledger = LeagueLedger::default();
    let callers = [owner1(), admin(), owner2(), owner1(), Principal::from("")];
    let ids: Vec<TeamId> = callers
        .iter()
        .enumerate()
        .map(|(i, c)| ledger.create_team(c, format!("Team {i}")).unwrap())
        .collect();
    assert_eq!(ids, (1..=5).map(TeamId).collect::<Vec<_>>());
}

#[test]
fn adding_players() {
    let mut ledger = LeagueLedger::default();
    let id = ledger.add_player(&admin(), "Player 1", 1_000_000).unwrap();
    assert_eq!(id, PlayerId(1));

    let player = ledger.player(id).expect("player should exist");
    assert_eq!(player.name, "Player 1");
    assert_eq!(player.value, 1_000_000);
    assert_eq!(player.team_id, None);
}

#[test]
fn rejected_add_player_allocates_no_id() {
    let mut ledger = LeagueLedger::default();
    ledger.add_player(&admin(), "Player 1", 1).unwrap();
    for caller in [owner1(), owner2(), Principal::from("Contract-Owner")] {
        let err = ledger.add_player(&caller, "Sneaky", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OwnerOnly);
        assert_eq!(err.code(), 100);
    }
    assert_eq!(ledger.add_player(&admin(), "Player 2", 1).unwrap(), PlayerId(2));
}

#[test]
fn scheduling_matches() {
    let (ledger, m) = two_team_league(LeagueConfig::default());
    assert_eq!(m, MatchId(1));

    let fixture = ledger.get_match(m).expect("match should exist");
    assert_eq!(fixture.home_team, TeamId(1));
    assert_eq!(fixture.away_team, TeamId(2));
    assert_eq!(fixture.status, MatchStatus::Scheduled);
    assert_eq!(fixture.date, DATE);
}

#[test]
fn rejected_schedule_allocates_no_id() {
    let (mut ledger, _) = two_team_league(LeagueConfig::default());
    let err = ledger
        .schedule_match(&admin(), TeamId(2), TeamId(2), DATE)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    let err = ledger
        .schedule_match(&owner1(), TeamId(1), TeamId(2), DATE)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnerOnly);

    let next = ledger
        .schedule_match(&admin(), TeamId(2), TeamId(1), DATE)
        .unwrap();
    assert_eq!(next, MatchId(2));
}

// =============================================================================
// Results and prizes
// =============================================================================

#[test]
fn reporting_results_distributes_prize() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.report_match_result(&admin(), m, 3, 1).unwrap();

    let fixture = ledger.get_match(m).unwrap();
    assert_eq!(fixture.status, MatchStatus::Completed);
    assert_eq!(fixture.home_score, Some(3));
    assert_eq!(fixture.away_score, Some(1));
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 1_000_000);
    assert_eq!(ledger.team(TeamId(2)).unwrap().balance, 0);
    ledger.verify_integrity().unwrap();
}

#[test]
fn draw_splits_prize() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.report_match_result(&admin(), m, 2, 2).unwrap();
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 500_000);
    assert_eq!(ledger.team(TeamId(2)).unwrap().balance, 500_000);
    ledger.verify_supply().unwrap();
}

#[test]
fn odd_prize_pool_draw_gives_remainder_to_home() {
    let config = LeagueConfig {
        prize_pool: 1_000_001,
        ..LeagueConfig::default()
    };
    let (mut ledger, m) = two_team_league(config);
    ledger.report_match_result(&admin(), m, 0, 0).unwrap();

    let home = ledger.team(TeamId(1)).unwrap().balance;
    let away = ledger.team(TeamId(2)).unwrap().balance;
    assert_eq!(home, 500_001);
    assert_eq!(away, 500_000);
    assert_eq!(u128::from(home + away), ledger.total_balance());
    ledger.verify_supply().unwrap();
}

#[test]
fn result_is_reported_exactly_once() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.report_match_result(&admin(), m, 3, 1).unwrap();
    let digest = ledger.state_digest().unwrap();

    let err = ledger.report_match_result(&admin(), m, 0, 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.code(), 104);

    assert_eq!(ledger.state_digest().unwrap(), digest);
    let fixture = ledger.get_match(m).unwrap();
    assert_eq!((fixture.home_score, fixture.away_score), (Some(3), Some(1)));
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 1_000_000);
    assert_eq!(ledger.team(TeamId(2)).unwrap().balance, 0);
}

#[test]
fn match_against_unregistered_team_pays_out_once_it_exists() {
    let mut ledger = LeagueLedger::default();
    // Scheduling does not require the teams to exist.
    let m = ledger
        .schedule_match(&admin(), TeamId(1), TeamId(2), DATE)
        .unwrap();
    let before = ledger.state_digest().unwrap();

    let err = ledger.report_match_result(&admin(), m, 1, 1).unwrap_err();
    assert_eq!(err, LeagueError::NotFound(EntityRef::Team(TeamId(1))));
    assert_eq!(ledger.state_digest().unwrap(), before);

    ledger.create_team(&owner1(), "Team A").unwrap();
    ledger.create_team(&owner2(), "Team B").unwrap();
    ledger.report_match_result(&admin(), m, 1, 1).unwrap();
    assert_eq!(ledger.total_balance(), 1_000_000);
}

// =============================================================================
// Withdrawals
// =============================================================================

#[test]
fn withdrawing_balance() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.report_match_result(&admin(), m, 3, 1).unwrap();

    ledger.withdraw_balance(&owner1(), TeamId(1), 500_000).unwrap();
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 500_000);

    let err = ledger
        .withdraw_balance(&owner1(), TeamId(1), 600_000)
        .unwrap_err();
    assert_eq!(
        err,
        LeagueError::InsufficientFunds {
            needed: 600_000,
            available: 500_000
        }
    );
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 500_000);
    assert_eq!(ledger.supply().total_withdrawn(), 500_000);
    ledger.verify_supply().unwrap();
}

#[test]
fn only_owner_can_withdraw() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.report_match_result(&admin(), m, 3, 1).unwrap();
    let before = ledger.state_digest().unwrap();

    for caller in [owner2(), admin(), Principal::from("owner1 ")] {
        for amount in [0, 1, 1_000_000, u64::MAX] {
            let err = ledger
                .withdraw_balance(&caller, TeamId(1), amount)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized, "{caller} / {amount}");
        }
    }
    assert_eq!(ledger.state_digest().unwrap(), before);
}

// =============================================================================
// Trades
// =============================================================================

#[test]
fn trade_conserves_balances_and_moves_player() {
    let mut ledger = league_with_signed_player();
    let before = ledger.team(TeamId(1)).unwrap().balance + ledger.team(TeamId(2)).unwrap().balance;

    ledger
        .trade_player(&owner1(), PlayerId(1), TeamId(1), TeamId(2), 400_000)
        .unwrap();

    let from = ledger.team(TeamId(1)).unwrap();
    let to = ledger.team(TeamId(2)).unwrap();
    assert_eq!(from.balance + to.balance, before);
    assert_eq!(from.balance, 400_000);
    assert_eq!(to.balance, 600_000);
    assert!(!from.roster.contains(&PlayerId(1)));
    assert!(to.roster.contains(&PlayerId(1)));
    assert_eq!(ledger.player(PlayerId(1)).unwrap().team_id, Some(TeamId(2)));
    ledger.verify_integrity().unwrap();

    // The new owner can sell the player back.
    ledger
        .trade_player(&owner2(), PlayerId(1), TeamId(2), TeamId(1), 400_000)
        .unwrap();
    assert_eq!(ledger.team(TeamId(1)).unwrap().balance, 0);
    assert_eq!(ledger.roster(TeamId(1)).unwrap()[0].id, PlayerId(1));
    ledger.verify_integrity().unwrap();
}

#[test]
fn failed_trades_leave_state_untouched() {
    let mut ledger = league_with_signed_player();
    let before = ledger.state_digest().unwrap();

    // Buyer cannot afford it.
    let err = ledger
        .trade_player(&owner1(), PlayerId(1), TeamId(1), TeamId(2), 1_000_001)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);

    // Caller is not the selling team's owner.
    for caller in [owner2(), admin()] {
        let err = ledger
            .trade_player(&caller, PlayerId(1), TeamId(1), TeamId(2), 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    // Unknown entities.
    let err = ledger
        .trade_player(&owner1(), PlayerId(1), TeamId(1), TeamId(3), 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(ledger.state_digest().unwrap(), before);
}

#[test]
fn trading_to_own_team_is_a_no_op_transfer() {
    let mut ledger = league_with_signed_player();
    ledger
        .trade_player(&owner1(), PlayerId(1), TeamId(1), TeamId(1), 0)
        .unwrap();
    let team = ledger.team(TeamId(1)).unwrap();
    assert_eq!(team.roster, vec![PlayerId(1)]);
    assert_eq!(team.balance, 0);
    ledger.verify_integrity().unwrap();
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn restored_ledger_continues_counters() {
    let (mut ledger, m) = two_team_league(LeagueConfig::default());
    ledger.add_player(&admin(), "Player 1", 5).unwrap();
    ledger.report_match_result(&admin(), m, 1, 0).unwrap();

    let json = ledger.snapshot().to_json().unwrap();
    let mut restored = LeagueLedger::restore(LedgerSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.create_team(&owner1(), "Team C").unwrap(), TeamId(3));
    assert_eq!(restored.add_player(&admin(), "P2", 1).unwrap(), PlayerId(2));
    assert_eq!(
        restored
            .schedule_match(&admin(), TeamId(1), TeamId(3), DATE)
            .unwrap(),
        MatchId(2)
    );
}

#[test]
fn admin_comes_from_config() {
    let config = LeagueConfig::from_json(r#"{ "admin": "commissioner" }"#).unwrap();
    let mut ledger = LeagueLedger::new(config);
    assert_eq!(ledger.admin(), &Principal::from("commissioner"));
    assert_eq!(ledger.prize_pool(), constants::DEFAULT_PRIZE_POOL);

    let err = ledger.add_player(&admin(), "P", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OwnerOnly);
    ledger
        .add_player(&Principal::from("commissioner"), "P", 1)
        .unwrap();
}
