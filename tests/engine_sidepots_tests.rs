//! Сайд-поты: слои вкладов, слияние мёртвых слоёв, возврат неуравненной ставки,
//! деление банка с лишними фишками.

use std::collections::{BTreeMap, BTreeSet};

use holdem_engine::domain::{Chips, SeatIndex};
use holdem_engine::engine::{compute_side_pots, split_pot, Pot, PotManager};

fn contributions(pairs: &[(SeatIndex, u64)]) -> BTreeMap<SeatIndex, Chips> {
    pairs.iter().map(|(s, a)| (*s, Chips(*a))).collect()
}

fn live(seats: &[SeatIndex]) -> BTreeSet<SeatIndex> {
    seats.iter().copied().collect()
}

fn pot_info(p: &Pot) -> (u64, Vec<SeatIndex>) {
    (p.amount.0, p.eligible_seats.clone())
}

//
// ====================== СЛОИ ======================
//

/// Два игрока внесли поровну: один общий банк.
#[test]
fn equal_contributions_make_one_pot() {
    let pots = compute_side_pots(&contributions(&[(0, 100), (1, 100)]), &live(&[0, 1]));
    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (200, vec![0, 1]));
}

/// 100 / 200 / 300 all-in: три слоя.
#[test]
fn three_all_ins_make_three_layers() {
    let pots = compute_side_pots(
        &contributions(&[(0, 100), (1, 200), (2, 300)]),
        &live(&[0, 1, 2]),
    );
    assert_eq!(pots.len(), 3);
    assert_eq!(pot_info(&pots[0]), (300, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (200, vec![1, 2]));
    assert_eq!(pot_info(&pots[2]), (100, vec![2]));
}

/// Сфолдивший игрок кормит банк, но не претендует на него.
#[test]
fn folded_contribution_stays_in_pot() {
    let pots = compute_side_pots(
        &contributions(&[(0, 50), (1, 100), (2, 100)]),
        &live(&[1, 2]),
    );
    let total: u64 = pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(total, 250);
    assert!(pots.iter().all(|p| p.eligible_seats == vec![1, 2]));
}

/// Слой, до которого дотянулся только сфолдивший, сливается с предыдущим банком.
#[test]
fn dead_layer_merges_into_previous_pot() {
    // seat 2 поставил 300 и сфолдил на рейз, живые 0 и 1 – по 200.
    let pots = compute_side_pots(
        &contributions(&[(0, 200), (1, 200), (2, 300)]),
        &live(&[0, 1]),
    );
    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (700, vec![0, 1]));
}

/// Все банки достаются единственному живому месту.
#[test]
fn single_live_seat_is_eligible_for_every_pot() {
    let pots = compute_side_pots(&contributions(&[(0, 50), (1, 100)]), &live(&[1]));
    let total: u64 = pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(total, 150);
    assert!(pots.iter().all(|p| p.eligible_seats == vec![1]));
}

#[test]
fn zero_contributions_are_ignored() {
    let pots = compute_side_pots(&contributions(&[(0, 0), (1, 100), (2, 100)]), &live(&[0, 1, 2]));
    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (200, vec![1, 2]));
}

//
// ====================== НЕУРАВНЕННАЯ СТАВКА ======================
//

/// Вклады 100 / 50 / 200: 100 возвращается старшему, остаются банки 150 и 100.
#[test]
fn uncalled_excess_is_returned_before_pots() {
    let mut pot = PotManager::new();
    pot.add(0, Chips(100));
    pot.add(1, Chips(50));
    pot.add(2, Chips(200));

    assert_eq!(pot.return_uncalled(), Some((2, Chips(100))));
    assert_eq!(pot.total(), Chips(250));

    let pots = pot.pots(&live(&[0, 1, 2]));
    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (150, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (100, vec![0, 2]));
}

#[test]
fn nothing_to_return_when_top_is_matched() {
    let mut pot = PotManager::new();
    pot.add(0, Chips(100));
    pot.add(1, Chips(100));
    assert_eq!(pot.return_uncalled(), None);
    assert_eq!(pot.total(), Chips(200));
}

#[test]
fn lone_contributor_gets_everything_back() {
    let mut pot = PotManager::new();
    pot.add(3, Chips(40));
    assert_eq!(pot.return_uncalled(), Some((3, Chips(40))));
    assert_eq!(pot.total(), Chips::ZERO);
    assert!(pot.contributions().is_empty());
}

#[test]
fn refund_all_empties_the_pot() {
    let mut pot = PotManager::new();
    pot.add(0, Chips(30));
    pot.add(1, Chips(70));
    pot.add(0, Chips(20));
    assert_eq!(pot.contribution(0), Chips(50));

    let refunds = pot.refund_all();
    assert_eq!(refunds, contributions(&[(0, 50), (1, 70)]));
    assert_eq!(pot.total(), Chips::ZERO);
}

//
// ====================== ДЕЛЕНИЕ БАНКА ======================
//

#[test]
fn split_gives_odd_chips_in_order() {
    assert_eq!(split_pot(Chips(125), &[2, 0]), vec![(2, Chips(63)), (0, Chips(62))]);
    assert_eq!(
        split_pot(Chips(101), &[4, 1, 3]),
        vec![(4, Chips(34)), (1, Chips(34)), (3, Chips(33))]
    );
    assert_eq!(split_pot(Chips(300), &[5]), vec![(5, Chips(300))]);
}

#[test]
fn split_preserves_the_amount() {
    for amount in [0u64, 1, 7, 99, 1000, 1001] {
        for n in 1..=6u8 {
            let winners: Vec<SeatIndex> = (0..n).collect();
            let shares = split_pot(Chips(amount), &winners);
            let sum: u64 = shares.iter().map(|(_, c)| c.0).sum();
            assert_eq!(sum, amount);
        }
    }
}
