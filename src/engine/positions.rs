use crate::domain::{Seat, SeatIndex, Table};

/// Место готово сыграть новую раздачу: не sit-out и есть фишки.
pub fn is_ready(seat: &Seat) -> bool {
    !seat.is_sitting_out() && !seat.stack.is_zero()
}

/// Найти следующее место по кругу (включая/исключая start), удовлетворяющее `pred`.
pub fn next_seat_where<F>(table: &Table, start: SeatIndex, include_start: bool, pred: F) -> Option<SeatIndex>
where
    F: Fn(&Seat) -> bool,
{
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if table.seats[idx].as_ref().is_some_and(&pred) {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Все места по кругу начиная с `start` (включительно), удовлетворяющие `pred`.
pub fn collect_seats_from<F>(table: &Table, start: SeatIndex, pred: F) -> Vec<SeatIndex>
where
    F: Fn(&Seat) -> bool,
{
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }

    (0..max)
        .map(|i| (start as usize + i) % max)
        .filter(|&idx| table.seats[idx].as_ref().is_some_and(&pred))
        .map(|idx| idx as SeatIndex)
        .collect()
}

/// Следующая позиция дилера: следующее готовое место после текущей кнопки,
/// либо первое готовое место, если раздач ещё не было. Sit-out пропускаются.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_seat_where(table, button, false, is_ready),
        None => next_seat_where(table, 0, true, is_ready),
    }
}

/// Позиции блайндов по порядку участников (по часовой слева от кнопки).
///
/// Хедз-ап: кнопка ставит малый блайнд, второй игрок – большой.
pub fn blind_seats(order: &[SeatIndex], button: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    match order.len() {
        0 | 1 => None,
        2 => {
            let other = order.iter().copied().find(|s| *s != button)?;
            Some((button, other))
        }
        _ => Some((order[0], order[1])),
    }
}

/// Участники по кругу, начиная сразу после `seat` (сам `seat` идёт последним).
pub fn rotate_after(order: &[SeatIndex], seat: SeatIndex) -> Vec<SeatIndex> {
    match order.iter().position(|s| *s == seat) {
        Some(pos) => order[pos + 1..]
            .iter()
            .chain(order[..=pos].iter())
            .copied()
            .collect(),
        None => order.to_vec(),
    }
}
