//! Статистики для заполнения пропусков

use std::collections::HashMap;

/// Медиана по непропущенным значениям; `None`, если значений нет
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }

    present.sort_by(|a, b| a.total_cmp(b));
    let n = present.len();
    if n % 2 == 0 {
        Some((present[n / 2 - 1] + present[n / 2]) / 2.0)
    } else {
        Some(present[n / 2])
    }
}

/// Самое частое значение; при равенстве побеждает встреченное первым
pub fn most_frequent<'a>(values: &[Option<&'a str>]) -> Option<&'a str> {
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    let mut order: Vec<&'a str> = Vec::new();

    for &value in values.iter().flatten() {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for value in order {
        let count = counts[value];
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}
