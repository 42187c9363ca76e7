/// Formats an amount the fr-FR way, rounded to the cent: `1 234,56 €`
///
/// Only applied for display; derived amounts keep full precision.
pub fn format_eur(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.abs();
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in units.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{},{:02}\u{a0}€",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}
