//! CLI 顯示用的格式化。無定義 (NaN/無限大) 的值一律顯示為破折號。

pub const UNDEFINED: &str = "–";

pub fn fmt_percent(value: f64) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    format!("{:.1}%", value * 100.0)
}

pub fn fmt_years(value: f64) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    format!("{:.2}", value)
}

/// 四捨五入到整數並以空白分隔千位，後接幣別標籤
pub fn fmt_amount(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} {}", sign, grouped, currency)
}
