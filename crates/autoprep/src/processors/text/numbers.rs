//! English cardinal number words.

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Spell out a digit-only token, e.g. `"21"` -> `"twenty-one"`.
///
/// Returns `None` when the token is not all ASCII digits or does not fit in
/// a `u64`.
pub fn digits_to_words(token: &str) -> Option<String> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u64>().ok().map(number_to_words)
}

/// Spell out a number in British-style English cardinals.
///
/// `101` -> `"one hundred and one"`, `1234` ->
/// `"one thousand, two hundred and thirty-four"`.
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as u16);
        rest /= 1000;
    }

    let mut parts: Vec<String> = Vec::new();
    let top = groups.len() - 1;
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let words = below_thousand(group);
        if scale == 0 && top > 0 && group < 100 {
            parts.push(format!("and {}", words));
        } else if scale == 0 {
            parts.push(words);
        } else {
            parts.push(format!("{} {}", words, SCALES[scale]));
        }
    }

    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(if part.starts_with("and ") { " " } else { ", " });
        }
        out.push_str(part);
    }
    out
}

fn below_hundred(n: u16) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        _ => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                units => format!("{}-{}", tens, ONES[units as usize]),
            }
        }
    }
}

fn below_thousand(n: u16) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred and {}", ONES[h as usize], below_hundred(r)),
    }
}
